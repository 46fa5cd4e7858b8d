//! Assemble one root node per script delivered to a page.
//!
//! Inline scripts are merged into a single node named after the page. Each
//! external script gets, from most to least detailed:
//! 1. a per-source tree, when a bundle, coverage and a per-source summary exist
//! 2. an aggregate leaf, when only summary totals exist
//! 3. a placeholder leaf sized by the URL length, when data is missing
//!
//! Nothing here fails; missing inputs only shrink the node.

use super::path_tree::{build_tree, SourceMetrics};
use super::sources::{
    BundleLookup, CoverageLookup, DuplicateDetector, SummaryRequest, UnusedBytesEstimator,
};
use crate::parser::artifacts::{Bundle, ScriptElement, UnusedBytesSummary};
use crate::parser::schema::{LeafMetrics, RootNodeContainer, TreeNode};
use indexmap::IndexMap;
use log::{debug, warn};
use rayon::prelude::*;

/// Collaborators consulted for external scripts
#[derive(Clone, Copy)]
pub struct ScriptSources<'a> {
    pub bundles: &'a dyn BundleLookup,
    pub coverage: &'a dyn CoverageLookup,
    pub estimator: &'a dyn UnusedBytesEstimator,
    pub duplicates: &'a dyn DuplicateDetector,
}

/// Build the ordered root node list for a page
///
/// **Public** - main entry point for assembly
///
/// # Arguments
/// * `scripts` - Script elements in document order
/// * `final_url` - Page URL, used to name the merged inline node
/// * `sources` - Per-script data collaborators
///
/// # Returns
/// The inline container (if any inline content exists) followed by one
/// container per external script, in encounter order
pub fn assemble_root_nodes(
    scripts: &[ScriptElement],
    final_url: &str,
    sources: ScriptSources<'_>,
) -> Vec<RootNodeContainer> {
    let mut nodes = Vec::new();

    let inline_length = scripts
        .iter()
        .map(ScriptElement::inline_length)
        .fold(0u64, u64::saturating_add);
    if inline_length > 0 {
        debug!("Merged inline scripts into {} ({} bytes)", final_url, inline_length);
        nodes.push(RootNodeContainer::new(
            final_url,
            TreeNode::leaf(final_url, inline_length),
        ));
    }

    let external: Vec<&str> = scripts
        .iter()
        .filter_map(ScriptElement::external_src)
        .collect();

    // Indexed parallel map: each result lands in its script's slot.
    let external_nodes: Vec<RootNodeContainer> = external
        .par_iter()
        .map(|src| script_root_node(src, sources))
        .collect();

    nodes.extend(external_nodes);
    nodes
}

fn script_root_node(src: &str, sources: ScriptSources<'_>) -> RootNodeContainer {
    let (Some(bundle), Some(coverage)) = (
        sources.bundles.bundle_for(src),
        sources.coverage.coverage_for(src),
    ) else {
        debug!("No bundle or coverage for {}, using placeholder", src);
        return placeholder(src);
    };

    let request = SummaryRequest {
        url: src,
        coverage,
        bundle: Some(bundle),
    };
    let Some(summary) = sources.estimator.summarize(request) else {
        warn!("No unused-bytes summary for {}, using placeholder", src);
        return placeholder(src);
    };

    let node = match &summary.sources_wasted_bytes {
        Some(wasted) if !bundle.files.is_empty() => {
            let metrics = source_metrics(bundle, wasted, sources.duplicates);
            build_tree(bundle.tree_root(), &metrics)
        }
        _ => {
            debug!("No per-source breakdown for {}, using totals", src);
            aggregate_leaf(src, &summary)
        }
    };

    RootNodeContainer::new(src, node)
}

/// Leaf metrics for every source the bundle knows about
pub fn source_metrics(
    bundle: &Bundle,
    wasted: &IndexMap<String, u64>,
    duplicates: &dyn DuplicateDetector,
) -> SourceMetrics {
    bundle
        .files
        .iter()
        .map(|(source, &size)| {
            let key = duplicates.normalize(source);
            let metrics = LeafMetrics {
                resource_bytes: size,
                unused_bytes: wasted.get(source).copied(),
                duplicate_key: duplicates.is_duplicated(&key).then_some(key),
            };
            (source.clone(), metrics)
        })
        .collect()
}

/// Signals "no size data": the node's size is just the URL length
fn placeholder(src: &str) -> RootNodeContainer {
    RootNodeContainer::new(src, TreeNode::leaf(src, src.chars().count() as u64))
}

fn aggregate_leaf(src: &str, summary: &UnusedBytesSummary) -> TreeNode {
    TreeNode::leaf(src, summary.total_bytes).with_unused(Some(summary.wasted_bytes))
}
