//! Build a directory-like tree from flat source paths.
//!
//! Each source path is split on `/` and inserted below a synthetic root
//! named after the shared prefix. Every node on the way down accumulates the
//! source's bytes, so internal nodes always carry the sum of their subtree.
//!
//! Example: "a/b.js" (100) and "a/c.js" (50) give
//! `"" 150 -> a 150 -> {b.js 100, c.js 50}`, which compresses to
//! `a 150 -> {b.js 100, c.js 50}`.

use crate::parser::schema::{LeafMetrics, TreeNode};
use crate::utils::config::UNMAPPED_SOURCE;
use indexmap::IndexMap;
use log::debug;

/// Per-source metrics, in the order sources should be merged
pub type SourceMetrics = IndexMap<String, LeafMetrics>;

/// Incremental builder for an uncompressed path tree
#[derive(Debug, Clone)]
pub struct PathTreeBuilder {
    root_prefix: String,
    root: TreeNode,
}

impl PathTreeBuilder {
    pub fn new(root_prefix: impl Into<String>) -> Self {
        let root_prefix = root_prefix.into();
        let root = TreeNode::new(root_prefix.clone());
        Self { root_prefix, root }
    }

    /// Merge one source into the tree
    ///
    /// Children keep first-seen order. The duplicate key, if any, lands only
    /// on the node for the last path segment.
    pub fn insert(&mut self, source: &str, metrics: &LeafMetrics) {
        let source = if source.is_empty() {
            UNMAPPED_SOURCE
        } else {
            source
        };
        let relative = source.strip_prefix(self.root_prefix.as_str()).unwrap_or(source);
        let segments = split_segments(relative);
        let last = segments.len() - 1;

        self.root.add_metrics(metrics);

        let mut current = &mut self.root;
        for (i, segment) in segments.into_iter().enumerate() {
            current = current.child_entry(segment);
            current.add_metrics(metrics);

            if i == last {
                if let Some(key) = &metrics.duplicate_key {
                    current.duplicate_key = Some(key.clone());
                }
            }
        }
    }

    /// The tree as built so far, without chain compression
    pub fn finish(self) -> TreeNode {
        self.root
    }
}

/// Build and compress the tree for one script
///
/// **Public** - main entry point for tree building
///
/// # Arguments
/// * `root_prefix` - Prefix shared by all sources, stripped before splitting
/// * `sources` - Non-empty mapping of source path to metrics
pub fn build_tree(root_prefix: &str, sources: &SourceMetrics) -> TreeNode {
    debug!(
        "Building path tree for {} sources (root prefix {:?})",
        sources.len(),
        root_prefix
    );

    let mut builder = PathTreeBuilder::new(root_prefix);
    for (source, metrics) in sources {
        builder.insert(source, metrics);
    }

    let mut root = builder.finish();
    collapse_chains(&mut root);
    root
}

/// Merge every run of single-child nodes into one node
///
/// The merged node's name is the `/`-joined names of the run. Sizes are
/// unchanged since a single child always carries its parent's totals.
pub fn collapse_chains(node: &mut TreeNode) {
    while let Some(child) = take_only_child(node) {
        node.name = join_segment(&node.name, &child.name);
        node.children = child.children;
        if child.duplicate_key.is_some() {
            node.duplicate_key = child.duplicate_key;
        }
    }

    if let Some(children) = node.children.as_mut() {
        for child in children {
            collapse_chains(child);
        }
    }
}

fn take_only_child(node: &mut TreeNode) -> Option<TreeNode> {
    match node.children.as_mut() {
        Some(children) if children.len() == 1 => children.pop(),
        _ => None,
    }
}

/// An empty root name contributes nothing, so "" + "x" is "x" rather than "/x"
fn join_segment(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", parent, child)
    }
}

/// Split on runs of `/`
///
/// Empty segments survive only at the ends, so "/a" gives ["", "a"] and
/// "a//b" gives ["a", "b"]. Never returns an empty vector.
pub fn split_segments(path: &str) -> Vec<&str> {
    let pieces: Vec<&str> = path.split('/').collect();
    let last = pieces.len() - 1;

    pieces
        .into_iter()
        .enumerate()
        .filter(|(i, piece)| !piece.is_empty() || *i == 0 || *i == last)
        .map(|(_, piece)| piece)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sources(entries: &[(&str, LeafMetrics)]) -> SourceMetrics {
        entries
            .iter()
            .map(|(path, metrics)| (path.to_string(), metrics.clone()))
            .collect()
    }

    fn names(node: &TreeNode) -> Vec<&str> {
        node.children().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(split_segments("a/b.js"), vec!["a", "b.js"]);
        assert_eq!(split_segments("a//b.js"), vec!["a", "b.js"]);
        assert_eq!(split_segments("/a"), vec!["", "a"]);
        assert_eq!(split_segments("a/"), vec!["a", ""]);
        assert_eq!(split_segments("plain.js"), vec!["plain.js"]);
        assert_eq!(split_segments(""), vec![""]);
    }

    #[test]
    fn test_uncompressed_shape() {
        let mut builder = PathTreeBuilder::new("");
        builder.insert("a/b.js", &LeafMetrics::new(100));
        builder.insert("a/c.js", &LeafMetrics::new(50));
        let root = builder.finish();

        assert_eq!(root.name, "");
        assert_eq!(root.resource_bytes, 150);
        assert_eq!(names(&root), vec!["a"]);

        let a = &root.children()[0];
        assert_eq!(a.resource_bytes, 150);
        assert_eq!(names(a), vec!["b.js", "c.js"]);
        assert_eq!(a.children()[0].resource_bytes, 100);
        assert_eq!(a.children()[1].resource_bytes, 50);
    }

    #[test]
    fn test_sibling_directory_is_not_collapsed() {
        let tree = build_tree(
            "",
            &sources(&[("a/b.js", LeafMetrics::new(100)), ("a/c.js", LeafMetrics::new(50))]),
        );

        assert_eq!(tree.name, "a");
        assert_eq!(tree.resource_bytes, 150);
        assert_eq!(names(&tree), vec!["b.js", "c.js"]);
    }

    #[test]
    fn test_single_chain_collapses_to_leaf() {
        let tree = build_tree(
            "",
            &sources(&[("x/y/z.js", LeafMetrics::new(10).with_unused(5))]),
        );

        assert_eq!(tree, TreeNode::leaf("x/y/z.js", 10).with_unused(Some(5)));
    }

    #[test]
    fn test_empty_source_is_unmapped() {
        let tree = build_tree(
            "",
            &sources(&[("", LeafMetrics::new(7)), ("src/app.js", LeafMetrics::new(3))]),
        );

        assert_eq!(names(&tree), vec![UNMAPPED_SOURCE, "src/app.js"]);
        assert_eq!(tree.children()[0].resource_bytes, 7);
    }

    #[test]
    fn test_root_prefix_is_stripped() {
        let tree = build_tree(
            "webpack:///",
            &sources(&[
                ("webpack:///src/a.js", LeafMetrics::new(4)),
                ("webpack:///lib/b.js", LeafMetrics::new(6)),
            ]),
        );

        assert_eq!(tree.name, "webpack:///");
        assert_eq!(names(&tree), vec!["src/a.js", "lib/b.js"]);
    }

    #[test]
    fn test_non_matching_prefix_leaves_path_alone() {
        let mut builder = PathTreeBuilder::new("root/");
        builder.insert("other/a.js", &LeafMetrics::new(1));
        let root = builder.finish();

        assert_eq!(names(&root), vec!["other"]);
    }

    #[test]
    fn test_unused_present_only_when_reported() {
        let tree = build_tree(
            "",
            &sources(&[
                ("a/used.js", LeafMetrics::new(10)),
                ("b/partial.js", LeafMetrics::new(10).with_unused(4)),
            ]),
        );

        assert_eq!(tree.unused_bytes, Some(4));
        assert_eq!(tree.children()[0].unused_bytes, None);
        assert_eq!(tree.children()[1].unused_bytes, Some(4));
    }

    #[test]
    fn test_duplicate_key_survives_collapse_onto_leaf() {
        let tree = build_tree(
            "",
            &sources(&[
                (
                    "node_modules/lodash/lodash.js",
                    LeafMetrics::new(30).with_duplicate_key("node_modules/lodash/lodash.js"),
                ),
                ("src/index.js", LeafMetrics::new(5)),
            ]),
        );

        assert_eq!(tree.duplicate_key, None);
        let lodash = &tree.children()[0];
        assert_eq!(lodash.name, "node_modules/lodash/lodash.js");
        assert_eq!(
            lodash.duplicate_key.as_deref(),
            Some("node_modules/lodash/lodash.js")
        );
        assert!(tree.children()[1].duplicate_key.is_none());
    }

    #[test]
    fn test_same_path_twice_sums() {
        let mut builder = PathTreeBuilder::new("");
        builder.insert("a.js", &LeafMetrics::new(2));
        builder.insert("a.js", &LeafMetrics::new(3));
        let root = builder.finish();

        assert_eq!(root.resource_bytes, 5);
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].resource_bytes, 5);
    }
}
