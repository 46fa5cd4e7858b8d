//! Treemap construction.
//!
//! This module turns per-source byte counts into:
//! - One compressed path tree per script (`path_tree`)
//! - The ordered list of per-script root nodes for a page (`assembler`)
//! - Summary statistics over the result (`metrics`)

pub mod assembler;
pub mod metrics;
pub mod path_tree;
pub mod sources;

// Re-export main types and functions
pub use assembler::{assemble_root_nodes, source_metrics, ScriptSources};
pub use metrics::{calculate_tree_stats, largest_sources, SourceEntry, TreeStats};
pub use path_tree::{build_tree, collapse_chains, split_segments, PathTreeBuilder, SourceMetrics};
pub use sources::{
    BundleLookup, CoverageLookup, DuplicateDetector, SummaryRequest, UnusedBytesEstimator,
};
