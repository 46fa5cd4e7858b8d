//! Artifact parsing and schema definitions.
//!
//! This module handles:
//! - Parsing the page artifacts JSON
//! - Normalizing sources into duplicate-module keys
//! - Defining output schema

pub mod artifacts;
pub mod duplication;
pub mod schema;

// Re-export main types
pub use artifacts::{
    load_artifacts, parse_artifacts, Bundle, CoverageRange, PageArtifacts, ScriptElement,
    UnusedBytesSummary,
};
pub use duplication::{normalize_source, DuplicateModules};
pub use schema::{LeafMetrics, RootNodeContainer, TreeNode, TreemapReport};
