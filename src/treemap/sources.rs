//! Collaborators the assembler pulls per-script data from.
//!
//! Bundle reconstruction, unused-byte estimation and duplicate detection
//! happen elsewhere; the assembler only sees their results through these
//! traits. All of them are `Sync` so scripts can be processed in parallel.

use crate::parser::artifacts::{Bundle, CoverageRange, UnusedBytesSummary};

/// Source-map derived composition of a delivered script
pub trait BundleLookup: Sync {
    fn bundle_for(&self, url: &str) -> Option<&Bundle>;
}

/// Coverage ranges recorded for a script during page load
pub trait CoverageLookup: Sync {
    fn coverage_for(&self, url: &str) -> Option<&[CoverageRange]>;
}

/// Input for one unused-bytes estimate
#[derive(Debug, Clone, Copy)]
pub struct SummaryRequest<'a> {
    pub url: &'a str,
    pub coverage: &'a [CoverageRange],
    pub bundle: Option<&'a Bundle>,
}

/// Produces wasted-byte summaries, optionally broken down per source
pub trait UnusedBytesEstimator: Sync {
    /// `None` when no estimate could be produced for this script
    fn summarize(&self, request: SummaryRequest<'_>) -> Option<UnusedBytesSummary>;
}

/// Normalizes source paths and answers whether a module is duplicated
pub trait DuplicateDetector: Sync {
    fn normalize(&self, source: &str) -> String;

    fn is_duplicated(&self, key: &str) -> bool;
}
