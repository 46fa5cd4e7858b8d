//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Path given to sources that arrive without one
pub const UNMAPPED_SOURCE: &str = "<unmapped>";

/// Dependency paths are normalized to start at the last occurrence of this segment
pub const NODE_MODULES_MARKER: &str = "node_modules";

/// Number of largest sources listed in the text summary by default
pub const DEFAULT_TOP_SOURCES: usize = 20;
pub const MAX_TOP_SOURCES: usize = 1000;
