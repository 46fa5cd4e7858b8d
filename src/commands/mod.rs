//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod build;
pub mod utils;

// Re-export main command functions
pub use build::{build_report, execute_build, resolve_duplicates, validate_args, BuildArgs};
pub use utils::{display_schema, display_version, validate_report_file};
