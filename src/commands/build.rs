//! Build command implementation.
//!
//! The build command:
//! 1. Loads page artifacts
//! 2. Resolves duplicated modules
//! 3. Assembles one root node per script
//! 4. Writes the treemap report

use crate::output::{generate_text_summary, write_report};
use crate::parser::{load_artifacts, DuplicateModules, PageArtifacts, TreemapReport};
use crate::treemap::{assemble_root_nodes, calculate_tree_stats, ScriptSources};
use crate::utils::config::{DEFAULT_TOP_SOURCES, MAX_TOP_SOURCES, SCHEMA_VERSION};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the build command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct BuildArgs {
    /// Page artifacts JSON
    pub input: PathBuf,

    /// Output path for the treemap JSON
    pub output: PathBuf,

    /// Number of largest sources listed in the summary
    pub top_sources: usize,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Write compact JSON instead of pretty-printed
    pub compact: bool,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("artifacts.json"),
            output: PathBuf::from("treemap.json"),
            top_sources: DEFAULT_TOP_SOURCES,
            print_summary: false,
            compact: false,
        }
    }
}

/// Execute the build command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was written
///
/// # Errors
/// * Unreadable or malformed artifacts
/// * File write errors
pub fn execute_build(args: &BuildArgs) -> Result<TreemapReport> {
    let start_time = Instant::now();

    info!("Step 1/4: Loading artifacts from {}...", args.input.display());
    let artifacts = load_artifacts(&args.input)
        .with_context(|| format!("Failed to load artifacts from {}", args.input.display()))?;

    info!("Step 2/4: Resolving duplicated modules...");
    let duplicates = resolve_duplicates(&artifacts);
    debug!("{} duplicated modules", duplicates.len());

    info!("Step 3/4: Assembling treemap for {} scripts...", artifacts.scripts.len());
    let report = build_report(&artifacts, &duplicates);

    for container in &report.nodes {
        debug!(
            "  {}: {}",
            container.name,
            calculate_tree_stats(&container.node).summary()
        );
    }

    info!("Step 4/4: Writing output...");
    write_report(&report, &args.output, !args.compact)
        .context("Failed to write treemap JSON")?;

    info!("✓ Treemap written to: {}", args.output.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("TREEMAP SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Page:       {}", report.final_url);
        println!("Root nodes: {}", report.nodes.len());
        println!("\n{}", generate_text_summary(&report, args.top_sources));
        println!("{}", "=".repeat(80));
    }

    info!("Build completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(report)
}

/// Assemble the report for already-loaded artifacts
///
/// **Public** - the in-memory half of `execute_build`
pub fn build_report(artifacts: &PageArtifacts, duplicates: &DuplicateModules) -> TreemapReport {
    let sources = ScriptSources {
        bundles: artifacts,
        coverage: artifacts,
        estimator: artifacts,
        duplicates,
    };

    TreemapReport {
        version: SCHEMA_VERSION.to_string(),
        final_url: artifacts.final_url.clone(),
        nodes: assemble_root_nodes(&artifacts.scripts, &artifacts.final_url, sources),
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Explicit duplicate keys win; otherwise derive them from the bundles
pub fn resolve_duplicates(artifacts: &PageArtifacts) -> DuplicateModules {
    match &artifacts.duplicated_modules {
        Some(keys) => DuplicateModules::from_keys(keys.iter().cloned()),
        None => DuplicateModules::from_bundles(artifacts.bundles.values()),
    }
}

/// Validate build arguments
///
/// **Public** - can be called before execute_build for early validation
pub fn validate_args(args: &BuildArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.top_sources == 0 {
        anyhow::bail!("top_sources must be greater than 0");
    }

    if args.top_sources > MAX_TOP_SOURCES {
        anyhow::bail!("top_sources is too large (max {})", MAX_TOP_SOURCES);
    }

    Ok(())
}
