use crate::output::read_report;
use crate::treemap::calculate_tree_stats;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a treemap JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating treemap: {}", file_path.display());

    let report = read_report(file_path)?;

    let total_bytes: u64 = report.nodes.iter().map(|c| c.node.resource_bytes).sum();
    let sources: usize = report
        .nodes
        .iter()
        .map(|c| calculate_tree_stats(&c.node).leaf_count)
        .sum();

    println!("✓ Valid treemap JSON");
    println!("  Version: {}", report.version);
    println!("  Page: {}", report.final_url);
    println!("  Root nodes: {}", report.nodes.len());
    println!("  Sources: {}", sources);
    println!("  Total bytes: {}", total_bytes);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Script Treemap Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  finalUrl: string           - Page URL");
        println!("  nodes: array               - One entry per script, in page order");
        println!("    name: string             - Script URL (page URL for inline scripts)");
        println!("    node: object             - Root of the script's tree");
        println!("      name: string           - Path segment(s)");
        println!("      resourceBytes: number  - Bytes in this subtree");
        println!("      unusedBytes: number?   - Unused bytes (absent without coverage)");
        println!("      duplicateKey: string?  - Module duplicated in another script");
        println!("      children: array?       - Child nodes (absent on leaves)");
        println!("  generatedAt: string        - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Script Treemap v{}", env!("CARGO_PKG_VERSION"));
    println!("Treemap Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Size, unused-bytes and duplication treemaps for page JavaScript.");
}
