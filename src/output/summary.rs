//! Plain-text summary table for the terminal.

use crate::parser::schema::TreemapReport;
use crate::treemap::metrics::{calculate_tree_stats, largest_sources};

const NAME_WIDTH: usize = 48;

/// Render per-script totals followed by the largest sources
pub fn generate_text_summary(report: &TreemapReport, max_sources: usize) -> String {
    let mut lines = Vec::new();

    lines.push("  SCRIPTS".to_string());
    lines.push(format!(
        "  {:<width$} {:>12} {:>12} {:>7} {:>5}",
        "Script",
        "BYTES",
        "UNUSED",
        "%",
        "DUPS",
        width = NAME_WIDTH
    ));
    lines.push(format!("  {}", "-".repeat(NAME_WIDTH + 41)));

    for container in &report.nodes {
        let stats = calculate_tree_stats(&container.node);
        lines.push(format!(
            "  {:<width$} {:>12} {:>12} {:>7} {:>5}",
            truncate(&container.name),
            stats.total_bytes,
            format_optional(stats.unused_bytes),
            stats
                .unused_percentage()
                .map(|p| format!("{:.1}%", p))
                .unwrap_or_else(|| "-".to_string()),
            stats.duplicate_count,
            width = NAME_WIDTH
        ));
    }

    let top = largest_sources(&report.nodes, max_sources);
    if !top.is_empty() {
        lines.push(String::new());
        lines.push("  LARGEST SOURCES".to_string());
        lines.push(format!(
            "  {:<width$} {:>12} {:>12} {:>7}",
            "Source",
            "BYTES",
            "UNUSED",
            "% PAGE",
            width = NAME_WIDTH
        ));
        lines.push(format!("  {}", "-".repeat(NAME_WIDTH + 35)));

        for entry in &top {
            let marker = if entry.duplicated { " [dup]" } else { "" };
            lines.push(format!(
                "  {:<width$} {:>12} {:>12} {:>6.1}%{}",
                truncate(&entry.path),
                entry.resource_bytes,
                format_optional(entry.unused_bytes),
                entry.percentage,
                marker,
                width = NAME_WIDTH
            ));
        }
    }

    lines.join("\n")
}

fn format_optional(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Keep the tail of long names, which holds the file name
fn truncate(name: &str) -> String {
    let count = name.chars().count();
    if count <= NAME_WIDTH {
        return name.to_string();
    }
    let tail: String = name.chars().skip(count - (NAME_WIDTH - 3)).collect();
    format!("...{}", tail)
}
