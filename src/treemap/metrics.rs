//! Statistics over built treemaps.
//!
//! Used for the text summary: totals per root node and the largest
//! individual sources across the whole page.

use crate::parser::schema::{RootNodeContainer, TreeNode};
use log::debug;

/// Totals for one tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub total_bytes: u64,

    /// `None` when no node in the tree had usage data
    pub unused_bytes: Option<u64>,

    pub leaf_count: usize,
    pub duplicate_count: usize,
    pub max_depth: usize,
}

impl TreeStats {
    /// Share of bytes that went unused, if usage data exists
    pub fn unused_percentage(&self) -> Option<f64> {
        let unused = self.unused_bytes?;
        if self.total_bytes == 0 {
            return Some(0.0);
        }
        Some(unused as f64 * 100.0 / self.total_bytes as f64)
    }

    /// Get human-readable summary
    pub fn summary(&self) -> String {
        let unused = match (self.unused_bytes, self.unused_percentage()) {
            (Some(bytes), Some(pct)) => format!("{} ({:.1}%)", bytes, pct),
            _ => "n/a".to_string(),
        };
        format!(
            "Total: {} bytes | Unused: {} | Sources: {} | Duplicated: {} | Depth: {}",
            self.total_bytes, unused, self.leaf_count, self.duplicate_count, self.max_depth
        )
    }
}

/// Calculate totals for a tree
///
/// Root totals already hold the sums; leaves are walked for the counts.
pub fn calculate_tree_stats(node: &TreeNode) -> TreeStats {
    let mut stats = TreeStats {
        total_bytes: node.resource_bytes,
        unused_bytes: node.unused_bytes,
        ..Default::default()
    };
    count_leaves(node, 0, &mut stats);
    stats
}

fn count_leaves(node: &TreeNode, depth: usize, stats: &mut TreeStats) {
    stats.max_depth = stats.max_depth.max(depth);

    if node.is_leaf() {
        stats.leaf_count += 1;
        if node.duplicate_key.is_some() {
            stats.duplicate_count += 1;
        }
        return;
    }

    for child in node.children() {
        count_leaves(child, depth + 1, stats);
    }
}

/// One leaf, addressed by its full path below the script
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntry {
    /// Root container name the source belongs to
    pub script: String,

    /// `/`-joined node names from the tree root down to the leaf
    pub path: String,

    pub resource_bytes: u64,
    pub unused_bytes: Option<u64>,
    pub duplicated: bool,

    /// Percentage of all bytes on the page
    pub percentage: f64,
}

/// Largest leaves across all root nodes, biggest first
///
/// **Public** - main entry point for source ranking
pub fn largest_sources(nodes: &[RootNodeContainer], top_n: usize) -> Vec<SourceEntry> {
    let page_total: u64 = nodes.iter().map(|c| c.node.resource_bytes).sum();

    let mut entries = Vec::new();
    for container in nodes {
        collect_leaves(&container.name, &container.node, None, page_total, &mut entries);
    }

    debug!("Ranking {} sources, keeping top {}", entries.len(), top_n);

    // Stable sort keeps encounter order among equal sizes.
    entries.sort_by(|a, b| b.resource_bytes.cmp(&a.resource_bytes));
    entries.truncate(top_n);
    entries
}

fn collect_leaves(
    script: &str,
    node: &TreeNode,
    parent_path: Option<&str>,
    page_total: u64,
    out: &mut Vec<SourceEntry>,
) {
    let path = match parent_path {
        Some(parent) if !parent.is_empty() => format!("{}/{}", parent, node.name),
        _ => node.name.clone(),
    };

    if node.is_leaf() {
        let percentage = if page_total > 0 {
            (node.resource_bytes as f64 / page_total as f64) * 100.0
        } else {
            0.0
        };
        out.push(SourceEntry {
            script: script.to_string(),
            path,
            resource_bytes: node.resource_bytes,
            unused_bytes: node.unused_bytes,
            duplicated: node.duplicate_key.is_some(),
            percentage,
        });
        return;
    }

    for child in node.children() {
        collect_leaves(script, child, Some(path.as_str()), page_total, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> TreeNode {
        TreeNode {
            children: Some(vec![
                TreeNode::leaf("a.js", 60).with_unused(Some(10)),
                TreeNode {
                    duplicate_key: Some("node_modules/b.js".to_string()),
                    ..TreeNode::leaf("node_modules/b.js", 40)
                },
            ]),
            ..TreeNode::leaf("src", 100).with_unused(Some(10))
        }
    }

    #[test]
    fn test_calculate_tree_stats() {
        let stats = calculate_tree_stats(&tree());

        assert_eq!(stats.total_bytes, 100);
        assert_eq!(stats.unused_bytes, Some(10));
        assert_eq!(stats.leaf_count, 2);
        assert_eq!(stats.duplicate_count, 1);
        assert_eq!(stats.max_depth, 1);
        assert_eq!(stats.unused_percentage(), Some(10.0));
    }

    #[test]
    fn test_stats_without_usage_data() {
        let stats = calculate_tree_stats(&TreeNode::leaf("https://a.test/x.js", 19));

        assert_eq!(stats.unused_percentage(), None);
        assert!(stats.summary().contains("Unused: n/a"));
    }

    #[test]
    fn test_largest_sources() {
        let nodes = vec![
            RootNodeContainer::new("https://a.test/app.js", tree()),
            RootNodeContainer::new("https://a.test/", TreeNode::leaf("https://a.test/", 100)),
        ];

        let top = largest_sources(&nodes, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].path, "https://a.test/");
        assert_eq!(top[0].percentage, 50.0);
        assert_eq!(top[1].path, "src/a.js");
        assert_eq!(top[1].script, "https://a.test/app.js");
        assert_eq!(top[1].unused_bytes, Some(10));
    }
}
