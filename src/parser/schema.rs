//! Output JSON schema definitions for treemap data.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.
//!
//! Optional fields are omitted rather than zeroed: a missing `unusedBytes`
//! means "no usage data", while `0` means "fully used".

use serde::{Deserialize, Serialize};

/// Per-source metrics fed into the tree builder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafMetrics {
    pub resource_bytes: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused_bytes: Option<u64>,

    /// Normalized module name, set only when the source is duplicated across bundles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_key: Option<String>,
}

impl LeafMetrics {
    pub fn new(resource_bytes: u64) -> Self {
        Self {
            resource_bytes,
            ..Default::default()
        }
    }

    pub fn with_unused(mut self, unused_bytes: u64) -> Self {
        self.unused_bytes = Some(unused_bytes);
        self
    }

    pub fn with_duplicate_key(mut self, key: impl Into<String>) -> Self {
        self.duplicate_key = Some(key.into());
        self
    }
}

/// A node in a script's treemap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Path segment, or `/`-joined segments after chain compression
    pub name: String,

    /// Own size for leaves, sum of descendants otherwise
    pub resource_bytes: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused_bytes: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_key: Option<String>,

    /// Absent on leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Create an empty node with no metrics and no children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_bytes: 0,
            unused_bytes: None,
            duplicate_key: None,
            children: None,
        }
    }

    /// Create a childless node of the given size
    pub fn leaf(name: impl Into<String>, resource_bytes: u64) -> Self {
        Self {
            resource_bytes,
            ..Self::new(name)
        }
    }

    pub fn with_unused(mut self, unused_bytes: Option<u64>) -> Self {
        self.unused_bytes = unused_bytes;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Children as a slice (empty for leaves)
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Add one source's metrics to this node's running totals
    ///
    /// Totals saturate at `u64::MAX` instead of overflowing.
    pub fn add_metrics(&mut self, metrics: &LeafMetrics) {
        self.resource_bytes = self.resource_bytes.saturating_add(metrics.resource_bytes);
        if let Some(unused) = metrics.unused_bytes {
            let total = self.unused_bytes.get_or_insert(0);
            *total = total.saturating_add(unused);
        }
    }

    /// Find the child named `name`, appending a new one if none exists
    pub fn child_entry(&mut self, name: &str) -> &mut TreeNode {
        let children = self.children.get_or_insert_with(Vec::new);
        let index = match children.iter().position(|child| child.name == name) {
            Some(index) => index,
            None => {
                children.push(TreeNode::new(name));
                children.len() - 1
            }
        };
        &mut children[index]
    }
}

/// A named root of one script's tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootNodeContainer {
    /// Script URL, or the page URL for merged inline scripts
    pub name: String,
    pub node: TreeNode,
}

impl RootNodeContainer {
    pub fn new(name: impl Into<String>, node: TreeNode) -> Self {
        Self {
            name: name.into(),
            node,
        }
    }
}

/// Top-level report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreemapReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Final URL of the page the scripts were delivered to
    pub final_url: String,

    /// One root per inline group or external script, in encounter order
    pub nodes: Vec<RootNodeContainer>,

    /// Timestamp when report was generated
    pub generated_at: String,
}
