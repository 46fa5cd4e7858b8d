//! Page artifacts gathered for one page load.
//!
//! The artifacts file carries everything the treemap needs from outside:
//! the script inventory, source-map bundles, coverage ranges, precomputed
//! unused-byte summaries and, optionally, the duplicated module keys.
//!
//! `PageArtifacts` answers the collaborator traits directly, so a loaded
//! file can be handed straight to the assembler.

use crate::treemap::sources::{BundleLookup, CoverageLookup, SummaryRequest, UnusedBytesEstimator};
use crate::utils::error::ParseError;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A `<script>` element: external when `src` is set, inline otherwise
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Inline text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ScriptElement {
    pub fn external(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            content: None,
        }
    }

    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            src: None,
            content: Some(content.into()),
        }
    }

    /// The external URL, if any; an empty `src` does not count
    pub fn external_src(&self) -> Option<&str> {
        self.src.as_deref().filter(|src| !src.is_empty())
    }

    pub fn is_inline(&self) -> bool {
        self.external_src().is_none()
    }

    /// Length of the inline content in characters (0 for external scripts)
    pub fn inline_length(&self) -> u64 {
        match (self.external_src(), &self.content) {
            (None, Some(content)) => content.chars().count() as u64,
            _ => 0,
        }
    }
}

/// Composition of a script reconstructed from its source map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Source root the bundle resolved its sources against
    #[serde(default)]
    pub source_root: String,

    /// Bytes each original source occupies in the delivered script
    #[serde(default)]
    pub files: IndexMap<String, u64>,

    /// The raw `sourceRoot` field of the source map, if it had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_source_root: Option<String>,
}

impl Bundle {
    /// Prefix stripped from sources before building the tree
    ///
    /// Only the prefix the source map itself declares; empty when it has none.
    pub fn tree_root(&self) -> &str {
        self.map_source_root.as_deref().unwrap_or("")
    }
}

/// A byte range of a script and how often it ran
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRange {
    pub start_offset: u64,
    pub end_offset: u64,
    pub count: u64,
}

/// Wasted-byte estimate for one script
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedBytesSummary {
    pub total_bytes: u64,
    pub wasted_bytes: u64,

    /// Per-source breakdown, only available when the script has a source map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_wasted_bytes: Option<IndexMap<String, u64>>,
}

/// Everything known about the scripts of one page load
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageArtifacts {
    pub final_url: String,

    #[serde(default)]
    pub scripts: Vec<ScriptElement>,

    #[serde(default)]
    pub bundles: HashMap<String, Bundle>,

    #[serde(default)]
    pub coverage: HashMap<String, Vec<CoverageRange>>,

    #[serde(default)]
    pub unused_summaries: HashMap<String, UnusedBytesSummary>,

    /// Explicit duplicate module keys; derived from the bundles when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicated_modules: Option<Vec<String>>,
}

impl BundleLookup for PageArtifacts {
    fn bundle_for(&self, url: &str) -> Option<&Bundle> {
        self.bundles.get(url)
    }
}

impl CoverageLookup for PageArtifacts {
    fn coverage_for(&self, url: &str) -> Option<&[CoverageRange]> {
        self.coverage.get(url).map(Vec::as_slice)
    }
}

impl UnusedBytesEstimator for PageArtifacts {
    fn summarize(&self, request: SummaryRequest<'_>) -> Option<UnusedBytesSummary> {
        self.unused_summaries.get(request.url).cloned()
    }
}

/// Parse page artifacts from JSON
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::JsonError` - Invalid JSON structure
/// * `ParseError::InvalidFormat` - Missing final URL or a script with neither src nor content
pub fn parse_artifacts(raw: &serde_json::Value) -> Result<PageArtifacts, ParseError> {
    let artifacts: PageArtifacts = serde_json::from_value(raw.clone())?;
    validate_artifacts(&artifacts)?;

    debug!(
        "Parsed artifacts for {}: {} scripts, {} bundles, {} coverage entries",
        artifacts.final_url,
        artifacts.scripts.len(),
        artifacts.bundles.len(),
        artifacts.coverage.len()
    );

    Ok(artifacts)
}

/// Read and parse an artifacts file
pub fn load_artifacts(path: impl AsRef<Path>) -> Result<PageArtifacts, ParseError> {
    let path = path.as_ref();
    debug!("Reading artifacts from: {}", path.display());

    let reader = BufReader::new(File::open(path)?);
    let raw: serde_json::Value = serde_json::from_reader(reader)?;

    parse_artifacts(&raw)
}

fn validate_artifacts(artifacts: &PageArtifacts) -> Result<(), ParseError> {
    if artifacts.final_url.is_empty() {
        return Err(ParseError::InvalidFormat("finalUrl cannot be empty".to_string()));
    }

    if let Some(index) = artifacts
        .scripts
        .iter()
        .position(|script| script.external_src().is_none() && script.content.is_none())
    {
        return Err(ParseError::InvalidFormat(format!(
            "script #{} has neither src nor content",
            index
        )));
    }

    Ok(())
}
