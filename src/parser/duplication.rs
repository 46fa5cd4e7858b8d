//! Duplicate module keys.
//!
//! Sources from different bundles are compared by a normalized name, so
//! `a/node_modules/lodash/map.js` and `b/node_modules/lodash/map.js` are the
//! same module.

use super::artifacts::Bundle;
use crate::treemap::sources::DuplicateDetector;
use crate::utils::config::NODE_MODULES_MARKER;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Normalize a source path into a duplicate-group key
///
/// Drops one trailing `?` and keeps everything from the last `node_modules`.
pub fn normalize_source(source: &str) -> String {
    let source = source.strip_suffix('?').unwrap_or(source);

    match source.rfind(NODE_MODULES_MARKER) {
        Some(index) => source[index..].to_string(),
        None => source.to_string(),
    }
}

/// Set of module keys known to be duplicated across bundles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateModules {
    keys: HashSet<String>,
}

impl DuplicateModules {
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Keys whose normalized source shows up in two or more bundles
    pub fn from_bundles<'a>(bundles: impl IntoIterator<Item = &'a Bundle>) -> Self {
        let mut bundles_per_key: HashMap<String, usize> = HashMap::new();

        for bundle in bundles {
            let keys: HashSet<String> = bundle.files.keys().map(|s| normalize_source(s)).collect();
            for key in keys {
                *bundles_per_key.entry(key).or_insert(0) += 1;
            }
        }

        let keys: HashSet<String> = bundles_per_key
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(key, _)| key)
            .collect();

        debug!("Found {} duplicated modules across bundles", keys.len());

        Self { keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl DuplicateDetector for DuplicateModules {
    fn normalize(&self, source: &str) -> String {
        normalize_source(source)
    }

    fn is_duplicated(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}
