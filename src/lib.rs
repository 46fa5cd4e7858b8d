//! Script Treemap
//!
//! Builds hierarchical treemaps of the JavaScript delivered to a page:
//! how many bytes each original source contributes, how many of them went
//! unused, and which modules are duplicated across scripts.
//!
//! This crate provides the core implementation for the
//! `script-treemap` CLI tool.

pub mod commands;
pub mod output;
pub mod parser;
pub mod treemap;
pub mod utils;
