//! cssmin core - canonical stylesheet minifier
//!
//! Strips comments and insignificant whitespace, sorts each rule's
//! declarations by property name and shortens numeric values, without
//! changing what the stylesheet means.
//!
//! # Architecture
//!
//! ```text
//! CSS text → Scanner (lines, comments) → Rule Splitter → Rule / Declaration Parser
//!                                                              ↓
//!                                      Serializer ← sort ← Value Normalizer
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: Same input always produces identical output
//! - **Idempotent**: Minifying minified output changes nothing
//! - **Resilient**: A malformed rule or declaration drops only itself
//! - **All-or-nothing**: An unterminated comment yields no output

pub mod error;
pub mod normalizer;
pub mod parser;

use serde::Deserialize;

pub use error::{Error, Result};
pub use normalizer::{minify, minify_to, minify_with, Minified, Report};
pub use parser::ast::{Declaration, Rule, Stylesheet, ValueToken};

/// Transform options
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Isolate a rule's block the way the legacy tool did: drop the closing
    /// brace and the character before it. Off by default, which trims only
    /// the brace.
    pub legacy_truncation: bool,
}
