//! Canonical normalizer — rewrites a stylesheet into its minified canonical form
//!
//! # Pipeline
//!
//! `text → normalize_lines → strip_comments → split_rules → sort → serialize_canonical`
//!
//! # Guarantees
//!
//! - **Deterministic**: same input always produces same output
//! - **Ordered**: declarations sorted by name, ties kept in source order
//! - **All-or-nothing**: a fatal error produces no output at all

use std::io::Write;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::parser::ast::{Declaration, Stylesheet, ValueToken};
use crate::parser::scanner::trim;
use crate::parser::split_keep_leading;
use crate::{Options, Result};

// ── Public API ─────────────────────────────────────────────

/// Result of a successful run: the minified text plus a summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minified {
    pub css: String,
    pub report: Report,
}

/// Summary of one run, suitable for JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub rules: usize,
    pub skipped_rules: usize,
    pub skipped_declarations: usize,
    pub input_bytes: usize,
    pub output_bytes: usize,
    /// Hex SHA-256 of the canonical output
    pub sha256: String,
}

impl Report {
    fn new(input: &str, sheet: &Stylesheet, output: &str) -> Self {
        Report {
            rules: sheet.rules.len(),
            skipped_rules: sheet.skipped_rules(),
            skipped_declarations: sheet.skipped_declarations(),
            input_bytes: input.len(),
            output_bytes: output.len(),
            sha256: compute_digest(output),
        }
    }
}

/// Minify stylesheet text with default options
///
/// # Errors
/// Returns `UnterminatedComment` if a block comment is never closed.
pub fn minify(css: &str) -> Result<String> {
    minify_with(css, &Options::default()).map(|m| m.css)
}

/// Minify stylesheet text and report what was kept and dropped
pub fn minify_with(css: &str, options: &Options) -> Result<Minified> {
    let sheet = crate::parser::parse(css, options)?;
    let canonical = serialize_canonical(&sheet);
    let report = Report::new(css, &sheet, &canonical);
    Ok(Minified {
        css: canonical,
        report,
    })
}

/// Minify into `sink`
///
/// The whole transform completes before the first byte is written, so a
/// fatal error leaves the sink untouched.
pub fn minify_to<W: Write>(css: &str, options: &Options, sink: &mut W) -> Result<Report> {
    let minified = minify_with(css, options)?;
    sink.write_all(minified.css.as_bytes())?;
    sink.flush()?;
    Ok(minified.report)
}

// ── Value normalization ────────────────────────────────────

/// One text-to-text rewrite, applied once per token
struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        RewriteRule {
            // Patterns are literals below
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }
}

/// Ordered rewrites; each token starts with a space so `\s` always has a
/// boundary to anchor on.
static REWRITE_RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    vec![
        // 0px, 0em, 0% ... → 0
        RewriteRule::new(r"([ \t\n\x0B\f\r])0(px|em|%|in|cm|mm|pc|pt|ex)", "${1}0"),
        // 0.6 → .6
        RewriteRule::new(r"([ \t\n\x0B\f\r])0+\.([0-9]+)", "${1}.${2}"),
    ]
});

const ZERO_RUNS: [&str; 3] = ["0 0 0 0", "0 0 0", "0 0"];

/// Split a declaration value on `,` and normalize each piece on its own
pub fn normalize_value(value: &str) -> Vec<ValueToken> {
    split_keep_leading(value, ',')
        .into_iter()
        .map(normalize_token)
        .collect()
}

/// Normalize one comma-separated piece of a value
///
/// Zero lengths lose their unit, decimals lose leading zeros, and a token
/// made of two to four bare zeros becomes a single `0`.
pub fn normalize_token(piece: &str) -> ValueToken {
    let mut text = format!(" {}", piece);
    for rule in REWRITE_RULES.iter() {
        text = rule
            .pattern
            .replace_all(&text, rule.replacement)
            .into_owned();
    }

    let text = trim(&text);
    if ZERO_RUNS.contains(&text) {
        return ValueToken::new("0");
    }
    ValueToken::new(text)
}

// ── Canonical ordering ─────────────────────────────────────

/// Sort declarations by property name; duplicates keep their source order
pub fn sort_declarations(declarations: &mut [Declaration]) {
    declarations.sort_by(|a, b| a.name.cmp(&b.name));
}

// ── Canonical Serializer ───────────────────────────────────

/// Serialize a stylesheet to its canonical minified text
///
/// Rules are concatenated with no separator and the output ends in `\r\n`.
pub fn serialize_canonical(sheet: &Stylesheet) -> String {
    let mut out = sheet.to_string();
    out.push_str("\r\n");
    out
}

/// Hex SHA-256 of canonical text
pub fn compute_digest(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}
