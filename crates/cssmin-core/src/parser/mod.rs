//! Stylesheet parser — scanner, rule splitter, rule and declaration parsers
//!
//! Converts raw stylesheet text into a [`Stylesheet`] of sorted rules.
//!
//! A malformed rule or declaration is logged, recorded in
//! [`Stylesheet::diagnostics`] and left out. Only an unterminated comment
//! stops the parse.

pub mod ast;
pub mod scanner;

use crate::normalizer::{normalize_value, sort_declarations};
use crate::{Error, Options, Result};
use ast::{Declaration, Rule, Stylesheet};
use scanner::trim;

/// Parse stylesheet text into rules with canonically ordered declarations
///
/// # Errors
/// Returns [`Error::UnterminatedComment`] when a `/*` is never closed.
/// Recoverable errors are collected on the returned stylesheet instead.
pub fn parse(text: &str, options: &Options) -> Result<Stylesheet> {
    let buffer = scanner::normalize_lines(text);
    let buffer = scanner::strip_comments(&buffer)?;
    tracing::debug!("scanned {} bytes into {} bytes", text.len(), buffer.len());

    let sheet = split_rules(&buffer, options);
    tracing::debug!(
        "parsed {} rules ({} skipped, {} declarations skipped)",
        sheet.rules.len(),
        sheet.skipped_rules(),
        sheet.skipped_declarations()
    );
    Ok(sheet)
}

// ── Rule Splitter ──────────────────────────────────────────

/// Cut the comment-free buffer at each `}` and parse every span as a rule
///
/// A span that fails to parse is dropped and scanning resumes after its `}`.
/// Text after the last `}` is ignored.
pub fn split_rules(buffer: &str, options: &Options) -> Stylesheet {
    let mut sheet = Stylesheet::default();
    let mut cursor = 0;

    while let Some(found) = buffer[cursor..].find('}') {
        let end = cursor + found + 1;
        match parse_rule(&buffer[cursor..end], options, &mut sheet.diagnostics) {
            Ok(rule) => sheet.rules.push(rule),
            Err(err) => {
                tracing::warn!("{}; skipping rule", err);
                sheet.diagnostics.push(err);
            }
        }
        cursor = end;
    }

    let rest = trim(&buffer[cursor..]);
    if !rest.is_empty() {
        tracing::debug!("ignoring {} trailing bytes without '}}'", rest.len());
    }

    sheet
}

// ── Rule Parser ────────────────────────────────────────────

/// Parse one rule span (`selector { name: value; ... }`)
///
/// The span is split on every `{` and only the first two pieces are used,
/// so a nested block such as `@media x { a { ... }` fails as unterminated.
/// Dropped declarations are appended to `diagnostics`.
///
/// # Errors
/// - [`Error::IncompleteSelector`] if there is no `{`
/// - [`Error::EmptySelectorBody`] if nothing follows the `{`
/// - [`Error::UnterminatedSelector`] if the block does not end in `}`
pub fn parse_rule(text: &str, options: &Options, diagnostics: &mut Vec<Error>) -> Result<Rule> {
    let parts = split_keep_leading(text, '{');
    if parts.len() < 2 {
        return Err(Error::IncompleteSelector(text.to_string()));
    }

    let selector = trim(parts[0]);
    let body = trim(parts[1]);
    if body.is_empty() {
        return Err(Error::EmptySelectorBody(text.to_string()));
    }
    let Some(block) = body.strip_suffix('}') else {
        return Err(Error::UnterminatedSelector(text.to_string()));
    };

    let block = if options.legacy_truncation {
        // Drops one character in front of the brace as well.
        let mut chars = block.chars();
        if chars.next_back().is_none() {
            return Err(Error::UnterminatedSelector(text.to_string()));
        }
        chars.as_str()
    } else {
        trim(block)
    };

    let mut declarations = parse_declarations(block, diagnostics);
    sort_declarations(&mut declarations);

    Ok(Rule {
        selector: selector.to_string(),
        declarations,
    })
}

// ── Declaration Parser ─────────────────────────────────────

/// Parse a declaration block (`color: red; margin: 0`) in source order
///
/// Chunks without a `:` are logged, pushed onto `diagnostics` and skipped.
/// An empty block yields no declarations.
pub fn parse_declarations(block: &str, diagnostics: &mut Vec<Error>) -> Vec<Declaration> {
    if trim(block).is_empty() {
        return Vec::new();
    }

    let mut declarations = Vec::new();
    for chunk in split_keep_leading(block, ';') {
        match parse_declaration(chunk) {
            Ok(decl) => declarations.push(decl),
            Err(err) => {
                tracing::warn!("{}; skipping declaration", err);
                diagnostics.push(err);
            }
        }
    }
    declarations
}

/// Parse a single `name: value` chunk
///
/// Only the text between the first and second `:` becomes the value, so
/// `background: url(http://x)` keeps just `url(http`.
///
/// # Errors
/// Returns [`Error::IncompleteProperty`] if the chunk has no `name:value` shape.
pub fn parse_declaration(text: &str) -> Result<Declaration> {
    let parts = split_keep_leading(text, ':');
    if parts.len() < 2 {
        return Err(Error::IncompleteProperty(text.to_string()));
    }

    let name = trim(parts[0]).to_lowercase();
    let value = trim(parts[1]).replace(", ", ",");

    Ok(Declaration {
        name,
        values: normalize_value(&value),
    })
}

/// Split on `sep`, dropping empty pieces at the end
///
/// Text without `sep` comes back whole, even when empty, while text made
/// only of separators yields no pieces at all.
pub(crate) fn split_keep_leading(text: &str, sep: char) -> Vec<&str> {
    if !text.contains(sep) {
        return vec![text];
    }
    let mut parts: Vec<&str> = text.split(sep).collect();
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
}
