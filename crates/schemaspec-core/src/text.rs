// crates/schemaspec-core/src/text.rs
// ============================================================================
// Module: Text Rendering Helpers
// Description: TOML literal rendering, word wrapping, and comment blocks.
// Purpose: Keep exported text byte-for-byte reproducible.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Low-level rendering shared by adapters, items and the export engine. All
//! output here is valid TOML surface syntax so exported documents reload.

use std::fmt::Write;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Column limit for wrapped description text (excluding indentation).
pub(crate) const WRAP_WIDTH: usize = 76;

/// Indentation used beneath an item's usage line.
pub(crate) const HELP_INDENT: &str = "  ";

// ============================================================================
// SECTION: Literals
// ============================================================================

/// Renders `value` as a TOML basic string, quotes included.
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            ch if ch.is_control() => {
                let _ = write!(out, "\\u{:04X}", u32::from(ch));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Renders a float so it always reads back as a TOML float.
pub(crate) fn float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf".to_string() } else { "-inf".to_string() };
    }
    let text = value.to_string();
    if text.contains(['.', 'e', 'E']) { text } else { format!("{text}.0") }
}

/// Renders a key, quoting it when it is not a TOML bare key.
pub(crate) fn key(name: &str) -> String {
    let bare = !name.is_empty()
        && name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if bare { name.to_string() } else { quote(name) }
}

/// Renders a dotted path of keys.
pub(crate) fn dotted(path: &str) -> String {
    path.split('.').map(key).collect::<Vec<_>>().join(".")
}

// ============================================================================
// SECTION: Wrapping
// ============================================================================

/// Splits `text` into paragraphs on blank lines and greedily wraps each one.
///
/// Paragraphs are separated by an empty line in the output.
pub(crate) fn wrap_paragraphs(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in paragraphs(text) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(wrap(&paragraph, width));
    }
    lines
}

/// Collects blank-line separated paragraphs, dropping empty ones.
fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join(" "));
    }
    out
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in paragraph.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

// ============================================================================
// SECTION: Comment Blocks
// ============================================================================

/// Prefixes each line of `text` with `# ` (bare `#` for empty lines).
pub(crate) fn comment(text: &str) -> String {
    text.lines()
        .map(|line| if line.trim().is_empty() { "#".to_string() } else { format!("# {line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
