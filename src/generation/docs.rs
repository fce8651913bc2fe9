//! Description sanitation for generated doc comments
//!
//! Schema descriptions are free-form Markdown. Backslashes would escape the
//! generated string context and literal "TODO" markers would trip Dart
//! lints in consumer projects, so both are neutralized.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Sanitize one description line for a `///` doc comment.
pub fn sanitize_line(line: &str) -> String {
    let cleaned = line.replace('\\', " ").replace("TODO", "todo");
    WHITESPACE.replace_all(cleaned.trim_end(), " ").into_owned()
}

/// Split a multi-line description into sanitized doc-comment lines.
pub fn doc_lines(description: &str) -> Vec<String> {
    description.split('\n').map(sanitize_line).collect()
}

/// Sanitize a description for a single-line context (field docs), folding
/// newlines into spaces.
pub fn sanitize_inline(description: &str) -> String {
    sanitize_line(&description.replace('\n', " "))
}
