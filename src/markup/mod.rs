//! # Markup Extraction
//!
//! Turns the HTML fragment of a kiosk receipt page into display lines. This
//! is not an HTML renderer: only block boundaries, line breaks, rules,
//! emphasis and `<script>`/`<style>` suppression are understood.
//!
//! | Tag | Effect |
//! |-----|--------|
//! | `script`, `style` | text suppressed until the matching close (depth counted) |
//! | `br` | line break |
//! | `hr` | line break, then a line of 42 `-` |
//! | `div`, `p` (open or close) | line break |
//! | `h1`–`h4` (close) | line break |
//! | `b`, `strong` | emphasis |
//! | anything else | ignored; its text still flows |
//!
//! ```
//! use kiosk_receipt::markup::extract_lines;
//!
//! let lines = extract_lines("<div>Hello</div><br><hr><p>World</p>");
//! assert_eq!(lines, vec!["Hello".to_string(), "-".repeat(42), "World".to_string()]);
//! ```

pub mod extract;
pub mod token;

pub use extract::{ExtractState, MarkupLine, SEPARATOR_WIDTH, fold_tokens};
pub use token::{Token, Tokenizer, tokenize};

/// Extract display lines with their emphasis, artifact lines removed.
pub fn extract(html: &str) -> Vec<MarkupLine> {
    fold_tokens(tokenize(html))
        .into_iter()
        .filter(|line| !is_artifact(&line.text))
        .collect()
}

/// Extract display lines as plain strings, artifact lines removed.
pub fn extract_lines(html: &str) -> Vec<String> {
    extract(html).into_iter().map(|line| line.text).collect()
}

/// Lines dropped from every markup receipt.
///
/// This is a heuristic for inline style text that leaks out of kiosk pages
/// (`display: none` fragments and bare `none` values), not an HTML rule.
/// Other page sources may need further patterns here.
pub fn is_artifact(line: &str) -> bool {
    line.is_empty() || line == "none" || line.starts_with("display")
}

/// Trim and collapse every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
