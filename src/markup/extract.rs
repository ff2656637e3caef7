//! Fold of [`Token`]s into display lines.
//!
//! All mutable extraction state lives in [`ExtractState`]; [`fold_tokens`]
//! threads it through the token stream, so a test can feed hand-built token
//! sequences without going through the tokenizer.

use crate::protocol::text::Emphasis;

use super::token::Token;

/// Width of the separator line emitted for `<hr>`.
pub const SEPARATOR_WIDTH: usize = 42;

/// One extracted block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupLine {
    pub text: String,
    /// Bold when any part of the line came from inside `<b>`/`<strong>`
    pub emphasis: Emphasis,
}

impl MarkupLine {
    fn plain(text: String) -> Self {
        Self {
            text,
            emphasis: Emphasis::Normal,
        }
    }
}

/// Extraction state threaded through the fold.
#[derive(Debug, Default)]
pub struct ExtractState {
    current: String,
    current_bold: bool,
    lines: Vec<MarkupLine>,
    script_depth: usize,
    style_depth: usize,
    bold_depth: usize,
}

impl ExtractState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold step: consume one token.
    pub fn step(mut self, token: Token) -> Self {
        self.apply(&token);
        self
    }

    /// Text is suppressed inside any open `<script>` or `<style>`.
    pub fn is_suppressed(&self) -> bool {
        self.script_depth > 0 || self.style_depth > 0
    }

    pub fn apply(&mut self, token: &Token) {
        match token {
            Token::Start { name, self_closing } => self.open(name, *self_closing),
            Token::End { name } => self.close(name),
            Token::Text(text) => {
                if !self.is_suppressed() {
                    self.push_text(text);
                }
            }
        }
    }

    /// Flush what is buffered and return the lines. Tags still open at this
    /// point are treated as closed.
    pub fn finish(mut self) -> Vec<MarkupLine> {
        self.flush();
        self.lines
    }

    fn open(&mut self, name: &str, self_closing: bool) {
        match name {
            "script" if !self_closing => self.script_depth += 1,
            "style" if !self_closing => self.style_depth += 1,
            _ if self.is_suppressed() => {}
            "br" | "div" | "p" => self.flush(),
            "hr" => {
                self.flush();
                self.lines
                    .push(MarkupLine::plain("-".repeat(SEPARATOR_WIDTH)));
            }
            "b" | "strong" if !self_closing => self.bold_depth += 1,
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        match name {
            "script" => self.script_depth = self.script_depth.saturating_sub(1),
            "style" => self.style_depth = self.style_depth.saturating_sub(1),
            _ if self.is_suppressed() => {}
            "div" | "p" | "h1" | "h2" | "h3" | "h4" => self.flush(),
            "b" | "strong" => self.bold_depth = self.bold_depth.saturating_sub(1),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        let text = super::collapse_whitespace(text);
        if text.is_empty() {
            return;
        }
        if !self.current.is_empty() {
            self.current.push(' ');
        }
        self.current.push_str(&text);
        if self.bold_depth > 0 {
            self.current_bold = true;
        }
    }

    fn flush(&mut self) {
        let bold = std::mem::take(&mut self.current_bold);
        let text = std::mem::take(&mut self.current);
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.lines.push(MarkupLine {
            text: text.to_string(),
            emphasis: if bold { Emphasis::Bold } else { Emphasis::Normal },
        });
    }
}

/// Run the extraction fold over a token stream.
pub fn fold_tokens<I>(tokens: I) -> Vec<MarkupLine>
where
    I: IntoIterator<Item = Token>,
{
    tokens
        .into_iter()
        .fold(ExtractState::new(), ExtractState::step)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(lines: Vec<MarkupLine>) -> Vec<String> {
        lines.into_iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_text_joined_with_single_space() {
        let lines = fold_tokens([
            Token::start("div"),
            Token::text("  Total "),
            Token::start("span"),
            Token::text(" Rp 50.000 "),
            Token::end("span"),
            Token::end("div"),
        ]);
        assert_eq!(texts(lines), vec!["Total Rp 50.000"]);
    }

    #[test]
    fn test_nested_script_uses_depth() {
        let lines = fold_tokens([
            Token::start("script"),
            Token::start("script"),
            Token::text("a"),
            Token::end("script"),
            Token::text("b"),
            Token::end("script"),
            Token::text("c"),
        ]);
        assert_eq!(texts(lines), vec!["c"]);
    }

    #[test]
    fn test_stray_close_does_not_underflow() {
        let lines = fold_tokens([
            Token::end("script"),
            Token::start("style"),
            Token::text("x"),
            Token::end("style"),
            Token::text("y"),
        ]);
        assert_eq!(texts(lines), vec!["y"]);
    }

    #[test]
    fn test_tags_ignored_while_suppressed() {
        let lines = fold_tokens([
            Token::text("a"),
            Token::start("style"),
            Token::start("hr"),
            Token::end("div"),
            Token::end("style"),
            Token::text("b"),
        ]);
        assert_eq!(texts(lines), vec!["a b"]);
    }

    #[test]
    fn test_heading_close_flushes_but_open_does_not() {
        let lines = fold_tokens([
            Token::text("x"),
            Token::start("h2"),
            Token::text("Title"),
            Token::end("h2"),
            Token::text("body"),
        ]);
        assert_eq!(texts(lines), vec!["x Title", "body"]);
    }

    #[test]
    fn test_emphasis_is_carried() {
        let lines = fold_tokens([
            Token::start("p"),
            Token::start("b"),
            Token::text("TOTAL"),
            Token::end("b"),
            Token::end("p"),
            Token::text("plain"),
        ]);
        assert_eq!(
            lines,
            vec![
                MarkupLine {
                    text: "TOTAL".into(),
                    emphasis: Emphasis::Bold
                },
                MarkupLine {
                    text: "plain".into(),
                    emphasis: Emphasis::Normal
                },
            ]
        );
    }

    #[test]
    fn test_unclosed_tags_flush_at_end() {
        let lines = fold_tokens([Token::start("div"), Token::start("b"), Token::text("open")]);
        assert_eq!(texts(lines), vec!["open"]);
    }

    #[test]
    fn test_self_closing_script_does_not_suppress() {
        let lines = fold_tokens([
            Token::Start {
                name: "script".into(),
                self_closing: true,
            },
            Token::text("visible"),
        ]);
        assert_eq!(texts(lines), vec!["visible"]);
    }
}
