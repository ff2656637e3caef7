//! # Markup Tokenizer
//!
//! A forgiving, single-pass scanner for the small HTML subset kiosk pages
//! send. It never fails: anything it cannot read as a tag is either text or
//! skipped.
//!
//! | Input | Token |
//! |-------|-------|
//! | `<div class="x">` | `Start { name: "div", self_closing: false }` |
//! | `<br/>` | `Start { name: "br", self_closing: true }` |
//! | `</P>` | `End { name: "p" }` |
//! | `a &amp; b` | `Text("a & b")` |
//! | `<!-- c -->`, `<!DOCTYPE html>`, `<?xml ?>` | skipped |
//!
//! A `<` that is not followed by a letter, `/`, `!` or `?` is literal text.
//! A tag left unterminated at the end of input is discarded.
//!
//! ## Raw Text
//!
//! The body of `<script>` and `<style>` is raw text: inside it only
//! `<script`/`</script` (or `<style`/`</style`) are read as tags, matched
//! case-insensitively, so `if (i<n)` or `"a<b"` cannot swallow the closing
//! tag. Nested opens of the same element are counted, and the body ends when
//! the count returns to zero. Raw text is not entity-decoded.

/// One lexical unit of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Opening tag; the name is ASCII-lowercased
    Start { name: String, self_closing: bool },
    /// Closing tag; the name is ASCII-lowercased
    End { name: String },
    /// Character data with references decoded
    Text(String),
}

impl Token {
    pub fn start(name: &str) -> Self {
        Token::Start {
            name: name.to_ascii_lowercase(),
            self_closing: false,
        }
    }

    pub fn end(name: &str) -> Self {
        Token::End {
            name: name.to_ascii_lowercase(),
        }
    }

    pub fn text(text: &str) -> Self {
        Token::Text(text.to_string())
    }
}

/// Tokenize `input` lazily.
pub fn tokenize(input: &str) -> Tokenizer<'_> {
    Tokenizer {
        input,
        pos: 0,
        raw: None,
    }
}

/// Iterator over the [`Token`]s of a markup string.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    raw: Option<RawText>,
}

/// Open raw-text element and how many opens of it are unclosed.
#[derive(Debug, Clone, Copy)]
struct RawText {
    tag: &'static str,
    depth: usize,
}

/// What a `<` at the current position turned out to be.
enum Markup {
    Token(Token, usize),
    Skip(usize),
    Unterminated,
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let rest = &self.input[self.pos..];
            if rest.is_empty() {
                return None;
            }

            if let Some(raw) = self.raw {
                let end = raw_text_end(rest, raw.tag);
                if end > 0 {
                    self.pos += end;
                    return Some(Token::Text(rest[..end].to_string()));
                }
            }

            let bytes = rest.as_bytes();
            if bytes[0] == b'<' && starts_markup(bytes.get(1)) {
                match scan_markup(rest) {
                    Markup::Token(token, consumed) => {
                        self.pos += consumed;
                        self.track_raw_text(&token);
                        return Some(token);
                    }
                    Markup::Skip(consumed) => {
                        self.pos += consumed;
                        continue;
                    }
                    Markup::Unterminated => {
                        self.pos = self.input.len();
                        return None;
                    }
                }
            }

            let end = text_end(rest);
            self.pos += end;
            return Some(Token::Text(decode_entities(&rest[..end])));
        }
    }
}

impl Tokenizer<'_> {
    /// Enter or leave raw-text mode after emitting `token`.
    fn track_raw_text(&mut self, token: &Token) {
        match token {
            Token::Start {
                name,
                self_closing: false,
            } => {
                let Some(tag) = raw_text_tag(name) else {
                    return;
                };
                match self.raw.as_mut() {
                    Some(raw) if raw.tag == tag => raw.depth += 1,
                    Some(_) => {}
                    None => self.raw = Some(RawText { tag, depth: 1 }),
                }
            }
            Token::End { name } => {
                let closed = match self.raw.as_mut() {
                    Some(raw) if raw.tag == name.as_str() => {
                        raw.depth -= 1;
                        raw.depth == 0
                    }
                    _ => false,
                };
                if closed {
                    self.raw = None;
                }
            }
            _ => {}
        }
    }
}

fn raw_text_tag(name: &str) -> Option<&'static str> {
    match name {
        "script" => Some("script"),
        "style" => Some("style"),
        _ => None,
    }
}

/// Byte offset of the next `<tag` or `</tag` in raw text, or the end of
/// `rest`.
fn raw_text_end(rest: &str, tag: &str) -> usize {
    let bytes = rest.as_bytes();
    (0..bytes.len())
        .find(|&i| bytes[i] == b'<' && opens_raw_tag(&bytes[i + 1..], tag))
        .unwrap_or(bytes.len())
}

/// `after` (the bytes following a `<`) starts with `tag` or `/tag`, followed
/// by whitespace, `/`, `>` or the end of input.
fn opens_raw_tag(after: &[u8], tag: &str) -> bool {
    let after = after.strip_prefix(b"/").unwrap_or(after);
    let Some(name) = after.get(..tag.len()) else {
        return false;
    };
    name.eq_ignore_ascii_case(tag.as_bytes())
        && after
            .get(tag.len())
            .is_none_or(|b| b.is_ascii_whitespace() || matches!(b, b'/' | b'>'))
}

fn starts_markup(next: Option<&u8>) -> bool {
    matches!(next, Some(b) if b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'))
}

/// Byte offset of the next `<` that opens markup, or the end of `rest`.
fn text_end(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    (0..bytes.len())
        .find(|&i| bytes[i] == b'<' && starts_markup(bytes.get(i + 1)))
        .unwrap_or(bytes.len())
}

/// Scan markup starting at a `<` (`rest[0] == '<'`).
fn scan_markup(rest: &str) -> Markup {
    let body = &rest[1..];

    if let Some(comment) = body.strip_prefix("!--") {
        return match comment.find("-->") {
            Some(end) => Markup::Skip(1 + 3 + end + 3),
            None => Markup::Unterminated,
        };
    }

    if body.starts_with('!') || body.starts_with('?') {
        return match body.find('>') {
            Some(end) => Markup::Skip(1 + end + 1),
            None => Markup::Unterminated,
        };
    }

    let Some(end) = find_tag_end(body) else {
        return Markup::Unterminated;
    };
    let consumed = 1 + end + 1;
    let inner = &body[..end];

    if let Some(closing) = inner.strip_prefix('/') {
        let name = tag_name(closing);
        if name.is_empty() {
            return Markup::Skip(consumed);
        }
        return Markup::Token(Token::end(name), consumed);
    }

    let name = tag_name(inner);
    let self_closing = inner.trim_end().ends_with('/');
    Markup::Token(
        Token::Start {
            name: name.to_ascii_lowercase(),
            self_closing,
        },
        consumed,
    )
}

/// Leading tag name characters of a tag body.
fn tag_name(inner: &str) -> &str {
    let end = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
        .unwrap_or(inner.len());
    &inner[..end]
}

/// Offset of the `>` closing a tag, skipping quoted attribute values.
fn find_tag_end(body: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in body.as_bytes().iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

// ============================================================================
// CHARACTER REFERENCES
// ============================================================================

/// Decode the character references kiosk pages actually use.
///
/// Unknown or malformed references are left as written.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_reference(tail) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode one reference at the start of `s` (which begins with `&`).
/// Returns the character and the number of bytes consumed.
fn decode_reference(s: &str) -> Option<(char, usize)> {
    let (semi, _) = s.char_indices().take(12).find(|&(_, c)| c == ';')?;
    let body = &s[1..semi];

    let ch = if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        char::from_u32(code)?
    } else {
        match body {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            "nbsp" => '\u{a0}',
            _ => return None,
        }
    };

    Some((ch, semi + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).collect()
    }

    #[test]
    fn test_tags_and_text() {
        assert_eq!(
            tokens("<div class=\"a\">Hi</DIV>"),
            vec![Token::start("div"), Token::text("Hi"), Token::end("div")]
        );
    }

    #[test]
    fn test_self_closing() {
        assert_eq!(
            tokens("<br/><hr />"),
            vec![
                Token::Start {
                    name: "br".into(),
                    self_closing: true
                },
                Token::Start {
                    name: "hr".into(),
                    self_closing: true
                },
            ]
        );
    }

    #[test]
    fn test_quoted_gt_in_attribute() {
        assert_eq!(
            tokens("<p title=\"a>b\">x</p>"),
            vec![Token::start("p"), Token::text("x"), Token::end("p")]
        );
    }

    #[test]
    fn test_comments_and_doctype_skipped() {
        assert_eq!(
            tokens("<!DOCTYPE html><!-- <p>hidden</p> -->a<?pi?>b"),
            vec![Token::text("a"), Token::text("b")]
        );
    }

    #[test]
    fn test_literal_less_than() {
        assert_eq!(tokens("1 < 2 <3"), vec![Token::text("1 < 2 <3")]);
    }

    #[test]
    fn test_unterminated_tag_discarded() {
        assert_eq!(tokens("ok<div class="), vec![Token::text("ok")]);
        assert_eq!(tokens("ok<!-- open"), vec![Token::text("ok")]);
    }

    #[test]
    fn test_script_body_is_raw_text() {
        assert_eq!(
            tokens("<script>for (i=0;i<n;i++) {}</script>x"),
            vec![
                Token::start("script"),
                Token::text("for (i=0;i<n;i++) {}"),
                Token::end("script"),
                Token::text("x"),
            ]
        );
        assert_eq!(
            tokens("<script>var s = \"<p>a<b</p>\";</SCRIPT >y"),
            vec![
                Token::start("script"),
                Token::text("var s = \"<p>a<b</p>\";"),
                Token::end("script"),
                Token::text("y"),
            ]
        );
    }

    #[test]
    fn test_raw_text_counts_nested_opens() {
        assert_eq!(
            tokens("<script><SCRIPT>a</script>b</script>c"),
            vec![
                Token::start("script"),
                Token::start("script"),
                Token::text("a"),
                Token::end("script"),
                Token::text("b"),
                Token::end("script"),
                Token::text("c"),
            ]
        );
    }

    #[test]
    fn test_style_body_only_matches_style() {
        assert_eq!(
            tokens("<style><script>a &amp; b</scripts></style><p>"),
            vec![
                Token::start("style"),
                Token::text("<script>a &amp; b</scripts>"),
                Token::end("style"),
                Token::start("p"),
            ]
        );
    }

    #[test]
    fn test_unclosed_raw_text_runs_to_end() {
        assert_eq!(
            tokens("<style>a<b"),
            vec![Token::start("style"), Token::text("a<b")]
        );
    }

    #[test]
    fn test_empty_end_tag_skipped() {
        assert_eq!(tokens("a</>b"), vec![Token::text("a"), Token::text("b")]);
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;x&gt; &quot;&apos;"), "<x> \"'");
        assert_eq!(decode_entities("Rp&nbsp;5"), "Rp\u{a0}5");
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
    }

    #[test]
    fn test_unknown_entities_pass_through() {
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
        assert_eq!(decode_entities("tail &"), "tail &");
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            tokens("<p>Café – ½</p>"),
            vec![Token::start("p"), Token::text("Café – ½"), Token::end("p")]
        );
    }
}
