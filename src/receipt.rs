//! # Receipt Rendering
//!
//! Text-based receipts: caller-supplied text, the self-test receipt, and
//! receipts composed from lines extracted out of HTML markup.
//!
//! All functions are pure; the same input always yields the same bytes.

use tracing::debug;

use crate::markup;
use crate::protocol::commands;
use crate::stream::{CommandStream, Feed, ReceiptLine, StreamBuilder};

/// Line feeds before the cut on text receipts
pub const TEXT_FEED_LINES: usize = 4;

/// Bare line feeds, then `ESC d n` with the same count, before the cut on the
/// self-test receipt
pub const SELF_TEST_FEED_LINES: u8 = 5;

// ============================================================================
// PLAIN TEXT
// ============================================================================

/// Render caller-composed text: `ESC @`, the text as UTF-8, 4 line feeds, cut.
///
/// `None` or empty content prints the [`self_test_receipt`].
///
/// ```
/// let stream = kiosk_receipt::receipt::render_text(Some("Hello\n"));
/// assert_eq!(stream.as_bytes(), b"\x1B@Hello\n\n\n\n\n\x1Bi");
/// ```
pub fn render_text(content: Option<&str>) -> CommandStream {
    match content.filter(|c| !c.is_empty()) {
        Some(text) => {
            let mut builder = StreamBuilder::new();
            builder.text(text);
            builder.finish_receipt(Feed::LineFeeds(TEXT_FEED_LINES))
        }
        None => self_test_receipt(),
    }
}

/// Fixed test receipt for checking a freshly installed printer.
///
/// Ends with 5 bare line feeds, `ESC d 5` and the cut.
pub fn self_test_receipt() -> CommandStream {
    let mut b = StreamBuilder::new();

    b.line(&ReceiptLine::new("TEST RECEIPT").center().bold())
        .line(&ReceiptLine::new("80mm Thermal Print Test").center())
        .line(&ReceiptLine::new("Kiosk Application").center())
        .rule('=')
        .rule('-')
        .line(&ReceiptLine::new(format!("Test Item 1{}$10.00", " ".repeat(20))))
        .line(&ReceiptLine::new(format!("Test Item 2{}$25.00", " ".repeat(20))))
        .rule('=')
        .line(&ReceiptLine::new("TOTAL: $35.00").bold())
        .rule('=')
        .line(&ReceiptLine::new("THANK YOU!").center())
        .blank_line()
        .blank_line()
        .raw(&commands::line_feeds(SELF_TEST_FEED_LINES as usize));

    b.finish_receipt(Feed::Lines(SELF_TEST_FEED_LINES))
}

// ============================================================================
// MARKUP RECEIPTS
// ============================================================================

/// Header and footer wrapped around markup-derived lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupLayout {
    /// Bold, centered first line
    pub title: String,
    /// Centered line under the title
    pub subtitle: String,
    /// Bold, centered closing line
    pub footer: String,
}

impl Default for MarkupLayout {
    fn default() -> Self {
        Self {
            title: "TIMEZONE".to_string(),
            subtitle: "www.timezonegames.com".to_string(),
            footer: "TERIMA KASIH!".to_string(),
        }
    }
}

/// Compose extracted display lines into a receipt.
///
/// Layout: centered bold title, subtitle, blank line, `=` rule, the lines
/// (left-aligned, whitespace collapsed, artifacts dropped), `=` rule,
/// centered bold footer, 4 line feeds, cut.
pub fn compose_markup<S: AsRef<str>>(lines: &[S], layout: &MarkupLayout) -> CommandStream {
    let mut b = StreamBuilder::new();

    b.line(&ReceiptLine::new(layout.title.as_str()).center().bold())
        .line(&ReceiptLine::new(layout.subtitle.as_str()).center())
        .blank_line()
        .rule('=');

    for line in lines {
        let clean = markup::collapse_whitespace(line.as_ref());
        if markup::is_artifact(&clean) {
            continue;
        }
        b.line(&ReceiptLine::new(clean));
    }

    b.rule('=')
        .line(&ReceiptLine::new(layout.footer.as_str()).center().bold());

    b.finish_receipt(Feed::LineFeeds(TEXT_FEED_LINES))
}

/// Extract display lines from an HTML fragment and compose them with the
/// default kiosk layout.
pub fn render_html(fragment: &str) -> CommandStream {
    render_html_with(fragment, &MarkupLayout::default())
}

/// [`render_html`] with a custom header/footer.
pub fn render_html_with(fragment: &str, layout: &MarkupLayout) -> CommandStream {
    let lines = markup::extract_lines(fragment);
    debug!(
        html_len = fragment.len(),
        lines = lines.len(),
        "extracted lines from markup"
    );
    compose_markup(&lines, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_render_text_frame() {
        let stream = render_text(Some("abc"));
        let expected: Vec<u8> = [&[0x1B, 0x40][..], b"abc", b"\n\n\n\n", &[0x1B, 0x69]].concat();
        assert_eq!(stream.into_bytes(), expected);
    }

    #[test]
    fn test_render_text_empty_falls_back_to_self_test() {
        assert_eq!(render_text(Some("")), self_test_receipt());
        assert_eq!(render_text(None), self_test_receipt());
    }

    #[test]
    fn test_self_test_receipt_layout() {
        let bytes = self_test_receipt().into_bytes();

        assert_eq!(&bytes[..2], &[0x1B, 0x40]);
        // Centered bold header right after init
        assert_eq!(
            &bytes[2..8],
            &[0x1B, 0x61, 0x01, 0x1B, 0x45, 0x01]
        );
        assert!(contains(&bytes, b"TEST RECEIPT"));
        assert!(contains(&bytes, "=".repeat(42).as_bytes()));
        assert!(!contains(&bytes, "=".repeat(43).as_bytes()));
        assert!(contains(&bytes, b"Test Item 1"));
        assert!(contains(&bytes, b"Test Item 2"));
        assert!(contains(&bytes, b"\x1BE\x01TOTAL: $35.00\x1BE\x00"));
        assert!(contains(&bytes, b"THANK YOU!"));
        assert!(bytes.ends_with(b"THANK YOU!\n\n\n\n\n\n\n\n\x1Bd\x05\x1Bi"));
    }

    #[test]
    fn test_compose_markup_layout() {
        let stream = compose_markup(&["Item  A   1", "none", "display: none", ""], &MarkupLayout::default());
        let rule = "=".repeat(42);

        let expected: Vec<u8> = [
            &[0x1B, 0x40][..],
            &[0x1B, 0x61, 0x01],
            b"\x1BE\x01TIMEZONE\x1BE\x00\n",
            b"www.timezonegames.com\n",
            b"\n",
            &[0x1B, 0x61, 0x00],
            rule.as_bytes(),
            b"\n",
            b"Item A 1\n",
            rule.as_bytes(),
            b"\n",
            &[0x1B, 0x61, 0x01],
            b"\x1BE\x01TERIMA KASIH!\x1BE\x00\n",
            b"\n\n\n\n",
            &[0x1B, 0x69],
        ]
        .concat();
        assert_eq!(stream.into_bytes(), expected);
    }

    #[test]
    fn test_render_html_with_custom_layout() {
        let layout = MarkupLayout {
            title: "ARCADE".into(),
            subtitle: "example.test".into(),
            footer: "BYE".into(),
        };
        let bytes = render_html_with("<p>Token x5</p>", &layout).into_bytes();
        assert!(contains(&bytes, b"ARCADE"));
        assert!(contains(&bytes, b"example.test\n"));
        assert!(contains(&bytes, b"Token x5\n"));
        assert!(contains(&bytes, b"BYE"));
        assert!(!contains(&bytes, b"TIMEZONE"));
    }

    #[test]
    fn test_renderers_are_idempotent() {
        let html = "<div><b>Card</b> 1234</div><hr><p>Total 10</p>";
        assert_eq!(render_html(html), render_html(html));
        assert_eq!(render_text(Some("x")), render_text(Some("x")));
        assert_eq!(self_test_receipt(), self_test_receipt());
    }
}
