//! # Command Streams
//!
//! [`CommandStream`] is the finished byte sequence for one print job. The only
//! way to obtain one is through [`StreamBuilder`], which writes `ESC @` before
//! anything else, so every stream handed to the transport starts from a
//! freshly initialized printer.
//!
//! ```
//! use kiosk_receipt::stream::{Feed, ReceiptLine, StreamBuilder};
//!
//! let mut builder = StreamBuilder::new();
//! builder.line(&ReceiptLine::new("HELLO").center().bold());
//! builder.rule('=');
//! let stream = builder.finish_receipt(Feed::LineFeeds(4));
//!
//! assert_eq!(&stream[..2], &[0x1B, 0x40]);
//! assert!(stream.ends_with(&[b'\n', b'\n', b'\n', b'\n', 0x1B, 0x69]));
//! ```

use std::ops::Deref;

use crate::printer::PrinterConfig;
use crate::protocol::commands::{self, LF};
use crate::protocol::text::{self, Alignment, Emphasis};

// ============================================================================
// RECEIPT LINE
// ============================================================================

/// One line of receipt text with its alignment and emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    text: String,
    alignment: Alignment,
    emphasis: Emphasis,
}

impl ReceiptLine {
    /// Left-aligned, normal weight line.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: Alignment::Left,
            emphasis: Emphasis::Normal,
        }
    }

    pub fn center(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    pub fn bold(mut self) -> Self {
        self.emphasis = Emphasis::Bold;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    /// Text bytes (bold-wrapped when emphasized) followed by `LF`.
    /// Alignment is left to the builder, which only emits it on change.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = text::emphasized(&self.text, self.emphasis);
        out.push(LF);
        out
    }
}

// ============================================================================
// COMMAND STREAM
// ============================================================================

/// A complete, immutable print job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStream(Vec<u8>);

impl CommandStream {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for CommandStream {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for CommandStream {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<CommandStream> for Vec<u8> {
    fn from(stream: CommandStream) -> Self {
        stream.0
    }
}

// ============================================================================
// STREAM BUILDER
// ============================================================================

/// How to advance the paper before the final cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// N bare `LF` bytes
    LineFeeds(usize),
    /// `ESC d n`
    Lines(u8),
}

/// Incremental builder for a [`CommandStream`].
///
/// Tracks the current alignment so consecutive lines with the same
/// alignment share one `ESC a n`.
#[derive(Debug)]
pub struct StreamBuilder {
    buf: Vec<u8>,
    alignment: Alignment,
    config: PrinterConfig,
}

impl StreamBuilder {
    /// Start a stream for the default 80mm printer.
    pub fn new() -> Self {
        Self::with_config(PrinterConfig::default())
    }

    pub fn with_config(config: PrinterConfig) -> Self {
        let mut buf = Vec::with_capacity(1024);
        buf.extend(commands::init());
        Self {
            buf,
            alignment: Alignment::Left,
            config,
        }
    }

    /// Switch alignment, emitting `ESC a n` only when it changes.
    pub fn align(&mut self, alignment: Alignment) -> &mut Self {
        if alignment != self.alignment {
            self.buf.extend(text::align(alignment));
            self.alignment = alignment;
        }
        self
    }

    /// Append caller text verbatim (UTF-8).
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Append pre-encoded bytes verbatim.
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn line(&mut self, line: &ReceiptLine) -> &mut Self {
        self.align(line.alignment());
        self.buf.extend(line.encode());
        self
    }

    /// Empty line in the current alignment.
    pub fn blank_line(&mut self) -> &mut Self {
        self.buf.push(LF);
        self
    }

    /// Left-aligned divider rule, `rule_width` characters wide.
    pub fn rule(&mut self, ch: char) -> &mut Self {
        let rule = ReceiptLine::new(self.config.rule(ch));
        self.line(&rule)
    }

    /// Finish without feed or cut (for streams that are not a physical receipt).
    pub fn finish(self) -> CommandStream {
        CommandStream(self.buf)
    }

    /// Append the feed, then `ESC i`, and finish.
    pub fn finish_receipt(mut self, feed: Feed) -> CommandStream {
        match feed {
            Feed::LineFeeds(n) => self.buf.extend(commands::line_feeds(n)),
            Feed::Lines(n) => self.buf.extend(commands::feed_lines(n)),
        }
        self.buf.extend(commands::cut());
        CommandStream(self.buf)
    }
}

impl Default for StreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_starts_with_init() {
        let stream = StreamBuilder::new().finish();
        assert_eq!(stream.as_bytes(), &[0x1B, 0x40]);
    }

    #[test]
    fn test_line_encoding() {
        assert_eq!(ReceiptLine::new("ab").encode(), b"ab\n".to_vec());
        assert_eq!(
            ReceiptLine::new("ab").bold().encode(),
            vec![0x1B, 0x45, 0x01, b'a', b'b', 0x1B, 0x45, 0x00, b'\n']
        );
    }

    #[test]
    fn test_alignment_emitted_only_on_change() {
        let mut b = StreamBuilder::new();
        b.line(&ReceiptLine::new("a"))
            .line(&ReceiptLine::new("b").center())
            .line(&ReceiptLine::new("c").center())
            .line(&ReceiptLine::new("d"));

        let expected: Vec<u8> = [
            &[0x1B, 0x40][..],
            b"a\n",
            &[0x1B, 0x61, 0x01],
            b"b\n",
            b"c\n",
            &[0x1B, 0x61, 0x00],
            b"d\n",
        ]
        .concat();
        assert_eq!(b.finish().into_bytes(), expected);
    }

    #[test]
    fn test_rule_is_left_aligned() {
        let mut b = StreamBuilder::new();
        b.align(Alignment::Center).rule('-');
        let bytes = b.finish().into_bytes();

        let expected: Vec<u8> = [
            &[0x1B, 0x40, 0x1B, 0x61, 0x01, 0x1B, 0x61, 0x00][..],
            "-".repeat(42).as_bytes(),
            b"\n",
        ]
        .concat();
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_finish_receipt_feeds() {
        let lf = StreamBuilder::new().finish_receipt(Feed::LineFeeds(2));
        assert_eq!(lf.as_bytes(), &[0x1B, 0x40, b'\n', b'\n', 0x1B, 0x69]);

        let esc_d = StreamBuilder::new().finish_receipt(Feed::Lines(5));
        assert_eq!(esc_d.as_bytes(), &[0x1B, 0x40, 0x1B, 0x64, 5, 0x1B, 0x69]);
    }

    #[test]
    fn test_rule_follows_config_width() {
        let narrow = PrinterConfig {
            width_dots: 384,
            rule_width: 32,
        };
        let mut b = StreamBuilder::with_config(narrow);
        b.rule('=');
        assert_eq!(&b.finish()[2..], format!("{}\n", "=".repeat(32)).as_bytes());
    }

    #[test]
    fn test_text_is_verbatim_utf8() {
        let mut b = StreamBuilder::new();
        b.text("Café\n");
        assert_eq!(&b.finish()[2..], "Café\n".as_bytes());
    }
}
