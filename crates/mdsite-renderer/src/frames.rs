//! Stack of open custom tags whose rendered content is buffered until they close.

use crate::tag::HtmlTag;

/// What an open frame turns into once its closing tag arrives.
#[derive(Debug)]
pub(crate) enum FrameKind {
    /// `<ins type="book_bib">`: replaced by a bibliography card.
    Bibliography(HtmlTag),
    /// `<mark category[=target]>`: wrapped in a colored span.
    Highlight {
        category: String,
        value: String,
        color: &'static str,
    },
    /// Any other `mark`/`ins` tag: emitted unchanged around its content.
    Passthrough,
}

#[derive(Debug)]
pub(crate) struct Frame {
    pub(crate) kind: FrameKind,
    /// Lowercased name of the tag that closes this frame.
    pub(crate) closing: String,
    /// Source text of the opening tag.
    pub(crate) opening: String,
    /// Rendered HTML of the content.
    pub(crate) buffer: String,
    /// Plain text of the content, used for keywords and lookups.
    pub(crate) text: String,
}

impl Frame {
    pub(crate) fn new(kind: FrameKind, closing: &str, opening: &str) -> Self {
        Self {
            kind,
            closing: closing.to_owned(),
            opening: opening.to_owned(),
            buffer: String::new(),
            text: String::new(),
        }
    }

    /// Original markup: opening tag, buffered content, and the closing tag if seen.
    pub(crate) fn into_passthrough(self, closed: bool) -> String {
        let mut out = self.opening;
        out.push_str(&self.buffer);
        if closed {
            out.push_str("</");
            out.push_str(&self.closing);
            out.push('>');
        }
        out
    }
}

#[derive(Debug, Default)]
pub(crate) struct TagStack {
    frames: Vec<Frame>,
}

impl TagStack {
    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Pop the top frame if `name` is the tag it is waiting for.
    pub(crate) fn pop_matching(&mut self, name: &str) -> Option<Frame> {
        if self.frames.last()?.closing == name {
            self.frames.pop()
        } else {
            None
        }
    }

    pub(crate) fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub(crate) fn top_buffer(&mut self) -> Option<&mut String> {
        self.frames.last_mut().map(|frame| &mut frame.buffer)
    }

    /// Append plain text to the innermost frame, if any.
    pub(crate) fn push_text(&mut self, text: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.text.push_str(text);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
