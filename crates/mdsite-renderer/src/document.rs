//! Owned markdown document tree.

use pulldown_cmark::Alignment;

use crate::frontmatter::FrontMatter;

/// Kind of a node in the document tree, with its kind-specific payload.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading { level: u8, id: String },
    BlockQuote,
    CodeBlock { lang: Option<String>, literal: String },
    /// Raw block-level HTML; the payload accumulates the whole block.
    HtmlBlock(String),
    List { start: Option<u64> },
    Item,
    Table { alignments: Vec<Alignment> },
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Superscript,
    Subscript,
    Link { dest: String, title: String },
    Image { dest: String, title: String },
    /// Container without markup of its own (footnotes, metadata, definition lists).
    Group,
    Text(String),
    Code(String),
    /// One raw inline HTML fragment, usually a single opening or closing tag.
    InlineHtml(String),
    SoftBreak,
    HardBreak,
    Rule,
    TaskListMarker(bool),
}

/// A node with its ordered children.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Concatenated text content of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text(text) | NodeKind::Code(text) => out.push_str(text),
            NodeKind::SoftBreak | NodeKind::HardBreak => out.push(' '),
            _ => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// A parsed markdown body.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub(crate) root: Node,
}

impl Document {
    /// Root node, always of kind [`NodeKind::Document`].
    pub fn root(&self) -> &Node {
        &self.root
    }
}

/// A page source split into its front matter and document tree.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedPage {
    pub front_matter: FrontMatter,
    pub document: Document,
}
