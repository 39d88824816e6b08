//! Build the [`Document`] tree from pulldown-cmark events.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::document::{Document, Node, NodeKind, ParsedPage};
use crate::error::{Error, Result};
use crate::frontmatter::split_front_matter;
use crate::state::HeadingIds;

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Split front matter from `source` and parse the remaining markdown.
pub fn parse_page(source: &str) -> Result<ParsedPage> {
    let (front_matter, body) = split_front_matter(source)?;
    let document = parse_document(body)?;
    Ok(ParsedPage {
        front_matter,
        document,
    })
}

/// Parse a markdown body (without front matter) into a document tree.
pub fn parse_document(markdown: &str) -> Result<Document> {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(markdown, parser_options()) {
        builder.push(event)?;
    }
    builder.finish()
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

struct TreeBuilder {
    stack: Vec<Node>,
    ids: HeadingIds,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Node::new(NodeKind::Document)],
            ids: HeadingIds::default(),
        }
    }

    fn push(&mut self, event: Event<'_>) -> Result<()> {
        match event {
            Event::Start(tag) => {
                let kind = self.open_kind(tag);
                self.stack.push(Node::new(kind));
            }
            Event::End(tag) => self.close(tag)?,
            Event::Text(text) => {
                if let Some(NodeKind::CodeBlock { literal, .. }) =
                    self.stack.last_mut().map(|node| &mut node.kind)
                {
                    literal.push_str(&text);
                } else {
                    self.leaf(NodeKind::Text(text.into_string()))?;
                }
            }
            Event::Html(html) => {
                if let Some(NodeKind::HtmlBlock(block)) =
                    self.stack.last_mut().map(|node| &mut node.kind)
                {
                    block.push_str(&html);
                } else {
                    self.leaf(NodeKind::HtmlBlock(html.into_string()))?;
                }
            }
            Event::Code(code) => self.leaf(NodeKind::Code(code.into_string()))?,
            Event::InlineHtml(html) => self.leaf(NodeKind::InlineHtml(html.into_string()))?,
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                self.leaf(NodeKind::Code(math.into_string()))?;
            }
            Event::FootnoteReference(label) => {
                self.leaf(NodeKind::Text(format!("[^{label}]")))?;
            }
            Event::SoftBreak => self.leaf(NodeKind::SoftBreak)?,
            Event::HardBreak => self.leaf(NodeKind::HardBreak)?,
            Event::Rule => self.leaf(NodeKind::Rule)?,
            Event::TaskListMarker(checked) => self.leaf(NodeKind::TaskListMarker(checked))?,
        }
        Ok(())
    }

    fn open_kind(&mut self, tag: Tag<'_>) -> NodeKind {
        match tag {
            Tag::Paragraph => NodeKind::Paragraph,
            Tag::Heading { level, id, .. } => NodeKind::Heading {
                level: heading_level_to_num(level),
                // Generated ids are assigned on close, once the text is known.
                id: id
                    .map(|id| self.ids.claim(id.into_string()))
                    .unwrap_or_default(),
            },
            Tag::BlockQuote(_) => NodeKind::BlockQuote,
            Tag::CodeBlock(kind) => NodeKind::CodeBlock {
                lang: match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(ToOwned::to_owned),
                    CodeBlockKind::Indented => None,
                },
                literal: String::new(),
            },
            Tag::HtmlBlock => NodeKind::HtmlBlock(String::new()),
            Tag::List(start) => NodeKind::List { start },
            Tag::Item => NodeKind::Item,
            Tag::Table(alignments) => NodeKind::Table { alignments },
            Tag::TableHead => NodeKind::TableHead,
            Tag::TableRow => NodeKind::TableRow,
            Tag::TableCell => NodeKind::TableCell,
            Tag::Emphasis => NodeKind::Emphasis,
            Tag::Strong => NodeKind::Strong,
            Tag::Strikethrough => NodeKind::Strikethrough,
            Tag::Superscript => NodeKind::Superscript,
            Tag::Subscript => NodeKind::Subscript,
            Tag::Link {
                dest_url, title, ..
            } => NodeKind::Link {
                dest: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::Image {
                dest_url, title, ..
            } => NodeKind::Image {
                dest: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::MetadataBlock(_) => NodeKind::Group,
        }
    }

    fn close(&mut self, tag: TagEnd) -> Result<()> {
        if self.stack.len() < 2 {
            return Err(Error::Tree(format!("unexpected end of {tag:?}")));
        }
        let Some(mut node) = self.stack.pop() else {
            return Err(Error::Tree(format!("unexpected end of {tag:?}")));
        };
        if matches!(&node.kind, NodeKind::Heading { id, .. } if id.is_empty()) {
            let generated = self.ids.generate(&node.plain_text());
            if let NodeKind::Heading { id, .. } = &mut node.kind {
                *id = generated;
            }
        }
        self.attach(node)
    }

    fn leaf(&mut self, kind: NodeKind) -> Result<()> {
        self.attach(Node::new(kind))
    }

    fn attach(&mut self, node: Node) -> Result<()> {
        let parent = self
            .stack
            .last_mut()
            .ok_or_else(|| Error::Tree("node has no parent".to_owned()))?;
        parent.children.push(node);
        Ok(())
    }

    fn finish(mut self) -> Result<Document> {
        if self.stack.len() != 1 {
            return Err(Error::Tree(format!(
                "{} node(s) left open at end of input",
                self.stack.len() - 1
            )));
        }
        let root = self
            .stack
            .pop()
            .ok_or_else(|| Error::Tree("missing document root".to_owned()))?;
        Ok(Document { root })
    }
}
