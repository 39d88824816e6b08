//! Generic markdown renderer with pluggable backend.

use std::fmt::Write;
use std::marker::PhantomData;

use crate::backend::RenderBackend;
use crate::document::{Document, Node, NodeKind};
use crate::error::Result;
use crate::frames::{Frame, FrameKind, TagStack};
use crate::heading::{Heading, HeadingTracker};
use crate::keywords::{KeywordIndex, KeywordKind, anchor_id};
use crate::links::{LookupTarget, is_external, is_internal, reroot, split_target, with_suffix};
use crate::markup::{self, DEFAULT_IMAGE_MARGIN, encode_style, parse_style};
use crate::palette::{DEFAULT_PALETTE, Palette};
use crate::parse::parse_document;
use crate::state::{TableState, escape_html};
use crate::tag::{HtmlTag, closing_tag_name, is_markup_declaration};

/// Tags whose raw inline fragments get custom handling.
const INTERCEPTED_TAGS: [&str; 3] = ["img", "ins", "mark"];

/// Rendering options.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Appended to internal link targets (before any `#fragment`).
    pub internal_ref_suffix: String,
    /// Add `loading="lazy"` to images.
    pub lazy_image_loading: bool,
    /// Inline style of the container wrapped around code blocks.
    pub code_block_style: String,
    pub palette: Palette,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            internal_ref_suffix: ".html".to_owned(),
            lazy_image_loading: true,
            code_block_style: format!(
                "padding:0.1em 1.5em;background-color:{};",
                DEFAULT_PALETTE.light_gray
            ),
            palette: DEFAULT_PALETTE,
        }
    }
}

/// Result of rendering a document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML body fragment.
    pub html: String,
    /// Text of the first level-1 heading.
    pub title: Option<String>,
    /// Site-relative paths of internal pages and assets, in document order.
    pub references: Vec<String>,
    /// Heading hierarchy.
    pub headings: Vec<Heading>,
    /// Keywords marked with highlight tags.
    pub keywords: KeywordIndex,
}

/// Mutable state of one render pass.
#[derive(Default)]
struct RenderContext {
    output: String,
    stack: TagStack,
    table: TableState,
    headings: HeadingTracker,
    references: Vec<String>,
    keywords: KeywordIndex,
    title: Option<String>,
}

impl RenderContext {
    /// Buffer of the innermost open custom tag, or the page output.
    fn sink(&mut self) -> &mut String {
        match self.stack.top_buffer() {
            Some(buffer) => buffer,
            None => &mut self.output,
        }
    }
}

/// Generic markdown renderer with pluggable backend.
///
/// Code blocks, links, images and raw inline tags are intercepted for
/// site-specific handling; everything else goes through the default
/// per-kind rendering. The renderer holds no per-render state, so one
/// instance can render any number of documents.
pub struct MarkdownRenderer<B: RenderBackend> {
    options: RenderOptions,
    /// Directory of the document being rendered, relative to the site root.
    base_dir: String,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            base_dir: String::new(),
            _backend: PhantomData,
        }
    }

    /// Set the document's directory for resolving relative references.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<String>) -> Self {
        self.base_dir = dir.into().trim_matches('/').to_owned();
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Parse and render a markdown body.
    pub fn render_markdown(&self, markdown: &str) -> Result<RenderResult> {
        self.render(&parse_document(markdown)?)
    }

    /// Render a document tree.
    pub fn render(&self, document: &Document) -> Result<RenderResult> {
        let mut ctx = RenderContext::default();
        for child in &document.root().children {
            self.render_node(child, &mut ctx)?;
        }

        while let Some(frame) = ctx.stack.pop() {
            tracing::warn!(tag = %frame.closing, "Custom tag is never closed, emitting it unchanged");
            let html = frame.into_passthrough(false);
            ctx.sink().push_str(&html);
        }

        Ok(RenderResult {
            html: ctx.output,
            title: ctx.title,
            references: ctx.references,
            headings: ctx.headings.finish(),
            keywords: ctx.keywords,
        })
    }

    fn render_node(&self, node: &Node, ctx: &mut RenderContext) -> Result<()> {
        match &node.kind {
            NodeKind::CodeBlock { lang, literal } => {
                self.render_code_block(lang.as_deref(), literal, ctx);
                Ok(())
            }
            NodeKind::Link { dest, title } => self.render_link(node, dest, title, ctx),
            NodeKind::Image { dest, title } => {
                self.render_image(node, dest, title, ctx);
                Ok(())
            }
            NodeKind::InlineHtml(fragment) => self.render_inline_html(fragment, ctx),
            NodeKind::HtmlBlock(html) => self.render_html_block(html, ctx),
            _ => self.render_default(node, ctx),
        }
    }

    fn render_children(&self, node: &Node, ctx: &mut RenderContext) -> Result<()> {
        for child in &node.children {
            self.render_node(child, ctx)?;
        }
        Ok(())
    }

    /// Default rendering for a node kind.
    fn render_default(&self, node: &Node, ctx: &mut RenderContext) -> Result<()> {
        match &node.kind {
            NodeKind::Document | NodeKind::Group => self.render_children(node, ctx)?,
            NodeKind::Paragraph => self.wrap(node, "p", ctx)?,
            NodeKind::Heading { level, id } => {
                let text = node.plain_text();
                let text = text.trim();
                if *level == 1 && ctx.title.is_none() {
                    ctx.title = Some(text.to_owned());
                }
                ctx.headings.add(*level, id.as_str(), text);

                B::heading_start(*level, id, ctx.sink());
                self.render_children(node, ctx)?;
                B::heading_end(*level, ctx.sink());
            }
            NodeKind::BlockQuote => {
                B::blockquote_start(ctx.sink());
                self.render_children(node, ctx)?;
                B::blockquote_end(ctx.sink());
            }
            NodeKind::CodeBlock { lang, literal } => B::code_block(lang.as_deref(), literal, ctx.sink()),
            NodeKind::HtmlBlock(html) | NodeKind::InlineHtml(html) => B::raw_html(html, ctx.sink()),
            NodeKind::List { start } => {
                let tag = match start {
                    Some(1) => {
                        ctx.sink().push_str("<ol>");
                        "ol"
                    }
                    Some(n) => {
                        let _ = write!(ctx.sink(), r#"<ol start="{n}">"#);
                        "ol"
                    }
                    None => {
                        ctx.sink().push_str("<ul>");
                        "ul"
                    }
                };
                self.render_children(node, ctx)?;
                let _ = write!(ctx.sink(), "</{tag}>");
            }
            NodeKind::Item => self.wrap(node, "li", ctx)?,
            NodeKind::Table { alignments } => {
                ctx.table.start(alignments);
                ctx.sink().push_str("<table>");
                self.render_children(node, ctx)?;
                ctx.sink().push_str("</tbody></table>");
            }
            NodeKind::TableHead => {
                ctx.table.start_head();
                ctx.sink().push_str("<thead><tr>");
                self.render_children(node, ctx)?;
                ctx.sink().push_str("</tr></thead><tbody>");
                ctx.table.end_head();
            }
            NodeKind::TableRow => {
                ctx.table.start_row();
                self.wrap(node, "tr", ctx)?;
            }
            NodeKind::TableCell => {
                let tag = if ctx.table.is_in_head() { "th" } else { "td" };
                let style = ctx.table.current_alignment_style();
                let _ = write!(ctx.sink(), "<{tag}{style}>");
                self.render_children(node, ctx)?;
                let _ = write!(ctx.sink(), "</{tag}>");
                ctx.table.next_cell();
            }
            NodeKind::Emphasis => self.wrap(node, "em", ctx)?,
            NodeKind::Strong => self.wrap(node, "strong", ctx)?,
            NodeKind::Strikethrough => self.wrap(node, "del", ctx)?,
            NodeKind::Superscript => self.wrap(node, "sup", ctx)?,
            NodeKind::Subscript => self.wrap(node, "sub", ctx)?,
            NodeKind::Link { dest, title } => {
                B::link_start(dest, title, is_external(dest), ctx.sink());
                self.render_children(node, ctx)?;
                B::link_end(ctx.sink());
            }
            NodeKind::Image { dest, title } => B::image(
                dest,
                &node.plain_text(),
                title,
                self.options.lazy_image_loading,
                ctx.sink(),
            ),
            NodeKind::Text(text) => {
                ctx.stack.push_text(text);
                ctx.sink().push_str(&escape_html(text));
            }
            NodeKind::Code(code) => {
                ctx.stack.push_text(code);
                let _ = write!(ctx.sink(), "<code>{}</code>", escape_html(code));
            }
            NodeKind::SoftBreak => {
                ctx.stack.push_text(" ");
                ctx.sink().push('\n');
            }
            NodeKind::HardBreak => {
                ctx.stack.push_text(" ");
                B::hard_break(ctx.sink());
            }
            NodeKind::Rule => B::horizontal_rule(ctx.sink()),
            NodeKind::TaskListMarker(checked) => B::task_list_marker(*checked, ctx.sink()),
        }
        Ok(())
    }

    fn wrap(&self, node: &Node, tag: &str, ctx: &mut RenderContext) -> Result<()> {
        let _ = write!(ctx.sink(), "<{tag}>");
        self.render_children(node, ctx)?;
        let _ = write!(ctx.sink(), "</{tag}>");
        Ok(())
    }

    fn render_code_block(&self, lang: Option<&str>, literal: &str, ctx: &mut RenderContext) {
        let out = ctx.sink();
        let _ = write!(
            out,
            r#"<div style="{}">"#,
            escape_html(&self.options.code_block_style)
        );
        B::code_block(lang, literal, out);
        out.push_str("</div>");
    }

    fn render_link(&self, node: &Node, dest: &str, title: &str, ctx: &mut RenderContext) -> Result<()> {
        let href = if is_internal(dest) {
            self.record_reference(dest, ctx);
            with_suffix(dest, &self.options.internal_ref_suffix)
        } else {
            dest.to_owned()
        };
        B::link_start(&href, title, is_external(dest), ctx.sink());
        self.render_children(node, ctx)?;
        B::link_end(ctx.sink());
        Ok(())
    }

    fn render_image(&self, node: &Node, dest: &str, title: &str, ctx: &mut RenderContext) {
        self.record_reference(dest, ctx);
        B::image(
            dest,
            &node.plain_text(),
            title,
            self.options.lazy_image_loading,
            ctx.sink(),
        );
    }

    fn render_inline_html(&self, fragment: &str, ctx: &mut RenderContext) -> Result<()> {
        if is_markup_declaration(fragment) {
            B::raw_html(fragment, ctx.sink());
            return Ok(());
        }

        if let Some(name) = closing_tag_name(fragment) {
            match ctx.stack.pop_matching(&name) {
                Some(frame) => {
                    let text = frame.text.clone();
                    let html = self.close_frame(frame, ctx);
                    ctx.stack.push_text(&text);
                    ctx.sink().push_str(&html);
                }
                None => B::raw_html(fragment, ctx.sink()),
            }
            return Ok(());
        }

        if !opening_tag_name(fragment).is_some_and(|name| INTERCEPTED_TAGS.contains(&name.as_str())) {
            B::raw_html(fragment, ctx.sink());
            return Ok(());
        }

        let tag = HtmlTag::parse(fragment)?;
        if tag.name() == "img" {
            self.render_raw_image(tag, ctx);
        } else if tag.is_self_closing() {
            if is_bibliography(&tag) {
                let frame = self.open_frame(tag, fragment, ctx);
                let html = self.close_frame(frame, ctx);
                ctx.sink().push_str(&html);
            } else {
                B::raw_html(fragment, ctx.sink());
            }
        } else {
            let frame = self.open_frame(tag, fragment, ctx);
            ctx.stack.push(frame);
        }
        Ok(())
    }

    fn render_raw_image(&self, mut tag: HtmlTag, ctx: &mut RenderContext) {
        if let Some(src) = tag.attr("src").map(ToOwned::to_owned) {
            self.record_reference(&src, ctx);
        }
        if self.options.lazy_image_loading {
            tag.set_attr("loading", "lazy");
        }
        let mut style = parse_style(tag.attr("style").unwrap_or_default());
        if !style.iter().any(|(property, _)| property.starts_with("margin")) {
            style.push(("margin".to_owned(), DEFAULT_IMAGE_MARGIN.to_owned()));
            tag.set_attr("style", encode_style(&style));
        }
        B::raw_html(&tag.to_html(), ctx.sink());
    }

    fn open_frame(&self, tag: HtmlTag, fragment: &str, ctx: &mut RenderContext) -> Frame {
        let name = tag.name().to_owned();
        let kind = match name.as_str() {
            "ins" if is_bibliography(&tag) => {
                if let Some(cover) = tag.attr("cover") {
                    self.record_reference(cover, ctx);
                }
                FrameKind::Bibliography(tag)
            }
            "mark" => match tag.single_attr().and_then(|(category, value)| {
                let color = self.options.palette.category_color(category)?;
                Some(FrameKind::Highlight {
                    category: category.to_owned(),
                    value: value.to_owned(),
                    color,
                })
            }) {
                Some(kind) => kind,
                None => FrameKind::Passthrough,
            },
            _ => FrameKind::Passthrough,
        };
        Frame::new(kind, &name, fragment)
    }

    fn close_frame(&self, frame: Frame, ctx: &mut RenderContext) -> String {
        match frame.kind {
            FrameKind::Passthrough => frame.into_passthrough(true),
            FrameKind::Bibliography(tag) => markup::bibliography(&tag, &self.options.palette),
            FrameKind::Highlight {
                category,
                value,
                color,
            } => {
                let content = frame.buffer;
                let term = frame.text.trim();
                let anchor = KeywordKind::from_category(&category).map(|kind| {
                    let anchor = anchor_id(term);
                    ctx.keywords.add(kind, term, anchor.as_str());
                    anchor
                });
                let link = LookupTarget::from_attr(&value).map(|target| target.url(term));
                markup::highlight(&content, color, anchor.as_deref(), link.as_deref())
            }
        }
    }

    /// Raw HTML block: tags go through the inline tag handling, text between
    /// them is emitted unchanged.
    fn render_html_block(&self, html: &str, ctx: &mut RenderContext) -> Result<()> {
        for (segment, is_tag) in html_segments(html) {
            if is_tag {
                self.render_inline_html(segment, ctx)?;
            } else {
                ctx.stack.push_text(segment);
                B::raw_html(segment, ctx.sink());
            }
        }
        Ok(())
    }

    /// Record an internal target as a site-relative path without query or fragment.
    fn record_reference(&self, target: &str, ctx: &mut RenderContext) {
        if !is_internal(target) {
            return;
        }
        let (path, _) = split_target(target);
        if path.is_empty() {
            return;
        }
        ctx.references.push(reroot(&self.base_dir, path));
    }
}

fn is_bibliography(tag: &HtmlTag) -> bool {
    tag.name() == "ins" && tag.attr("type") == Some("book_bib")
}

/// Split raw HTML into tag fragments (`true`) and the text between them (`false`).
///
/// Comments are kept whole. An unterminated `<` ends the scan as text.
fn html_segments(html: &str) -> Vec<(&str, bool)> {
    let mut segments = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        let terminator = if rest[start..].starts_with("<!--") { "-->" } else { ">" };
        let Some(end) = rest[start..].find(terminator) else {
            break;
        };
        let end = start + end + terminator.len();
        if start > 0 {
            segments.push((&rest[..start], false));
        }
        segments.push((&rest[start..end], true));
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        segments.push((rest, false));
    }
    segments
}

/// Lowercased tag name of an opening tag fragment such as `<mark b>`.
fn opening_tag_name(fragment: &str) -> Option<String> {
    let rest = fragment.trim_start().strip_prefix('<')?;
    let name: String = rest
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect();
    (!name.is_empty()).then(|| name.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::html::HtmlBackend;

    fn render(markdown: &str) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::default()
            .render_markdown(markdown)
            .unwrap()
    }

    fn render_in(dir: &str, markdown: &str) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::default()
            .with_base_dir(dir)
            .render_markdown(markdown)
            .unwrap()
    }

    #[test]
    fn test_basic_markup() {
        let result = render("# Title\n\nHello **world**\n\n- a\n- b\n");
        assert_eq!(
            result.html,
            r#"<h1 id="title">Title</h1><p>Hello <strong>world</strong></p><ul><li>a</li><li>b</li></ul>"#
        );
        assert_eq!(result.title.as_deref(), Some("Title"));
    }

    #[test]
    fn test_ordered_list_start() {
        assert_eq!(render("3. x\n").html, r#"<ol start="3"><li>x</li></ol>"#);
    }

    #[test]
    fn test_code_block_is_wrapped() {
        let result = render("```rust\nlet x = 1;\n```\n");
        assert_eq!(
            result.html,
            "<div style=\"padding:0.1em 1.5em;background-color:#F0F0F0;\"><pre><code class=\"language-rust\">let x = 1;\n</code></pre></div>"
        );
    }

    #[test]
    fn test_internal_link_gets_suffix_and_reference() {
        let result = render_in("docs", "[a](guide.md#setup) [b](https://x.org) [c](#top)");
        assert_eq!(
            result.html,
            r##"<p><a href="guide.md.html#setup">a</a> <a href="https://x.org" target="_blank">b</a> <a href="#top">c</a></p>"##
        );
        assert_eq!(result.references, vec!["docs/guide.md".to_owned()]);
    }

    #[test]
    fn test_image_reference_is_rerooted() {
        let result = render_in("docs/a", "![alt](../img/p.png \"T\")");
        assert_eq!(
            result.html,
            r#"<p><img src="../img/p.png" alt="alt" title="T" loading="lazy"></p>"#
        );
        assert_eq!(result.references, vec!["docs/img/p.png".to_owned()]);
    }

    #[test]
    fn test_raw_img_gets_lazy_loading_and_margin() {
        let result = render(r#"x <img src="pic.png"> y"#);
        assert_eq!(
            result.html,
            r#"<p>x <img src="pic.png" loading="lazy" style="margin:0.5em 0;"> y</p>"#
        );
        assert_eq!(result.references, vec!["pic.png".to_owned()]);

        let result = render(r#"<img src="https://cdn/p.png" style="margin:0"> z"#);
        assert!(result.html.contains(r#"style="margin:0""#));
        assert!(result.references.is_empty());
    }

    #[test]
    fn test_highlight_with_keyword_and_lookup() {
        let result = render(r#"Meet <mark name="wiki">Turing</mark>."#);
        let anchor = anchor_id("Turing");
        assert_eq!(
            result.html,
            format!(
                r#"<p>Meet <a href="https://zh.wikipedia.org/zh-cn/Turing" target="_blank"><span id="{anchor}" style="background-color:#FF7792;">Turing</span></a>.</p>"#
            )
        );
        let names = result.keywords.get(KeywordKind::Name);
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].value, "Turing");
        assert_eq!(names[0].anchor, anchor);
    }

    #[test]
    fn test_highlight_alias_without_keyword() {
        let result = render("<mark b>important</mark>");
        assert_eq!(
            result.html,
            r#"<p><span style="background-color:#AEFF77;">important</span></p>"#
        );
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn test_nested_highlight_renders_inner_first() {
        let result = render("<mark c>a <mark d>b</mark> c</mark>");
        assert_eq!(
            result.html,
            r#"<p><span style="background-color:#77C9FF;">a <span style="background-color:#FFFF77;">b</span> c</span></p>"#
        );
    }

    #[test]
    fn test_unknown_mark_passes_through() {
        let result = render("<mark>plain *em*</mark>");
        assert_eq!(result.html, "<p><mark>plain <em>em</em></mark></p>");
    }

    #[test]
    fn test_unclosed_mark_is_flushed() {
        let result = render("<mark b>open");
        assert_eq!(result.html, "<p><mark b>open</p>");
    }

    #[test]
    fn test_stray_closing_tag_passes_through() {
        assert_eq!(render("a </mark> b").html, "<p>a </mark> b</p>");
    }

    #[test]
    fn test_book_bibliography() {
        let result = render_in(
            "books",
            r#"<ins type="book_bib" title="Dune" author="Frank Herbert" cover="dune.jpg" link="https://b">ignored</ins>"#,
        );
        assert!(result.html.contains(r#"<img src="dune.jpg" style="width:100%">"#));
        assert!(result.html.contains(">Dune</div>"));
        assert!(!result.html.contains("ignored"));
        assert_eq!(result.references, vec!["books/dune.jpg".to_owned()]);
    }

    #[test]
    fn test_comment_passes_through() {
        assert_eq!(render("a <!-- hi --> b").html, "<p>a <!-- hi --> b</p>");
    }

    #[test]
    fn test_malformed_intercepted_tag_is_an_error() {
        let err = MarkdownRenderer::<HtmlBackend>::default()
            .render_markdown(r#"<mark b="x" b="y">t</mark>"#)
            .unwrap_err();
        assert!(matches!(err, crate::Error::MalformedTag { .. }));
    }

    #[test]
    fn test_headings_are_tracked() {
        let result = render("# A\n\n## B\n\n## C\n");
        assert_eq!(result.headings.len(), 1);
        assert_eq!(result.headings[0].name, "A");
        let children: Vec<_> = result.headings[0]
            .children
            .iter()
            .map(|heading| heading.id.as_str())
            .collect();
        assert_eq!(children, vec!["b", "c"]);
    }

    #[test]
    fn test_table() {
        let result = render("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
        assert_eq!(
            result.html,
            r#"<table><thead><tr><th style="text-align:left">a</th><th style="text-align:right">b</th></tr></thead><tbody><tr><td style="text-align:left">1</td><td style="text-align:right">2</td></tr></tbody></table>"#
        );
    }

    #[test]
    fn test_mismatched_closing_tag_stays_inside_open_frame() {
        let result = render("<mark c>a </ins> b</mark>");
        assert_eq!(
            result.html,
            r#"<p><span style="background-color:#77C9FF;">a </ins> b</span></p>"#
        );
    }

    #[test]
    fn test_raw_img_on_its_own_line() {
        let result = render("Intro\n\n<img src=\"pic.png\">\n\nOutro");
        assert_eq!(
            result.html,
            "<p>Intro</p><img src=\"pic.png\" loading=\"lazy\" style=\"margin:0.5em 0;\">\n<p>Outro</p>"
        );
        assert_eq!(result.references, vec!["pic.png".to_owned()]);
    }

    #[test]
    fn test_html_block_keeps_other_markup() {
        let result = render("<div class=\"x\">\n<!-- a > b -->\n</div>\n");
        assert_eq!(result.html, "<div class=\"x\">\n<!-- a > b -->\n</div>\n");
    }

    #[test]
    fn test_highlight_spanning_html_block_lines() {
        let result = render("<mark name>\nAda\n</mark>\n");
        let names = result.keywords.get(KeywordKind::Name);
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].value, "Ada");
        assert!(result.html.contains(r#"style="background-color:#FF7792;">"#));
    }

    #[test]
    fn test_keyword_uses_plain_text() {
        let result = render(r#"<mark name>A & B</mark> and <mark name="wiki">*Ada*</mark>"#);
        let values: Vec<_> = result
            .keywords
            .get(KeywordKind::Name)
            .iter()
            .map(|keyword| (keyword.value.as_str(), keyword.anchor.clone()))
            .collect();
        assert_eq!(
            values,
            vec![("A & B", anchor_id("A & B")), ("Ada", anchor_id("Ada"))]
        );
        assert!(result.html.contains(">A &amp; B</span>"));
        assert!(result.html.contains(r#"<a href="https://zh.wikipedia.org/zh-cn/Ada" target="_blank">"#));
        assert!(result.html.contains("<em>Ada</em></span>"));
    }

    #[test]
    fn test_self_closing_book_bibliography() {
        let result = render(r#"<ins type="book_bib" title="Dune" cover="dune.jpg"/>"#);
        assert!(result.html.contains(">Dune</div>"));
        assert!(!result.html.contains("<ins"));
        assert_eq!(result.references, vec!["dune.jpg".to_owned()]);
    }

    #[test]
    fn test_renderer_is_reusable() {
        let renderer = MarkdownRenderer::<HtmlBackend>::default();
        let first = renderer.render_markdown("# One").unwrap();
        let second = renderer.render_markdown("# One").unwrap();
        assert_eq!(first.html, second.html);
        assert_eq!(second.headings.len(), 1);
    }
}
