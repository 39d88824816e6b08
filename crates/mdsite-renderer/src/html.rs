//! HTML backend for markdown rendering.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::state::escape_html;

/// HTML render backend.
///
/// Produces HTML5 with `<pre><code>` code blocks, anchored headings and
/// `target="_blank"` on external links.
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            let _ = write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            );
        } else {
            let _ = write!(out, "<pre><code>{}</code></pre>", escape_html(content));
        }
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn heading_start(level: u8, id: &str, out: &mut String) {
        let _ = write!(out, r#"<h{level} id="{}">"#, escape_html(id));
    }

    fn heading_end(level: u8, out: &mut String) {
        let _ = write!(out, "</h{level}>");
    }

    fn link_start(href: &str, title: &str, external: bool, out: &mut String) {
        let _ = write!(out, r#"<a href="{}""#, escape_html(href));
        if !title.is_empty() {
            let _ = write!(out, r#" title="{}""#, escape_html(title));
        }
        if external {
            out.push_str(r#" target="_blank""#);
        }
        out.push('>');
    }

    fn image(src: &str, alt: &str, title: &str, lazy: bool, out: &mut String) {
        let _ = write!(out, r#"<img src="{}" alt="{}""#, escape_html(src), escape_html(alt));
        if !title.is_empty() {
            let _ = write!(out, r#" title="{}""#, escape_html(title));
        }
        if lazy {
            out.push_str(r#" loading="lazy""#);
        }
        out.push('>');
    }
}
