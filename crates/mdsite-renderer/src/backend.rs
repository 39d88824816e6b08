//! Render backend trait for format-specific rendering.

/// Backend trait for format-specific rendering operations.
///
/// The generic renderer handles structure (paragraphs, lists, tables, inline
/// formatting) and custom tags, and delegates the leaf markup below.
pub trait RenderBackend {
    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier (e.g., "rust", "python")
    /// * `content` - The code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String);

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String);

    /// Render heading start tag with its anchor id.
    fn heading_start(level: u8, id: &str, out: &mut String);

    /// Render heading end tag.
    fn heading_end(level: u8, out: &mut String);

    /// Render link start tag. External links open in a new browsing context.
    fn link_start(href: &str, title: &str, external: bool, out: &mut String);

    /// Render link end tag.
    fn link_end(out: &mut String) {
        out.push_str("</a>");
    }

    /// Render an image.
    ///
    /// # Arguments
    ///
    /// * `src` - Image source URL
    /// * `alt` - Alt text for the image
    /// * `title` - Optional title attribute
    /// * `lazy` - Whether to defer loading until the image is near the viewport
    /// * `out` - Output buffer to write to
    fn image(src: &str, alt: &str, title: &str, lazy: bool, out: &mut String);

    /// Render raw HTML passed through from the source.
    fn raw_html(html: &str, out: &mut String) {
        out.push_str(html);
    }

    /// Render a hard break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
