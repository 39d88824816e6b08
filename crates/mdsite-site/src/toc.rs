//! Side panes: table of contents and keyword index.

use std::fmt::Write;

use mdsite_renderer::{Heading, KeywordIndex, KeywordKind, Palette, escape_html};

/// Nesting depth rendered by the table of contents.
pub const TOC_MAX_DEPTH: usize = 3;

pub const TOC_CSS: &str = "\
.toc {
  position: -webkit-sticky;
  position: sticky;
  float: right;
  top: 5em;
  margin-right: 2em;
}
";

/// Render the heading hierarchy as nested lists.
///
/// Anonymous levels emit no entry of their own; their children are listed
/// one level deeper. Returns an empty string when there are no headings.
pub fn render_toc(headings: &[Heading], max_depth: usize) -> String {
    if headings.is_empty() || max_depth == 0 {
        return String::new();
    }
    let mut html = String::from("<div class=\"toc\">");
    render_heading_list(&mut html, headings, 0, max_depth);
    html.push_str("</div>");
    html
}

fn render_heading_list(html: &mut String, headings: &[Heading], depth: usize, max_depth: usize) {
    let _ = write!(html, "<ul class=\"toc_ul_{depth}\">");
    for heading in headings {
        if !heading.is_placeholder() {
            let _ = write!(
                html,
                "<li class=\"toc_li_{depth}\"><a href=\"#{}\">{}</a></li>",
                escape_html(&heading.id),
                escape_html(&heading.name),
            );
        }
        if !heading.children.is_empty() && depth + 1 < max_depth {
            render_heading_list(html, &heading.children, depth + 1, max_depth);
        }
    }
    html.push_str("</ul>");
}

/// Style sheet for the keyword pane.
pub fn keywords_css(palette: &Palette) -> String {
    format!(
        "\
.kws {{
  position: -webkit-sticky;
  position: sticky;
  float: left;
  top: 10em;
  margin-left: 2em;
  font-size: 1em;
}}
.kws .namebox {{
  display: inline-block;
  background-color: {};
  border: 1px solid {};
  border-radius: 4px;
  padding: 4px 8px;
  margin: 4px;
}}
.kws a {{
  text-decoration: none;
  color: #000000;
}}
",
        palette.highlighter_red, palette.light_gray
    )
}

/// Render the `name` keywords as link boxes, first occurrence of each value only.
pub fn render_keywords(keywords: &KeywordIndex) -> String {
    let names = keywords.unique(KeywordKind::Name);
    if names.is_empty() {
        return String::new();
    }
    let mut html = String::from("<div class=\"kws\">");
    for keyword in names {
        let _ = write!(
            html,
            "<span class=\"namebox\"><a href=\"#{}\">{}</a></span>",
            escape_html(&keyword.anchor),
            escape_html(&keyword.value),
        );
    }
    html.push_str("</div>");
    html
}
