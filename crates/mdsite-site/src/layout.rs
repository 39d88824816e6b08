//! HTML page chrome around a rendered markdown body.
//!
//! Every page is four grid rows (header, navigation, main, footer), each
//! split into a left pane, a fixed-width center column and a right pane.

use std::fmt::Write;

use mdsite_renderer::{Palette, escape_html};

/// A rendered navigation entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

/// All data needed to render a page.
#[derive(Clone, Debug, Default)]
pub struct PageData {
    pub title: String,
    /// Absolute URL of the page, when the site has a domain.
    pub canonical: Option<String>,
    /// Banner image source.
    pub banner: Option<String>,
    pub nav: Vec<NavItem>,
    /// Rendered markdown body.
    pub content: String,
    pub left_pane: String,
    pub right_pane: String,
    /// Style rules required by the pane contents.
    pub extra_css: String,
}

/// Render a complete HTML document.
pub fn render_page(page: &PageData, palette: &Palette) -> String {
    let mut html = String::with_capacity(page.content.len() + 4096);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(&page.title));
    if let Some(canonical) = &page.canonical {
        let _ = writeln!(html, "<link rel=\"canonical\" href=\"{}\">", escape_html(canonical));
    }
    html.push_str("<style>\n");
    write_base_css(&mut html, palette);
    html.push_str(&page.extra_css);
    html.push_str("</style>\n</head>\n<body>\n");

    let banner = match &page.banner {
        Some(src) => format!(
            "<img src=\"{}\" style=\"width:100%;height:10em;object-fit:cover;\">",
            escape_html(src)
        ),
        None => "<div style=\"height:2em;\"></div>".to_owned(),
    };
    write_row(&mut html, "header", "", &banner, "");
    write_row(&mut html, "navi", "", &render_nav(&page.nav), "");
    write_row(&mut html, "main", &page.left_pane, &page.content, &page.right_pane);
    write_row(&mut html, "footer", "", "<p>Generated from markdown</p>", "");

    html.push_str("</body>\n</html>\n");
    html
}

fn write_base_css(html: &mut String, palette: &Palette) {
    let _ = write!(
        html,
        "\
.row {{
  display: grid;
  grid-template-columns: 1fr 60em 1fr;
  font-size: 120%;
}}
.header {{
  padding-bottom: 4em;
}}
.navi {{
  padding-left: 2em;
  padding-right: 2em;
}}
.main {{
  padding-left: 2em;
  padding-right: 2em;
  border-left: 1px solid {light_gray};
  border-right: 1px solid {light_gray};
  min-height: 50em;
}}
.footer {{
  margin-top: 4em;
  text-align: center;
}}
",
        light_gray = palette.light_gray
    );
}

fn write_row(html: &mut String, class: &str, left: &str, center: &str, right: &str) {
    let _ = write!(
        html,
        "<div class=\"row\">\n\
         <div class=\"col-left\">{left}</div>\n\
         <div class=\"{class}\">{center}</div>\n\
         <div class=\"col-right\">{right}</div>\n\
         </div>\n"
    );
}

fn render_nav(items: &[NavItem]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let links: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "<a href=\"{}\">{}</a>",
                escape_html(&item.href),
                escape_html(&item.label)
            )
        })
        .collect();
    format!(
        "<span>🔗</span><span style=\"margin-left:1em;\">{}</span>",
        links.join(" | ")
    )
}
