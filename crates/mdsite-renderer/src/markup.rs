//! HTML snippets produced by custom tags.

use std::fmt::Write;

use crate::palette::Palette;
use crate::state::escape_html;
use crate::tag::HtmlTag;

/// Default margin applied to raw `<img>` tags that do not set one.
pub const DEFAULT_IMAGE_MARGIN: &str = "0.5em 0";

/// Bibliography card for an `<ins type="book_bib" ...>` tag.
///
/// Uses the tag's `title`, `author`, `cover` and `link` attributes; the
/// enclosed content is not shown.
pub fn bibliography(tag: &HtmlTag, palette: &Palette) -> String {
    let attr = |key: &str| escape_html(tag.attr(key).unwrap_or_default());
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<div style="width:100%;margin-bottom:100px;border-bottom: 2px solid {};display:grid;grid-template-columns: 1fr 2fr;">"#,
        palette.dark_gray
    );
    let _ = write!(
        out,
        r#"<div><a href="{}"><img src="{}" style="width:100%"></a></div>"#,
        attr("link"),
        attr("cover")
    );
    let _ = write!(
        out,
        r#"<div style="padding:0 1em;"><div style="font-size:2em;font-weight:bold;">{}</div><div>Author: {}</div></div>"#,
        attr("title"),
        attr("author")
    );
    out.push_str("</div>");
    out
}

/// Colored highlight span, optionally anchored and wrapped in a lookup link.
pub fn highlight(content: &str, color: &str, anchor: Option<&str>, link: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(link) = link {
        let _ = write!(out, r#"<a href="{}" target="_blank">"#, escape_html(link));
    }
    out.push_str("<span");
    if let Some(anchor) = anchor {
        let _ = write!(out, r#" id="{}""#, escape_html(anchor));
    }
    let _ = write!(out, r#" style="background-color:{};">{content}</span>"#, escape_html(color));
    if link.is_some() {
        out.push_str("</a>");
    }
    out
}

/// Parse an inline `style` attribute into ordered `(property, value)` pairs.
pub fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            if property.is_empty() {
                return None;
            }
            Some((property, value.trim().to_owned()))
        })
        .collect()
}

/// Serialize style pairs back into an inline `style` attribute value.
pub fn encode_style(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{property}:{value};"))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_highlight_with_anchor_and_link() {
        let html = highlight("Turing", "#FF7792", Some("abc"), Some("https://x/Turing"));
        assert_eq!(
            html,
            r#"<a href="https://x/Turing" target="_blank"><span id="abc" style="background-color:#FF7792;">Turing</span></a>"#
        );
    }

    #[test]
    fn test_plain_highlight() {
        assert_eq!(
            highlight("hi", "#AEFF77", None, None),
            r#"<span style="background-color:#AEFF77;">hi</span>"#
        );
    }

    #[test]
    fn test_bibliography_uses_attributes() {
        let tag = HtmlTag::parse(r#"<ins type="book_bib" title="Dune" author="Frank Herbert" cover="c.jpg" link="https://b">"#).unwrap();
        let html = bibliography(&tag, &Palette::default());
        assert!(html.starts_with(r#"<div style="width:100%;margin-bottom:100px;border-bottom: 2px solid #A9A9A9;"#));
        assert!(html.contains(r#"<a href="https://b"><img src="c.jpg" style="width:100%"></a>"#));
        assert!(html.contains(">Dune</div>"));
        assert!(html.contains("Author: Frank Herbert"));
    }

    #[test]
    fn test_style_round_trip_preserves_order() {
        let style = parse_style(" width: 50% ; border:1px solid red;;");
        assert_eq!(
            style,
            vec![
                ("width".to_owned(), "50%".to_owned()),
                ("border".to_owned(), "1px solid red".to_owned()),
            ]
        );
        assert_eq!(encode_style(&style), "width:50%;border:1px solid red;");
    }
}
