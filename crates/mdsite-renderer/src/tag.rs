//! Single raw HTML tags found inline in markdown.

use std::borrow::Cow;
use std::fmt::Write;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};
use crate::state::escape_html;

/// An opening (or self-closing) HTML tag with its attributes in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlTag {
    name: String,
    attrs: Vec<(String, String)>,
    self_closing: bool,
}

impl HtmlTag {
    /// Parse a fragment that must contain exactly one opening tag.
    ///
    /// Tag and attribute names are lowercased. Attribute values are unescaped.
    pub fn parse(fragment: &str) -> Result<Self> {
        let trimmed = fragment.trim();
        let mut reader = Reader::from_str(trimmed);
        let event = reader
            .read_event()
            .map_err(|e| Error::malformed_tag(fragment, e.to_string()))?;
        let (start, self_closing) = match event {
            Event::Start(start) => (start, false),
            Event::Empty(start) => (start, true),
            _ => return Err(Error::malformed_tag(fragment, "expected an opening tag")),
        };
        let consumed = usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX);
        if consumed != trimmed.len() {
            return Err(Error::malformed_tag(fragment, "unexpected content after tag"));
        }

        Ok(Self {
            name: decode_lowercase(start.name().as_ref()),
            attrs: decode_attrs(fragment, &start)?,
            self_closing,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// The attribute, if the tag carries exactly one.
    pub fn single_attr(&self) -> Option<(&str, &str)> {
        match self.attrs.as_slice() {
            [(key, value)] => Some((key.as_str(), value.as_str())),
            _ => None,
        }
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(name, _)| name == key) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((key.to_owned(), value)),
        }
    }

    /// Serialize back to HTML with escaped attribute values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attrs {
            let _ = write!(out, r#" {key}="{}""#, escape_html(value));
        }
        out.push_str(if self.self_closing { "/>" } else { ">" });
        out
    }
}

/// Name of a closing tag such as `</mark>`, lowercased.
pub fn closing_tag_name(fragment: &str) -> Option<String> {
    let inner = fragment.trim().strip_prefix("</")?.strip_suffix('>')?.trim();
    if inner.is_empty() || !inner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    Some(inner.to_ascii_lowercase())
}

/// Whether the fragment is a comment, declaration or processing instruction.
pub fn is_markup_declaration(fragment: &str) -> bool {
    let trimmed = fragment.trim_start();
    trimmed.starts_with("<!") || trimmed.starts_with("<?")
}

fn decode_lowercase(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_lowercase()
}

fn decode_attrs(fragment: &str, start: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attrs: Vec<(String, String)> = Vec::new();
    for attr in start.html_attributes() {
        let attr = attr.map_err(|e| Error::malformed_tag(fragment, e.to_string()))?;
        let key = decode_lowercase(attr.key.as_ref());
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            Cow::into_owned,
        );
        attrs.push((key, value));
    }
    Ok(attrs)
}
