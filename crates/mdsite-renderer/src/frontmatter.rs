//! Front matter embedded in an HTML-comment-like block at the top of a page.
//!
//! ```text
//! <!---
//! banner: images/top.jpg
//! nav:
//!   - Home=index.md
//! right_pane: toc
//! --->
//! # Page title
//! ```

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Marker opening the front matter block.
pub const OPEN_DELIMITER: &str = "<!---";
/// Marker closing the front matter block.
pub const CLOSE_DELIMITER: &str = "--->";

/// Parsed front matter mapping with typed accessors for known keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrontMatter {
    values: Mapping,
}

/// One `label=target` navigation entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub target: String,
}

impl NavLink {
    /// Parse `label=target`. Returns `None` unless the entry has exactly two parts.
    pub fn parse(entry: &str) -> Option<Self> {
        let mut parts = entry.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(label), Some(target), None) => Some(Self {
                label: label.trim().to_owned(),
                target: target.trim().to_owned(),
            }),
            _ => None,
        }
    }
}

impl FrontMatter {
    /// Parse a YAML payload. An empty payload yields empty front matter.
    pub fn from_yaml(payload: &str) -> Result<Self> {
        if payload.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_yaml::from_str::<Value>(payload)? {
            Value::Mapping(values) => Ok(Self { values }),
            Value::Null => Ok(Self::default()),
            other => Err(Error::FrontMatter(format!(
                "expected a mapping, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// Raw mapping for keys without a typed accessor.
    pub fn meta(&self) -> &Mapping {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String value of `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Banner image path.
    pub fn banner(&self) -> Option<&str> {
        self.get_str("banner").filter(|banner| !banner.is_empty())
    }

    /// Pane selector for the left column.
    pub fn left_pane(&self) -> Option<&str> {
        self.get_str("left_pane")
    }

    /// Pane selector for the right column.
    pub fn right_pane(&self) -> Option<&str> {
        self.get_str("right_pane")
    }

    /// Navigation entries. Malformed entries are skipped with a warning.
    pub fn nav(&self) -> Vec<NavLink> {
        let Some(entries) = self.values.get("nav").and_then(Value::as_sequence) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| {
                let link = entry.as_str().and_then(NavLink::parse);
                if link.is_none() {
                    tracing::warn!(entry = ?entry, "Skipping nav entry, expected `label=target`");
                }
                link
            })
            .collect()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Split page source into front matter and markdown body.
///
/// The source is trimmed first. Without a leading [`OPEN_DELIMITER`] the
/// whole source is the body and the front matter is empty.
pub fn split_front_matter(source: &str) -> Result<(FrontMatter, &str)> {
    let source = source.trim();
    let Some(rest) = source.strip_prefix(OPEN_DELIMITER) else {
        return Ok((FrontMatter::default(), source));
    };
    let Some(end) = rest.find(CLOSE_DELIMITER) else {
        return Err(Error::BrokenDelimiter {
            open: OPEN_DELIMITER,
            close: CLOSE_DELIMITER,
        });
    };
    let front_matter = FrontMatter::from_yaml(&rest[..end])?;
    let body = rest[end + CLOSE_DELIMITER.len()..].trim_start();
    Ok((front_matter, body))
}
