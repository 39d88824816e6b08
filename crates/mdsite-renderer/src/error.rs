//! Error types for page parsing and rendering.

/// Errors produced while splitting front matter, building the document tree,
/// or rendering custom inline tags.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Front matter was opened but never closed.
    #[error("front matter opened with `{open}` is never closed with `{close}`")]
    BrokenDelimiter {
        open: &'static str,
        close: &'static str,
    },

    /// Front matter payload is valid YAML but not a mapping.
    #[error("invalid front matter: {0}")]
    FrontMatter(String),

    /// Front matter payload is not valid YAML.
    #[error("invalid front matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An inline HTML fragment could not be parsed as a single tag.
    #[error("malformed inline tag {fragment:?}: {reason}")]
    MalformedTag { fragment: String, reason: String },

    /// The markdown event stream did not form a balanced tree.
    #[error("unbalanced document tree: {0}")]
    Tree(String),
}

impl Error {
    pub(crate) fn malformed_tag(fragment: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTag {
            fragment: fragment.to_owned(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors raised while reading front matter.
    pub fn is_front_matter(&self) -> bool {
        matches!(
            self,
            Self::BrokenDelimiter { .. } | Self::FrontMatter(_) | Self::Yaml(_)
        )
    }
}

/// Result alias for this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
