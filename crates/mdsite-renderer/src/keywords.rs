//! Keywords collected from highlight tags.

use std::collections::{BTreeMap, HashSet};

use sha2::{Digest, Sha256};

/// Keyword categories. Only names are indexed today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeywordKind {
    Name,
}

impl KeywordKind {
    /// Map a highlight category to a keyword kind.
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            "name" => Some(Self::Name),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
        }
    }
}

/// A keyword occurrence and the anchor placed at it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keyword {
    pub value: String,
    pub anchor: String,
}

/// Keywords grouped by kind, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeywordIndex {
    entries: BTreeMap<KeywordKind, Vec<Keyword>>,
}

impl KeywordIndex {
    pub fn add(&mut self, kind: KeywordKind, value: impl Into<String>, anchor: impl Into<String>) {
        self.entries.entry(kind).or_default().push(Keyword {
            value: value.into(),
            anchor: anchor.into(),
        });
    }

    /// All occurrences of a kind, duplicates included.
    pub fn get(&self, kind: KeywordKind) -> &[Keyword] {
        self.entries.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// First occurrence of each distinct value of a kind.
    pub fn unique(&self, kind: KeywordKind) -> Vec<&Keyword> {
        let mut seen = HashSet::new();
        self.get(kind)
            .iter()
            .filter(|keyword| seen.insert(keyword.value.as_str()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }
}

/// Deterministic anchor id for keyword content: hex of the first 10 bytes of its SHA-256.
pub fn anchor_id(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..10])
}
