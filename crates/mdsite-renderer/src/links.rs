//! Link target classification and site-relative path handling.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

/// Whether a target points outside the site.
pub fn is_external(target: &str) -> bool {
    target.starts_with("http://")
        || target.starts_with("https://")
        || target.starts_with("//")
        || target.starts_with("mailto:")
        || target.starts_with("tel:")
}

/// Whether a target should be recorded and rewritten as a site page or asset.
pub fn is_internal(target: &str) -> bool {
    !target.is_empty() && !target.starts_with('#') && !is_external(target) && !has_scheme(target)
}

fn has_scheme(target: &str) -> bool {
    target.split_once(':').is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && !scheme.contains('/')
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Split a target into its path and trailing `?query` / `#fragment` part.
pub fn split_target(target: &str) -> (&str, &str) {
    match target.find(['?', '#']) {
        Some(pos) => target.split_at(pos),
        None => (target, ""),
    }
}

/// Append `suffix` to the path part, keeping any query or fragment after it.
pub fn with_suffix(target: &str, suffix: &str) -> String {
    let (path, tail) = split_target(target);
    format!("{path}{suffix}{tail}")
}

/// Normalize a slash-separated path: drop `.` and empty segments, resolve `..`.
///
/// Segments that would climb above the root are kept as `..` so callers can
/// detect and reject them.
pub fn normalize_rel_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }
    segments.join("/")
}

/// Resolve a document-relative path against the document's directory.
///
/// A leading `/` makes the path site-root relative.
pub fn reroot(base_dir: &str, path: &str) -> String {
    if let Some(rooted) = path.strip_prefix('/') {
        return normalize_rel_path(rooted);
    }
    if base_dir.is_empty() {
        normalize_rel_path(path)
    } else {
        normalize_rel_path(&format!("{base_dir}/{path}"))
    }
}

/// External encyclopedia lookups selectable on highlight tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupTarget {
    Wikipedia,
    Baike,
}

impl LookupTarget {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "wiki" => Some(Self::Wikipedia),
            "baike" => Some(Self::Baike),
            _ => None,
        }
    }

    /// Lookup URL for a term.
    pub fn url(self, term: &str) -> String {
        let term = utf8_percent_encode(term, NON_ALPHANUMERIC);
        match self {
            Self::Wikipedia => format!("https://zh.wikipedia.org/zh-cn/{term}"),
            Self::Baike => format!("https://baike.baidu.com/item/{term}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_classification() {
        assert!(is_external("https://example.com"));
        assert!(is_external("http://example.com/a"));
        assert!(!is_internal("mailto:me@example.com"));
        assert!(!is_internal("javascript:void(0)"));
        assert!(!is_internal("#section"));
        assert!(!is_internal(""));
        assert!(is_internal("docs/page.md"));
        assert!(is_internal("../up.md#x"));
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(with_suffix("page.md", ".html"), "page.md.html");
        assert_eq!(with_suffix("page.md#intro", ".html"), "page.md.html#intro");
        assert_eq!(with_suffix("a/b.png?v=2", ".html"), "a/b.png.html?v=2");
        assert_eq!(with_suffix("page.md", ""), "page.md");
    }

    #[test]
    fn test_normalize_rel_path() {
        assert_eq!(normalize_rel_path("./a//b/../c.md"), "a/c.md");
        assert_eq!(normalize_rel_path("/abs/x"), "abs/x");
        assert_eq!(normalize_rel_path("../x"), "../x");
        assert_eq!(normalize_rel_path("a/../../x"), "../x");
    }

    #[test]
    fn test_reroot() {
        assert_eq!(reroot("", "img/a.png"), "img/a.png");
        assert_eq!(reroot("docs/guide", "../img/a.png"), "docs/img/a.png");
        assert_eq!(reroot("docs", "/top.md"), "top.md");
    }

    #[test]
    fn test_lookup_urls() {
        assert_eq!(
            LookupTarget::Wikipedia.url("Alan Turing"),
            "https://zh.wikipedia.org/zh-cn/Alan%20Turing"
        );
        assert_eq!(
            LookupTarget::from_attr("baike").map(|target| target.url("图灵")),
            Some("https://baike.baidu.com/item/%E5%9B%BE%E7%81%B5".to_owned())
        );
        assert_eq!(LookupTarget::from_attr("google"), None);
    }
}
