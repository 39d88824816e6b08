//! Mapping between source paths, output paths and request paths.
//!
//! The same rules serve the build pipeline and the `render` command, so a
//! page rendered on demand is byte-identical to the generated file.

use std::collections::BTreeMap;

use mdsite_config::Config;
use mdsite_renderer::{normalize_rel_path, split_target};

/// Output name of the entry page.
pub const ENTRY_DESTINATION: &str = "index.html";

const MARKDOWN_SUFFIX: &str = ".md";

/// One file of the site: where it is read from and written to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageUnit {
    /// Source path relative to the source root.
    pub source: String,
    /// Output path relative to the output root.
    pub destination: String,
    /// Rendered as a page rather than copied.
    pub is_markdown: bool,
}

/// Whether a path names a markdown source.
pub fn is_markdown(path: &str) -> bool {
    path.ends_with(MARKDOWN_SUFFIX)
}

/// Resolves site paths for pages and assets.
#[derive(Clone, Debug)]
pub struct PathResolver {
    entry: String,
    assets: BTreeMap<String, String>,
    page_suffix: String,
}

impl PathResolver {
    pub fn new(
        entry: &str,
        assets: &BTreeMap<String, String>,
        page_suffix: impl Into<String>,
    ) -> Self {
        Self {
            entry: normalize_rel_path(entry),
            assets: assets
                .iter()
                .map(|(source, destination)| {
                    (normalize_rel_path(source), normalize_rel_path(destination))
                })
                .collect(),
            page_suffix: page_suffix.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.entry, &config.assets, config.internal_ref_suffix.as_str())
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Initial crawl queue: the entry page followed by every declared asset.
    pub fn seeds(&self) -> Vec<String> {
        std::iter::once(self.entry.clone())
            .chain(self.assets.keys().cloned())
            .collect()
    }

    /// Map a source-relative path to its unit.
    ///
    /// The entry always becomes [`ENTRY_DESTINATION`]; a declared asset is
    /// copied to its configured name even if it looks like markdown; other
    /// markdown sources get the page suffix appended.
    pub fn unit(&self, rel: &str) -> PageUnit {
        let source = normalize_rel_path(rel);
        if source == self.entry {
            return PageUnit {
                is_markdown: is_markdown(&source),
                destination: ENTRY_DESTINATION.to_owned(),
                source,
            };
        }
        if let Some(destination) = self.assets.get(&source) {
            return PageUnit {
                destination: destination.clone(),
                source,
                is_markdown: false,
            };
        }
        if is_markdown(&source) {
            PageUnit {
                destination: format!("{source}{}", self.page_suffix),
                source,
                is_markdown: true,
            }
        } else {
            PageUnit {
                destination: source.clone(),
                source,
                is_markdown: false,
            }
        }
    }

    /// Map a request path from the serving surface to its unit.
    ///
    /// Returns `None` for paths that climb out of the root or touch hidden
    /// (`.`-prefixed) files or directories.
    pub fn resolve_request(&self, url_path: &str) -> Option<PageUnit> {
        let (path, _) = split_target(url_path);
        let path = path.trim_start_matches('/');

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.iter().any(|segment| segment.starts_with('.')) {
            return None;
        }
        let path = segments.join("/");

        if path.is_empty() || path == ENTRY_DESTINATION {
            return Some(self.unit(&self.entry));
        }

        if let Some((source, destination)) = self
            .assets
            .iter()
            .find(|(_, destination)| **destination == path)
        {
            return Some(PageUnit {
                source: source.clone(),
                destination: destination.clone(),
                is_markdown: false,
            });
        }

        if !self.page_suffix.is_empty()
            && let Some(stem) = path.strip_suffix(self.page_suffix.as_str())
        {
            let source = if is_markdown(stem) {
                stem.to_owned()
            } else {
                format!("{stem}{MARKDOWN_SUFFIX}")
            };
            return Some(self.unit(&source));
        }

        Some(self.unit(&path))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn resolver() -> PathResolver {
        let assets = BTreeMap::from([
            ("static/logo.png".to_owned(), "logo.png".to_owned()),
            ("notes/raw.md".to_owned(), "raw.md".to_owned()),
        ]);
        PathResolver::new("README.md", &assets, ".html")
    }

    fn unit(source: &str, destination: &str, is_markdown: bool) -> PageUnit {
        PageUnit {
            source: source.to_owned(),
            destination: destination.to_owned(),
            is_markdown,
        }
    }

    #[test]
    fn test_unit_mapping() {
        let resolver = resolver();
        assert_eq!(resolver.unit("README.md"), unit("README.md", "index.html", true));
        assert_eq!(resolver.unit("./README.md"), unit("README.md", "index.html", true));
        assert_eq!(resolver.unit("docs/a.md"), unit("docs/a.md", "docs/a.md.html", true));
        assert_eq!(resolver.unit("img/x.png"), unit("img/x.png", "img/x.png", false));
        assert_eq!(resolver.unit("static/logo.png"), unit("static/logo.png", "logo.png", false));
        assert_eq!(resolver.unit("notes/raw.md"), unit("notes/raw.md", "raw.md", false));
    }

    #[test]
    fn test_seeds() {
        assert_eq!(
            resolver().seeds(),
            vec!["README.md", "notes/raw.md", "static/logo.png"]
        );
    }

    #[test]
    fn test_resolve_request() {
        let resolver = resolver();
        let entry = unit("README.md", "index.html", true);
        assert_eq!(resolver.resolve_request(""), Some(entry.clone()));
        assert_eq!(resolver.resolve_request("/"), Some(entry.clone()));
        assert_eq!(resolver.resolve_request("/index.html"), Some(entry));
        assert_eq!(
            resolver.resolve_request("/docs/a.md.html"),
            Some(unit("docs/a.md", "docs/a.md.html", true))
        );
        assert_eq!(
            resolver.resolve_request("/docs/a.html?x=1"),
            Some(unit("docs/a.md", "docs/a.md.html", true))
        );
        assert_eq!(
            resolver.resolve_request("/docs/a.md"),
            Some(unit("docs/a.md", "docs/a.md.html", true))
        );
        assert_eq!(
            resolver.resolve_request("/logo.png"),
            Some(unit("static/logo.png", "logo.png", false))
        );
        assert_eq!(
            resolver.resolve_request("/img/x.png"),
            Some(unit("img/x.png", "img/x.png", false))
        );
    }

    #[test]
    fn test_resolve_request_rejects_hidden_and_escaping() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_request("/../etc/passwd"), None);
        assert_eq!(resolver.resolve_request("/docs/../../x.md"), None);
        assert_eq!(resolver.resolve_request("/.git/config"), None);
        assert_eq!(resolver.resolve_request("/docs/.secret.md"), None);
    }
}
