//! Single page generation: markdown source in, full HTML document out.

use mdsite_config::Config;
use mdsite_renderer::{
    FrontMatter, HtmlBackend, MarkdownRenderer, RenderOptions, RenderResult, is_internal,
    parse_page, reroot, split_target, with_suffix,
};

use crate::error::PageError;
use crate::layout::{NavItem, PageData, render_page};
use crate::paths::PageUnit;
use crate::sitemap::{join_url, normalize_domain};
use crate::toc::{TOC_CSS, TOC_MAX_DEPTH, keywords_css, render_keywords, render_toc};

/// Content selectable for the left and right columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Toc,
    Keywords,
}

impl Pane {
    /// Parse a front matter pane selector. Unknown values are ignored with a warning.
    pub fn from_selector(selector: Option<&str>) -> Option<Self> {
        match selector.map(str::trim) {
            None | Some("") => None,
            Some("toc") => Some(Self::Toc),
            Some("keywords") => Some(Self::Keywords),
            Some(other) => {
                tracing::warn!(selector = other, "Unknown pane selector");
                None
            }
        }
    }
}

/// A generated page.
#[derive(Clone, Debug)]
pub struct Page {
    pub html: String,
    pub title: String,
    /// Site-relative internal references to crawl.
    pub references: Vec<String>,
}

/// Turns markdown sources into complete HTML pages.
#[derive(Clone, Debug)]
pub struct PageGenerator {
    options: RenderOptions,
    base_url: Option<String>,
}

impl PageGenerator {
    pub fn new(options: RenderOptions, domain: Option<&str>) -> Self {
        Self {
            options,
            base_url: domain.map(normalize_domain),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let options = RenderOptions {
            internal_ref_suffix: config.internal_ref_suffix.clone(),
            lazy_image_loading: config.lazy_image_loading,
            ..RenderOptions::default()
        };
        Self::new(options, config.domain())
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Generate the page for `unit` from its markdown source.
    ///
    /// Internal references (body links, images, bibliography covers, nav
    /// targets and the banner) are returned relative to the site root.
    pub fn generate(&self, unit: &PageUnit, source: &str) -> Result<Page, PageError> {
        let parsed = parse_page(source)?;
        let base_dir = parent_dir(&unit.source);
        let result = MarkdownRenderer::<HtmlBackend>::new(self.options.clone())
            .with_base_dir(base_dir)
            .render(&parsed.document)?;

        let front_matter = &parsed.front_matter;
        let mut references = result.references.clone();

        let banner = front_matter.banner().map(str::to_owned);
        if let Some(banner) = &banner {
            push_reference(&mut references, base_dir, banner);
        }

        let nav = self.nav_items(front_matter, base_dir, &mut references);

        let mut extra_css = String::new();
        let left_pane = self.render_pane(
            Pane::from_selector(front_matter.left_pane()),
            &result,
            &mut extra_css,
        );
        let right_pane = self.render_pane(
            Pane::from_selector(front_matter.right_pane()),
            &result,
            &mut extra_css,
        );

        let title = result.title.clone().unwrap_or_else(|| unit.source.clone());
        let data = PageData {
            title: title.clone(),
            canonical: self
                .base_url
                .as_deref()
                .map(|base| join_url(base, &unit.destination)),
            banner,
            nav,
            content: result.html,
            left_pane,
            right_pane,
            extra_css,
        };

        Ok(Page {
            html: render_page(&data, &self.options.palette),
            title,
            references,
        })
    }

    fn nav_items(
        &self,
        front_matter: &FrontMatter,
        base_dir: &str,
        references: &mut Vec<String>,
    ) -> Vec<NavItem> {
        front_matter
            .nav()
            .into_iter()
            .map(|link| {
                let href = if is_internal(&link.target) {
                    push_reference(references, base_dir, &link.target);
                    with_suffix(&link.target, &self.options.internal_ref_suffix)
                } else {
                    link.target
                };
                NavItem {
                    label: link.label,
                    href,
                }
            })
            .collect()
    }

    fn render_pane(&self, pane: Option<Pane>, result: &RenderResult, css: &mut String) -> String {
        match pane {
            None => String::new(),
            Some(Pane::Toc) => {
                if !css.contains(".toc {") {
                    css.push_str(TOC_CSS);
                }
                render_toc(&result.headings, TOC_MAX_DEPTH)
            }
            Some(Pane::Keywords) => {
                if !css.contains(".kws {") {
                    css.push_str(&keywords_css(&self.options.palette));
                }
                render_keywords(&result.keywords)
            }
        }
    }
}

fn push_reference(references: &mut Vec<String>, base_dir: &str, target: &str) {
    let (path, _) = split_target(target);
    if is_internal(target) && !path.is_empty() {
        references.push(reroot(base_dir, path));
    }
}

/// Directory part of a site-relative path, empty at the root.
fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn unit(source: &str, destination: &str) -> PageUnit {
        PageUnit {
            source: source.to_owned(),
            destination: destination.to_owned(),
            is_markdown: true,
        }
    }

    fn generator() -> PageGenerator {
        PageGenerator::new(RenderOptions::default(), Some("example.com"))
    }

    #[test]
    fn test_pane_selector() {
        assert_eq!(Pane::from_selector(Some("toc")), Some(Pane::Toc));
        assert_eq!(Pane::from_selector(Some(" keywords ")), Some(Pane::Keywords));
        assert_eq!(Pane::from_selector(Some("sidebar")), None);
        assert_eq!(Pane::from_selector(None), None);
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("a.md"), "");
        assert_eq!(parent_dir("docs/a.md"), "docs");
        assert_eq!(parent_dir("docs/x/a.md"), "docs/x");
    }

    #[test]
    fn test_generate_title_and_canonical() {
        let page = generator()
            .generate(&unit("docs/a.md", "docs/a.md.html"), "# Guide\n\nText")
            .unwrap();
        assert_eq!(page.title, "Guide");
        assert!(page.html.contains("<title>Guide</title>"));
        assert!(
            page.html
                .contains("<link rel=\"canonical\" href=\"https://example.com/docs/a.md.html\">")
        );
    }

    #[test]
    fn test_generate_title_falls_back_to_path() {
        let page = PageGenerator::new(RenderOptions::default(), None)
            .generate(&unit("notes.md", "notes.md.html"), "plain text")
            .unwrap();
        assert_eq!(page.title, "notes.md");
        assert!(!page.html.contains("canonical"));
    }

    #[test]
    fn test_generate_collects_references() {
        let source = "<!---\n\
                      banner: img/top.png\n\
                      nav:\n  - Home=../index.md\n  - Site=https://example.org\n  - broken\n\
                      --->\n\
                      [b](b.md#part) and ![x](pic.png)";
        let page = generator()
            .generate(&unit("docs/a.md", "docs/a.md.html"), source)
            .unwrap();
        assert_eq!(
            page.references,
            vec!["docs/b.md", "docs/pic.png", "docs/img/top.png", "index.md"]
        );
        assert!(page.html.contains(
            "<span style=\"margin-left:1em;\"><a href=\"../index.md.html\">Home</a> | \
             <a href=\"https://example.org\">Site</a></span>"
        ));
        assert!(page.html.contains("<a href=\"b.md.html#part\">b</a>"));
        assert!(page.html.contains("<img src=\"img/top.png\""));
    }

    #[test]
    fn test_generate_panes() {
        let source = "<!---\nleft_pane: keywords\nright_pane: toc\n--->\n\
                      # Top\n\n## Sub\n\n<mark name>Ada</mark>";
        let page = generator().generate(&unit("a.md", "a.md.html"), source).unwrap();
        assert!(page.html.contains("<div class=\"col-left\"><div class=\"kws\">"));
        assert!(page.html.contains("<div class=\"col-right\"><div class=\"toc\">"));
        assert!(page.html.contains(".kws {"));
        assert!(page.html.contains("position: sticky;\n  float: right;"));
        assert!(page.html.contains("<a href=\"#sub\">Sub</a>"));
    }

    #[test]
    fn test_generate_reports_front_matter_errors() {
        let err = generator()
            .generate(&unit("a.md", "a.md.html"), "<!---\nbanner: x\n")
            .unwrap_err();
        let PageError::Render(err) = err;
        assert!(matches!(err, mdsite_renderer::Error::BrokenDelimiter { .. }));
    }
}
