//! Breadth-first crawl that builds the whole site.
//!
//! The queue starts with the entry page and the declared assets. Rendering a
//! markdown page yields its internal references, which are queued in turn,
//! so only reachable files end up in the output.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::SystemTime;

use jiff::Timestamp;
use mdsite_config::Config;
use mdsite_storage::Storage;

use crate::error::BuildError;
use crate::page::{Page, PageGenerator};
use crate::paths::{PageUnit, PathResolver};
use crate::sitemap::{SITEMAP_FILENAME, Sitemap};

/// Outcome of a build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Destinations of pages written this run.
    pub rendered: Vec<String>,
    /// Destinations of files copied verbatim this run.
    pub copied: Vec<String>,
    /// Destinations left alone because they were up to date.
    pub skipped: Vec<String>,
    pub sitemap_written: bool,
}

/// Builds a static site from a source storage into an output storage.
pub struct SiteBuilder {
    source: Arc<dyn Storage>,
    output: Arc<dyn Storage>,
    resolver: PathResolver,
    generator: PageGenerator,
    sitemap_domain: Option<String>,
    force: bool,
    incremental: bool,
}

/// Mutable state of one build run.
#[derive(Default)]
struct BuildRun {
    queue: VecDeque<String>,
    visited: HashSet<String>,
    created_dirs: HashSet<String>,
    sitemap: Option<Sitemap>,
    report: BuildReport,
}

impl SiteBuilder {
    pub fn new(
        resolver: PathResolver,
        generator: PageGenerator,
        source: Arc<dyn Storage>,
        output: Arc<dyn Storage>,
    ) -> Self {
        Self {
            source,
            output,
            resolver,
            generator,
            sitemap_domain: None,
            force: false,
            incremental: true,
        }
    }

    /// Create a builder from the site configuration, including its build settings.
    pub fn from_config(config: &Config, source: Arc<dyn Storage>, output: Arc<dyn Storage>) -> Self {
        let sitemap_domain = config
            .sitemap_enabled()
            .then(|| config.domain().map(str::to_owned))
            .flatten();
        Self {
            sitemap_domain,
            force: config.build.force,
            incremental: config.build.incremental,
            ..Self::new(
                PathResolver::from_config(config),
                PageGenerator::from_config(config),
                source,
                output,
            )
        }
    }

    /// Write `sitemap.xml` for this domain after the crawl.
    #[must_use]
    pub fn with_sitemap(mut self, domain: impl Into<String>) -> Self {
        self.sitemap_domain = Some(domain.into());
        self
    }

    /// Regenerate every destination even when it is up to date.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Skip destinations that are not older than their source.
    #[must_use]
    pub fn with_incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Run the crawl. The first error aborts the build.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let mut run = BuildRun {
            queue: self.resolver.seeds().into(),
            sitemap: self.sitemap_domain.as_deref().map(Sitemap::new),
            ..BuildRun::default()
        };

        while let Some(path) = run.queue.pop_front() {
            let unit = self.resolver.unit(&path);
            if !run.visited.insert(unit.destination.clone()) {
                continue;
            }
            self.process(&unit, &mut run)?;
        }

        if let Some(sitemap) = run.sitemap.take() {
            run.report.sitemap_written = self.write_sitemap(&sitemap)?;
        }

        tracing::info!(
            rendered = run.report.rendered.len(),
            copied = run.report.copied.len(),
            skipped = run.report.skipped.len(),
            sitemap = run.report.sitemap_written,
            "Build complete"
        );
        Ok(run.report)
    }

    fn process(&self, unit: &PageUnit, run: &mut BuildRun) -> Result<(), BuildError> {
        tracing::debug!(source = %unit.source, destination = %unit.destination, "Processing");

        let source_mtime = self.source.mtime(&unit.source)?;
        if unit.is_markdown
            && let Some(sitemap) = run.sitemap.as_mut()
        {
            sitemap.add(&unit.destination, to_timestamp(source_mtime));
        }

        let up_to_date = self.is_up_to_date(unit, source_mtime)?;
        if up_to_date {
            tracing::debug!(destination = %unit.destination, "Up to date");
            run.report.skipped.push(unit.destination.clone());
            if unit.is_markdown {
                // Links of an unchanged page may still lead to changed pages.
                let source = self.source.read_to_string(&unit.source)?;
                let page = self.generate(unit, &source)?;
                enqueue(&mut run.queue, page.references);
            }
            return Ok(());
        }

        self.ensure_parent_dir(&unit.destination, &mut run.created_dirs)?;

        if unit.is_markdown {
            let source = self.source.read_to_string(&unit.source)?;
            let page = self.generate(unit, &source)?;
            enqueue(&mut run.queue, page.references);
            self.output.write(&unit.destination, page.html.as_bytes())?;
            tracing::info!(destination = %unit.destination, title = %page.title, "Rendered page");
            run.report.rendered.push(unit.destination.clone());
        } else {
            let bytes = self.source.read(&unit.source)?;
            self.output.write(&unit.destination, &bytes)?;
            tracing::info!(destination = %unit.destination, "Copied file");
            run.report.copied.push(unit.destination.clone());
        }
        Ok(())
    }

    fn generate(&self, unit: &PageUnit, source: &str) -> Result<Page, BuildError> {
        self.generator
            .generate(unit, source)
            .map_err(|source| BuildError::Page {
                path: unit.source.clone(),
                source,
            })
    }

    fn is_up_to_date(&self, unit: &PageUnit, source_mtime: SystemTime) -> Result<bool, BuildError> {
        if self.force || !self.incremental || !self.output.exists(&unit.destination) {
            return Ok(false);
        }
        Ok(self.output.mtime(&unit.destination)? >= source_mtime)
    }

    fn ensure_parent_dir(
        &self,
        destination: &str,
        created: &mut HashSet<String>,
    ) -> Result<(), BuildError> {
        let Some((parent, _)) = destination.rsplit_once('/') else {
            return Ok(());
        };
        if created.insert(parent.to_owned()) {
            self.output.create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write the sitemap unless an identical one is already in place.
    fn write_sitemap(&self, sitemap: &Sitemap) -> Result<bool, BuildError> {
        let xml = sitemap
            .to_xml()
            .map_err(|e| BuildError::Sitemap(e.to_string()))?;
        if !self.force
            && self
                .output
                .read(SITEMAP_FILENAME)
                .is_ok_and(|existing| existing == xml.as_bytes())
        {
            return Ok(false);
        }
        self.output.write(SITEMAP_FILENAME, xml.as_bytes())?;
        tracing::info!(entries = sitemap.len(), "Wrote sitemap");
        Ok(true)
    }

    /// Render what the build would write for a request path.
    ///
    /// Returns `None` for rejected paths. Pages are generated fresh, ignoring
    /// the output storage.
    pub fn render_request(&self, url_path: &str) -> Result<Option<Vec<u8>>, BuildError> {
        let Some(unit) = self.resolver.resolve_request(url_path) else {
            return Ok(None);
        };
        if unit.is_markdown {
            let source = self.source.read_to_string(&unit.source)?;
            Ok(Some(self.generate(&unit, &source)?.html.into_bytes()))
        } else {
            Ok(Some(self.source.read(&unit.source)?))
        }
    }
}

/// Queue references that stay inside the site root.
fn enqueue(queue: &mut VecDeque<String>, references: Vec<String>) {
    for reference in references {
        if reference.is_empty() || reference == ".." || reference.starts_with("../") {
            tracing::warn!(reference = %reference, "Skipping reference outside the site root");
            continue;
        }
        queue.push_back(reference);
    }
}

fn to_timestamp(time: SystemTime) -> Timestamp {
    Timestamp::try_from(time).unwrap_or_else(|_| Timestamp::now())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use mdsite_renderer::RenderOptions;
    use mdsite_storage::{MockStorage, StorageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn builder(source: &Arc<MockStorage>, output: &Arc<MockStorage>) -> SiteBuilder {
        let assets = BTreeMap::from([("static/site.css".to_owned(), "site.css".to_owned())]);
        SiteBuilder::new(
            PathResolver::new("README.md", &assets, ".html"),
            PageGenerator::new(RenderOptions::default(), Some("example.com")),
            Arc::clone(source) as Arc<dyn Storage>,
            Arc::clone(output) as Arc<dyn Storage>,
        )
    }

    fn two_page_site() -> Arc<MockStorage> {
        Arc::new(
            MockStorage::new()
                .with_file_at("README.md", "# Home\n\nSee [B](docs/b.md).", 1)
                .with_file_at("docs/b.md", "# B\n\n![logo](img/logo.png) [home](../README.md)", 1)
                .with_file_at("docs/img/logo.png", b"PNG".to_vec(), 1)
                .with_file_at("static/site.css", "body {}", 1)
                .with_file_at("unlinked.md", "# Nobody links here", 1),
        )
    }

    #[test]
    fn test_build_two_page_site() {
        let source = two_page_site();
        let output = Arc::new(MockStorage::new());

        let report = builder(&source, &output).build().unwrap();

        assert_eq!(report.rendered, strings(&["index.html", "docs/b.md.html"]));
        assert_eq!(report.copied, strings(&["site.css", "docs/img/logo.png"]));
        assert!(report.skipped.is_empty());
        assert!(!report.sitemap_written);

        let index = output.file("index.html").unwrap();
        assert!(index.contains("<a href=\"docs/b.md.html\">B</a>"));
        assert!(index.contains("<title>Home</title>"));
        assert_eq!(output.file("site.css").as_deref(), Some("body {}"));
        assert_eq!(output.file("docs/img/logo.png").as_deref(), Some("PNG"));
        assert_eq!(output.file("unlinked.md.html"), None);
        assert_eq!(output.created_dirs(), strings(&["docs", "docs/img"]));
    }

    #[test]
    fn test_build_processes_each_destination_once() {
        let source = Arc::new(
            MockStorage::new()
                .with_file_at("README.md", "[a](a.md) [a again](./a.md) [b](b.md)", 1)
                .with_file_at("a.md", "[b](b.md) [home](README.md)", 1)
                .with_file_at("b.md", "[a](a.md)", 1)
                .with_file_at("static/site.css", "", 1),
        );
        let output = Arc::new(MockStorage::new());

        let report = builder(&source, &output).build().unwrap();

        assert_eq!(report.rendered, strings(&["index.html", "a.md.html", "b.md.html"]));
        assert_eq!(output.write_count(), 4);
    }

    #[test]
    fn test_second_build_writes_nothing() {
        let source = two_page_site();
        let output = Arc::new(MockStorage::new());
        let builder = builder(&source, &output).with_sitemap("example.com");

        builder.build().unwrap();
        let writes = output.write_count();

        let report = builder.build().unwrap();
        assert_eq!(output.write_count(), writes);
        assert!(report.rendered.is_empty());
        assert!(report.copied.is_empty());
        assert!(!report.sitemap_written);
        assert_eq!(
            report.skipped,
            strings(&["index.html", "site.css", "docs/b.md.html", "docs/img/logo.png"])
        );
    }

    #[test]
    fn test_force_rebuilds_everything() {
        let source = two_page_site();
        let output = Arc::new(MockStorage::new());

        builder(&source, &output).build().unwrap();
        let report = builder(&source, &output).with_force(true).build().unwrap();

        assert_eq!(report.rendered.len(), 2);
        assert_eq!(report.copied.len(), 2);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_changed_page_behind_unchanged_page_is_rebuilt() {
        let output = Arc::new(MockStorage::new());
        builder(&two_page_site(), &output).build().unwrap();

        let changed = Arc::new(
            MockStorage::new()
                .with_file_at("README.md", "# Home\n\nSee [B](docs/b.md).", 1)
                .with_file_at("docs/b.md", "# B changed", 1_000)
                .with_file_at("docs/img/logo.png", b"PNG".to_vec(), 1)
                .with_file_at("static/site.css", "body {}", 1),
        );
        let report = builder(&changed, &output).build().unwrap();

        assert_eq!(report.rendered, strings(&["docs/b.md.html"]));
        assert!(output.file("docs/b.md.html").unwrap().contains("B changed"));
        // The new version no longer references the logo.
        assert_eq!(report.skipped, strings(&["index.html", "site.css"]));
    }

    #[test]
    fn test_build_writes_sorted_sitemap() {
        let source = two_page_site();
        let output = Arc::new(MockStorage::new());

        let report = builder(&source, &output)
            .with_sitemap("example.com")
            .build()
            .unwrap();

        assert!(report.sitemap_written);
        let xml = output.file(SITEMAP_FILENAME).unwrap();
        let b = xml.find("<loc>https://example.com/docs/b.md.html</loc>").unwrap();
        let index = xml.find("<loc>https://example.com/index.html</loc>").unwrap();
        assert!(b < index);
        assert!(xml.contains("<lastmod>1970-01-01T00:00:01Z</lastmod>"));
        assert!(!xml.contains("site.css"));
    }

    #[test]
    fn test_asset_markdown_is_copied_raw() {
        let assets = BTreeMap::from([("notes/raw.md".to_owned(), "raw.md".to_owned())]);
        let source = Arc::new(
            MockStorage::new()
                .with_file_at("README.md", "# Home", 1)
                .with_file_at("notes/raw.md", "# Raw [x](x.md)", 1),
        );
        let output = Arc::new(MockStorage::new());
        let builder = SiteBuilder::new(
            PathResolver::new("README.md", &assets, ".html"),
            PageGenerator::new(RenderOptions::default(), None),
            Arc::clone(&source) as Arc<dyn Storage>,
            Arc::clone(&output) as Arc<dyn Storage>,
        );

        let report = builder.build().unwrap();
        assert_eq!(report.copied, strings(&["raw.md"]));
        assert_eq!(output.file("raw.md").as_deref(), Some("# Raw [x](x.md)"));
    }

    #[test]
    fn test_missing_reference_aborts_build() {
        let source = Arc::new(
            MockStorage::new()
                .with_file_at("README.md", "[gone](gone.md)", 1)
                .with_file_at("static/site.css", "", 1),
        );
        let output = Arc::new(MockStorage::new());

        let err = builder(&source, &output).build().unwrap_err();
        match err {
            BuildError::Storage(err) => assert_eq!(err.kind, StorageErrorKind::NotFound),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_broken_front_matter_aborts_build() {
        let source = Arc::new(
            MockStorage::new()
                .with_file_at("README.md", "<!---\nbanner: x.png\n", 1)
                .with_file_at("static/site.css", "", 1),
        );
        let output = Arc::new(MockStorage::new());

        let err = builder(&source, &output).build().unwrap_err();
        assert!(matches!(err, BuildError::Page { ref path, .. } if path == "README.md"));
        assert_eq!(output.write_count(), 0);
    }

    #[test]
    fn test_references_outside_root_are_skipped() {
        let source = Arc::new(
            MockStorage::new()
                .with_file_at("README.md", "[up](../outside.md)", 1)
                .with_file_at("static/site.css", "", 1),
        );
        let output = Arc::new(MockStorage::new());

        let report = builder(&source, &output).build().unwrap();
        assert_eq!(report.rendered, strings(&["index.html"]));
    }

    #[test]
    fn test_render_request_matches_build_output() {
        let source = two_page_site();
        let output = Arc::new(MockStorage::new());
        let builder = builder(&source, &output);
        builder.build().unwrap();

        for (request, destination) in [
            ("/", "index.html"),
            ("/docs/b.md.html", "docs/b.md.html"),
            ("/docs/b.html", "docs/b.md.html"),
            ("/site.css", "site.css"),
            ("/docs/img/logo.png", "docs/img/logo.png"),
        ] {
            let rendered = builder.render_request(request).unwrap().unwrap();
            assert_eq!(
                String::from_utf8(rendered).unwrap(),
                output.file(destination).unwrap(),
                "request {request}"
            );
        }
        assert_eq!(builder.render_request("/../secret.md").unwrap(), None);
        assert_eq!(builder.render_request("/.hidden").unwrap(), None);
    }
}
