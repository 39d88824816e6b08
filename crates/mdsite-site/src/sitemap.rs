//! Sitemap generation.

use std::collections::BTreeMap;
use std::io::Cursor;

use jiff::Timestamp;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Output name of the sitemap document.
pub const SITEMAP_FILENAME: &str = "sitemap.xml";

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Prefix `https://` unless the domain already carries an http(s) scheme.
pub fn normalize_domain(domain: &str) -> String {
    let domain = domain.trim();
    if domain.starts_with("http://") || domain.starts_with("https://") {
        domain.to_owned()
    } else {
        format!("https://{domain}")
    }
}

/// Join a base URL and a site-relative path with exactly one slash.
pub fn join_url(base: &str, rel: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = rel.trim_start_matches('/');
    if rel.is_empty() {
        format!("{base}/")
    } else {
        format!("{base}/{rel}")
    }
}

/// Sitemap of the generated pages.
///
/// Entries are keyed by site-relative path, so they serialize sorted and a
/// page added twice is listed once.
#[derive(Clone, Debug)]
pub struct Sitemap {
    base: String,
    entries: BTreeMap<String, Timestamp>,
}

impl Sitemap {
    pub fn new(domain: &str) -> Self {
        Self {
            base: normalize_domain(domain),
            entries: BTreeMap::new(),
        }
    }

    /// Record a page. Leading slashes are stripped from `rel`.
    pub fn add(&mut self, rel: &str, modified: Timestamp) {
        self.entries
            .insert(rel.trim_start_matches('/').to_owned(), modified);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Absolute URLs in output order.
    pub fn locations(&self) -> Vec<String> {
        self.entries
            .keys()
            .map(|rel| join_url(&self.base, rel))
            .collect()
    }

    /// Serialize the sitemap document.
    pub fn to_xml(&self) -> Result<String, quick_xml::Error> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
        ))?;
        for (rel, modified) in &self.entries {
            let loc = join_url(&self.base, rel);
            let lastmod = modified.strftime("%Y-%m-%dT%H:%M:%SZ").to_string();
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            write_text_element(&mut writer, "loc", &loc)?;
            write_text_element(&mut writer, "lastmod", &lastmod)?;
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn write_text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
