//! Static site generation for mdsite.
//!
//! [`SiteBuilder`] crawls a source storage starting from the entry page and
//! the configured assets, renders every reachable markdown page into a full
//! HTML document with [`PageGenerator`] and copies everything else. The same
//! [`PathResolver`] rules back [`SiteBuilder::render_request`], so a page
//! rendered on demand matches the generated file.

mod builder;
mod error;
mod layout;
mod page;
mod paths;
mod sitemap;
mod toc;

pub use builder::{BuildReport, SiteBuilder};
pub use error::{BuildError, PageError};
pub use layout::{NavItem, PageData, render_page};
pub use page::{Page, PageGenerator, Pane};
pub use paths::{ENTRY_DESTINATION, PageUnit, PathResolver, is_markdown};
pub use sitemap::{SITEMAP_FILENAME, Sitemap, join_url, normalize_domain};
pub use toc::{TOC_CSS, TOC_MAX_DEPTH, keywords_css, render_keywords, render_toc};
