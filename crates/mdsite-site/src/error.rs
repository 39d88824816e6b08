//! Error types for page generation and site builds.

use mdsite_storage::StorageError;

/// Error returned when one page cannot be generated.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Front matter, tag or tree error while parsing or rendering.
    #[error(transparent)]
    Render(#[from] mdsite_renderer::Error),
}

/// Error returned by [`SiteBuilder::build`](crate::SiteBuilder::build).
///
/// Builds are fail-fast: the first error aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Reading a source or writing an output failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A markdown page failed to parse or render.
    #[error("failed to generate {path}: {source}")]
    Page {
        path: String,
        #[source]
        source: PageError,
    },
    /// The sitemap document could not be serialized.
    #[error("failed to write sitemap: {0}")]
    Sitemap(String),
}
