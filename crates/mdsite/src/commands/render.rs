//! `mdsite render` command implementation.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use mdsite_config::{CliSettings, Config};
use mdsite_site::SiteBuilder;
use mdsite_storage::{FsStorage, Storage};

use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Request path, e.g. `/` or `/docs/guide.md.html`.
    path: String,

    /// Markdown source directory containing config.yaml (default: current directory).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Path to configuration file (default: <source_dir>/config.yaml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Write the page or file for the request path to stdout.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source: Arc<dyn Storage> = Arc::new(FsStorage::new(config.build.source_dir.clone()));
        let target: Arc<dyn Storage> = Arc::new(FsStorage::new(config.build.output_dir.clone()));
        let builder = SiteBuilder::from_config(&config, source, target);

        tracing::debug!(path = %self.path, "Rendering request");
        let bytes = builder
            .render_request(&self.path)?
            .ok_or_else(|| CliError::NotFound(format!("Not found: {}", self.path)))?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&bytes)?;
        stdout.flush()?;
        Ok(())
    }
}
