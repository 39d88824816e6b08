//! `mdsite generate` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use mdsite_config::{CliSettings, Config};
use mdsite_site::SiteBuilder;
use mdsite_storage::{FsStorage, Storage};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Markdown source directory containing config.yaml (default: current directory).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (default: public).
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: <source_dir>/config.yaml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Regenerate every file even when the output is up to date.
    #[arg(long)]
    force: bool,

    /// Disable incremental builds.
    #[arg(long)]
    no_incremental: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateArgs {
    /// Execute the generate command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            force: self.force.then_some(true),
            incremental: self.no_incremental.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!("Source: {}", config.build.source_dir.display()));
        output.info(&format!("Output: {}", config.build.output_dir.display()));

        std::fs::create_dir_all(&config.build.output_dir)?;
        let source: Arc<dyn Storage> = Arc::new(FsStorage::new(config.build.source_dir.clone()));
        let target: Arc<dyn Storage> = Arc::new(FsStorage::new(config.build.output_dir.clone()));

        let report = SiteBuilder::from_config(&config, source, target).build()?;
        tracing::debug!(?report, "Build report");

        if !report.skipped.is_empty() {
            output.detail(&format!("Up to date: {} file(s)", report.skipped.len()));
        }
        if report.sitemap_written {
            output.detail("Sitemap written");
        }
        output.success(&format!(
            "Generated {} page(s), copied {} file(s)",
            report.rendered.len(),
            report.copied.len()
        ));
        Ok(())
    }
}
