//! Site configuration for mdsite.
//!
//! Parses `config.yaml` from the source directory with serde. CLI settings are
//! applied during load via [`CliSettings`].
//!
//! ```yaml
//! domain: example.com
//! enable_sitemap: true
//! entry: README.md
//! assets:
//!   static/logo.png: logo.png
//!   favicon.ico: favicon.ico
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename looked up in the source directory.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Regenerate every page even when the output is up to date.
    pub force: Option<bool>,
    /// Skip pages whose output is newer than the source.
    pub incremental: Option<bool>,
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site domain for canonical links and the sitemap.
    pub domain: Option<String>,
    /// Write `sitemap.xml` (requires `domain`).
    pub enable_sitemap: bool,
    /// Entry page relative to the source directory; rendered as `index.html`.
    pub entry: String,
    /// Source path -> destination name for files copied verbatim.
    pub assets: BTreeMap<String, String>,
    /// Suffix appended to internal link targets.
    pub internal_ref_suffix: String,
    /// Add `loading="lazy"` to images.
    pub lazy_image_loading: bool,

    /// Build settings (set after loading).
    #[serde(skip)]
    pub build: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: None,
            enable_sitemap: false,
            entry: String::new(),
            assets: BTreeMap::new(),
            internal_ref_suffix: ".html".to_owned(),
            lazy_image_loading: true,
            build: BuildConfig::default(),
            config_path: None,
        }
    }
}

/// Directories and flags for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Directory holding markdown sources, assets and `config.yaml`.
    pub source_dir: PathBuf,
    /// Directory receiving generated output.
    pub output_dir: PathBuf,
    pub force: bool,
    pub incremental: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            output_dir: PathBuf::from("public"),
            force: false,
            incremental: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise reads
    /// `config.yaml` from the source directory (CLI override or `.`).
    ///
    /// CLI settings are applied before validation, so the entry page is
    /// checked against the effective source directory.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, parsing fails or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let source_dir = cli_settings
            .and_then(|settings| settings.source_dir.clone())
            .unwrap_or_else(|| BuildConfig::default().source_dir);
        let path = config_path.map_or_else(|| source_dir.join(CONFIG_FILENAME), Path::to_path_buf);
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        let content = std::fs::read_to_string(&path)?;
        let mut config = Self::from_yaml(&content)?;
        config.build.source_dir = source_dir;
        config.config_path = Some(path);

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML without touching the filesystem.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.build.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build.output_dir.clone_from(output_dir);
        }
        if let Some(force) = settings.force {
            self.build.force = force;
        }
        if let Some(incremental) = settings.incremental {
            self.build.incremental = incremental;
        }
    }

    /// Domain, if set and non-blank.
    pub fn domain(&self) -> Option<&str> {
        self.domain
            .as_deref()
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
    }

    /// Whether a sitemap should be written.
    pub fn sitemap_enabled(&self) -> bool {
        self.enable_sitemap && self.domain().is_some()
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the entry page is missing or
    /// an asset has no destination name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.entry, "entry")?;
        if !self.build.source_dir.join(&self.entry).is_file() {
            return Err(ConfigError::Validation(format!(
                "entry page {} does not exist in {}",
                self.entry,
                self.build.source_dir.display()
            )));
        }
        for (source, destination) in &self.assets {
            require_non_empty(source, "assets key")?;
            require_non_empty(destination, &format!("assets.{source}"))?;
        }
        Ok(())
    }
}
