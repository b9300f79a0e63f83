//! Renderer configuration loaded from YAML.
//!
//! ```yaml
//! engine: handlebars
//! strict: false
//! escape_html: true
//! views:
//!   dir: templates/views
//!   include_dir_in_key: false
//!   extensions: [".hbs", ".html"]
//! partials:
//!   dir: templates/partials
//!   extensions: [".hbs"]
//! ```
//!
//! Every key is optional. Unknown keys are rejected so a misspelled key is an
//! error rather than a silent default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use viewrend_gather::{GlobGathererConfig, DEFAULT_TEMPLATE_DIR};
use viewrend_render::{EngineKind, EngineOptions};

/// Directory used for partials when the `partials` section omits `dir`.
pub const DEFAULT_PARTIALS_DIR: &str = "templates/partials";

/// Config file the CLI picks up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "viewrend.yaml";

/// Error loading a [`RendererConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid renderer config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

fn default_extensions() -> Vec<String> {
    vec![".hbs".to_string(), ".html".to_string()]
}

/// Where a gatherer looks and what it picks up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateSource {
    /// Directory to search. Unset means the section's default directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Keep the directory in front of each template name.
    #[serde(default)]
    pub include_dir_in_key: bool,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self {
            dir: None,
            include_dir_in_key: false,
            extensions: default_extensions(),
        }
    }
}

impl TemplateSource {
    pub fn in_dir(dir: impl Into<String>) -> Self {
        Self {
            dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// The directory this source reads, falling back to `default_dir`.
    pub fn dir_or<'a>(&'a self, default_dir: &'a str) -> &'a str {
        self.dir.as_deref().unwrap_or(default_dir)
    }

    /// The gatherer configuration for this source.
    pub fn gatherer_config(&self, default_dir: &str) -> GlobGathererConfig {
        GlobGathererConfig::new(self.dir_or(default_dir))
            .extensions(self.extensions.iter().cloned())
            .include_tld_in_key(self.include_dir_in_key)
    }
}

/// Full renderer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    pub engine: EngineKind,
    pub strict: bool,
    pub escape_html: bool,
    pub views: TemplateSource,
    /// Omitted means the renderer registers no partials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partials: Option<TemplateSource>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        let options = EngineOptions::default();
        Self {
            engine: EngineKind::default(),
            strict: options.strict,
            escape_html: options.escape_html,
            views: TemplateSource::default(),
            partials: None,
        }
    }
}

impl RendererConfig {
    /// Parses a config from YAML text. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            strict: self.strict,
            escape_html: self.escape_html,
        }
    }

    pub fn views_config(&self) -> GlobGathererConfig {
        self.views.gatherer_config(DEFAULT_TEMPLATE_DIR)
    }

    /// `None` when no partials section is configured.
    pub fn partials_config(&self) -> Option<GlobGathererConfig> {
        self.partials
            .as_ref()
            .map(|source| source.gatherer_config(DEFAULT_PARTIALS_DIR))
    }
}
