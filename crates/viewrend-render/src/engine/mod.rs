//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait which lets the renderer
//! work with different template backends. The default implementation is
//! [`HandlebarsEngine`]; [`MiniJinjaEngine`] is available for Jinja syntax.
//!
//! Every engine instance owns its own registry. Views and partials are kept in
//! separate namespaces: registering a partial never replaces a view of the
//! same name, and a view cannot be pulled in as a partial.

mod hbs;
mod jinja;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

pub use hbs::HandlebarsEngine;
pub use jinja::MiniJinjaEngine;

/// Registry key prefix that keeps view names apart from partial names.
const VIEW_NAMESPACE: &str = "@views/";

pub(crate) fn view_key(name: &str) -> String {
    format!("{VIEW_NAMESPACE}{name}")
}

/// A template engine that compiles views and partials and renders views.
///
/// Engines handle:
/// - Template compilation and storage
/// - Partial (include) resolution
/// - Variable substitution and template logic
pub trait TemplateEngine: Send + Sync {
    /// Short engine identifier, e.g. `"handlebars"`.
    fn name(&self) -> &'static str;

    /// Compiles `source` and stores it as a view named `name`.
    ///
    /// Re-adding a name replaces the earlier view.
    fn add_view(&mut self, name: &str, source: &str) -> Result<(), RenderError>;

    /// Compiles `source` and registers it as a partial named `name`.
    fn add_partial(&mut self, name: &str, source: &str) -> Result<(), RenderError>;

    /// Renders a previously added view.
    ///
    /// Returns [`RenderError::NotFound`] if no view has that name.
    fn render_view(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError>;

    /// Checks if a view with the given name exists.
    fn has_view(&self, name: &str) -> bool;

    /// Names of all registered views, sorted.
    fn view_names(&self) -> Vec<String>;
}

/// Behavior switches shared by the bundled engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Fail on references to missing fields instead of rendering nothing.
    pub strict: bool,
    /// HTML-escape interpolated values.
    pub escape_html: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strict: false,
            escape_html: true,
        }
    }
}

/// The bundled engines, selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Handlebars,
    MiniJinja,
}

impl EngineKind {
    /// Creates an engine of this kind.
    pub fn create(self, options: EngineOptions) -> Box<dyn TemplateEngine> {
        match self {
            EngineKind::Handlebars => Box::new(HandlebarsEngine::with_options(options)),
            EngineKind::MiniJinja => Box::new(MiniJinjaEngine::with_options(options)),
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Handlebars => write!(f, "handlebars"),
            EngineKind::MiniJinja => write!(f, "minijinja"),
        }
    }
}

impl std::str::FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "handlebars" | "hbs" => Ok(EngineKind::Handlebars),
            "minijinja" | "jinja" => Ok(EngineKind::MiniJinja),
            other => Err(format!(
                "unknown engine \"{other}\" (expected handlebars or minijinja)"
            )),
        }
    }
}
