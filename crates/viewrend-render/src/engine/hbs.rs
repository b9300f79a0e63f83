//! Handlebars-based template engine.

use std::collections::BTreeSet;

use handlebars::{no_escape, Handlebars};

use super::{view_key, EngineOptions, TemplateEngine};
use crate::error::RenderError;

/// Handlebars-based template engine.
///
/// This is the default engine. Each instance owns a `Handlebars` registry, so
/// partials registered here are visible only to views rendered by the same
/// instance.
///
/// # Example
///
/// ```rust
/// use viewrend_render::{HandlebarsEngine, TemplateEngine};
/// use serde_json::json;
///
/// let mut engine = HandlebarsEngine::new();
/// engine.add_partial("greeting", "Hello, {{name}}!").unwrap();
/// engine.add_view("index", "<p>{{> greeting}}</p>").unwrap();
///
/// let output = engine.render_view("index", &json!({ "name": "World" })).unwrap();
/// assert_eq!(output, "<p>Hello, World!</p>");
/// ```
pub struct HandlebarsEngine {
    registry: Handlebars<'static>,
    views: BTreeSet<String>,
}

impl HandlebarsEngine {
    /// Creates a lenient, HTML-escaping engine.
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    pub fn with_options(options: EngineOptions) -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(options.strict);
        if !options.escape_html {
            registry.register_escape_fn(no_escape);
        }

        Self {
            registry,
            views: BTreeSet::new(),
        }
    }

    /// Returns a reference to the underlying Handlebars registry.
    pub fn registry(&self) -> &Handlebars<'static> {
        &self.registry
    }

    /// Returns a mutable reference to the underlying Handlebars registry.
    ///
    /// This allows registering custom helpers before setup.
    pub fn registry_mut(&mut self) -> &mut Handlebars<'static> {
        &mut self.registry
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn name(&self) -> &'static str {
        "handlebars"
    }

    fn add_view(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.registry
            .register_template_string(&view_key(name), source)
            .map_err(|err| RenderError::parse(name, err))?;
        self.views.insert(name.to_string());
        Ok(())
    }

    fn add_partial(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.registry
            .register_partial(name, source)
            .map_err(|err| RenderError::parse(name, err))
    }

    fn render_view(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        if !self.views.contains(name) {
            return Err(RenderError::NotFound(name.to_string()));
        }
        self.registry
            .render(&view_key(name), data)
            .map_err(|err| RenderError::execution(name, err))
    }

    fn has_view(&self, name: &str) -> bool {
        self.views.contains(name)
    }

    fn view_names(&self) -> Vec<String> {
        self.views.iter().cloned().collect()
    }
}
