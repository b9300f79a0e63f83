//! MiniJinja-based template engine.

use std::collections::BTreeSet;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};

use super::{view_key, EngineOptions, TemplateEngine};
use crate::error::RenderError;

/// MiniJinja-based template engine.
///
/// Views are Jinja templates; partials are templates they pull in with
/// `{% include "name" %}`.
///
/// # Example
///
/// ```rust
/// use viewrend_render::{MiniJinjaEngine, TemplateEngine};
/// use serde_json::json;
///
/// let mut engine = MiniJinjaEngine::new();
/// engine.add_partial("greeting", "Hello, {{ name }}!").unwrap();
/// engine.add_view("index", "<p>{% include 'greeting' %}</p>").unwrap();
///
/// let output = engine.render_view("index", &json!({ "name": "World" })).unwrap();
/// assert_eq!(output, "<p>Hello, World!</p>");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
    views: BTreeSet<String>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    pub fn with_options(options: EngineOptions) -> Self {
        let mut env = Environment::new();
        if options.strict {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }
        let escape_html = options.escape_html;
        env.set_auto_escape_callback(move |_name| {
            if escape_html {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });

        Self {
            env,
            views: BTreeSet::new(),
        }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// This allows registering custom filters or functions before setup.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn name(&self) -> &'static str {
        "minijinja"
    }

    fn add_view(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(view_key(name), source.to_string())
            .map_err(|err| RenderError::parse(name, err))?;
        self.views.insert(name.to_string());
        Ok(())
    }

    fn add_partial(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())
            .map_err(|err| RenderError::parse(name, err))
    }

    fn render_view(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        if !self.views.contains(name) {
            return Err(RenderError::NotFound(name.to_string()));
        }
        let template = self
            .env
            .get_template(&view_key(name))
            .map_err(|err| RenderError::execution(name, err))?;
        template
            .render(Value::from_serialize(data))
            .map_err(|err| RenderError::execution(name, err))
    }

    fn has_view(&self, name: &str) -> bool {
        self.views.contains(name)
    }

    fn view_names(&self) -> Vec<String> {
        self.views.iter().cloned().collect()
    }
}
