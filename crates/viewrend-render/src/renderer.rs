//! The view renderer and the host-facing renderer traits.
//!
//! [`TemplateRenderer`] ties gatherers to an engine. Setup happens once: views
//! and partials are gathered, compiled and stored in the renderer's engine.
//! After that, rendering only reads, so a set-up renderer can be shared across
//! threads.
//!
//! ```rust
//! use viewrend_gather::StaticGatherer;
//! use viewrend_render::TemplateRenderer;
//! use serde_json::json;
//!
//! let mut renderer = TemplateRenderer::new()
//!     .views(StaticGatherer::new().with_template("home", "<main>{{> nav}}{{title}}</main>"))
//!     .partials(StaticGatherer::new().with_template("nav", "<nav/>"));
//! renderer.setup().unwrap();
//!
//! let html = renderer.render_to_string("home", &json!({ "title": "Hi" })).unwrap();
//! assert_eq!(html, "<main><nav/>Hi</main>");
//! ```

use std::io::Write;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use viewrend_gather::TemplateGatherer;

use crate::engine::{HandlebarsEngine, TemplateEngine};
use crate::error::RenderError;

/// A renderer the host framework can call into.
///
/// `setup` must run before `render`; rendering an unknown name returns
/// [`RenderError::NotFound`].
pub trait Renderer: Send + Sync {
    /// Gathers and compiles all templates.
    fn setup(&mut self) -> Result<(), RenderError>;

    /// Like [`setup`](Self::setup), but panics on failure.
    ///
    /// # Panics
    ///
    /// Panics with the setup error's message.
    fn must_setup(&mut self) {
        if let Err(err) = self.setup() {
            panic!("template renderer setup failed: {err}");
        }
    }

    /// Renders the view `name` with `data` into `out`.
    fn render(&self, out: &mut dyn Write, name: &str, data: &Value) -> Result<(), RenderError>;
}

/// The render call as a web framework makes it, with a per-request context.
///
/// Every [`Renderer`] implements this for any context type. The context is
/// accepted and ignored.
pub trait FrameworkRenderer<Ctx: ?Sized> {
    fn render_with_context(
        &self,
        out: &mut dyn Write,
        name: &str,
        data: &Value,
        ctx: &Ctx,
    ) -> Result<(), RenderError>;
}

impl<R, Ctx> FrameworkRenderer<Ctx> for R
where
    R: Renderer + ?Sized,
    Ctx: ?Sized,
{
    fn render_with_context(
        &self,
        out: &mut dyn Write,
        name: &str,
        data: &Value,
        _ctx: &Ctx,
    ) -> Result<(), RenderError> {
        self.render(out, name, data)
    }
}

/// Renders views gathered at setup time through a [`TemplateEngine`].
///
/// Both gatherers are optional: a renderer without a partial gatherer simply
/// registers no partials.
///
/// # Setup Failures
///
/// The first gather or parse error stops setup and is returned. Templates
/// registered before the failure stay registered; the renderer is not rolled
/// back.
pub struct TemplateRenderer {
    engine: Box<dyn TemplateEngine>,
    views: Option<Box<dyn TemplateGatherer>>,
    partials: Option<Box<dyn TemplateGatherer>>,
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer")
            .field("engine", &self.engine.name())
            .field("views", &self.engine.view_names())
            .field("has_view_gatherer", &self.views.is_some())
            .field("has_partial_gatherer", &self.partials.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a renderer on a fresh [`HandlebarsEngine`], with no gatherers.
    pub fn new() -> Self {
        Self::with_engine(HandlebarsEngine::new())
    }

    /// Creates a renderer on the given engine, with no gatherers.
    pub fn with_engine(engine: impl TemplateEngine + 'static) -> Self {
        Self::with_boxed_engine(Box::new(engine))
    }

    pub fn with_boxed_engine(engine: Box<dyn TemplateEngine>) -> Self {
        Self {
            engine,
            views: None,
            partials: None,
        }
    }

    /// Sets the gatherer that supplies views.
    pub fn views(mut self, gatherer: impl TemplateGatherer + 'static) -> Self {
        self.views = Some(Box::new(gatherer));
        self
    }

    /// Sets the gatherer that supplies partials.
    pub fn partials(mut self, gatherer: impl TemplateGatherer + 'static) -> Self {
        self.partials = Some(Box::new(gatherer));
        self
    }

    pub fn engine(&self) -> &dyn TemplateEngine {
        self.engine.as_ref()
    }

    /// Gathers views and partials and compiles them into the engine.
    ///
    /// Views are processed before partials. Running setup again re-gathers and
    /// overwrites entries with the same name.
    pub fn setup(&mut self) -> Result<(), RenderError> {
        let mut view_count = 0;
        if let Some(gatherer) = &self.views {
            let views = gatherer.gather()?;
            debug!(count = views.len(), "compiling views");
            for view in &views {
                self.engine.add_view(&view.name, &view.content)?;
            }
            view_count = views.len();
        }

        let mut partial_count = 0;
        if let Some(gatherer) = &self.partials {
            let partials = gatherer.gather()?;
            debug!(count = partials.len(), "registering partials");
            for partial in &partials {
                self.engine.add_partial(&partial.name, &partial.content)?;
            }
            partial_count = partials.len();
        }

        info!(
            engine = self.engine.name(),
            views = view_count,
            partials = partial_count,
            "template renderer ready"
        );
        Ok(())
    }

    /// Runs [`setup`](Self::setup), panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics with the setup error's message.
    pub fn must_setup(&mut self) {
        if let Err(err) = self.setup() {
            panic!("template renderer setup failed: {err}");
        }
    }

    /// Renders the view `name` with `data` and writes the output to `out`.
    pub fn render(&self, out: &mut dyn Write, name: &str, data: &Value) -> Result<(), RenderError> {
        let output = self.engine.render_view(name, data)?;
        out.write_all(output.as_bytes())?;
        Ok(())
    }

    /// Renders the view `name` with any serializable data.
    pub fn render_to_string<T>(&self, name: &str, data: &T) -> Result<String, RenderError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_value(data)?;
        self.engine.render_view(name, &data)
    }

    /// Renders every view with no data and collects the failures.
    ///
    /// Views are tried in name order and a failure does not stop the sweep,
    /// so one call reports every view that cannot render on its own (for
    /// example one that includes a partial nobody registered). An empty result
    /// means every view rendered.
    pub fn check_renders(&self) -> Vec<RenderError> {
        let mut errors = Vec::new();
        for name in self.engine.view_names() {
            let mut sink = Vec::new();
            if let Err(err) = self.render(&mut sink, &name, &Value::Null) {
                warn!(view = %name, error = %err, "view failed to render");
                errors.push(err);
            }
        }
        errors
    }

    /// Names of all registered views, sorted.
    pub fn view_names(&self) -> Vec<String> {
        self.engine.view_names()
    }

    pub fn has_view(&self, name: &str) -> bool {
        self.engine.has_view(name)
    }
}

impl Renderer for TemplateRenderer {
    fn setup(&mut self) -> Result<(), RenderError> {
        TemplateRenderer::setup(self)
    }

    fn render(&self, out: &mut dyn Write, name: &str, data: &Value) -> Result<(), RenderError> {
        TemplateRenderer::render(self, out, name, data)
    }
}
