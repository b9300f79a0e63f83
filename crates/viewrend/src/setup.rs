//! Building renderers from a [`RendererConfig`].

use tracing::debug;
use viewrend_gather::GlobGatherer;
use viewrend_render::{RenderError, TemplateRenderer};

use crate::config::RendererConfig;

/// Builds a renderer over real-filesystem gatherers. Setup is not run.
pub fn build_renderer(config: &RendererConfig) -> TemplateRenderer {
    let engine = config.engine.create(config.engine_options());
    let views = GlobGatherer::new(config.views_config());
    debug!(engine = %config.engine, views = ?views, "building renderer");

    let renderer = TemplateRenderer::with_boxed_engine(engine).views(views);
    match config.partials_config() {
        Some(partials) => renderer.partials(GlobGatherer::new(partials)),
        None => renderer,
    }
}

/// Builds a renderer and runs setup.
pub fn load_renderer(config: &RendererConfig) -> Result<TemplateRenderer, RenderError> {
    let mut renderer = build_renderer(config);
    renderer.setup()?;
    Ok(renderer)
}
