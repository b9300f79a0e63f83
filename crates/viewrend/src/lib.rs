//! # Viewrend - Directory-Driven View Rendering
//!
//! `viewrend` wires the gathering and rendering crates together behind a YAML
//! configuration, and ships the `viewrend` command-line tool.
//!
//! - [`viewrend_gather`]: collects template sources with glob patterns
//! - [`viewrend_render`]: compiles them into a renderer
//! - [`RendererConfig`]: which directories, extensions and engine to use
//! - [`load_renderer`]: config in, ready renderer out
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use viewrend::{load_renderer, RendererConfig};
//! use serde_json::json;
//!
//! let config = RendererConfig::from_file("viewrend.yaml")?;
//! let renderer = load_renderer(&config)?;
//!
//! let html = renderer.render_to_string("users/show", &json!({ "name": "Ada" }))?;
//! println!("{html}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
mod setup;

pub use config::{ConfigError, RendererConfig, TemplateSource};
pub use setup::{build_renderer, load_renderer};

pub use viewrend_gather::{
    GatherError, GlobGatherer, GlobGathererConfig, RawTemplate, StaticGatherer, TemplateGatherer,
};
pub use viewrend_render::{
    EngineKind, EngineOptions, FrameworkRenderer, RenderError, Renderer, TemplateRenderer,
};
