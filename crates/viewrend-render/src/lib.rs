//! # Viewrend Render - Views and Partials over Handlebars
//!
//! `viewrend-render` turns gathered template sources into a renderer a web
//! framework can call. Templates are collected by a
//! [`TemplateGatherer`](viewrend_gather::TemplateGatherer) at setup time,
//! compiled once, and rendered by name afterwards.
//!
//! ## Core Concepts
//!
//! - [`TemplateRenderer`]: Holds a views gatherer, a partials gatherer and an engine
//! - [`TemplateEngine`]: The compile/render backend ([`HandlebarsEngine`] by default)
//! - [`Renderer`]: The setup + render contract a host framework depends on
//! - [`FrameworkRenderer`]: The same render call with a per-request context
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use viewrend_gather::{GlobGatherer, GlobGathererConfig, MemoryFileAccess};
//! use viewrend_render::TemplateRenderer;
//! use serde_json::json;
//!
//! let fs = Arc::new(
//!     MemoryFileAccess::new()
//!         .with_file("templates/views/users/show.hbs", "{{> header}}<p>{{name}}</p>")
//!         .with_file("templates/partials/header.hbs", "<h1>Users</h1>"),
//! );
//!
//! let views = GlobGatherer::with_file_access(
//!     GlobGathererConfig::new("templates/views").extension(".hbs"),
//!     fs.clone(),
//! );
//! let partials = GlobGatherer::with_file_access(
//!     GlobGathererConfig::new("templates/partials").extension(".hbs"),
//!     fs,
//! );
//!
//! let mut renderer = TemplateRenderer::new().views(views).partials(partials);
//! renderer.setup().unwrap();
//!
//! let mut out = Vec::new();
//! renderer.render(&mut out, "users/show", &json!({ "name": "Ada" })).unwrap();
//! assert_eq!(out, b"<h1>Users</h1><p>Ada</p>");
//! ```
//!
//! ## Isolation
//!
//! Partials live in the engine a renderer owns. Two renderers in one process
//! never see each other's partials, and a partial never shadows a view with
//! the same name.

mod engine;
mod error;
mod renderer;

pub use engine::{EngineKind, EngineOptions, HandlebarsEngine, MiniJinjaEngine, TemplateEngine};
pub use error::RenderError;
pub use renderer::{FrameworkRenderer, Renderer, TemplateRenderer};

// Re-export the gathering types a renderer is built from.
pub use viewrend_gather::{GatherError, RawTemplate, TemplateGatherer};
