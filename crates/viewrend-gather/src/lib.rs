//! # Viewrend Gather - Template Source Collection
//!
//! `viewrend-gather` collects raw template source text so a renderer can
//! compile it. It knows nothing about template syntax: a gatherer produces
//! `(name, content)` pairs and the rendering crate decides what to do with them.
//!
//! ## Core Concepts
//!
//! - [`RawTemplate`]: A named chunk of template source
//! - [`TemplateGatherer`]: Anything that can produce raw templates
//! - [`GlobGatherer`]: Walks a directory with glob patterns, one pass per extension
//! - [`StaticGatherer`]: Serves templates already held in memory
//! - [`FileAccess`]: The glob + read capability the glob gatherer runs on
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use viewrend_gather::{GlobGatherer, GlobGathererConfig, MemoryFileAccess, TemplateGatherer};
//!
//! let fs = MemoryFileAccess::new()
//!     .with_file("templates/index.hbs", "<h1>{{title}}</h1>")
//!     .with_file("templates/users/show.hbs", "<p>{{name}}</p>");
//!
//! let gatherer = GlobGatherer::with_file_access(
//!     GlobGathererConfig::new("templates").extension(".hbs"),
//!     Arc::new(fs),
//! );
//!
//! let templates = gatherer.gather().unwrap();
//! let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
//! assert_eq!(names, ["index", "users/show"]);
//! ```
//!
//! ## Naming
//!
//! A file's template name is its path with the template directory removed,
//! one leading separator dropped, and the extension stripped:
//!
//! | Path | Template dir | Name |
//! |------|--------------|------|
//! | `templates/views/home.hbs` | `templates/views` | `home` |
//! | `templates/views/users/list.hbs` | `templates/views` | `users/list` |
//!
//! With [`GlobGathererConfig::include_tld_in_key`] set, the directory is put
//! back in front: `templates/views/users/list`.
//!
//! The directory is removed by first-occurrence substring replacement, not by
//! computing a relative path. See [`derive_template_name`].

mod error;
mod file_access;
mod glob_gatherer;
mod memory;
mod static_gatherer;
mod template;

pub use error::{GatherError, Result};
pub use file_access::{FileAccess, StdFileAccess};
pub use glob_gatherer::{
    derive_template_name, strip_extension, GlobGatherer, GlobGathererConfig,
    DEFAULT_TEMPLATE_DIR,
};
pub use memory::MemoryFileAccess;
pub use static_gatherer::StaticGatherer;
pub use template::{RawTemplate, TemplateGatherer};
