//! Error types for template rendering.
//!
//! [`RenderError`] covers every failure between gathering template sources and
//! writing rendered output. Engine errors are carried as their message text so
//! the public type does not depend on which engine produced them.

use std::fmt::Display;
use std::io;

use thiserror::Error;
use viewrend_gather::GatherError;

/// Error type for renderer setup and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A view or partial gatherer failed during setup.
    #[error(transparent)]
    Gather(#[from] GatherError),

    /// A template failed to compile.
    #[error("failed to parse template \"{name}\": {message}")]
    Parse { name: String, message: String },

    /// No view is registered under the requested name.
    #[error("template {0} not found")]
    NotFound(String),

    /// The engine failed while executing a view.
    #[error("failed to render template \"{name}\": {message}")]
    Execution { name: String, message: String },

    /// Writing rendered output to the sink failed.
    #[error("failed to write rendered output: {0}")]
    Io(#[from] io::Error),

    /// Caller-supplied data could not be converted for the engine.
    #[error("failed to serialize template data: {0}")]
    Data(#[from] serde_json::Error),
}

impl RenderError {
    pub fn parse(name: impl Into<String>, err: impl Display) -> Self {
        Self::Parse {
            name: name.into(),
            message: err.to_string(),
        }
    }

    pub fn execution(name: impl Into<String>, err: impl Display) -> Self {
        Self::Execution {
            name: name.into(),
            message: err.to_string(),
        }
    }

    /// The template this error concerns, when there is one.
    pub fn template_name(&self) -> Option<&str> {
        match self {
            RenderError::Parse { name, .. }
            | RenderError::Execution { name, .. }
            | RenderError::NotFound(name) => Some(name),
            RenderError::Gather(_) | RenderError::Io(_) | RenderError::Data(_) => None,
        }
    }
}
