//! Raw template records and the gatherer contract.

use crate::error::GatherError;

/// A template's source text together with the name it is registered under.
///
/// `name` keeps directory separators as hierarchy (`users/list`) and has no
/// extension. `content` is the file text, unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTemplate {
    pub name: String,
    pub content: String,
}

impl RawTemplate {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A source of raw templates for a renderer to compile during setup.
///
/// Implementations produce a fresh set of records on every call; nothing is
/// cached between calls.
pub trait TemplateGatherer: Send + Sync {
    /// Collects all templates, or returns the first error encountered.
    fn gather(&self) -> Result<Vec<RawTemplate>, GatherError>;

    /// Collects all templates, panicking on failure.
    ///
    /// Meant for application startup, where a missing or unreadable template
    /// directory leaves nothing sensible to fall back to.
    ///
    /// # Panics
    ///
    /// Panics with the gather error's message if [`gather`](Self::gather) fails.
    fn must_gather(&self) -> Vec<RawTemplate> {
        match self.gather() {
            Ok(templates) => templates,
            Err(err) => panic!("failed to gather templates: {err}"),
        }
    }
}

impl<G: TemplateGatherer + ?Sized> TemplateGatherer for Box<G> {
    fn gather(&self) -> Result<Vec<RawTemplate>, GatherError> {
        (**self).gather()
    }
}

impl<G: TemplateGatherer + ?Sized> TemplateGatherer for std::sync::Arc<G> {
    fn gather(&self) -> Result<Vec<RawTemplate>, GatherError> {
        (**self).gather()
    }
}
