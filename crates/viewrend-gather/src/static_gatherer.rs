//! Gatherer over templates already held in memory.

use crate::error::GatherError;
use crate::glob_gatherer::strip_extension;
use crate::template::{RawTemplate, TemplateGatherer};

/// A [`TemplateGatherer`] that returns a fixed list of templates.
///
/// Useful for templates compiled into the binary (e.g. with `include_str!`)
/// and for handing a renderer known templates in tests.
///
/// # Example
///
/// ```rust
/// use viewrend_gather::{StaticGatherer, TemplateGatherer};
///
/// let gatherer = StaticGatherer::from_entries(&[
///     ("index.hbs", "<h1>{{title}}</h1>"),
///     ("users/show.hbs", "<p>{{name}}</p>"),
/// ]);
///
/// let names: Vec<String> = gatherer.gather().unwrap().into_iter().map(|t| t.name).collect();
/// assert_eq!(names, ["index", "users/show"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticGatherer {
    templates: Vec<RawTemplate>,
}

impl StaticGatherer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a gatherer from `(path_with_extension, content)` pairs.
    ///
    /// Extensions are stripped the same way the glob gatherer strips them.
    pub fn from_entries(entries: &[(&str, &str)]) -> Self {
        let templates = entries
            .iter()
            .map(|(path, content)| RawTemplate::new(strip_extension(path), *content))
            .collect();
        Self { templates }
    }

    /// Adds a template under an explicit name.
    pub fn with_template(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.templates.push(RawTemplate::new(name, content));
        self
    }

    pub fn push(&mut self, template: RawTemplate) {
        self.templates.push(template);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<RawTemplate> for StaticGatherer {
    fn from_iter<I: IntoIterator<Item = RawTemplate>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().collect(),
        }
    }
}

impl TemplateGatherer for StaticGatherer {
    fn gather(&self) -> Result<Vec<RawTemplate>, GatherError> {
        Ok(self.templates.clone())
    }
}
