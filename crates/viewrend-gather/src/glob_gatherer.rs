//! Glob-based template gathering.
//!
//! [`GlobGatherer`] collects templates under one top-level directory. For every
//! configured extension it runs two glob passes:
//!
//! 1. Flat: `{dir}/*{ext}`, files directly inside the directory
//! 2. Recursive: `{dir}/**/*{ext}`, files in any subdirectory
//!
//! Flat matches come first, then recursive ones. Extensions are processed in
//! configuration order, so the final list is grouped by extension.
//!
//! With the real filesystem, `**` also matches zero directories, which makes
//! the recursive pass see the flat files again. Paths already returned by the
//! flat pass are dropped from the recursive one, so each file is gathered once.
//! Nothing else is deduplicated: a path the recursive pass reports twice is
//! gathered twice.
//!
//! # Failure Behavior
//!
//! The first failing glob or read aborts the whole gather; no partial list is
//! returned. A directory that does not exist is not a failure: both passes
//! match nothing and the gather yields zero templates.

use std::collections::HashSet;
use std::path::{PathBuf, MAIN_SEPARATOR};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::GatherError;
use crate::file_access::{FileAccess, StdFileAccess};
use crate::template::{RawTemplate, TemplateGatherer};

/// Template directory used when none is configured.
pub const DEFAULT_TEMPLATE_DIR: &str = "templates/views";

/// Configuration for a [`GlobGatherer`].
///
/// Unset fields are filled in when the gatherer is constructed; the
/// configuration is not consulted again afterwards.
///
/// # Example
///
/// ```rust
/// use viewrend_gather::GlobGathererConfig;
///
/// let config = GlobGathererConfig::new("templates/partials")
///     .extension(".hbs")
///     .extension(".html")
///     .include_tld_in_key(true);
///
/// assert_eq!(config.template_dir.as_deref(), Some("templates/partials"));
/// assert_eq!(config.extensions, [".hbs", ".html"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobGathererConfig {
    /// Top-level directory to search. Defaults to [`DEFAULT_TEMPLATE_DIR`].
    pub template_dir: Option<String>,

    /// Prefix every template name with `{template_dir}/`.
    pub include_tld_in_key: bool,

    /// File extensions to gather, including the leading dot (e.g. `".hbs"`).
    ///
    /// Processed in order. An empty list gathers nothing.
    pub extensions: Vec<String>,
}

impl GlobGathererConfig {
    /// Creates a configuration rooted at `template_dir`, with no extensions.
    pub fn new(template_dir: impl Into<String>) -> Self {
        Self {
            template_dir: Some(template_dir.into()),
            ..Self::default()
        }
    }

    /// Appends an extension to scan for.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extensions.push(extension.into());
        self
    }

    /// Replaces the extension list.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether template names keep the top-level directory prefix.
    pub fn include_tld_in_key(mut self, include: bool) -> Self {
        self.include_tld_in_key = include;
        self
    }
}

/// Gathers templates from a directory tree using glob patterns.
///
/// See the [module documentation](self) for the matching rules.
pub struct GlobGatherer {
    template_dir: String,
    include_tld_in_key: bool,
    extensions: Vec<String>,
    file_access: Arc<dyn FileAccess>,
}

impl std::fmt::Debug for GlobGatherer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobGatherer")
            .field("template_dir", &self.template_dir)
            .field("include_tld_in_key", &self.include_tld_in_key)
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}

impl GlobGatherer {
    /// Creates a gatherer that reads from the real filesystem.
    pub fn new(config: GlobGathererConfig) -> Self {
        Self::with_file_access(config, Arc::new(StdFileAccess))
    }

    /// Creates a gatherer over an explicit [`FileAccess`].
    pub fn with_file_access(config: GlobGathererConfig, file_access: Arc<dyn FileAccess>) -> Self {
        Self {
            template_dir: config
                .template_dir
                .unwrap_or_else(|| DEFAULT_TEMPLATE_DIR.to_string()),
            include_tld_in_key: config.include_tld_in_key,
            extensions: config.extensions,
            file_access,
        }
    }

    /// The top-level directory this gatherer searches.
    pub fn template_dir(&self) -> &str {
        &self.template_dir
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Runs the flat and recursive globs for one extension.
    fn template_files(&self, extension: &str) -> Result<Vec<PathBuf>, GatherError> {
        let flat_pattern = format!("{}/*{}", self.template_dir, extension);
        debug!(pattern = %flat_pattern, "globbing flat templates");
        let mut files = self.file_access.glob(&flat_pattern)?;

        let recursive_pattern = format!("{}/**/*{}", self.template_dir, extension);
        debug!(pattern = %recursive_pattern, "globbing nested templates");
        let nested = self.file_access.glob(&recursive_pattern)?;

        let flat: HashSet<PathBuf> = files.iter().cloned().collect();
        files.extend(nested.into_iter().filter(|path| !flat.contains(path)));
        Ok(files)
    }

    fn template_name(&self, path: &str) -> String {
        let name = derive_template_name(path, &self.template_dir);
        if self.include_tld_in_key {
            format!("{}/{}", self.template_dir, name)
        } else {
            name
        }
    }
}

impl TemplateGatherer for GlobGatherer {
    fn gather(&self) -> Result<Vec<RawTemplate>, GatherError> {
        let mut templates = Vec::new();

        for extension in &self.extensions {
            for file in self.template_files(extension)? {
                let name = self.template_name(&file.to_string_lossy());
                let bytes = self.file_access.read_file(&file)?;
                let content = String::from_utf8(bytes).map_err(|source| {
                    GatherError::InvalidUtf8 {
                        path: file.clone(),
                        source,
                    }
                })?;

                trace!(name = %name, path = %file.display(), "gathered template");
                templates.push(RawTemplate::new(name, content));
            }
        }

        debug!(
            dir = %self.template_dir,
            count = templates.len(),
            "gathered templates"
        );
        Ok(templates)
    }
}

/// Derives a template name from a matched path.
///
/// Removes the first occurrence of `template_dir` from `path`, drops one
/// leading separator, then strips the extension.
///
/// This is plain substring replacement. If the directory string also shows up
/// earlier in the path than intended, the wrong occurrence is removed:
///
/// ```rust
/// use viewrend_gather::derive_template_name;
///
/// assert_eq!(derive_template_name("views/users/list.hbs", "views"), "users/list");
/// assert_eq!(derive_template_name("./views/home.hbs", "./views"), "home");
///
/// // "views" occurs inside "myviews" first, so that is what gets removed.
/// assert_eq!(derive_template_name("myviews/views/a.hbs", "views"), "my/views/a");
/// ```
pub fn derive_template_name(path: &str, template_dir: &str) -> String {
    let stripped = path.replacen(template_dir, "", 1);
    let relative = stripped
        .strip_prefix(['/', MAIN_SEPARATOR])
        .unwrap_or(&stripped);
    strip_extension(relative).to_string()
}

/// Strips the extension from the last segment of `path`.
///
/// The extension starts at the final `.` of the last path segment. Paths
/// without one are returned unchanged.
///
/// ```rust
/// use viewrend_gather::strip_extension;
///
/// assert_eq!(strip_extension("users/list.hbs"), "users/list");
/// assert_eq!(strip_extension("layout.min.html"), "layout.min");
/// assert_eq!(strip_extension("v1.2/readme"), "v1.2/readme");
/// ```
pub fn strip_extension(path: &str) -> &str {
    let segment_start = path
        .rfind(['/', MAIN_SEPARATOR])
        .map_or(0, |index| index + 1);

    match path[segment_start..].rfind('.') {
        Some(dot) => &path[..segment_start + dot],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::memory::MemoryFileAccess;

    // =========================================================================
    // Test helpers
    // =========================================================================

    struct Case {
        path: &'static str,
        name: &'static str,
        content: &'static str,
        flat: bool,
    }

    /// Registers each case as a file and the flat/nested splits as canned globs.
    fn file_access_for(dir: &str, ext: &str, cases: &[Case]) -> MemoryFileAccess {
        let mut fs = MemoryFileAccess::new();
        let mut flat = Vec::new();
        let mut nested = Vec::new();
        for case in cases {
            fs = fs.with_file(case.path, case.content);
            if case.flat {
                flat.push(case.path);
            } else {
                nested.push(case.path);
            }
        }
        fs.with_glob(format!("{dir}/*{ext}"), flat)
            .with_glob(format!("{dir}/**/*{ext}"), nested)
    }

    fn assert_gathered(templates: &[RawTemplate], cases: &[Case]) {
        assert_eq!(templates.len(), cases.len());
        for (template, case) in templates.iter().zip(cases) {
            assert_eq!(template.name, case.name);
            assert_eq!(template.content, case.content);
        }
    }

    fn html_config(dir: &str) -> GlobGathererConfig {
        GlobGathererConfig::new(dir).extension(".html")
    }

    // =========================================================================
    // Happy paths
    // =========================================================================

    #[test]
    fn test_gather_without_tld_in_key() {
        let cases = [
            Case { path: "templates/file1.html", name: "file1", content: "file1", flat: true },
            Case { path: "templates/file2.html", name: "file2", content: "file2", flat: true },
            Case { path: "templates/nested/file3.html", name: "nested/file3", content: "file3", flat: false },
        ];
        let fs = file_access_for("templates", ".html", &cases);
        let gatherer = GlobGatherer::with_file_access(html_config("templates"), Arc::new(fs));

        let templates = gatherer.gather().unwrap();

        assert_gathered(&templates, &cases);
    }

    #[test]
    fn test_gather_with_tld_in_key() {
        let cases = [
            Case { path: "templates/file1.html", name: "templates/file1", content: "file1", flat: true },
            Case { path: "templates/file2.html", name: "templates/file2", content: "file2", flat: true },
            Case { path: "templates/nested/file3.html", name: "templates/nested/file3", content: "file3", flat: false },
        ];
        let fs = file_access_for("templates", ".html", &cases);
        let config = html_config("templates").include_tld_in_key(true);
        let gatherer = GlobGatherer::with_file_access(config, Arc::new(fs));

        let templates = gatherer.gather().unwrap();

        assert_gathered(&templates, &cases);
    }

    #[test]
    fn test_gather_with_relative_dir() {
        let cases = [
            Case { path: "./templates/file1.html", name: "file1", content: "file1", flat: true },
            Case { path: "./templates/file2.html", name: "file2", content: "file2", flat: true },
            Case { path: "./templates/nested/file3.html", name: "nested/file3", content: "file3", flat: false },
        ];
        let fs = file_access_for("./templates", ".html", &cases);
        let gatherer = GlobGatherer::with_file_access(html_config("./templates"), Arc::new(fs));

        let templates = gatherer.gather().unwrap();

        assert_gathered(&templates, &cases);
    }

    #[test]
    fn test_must_gather_with_default_dir() {
        let cases = [
            Case { path: "templates/views/file1.html", name: "file1", content: "file1", flat: true },
            Case { path: "templates/views/file2.html", name: "file2", content: "file2", flat: true },
            Case { path: "templates/views/nested/file3.html", name: "nested/file3", content: "file3", flat: false },
        ];
        let fs = file_access_for(DEFAULT_TEMPLATE_DIR, ".html", &cases);
        let config = GlobGathererConfig::default().extension(".html");
        let gatherer = GlobGatherer::with_file_access(config, Arc::new(fs));

        assert_eq!(gatherer.template_dir(), DEFAULT_TEMPLATE_DIR);
        assert_gathered(&gatherer.must_gather(), &cases);
    }

    #[test]
    fn test_extensions_are_processed_in_order() {
        let fs = MemoryFileAccess::new()
            .with_file("views/a.html", "a-html")
            .with_file("views/a.hbs", "a-hbs")
            .with_file("views/deep/b.hbs", "b-hbs");
        let config = GlobGathererConfig::new("views").extensions([".hbs", ".html"]);
        let gatherer = GlobGatherer::with_file_access(config, Arc::new(fs));

        let templates = gatherer.gather().unwrap();

        let got: Vec<(&str, &str)> = templates
            .iter()
            .map(|t| (t.name.as_str(), t.content.as_str()))
            .collect();
        assert_eq!(got, [("a", "a-hbs"), ("deep/b", "b-hbs"), ("a", "a-html")]);
    }

    #[test]
    fn test_recursive_pass_skips_flat_matches() {
        // Pattern matching lets `**` match zero directories, like the real glob.
        let fs = MemoryFileAccess::new()
            .with_file("views/top.hbs", "top")
            .with_file("views/sub/inner.hbs", "inner");
        let gatherer = GlobGatherer::with_file_access(
            GlobGathererConfig::new("views").extension(".hbs"),
            Arc::new(fs),
        );

        let names: Vec<String> = gatherer.gather().unwrap().into_iter().map(|t| t.name).collect();

        assert_eq!(names, ["top", "sub/inner"]);
    }

    #[test]
    fn test_recursive_duplicates_are_not_collapsed() {
        let fs = MemoryFileAccess::new()
            .with_file("views/top.hbs", "top")
            .with_file("views/sub/inner.hbs", "inner")
            .with_glob("views/*.hbs", ["views/top.hbs"])
            .with_glob(
                "views/**/*.hbs",
                ["views/top.hbs", "views/sub/inner.hbs", "views/sub/inner.hbs"],
            );
        let gatherer = GlobGatherer::with_file_access(
            GlobGathererConfig::new("views").extension(".hbs"),
            Arc::new(fs),
        );

        let names: Vec<String> = gatherer.gather().unwrap().into_iter().map(|t| t.name).collect();

        assert_eq!(names, ["top", "sub/inner", "sub/inner"]);
    }

    #[test]
    fn test_no_extensions_gathers_nothing() {
        let fs = MemoryFileAccess::new().with_file("templates/views/a.hbs", "a");
        let gatherer = GlobGatherer::with_file_access(GlobGathererConfig::default(), Arc::new(fs));

        assert!(gatherer.gather().unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_gathers_nothing() {
        let gatherer = GlobGatherer::with_file_access(
            html_config("nowhere"),
            Arc::new(MemoryFileAccess::new()),
        );

        assert!(gatherer.gather().unwrap().is_empty());
    }

    // =========================================================================
    // Failures
    // =========================================================================

    #[test]
    fn test_flat_glob_error_is_returned() {
        let fs = MemoryFileAccess::new().with_glob_error(
            "templates/*.html",
            io::ErrorKind::Other,
            "test error",
        );
        let gatherer = GlobGatherer::with_file_access(html_config("templates"), Arc::new(fs));

        let err = gatherer.gather().unwrap_err();

        let io_err = err.as_io().expect("io error");
        assert_eq!(io_err.kind(), io::ErrorKind::Other);
        assert_eq!(io_err.to_string(), "test error");
    }

    #[test]
    fn test_recursive_glob_error_is_returned() {
        let fs = MemoryFileAccess::new()
            .with_glob("templates/*.html", Vec::<PathBuf>::new())
            .with_glob_error("templates/**/*.html", io::ErrorKind::Other, "test error");
        let gatherer = GlobGatherer::with_file_access(html_config("templates"), Arc::new(fs));

        let err = gatherer.gather().unwrap_err();

        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_glob_error_in_later_extension_discards_earlier_results() {
        let fs = MemoryFileAccess::new()
            .with_file("templates/ok.hbs", "ok")
            .with_glob_error("templates/*.html", io::ErrorKind::Other, "late failure");
        let config = GlobGathererConfig::new("templates").extensions([".hbs", ".html"]);
        let gatherer = GlobGatherer::with_file_access(config, Arc::new(fs));

        let err = gatherer.gather().unwrap_err();

        assert_eq!(err.to_string(), "late failure");
    }

    #[test]
    fn test_read_error_is_returned() {
        let fs = MemoryFileAccess::new()
            .with_glob("templates/*.html", ["templates/file1.html"])
            .with_file_error("templates/file1.html", io::ErrorKind::Other, "test error");
        let gatherer = GlobGatherer::with_file_access(html_config("templates"), Arc::new(fs));

        let err = gatherer.gather().unwrap_err();

        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_invalid_utf8_is_reported_with_path() {
        let fs = MemoryFileAccess::new().with_file("templates/bin.html", vec![0xc3, 0x28]);
        let gatherer = GlobGatherer::with_file_access(html_config("templates"), Arc::new(fs));

        let err = gatherer.gather().unwrap_err();

        assert!(matches!(err, GatherError::InvalidUtf8 { ref path, .. } if path == &PathBuf::from("templates/bin.html")));
    }

    #[test]
    #[should_panic(expected = "failed to gather templates")]
    fn test_must_gather_panics_on_error() {
        let fs = MemoryFileAccess::new().with_glob_error(
            "templates/views/*.html",
            io::ErrorKind::Other,
            "test error",
        );
        let config = GlobGathererConfig::default().extension(".html");
        let gatherer = GlobGatherer::with_file_access(config, Arc::new(fs));

        gatherer.must_gather();
    }

    // =========================================================================
    // Name derivation
    // =========================================================================

    #[test]
    fn test_derive_name_strips_dir_and_extension() {
        assert_eq!(derive_template_name("templates/a/b.hbs", "templates"), "a/b");
        assert_eq!(derive_template_name("templates/index.html", "templates"), "index");
    }

    #[test]
    fn test_derive_name_only_removes_one_separator() {
        assert_eq!(derive_template_name("templates//a.hbs", "templates"), "/a");
    }

    #[test]
    fn test_derive_name_without_extension() {
        assert_eq!(derive_template_name("templates/LICENSE", "templates"), "LICENSE");
    }

    #[test]
    fn test_derive_name_recurring_dir_uses_first_occurrence() {
        // Only the first "views" is removed; the nested one stays in the name.
        assert_eq!(derive_template_name("views/views/a.hbs", "views"), "views/a");
    }

    #[test]
    fn test_strip_extension_ignores_dots_in_directories() {
        assert_eq!(strip_extension("v1.0/page"), "v1.0/page");
        assert_eq!(strip_extension("v1.0/page.hbs"), "v1.0/page");
    }

    // =========================================================================
    // Config
    // =========================================================================

    #[test]
    fn test_config_defaults_are_applied_at_construction() {
        let gatherer = GlobGatherer::new(GlobGathererConfig::default());
        assert_eq!(gatherer.template_dir(), DEFAULT_TEMPLATE_DIR);
        assert!(gatherer.extensions().is_empty());
    }
}
