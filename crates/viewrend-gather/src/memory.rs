//! In-memory [`FileAccess`] for tests and embedded template sets.

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use ::glob::{MatchOptions, Pattern};

use crate::file_access::FileAccess;

/// A stored outcome: either a value or an error to rebuild on each call.
///
/// `io::Error` is not `Clone`, so failures are kept as kind + message.
#[derive(Debug, Clone)]
enum Response<T> {
    Ok(T),
    Err(io::ErrorKind, String),
}

impl<T: Clone> Response<T> {
    fn get(&self) -> io::Result<T> {
        match self {
            Response::Ok(value) => Ok(value.clone()),
            Response::Err(kind, message) => Err(io::Error::new(*kind, message.clone())),
        }
    }
}

/// A [`FileAccess`] whose files and glob results live in memory.
///
/// Files are registered up front with the builder methods. Globs resolve in
/// one of two ways:
///
/// 1. A canned response registered for the exact pattern string (paths or an
///    error), returned as-is.
/// 2. Otherwise, the pattern is matched against every registered file path
///    using [`glob::Pattern`] with literal separators, so `*` stays inside one
///    path segment and `**` spans directories. Matches come back sorted.
///
/// Reading a path that was never registered fails with
/// [`io::ErrorKind::NotFound`].
///
/// # Example
///
/// ```rust
/// use std::io;
/// use std::path::Path;
/// use viewrend_gather::{FileAccess, MemoryFileAccess};
///
/// let fs = MemoryFileAccess::new()
///     .with_file("views/a.hbs", "A")
///     .with_file("views/nested/b.hbs", "B")
///     .with_glob_error("broken/*.hbs", io::ErrorKind::PermissionDenied, "denied");
///
/// assert_eq!(fs.glob("views/*.hbs").unwrap().len(), 1);
/// assert_eq!(fs.read_file(Path::new("views/a.hbs")).unwrap(), b"A");
/// assert!(fs.glob("broken/*.hbs").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileAccess {
    files: BTreeMap<PathBuf, Response<Vec<u8>>>,
    globs: HashMap<String, Response<Vec<PathBuf>>>,
}

impl MemoryFileAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file with the given contents.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.files
            .insert(path.into(), Response::Ok(content.into()));
        self
    }

    /// Registers a file whose reads fail with the given error.
    ///
    /// The path still takes part in pattern matching, so a glob will find it
    /// and the subsequent read will fail.
    pub fn with_file_error(
        mut self,
        path: impl Into<PathBuf>,
        kind: io::ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        self.files
            .insert(path.into(), Response::Err(kind, message.into()));
        self
    }

    /// Registers a canned result for an exact glob pattern.
    pub fn with_glob<I, P>(mut self, pattern: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths = paths.into_iter().map(Into::into).collect();
        self.globs.insert(pattern.into(), Response::Ok(paths));
        self
    }

    /// Registers a canned failure for an exact glob pattern.
    pub fn with_glob_error(
        mut self,
        pattern: impl Into<String>,
        kind: io::ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        self.globs
            .insert(pattern.into(), Response::Err(kind, message.into()));
        self
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn match_files(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let pattern = Pattern::new(pattern)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        Ok(self
            .files
            .keys()
            .filter(|path| pattern.matches_path_with(path, options))
            .cloned()
            .collect())
    }
}

impl FileAccess for MemoryFileAccess {
    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        match self.globs.get(pattern) {
            Some(response) => response.get(),
            None => self.match_files(pattern),
        }
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.files.get(path) {
            Some(response) => response.get(),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )),
        }
    }
}
