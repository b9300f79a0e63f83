//! The filesystem capability used by [`GlobGatherer`](crate::GlobGatherer).
//!
//! Gathering needs exactly two operations: expand a glob pattern and read a
//! whole file. Keeping them behind [`FileAccess`] lets tests swap in
//! [`MemoryFileAccess`](crate::MemoryFileAccess) instead of touching disk.

use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Glob matching and whole-file reads.
pub trait FileAccess: Send + Sync {
    /// Returns the paths matching `pattern`.
    ///
    /// A pattern that matches nothing (including one rooted in a directory
    /// that does not exist) returns an empty list, not an error.
    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>>;

    /// Reads the entire contents of `path`.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`FileAccess`] backed by the real filesystem.
///
/// Patterns follow the [`glob`] crate's syntax, where `**` spans any number
/// of directories (including none). Results come back in the crate's order,
/// which is alphabetical within each directory.
///
/// Directories that cannot be read while matching are skipped with a warning
/// rather than failing the glob. Only a malformed pattern is an error.
///
/// `**` follows symlinked directories. A link back to an ancestor (`loop -> .`)
/// makes the same file show up under ever longer paths until the OS refuses to
/// resolve the chain; those deeper paths are gathered as separate templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileAccess;

impl FileAccess for StdFileAccess {
    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let paths = ::glob::glob(pattern)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

        Ok(readable_matches(paths))
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Keeps matched paths and drops entries that failed to read.
fn readable_matches<I, E>(entries: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = Result<PathBuf, E>>,
    E: Display,
{
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                warn!(error = %err, "skipping unreadable glob entry");
                None
            }
        })
        .collect()
}
