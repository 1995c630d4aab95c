//! Validated destination directory type.

use crate::ExtractionError;
use crate::Result;
use crate::io::Filesystem;
use crate::io::OsFilesystem;
use std::path::Path;
use std::path::PathBuf;

/// The canonical destination root of one extraction call.
///
/// A `DestDir` is computed once, before the first entry is looked at, and is
/// the only root every entry path is checked against. Entries never get to
/// redefine it.
///
/// # Security Properties
///
/// The stored path is absolute with symlinks, `.` and `..` resolved, so a
/// byte-wise prefix comparison against it is meaningful.
///
/// # Examples
///
/// ```no_run
/// use sluice_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/tmp/extraction")?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates a new `DestDir` using the real filesystem.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` if the path does not exist, is not a
    /// directory or cannot be canonicalized. Creating the directory is the
    /// caller's responsibility.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::resolve(&OsFilesystem, path.as_ref())
    }

    /// Creates a new `DestDir` through the given filesystem.
    ///
    /// # Errors
    ///
    /// Same as [`DestDir::new`].
    pub fn resolve<F: Filesystem + ?Sized>(fs: &F, path: &Path) -> Result<Self> {
        if !fs.is_dir(path) {
            return Err(ExtractionError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("destination is not an existing directory: {}", path.display()),
            )));
        }

        let canonical = fs.canonicalize(path).map_err(|e| {
            ExtractionError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {}", path.display(), e),
            ))
        })?;

        Ok(Self(canonical))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a relative path to this destination directory.
    ///
    /// The result is not validated; use
    /// [`resolve_entry_path`](crate::security::resolve_entry_path) for
    /// untrusted names.
    #[inline]
    #[must_use]
    pub fn join_path(&self, path: &Path) -> PathBuf {
        self.0.join(path)
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
