//! Extraction reporting and observation.

use std::path::Path;
use std::time::Duration;

/// Report of a successful extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Number of file entries written.
    pub files_extracted: usize,

    /// Number of directory entries processed.
    pub directories_created: usize,

    /// Total bytes written to disk, the sum of every per-entry copy.
    pub bytes_written: u64,

    /// Duration of the extraction operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of entries processed.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

/// Receives progress and diagnostics from an extraction.
///
/// Observers are owned by the caller and passed per call, so tests can
/// substitute a recording fake and no diagnostic state is shared between
/// concurrent extractions.
///
/// # Examples
///
/// ```
/// use sluice_core::ExtractionObserver;
/// use std::path::Path;
///
/// #[derive(Default)]
/// struct Orphans(Vec<String>);
///
/// impl ExtractionObserver for Orphans {
///     fn on_entry_start(&mut self, _name: &str) {}
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_rollback_failure(&mut self, path: &Path) {
///         self.0.push(path.display().to_string());
///     }
/// }
/// ```
pub trait ExtractionObserver: Send {
    /// Called before an entry is resolved, with its raw archive name.
    fn on_entry_start(&mut self, name: &str);

    /// Called after a file entry has been copied.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Number of bytes written for this entry
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been fully materialized on disk.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called for every file rollback could not delete.
    ///
    /// The file is left behind on disk; the path is what an operator needs
    /// to clean it up.
    fn on_rollback_failure(&mut self, path: &Path);
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {
    fn on_entry_start(&mut self, _name: &str) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_rollback_failure(&mut self, _path: &Path) {}
}
