//! Fluent builder over the path-based extraction API.

use std::io;
use std::path::PathBuf;

use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::report::ExtractionObserver;
use crate::report::NoopObserver;

/// Builder for configuring archive extraction.
///
/// # Examples
///
/// ```no_run
/// use sluice_core::ArchiveBuilder;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = ArchiveBuilder::new()
///     .archive("archive.tar.gz")
///     .output_dir("/tmp/output")
///     .max_total_bytes(100 * 1024 * 1024)
///     .extract()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    archive_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    config: ExtractionConfig,
}

impl ArchiveBuilder {
    /// Creates a new `ArchiveBuilder` with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the archive file path.
    #[must_use]
    pub fn archive(mut self, path: impl Into<PathBuf>) -> Self {
        self.archive_path = Some(path.into());
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Sets the byte limit; `0` disables it.
    #[must_use]
    pub const fn max_total_bytes(mut self, max: u64) -> Self {
        self.config.max_total_bytes = max;
        self
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub const fn config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the extraction with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` with `InvalidInput` if the archive path
    /// or output directory is not set, or any error of
    /// [`extract_archive`](crate::extract_archive).
    pub fn extract(self) -> Result<ExtractionReport> {
        self.extract_with_observer(&mut NoopObserver)
    }

    /// Executes the extraction, reporting progress to `observer`.
    ///
    /// # Errors
    ///
    /// Same as [`ArchiveBuilder::extract`].
    pub fn extract_with_observer(
        self,
        observer: &mut dyn ExtractionObserver,
    ) -> Result<ExtractionReport> {
        let archive_path = self.archive_path.ok_or_else(|| missing("archive path"))?;
        let output_dir = self.output_dir.ok_or_else(|| missing("output directory"))?;

        crate::api::extract_archive_with_observer(archive_path, output_dir, &self.config, observer)
    }
}

fn missing(what: &str) -> ExtractionError {
    ExtractionError::Io(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{what} not set"),
    ))
}
