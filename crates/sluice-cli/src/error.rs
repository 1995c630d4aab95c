//! Error conversion utilities for CLI.
//!
//! Converts sluice-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use sluice_core::CopyError;
use sluice_core::ExtractionError;
use std::path::Path;

/// Converts `ExtractionError` to a user-friendly anyhow error with context.
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::DirectoryTraversalDetected { path, .. } => {
            anyhow!(
                "Security violation: Archive '{}' attempted directory traversal to '{}'\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources.",
                archive.display(),
                path.display()
            )
        }
        ExtractionError::ZipExtractionAborted {
            max_bytes,
            source: CopyError::BudgetExceeded { written, .. },
            ..
        } => {
            anyhow!(
                "Extraction limit exceeded for '{}': more than {} would be written \
                 ({written} bytes into the last entry)\n\
                 Files created by this run were removed.\n\
                 HINT: Use --max-total-size to raise the limit if the archive is trusted.",
                archive.display(),
                max_bytes
            )
        }
        ExtractionError::ZipExtractionAborted {
            source: CopyError::Io(io_err),
            ..
        } => {
            anyhow!(
                "Extraction of '{}' failed while copying: {}\n\
                 Files created by this run were removed.\n\
                 HINT: The archive may be truncated or corrupted.",
                archive.display(),
                io_err
            )
        }
        ExtractionError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}\n\
                 HINT: The output directory must already exist.",
                archive.display(),
                io_err
            )
        }
        ExtractionError::UnsupportedFormat => {
            anyhow!(
                "Archive format not supported: {}\n\
                 HINT: Supported formats: zip, tar, tar.gz, tgz",
                archive.display()
            )
        }
    }
}

/// Adds archive context to an extraction result.
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}
