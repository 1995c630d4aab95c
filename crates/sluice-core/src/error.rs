//! Error types for archive extraction operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::security::ByteBudget;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors produced by the budgeted stream copier.
///
/// Bytes already written when either variant is returned stay in the sink;
/// undoing them is the caller's job.
#[derive(Error, Debug)]
pub enum CopyError {
    /// The running total of written bytes went past the remaining budget.
    #[error("byte budget exceeded: {written} bytes written, {limit} allowed")]
    BudgetExceeded {
        /// Bytes written by this copy when the overrun was detected.
        written: u64,
        /// Budget that was in effect for this copy.
        limit: u64,
    },

    /// Reading the source or writing the sink failed.
    #[error("I/O failure while copying: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during archive extraction.
///
/// Exactly one of the three extraction kinds is reported per call:
/// [`DirectoryTraversalDetected`](Self::DirectoryTraversalDetected),
/// [`ZipExtractionAborted`](Self::ZipExtractionAborted) or
/// [`Io`](Self::Io).
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation failed outside of an entry copy.
    ///
    /// Covers opening and canonicalizing the destination root, creating
    /// parent directories and opening sinks. No rollback is performed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive format could not be determined from the file name.
    #[error("unsupported archive format")]
    UnsupportedFormat,

    /// An entry resolved to a path outside the destination root.
    #[error("directory traversal detected in archive '{archive}': {path}")]
    DirectoryTraversalDetected {
        /// Name of the archive being extracted.
        archive: String,
        /// The rejected, fully resolved path.
        path: PathBuf,
    },

    /// Copying an entry failed; files created by this call were rolled back.
    #[error("extraction of '{archive}' aborted (limit: {max_bytes}): {source}")]
    ZipExtractionAborted {
        /// Name of the archive being extracted.
        archive: String,
        /// Configured maximum for the whole call.
        max_bytes: ByteBudget,
        /// Underlying copy failure.
        #[source]
        source: CopyError,
    },
}

impl ExtractionError {
    /// Returns `true` if this error represents a security violation.
    ///
    /// Traversal attempts and exhausted byte budgets are security
    /// violations; plain I/O failures are not.
    ///
    /// # Examples
    ///
    /// ```
    /// use sluice_core::ExtractionError;
    /// use std::path::PathBuf;
    ///
    /// let err = ExtractionError::DirectoryTraversalDetected {
    ///     archive: "a.zip".into(),
    ///     path: PathBuf::from("/etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ExtractionError::UnsupportedFormat;
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        match self {
            Self::DirectoryTraversalDetected { .. } => true,
            Self::ZipExtractionAborted { source, .. } => {
                matches!(source, CopyError::BudgetExceeded { .. })
            }
            Self::Io(_) | Self::UnsupportedFormat => false,
        }
    }

    /// Returns `true` if files created by the failed call were rolled back.
    #[must_use]
    pub const fn rolled_back(&self) -> bool {
        matches!(self, Self::ZipExtractionAborted { .. })
    }

    /// Returns the copy failure behind an aborted extraction, if any.
    #[must_use]
    pub const fn copy_cause(&self) -> Option<&CopyError> {
        match self {
            Self::ZipExtractionAborted { source, .. } => Some(source),
            _ => None,
        }
    }
}
