//! Core extraction engine.
//!
//! Entries are processed strictly in archive order:
//!
//! 1. The entry name is resolved below the destination root. An escaping
//!    entry ends the call with `DirectoryTraversalDetected`; files written
//!    by earlier entries are left in place.
//! 2. Directory entries are created (with parents) and cost no budget.
//! 3. File entries get their parents created and a fresh sink opened. The
//!    path is tracked for rollback before the first byte is written, then
//!    the content is copied against the remaining budget.
//! 4. A failed copy (budget overrun or I/O) rolls back every tracked file
//!    and ends the call with `ZipExtractionAborted`.

use std::collections::HashSet;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::ExtractionError;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_budgeted;
use crate::error::CopyError;
use crate::extraction::rollback::rollback;
use crate::formats::ArchiveEntry;
use crate::formats::EntrySource;
use crate::io::Filesystem;
use crate::io::OsFilesystem;
use crate::report::ExtractionObserver;
use crate::report::ExtractionReport;
use crate::report::NoopObserver;
use crate::security::ByteBudget;
use crate::security::EntryResolution;
use crate::security::resolve_entry_path;
use crate::types::DestDir;

/// Parameters of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// Archive name used in error messages and logs.
    pub archive_name: String,
    /// Existing directory to extract into.
    pub destination: PathBuf,
    /// Maximum total bytes to write; `0` disables the limit.
    pub max_bytes: u64,
}

impl ExtractionRequest {
    /// Creates a new request.
    pub fn new(
        archive_name: impl Into<String>,
        destination: impl Into<PathBuf>,
        max_bytes: u64,
    ) -> Self {
        Self {
            archive_name: archive_name.into(),
            destination: destination.into(),
            max_bytes,
        }
    }
}

/// Extracts archive entries into a destination directory.
///
/// An `Extractor` holds no per-call state and can be shared between threads
/// extracting into disjoint destinations.
///
/// # Examples
///
/// ```no_run
/// use sluice_core::extraction::{ExtractionRequest, Extractor};
/// use sluice_core::formats::ZipEntries;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = std::fs::File::open("a.zip")?;
/// let mut entries = ZipEntries::new(std::io::BufReader::new(file))?;
///
/// let request = ExtractionRequest::new("a.zip", "/out", 1000);
/// let report = Extractor::new().extract(&mut entries, &request)?;
/// println!("{} bytes written", report.bytes_written);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor<F: Filesystem = OsFilesystem> {
    fs: F,
}

impl Extractor<OsFilesystem> {
    /// Creates an extractor over the real filesystem.
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: OsFilesystem }
    }
}

impl<F: Filesystem> Extractor<F> {
    /// Creates an extractor over the given filesystem.
    #[must_use]
    pub const fn with_filesystem(fs: F) -> Self {
        Self { fs }
    }

    /// Returns the filesystem this extractor writes through.
    #[must_use]
    pub const fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Extracts every entry of `source` as described by `request`.
    ///
    /// # Errors
    ///
    /// See [`Extractor::extract_with_observer`].
    pub fn extract<S: EntrySource + ?Sized>(
        &self,
        source: &mut S,
        request: &ExtractionRequest,
    ) -> Result<ExtractionReport> {
        self.extract_with_observer(source, request, &mut NoopObserver)
    }

    /// Extracts every entry of `source`, reporting to `observer`.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::Io` if the destination root cannot be resolved, or
    ///   a directory or sink cannot be created (no rollback)
    /// - `ExtractionError::DirectoryTraversalDetected` if an entry resolves
    ///   outside the destination (no rollback)
    /// - `ExtractionError::ZipExtractionAborted` if the byte budget is
    ///   exceeded or the archive stream fails; files created by this call
    ///   are deleted first
    pub fn extract_with_observer<S: EntrySource + ?Sized>(
        &self,
        source: &mut S,
        request: &ExtractionRequest,
        observer: &mut dyn ExtractionObserver,
    ) -> Result<ExtractionReport> {
        let started = Instant::now();
        let root = DestDir::resolve(&self.fs, &request.destination)?;
        let mut session = ExtractionSession::new(root, ByteBudget::from_max(request.max_bytes));
        let mut buffer = CopyBuffer::new();

        debug!(
            archive = %request.archive_name,
            root = %session.root.as_path().display(),
            budget = %session.max_bytes,
            "starting extraction"
        );

        loop {
            let entry = match source.next_entry() {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => return Err(self.abort(session, request, CopyError::Io(e), observer)),
            };

            match self.extract_entry(&mut session, entry, &mut buffer, observer) {
                Ok(()) => {}
                Err(EntryError::Traversal(path)) => {
                    warn!(
                        archive = %request.archive_name,
                        path = %path.display(),
                        "entry escapes destination"
                    );
                    return Err(ExtractionError::DirectoryTraversalDetected {
                        archive: request.archive_name.clone(),
                        path,
                    });
                }
                Err(EntryError::Io(e)) => return Err(ExtractionError::Io(e)),
                Err(EntryError::Copy(cause)) => {
                    return Err(self.abort(session, request, cause, observer));
                }
            }
        }

        let mut report = session.report;
        report.duration = started.elapsed();

        info!(
            archive = %request.archive_name,
            files = report.files_extracted,
            directories = report.directories_created,
            bytes = report.bytes_written,
            "extraction complete"
        );

        Ok(report)
    }

    fn extract_entry(
        &self,
        session: &mut ExtractionSession,
        entry: ArchiveEntry<'_>,
        buffer: &mut CopyBuffer,
        observer: &mut dyn ExtractionObserver,
    ) -> std::result::Result<(), EntryError> {
        observer.on_entry_start(&entry.name);

        let path = match resolve_entry_path(&self.fs, &session.root, &entry.name)? {
            EntryResolution::Inside(path) => path,
            EntryResolution::Outside(path) => return Err(EntryError::Traversal(path)),
        };

        if entry.is_dir {
            self.fs.create_dir_all(&path)?;
            session.report.directories_created += 1;
            debug!(path = %path.display(), "created directory");
            observer.on_entry_complete(&path);
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            self.fs.create_dir_all(parent)?;
        }

        let sink = self.fs.create_file(&path)?;
        session.track(path.clone());

        let outcome = copy_budgeted(entry.reader, sink, session.remaining, buffer)?;
        session.remaining = outcome.remaining;
        session.report.files_extracted += 1;
        session.report.bytes_written = session
            .report
            .bytes_written
            .saturating_add(outcome.bytes_written);

        debug!(
            path = %path.display(),
            bytes = outcome.bytes_written,
            remaining = %outcome.remaining,
            "extracted file"
        );
        observer.on_bytes_written(outcome.bytes_written);
        observer.on_entry_complete(&path);

        Ok(())
    }

    fn abort(
        &self,
        session: ExtractionSession,
        request: &ExtractionRequest,
        cause: CopyError,
        observer: &mut dyn ExtractionObserver,
    ) -> ExtractionError {
        warn!(
            archive = %request.archive_name,
            error = %cause,
            tracked = session.created.len(),
            "extraction aborted, rolling back"
        );

        let summary = rollback(&self.fs, &session.created, observer);
        if !summary.is_complete() {
            warn!(
                archive = %request.archive_name,
                removed = summary.removed,
                orphaned = summary.orphaned.len(),
                "rollback left files behind"
            );
        }

        ExtractionError::ZipExtractionAborted {
            archive: request.archive_name.clone(),
            max_bytes: session.max_bytes,
            source: cause,
        }
    }
}

/// State of one extraction call. Never outlives it.
struct ExtractionSession {
    root: DestDir,
    max_bytes: ByteBudget,
    remaining: ByteBudget,
    created: Vec<PathBuf>,
    tracked: HashSet<PathBuf>,
    report: ExtractionReport,
}

impl ExtractionSession {
    fn new(root: DestDir, max_bytes: ByteBudget) -> Self {
        Self {
            root,
            max_bytes,
            remaining: max_bytes,
            created: Vec::new(),
            tracked: HashSet::new(),
            report: ExtractionReport::new(),
        }
    }

    /// Records a created file once, in creation order.
    fn track(&mut self, path: PathBuf) {
        if self.tracked.insert(path.clone()) {
            self.created.push(path);
        }
    }
}

/// Why a single entry could not be extracted.
#[derive(Debug)]
enum EntryError {
    Traversal(PathBuf),
    Io(io::Error),
    Copy(CopyError),
}

impl From<io::Error> for EntryError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<CopyError> for EntryError {
    fn from(err: CopyError) -> Self {
        Self::Copy(err)
    }
}
