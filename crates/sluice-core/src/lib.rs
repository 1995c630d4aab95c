//! Budgeted, traversal-safe archive extraction.
//!
//! `sluice-core` writes the entries of a ZIP or tar archive below a
//! destination directory while enforcing two guarantees:
//!
//! - no entry is ever written outside the destination, whatever its name
//!   contains (`..` segments, absolute paths, backslashes or symlinks already
//!   present on disk)
//! - the total number of bytes written never exceeds a configured budget by
//!   more than one copy chunk; an overrun removes every file the call created
//!
//! # Examples
//!
//! ```no_run
//! use sluice_core::ExtractionConfig;
//! use sluice_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractionConfig::default();
//! let report = extract_archive("archive.zip", "/output/dir", &config)?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```
//!
//! Callers that already hold an archive stream can drive the
//! [`Extractor`] directly through any [`EntrySource`](formats::EntrySource).

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod io;
pub mod report;
pub mod security;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::extract_archive;
pub use api::extract_archive_with_observer;
pub use archive::ArchiveBuilder;
pub use config::ExtractionConfig;
pub use error::CopyError;
pub use error::ExtractionError;
pub use error::Result;
pub use extraction::ExtractionRequest;
pub use extraction::Extractor;
pub use report::ExtractionObserver;
pub use report::ExtractionReport;
pub use report::NoopObserver;
pub use security::ByteBudget;
pub use types::DestDir;
