//! I/O utilities for archive operations.
//!
//! This module holds the filesystem capability every extraction goes
//! through.

pub mod fs;

pub use fs::Filesystem;
pub use fs::OsFilesystem;
