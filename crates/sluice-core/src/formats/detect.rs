//! Archive format detection.

use std::path::Path;

use crate::ExtractionError;
use crate::Result;

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// ZIP archive.
    Zip,
}

/// Detects the archive type from a file path.
///
/// Detection is by extension and case-insensitive.
///
/// # Errors
///
/// Returns `ExtractionError::UnsupportedFormat` if the format cannot be
/// determined.
pub fn detect_format(path: &Path) -> Result<ArchiveType> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or(ExtractionError::UnsupportedFormat)?;

    match extension.to_ascii_lowercase().as_str() {
        "tar" => Ok(ArchiveType::Tar),
        "gz" | "tgz" => Ok(ArchiveType::TarGz),
        "zip" => Ok(ArchiveType::Zip),
        _ => Err(ExtractionError::UnsupportedFormat),
    }
}
