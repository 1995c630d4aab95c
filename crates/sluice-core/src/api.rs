//! High-level public API for archive extraction.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::ExtractionConfig;
use crate::ExtractionReport;
use crate::Result;
use crate::extraction::ExtractionRequest;
use crate::extraction::Extractor;
use crate::formats::ArchiveType;
use crate::formats::TarEntries;
use crate::formats::ZipEntries;
use crate::formats::detect_format;
use crate::report::ExtractionObserver;
use crate::report::NoopObserver;

/// Extracts an archive to the specified output directory.
///
/// The archive format is detected from the file extension. The output
/// directory must already exist.
///
/// # Arguments
///
/// * `archive_path` - Path to the archive file
/// * `output_dir` - Existing directory where files will be extracted
/// * `config` - Byte limit for the extraction
///
/// # Errors
///
/// Returns an error if:
/// - Archive format is unsupported
/// - Archive file cannot be opened or parsed
/// - An entry escapes the output directory
/// - The byte limit is exceeded (created files are removed)
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use sluice_core::ExtractionConfig;
/// use sluice_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractionConfig::default();
/// let report = extract_archive("archive.tar.gz", "/tmp/output", &config)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
) -> Result<ExtractionReport> {
    extract_archive_with_observer(archive_path, output_dir, config, &mut NoopObserver)
}

/// Extracts an archive, reporting progress to `observer`.
///
/// # Errors
///
/// Same as [`extract_archive`].
pub fn extract_archive_with_observer<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
    observer: &mut dyn ExtractionObserver,
) -> Result<ExtractionReport> {
    let archive_path = archive_path.as_ref();
    let format = detect_format(archive_path)?;

    let request = ExtractionRequest::new(
        archive_name(archive_path),
        output_dir.as_ref(),
        config.max_total_bytes,
    );
    let extractor = Extractor::new();
    let file = File::open(archive_path)?;

    tracing::debug!(archive = %archive_path.display(), ?format, "opened archive");

    match format {
        ArchiveType::Zip => {
            let mut source = ZipEntries::new(BufReader::new(file))?;
            extractor.extract_with_observer(&mut source, &request, observer)
        }
        ArchiveType::Tar => {
            let mut archive = tar::Archive::new(BufReader::new(file));
            let mut source = TarEntries::new(&mut archive)?;
            extractor.extract_with_observer(&mut source, &request, observer)
        }
        ArchiveType::TarGz => {
            let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
            let mut source = TarEntries::new(&mut archive)?;
            extractor.extract_with_observer(&mut source, &request, observer)
        }
    }
}

fn archive_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| {
            name.to_string_lossy().into_owned()
        })
}
