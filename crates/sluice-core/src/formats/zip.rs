//! ZIP archive entry source.

use std::io;
use std::io::Read;
use std::io::Seek;

use zip::result::ZipError;

use super::traits::ArchiveEntry;
use super::traits::EntrySource;

/// Yields the entries of a ZIP archive in central-directory order.
///
/// Entry names come from the `zip` crate, which decodes legacy names without
/// the UTF-8 flag as CP437.
pub struct ZipEntries<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    index: usize,
}

impl<R: Read + Seek> ZipEntries<R> {
    /// Reads the central directory of a ZIP archive.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive is not a readable ZIP file.
    pub fn new(reader: R) -> io::Result<Self> {
        let archive = zip::ZipArchive::new(reader).map_err(into_io_error)?;
        Ok(Self { archive, index: 0 })
    }

    /// Returns the number of entries in the archive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

impl<R: Read + Seek> EntrySource for ZipEntries<R> {
    fn next_entry(&mut self) -> io::Result<Option<ArchiveEntry<'_>>> {
        if self.index >= self.archive.len() {
            return Ok(None);
        }

        let index = self.index;
        self.index += 1;

        let file = self.archive.by_index(index).map_err(into_io_error)?;
        Ok(Some(ArchiveEntry {
            name: file.name().to_owned(),
            is_dir: file.is_dir(),
            reader: Box::new(file),
        }))
    }
}

fn into_io_error(err: ZipError) -> io::Error {
    match err {
        ZipError::Io(inner) => inner,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}
