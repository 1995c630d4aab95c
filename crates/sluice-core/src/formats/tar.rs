//! Tar archive entry source.

use std::io;
use std::io::Read;

use tar::EntryType;

use super::traits::ArchiveEntry;
use super::traits::EntrySource;

/// Yields the regular files and directories of a tar archive.
///
/// Other entry kinds (symlinks, hardlinks, devices, fifos, sparse files) have
/// no representation in an [`ArchiveEntry`] and are skipped with a warning.
pub struct TarEntries<'a, R: 'a + Read> {
    entries: tar::Entries<'a, R>,
}

impl<'a, R: Read> TarEntries<'a, R> {
    /// Starts iterating over `archive` from its first header.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive was already partially read.
    pub fn new(archive: &'a mut tar::Archive<R>) -> io::Result<Self> {
        Ok(Self {
            entries: archive.entries()?,
        })
    }
}

impl<R: Read> EntrySource for TarEntries<'_, R> {
    fn next_entry(&mut self) -> io::Result<Option<ArchiveEntry<'_>>> {
        for entry in self.entries.by_ref() {
            let entry = entry?;
            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();

            let is_dir = match entry.header().entry_type() {
                EntryType::Regular | EntryType::Continuous => false,
                EntryType::Directory => true,
                other => {
                    tracing::warn!(entry = %name, kind = ?other, "skipping unsupported tar entry");
                    continue;
                }
            };

            return Ok(Some(ArchiveEntry {
                name,
                is_dir,
                reader: Box::new(entry),
            }));
        }

        Ok(None)
    }
}
