//! Archive entry source abstraction.
//!
//! Archive parsing belongs to format libraries. The extractor only needs a
//! sequence of entries, each with a name, a directory flag and a stream of
//! its decompressed bytes.

use std::fmt;
use std::io;
use std::io::Read;

/// One logical file or directory record read from an archive.
///
/// The reader borrows the source it came from, so an entry has to be dropped
/// before the next one can be requested. Dropping it releases the stream.
pub struct ArchiveEntry<'a> {
    /// Entry name as stored in the archive, separators not yet normalized.
    pub name: String,
    /// Whether this entry is a directory marker.
    pub is_dir: bool,
    /// Decompressed content of the entry.
    pub reader: Box<dyn Read + 'a>,
}

impl<'a> ArchiveEntry<'a> {
    /// Creates a file entry.
    pub fn file(name: impl Into<String>, reader: impl Read + 'a) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            reader: Box::new(reader),
        }
    }

    /// Creates a directory entry with an empty stream.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            reader: Box::new(io::empty()),
        }
    }
}

impl fmt::Debug for ArchiveEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveEntry")
            .field("name", &self.name)
            .field("is_dir", &self.is_dir)
            .finish_non_exhaustive()
    }
}

/// Ordered, lazily consumed sequence of archive entries.
pub trait EntrySource {
    /// Advances to the next entry.
    ///
    /// Returns `Ok(None)` once the archive is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read at this position.
    fn next_entry(&mut self) -> io::Result<Option<ArchiveEntry<'_>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestSource {
        remaining: Vec<(&'static str, bool)>,
    }

    impl EntrySource for TestSource {
        fn next_entry(&mut self) -> io::Result<Option<ArchiveEntry<'_>>> {
            Ok(self.remaining.pop().map(|(name, is_dir)| {
                if is_dir {
                    ArchiveEntry::directory(name)
                } else {
                    ArchiveEntry::file(name, name.as_bytes())
                }
            }))
        }
    }

    #[test]
    fn test_trait_implementation() {
        let mut source = TestSource {
            remaining: vec![("file.txt", false), ("dir/", true)],
        };

        let first = source.next_entry().ok().flatten();
        assert!(first.is_some_and(|e| e.is_dir && e.name == "dir/"));

        let mut content = String::new();
        if let Ok(Some(mut second)) = source.next_entry() {
            assert!(!second.is_dir);
            second.reader.read_to_string(&mut content).ok();
        }
        assert_eq!(content, "file.txt");

        assert!(matches!(source.next_entry(), Ok(None)));
    }

    #[test]
    fn test_entry_debug_omits_reader() {
        let entry = ArchiveEntry::directory("docs/");
        let debug = format!("{entry:?}");
        assert!(debug.contains("docs/"));
        assert!(debug.contains("is_dir: true"));
    }
}
