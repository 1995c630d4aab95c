//! Archive entry sources for the supported formats.

pub mod detect;
pub mod tar;
pub mod traits;
pub mod zip;

pub use detect::ArchiveType;
pub use detect::detect_format;
pub use self::tar::TarEntries;
pub use traits::ArchiveEntry;
pub use traits::EntrySource;
pub use self::zip::ZipEntries;
