//! Entry path resolution and containment checks.
//!
//! An entry name is attacker-controlled. It is only trusted after it has been
//! joined to the canonical destination root, canonicalized itself, and shown
//! to still live strictly below that root.

use std::io;
use std::path::MAIN_SEPARATOR;
use std::path::Path;
use std::path::PathBuf;

use crate::io::Filesystem;
use crate::types::DestDir;

/// Outcome of resolving an entry name against the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryResolution {
    /// The entry lands strictly below the root.
    Inside(PathBuf),
    /// The entry escapes the root (or resolves to the root itself).
    Outside(PathBuf),
}

impl EntryResolution {
    /// Returns the resolved path regardless of the outcome.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Inside(path) | Self::Outside(path) => path,
        }
    }

    /// Returns `true` for [`EntryResolution::Inside`].
    #[must_use]
    pub const fn is_inside(&self) -> bool {
        matches!(self, Self::Inside(_))
    }
}

/// Rewrites both archive separator conventions to the host separator.
///
/// # Examples
///
/// ```
/// use sluice_core::security::normalize_entry_name;
///
/// # #[cfg(unix)]
/// assert_eq!(normalize_entry_name(r"docs\sub\data.bin"), "docs/sub/data.bin");
/// ```
#[must_use]
pub fn normalize_entry_name(name: &str) -> String {
    name.chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}

/// Resolves `entry_name` below `root` and checks containment.
///
/// The name is separator-normalized, joined to the root and canonicalized
/// through `fs`. Absolute names and drive prefixes replace the root when
/// joined and therefore come back as [`EntryResolution::Outside`].
///
/// # Errors
///
/// Returns an error only if canonicalization itself fails.
///
/// # Examples
///
/// ```no_run
/// use sluice_core::io::OsFilesystem;
/// use sluice_core::security::{EntryResolution, resolve_entry_path};
/// use sluice_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/tmp/out")?;
///
/// let ok = resolve_entry_path(&OsFilesystem, &dest, "docs/readme.txt")?;
/// assert!(ok.is_inside());
///
/// let evil = resolve_entry_path(&OsFilesystem, &dest, "../../etc/passwd")?;
/// assert!(matches!(evil, EntryResolution::Outside(_)));
/// # Ok(())
/// # }
/// ```
pub fn resolve_entry_path<F: Filesystem + ?Sized>(
    fs: &F,
    root: &DestDir,
    entry_name: &str,
) -> io::Result<EntryResolution> {
    let normalized = normalize_entry_name(entry_name);
    let joined = root.join_path(Path::new(&normalized));
    let resolved = fs.canonicalize(&joined)?;

    if is_within_root(root.as_path(), &resolved) {
        Ok(EntryResolution::Inside(resolved))
    } else {
        Ok(EntryResolution::Outside(resolved))
    }
}

/// Returns `true` if `candidate` begins with `root` immediately followed by
/// a separator.
///
/// The comparison is byte-wise. A bare prefix match is not enough:
/// `/extract-evil/x` is not within `/extract`.
#[must_use]
pub fn is_within_root(root: &Path, candidate: &Path) -> bool {
    let root = root.as_os_str().as_encoded_bytes();
    let candidate = candidate.as_os_str().as_encoded_bytes();

    let Some(rest) = candidate.strip_prefix(root) else {
        return false;
    };

    let sep = MAIN_SEPARATOR as u8;
    if root.last() == Some(&sep) {
        !rest.is_empty()
    } else {
        rest.len() > 1 && rest[0] == sep
    }
}
