//! Filesystem capability used by the extractor.
//!
//! Every filesystem touch made during an extraction goes through the
//! [`Filesystem`] trait so the path validator and the rollback logic can be
//! exercised against fakes. [`OsFilesystem`] is the real implementation.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Upper bound on symlinks followed while resolving one path.
const MAX_SYMLINK_HOPS: u8 = 40;

/// Sink buffer size for extracted files (64KB).
const SINK_BUFFER_SIZE: usize = 64 * 1024;

/// Filesystem operations needed to extract an archive.
pub trait Filesystem {
    /// Writer returned for a freshly created file.
    type Sink: Write;

    /// Returns `true` if `path` names an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns the absolute form of `path` with `.`, `..`, redundant
    /// separators and symlinks resolved.
    ///
    /// Must work for paths whose trailing components do not exist yet.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Creates `path` and all missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Creates (or truncates) the file at `path` and opens it for writing.
    fn create_file(&self, path: &Path) -> io::Result<Self::Sink>;

    /// Deletes the file at `path`, returning `false` instead of an error if
    /// it could not be deleted.
    fn try_delete(&self, path: &Path) -> bool;
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    type Sink = F::Sink;

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).canonicalize(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn create_file(&self, path: &Path) -> io::Result<Self::Sink> {
        (**self).create_file(path)
    }

    fn try_delete(&self, path: &Path) -> bool {
        (**self).try_delete(path)
    }
}

/// [`Filesystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    type Sink = BufWriter<File>;

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        resolve(&absolute, MAX_SYMLINK_HOPS)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn create_file(&self, path: &Path) -> io::Result<Self::Sink> {
        let file = File::create(path)?;
        Ok(BufWriter::with_capacity(SINK_BUFFER_SIZE, file))
    }

    fn try_delete(&self, path: &Path) -> bool {
        match fs::remove_file(path) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "remove_file failed");
                false
            }
        }
    }
}

/// Resolves an absolute path one component at a time.
///
/// `..` is applied to the already-resolved prefix, which never contains a
/// symlink, so popping it is exact. Every existing symlink is replaced by its
/// target, resolved recursively; dangling links are followed through their
/// link text so the result names the file a write would actually create.
/// Components that do not exist are kept as written.
fn resolve(path: &Path, hops_left: u8) -> io::Result<PathBuf> {
    let mut resolved = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);

                let is_symlink = fs::symlink_metadata(&resolved)
                    .map(|meta| meta.file_type().is_symlink())
                    .unwrap_or(false);
                if !is_symlink {
                    continue;
                }

                if hops_left == 0 {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("too many levels of symbolic links: {}", path.display()),
                    ));
                }

                let target = fs::read_link(&resolved)?;
                resolved.pop();
                resolved = resolve(&resolved.join(target), hops_left - 1)?;
            }
        }
    }

    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn canonical_temp() -> (TempDir, PathBuf) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let root = fs::canonicalize(temp.path()).expect("failed to canonicalize");
        (temp, root)
    }

    #[test]
    fn test_canonicalize_existing_matches_std() {
        let (_temp, root) = canonical_temp();
        fs::create_dir_all(root.join("a/b")).unwrap();

        let resolved = OsFilesystem.canonicalize(&root.join("a/./b")).unwrap();
        assert_eq!(resolved, fs::canonicalize(root.join("a/b")).unwrap());
    }

    #[test]
    fn test_canonicalize_missing_tail() {
        let (_temp, root) = canonical_temp();

        let resolved = OsFilesystem
            .canonicalize(&root.join("docs/sub/data.bin"))
            .unwrap();
        assert_eq!(resolved, root.join("docs").join("sub").join("data.bin"));
    }

    #[test]
    fn test_canonicalize_parent_dirs_through_missing_components() {
        let (_temp, root) = canonical_temp();

        let resolved = OsFilesystem
            .canonicalize(&root.join("missing/../../escaped"))
            .unwrap();
        assert_eq!(resolved, root.parent().unwrap().join("escaped"));
    }

    #[test]
    fn test_canonicalize_relative_path_is_absolute() {
        let resolved = OsFilesystem.canonicalize(Path::new("some/relative")).unwrap();
        assert!(resolved.is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn test_canonicalize_follows_symlinks() {
        use std::os::unix::fs::symlink;

        let (_temp, root) = canonical_temp();
        let outside = TempDir::new().unwrap();
        let outside_root = fs::canonicalize(outside.path()).unwrap();
        symlink(&outside_root, root.join("link")).unwrap();

        let resolved = OsFilesystem
            .canonicalize(&root.join("link/new.txt"))
            .unwrap();
        assert_eq!(resolved, outside_root.join("new.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_canonicalize_follows_dangling_symlink() {
        use std::os::unix::fs::symlink;

        let (_temp, root) = canonical_temp();
        symlink("/nonexistent-sluice-target/file", root.join("dangling")).unwrap();

        let resolved = OsFilesystem.canonicalize(&root.join("dangling")).unwrap();
        assert_eq!(resolved, PathBuf::from("/nonexistent-sluice-target/file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_canonicalize_symlink_loop_is_error() {
        use std::os::unix::fs::symlink;

        let (_temp, root) = canonical_temp();
        symlink(root.join("b"), root.join("a")).unwrap();
        symlink(root.join("a"), root.join("b")).unwrap();

        let result = OsFilesystem.canonicalize(&root.join("a/file"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_create_file_and_try_delete() {
        let (_temp, root) = canonical_temp();
        let path = root.join("file.txt");

        let mut sink = OsFilesystem.create_file(&path).unwrap();
        sink.write_all(b"data").unwrap();
        sink.flush().unwrap();
        drop(sink);

        assert_eq!(fs::read(&path).unwrap(), b"data");
        assert!(OsFilesystem.try_delete(&path));
        assert!(!path.exists());
        assert!(!OsFilesystem.try_delete(&path), "second delete must fail");
    }

    #[test]
    fn test_borrowed_filesystem_delegates() {
        let (_temp, root) = canonical_temp();
        let fs_ref = &OsFilesystem;

        fs_ref.create_dir_all(&root.join("x/y")).unwrap();
        assert!(Filesystem::is_dir(&fs_ref, &root.join("x/y")));
    }
}
