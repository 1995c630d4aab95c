//! Best-effort removal of files created by a failed extraction.

use std::path::PathBuf;

use tracing::warn;

use crate::io::Filesystem;
use crate::report::ExtractionObserver;

/// What a rollback managed to undo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollbackReport {
    /// Number of files deleted.
    pub removed: usize,
    /// Files that could not be deleted and are still on disk.
    pub orphaned: Vec<PathBuf>,
}

impl RollbackReport {
    /// Returns `true` if every tracked file was deleted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.orphaned.is_empty()
    }
}

/// Attempts to delete every path in `created`, in order, exactly once.
///
/// A failed deletion never stops the loop and never produces an error: it is
/// logged, handed to the observer and recorded in the returned report.
pub fn rollback<F: Filesystem + ?Sized>(
    fs: &F,
    created: &[PathBuf],
    observer: &mut dyn ExtractionObserver,
) -> RollbackReport {
    let mut report = RollbackReport::default();

    for path in created {
        if fs.try_delete(path) {
            report.removed += 1;
            continue;
        }

        warn!(path = %path.display(), "could not remove file during rollback");
        observer.on_rollback_failure(path);
        report.orphaned.push(path.clone());
    }

    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::io::OsFilesystem;
    use crate::report::NoopObserver;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        failures: Vec<PathBuf>,
    }

    impl ExtractionObserver for Recorder {
        fn on_entry_start(&mut self, _name: &str) {}

        fn on_bytes_written(&mut self, _bytes: u64) {}

        fn on_entry_complete(&mut self, _path: &Path) {}

        fn on_rollback_failure(&mut self, path: &Path) {
            self.failures.push(path.to_path_buf());
        }
    }

    #[test]
    fn test_rollback_removes_all_files() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let a = temp.path().join("a.txt");
        let b = temp.path().join("sub").join("b.txt");
        fs::create_dir_all(b.parent().unwrap()).unwrap();
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let report = rollback(&OsFilesystem, &[a.clone(), b.clone()], &mut NoopObserver);

        assert_eq!(report.removed, 2);
        assert!(report.is_complete());
        assert!(!a.exists());
        assert!(!b.exists());
        // Parent directories are not part of the tracked set.
        assert!(temp.path().join("sub").is_dir());
    }

    #[test]
    fn test_rollback_continues_past_failures() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let missing = temp.path().join("never-created.txt");
        let present = temp.path().join("present.txt");
        fs::write(&present, "x").unwrap();

        let mut recorder = Recorder::default();
        let report = rollback(
            &OsFilesystem,
            &[missing.clone(), present.clone()],
            &mut recorder,
        );

        assert_eq!(report.removed, 1);
        assert_eq!(report.orphaned, vec![missing.clone()]);
        assert!(!report.is_complete());
        assert_eq!(recorder.failures, vec![missing]);
        assert!(!present.exists());
    }

    #[test]
    fn test_rollback_of_nothing() {
        let report = rollback(&OsFilesystem, &[], &mut NoopObserver);
        assert_eq!(report, RollbackReport::default());
    }
}
