//! Progress bar implementation for CLI extraction.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use sluice_core::ExtractionObserver;
use std::fmt::Write;
use std::path::Path;

/// CLI progress spinner implementing `ExtractionObserver`.
///
/// The entry count is unknown up front, so this shows a spinner with the
/// running file count, bytes written and the current entry name. Cleans up
/// on drop.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_written: u64,
    orphaned: Vec<String>,
}

impl CliProgress {
    /// Creates a new CLI progress spinner.
    ///
    /// # Arguments
    ///
    /// * `message` - Message to display (e.g., "Extracting")
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();

        // Template: "⠋ Extracting 42 entries (15.2 MB) docs/readme.txt"
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {prefix} {pos} entries ({bytes}) {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .with_key("bytes", |state: &ProgressState, w: &mut dyn Write| {
                    write!(w, "{}", humanize_bytes(state.len().unwrap_or(0))).unwrap_or(());
                }),
        );
        bar.set_prefix(message.to_string());
        bar.set_length(0);

        Self {
            bar,
            bytes_written: 0,
            orphaned: Vec::new(),
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }

    /// Paths rollback could not delete.
    pub fn orphaned(&self) -> &[String] {
        &self.orphaned
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ExtractionObserver for CliProgress {
    fn on_entry_start(&mut self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written = self.bytes_written.saturating_add(bytes);
        // Length carries the byte total for the `bytes` key; position counts entries.
        self.bar.set_length(self.bytes_written);
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_rollback_failure(&mut self, path: &Path) {
        self.orphaned.push(path.display().to_string());
    }
}

/// Collects rollback failures when no progress bar is shown.
#[derive(Debug, Default)]
pub struct OrphanCollector {
    orphaned: Vec<String>,
}

impl OrphanCollector {
    /// Paths rollback could not delete.
    pub fn orphaned(&self) -> &[String] {
        &self.orphaned
    }
}

impl ExtractionObserver for OrphanCollector {
    fn on_entry_start(&mut self, _name: &str) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_rollback_failure(&mut self, path: &Path) {
        self.orphaned.push(path.display().to_string());
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
