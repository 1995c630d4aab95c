//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use sluice_core::ExtractionReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    out: Term,
    err: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, c) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            self.out.write_line(&format!(
                "{} Extraction complete",
                style("✓").green().bold()
            ))?;
        } else {
            self.out.write_line("Extraction complete")?;
        }

        self.out.write_line(&format!(
            "  Files extracted: {}",
            Self::format_number(report.files_extracted)
        ))?;
        self.out.write_line(&format!(
            "  Directories: {}",
            Self::format_number(report.directories_created)
        ))?;
        self.out
            .write_line(&format!("  Total size: {}", humanize_bytes(report.bytes_written)))?;

        if self.verbose {
            self.out
                .write_line(&format!("  Bytes written: {}", report.bytes_written))?;
            self.out
                .write_line(&format!("  Duration: {:?}", report.duration))?;
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Errors are shown even in quiet mode
        let line = if self.use_colors {
            format!("{} {error:?}", style("ERROR:").red().bold())
        } else {
            format!("ERROR: {error:?}")
        };
        let _ = self.err.write_line(&line);
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let line = if self.use_colors {
            format!("{} {message}", style("⚠").yellow().bold())
        } else {
            format!("WARNING: {message}")
        };
        let _ = self.err.write_line(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_small() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(42), "42");
        assert_eq!(HumanFormatter::format_number(999), "999");
    }

    #[test]
    fn test_format_number_thousands() {
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(1234), "1,234");
        assert_eq!(HumanFormatter::format_number(999_999), "999,999");
    }

    #[test]
    fn test_format_number_millions() {
        assert_eq!(HumanFormatter::format_number(1_000_000), "1,000,000");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
        assert_eq!(
            HumanFormatter::format_number(123_456_789_012),
            "123,456,789,012"
        );
    }
}
