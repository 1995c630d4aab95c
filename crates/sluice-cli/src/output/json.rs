//! JSON output formatter for machine-readable results.
//!
//! Results and errors go to stdout as one JSON document each. Warnings go to
//! stderr so stdout stays parseable.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use sluice_core::ExtractionReport;
use std::io;
use std::io::Write;

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct ExtractionOutput {
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    duration_ms: u128,
}

impl From<&ExtractionReport> for ExtractionOutput {
    fn from(report: &ExtractionReport) -> Self {
        Self {
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        }
    }
}

#[derive(Debug, Serialize)]
struct WarningData {
    message: String,
}

impl JsonFormatter {
    fn output<T: Serialize>(mut writer: impl Write, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        let output = JsonOutput::success("extract", ExtractionOutput::from(report));
        Self::output(io::stdout(), &output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("extract", format!("{error:#}"));
        let _ = Self::output(io::stdout(), &output);
    }

    fn format_warning(&self, message: &str) {
        let output = JsonOutput::warning(
            "extract",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(io::stderr(), &output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_extraction_output_structure() {
        let report = ExtractionReport {
            files_extracted: 2,
            directories_created: 1,
            bytes_written: 250,
            duration: Duration::from_millis(7),
        };
        let mut buf = Vec::new();
        JsonFormatter::output(&mut buf, &JsonOutput::success("extract", ExtractionOutput::from(&report)))
            .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["bytes_written"], 250);
        assert_eq!(json["data"]["duration_ms"], 7);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_output_structure() {
        let mut buf = Vec::new();
        JsonFormatter::output(&mut buf, &JsonOutput::<()>::error("extract", "boom")).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }
}
