//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use crate::progress::OrphanCollector;
use anyhow::Context;
use anyhow::Result;
use sluice_core::ExtractionConfig;
use sluice_core::config::DEFAULT_MAX_TOTAL_BYTES;
use sluice_core::extract_archive_with_observer;
use std::env;

pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let config =
        ExtractionConfig::with_max_total_bytes(args.max_total_size.unwrap_or(DEFAULT_MAX_TOTAL_BYTES));
    if config.is_unlimited() {
        formatter.format_warning("size limit disabled; only extract archives you trust");
    }

    tracing::debug!(
        archive = %args.archive.display(),
        output = %output_dir.display(),
        max_total_bytes = config.max_total_bytes,
        "extract"
    );

    let (result, orphaned) = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Extracting");
        let result = extract_archive_with_observer(&args.archive, &output_dir, &config, &mut progress);
        (result, progress.orphaned().to_vec())
    } else {
        let mut collector = OrphanCollector::default();
        let result =
            extract_archive_with_observer(&args.archive, &output_dir, &config, &mut collector);
        (result, collector.orphaned().to_vec())
    };

    for path in &orphaned {
        formatter.format_warning(&format!("could not remove partially extracted file: {path}"));
    }

    let report = add_archive_context(result, &args.archive)?;
    formatter.format_extraction_result(&report)?;

    Ok(())
}
