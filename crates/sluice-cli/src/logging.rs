//! Diagnostic logging setup.
//!
//! `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and
//! `--quiet` drops everything below `error`. Logs go to stderr so they never
//! mix with `--json` output.

use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber.
pub fn init(verbose: bool, quiet: bool) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_directive(verbose, quiet))
    };

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

const fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "sluice_core=debug,sluice=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, false), "warn");
        assert_eq!(default_directive(false, true), "error");
        assert!(default_directive(true, false).contains("debug"));
    }
}
