//! Extraction configuration.

/// Default cap on bytes written by one extraction (500 MiB).
pub const DEFAULT_MAX_TOTAL_BYTES: u64 = 500 * 1024 * 1024;

/// Configuration for the path-based extraction API.
///
/// # Examples
///
/// ```
/// use sluice_core::ExtractionConfig;
///
/// // Secure default: 500 MiB
/// let config = ExtractionConfig::default();
///
/// let small = ExtractionConfig {
///     max_total_bytes: 10 * 1024 * 1024,
/// };
///
/// // Trusted archives only
/// let unlimited = ExtractionConfig::unlimited();
/// assert!(unlimited.is_unlimited());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Maximum total bytes written to disk; `0` disables the limit.
    pub max_total_bytes: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_total_bytes: DEFAULT_MAX_TOTAL_BYTES,
        }
    }
}

impl ExtractionConfig {
    /// Creates a configuration without a byte limit.
    ///
    /// Only use this for archives from trusted sources.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self { max_total_bytes: 0 }
    }

    /// Creates a configuration with the given limit.
    #[must_use]
    pub const fn with_max_total_bytes(max_total_bytes: u64) -> Self {
        Self { max_total_bytes }
    }

    /// Returns `true` if no byte limit applies.
    #[must_use]
    pub const fn is_unlimited(&self) -> bool {
        self.max_total_bytes == 0
    }
}
