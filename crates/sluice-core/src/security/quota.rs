//! Byte budget tracking for a single extraction call.

use std::fmt;

/// Remaining number of bytes an extraction may still write.
///
/// A budget only ever decreases. `Remaining(0)` is an exhausted budget and is
/// distinct from [`ByteBudget::Unlimited`]: zero-length files still fit, any
/// further byte does not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ByteBudget {
    /// No limit is enforced.
    #[default]
    Unlimited,
    /// At most this many more bytes may be written.
    Remaining(u64),
}

impl ByteBudget {
    /// Builds a budget from a configured maximum, where `0` means unlimited.
    ///
    /// # Examples
    ///
    /// ```
    /// use sluice_core::security::ByteBudget;
    ///
    /// assert_eq!(ByteBudget::from_max(0), ByteBudget::Unlimited);
    /// assert_eq!(ByteBudget::from_max(1000), ByteBudget::Remaining(1000));
    /// ```
    #[must_use]
    pub const fn from_max(max: u64) -> Self {
        if max == 0 {
            Self::Unlimited
        } else {
            Self::Remaining(max)
        }
    }

    /// Subtracts `bytes` from the budget.
    ///
    /// Returns `None` when `bytes` is strictly greater than what remains.
    /// Consuming exactly the remaining amount succeeds and leaves
    /// `Remaining(0)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sluice_core::security::ByteBudget;
    ///
    /// let budget = ByteBudget::from_max(100);
    /// assert_eq!(budget.consume(100), Some(ByteBudget::Remaining(0)));
    /// assert_eq!(budget.consume(101), None);
    /// ```
    #[must_use]
    pub const fn consume(self, bytes: u64) -> Option<Self> {
        match self {
            Self::Unlimited => Some(Self::Unlimited),
            Self::Remaining(left) => match left.checked_sub(bytes) {
                Some(rest) => Some(Self::Remaining(rest)),
                None => None,
            },
        }
    }

    /// Returns the remaining byte count, or `None` when unlimited.
    #[must_use]
    pub const fn limit(self) -> Option<u64> {
        match self {
            Self::Unlimited => None,
            Self::Remaining(left) => Some(left),
        }
    }

    /// Returns `true` if no limit is enforced.
    #[must_use]
    pub const fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

impl fmt::Display for ByteBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.write_str("unlimited"),
            Self::Remaining(left) => write!(f, "{left} bytes"),
        }
    }
}
