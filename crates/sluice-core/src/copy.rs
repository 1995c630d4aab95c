//! Budgeted stream copy with a reusable buffer.
//!
//! Bytes are moved from a reader to a writer in fixed-size chunks. After every
//! chunk is written the running total is checked against the caller's
//! remaining [`ByteBudget`]; the first overrun stops the copy before another
//! read is issued.
//!
//! # Closing streams
//!
//! [`copy_budgeted`] takes its reader and writer by value. Handing over owned
//! streams closes both on every exit path (success, budget overrun and I/O
//! failure alike, including unwinding) because they are dropped when the call
//! returns. Passing `&mut` borrows instead leaves them open for the caller.

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::error::CopyError;
use crate::security::ByteBudget;

/// Chunk size for copy operations (8KB).
const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Fixed-size buffer reused across every copy of an extraction session.
///
/// # Examples
///
/// ```no_run
/// # use sluice_core::copy::{CopyBuffer, copy_budgeted};
/// # use sluice_core::security::ByteBudget;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut buffer = CopyBuffer::new();
/// let input = std::fs::File::open("input.txt")?;
/// let output = std::fs::File::create("output.txt")?;
///
/// let outcome = copy_budgeted(input, output, ByteBudget::from_max(1024), &mut buffer)?;
/// println!("Copied {} bytes", outcome.bytes_written);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: [u8; COPY_BUFFER_SIZE],
}

impl CopyBuffer {
    /// Creates a new zero-initialized copy buffer.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: [0u8; COPY_BUFFER_SIZE],
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        COPY_BUFFER_SIZE
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a successful budgeted copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Exact number of bytes transferred.
    pub bytes_written: u64,
    /// Budget left after subtracting `bytes_written`.
    pub remaining: ByteBudget,
}

/// Copies `reader` into `writer` without exceeding `budget`.
///
/// The overrun check happens after each chunk has been written, so a copy
/// that fails with [`CopyError::BudgetExceeded`] may leave up to one chunk
/// past the limit in the sink. The writer is flushed on success.
///
/// # Errors
///
/// - [`CopyError::BudgetExceeded`] as soon as the running total is strictly
///   greater than the remaining budget
/// - [`CopyError::Io`] if a read, write or the final flush fails
///
/// # Examples
///
/// ```
/// use sluice_core::copy::{CopyBuffer, copy_budgeted};
/// use sluice_core::error::CopyError;
/// use sluice_core::security::ByteBudget;
///
/// let mut buffer = CopyBuffer::new();
/// let mut sink = Vec::<u8>::new();
///
/// let outcome = copy_budgeted(&b"hello"[..], &mut sink, ByteBudget::from_max(5), &mut buffer);
/// assert_eq!(outcome.map(|o| o.bytes_written).ok(), Some(5));
///
/// let overrun = copy_budgeted(&b"hello"[..], Vec::<u8>::new(), ByteBudget::from_max(4), &mut buffer);
/// assert!(matches!(overrun, Err(CopyError::BudgetExceeded { .. })));
/// ```
pub fn copy_budgeted<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    budget: ByteBudget,
    buffer: &mut CopyBuffer,
) -> Result<CopyOutcome, CopyError> {
    let limit = budget.limit().unwrap_or(u64::MAX);
    let mut total: u64 = 0;
    let mut remaining = budget;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Io(e)),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;

        total = total
            .checked_add(bytes_read as u64)
            .ok_or(CopyError::BudgetExceeded {
                written: u64::MAX,
                limit,
            })?;

        remaining = budget
            .consume(total)
            .ok_or(CopyError::BudgetExceeded {
                written: total,
                limit,
            })?;
    }

    writer.flush()?;

    Ok(CopyOutcome {
        bytes_written: total,
        remaining,
    })
}
