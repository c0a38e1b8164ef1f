//! Error types for the driver
//!
//! Two classes of failure exist, with very different consequences:
//!
//! - [`ConfigError`] — detected at construction. A pin assignment where two
//!   control lines share one physical pin could energize two coils at once,
//!   so a driver refuses to come up rather than run on ambiguous wiring. The
//!   caller should treat this as fatal and halt the device.
//! - [`Error`] — per-call failures (range, state, bus). These are local and
//!   recoverable: the operation is rejected, no pin state changes, and the
//!   caller may retry after the condition clears. The crate never retries on
//!   its own.

use core::fmt::Debug;

use crate::interface::LineId;

/// Errors detected while validating a configuration.
///
/// These occur before any pin is driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Two configured control lines reference the same physical pin
    DuplicateLine {
        /// The pin that appears more than once in the assignment
        line: LineId,
    },
    /// A requested grid does not fit the address space of the attached drivers
    GridExceedsDrivers {
        /// Requested physical column extent
        cols: u16,
        /// Requested physical row extent
        rows: u16,
        /// Column outputs available on the column-side driver
        col_max: u16,
        /// Row outputs available on the row-side driver
        row_max: u16,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DuplicateLine { line } => {
                write!(f, "Control line {line} is assigned more than once")
            }
            Self::GridExceedsDrivers {
                cols,
                rows,
                col_max,
                row_max,
            } => write!(
                f,
                "Grid {cols}x{rows} exceeds driver address space {col_max}x{row_max}"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Errors that can occur when operating a driver, actuator, or matrix.
///
/// Generic over the control-bus error type to preserve the specific hardware
/// error for callers that want to match on it.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// Control bus error (GPIO)
    Bus(E),
    /// Configuration rejected at construction; fatal by policy
    Config(ConfigError),
    /// Output number outside the driver's address space
    ///
    /// Nothing was written; the previously selected output is still on the
    /// lines.
    OutputOutOfRange {
        /// The rejected output number
        output: u16,
        /// Highest addressable output on this driver
        max: u16,
    },
    /// Address or polarity change attempted while the enable line is asserted
    ///
    /// Changing selection mid-pulse would steer current into an unintended
    /// coil. Retry after the pulse completes.
    Enabled,
    /// Logical coordinate outside the configured grid
    DotOutOfBounds {
        /// Requested column (1-based)
        col: u16,
        /// Requested row (1-based)
        row: u16,
    },
}

impl<E> From<ConfigError> for Error<E> {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl<E: Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Control bus error: {e:?}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::OutputOutOfRange { output, max } => {
                write!(f, "Output {output} is out of range 1 to {max}")
            }
            Self::Enabled => write!(f, "Chip is enabled; selection cannot change mid-pulse"),
            Self::DotOutOfBounds { col, row } => {
                write!(f, "Dot ({col}, {row}) is outside the configured grid")
            }
        }
    }
}

impl<E: Debug> core::error::Error for Error<E> {}
