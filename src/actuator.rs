//! One-dot actuation across a column driver and a row driver
//!
//! A flip-dot matrix energizes exactly one coil at a time: the column-side
//! driver and the row-side driver select one output each, take opposite
//! polarities so current can only flow through the selected intersection, and
//! are then enabled together for one timed pulse.
//!
//! The actuator is deliberately dumb about geometry. It works in physical
//! driver outputs; logical-to-physical remapping is the
//! [`Matrix`](crate::matrix::Matrix)'s job.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::config::DEFAULT_PULSE_LENGTH_US;
use crate::driver::{OutputDriver, Polarity};
use crate::error::{ConfigError, Error};

/// Coordinates one column-side and one row-side driver to flip single dots.
///
/// Both sides implement [`OutputDriver`] over the same bus error type; any
/// mix of variants works (a single chip on the columns and a chained bank on
/// the rows is a common wiring).
pub struct DotActuator<C, R> {
    /// Column-side driver
    column: C,
    /// Row-side driver
    row: R,
    /// Highest addressable physical column
    cols: u16,
    /// Highest addressable physical row
    rows: u16,
    /// Pulse length in microseconds
    pulse_us: u32,
}

impl<E, C, R> DotActuator<C, R>
where
    E: Debug,
    C: OutputDriver<BusError = E>,
    R: OutputDriver<BusError = E>,
{
    /// Create an actuator spanning the full address space of both drivers.
    pub fn new(column: C, row: R) -> Self {
        let cols = column.output_max();
        let rows = row.output_max();
        Self {
            column,
            row,
            cols,
            rows,
            pulse_us: DEFAULT_PULSE_LENGTH_US,
        }
    }

    /// Create an actuator restricted to `cols` x `rows` physical outputs.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the requested extent does not fit the drivers'
    /// address spaces.
    pub fn with_bounds(column: C, row: R, cols: u16, rows: u16) -> Result<Self, Error<E>> {
        let col_max = column.output_max();
        let row_max = row.output_max();
        if cols > col_max || rows > row_max {
            return Err(Error::Config(ConfigError::GridExceedsDrivers {
                cols,
                rows,
                col_max,
                row_max,
            }));
        }
        Ok(Self {
            column,
            row,
            cols,
            rows,
            pulse_us: DEFAULT_PULSE_LENGTH_US,
        })
    }

    /// Physical column bound.
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Physical row bound.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Configured pulse length in microseconds.
    pub fn pulse_length_us(&self) -> u32 {
        self.pulse_us
    }

    /// Change the pulse length.
    pub fn set_pulse_length_us(&mut self, us: u32) {
        self.pulse_us = us;
    }

    /// Flip the dot at physical `(col, row)` to shown (`true`) or hidden.
    ///
    /// Out-of-bounds coordinates are rejected before any line changes. The
    /// selected intersection is then pulsed for the configured length with
    /// the row side sourcing on show and sinking on hide, the column side
    /// always opposite.
    pub fn flip<D: DelayNs>(
        &mut self,
        col: u16,
        row: u16,
        visible: bool,
        delay: &mut D,
    ) -> Result<(), Error<E>> {
        if col < 1 || col > self.cols || row < 1 || row > self.rows {
            return Err(Error::DotOutOfBounds { col, row });
        }
        debug!(
            "flip ({}, {}) {} with {} us pulse",
            col,
            row,
            if visible { "show" } else { "hide" },
            self.pulse_us
        );

        self.column.select_output(col)?;
        self.row.select_output(row)?;

        let row_polarity = Polarity::from_high(visible);
        self.row.set_polarity(row_polarity)?;
        self.column.set_polarity(row_polarity.invert())?;

        self.column.enable()?;
        if let Err(e) = self.row.enable() {
            // never leave one side conducting on its own
            let _ = self.column.disable();
            return Err(e);
        }
        delay.delay_us(self.pulse_us);
        let col_result = self.column.disable();
        let row_result = self.row.disable();
        col_result?;
        row_result
    }

    /// Flip the dot to its visible face.
    pub fn show<D: DelayNs>(&mut self, col: u16, row: u16, delay: &mut D) -> Result<(), Error<E>> {
        self.flip(col, row, true, delay)
    }

    /// Flip the dot to its hidden face.
    pub fn hide<D: DelayNs>(&mut self, col: u16, row: u16, delay: &mut D) -> Result<(), Error<E>> {
        self.flip(col, row, false, delay)
    }
}
