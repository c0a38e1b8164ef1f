//! The user-facing dot grid
//!
//! A [`Matrix`] binds a [`DotActuator`] to a logical `width` x `height` grid
//! through a [`CoordinateMap`]. Callers address dots in logical coordinates
//! with the origin at the top left; whatever mirroring or row pairing the
//! panel wiring requires happens inside the map.
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use fp2800a::{AddressPins, ChipPins, ControlBus, Fp2800a, Matrix};
//!
//! # #[derive(Clone)]
//! # struct NullBus;
//! # impl ControlBus for NullBus {
//! #     type Error = Infallible;
//! #     fn set_line(&mut self, _line: u8, _high: bool) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct NullDelay;
//! # impl embedded_hal::delay::DelayNs for NullDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # fn main() -> Result<(), fp2800a::Error<Infallible>> {
//! let columns = Fp2800a::new(NullBus, ChipPins::new(0, 1, AddressPins::new(2, 3, 4, 5, 6)))?;
//! let rows = Fp2800a::new(NullBus, ChipPins::new(0, 1, AddressPins::new(2, 3, 4, 5, 6)))?;
//! let mut matrix = Matrix::lawo_28x13(columns, rows)?;
//! let mut delay = NullDelay;
//!
//! matrix.show(1, 1, &mut delay)?;
//! matrix.hide(28, 13, &mut delay)?;
//! # Ok(())
//! # }
//! ```

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;

use crate::actuator::DotActuator;
use crate::driver::OutputDriver;
use crate::error::Error;
use crate::mapping::{CoordinateMap, Identity, Lawo28x13};
use crate::sink::{DotSink, NoopSink};

/// A logical dot grid over a column-side and a row-side driver.
pub struct Matrix<C, R, M, S = NoopSink> {
    /// The one-dot pulse engine
    actuator: DotActuator<C, R>,
    /// Logical-to-physical remap
    map: M,
    /// Logical grid width
    width: u16,
    /// Logical grid height
    height: u16,
    /// Debug mirror, notified after each successful actuation
    sink: S,
}

impl<E, C, R, M> Matrix<C, R, M, NoopSink>
where
    E: Debug,
    C: OutputDriver<BusError = E>,
    R: OutputDriver<BusError = E>,
    M: CoordinateMap,
{
    /// Create a matrix over `map` with the given logical dimensions.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the map's physical extent for this grid does
    /// not fit the drivers' address spaces.
    pub fn new(column: C, row: R, map: M, width: u16, height: u16) -> Result<Self, Error<E>> {
        let (phys_cols, phys_rows) = map.physical_extent(width, height);
        let actuator = DotActuator::with_bounds(column, row, phys_cols, phys_rows)?;
        Ok(Self {
            actuator,
            map,
            width,
            height,
            sink: NoopSink,
        })
    }
}

impl<E, C, R> Matrix<C, R, Identity, NoopSink>
where
    E: Debug,
    C: OutputDriver<BusError = E>,
    R: OutputDriver<BusError = E>,
{
    /// Matrix wired in logical order, no remapping.
    pub fn generic(column: C, row: R, width: u16, height: u16) -> Result<Self, Error<E>> {
        Self::new(column, row, Identity, width, height)
    }
}

impl<E, C, R> Matrix<C, R, Lawo28x13, NoopSink>
where
    E: Debug,
    C: OutputDriver<BusError = E>,
    R: OutputDriver<BusError = E>,
{
    /// The Lawo Luminator 28x13 panel: mirrored columns, one physical row
    /// output pair per logical row.
    pub fn lawo_28x13(column: C, row: R) -> Result<Self, Error<E>> {
        Self::new(column, row, Lawo28x13, Lawo28x13::WIDTH, Lawo28x13::HEIGHT)
    }
}

impl<E, C, R, M, S> Matrix<C, R, M, S>
where
    E: Debug,
    C: OutputDriver<BusError = E>,
    R: OutputDriver<BusError = E>,
    M: CoordinateMap,
    S: DotSink,
{
    /// Attach a debug sink, replacing the current one.
    pub fn with_sink<S2: DotSink>(self, sink: S2) -> Matrix<C, R, M, S2> {
        Matrix {
            actuator: self.actuator,
            map: self.map,
            width: self.width,
            height: self.height,
            sink,
        }
    }

    /// Logical grid width.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Logical grid height.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Configured pulse length in microseconds.
    pub fn pulse_length_us(&self) -> u32 {
        self.actuator.pulse_length_us()
    }

    /// Change the pulse length.
    pub fn set_pulse_length_us(&mut self, us: u32) {
        self.actuator.set_pulse_length_us(us);
    }

    /// Flip the dot at logical `(col, row)` to shown (`true`) or hidden.
    ///
    /// Coordinates are 1-based with the origin at the top left. Out-of-grid
    /// coordinates are rejected before any line changes; the debug sink is
    /// only notified after a successful pulse.
    pub fn flip<D: DelayNs>(
        &mut self,
        col: u16,
        row: u16,
        visible: bool,
        delay: &mut D,
    ) -> Result<(), Error<E>> {
        if col < 1 || col > self.width || row < 1 || row > self.height {
            return Err(Error::DotOutOfBounds { col, row });
        }
        let (phys_col, phys_row) = self.map.map(col, row, visible);
        self.actuator.flip(phys_col, phys_row, visible, delay)?;
        self.sink.draw_dot(col, row, visible);
        self.sink.flush();
        Ok(())
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
