//! Control-line interface abstraction
//!
//! This module provides the [`ControlBus`] trait and the [`PinBank`] struct
//! for driving the FP2800A control lines over GPIO.
//!
//! ## Hardware Requirements
//!
//! An FP2800A is driven entirely through discrete logic-level lines:
//! - **A0..A2**: within-bank output selection
//! - **B0/B1**: bank selection
//! - **Data**: source/sink polarity
//! - **Enable**: the only line that lets current flow
//!
//! The driver types in this crate address lines by number ([`LineId`]) so that
//! one bus can carry a single chip, a fixed-polarity pair, or a whole chained
//! bank; the mapping from line number to physical pin is the bus
//! implementation's business.
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use embedded_hal::digital::OutputPin;
//! use fp2800a::{ControlBus, PinBank};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut bus = PinBank::new([MockPin, MockPin, MockPin]);
//!
//! // Drive line 2 high, then low again.
//! let _ = bus.set_line(2, true);
//! let _ = bus.set_line(2, false);
//!
//! // Line numbers beyond the bank are rejected.
//! assert!(bus.set_line(3, false).is_err());
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;

/// Identifier of one physical control line.
///
/// For the provided [`PinBank`] this is an index into the pin array; custom
/// [`ControlBus`] implementations are free to interpret it as a raw GPIO
/// number instead.
pub type LineId = u8;

/// Trait for the hardware that carries the FP2800A control lines.
///
/// This trait abstracts over GPIO implementations, allowing the chip drivers
/// to work with anything that can set a numbered line high or low. For most
/// cases, use the provided [`PinBank`]. Implement this trait on your own type
/// when lines live on a port expander, a shift register, or a test double.
pub trait ControlBus {
    /// Error type for line writes
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Drive one control line high or low.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not exist or the GPIO write fails.
    fn set_line(&mut self, line: LineId, high: bool) -> Result<(), Self::Error>;
}

/// Errors that can occur at the interface level
#[derive(Debug, PartialEq, Eq)]
pub enum InterfaceError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
    /// The line number is not wired on this bus
    UnknownLine(LineId),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::UnknownLine(line) => write!(f, "Line {line} is not wired on this bus"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// GPIO-backed control bus over an array of output pins.
///
/// Line `n` maps to `pins[n]`. All pins share one type; on HALs with distinct
/// per-pin types, degrade them to the HAL's any-pin type first.
pub struct PinBank<P, const N: usize> {
    /// Output pins, indexed by line number
    pins: [P; N],
}

impl<P, const N: usize> PinBank<P, N>
where
    P: OutputPin,
{
    /// Create a new bus over `pins`; line `n` drives `pins[n]`.
    pub fn new(pins: [P; N]) -> Self {
        Self { pins }
    }

    /// Release the pins.
    pub fn release(self) -> [P; N] {
        self.pins
    }
}

impl<P, const N: usize> ControlBus for PinBank<P, N>
where
    P: OutputPin,
{
    type Error = InterfaceError<P::Error>;

    fn set_line(&mut self, line: LineId, high: bool) -> Result<(), Self::Error> {
        let pin = self
            .pins
            .get_mut(line as usize)
            .ok_or(InterfaceError::UnknownLine(line))?;
        if high {
            pin.set_high().map_err(InterfaceError::Pin)
        } else {
            pin.set_low().map_err(InterfaceError::Pin)
        }
    }
}
