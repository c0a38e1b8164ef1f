//! FP2800A Flip-Dot Driver
//!
//! A driver for the FP2800A 28-output column/row driver chip used in
//! electromagnetic flip-dot displays.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Single-chip, fixed-polarity pair and chained-bank wirings
//! - Panel coordinate remapping (Lawo Luminator 28x13 built in)
//! - Configurable pulse length
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use fp2800a::{AddressPins, ChipPins, ControlBus, Fp2800a, Matrix};
//!
//! # #[derive(Clone)]
//! # struct MockBus;
//! # impl ControlBus for MockBus {
//! #     type Error = Infallible;
//! #     fn set_line(&mut self, _line: u8, _high: bool) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let bus = MockBus;
//! # let mut delay = MockDelay;
//! // One chip drives the columns, one the rows.
//! let column_pins = ChipPins::new(0, 1, AddressPins::new(2, 3, 4, 5, 6));
//! let row_pins = ChipPins::new(7, 8, AddressPins::new(9, 10, 11, 12, 13));
//!
//! let columns = match Fp2800a::new(bus.clone(), column_pins) {
//!     Ok(driver) => driver,
//!     Err(_) => return,
//! };
//! let rows = match Fp2800a::new(bus, row_pins) {
//!     Ok(driver) => driver,
//!     Err(_) => return,
//! };
//!
//! let mut matrix = match Matrix::lawo_28x13(columns, rows) {
//!     Ok(matrix) => matrix,
//!     Err(_) => return,
//! };
//! let _ = matrix.show(1, 1, &mut delay);
//! let _ = matrix.hide(28, 13, &mut delay);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// One-dot actuation across a column and a row driver
pub mod actuator;
/// FP2800A select-line address encoding
pub mod address;
/// Chained banks of FP2800As sharing select and data lines
pub mod bank;
/// Pin assignment types and pulse defaults
pub mod config;
/// Single-chip driver and the output-driver trait
pub mod driver;
/// Error types for the driver
pub mod error;
/// Control bus abstraction over numbered lines
pub mod interface;
/// Logical-to-physical panel coordinate maps
pub mod mapping;
/// The user-facing dot grid
pub mod matrix;
/// Fixed-polarity chip pairs
pub mod pair;
/// Debug sinks mirroring dot updates
pub mod sink;

#[cfg(test)]
mod testutil;

pub use actuator::DotActuator;
pub use address::{AddressLines, OUTPUTS_PER_CHIP};
pub use bank::ChainedBank;
pub use config::{AddressPins, BankPins, ChipPins, DEFAULT_PULSE_LENGTH_US, PairPins};
pub use driver::{Fp2800a, OutputDriver, Polarity};
pub use error::{ConfigError, Error};
pub use interface::{ControlBus, InterfaceError, LineId, PinBank};
pub use mapping::{CoordinateMap, Identity, Lawo28x13};
pub use matrix::Matrix;
pub use pair::FixedPolarityPair;
pub use sink::{DotSink, LogSink, NoopSink};
