//! Single-chip driver and the output-driver capability trait
//!
//! [`OutputDriver`] is the one interface the rest of the crate programs
//! against: a thing with an addressable output space, a source/sink polarity,
//! and an enable line that can be pulsed. [`Fp2800a`] implements it for a
//! single chip; [`FixedPolarityPair`](crate::pair::FixedPolarityPair) and
//! [`ChainedBank`](crate::bank::ChainedBank) implement it for the two
//! multi-chip wirings. Callers never need to know which variant they hold.
//!
//! ## Ordering invariant
//!
//! Output selection and polarity may only change while the enable line is
//! low. A change mid-pulse would steer coil current somewhere unintended, so
//! every mutating operation checks `is_enabled` first and fails with
//! [`Error::Enabled`] without touching a pin.
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use fp2800a::{AddressPins, ChipPins, ControlBus, Fp2800a, OutputDriver, Polarity};
//!
//! # struct NullBus;
//! # impl ControlBus for NullBus {
//! #     type Error = Infallible;
//! #     fn set_line(&mut self, _line: u8, _high: bool) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct NullDelay;
//! # impl embedded_hal::delay::DelayNs for NullDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # fn main() -> Result<(), fp2800a::Error<Infallible>> {
//! let pins = ChipPins::new(0, 1, AddressPins::new(2, 3, 4, 5, 6));
//! let mut chip = Fp2800a::new(NullBus, pins)?;
//! let mut delay = NullDelay;
//!
//! chip.select_output(17)?;
//! chip.set_polarity(Polarity::Source)?;
//! chip.pulse(&mut delay)?;
//! # Ok(())
//! # }
//! ```

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::address::{self, OUTPUTS_PER_CHIP};
use crate::config::{ChipPins, DEFAULT_PULSE_LENGTH_US};
use crate::error::Error;
use crate::interface::ControlBus;

/// Whether a selected output sources or sinks current.
///
/// On a single chip this is the level of the data line; the fixed-polarity
/// pair realizes it by choosing which chip's enable line to pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Polarity {
    /// The selected output sinks current (data line low). The idle default.
    #[default]
    Sink,
    /// The selected output sources current (data line high)
    Source,
}

impl Polarity {
    /// Polarity for a given data-line level.
    pub fn from_high(high: bool) -> Self {
        if high { Self::Source } else { Self::Sink }
    }

    /// Data-line level for this polarity.
    pub fn is_high(self) -> bool {
        matches!(self, Self::Source)
    }

    /// The opposite polarity.
    pub fn invert(self) -> Self {
        match self {
            Self::Sink => Self::Source,
            Self::Source => Self::Sink,
        }
    }
}

/// Capability interface shared by every FP2800A wiring variant.
///
/// The [`DotActuator`](crate::actuator::DotActuator) drives one implementor
/// per matrix side and depends only on this trait, never on a concrete
/// variant.
pub trait OutputDriver {
    /// Error type of the underlying control bus
    type BusError: Debug;

    /// Put an output number on the select lines.
    ///
    /// Succeeds as a no-op when `output` is already selected. Fails with
    /// [`Error::Enabled`] while the enable line is asserted (checked before
    /// anything else) and with [`Error::OutputOutOfRange`] outside
    /// `1..=output_max()`; neither failure changes any line.
    fn select_output(&mut self, output: u16) -> Result<(), Error<Self::BusError>>;

    /// Set whether the selected output sources or sinks current.
    ///
    /// Fails with [`Error::Enabled`] while the enable line is asserted.
    fn set_polarity(&mut self, polarity: Polarity) -> Result<(), Error<Self::BusError>>;

    /// Assert the enable line: current flows through the selected output
    /// until [`disable`](Self::disable) is called.
    ///
    /// Fails with [`Error::Enabled`] if already enabled, leaving everything
    /// unchanged.
    fn enable(&mut self) -> Result<(), Error<Self::BusError>>;

    /// Release the enable line. No precondition.
    fn disable(&mut self) -> Result<(), Error<Self::BusError>>;

    /// Enable, hold for the configured pulse length, disable.
    ///
    /// A no-op when the pulse length is zero. The hold blocks and always runs
    /// to completion; there is no cancelling a pulse in progress.
    fn pulse<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<Self::BusError>>;

    /// Highest addressable output number.
    fn output_max(&self) -> u16;

    /// Currently selected output, 0 when none has been selected yet.
    fn selected_output(&self) -> u16;

    /// Current polarity.
    fn polarity(&self) -> Polarity;

    /// Whether the enable line is currently asserted.
    fn is_enabled(&self) -> bool;

    /// Configured pulse length in microseconds.
    fn pulse_length_us(&self) -> u32;

    /// Change the pulse length used by [`pulse`](Self::pulse).
    fn set_pulse_length_us(&mut self, us: u32);
}

/// Driver for a single FP2800A.
///
/// Owns its control bus and tracks the chip-side state (selected output,
/// polarity, enable flag). Construction validates the pin assignment and
/// drives every line low; a duplicate assignment is rejected before any pin
/// is touched.
pub struct Fp2800a<B> {
    /// Control bus carrying the seven lines
    bus: B,
    /// Line assignment
    pins: ChipPins,
    /// Selected output, 0 = none
    selected: u16,
    /// Level currently on the data line
    polarity: Polarity,
    /// Whether the enable line is asserted
    enabled: bool,
    /// Pulse length in microseconds
    pulse_us: u32,
}

impl<B> Fp2800a<B>
where
    B: ControlBus,
{
    /// Create a driver with the default pulse length.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if two lines share a pin (fatal by policy, nothing
    /// was driven); [`Error::Bus`] if initializing the lines low fails.
    pub fn new(bus: B, pins: ChipPins) -> Result<Self, Error<B::Error>> {
        Self::with_pulse_length(bus, pins, DEFAULT_PULSE_LENGTH_US)
    }

    /// Create a driver with an explicit pulse length in microseconds.
    pub fn with_pulse_length(
        mut bus: B,
        pins: ChipPins,
        pulse_us: u32,
    ) -> Result<Self, Error<B::Error>> {
        pins.validate()?;
        for line in pins.lines() {
            bus.set_line(line, false).map_err(Error::Bus)?;
        }
        Ok(Self {
            bus,
            pins,
            selected: 0,
            polarity: Polarity::Sink,
            enabled: false,
            pulse_us,
        })
    }

    /// Release the control bus.
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B> OutputDriver for Fp2800a<B>
where
    B: ControlBus,
{
    type BusError = B::Error;

    fn select_output(&mut self, output: u16) -> Result<(), Error<B::Error>> {
        if self.enabled {
            return Err(Error::Enabled);
        }
        // range check first: 0 means "none selected" and must never pass as
        // a reselect of a fresh chip
        let lines = address::encode(output).ok_or(Error::OutputOutOfRange {
            output,
            max: OUTPUTS_PER_CHIP,
        })?;
        if output == self.selected {
            return Ok(());
        }
        self.pins
            .address
            .write(&mut self.bus, lines)
            .map_err(Error::Bus)?;
        self.selected = output;
        trace!("fp2800a: output {} selected", output);
        Ok(())
    }

    fn set_polarity(&mut self, polarity: Polarity) -> Result<(), Error<B::Error>> {
        if self.enabled {
            return Err(Error::Enabled);
        }
        self.bus
            .set_line(self.pins.data, polarity.is_high())
            .map_err(Error::Bus)?;
        self.polarity = polarity;
        Ok(())
    }

    fn enable(&mut self) -> Result<(), Error<B::Error>> {
        if self.enabled {
            return Err(Error::Enabled);
        }
        self.bus
            .set_line(self.pins.enable, true)
            .map_err(Error::Bus)?;
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Error<B::Error>> {
        self.bus
            .set_line(self.pins.enable, false)
            .map_err(Error::Bus)?;
        self.enabled = false;
        Ok(())
    }

    fn pulse<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<B::Error>> {
        if self.pulse_us == 0 {
            return Ok(());
        }
        trace!("fp2800a: pulse {} us", self.pulse_us);
        self.enable()?;
        delay.delay_us(self.pulse_us);
        self.disable()
    }

    fn output_max(&self) -> u16 {
        OUTPUTS_PER_CHIP
    }

    fn selected_output(&self) -> u16 {
        self.selected
    }

    fn polarity(&self) -> Polarity {
        self.polarity
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn pulse_length_us(&self) -> u32 {
        self.pulse_us
    }

    fn set_pulse_length_us(&mut self, us: u32) {
        self.pulse_us = us;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AddressPins, ChipPins};
    use crate::error::ConfigError;
    use crate::testutil::{MockBus, MockDelay, chip_pins};

    fn chip(bus: &MockBus) -> Fp2800a<MockBus> {
        Fp2800a::new(bus.clone(), chip_pins()).unwrap()
    }

    #[test]
    fn test_construction_drives_all_lines_low() {
        let bus = MockBus::new();
        let _chip = chip(&bus);
        let writes = bus.writes();
        assert_eq!(writes.len(), 7);
        assert!(writes.iter().all(|(_, high)| !high));
        for line in 0..7 {
            assert_eq!(bus.level(line), Some(false));
        }
    }

    #[test]
    fn test_duplicate_pins_fail_before_any_write() {
        let bus = MockBus::new();
        let pins = ChipPins::new(0, 0, AddressPins::new(2, 3, 4, 5, 6));
        let result = Fp2800a::new(bus.clone(), pins);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::DuplicateLine { line: 0 }))
        ));
        assert_eq!(bus.write_count(), 0);
    }

    #[test]
    fn test_select_output_writes_bank_of_seven_pattern() {
        let bus = MockBus::new();
        let mut chip = chip(&bus);
        bus.clear();

        // 17 > 14 -> b1 high, remainder 3 -> b0 low, slot 011
        chip.select_output(17).unwrap();
        assert_eq!(
            bus.writes(),
            [
                (6, true),  // b1
                (5, false), // b0
                (4, false), // a2
                (3, true),  // a1
                (2, true),  // a0
            ]
        );
        assert_eq!(chip.selected_output(), 17);
    }

    #[test]
    fn test_select_output_out_of_range_changes_nothing() {
        let bus = MockBus::new();
        let mut chip = chip(&bus);
        bus.clear();

        for bad in [0, 29, 1000] {
            assert!(matches!(
                chip.select_output(bad),
                Err(Error::OutputOutOfRange { max: 28, .. })
            ));
        }
        assert_eq!(bus.write_count(), 0);
        assert_eq!(chip.selected_output(), 0);
    }

    #[test]
    fn test_reselect_is_a_silent_no_op() {
        let bus = MockBus::new();
        let mut chip = chip(&bus);
        chip.select_output(9).unwrap();
        bus.clear();

        chip.select_output(9).unwrap();
        assert_eq!(bus.write_count(), 0);
        assert_eq!(chip.selected_output(), 9);
    }

    #[test]
    fn test_mutations_rejected_while_enabled() {
        let bus = MockBus::new();
        let mut chip = chip(&bus);
        chip.select_output(9).unwrap();
        chip.enable().unwrap();
        bus.clear();

        assert_eq!(chip.select_output(10), Err(Error::Enabled));
        assert_eq!(chip.set_polarity(Polarity::Source), Err(Error::Enabled));
        assert_eq!(chip.enable(), Err(Error::Enabled));
        // enabled-check takes precedence over the reselect no-op
        assert_eq!(chip.select_output(9), Err(Error::Enabled));
        assert_eq!(bus.write_count(), 0);
        assert_eq!(chip.selected_output(), 9);
        assert!(chip.is_enabled());
    }

    #[test]
    fn test_set_polarity_drives_data_line() {
        let bus = MockBus::new();
        let mut chip = chip(&bus);
        bus.clear();

        chip.set_polarity(Polarity::Source).unwrap();
        assert_eq!(bus.writes(), [(0, true)]);
        assert_eq!(chip.polarity(), Polarity::Source);

        chip.set_polarity(Polarity::Sink).unwrap();
        assert_eq!(bus.level(0), Some(false));
    }

    #[test]
    fn test_pulse_holds_for_configured_length() {
        let bus = MockBus::new();
        let mut chip = chip(&bus);
        let mut delay = MockDelay::new();
        bus.clear();

        chip.pulse(&mut delay).unwrap();
        assert_eq!(bus.writes(), [(1, true), (1, false)]);
        assert_eq!(delay.requested_us(), [100]);
        assert!(!chip.is_enabled());
    }

    #[test]
    fn test_zero_length_pulse_is_a_no_op() {
        let bus = MockBus::new();
        let mut chip = Fp2800a::with_pulse_length(bus.clone(), chip_pins(), 0).unwrap();
        let mut delay = MockDelay::new();
        bus.clear();

        chip.pulse(&mut delay).unwrap();
        assert_eq!(bus.write_count(), 0);
        assert!(delay.requested_us().is_empty());
    }

    #[test]
    fn test_disable_has_no_precondition() {
        let bus = MockBus::new();
        let mut chip = chip(&bus);
        chip.disable().unwrap();
        assert!(!chip.is_enabled());
        assert_eq!(bus.level(1), Some(false));
    }

    #[test]
    fn test_pulse_length_is_adjustable() {
        let bus = MockBus::new();
        let mut chip = chip(&bus);
        assert_eq!(chip.pulse_length_us(), 100);
        chip.set_pulse_length_us(250);
        assert_eq!(chip.pulse_length_us(), 250);

        let mut delay = MockDelay::new();
        chip.pulse(&mut delay).unwrap();
        assert_eq!(delay.requested_us(), [250]);
    }
}
