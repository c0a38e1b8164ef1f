//! Fixed-polarity chip pair
//!
//! Some boards route around the settle time of an unreliable data line by
//! fitting two FP2800As instead of one: both share the five select lines, one
//! is hard-wired to source and the other to sink. "Setting the polarity" then
//! means choosing which chip's enable line the next pulse asserts; no data
//! line exists to write.
//!
//! The pair defaults to [`Polarity::Sink`], matching a single chip whose data
//! line idles low: enabling without a prior polarity call performs a
//! reset/hide pulse.

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::address::{self, OUTPUTS_PER_CHIP};
use crate::config::{DEFAULT_PULSE_LENGTH_US, PairPins};
use crate::driver::{OutputDriver, Polarity};
use crate::error::Error;
use crate::interface::{ControlBus, LineId};

/// Driver for two chips pre-wired with fixed, opposite polarity.
///
/// Implements the same capability interface as a single
/// [`Fp2800a`](crate::driver::Fp2800a); callers cannot tell the difference.
pub struct FixedPolarityPair<B> {
    /// Control bus carrying the seven lines
    bus: B,
    /// Line assignment
    pins: PairPins,
    /// Selected output, 0 = none
    selected: u16,
    /// Which chip the next enable pulse goes to
    polarity: Polarity,
    /// Whether an enable line is asserted
    enabled: bool,
    /// Pulse length in microseconds
    pulse_us: u32,
}

impl<B> FixedPolarityPair<B>
where
    B: ControlBus,
{
    /// Create a driver with the default pulse length.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if two lines share a pin (fatal by policy, nothing
    /// was driven); [`Error::Bus`] if initializing the lines low fails.
    pub fn new(bus: B, pins: PairPins) -> Result<Self, Error<B::Error>> {
        Self::with_pulse_length(bus, pins, DEFAULT_PULSE_LENGTH_US)
    }

    /// Create a driver with an explicit pulse length in microseconds.
    pub fn with_pulse_length(
        mut bus: B,
        pins: PairPins,
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

    /// Enable line the current polarity maps to.
    fn active_enable(&self) -> LineId {
        match self.polarity {
            Polarity::Source => self.pins.enable_set,
            Polarity::Sink => self.pins.enable_reset,
        }
    }
}

impl<B> OutputDriver for FixedPolarityPair<B>
where
    B: ControlBus,
{
    type BusError = B::Error;

    fn select_output(&mut self, output: u16) -> Result<(), Error<B::Error>> {
        if self.enabled {
            return Err(Error::Enabled);
        }
        // range check first: 0 means "none selected" and must never pass as
        // a reselect of a fresh pair
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
        Ok(())
    }

    /// Selects which chip's enable line the next pulse asserts; no line is
    /// written here.
    fn set_polarity(&mut self, polarity: Polarity) -> Result<(), Error<B::Error>> {
        if self.enabled {
            return Err(Error::Enabled);
        }
        self.polarity = polarity;
        trace!(
            "fp2800a pair: polarity {:?} via enable-line switch",
            polarity
        );
        Ok(())
    }

    fn enable(&mut self) -> Result<(), Error<B::Error>> {
        if self.enabled {
            return Err(Error::Enabled);
        }
        self.bus
            .set_line(self.active_enable(), true)
            .map_err(Error::Bus)?;
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Error<B::Error>> {
        // polarity cannot change while enabled, so this is the line that was
        // asserted
        self.bus
            .set_line(self.active_enable(), false)
            .map_err(Error::Bus)?;
        self.enabled = false;
        Ok(())
    }

    fn pulse<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<B::Error>> {
        if self.pulse_us == 0 {
            return Ok(());
        }
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
