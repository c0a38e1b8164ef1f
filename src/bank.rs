//! Chained chip bank
//!
//! `N` FP2800As share the select and data lines; each chip owns one enable
//! line. That extends the address space from 28 to `28 * N` outputs while
//! still costing only one extra microcontroller pin per chip. Selecting an
//! output decides both what goes on the shared select lines and which enable
//! line the next pulse asserts, so at most one member of the chain ever
//! conducts.

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::address::{self, OUTPUTS_PER_CHIP};
use crate::config::{BankPins, DEFAULT_PULSE_LENGTH_US};
use crate::driver::{OutputDriver, Polarity};
use crate::error::Error;
use crate::interface::ControlBus;

/// Driver for `N` chips chained on shared select and data lines.
///
/// Logical outputs are 1-based and contiguous across the chain: outputs
/// `1..=28` live on chip 0, `29..=56` on chip 1, and so on. A multiple of 28
/// is the *last* output of its chip, not the first of the next.
pub struct ChainedBank<B, const N: usize> {
    /// Control bus carrying the shared lines and the `N` enable lines
    bus: B,
    /// Line assignment
    pins: BankPins<N>,
    /// Output currently on the shared select lines, 0 = none
    selected_local: u16,
    /// Chip whose enable line the next pulse asserts
    selected_chip: usize,
    /// Level currently on the shared data line
    polarity: Polarity,
    /// Whether an enable line is asserted
    enabled: bool,
    /// Pulse length in microseconds
    pulse_us: u32,
}

impl<B, const N: usize> ChainedBank<B, N>
where
    B: ControlBus,
{
    /// Create a driver with the default pulse length.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if any two lines share a pin, including collisions
    /// between enable lines and the shared lines (fatal by policy, nothing
    /// was driven); [`Error::Bus`] if initializing the lines low fails.
    pub fn new(bus: B, pins: BankPins<N>) -> Result<Self, Error<B::Error>> {
        Self::with_pulse_length(bus, pins, DEFAULT_PULSE_LENGTH_US)
    }

    /// Create a driver with an explicit pulse length in microseconds.
    pub fn with_pulse_length(
        mut bus: B,
        pins: BankPins<N>,
        pulse_us: u32,
    ) -> Result<Self, Error<B::Error>> {
        pins.validate()?;
        for line in pins.shared_lines() {
            bus.set_line(line, false).map_err(Error::Bus)?;
        }
        for line in pins.enables {
            bus.set_line(line, false).map_err(Error::Bus)?;
        }
        Ok(Self {
            bus,
            pins,
            selected_local: 0,
            selected_chip: 0,
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

impl<B, const N: usize> OutputDriver for ChainedBank<B, N>
where
    B: ControlBus,
{
    type BusError = B::Error;

    fn select_output(&mut self, output: u16) -> Result<(), Error<B::Error>> {
        if self.enabled {
            return Err(Error::Enabled);
        }
        let max = self.output_max();
        let (chip, local) =
            address::split_chained(output).ok_or(Error::OutputOutOfRange { output, max })?;
        if chip >= N {
            return Err(Error::OutputOutOfRange { output, max });
        }
        if local != self.selected_local {
            // encode cannot fail here: local is always in [1, 28]
            if let Some(lines) = address::encode(local) {
                self.pins
                    .address
                    .write(&mut self.bus, lines)
                    .map_err(Error::Bus)?;
            }
            self.selected_local = local;
        }
        self.selected_chip = chip;
        trace!("fp2800a bank: output {} -> chip {} local {}", output, chip, local);
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

    /// Asserts only the selected chip's enable line, keeping the rest of the
    /// chain idle.
    fn enable(&mut self) -> Result<(), Error<B::Error>> {
        if self.enabled {
            return Err(Error::Enabled);
        }
        self.bus
            .set_line(self.pins.enables[self.selected_chip], true)
            .map_err(Error::Bus)?;
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Error<B::Error>> {
        // selection cannot change while enabled, so this is the asserted line
        self.bus
            .set_line(self.pins.enables[self.selected_chip], false)
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
        OUTPUTS_PER_CHIP * N as u16
    }

    fn selected_output(&self) -> u16 {
        if self.selected_local == 0 {
            0
        } else {
            self.selected_local + OUTPUTS_PER_CHIP * self.selected_chip as u16
        }
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
    use crate::testutil::{MockBus, MockDelay, bank_pins};

    fn bank(bus: &MockBus) -> ChainedBank<MockBus, 2> {
        ChainedBank::new(bus.clone(), bank_pins()).unwrap()
    }

    #[test]
    fn test_output_max_scales_with_chain_length() {
        let bus = MockBus::new();
        assert_eq!(bank(&bus).output_max(), 56);
        let bank3: ChainedBank<MockBus, 3> =
            ChainedBank::new(MockBus::new(), bank_pins()).unwrap();
        assert_eq!(bank3.output_max(), 84);
    }

    #[test]
    fn test_multiple_of_28_stays_on_the_earlier_chip() {
        let bus = MockBus::new();
        let mut bank = bank(&bus);

        bank.select_output(28).unwrap();
        assert_eq!(bank.selected_output(), 28);
        bus.clear();

        let mut delay = MockDelay::new();
        bank.pulse(&mut delay).unwrap();
        // chip 0 enable is line 7; chip 1 (line 8) never moves
        assert_eq!(bus.writes(), [(7, true), (7, false)]);
    }

    #[test]
    fn test_output_29_moves_to_the_second_chip() {
        let bus = MockBus::new();
        let mut bank = bank(&bus);

        bank.select_output(29).unwrap();
        assert_eq!(bank.selected_output(), 29);
        bus.clear();

        let mut delay = MockDelay::new();
        bank.pulse(&mut delay).unwrap();
        // chip 1 enable is line 8
        assert_eq!(bus.writes(), [(8, true), (8, false)]);
    }

    #[test]
    fn test_out_of_range_chip_fails_without_side_effects() {
        let bus = MockBus::new();
        let mut bank = bank(&bus);
        bank.select_output(12).unwrap();
        bus.clear();

        assert_eq!(
            bank.select_output(57),
            Err(Error::OutputOutOfRange {
                output: 57,
                max: 56
            })
        );
        assert_eq!(
            bank.select_output(0),
            Err(Error::OutputOutOfRange { output: 0, max: 56 })
        );
        assert_eq!(bus.write_count(), 0);
        assert_eq!(bank.selected_output(), 12);
    }

    #[test]
    fn test_same_local_output_skips_the_select_lines() {
        let bus = MockBus::new();
        let mut bank = bank(&bus);

        bank.select_output(3).unwrap();
        bus.clear();

        // 31 is local output 3 on chip 1: only the enable selection moves
        bank.select_output(31).unwrap();
        assert_eq!(bus.write_count(), 0);
        assert_eq!(bank.selected_output(), 31);
    }

    #[test]
    fn test_select_rejected_while_enabled() {
        let bus = MockBus::new();
        let mut bank = bank(&bus);
        bank.select_output(3).unwrap();
        bank.enable().unwrap();
        bus.clear();

        assert_eq!(bank.select_output(31), Err(Error::Enabled));
        assert_eq!(bank.set_polarity(Polarity::Source), Err(Error::Enabled));
        assert_eq!(bus.write_count(), 0);
        assert_eq!(bank.selected_output(), 3);
    }

    #[test]
    fn test_shared_data_line_carries_polarity() {
        let bus = MockBus::new();
        let mut bank = bank(&bus);
        bus.clear();

        bank.set_polarity(Polarity::Source).unwrap();
        assert_eq!(bus.writes(), [(0, true)]);
    }
}
