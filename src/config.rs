//! Pin assignments and pulse timing configuration
//!
//! Wiring is fixed at construction time: each driver variant takes one of the
//! layout structs below, and every layout is checked for duplicate line
//! assignments before a single pin is driven. See [`ConfigError`] for why a
//! duplicate is treated as fatal.

use crate::address::AddressLines;
use crate::error::ConfigError;
use crate::interface::{ControlBus, LineId};

/// Default enable pulse length in microseconds.
///
/// Long enough to flip the disc magnets on the panels this was written for;
/// tune per panel with the `set_pulse_length_us` setters.
pub const DEFAULT_PULSE_LENGTH_US: u32 = 100;

/// The five output-select lines shared by every FP2800A wiring variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressPins {
    /// Within-bank slot line, weight 1
    pub a0: LineId,
    /// Within-bank slot line, weight 2
    pub a1: LineId,
    /// Within-bank slot line, weight 4
    pub a2: LineId,
    /// Low bank-select line
    pub b0: LineId,
    /// High bank-select line
    pub b1: LineId,
}

impl AddressPins {
    /// Create the select-line assignment.
    pub fn new(a0: LineId, a1: LineId, a2: LineId, b0: LineId, b1: LineId) -> Self {
        Self { a0, a1, a2, b0, b1 }
    }

    pub(crate) fn lines(&self) -> [LineId; 5] {
        [self.a0, self.a1, self.a2, self.b0, self.b1]
    }

    /// Drive the five select lines to the given levels, bank lines first.
    pub(crate) fn write<B: ControlBus>(
        &self,
        bus: &mut B,
        lines: AddressLines,
    ) -> Result<(), B::Error> {
        bus.set_line(self.b1, lines.b1)?;
        bus.set_line(self.b0, lines.b0)?;
        bus.set_line(self.a2, lines.a2)?;
        bus.set_line(self.a1, lines.a1)?;
        bus.set_line(self.a0, lines.a0)?;
        Ok(())
    }
}

/// Pin assignment for a single FP2800A with its own data and enable line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChipPins {
    /// Source/sink polarity line
    pub data: LineId,
    /// Enable line
    pub enable: LineId,
    /// Output-select lines
    pub address: AddressPins,
}

impl ChipPins {
    /// Create the assignment for one chip.
    pub fn new(data: LineId, enable: LineId, address: AddressPins) -> Self {
        Self {
            data,
            enable,
            address,
        }
    }

    pub(crate) fn lines(&self) -> [LineId; 7] {
        let [a0, a1, a2, b0, b1] = self.address.lines();
        [self.data, self.enable, a0, a1, a2, b0, b1]
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_unique(&self.lines())
    }
}

/// Pin assignment for two chips wired with fixed, opposite polarity.
///
/// Both chips share the select lines; neither has a switchable data line.
/// Polarity is realized by choosing which enable line to pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairPins {
    /// Enable line of the chip hard-wired to sink (reset/hide) polarity
    pub enable_reset: LineId,
    /// Enable line of the chip hard-wired to source (set/show) polarity
    pub enable_set: LineId,
    /// Output-select lines, shared by both chips
    pub address: AddressPins,
}

impl PairPins {
    /// Create the assignment for a fixed-polarity pair.
    pub fn new(enable_reset: LineId, enable_set: LineId, address: AddressPins) -> Self {
        Self {
            enable_reset,
            enable_set,
            address,
        }
    }

    pub(crate) fn lines(&self) -> [LineId; 7] {
        let [a0, a1, a2, b0, b1] = self.address.lines();
        [self.enable_reset, self.enable_set, a0, a1, a2, b0, b1]
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_unique(&self.lines())
    }
}

/// Pin assignment for `N` chips chained on shared select and data lines.
///
/// Chip `i` owns `enables[i]`; everything else is common to the whole chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BankPins<const N: usize> {
    /// Per-chip enable lines, in chain order
    pub enables: [LineId; N],
    /// Source/sink polarity line, shared by the chain
    pub data: LineId,
    /// Output-select lines, shared by the chain
    pub address: AddressPins,
}

impl<const N: usize> BankPins<N> {
    /// Create the assignment for a chained bank.
    pub fn new(enables: [LineId; N], data: LineId, address: AddressPins) -> Self {
        Self {
            enables,
            data,
            address,
        }
    }

    pub(crate) fn shared_lines(&self) -> [LineId; 6] {
        let [a0, a1, a2, b0, b1] = self.address.lines();
        [self.data, a0, a1, a2, b0, b1]
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let shared = self.shared_lines();
        check_unique(&shared)?;
        check_unique(&self.enables)?;
        for enable in &self.enables {
            if shared.contains(enable) {
                return Err(ConfigError::DuplicateLine { line: *enable });
            }
        }
        Ok(())
    }
}

/// Scan a line list for duplicates.
fn check_unique(lines: &[LineId]) -> Result<(), ConfigError> {
    for (i, line) in lines.iter().enumerate() {
        if lines[i + 1..].contains(line) {
            return Err(ConfigError::DuplicateLine { line: *line });
        }
    }
    Ok(())
}
