//! Shared test doubles: a recording control bus and a mock clock.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;

use crate::config::{AddressPins, BankPins, ChipPins, PairPins};
use crate::interface::{ControlBus, LineId};

/// Control bus that records every line write.
///
/// Clones share the same log, so a handle kept by the test observes writes
/// made through the handle owned by a driver.
#[derive(Clone, Default)]
pub(crate) struct MockBus {
    log: Rc<RefCell<Vec<(LineId, bool)>>>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes so far, in order.
    pub fn writes(&self) -> Vec<(LineId, bool)> {
        self.log.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Last level written to `line`, if any.
    pub fn level(&self, line: LineId) -> Option<bool> {
        self.log
            .borrow()
            .iter()
            .rev()
            .find(|(l, _)| *l == line)
            .map(|(_, high)| *high)
    }
}

impl ControlBus for MockBus {
    type Error = Infallible;

    fn set_line(&mut self, line: LineId, high: bool) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((line, high));
        Ok(())
    }
}

/// Clock that records requested hold durations without delaying.
#[derive(Clone, Default)]
pub(crate) struct MockDelay {
    requested_ns: Rc<RefCell<Vec<u32>>>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested holds, in microseconds, in order.
    pub fn requested_us(&self) -> Vec<u32> {
        self.requested_ns
            .borrow()
            .iter()
            .map(|ns| ns / 1_000)
            .collect()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.requested_ns.borrow_mut().push(ns);
    }
}

/// Line numbering used across driver tests:
/// data 0, enable 1, a0 2, a1 3, a2 4, b0 5, b1 6.
pub(crate) fn chip_pins() -> ChipPins {
    ChipPins::new(0, 1, AddressPins::new(2, 3, 4, 5, 6))
}

/// Pair layout: enable_reset 0, enable_set 1, selects as in [`chip_pins`].
pub(crate) fn pair_pins() -> PairPins {
    PairPins::new(0, 1, AddressPins::new(2, 3, 4, 5, 6))
}

/// Bank layout: data 0, selects 2..=6, enables 7...
pub(crate) fn bank_pins<const N: usize>() -> BankPins<N> {
    let mut enables = [0; N];
    for (i, enable) in enables.iter_mut().enumerate() {
        *enable = 7 + i as LineId;
    }
    BankPins::new(enables, 0, AddressPins::new(2, 3, 4, 5, 6))
}
