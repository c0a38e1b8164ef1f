//! Debug mirror hook
//!
//! During bring-up it helps to see what the panel has been told to do without
//! a panel attached. The matrix reports every successful actuation to a
//! [`DotSink`]; the sink never feeds anything back into the core.

use log::debug;

/// Mirror of actuated dots, e.g. a small auxiliary display or a logger.
pub trait DotSink {
    /// Record one actuated dot at its logical coordinate.
    fn draw_dot(&mut self, col: u16, row: u16, visible: bool);

    /// Present whatever was drawn since the last call. Called once per
    /// actuation; sinks without a presentation step can ignore it.
    fn flush(&mut self) {}
}

/// Sink that discards every dot. The default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl DotSink for NoopSink {
    fn draw_dot(&mut self, _col: u16, _row: u16, _visible: bool) {}
}

/// Sink that emits one `log::debug!` line per dot.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DotSink for LogSink {
    fn draw_dot(&mut self, col: u16, row: u16, visible: bool) {
        debug!(
            "dot ({}, {}) {}",
            col,
            row,
            if visible { "shown" } else { "hidden" }
        );
    }
}
