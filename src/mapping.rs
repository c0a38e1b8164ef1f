//! Logical-to-physical coordinate mapping
//!
//! Panel wirings rarely match the user-facing grid one to one: column order
//! may be mirrored, and some panels encode show/hide as two separate physical
//! row outputs per logical row instead of a polarity line. Each wiring is a
//! pure remap function behind [`CoordinateMap`]; the
//! [`Matrix`](crate::matrix::Matrix) engine itself is wiring-agnostic.
//!
//! ## Example
//!
//! ```
//! use fp2800a::mapping::{CoordinateMap, Lawo28x13};
//!
//! let map = Lawo28x13;
//!
//! // Top-left dot, shown: mirrored column 28, odd row output 1.
//! assert_eq!(map.map(1, 1, true), (28, 1));
//! // Same dot, hidden: the paired even row output.
//! assert_eq!(map.map(1, 1, false), (28, 2));
//!
//! // 13 logical rows need 26 physical row outputs.
//! assert_eq!(map.physical_extent(28, 13), (28, 26));
//! ```

/// A pure remap from logical grid coordinates to physical driver outputs.
///
/// `map` receives 1-based logical coordinates that have already passed the
/// matrix bounds check, plus the show/hide flag for wirings that fold it into
/// the row address.
pub trait CoordinateMap {
    /// Map a logical `(col, row)` and visibility to physical
    /// `(column output, row output)`.
    fn map(&self, col: u16, row: u16, visible: bool) -> (u16, u16);

    /// Physical `(columns, rows)` extent needed to reach every dot of a
    /// `width` x `height` logical grid. Defaults to the identity.
    fn physical_extent(&self, width: u16, height: u16) -> (u16, u16) {
        (width, height)
    }
}

/// Identity mapping for panels wired in logical order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl CoordinateMap for Identity {
    fn map(&self, col: u16, row: u16, _visible: bool) -> (u16, u16) {
        (col, row)
    }
}

/// Wiring of the Lawo Luminator 28x13 panel.
///
/// The panel has no row-side polarity wiring. Instead every logical row owns
/// two physical row outputs: the odd one (`2*row - 1`) flips the dot to its
/// visible face, the even one (`2*row`) to its hidden face. Columns are wired
/// right to left, so the column order is mirrored to put the origin at the
/// top left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lawo28x13;

impl Lawo28x13 {
    /// Logical grid width.
    pub const WIDTH: u16 = 28;
    /// Logical grid height.
    pub const HEIGHT: u16 = 13;
}

impl CoordinateMap for Lawo28x13 {
    fn map(&self, col: u16, row: u16, visible: bool) -> (u16, u16) {
        // saturate rather than overflow; an out-of-space row is then caught
        // by the actuator bounds check
        let paired = row.saturating_mul(2);
        let phys_row = if visible { paired - 1 } else { paired };
        (Self::WIDTH + 1 - col, phys_row)
    }

    fn physical_extent(&self, width: u16, height: u16) -> (u16, u16) {
        (width, height.saturating_mul(2))
    }
}

// The 28x24 Lawo panel chains a second FP2800A on the row side and is
// expected to use the same paired-row idea, but its factory row wiring has
// never been confirmed on hardware. No built-in map is shipped for it: drive
// it with a ChainedBank row side and your own CoordinateMap once the wiring
// is verified.
