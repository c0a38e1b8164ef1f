//! FP2800A output address encoding
//!
//! The 28 outputs of an FP2800A are not selected by a flat 5-bit binary code
//! of `n - 1`. The chip organizes them as four banks of seven: two bank-select
//! lines (`B1`, `B0`) pick one of the four banks and three lines (`A2`, `A1`,
//! `A0`) pick a slot within it. Slot value 0 never occurs within a bank, which
//! is why the chip has 4 × 7 = 28 outputs rather than 4 × 8 = 32.
//!
//! ## Encoding
//!
//! For an output number `n` in `[1, 28]`:
//!
//! 1. If `n > 14`: `B1 = 1` and 14 is subtracted, else `B1 = 0`.
//! 2. If the remainder is `> 7`: `B0 = 1` and 7 is subtracted, else `B0 = 0`.
//! 3. The remaining value in `[1, 7]` is written as 3-bit binary onto
//!    `A2 A1 A0` (1 = `001` … 7 = `111`).
//!
//! ## Example
//!
//! ```
//! use fp2800a::address::{encode, AddressLines};
//!
//! // Output 1 lives in the first bank, slot 1.
//! assert_eq!(
//!     encode(1),
//!     Some(AddressLines { b1: false, b0: false, a2: false, a1: false, a0: true })
//! );
//!
//! // Output 28 is the last slot of the last bank.
//! assert_eq!(
//!     encode(28),
//!     Some(AddressLines { b1: true, b0: true, a2: true, a1: true, a0: true })
//! );
//!
//! // 0 and anything above 28 cannot be addressed on a single chip.
//! assert_eq!(encode(0), None);
//! assert_eq!(encode(29), None);
//! ```

/// Number of addressable outputs on one FP2800A.
pub const OUTPUTS_PER_CHIP: u16 = 28;

/// Levels for the five output-select lines of one chip.
///
/// `b1`/`b0` are the bank-select lines, `a2`/`a1`/`a0` the within-bank slot
/// lines. `true` means the line is driven high.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLines {
    /// High bank-select line (splits 1..=14 from 15..=28)
    pub b1: bool,
    /// Low bank-select line (splits the remaining 1..=7 from 8..=14)
    pub b0: bool,
    /// Within-bank slot line, weight 4
    pub a2: bool,
    /// Within-bank slot line, weight 2
    pub a1: bool,
    /// Within-bank slot line, weight 1
    pub a0: bool,
}

/// Encode an output number into select-line levels.
///
/// Returns `None` when `output` is outside `[1, 28]`. Distinct output numbers
/// produce distinct line patterns.
pub fn encode(output: u16) -> Option<AddressLines> {
    if output < 1 || output > OUTPUTS_PER_CHIP {
        return None;
    }

    let mut n = output;
    let b1 = n > 14;
    if b1 {
        n -= 14;
    }
    let b0 = n > 7;
    if b0 {
        n -= 7;
    }

    // n is now in [1, 7]; a bank never carries slot 0
    Some(AddressLines {
        b1,
        b0,
        a2: n & 0b100 != 0,
        a1: n & 0b010 != 0,
        a0: n & 0b001 != 0,
    })
}

/// Split a 1-based output number of a chained bank into a chip index and the
/// local output on that chip.
///
/// Multiples of 28 stay on the *earlier* chip: output 28 is chip 0, local 28 —
/// not chip 1, local 0 (local 0 does not exist). Returns `None` for
/// `output == 0`; the caller is responsible for checking the chip index
/// against the number of chained chips.
///
/// ```
/// use fp2800a::address::split_chained;
///
/// assert_eq!(split_chained(1), Some((0, 1)));
/// assert_eq!(split_chained(28), Some((0, 28)));
/// assert_eq!(split_chained(29), Some((1, 1)));
/// assert_eq!(split_chained(0), None);
/// ```
pub fn split_chained(output: u16) -> Option<(usize, u16)> {
    if output == 0 {
        return None;
    }
    let chip = ((output - 1) / OUTPUTS_PER_CHIP) as usize;
    let local = ((output - 1) % OUTPUTS_PER_CHIP) + 1;
    Some((chip, local))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(lines: AddressLines) -> u8 {
        u8::from(lines.b1) << 4
            | u8::from(lines.b0) << 3
            | u8::from(lines.a2) << 2
            | u8::from(lines.a1) << 1
            | u8::from(lines.a0)
    }

    #[test]
    fn test_encode_known_vectors() {
        assert_eq!(pattern(encode(1).unwrap()), 0b00001);
        assert_eq!(pattern(encode(7).unwrap()), 0b00111);
        assert_eq!(pattern(encode(14).unwrap()), 0b01111);
        assert_eq!(pattern(encode(15).unwrap()), 0b10001);
        assert_eq!(pattern(encode(28).unwrap()), 0b11111);
    }

    #[test]
    fn test_encode_is_a_bijection() {
        let mut seen = [false; 32];
        for output in 1..=OUTPUTS_PER_CHIP {
            let lines = encode(output).unwrap();
            let key = pattern(lines) as usize;
            assert!(!seen[key], "output {output} collides with an earlier one");
            seen[key] = true;
        }
        assert_eq!(seen.iter().filter(|taken| **taken).count(), 28);
    }

    #[test]
    fn test_encode_never_emits_slot_zero() {
        for output in 1..=OUTPUTS_PER_CHIP {
            let lines = encode(output).unwrap();
            assert!(
                lines.a2 || lines.a1 || lines.a0,
                "output {output} encoded with an all-low slot"
            );
        }
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        assert_eq!(encode(0), None);
        assert_eq!(encode(29), None);
        assert_eq!(encode(u16::MAX), None);
    }

    #[test]
    fn test_split_chained_edges() {
        assert_eq!(split_chained(0), None);
        assert_eq!(split_chained(1), Some((0, 1)));
        assert_eq!(split_chained(28), Some((0, 28)));
        assert_eq!(split_chained(29), Some((1, 1)));
        assert_eq!(split_chained(56), Some((1, 28)));
        assert_eq!(split_chained(57), Some((2, 1)));
    }
}
