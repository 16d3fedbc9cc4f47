//! Bit-field primitive: signed and unsigned fields at arbitrary positions
//! within a 64-bit word.
//!
//! Mirrors the classic `Bitpack` interface: value semantics, explicit
//! width/lsb parameters, and a special case for shifts of the full word
//! width (64), which native shift instructions do not handle consistently
//! across platforms.

use crate::error::{CodecError, CodecResult};

const MAX_BIT: u32 = 64;

/// True iff the non-negative value `n` is representable in `width`
/// unsigned bits. `width == 0` only fits `n == 0`; `width == 64` always
/// fits.
pub fn fits_u(n: u64, width: u32) -> bool {
    assert!(width <= MAX_BIT);

    let max = if width == MAX_BIT {
        u64::MAX
    } else {
        shl_u(1, width) - 1
    };
    n <= max
}

/// True iff the signed value `n` is representable in `width` two's-
/// complement bits. `width == 0` never fits.
pub fn fits_s(n: i64, width: u32) -> bool {
    assert!(width <= MAX_BIT);

    if width == 0 {
        return false;
    }
    if n >= 0 {
        fits_u(n as u64, width - 1)
    } else {
        let min = -shl_s(1, width - 1);
        n >= min
    }
}

/// Extract `width` bits at bit offset `lsb`, interpreted unsigned.
pub fn get_u(word: u64, width: u32, lsb: u32) -> u64 {
    check_width_lsb(width, lsb);

    let mask = shl_u(shl_u(1, width) - 1, lsb);
    shr_u(mask & word, lsb)
}

/// Extract `width` bits at bit offset `lsb`, sign-extended to 64 bits.
pub fn get_s(word: u64, width: u32, lsb: u32) -> i64 {
    check_width_lsb(width, lsb);

    let result = get_u(word, width, lsb) as i64;
    let sign_bit = shl_s(1, width - 1);

    if (result & sign_bit) != 0 {
        let offset = shr_s(i64::MIN, MAX_BIT - width);
        result | offset
    } else {
        result
    }
}

/// Return `word` with the `width`-bit field at `lsb` replaced by the
/// unsigned `value`. The existing bits in that field are cleared first.
pub fn new_u(word: u64, width: u32, lsb: u32, value: u64) -> CodecResult<u64> {
    check_width_lsb(width, lsb);

    let max = shl_u(1, width) - 1;
    if value > max {
        return Err(CodecError::FieldOverflow {
            width,
            value: value as i64,
        });
    }

    let mask = shl_u(u64::MAX, width + lsb) | (shl_u(1, lsb) - 1);
    let cleared = word & mask;
    let placed = shl_u(value, lsb);
    Ok(placed | cleared)
}

/// Return `word` with the `width`-bit field at `lsb` replaced by the
/// signed `value`, stored in two's-complement encoding over exactly
/// `width` bits.
pub fn new_s(word: u64, width: u32, lsb: u32, value: i64) -> CodecResult<u64> {
    check_width_lsb(width, lsb);

    let max = shl_u(1, width - 1) as i64 - 1;
    let min = -shl_s(1, width - 1);
    if value > max || value < min {
        return Err(CodecError::FieldOverflow { width, value });
    }

    let truncate_mask = shl_s(1, width) - 1;
    let truncated = (value & truncate_mask) as u64;
    new_u(word, width, lsb, truncated)
}

fn check_width_lsb(width: u32, lsb: u32) {
    assert!(width <= MAX_BIT && lsb < MAX_BIT && width + lsb <= MAX_BIT);
}

fn shl_u(n: u64, magnitude: u32) -> u64 {
    if magnitude == MAX_BIT {
        0
    } else {
        n << magnitude
    }
}

fn shr_u(n: u64, magnitude: u32) -> u64 {
    if magnitude == MAX_BIT {
        0
    } else {
        n >> magnitude
    }
}

fn shl_s(n: i64, magnitude: u32) -> i64 {
    if magnitude == MAX_BIT {
        0
    } else {
        n << magnitude
    }
}

fn shr_s(n: i64, magnitude: u32) -> i64 {
    if magnitude == MAX_BIT {
        if n < 0 {
            -1
        } else {
            0
        }
    } else {
        n >> magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_u_edge_cases() {
        assert!(fits_u(0, 0));
        assert!(!fits_u(1, 0));
        assert!(fits_u(u64::MAX, 64));
        assert!(fits_u(0, 64));
        assert!(fits_u(63, 6));
        assert!(!fits_u(64, 6));
    }

    #[test]
    fn fits_s_edge_cases() {
        assert!(!fits_s(0, 0));
        assert!(!fits_s(-1, 0));
        assert!(fits_s(31, 6));
        assert!(!fits_s(32, 6));
        assert!(fits_s(-32, 6));
        assert!(!fits_s(-33, 6));
        assert!(fits_s(i64::MIN, 64));
        assert!(fits_s(i64::MAX, 64));
    }

    #[test]
    fn unsigned_round_trip() {
        for width in 0..=64u32 {
            for lsb in 0..=(64 - width) {
                if width == 0 {
                    continue;
                }
                let max = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
                for &n in &[0, 1, max / 2, max] {
                    let word = new_u(0, width, lsb, n).unwrap();
                    assert_eq!(get_u(word, width, lsb), n);
                }
            }
        }
    }

    #[test]
    fn signed_round_trip() {
        for width in 1..=64u32 {
            for lsb in 0..=(64 - width) {
                let max = if width == 64 {
                    i64::MAX
                } else {
                    (1i64 << (width - 1)) - 1
                };
                let min = if width == 64 {
                    i64::MIN
                } else {
                    -(1i64 << (width - 1))
                };
                for &n in &[min, -1, 0, 1, max] {
                    if n < min || n > max {
                        continue;
                    }
                    let word = new_s(0, width, lsb, n).unwrap();
                    assert_eq!(get_s(word, width, lsb), n);
                }
            }
        }
    }

    #[test]
    fn new_does_not_modify_outside_field() {
        let word = u64::MAX;
        let updated = new_u(word, 6, 10, 0).unwrap();
        // Bits below lsb and above lsb+width must be untouched (still 1).
        assert_eq!(updated & ((1 << 10) - 1), (1 << 10) - 1);
        assert_eq!(updated >> 16, (word >> 16));
        assert_eq!(get_u(updated, 6, 10), 0);
    }

    #[test]
    fn overflow_detection() {
        assert!(matches!(
            new_u(0, 6, 0, 64),
            Err(CodecError::FieldOverflow { width: 6, value: 64 })
        ));
        assert!(matches!(
            new_s(0, 6, 0, 32),
            Err(CodecError::FieldOverflow { width: 6, value: 32 })
        ));
        assert!(matches!(
            new_s(0, 6, 0, -33),
            Err(CodecError::FieldOverflow { width: 6, value: -33 })
        ));
    }

    #[test]
    fn negative_values_stored_in_twos_complement() {
        let word = new_s(0, 6, 0, -1).unwrap();
        assert_eq!(word, 0b111111);
        assert_eq!(get_s(word, 6, 0), -1);
    }

    #[test]
    #[should_panic]
    fn width_over_64_panics() {
        let _ = get_u(0, 65, 0);
    }

    #[test]
    #[should_panic]
    fn lsb_plus_width_over_64_panics() {
        let _ = get_u(0, 10, 60);
    }
}
