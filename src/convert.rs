//! Conversion between binary integers and dual-plane ternary words.
//!
//! Encoding produces balanced ternary digits by repeated division by 3 with
//! signed-digit correction; decoding is a weighted sum over 3^i. Both
//! directions run through an `i128` accumulator so that decoding up to 64
//! trits stays exact (intermediate partial sums can exceed the final result's
//! range before cancellation).

use crate::word::{Plane, TritWord};

/// Encode a signed integer into the low `width` trits of a dual-plane word.
///
/// Digits beyond `width` are silently dropped: encoding a value that needs
/// more trits than `width` wraps around, exactly like fixed-width binary
/// overflow. Zero encodes to all-zero planes.
///
/// The division loop operates on `-|value|` and flips the digit stream
/// afterwards when the input was positive, so the remainder correction only
/// has to handle the negative branch.
///
/// # Panics
/// Panics if `width` exceeds the plane's trit capacity.
pub fn encode<P: Plane>(value: i128, width: u32) -> TritWord<P> {
    assert!(width <= P::WIDTH, "width {} exceeds word capacity {}", width, P::WIDTH);

    let positive = value > 0;
    // -|value|; i128::MIN is already negative so this never overflows.
    let mut v = if positive { -value } else { value };

    let mut neg = P::ZERO;
    let mut pos = P::ZERO;

    for i in 0..width {
        if v == 0 {
            break;
        }
        // v % 3 is in {0, -1, -2}; -2 corrects to digit +1 with a borrow.
        let digit = match v % 3 {
            0 => 0i128,
            -1 => -1,
            _ => 1,
        };
        v = (v - digit) / 3;

        let digit = if positive { -digit } else { digit };
        match digit {
            -1 => neg = neg | (P::ONE << i),
            1 => pos = pos | (P::ONE << i),
            _ => {}
        }
    }

    TritWord::from_planes(neg, pos)
}

/// Decode the low `width` trits of a dual-plane word into a signed integer.
///
/// Computes the weighted sum over 3^i with wrapping `i128` arithmetic: exact
/// whenever the word's significant width fits 80 trits (always true for
/// planes up to `u64`); a full 128-trit word wraps modulo 2^128.
///
/// Decoding a word whose planes overlap is a precondition violation; the
/// result is meaningless but the call is still memory safe.
///
/// # Panics
/// Panics if `width` exceeds the plane's trit capacity.
pub fn decode<P: Plane>(word: &TritWord<P>, width: u32) -> i128 {
    assert!(width <= P::WIDTH, "width {} exceeds word capacity {}", width, P::WIDTH);

    let neg = word.neg_plane();
    let pos = word.pos_plane();

    let mut acc: i128 = 0;
    let mut weight: i128 = 1;
    for i in 0..width {
        if pos.bit(i) {
            acc = acc.wrapping_add(weight);
        } else if neg.bit(i) {
            acc = acc.wrapping_sub(weight);
        }
        weight = weight.wrapping_mul(3);
    }
    acc
}

/// Largest value representable in `width` trits: (3^width - 1) / 2.
///
/// The representable range of a `width`-trit word is symmetric,
/// `[-max_value(width), +max_value(width)]`. Only meaningful for widths
/// whose range fits an `i128` (up to 80 trits).
pub fn max_value(width: u32) -> i128 {
    let mut pw: i128 = 1;
    for _ in 0..width {
        pw *= 3;
    }
    (pw - 1) / 2
}

impl<P: Plane> TritWord<P> {
    /// Encode `value` across the word's full width. See [`encode`].
    #[inline]
    pub fn from_int(value: i128) -> Self {
        encode(value, P::WIDTH)
    }

    /// Decode the word's full width. See [`decode`].
    #[inline]
    pub fn to_int(&self) -> i128 {
        decode(self, P::WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_zero_is_empty_planes() {
        let w = encode::<u32>(0, 32);
        assert!(w.is_zero());
    }

    #[test]
    fn test_encode_thirteen_into_three_trits() {
        // 13 = 1*9 + 1*3 + 1*1
        let w = encode::<u8>(13, 3);
        assert_eq!(w.neg_plane(), 0b000);
        assert_eq!(w.pos_plane(), 0b111);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(encode::<u16>(1, 16).pos_plane(), 0b1);
        assert_eq!(encode::<u16>(-1, 16).neg_plane(), 0b1);
        // 2 = +3 - 1 = PN
        let two = encode::<u16>(2, 16);
        assert_eq!(two.pos_plane(), 0b10);
        assert_eq!(two.neg_plane(), 0b01);
        // 42 = P N N N O (trits 4..0)
        let w = encode::<u16>(42, 16);
        assert_eq!(w.to_int(), 42);
        assert_eq!(format!("{}", w.truncate(5)), "0tOOOOOOOOOOOPNNNO");
    }

    #[test]
    fn test_roundtrip_all_widths() {
        for v in [-9841i128, -364, -42, -1, 0, 1, 2, 42, 364, 9841] {
            if v.abs() <= max_value(8) {
                assert_eq!(decode(&encode::<u8>(v, 8), 8), v);
            }
            assert_eq!(decode(&encode::<u16>(v, 16), 16), v);
            assert_eq!(decode(&encode::<u32>(v, 32), 32), v);
            assert_eq!(decode(&encode::<u64>(v, 64), 64), v);
            assert_eq!(decode(&encode::<u128>(v, 128), 128), v);
        }
    }

    #[test]
    fn test_width_zero_decodes_to_zero() {
        let w = encode::<u32>(123_456, 0);
        assert!(w.is_zero());
        assert_eq!(decode(&w, 0), 0);
    }

    #[test]
    fn test_max_value() {
        assert_eq!(max_value(0), 0);
        assert_eq!(max_value(3), 13);
        assert_eq!(max_value(9), 9841);
        assert_eq!(max_value(27), 3_812_798_742_493);
    }

    #[test]
    fn test_truncation_wraps() {
        // Encoding past the width drops high digits, so the result equals the
        // value reduced into the width's representable range.
        let width = 3u32;
        let modulus = 2 * max_value(width) + 1; // 27
        for v in -100i128..=100 {
            let got = decode(&encode::<u8>(v, width), width);
            let mut expect = v.rem_euclid(modulus);
            if expect > max_value(width) {
                expect -= modulus;
            }
            assert_eq!(got, expect, "wraparound mismatch for {}", v);
        }
    }

    #[test]
    fn test_range_extremes() {
        let max9 = max_value(9);
        let w = encode::<u16>(max9, 9);
        assert_eq!(w.pos_plane(), 0b1_1111_1111);
        assert_eq!(w.neg_plane(), 0);
        let w = encode::<u16>(-max9, 9);
        assert_eq!(w.neg_plane(), 0b1_1111_1111);
        assert_eq!(w.pos_plane(), 0);
    }

    /// Values within the 32-trit representable range.
    fn in_range_32() -> impl Strategy<Value = i128> {
        let m = max_value(32);
        -m..=m
    }

    proptest! {
        #[test]
        fn prop_roundtrip_u32(v in in_range_32()) {
            let w = encode::<u32>(v, 32);
            prop_assert_eq!(decode(&w, 32), v);
        }

        #[test]
        fn prop_roundtrip_u64(v in any::<i64>()) {
            let v = v as i128;
            let w = encode::<u64>(v, 64);
            prop_assert_eq!(decode(&w, 64), v);
        }

        #[test]
        fn prop_planes_disjoint(v in any::<i64>()) {
            let w = encode::<u64>(v as i128, 64);
            prop_assert_eq!(w.neg_plane() & w.pos_plane(), 0);
        }

        #[test]
        fn prop_negate_negates_value(v in any::<i64>()) {
            let w = encode::<u64>(v as i128, 64);
            prop_assert_eq!(w.negate().to_int(), -(v as i128));
        }
    }
}
