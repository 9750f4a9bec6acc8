//! Word-parallel arithmetic on dual-plane ternary words.
//!
//! Addition works on every trit position of a word simultaneously: one pass
//! of the bitwise trinary full adder resolves same-position pairs into a sum
//! word plus a carry word shifted one position left, and the loop repeats
//! until no carry bit remains. This is the balanced ternary analogue of a
//! carry-save adder; sparse operands settle in a couple of iterations.
//!
//! Carries leaving the top trit are dropped, so results wrap around the
//! word's representable range just like fixed-width binary overflow.

use crate::convert::{decode, encode};
use crate::word::{Plane, TritWord};

/// Either operand at or below this many significant trits forces shift-add.
const SHIFT_ADD_SPARSE: u32 = 4;
/// Combined significant trits at or below this forces shift-add.
const SHIFT_ADD_COMBINED: u32 = 12;
/// Above this combined width the i128 convert path would overflow, so
/// shift-add is used regardless of density.
const CONVERT_EXACT_LIMIT: u32 = 80;

/// Add two ternary words, wrapping past the top trit.
pub fn add<P: Plane>(a: TritWord<P>, b: TritWord<P>) -> TritWord<P> {
    let (mut neg_a, mut pos_a) = (a.neg_plane(), a.pos_plane());
    let (mut neg_b, mut pos_b) = (b.neg_plane(), b.pos_plane());

    loop {
        // Positions where both operands agree produce a double (+-2), which
        // balanced ternary writes as the opposite trit plus a carry one
        // position left.
        let both_pos = pos_a & pos_b;
        let both_neg = neg_a & neg_b;
        let one_pos = pos_a ^ pos_b;
        let one_neg = neg_a ^ neg_b;

        let sum_pos = (one_pos & !neg_a & !neg_b) | (both_pos & one_neg) | (!pos_a & !pos_b & both_neg);
        let sum_neg = (one_neg & !pos_a & !pos_b) | (both_neg & one_pos) | (!neg_a & !neg_b & both_pos);

        // Top carry bit falls off the word: wraparound by design.
        let carry_pos = both_pos << 1;
        let carry_neg = both_neg << 1;

        if carry_pos.is_zero() && carry_neg.is_zero() {
            return TritWord::from_planes(sum_neg, sum_pos);
        }

        neg_a = sum_neg;
        pos_a = sum_pos;
        neg_b = carry_neg;
        pos_b = carry_pos;
    }
}

/// Subtract `b` from `a` (negate-then-add).
#[inline]
pub fn sub<P: Plane>(a: TritWord<P>, b: TritWord<P>) -> TritWord<P> {
    add(a, b.negate())
}

/// Multiply two ternary words, wrapping past the top trit.
///
/// Chooses between [`mul_shift_add`] and [`mul_convert`] by operand
/// complexity: sparse or small operands go through shift-add (cost scales
/// with the multiplier's significant trits), dense operands go through a
/// native `i128` multiply bracketed by conversions. The convert path is only
/// taken when the product provably fits the accumulator, so both strategies
/// agree on every input.
pub fn mul<P: Plane>(a: TritWord<P>, b: TritWord<P>) -> TritWord<P> {
    let sa = a.significant_trits();
    let sb = b.significant_trits();
    if sa == 0 || sb == 0 {
        return TritWord::zero();
    }

    let sparse = sa.min(sb) <= SHIFT_ADD_SPARSE || sa + sb <= SHIFT_ADD_COMBINED;
    if sparse || sa + sb > CONVERT_EXACT_LIMIT {
        mul_shift_add(a, b)
    } else {
        mul_convert(a, b)
    }
}

/// Shift-add multiplication: for every nonzero trit of the sparser operand,
/// add or subtract the other operand shifted left by that position.
pub fn mul_shift_add<P: Plane>(a: TritWord<P>, b: TritWord<P>) -> TritWord<P> {
    // Use the operand with the smaller significant width as the multiplier.
    let (multiplier, multiplicand) = if b.significant_trits() <= a.significant_trits() {
        (b, a)
    } else {
        (a, b)
    };

    let neg = multiplier.neg_plane();
    let pos = multiplier.pos_plane();
    let mut acc = TritWord::zero();

    for k in 0..multiplier.significant_trits() {
        let shifted = shift(multiplicand, k as i32);
        if pos.bit(k) {
            acc = add(acc, shifted);
        } else if neg.bit(k) {
            acc = sub(acc, shifted);
        }
    }
    acc
}

/// Convert-multiply-convert: decode both operands, multiply natively,
/// re-encode. Exact only while the product fits an `i128`; [`mul`] guards
/// the call accordingly.
pub fn mul_convert<P: Plane>(a: TritWord<P>, b: TritWord<P>) -> TritWord<P> {
    let product = decode(&a, P::WIDTH).wrapping_mul(decode(&b, P::WIDTH));
    encode(product, P::WIDTH)
}

/// Shift a word by `k` trit positions: positive `k` shifts left (multiply by
/// 3^k), negative `k` shifts right (truncating divide by 3^k). Trits shifted
/// past either end are dropped; `|k| >= WIDTH` yields zero.
pub fn shift<P: Plane>(a: TritWord<P>, k: i32) -> TritWord<P> {
    if k >= 0 {
        let n = k as u32;
        TritWord::from_planes(a.neg_plane().shl_checked(n), a.pos_plane().shl_checked(n))
    } else {
        let n = k.unsigned_abs();
        TritWord::from_planes(a.neg_plane().shr_checked(n), a.pos_plane().shr_checked(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::max_value;
    use proptest::prelude::*;

    fn w32(v: i128) -> TritWord<u32> {
        encode(v, 32)
    }

    #[test]
    fn test_add_basic() {
        assert_eq!(add(w32(100), w32(50)).to_int(), 150);
        assert_eq!(add(w32(100), w32(-150)).to_int(), -50);
        assert_eq!(add(w32(0), w32(0)).to_int(), 0);
    }

    #[test]
    fn test_additive_inverse() {
        for v in [-9841i128, -100, -1, 0, 1, 100, 9841] {
            let a = w32(v);
            assert!(add(a, a.negate()).is_zero(), "{} + (-{}) should be zero", v, v);
        }
    }

    #[test]
    fn test_sub() {
        assert_eq!(sub(w32(100), w32(30)).to_int(), 70);
        assert_eq!(sub(w32(30), w32(100)).to_int(), -70);
    }

    #[test]
    fn test_add_wraparound_three_trits() {
        // 110 + 010 = 1TT0; truncated to 3 trits that is TT0 = -12.
        let a = encode::<u8>(12, 3);
        let b = encode::<u8>(3, 3);
        let sum = add(a, b);
        assert_eq!(decode(&sum, 8), 15);
        assert_eq!(decode(&sum.truncate(3), 3), -12);
    }

    #[test]
    fn test_add_wraparound_full_word() {
        // Max + 1 wraps to min across the full word.
        let max = max_value(32);
        let wrapped = add(w32(max), w32(1));
        assert_eq!(wrapped.to_int(), -max);
    }

    #[test]
    fn test_mul_basic() {
        assert_eq!(mul(w32(7), w32(6)).to_int(), 42);
        assert_eq!(mul(w32(-7), w32(6)).to_int(), -42);
        assert_eq!(mul(w32(-7), w32(-6)).to_int(), 42);
        assert_eq!(mul(w32(1000), w32(1000)).to_int(), 1_000_000);
        assert!(mul(w32(123_456), w32(0)).is_zero());
    }

    #[test]
    fn test_mul_strategy_equivalence_matrix() {
        // Sparse and dense operands, small and large significant widths.
        let samples: [i128; 10] = [
            0,
            1,
            -2,
            3,                  // single trit at position 1
            81,                 // single trit at position 4
            13,                 // dense small: PPP
            -9841,              // dense 9 trits
            59049,              // 3^10, sparse large
            max_value(20),      // dense 20 trits
            -max_value(16) + 7, // dense-ish negative
        ];
        for &a in &samples {
            for &b in &samples {
                let wa = w32(a);
                let wb = w32(b);
                assert_eq!(
                    mul_shift_add(wa, wb),
                    mul_convert(wa, wb),
                    "strategies disagree for {} * {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_mul_dense_u64_stays_exact() {
        // Both operands dense enough that sa + sb exceeds the convert
        // limit: the selection must fall back to shift-add and still match
        // the wrapped reference value.
        let a = encode::<u64>(max_value(42), 64);
        let b = encode::<u64>(max_value(42) - 12345, 64);
        let product = mul(a, b);
        assert_eq!(product, mul_shift_add(a, b));
    }

    #[test]
    fn test_shift_left_is_times_three() {
        assert_eq!(shift(w32(1), 1).to_int(), 3);
        assert_eq!(shift(w32(1), 2).to_int(), 9);
        assert_eq!(shift(w32(-14), 3).to_int(), -14 * 27);
    }

    #[test]
    fn test_shift_right_truncates() {
        assert_eq!(shift(w32(27), -1).to_int(), 9);
        assert_eq!(shift(w32(27), -3).to_int(), 1);
        // Truncation toward the representation's zero: 4 = PP, 4/3 -> P = 1.
        assert_eq!(shift(w32(4), -1).to_int(), 1);
    }

    #[test]
    fn test_shift_nine_trit_scenario() {
        // All-positive 9-trit max shifted by 6 within a 9-trit window.
        let max9 = encode::<u16>(9841, 9);
        let left = shift(max9, 6).truncate(9);
        assert_eq!(decode(&left, 9), 9477);
        let right = shift(max9, -6);
        assert_eq!(decode(&right, 9), 13);
    }

    #[test]
    fn test_shift_edges() {
        let a = w32(12345);
        assert_eq!(shift(a, 0), a);
        assert!(shift(a, 32).is_zero());
        assert!(shift(a, -32).is_zero());
        assert!(shift(a, 1000).is_zero());
        assert!(shift(a, -1000).is_zero());
    }

    fn in_range_16() -> impl Strategy<Value = i128> {
        let m = max_value(16);
        -m..=m
    }

    proptest! {
        #[test]
        fn prop_add_matches_integers(a in in_range_16(), b in in_range_16()) {
            // Operands within 16 trits never overflow a 32-trit word.
            prop_assert_eq!(add(w32(a), w32(b)).to_int(), a + b);
        }

        #[test]
        fn prop_add_commutative(a in in_range_16(), b in in_range_16()) {
            prop_assert_eq!(add(w32(a), w32(b)), add(w32(b), w32(a)));
        }

        #[test]
        fn prop_add_associative(a in in_range_16(), b in in_range_16(), c in in_range_16()) {
            let left = add(add(w32(a), w32(b)), w32(c));
            let right = add(w32(a), add(w32(b), w32(c)));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn prop_mul_strategies_agree(a in in_range_16(), b in in_range_16()) {
            prop_assert_eq!(mul_shift_add(w32(a), w32(b)), mul_convert(w32(a), w32(b)));
        }

        #[test]
        fn prop_mul_matches_integers(a in in_range_16(), b in in_range_16()) {
            // 16 + 16 significant trits fit a 32-trit word exactly.
            prop_assert_eq!(mul(w32(a), w32(b)).to_int(), a * b);
        }

        #[test]
        fn prop_shift_left_then_right_restores(a in in_range_16(), k in 0i32..16) {
            // 16 trits shifted up to 16 still fit a 32-trit word, so nothing
            // falls off the top and the round trip is lossless.
            let w = w32(a);
            prop_assert_eq!(shift(shift(w, k), -k), w);
        }

        #[test]
        fn prop_shift_left_multiplies(a in in_range_16(), k in 0i32..16) {
            let mut expect = a;
            for _ in 0..k {
                expect *= 3;
            }
            prop_assert_eq!(shift(w32(a), k).to_int(), expect);
        }
    }
}
