//! Dual-plane balanced ternary words.
//!
//! A [`TritWord`] stores one trit per bit position across two parallel
//! bitmasks of the same unsigned integer type: a negative plane and a
//! positive plane. For bit position `i` (0 = least significant, weight 3^i):
//!
//! - bit set in `pos` only  -> trit +1
//! - bit set in `neg` only  -> trit -1
//! - bit clear in both      -> trit 0
//! - bit set in both        -> illegal (`neg & pos == 0` always holds)
//!
//! The plane type decides the trit capacity: a `TritWord<u32>` holds 32
//! trits. Splitting the planes lets arithmetic and compiled operators run
//! word-parallel with a handful of bitwise instructions.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

use crate::trit::Trit;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for u128 {}
}

/// An unsigned integer usable as one plane of a [`TritWord`].
///
/// Sealed: implemented for `u8`, `u16`, `u32`, `u64` and `u128` only.
pub trait Plane:
    sealed::Sealed
    + Copy
    + Eq
    + Hash
    + Default
    + fmt::Debug
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Serialize
    + DeserializeOwned
{
    /// Trits held per word (the bit width of the plane type).
    const WIDTH: u32;
    /// The all-clear plane.
    const ZERO: Self;
    /// The plane with only bit 0 set.
    const ONE: Self;
    /// The all-set plane.
    const ALL: Self;

    /// Number of leading zero bits.
    fn leading_zeros(self) -> u32;

    /// Shift left, yielding zero when `n >= WIDTH` instead of panicking.
    #[inline]
    fn shl_checked(self, n: u32) -> Self {
        if n >= Self::WIDTH {
            Self::ZERO
        } else {
            self << n
        }
    }

    /// Shift right, yielding zero when `n >= WIDTH` instead of panicking.
    #[inline]
    fn shr_checked(self, n: u32) -> Self {
        if n >= Self::WIDTH {
            Self::ZERO
        } else {
            self >> n
        }
    }

    /// True when no bit is set.
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Mask covering the low `width` bits (`ALL` when `width >= WIDTH`).
    #[inline]
    fn low_mask(width: u32) -> Self {
        if width >= Self::WIDTH {
            Self::ALL
        } else {
            !(Self::ALL << width)
        }
    }

    /// True when bit `i` is set.
    #[inline]
    fn bit(self, i: u32) -> bool {
        !(self.shr_checked(i) & Self::ONE).is_zero()
    }
}

macro_rules! impl_plane {
    ($($t:ty),*) => {$(
        impl Plane for $t {
            const WIDTH: u32 = <$t>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const ALL: Self = <$t>::MAX;

            #[inline]
            fn leading_zeros(self) -> u32 {
                <$t>::leading_zeros(self)
            }
        }
    )*};
}

impl_plane!(u8, u16, u32, u64, u128);

/// A fixed-width balanced ternary word over two bit planes.
///
/// `P::WIDTH` trits, least significant at bit 0. Every producing operation
/// maintains the invariant `neg & pos == 0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TritWord<P: Plane> {
    neg: P,
    pos: P,
}

impl<P: Plane> TritWord<P> {
    /// Number of trits in this word.
    pub const WIDTH: u32 = P::WIDTH;

    /// The all-zero word.
    #[inline]
    pub fn zero() -> Self {
        Self { neg: P::ZERO, pos: P::ZERO }
    }

    /// Assemble a word from raw planes.
    ///
    /// The planes must be disjoint (`neg & pos == 0`); this is checked only
    /// in debug builds, keeping the hot path branch-free.
    #[inline]
    pub fn from_planes(neg: P, pos: P) -> Self {
        debug_assert!((neg & pos).is_zero(), "overlapping trit planes");
        Self { neg, pos }
    }

    /// The negative plane.
    #[inline]
    pub fn neg_plane(&self) -> P {
        self.neg
    }

    /// The positive plane.
    #[inline]
    pub fn pos_plane(&self) -> P {
        self.pos
    }

    /// Get a single trit by position (0 = least significant).
    ///
    /// # Panics
    /// Panics if `index >= WIDTH`.
    #[inline]
    pub fn get(&self, index: u32) -> Trit {
        assert!(index < P::WIDTH, "trit index {} out of range for width {}", index, P::WIDTH);
        if self.pos.bit(index) {
            Trit::P
        } else if self.neg.bit(index) {
            Trit::N
        } else {
            Trit::O
        }
    }

    /// Set a single trit by position (0 = least significant).
    ///
    /// # Panics
    /// Panics if `index >= WIDTH`.
    #[inline]
    pub fn set(&mut self, index: u32, trit: Trit) {
        assert!(index < P::WIDTH, "trit index {} out of range for width {}", index, P::WIDTH);
        let bit = P::ONE << index;
        self.neg = self.neg & !bit;
        self.pos = self.pos & !bit;
        match trit {
            Trit::N => self.neg = self.neg | bit,
            Trit::P => self.pos = self.pos | bit,
            Trit::O => {}
        }
    }

    /// Negate the word: every trit flips sign, which is a plane swap.
    #[inline]
    pub fn negate(&self) -> Self {
        Self { neg: self.pos, pos: self.neg }
    }

    /// Keep the low `width` trits, clearing everything above.
    #[inline]
    pub fn truncate(&self, width: u32) -> Self {
        let mask = P::low_mask(width);
        Self { neg: self.neg & mask, pos: self.pos & mask }
    }

    /// Index of the highest nonzero trit plus one; 0 for the zero word.
    ///
    /// Used as the complexity proxy when choosing a multiplication strategy.
    #[inline]
    pub fn significant_trits(&self) -> u32 {
        P::WIDTH - (self.neg | self.pos).leading_zeros()
    }

    /// True when every trit is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.neg.is_zero() && self.pos.is_zero()
    }

    /// Iterate trits from least significant to most significant.
    pub fn trits(&self) -> impl Iterator<Item = Trit> + '_ {
        (0..P::WIDTH).map(move |i| self.get(i))
    }
}

impl<P: Plane> fmt::Debug for TritWord<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TritWord(0t")?;
        for i in (0..P::WIDTH).rev() {
            write!(f, "{:?}", self.get(i))?;
        }
        write!(f, ")")
    }
}

impl<P: Plane> fmt::Display for TritWord<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0t")?;
        for i in (0..P::WIDTH).rev() {
            write!(f, "{:?}", self.get(i))?;
        }
        Ok(())
    }
}

impl<P: Plane> std::ops::Neg for TritWord<P> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
