//! Single balanced ternary digit (trit).
//!
//! A trit can hold one of three values: -1, 0, or +1, totally ordered as
//! -1 < 0 < +1. We use a 2-bit Binary-Coded Ternary (BCT) encoding:
//! - `0b00` = 0 (Zero)
//! - `0b01` = +1 (Positive)
//! - `0b10` = -1 (Negative)
//! - `0b11` = Invalid (handled in debug mode)
//!
//! The BCT codes double as the per-cell packing used for canonical
//! operator-table keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single balanced ternary digit.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Trit {
    /// Negative (-1)
    N = 0b10,
    /// Zero (0)
    O = 0b00,
    /// Positive (+1)
    P = 0b01,
}

impl Trit {
    /// All possible trit values in order: N, O, P.
    pub const ALL: [Trit; 3] = [Trit::N, Trit::O, Trit::P];

    /// Create a trit from a raw BCT byte.
    ///
    /// In debug mode, panics on invalid encoding (0b11).
    /// In release mode, normalizes invalid values to O (zero).
    #[inline]
    pub fn from_bct(byte: u8) -> Self {
        match byte & 0b11 {
            0b00 => Trit::O,
            0b01 => Trit::P,
            0b10 => Trit::N,
            _ => {
                #[cfg(debug_assertions)]
                panic!("Invalid BCT trit encoding: 0b{:02b}", byte);
                #[cfg(not(debug_assertions))]
                Trit::O
            }
        }
    }

    /// Get the raw BCT byte representation.
    #[inline]
    pub const fn to_bct(self) -> u8 {
        self as u8
    }

    /// Create a trit from an integer value.
    ///
    /// # Panics
    /// Panics if value is not in {-1, 0, 1}.
    #[inline]
    pub fn from_i8(value: i8) -> Self {
        match value {
            -1 => Trit::N,
            0 => Trit::O,
            1 => Trit::P,
            _ => panic!("Invalid trit value: {} (must be -1, 0, or 1)", value),
        }
    }

    /// Convert to integer value.
    #[inline]
    pub const fn to_i8(self) -> i8 {
        match self {
            Trit::N => -1,
            Trit::O => 0,
            Trit::P => 1,
        }
    }

    /// Dense index in N/O/P order (N = 0, O = 1, P = 2).
    ///
    /// Used to address rows and columns of 3x3 operator tables.
    #[inline]
    pub const fn index(self) -> usize {
        (self.to_i8() + 1) as usize
    }

    /// Negate the trit (flip N <-> P, O stays O).
    #[inline]
    pub const fn neg(self) -> Self {
        match self {
            Trit::N => Trit::P,
            Trit::O => Trit::O,
            Trit::P => Trit::N,
        }
    }

    /// Minimum (ternary AND) - returns the lesser value.
    #[inline]
    pub const fn min(self, other: Self) -> Self {
        match (self.to_i8(), other.to_i8()) {
            (a, b) if a <= b => self,
            _ => other,
        }
    }

    /// Maximum (ternary OR) - returns the greater value.
    #[inline]
    pub const fn max(self, other: Self) -> Self {
        match (self.to_i8(), other.to_i8()) {
            (a, b) if a >= b => self,
            _ => other,
        }
    }

    /// Consensus - returns the value if both inputs match, else O.
    #[inline]
    pub const fn consensus(self, other: Self) -> Self {
        match (self, other) {
            (Trit::P, Trit::P) => Trit::P,
            (Trit::N, Trit::N) => Trit::N,
            _ => Trit::O,
        }
    }

    /// Carry-free sum: (a + b) mod 3, normalized to {-1, 0, 1}.
    #[inline]
    pub const fn sum(self, other: Self) -> Self {
        let total = self.to_i8() + other.to_i8();
        match total {
            -2 => Trit::P, // -2 wraps to +1
            -1 => Trit::N,
            0 => Trit::O,
            1 => Trit::P,
            2 => Trit::N, // +2 wraps to -1
            _ => unreachable!(),
        }
    }

    /// Single-trit multiplication (never carries).
    #[inline]
    pub const fn mul(self, other: Self) -> Self {
        match (self, other) {
            (Trit::O, _) | (_, Trit::O) => Trit::O,
            (Trit::P, Trit::P) | (Trit::N, Trit::N) => Trit::P,
            (Trit::P, Trit::N) | (Trit::N, Trit::P) => Trit::N,
        }
    }

    /// Returns true if this trit is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        matches!(self, Trit::O)
    }

    /// Returns true if this trit is positive.
    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(self, Trit::P)
    }

    /// Returns true if this trit is negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        matches!(self, Trit::N)
    }
}

impl Default for Trit {
    fn default() -> Self {
        Trit::O
    }
}

impl fmt::Debug for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trit::N => write!(f, "N"),
            Trit::O => write!(f, "O"),
            Trit::P => write!(f, "P"),
        }
    }
}

impl fmt::Display for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trit::N => write!(f, "-"),
            Trit::O => write!(f, "0"),
            Trit::P => write!(f, "+"),
        }
    }
}

impl std::ops::Neg for Trit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Trit::neg(self)
    }
}

impl From<i8> for Trit {
    fn from(value: i8) -> Self {
        Trit::from_i8(value)
    }
}

impl From<Trit> for i8 {
    fn from(trit: Trit) -> Self {
        trit.to_i8()
    }
}
