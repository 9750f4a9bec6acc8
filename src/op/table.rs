//! 3x3 ternary operator tables.
//!
//! An [`OpTable`] maps every (left, right) trit pair to a result trit. It is
//! immutable once constructed and packs into an 18-bit canonical key (2 BCT
//! bits per cell) used for compiled-operator caching.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::trit::Trit;

/// Errors raised when constructing an operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// A flat construction did not supply exactly 9 entries.
    #[error("expected exactly 9 table entries, got {0}")]
    WrongLength(usize),
    /// An entry was outside {-1, 0, 1}.
    #[error("invalid trit value: {0} (must be -1, 0, or 1)")]
    InvalidTrit(i8),
}

/// A 3x3 truth table over trits: `(left, right) -> result`.
///
/// Rows are indexed by the left operand, columns by the right, both in
/// N, O, P order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpTable {
    cells: [[Trit; 3]; 3],
}

impl OpTable {
    /// Build from an explicit matrix, `cells[left][right]` in N, O, P order.
    #[inline]
    pub const fn from_matrix(cells: [[Trit; 3]; 3]) -> Self {
        Self { cells }
    }

    /// Build from a flat row-major sequence of 9 integer values.
    pub fn from_flat(values: &[i8]) -> Result<Self, TableError> {
        if values.len() != 9 {
            return Err(TableError::WrongLength(values.len()));
        }
        let mut cells = [[Trit::O; 3]; 3];
        for (n, &v) in values.iter().enumerate() {
            if !(-1..=1).contains(&v) {
                return Err(TableError::InvalidTrit(v));
            }
            cells[n / 3][n % 3] = Trit::from_i8(v);
        }
        Ok(Self { cells })
    }

    /// Build by evaluating a generating function at all 9 input pairs.
    pub fn from_fn(f: impl Fn(Trit, Trit) -> Trit) -> Self {
        let mut cells = [[Trit::O; 3]; 3];
        for l in Trit::ALL {
            for r in Trit::ALL {
                cells[l.index()][r.index()] = f(l, r);
            }
        }
        Self { cells }
    }

    /// Look up the result for a (left, right) pair.
    #[inline]
    pub const fn get(&self, left: Trit, right: Trit) -> Trit {
        self.cells[left.index()][right.index()]
    }

    /// Canonical integer key: the 9 cells packed row-major at 2 BCT bits
    /// each. Equal tables always produce equal keys.
    pub fn key(&self) -> u32 {
        let mut key = 0u32;
        for (n, cell) in self.cells.iter().flatten().enumerate() {
            key |= (cell.to_bct() as u32) << (2 * n);
        }
        key
    }

    // Common operators. These are the tables a program typically reuses for
    // its whole lifetime, which is what the compiled-operator cache exists
    // for.

    /// Tritwise minimum (ternary AND).
    pub fn min() -> Self {
        Self::from_fn(Trit::min)
    }

    /// Tritwise maximum (ternary OR).
    pub fn max() -> Self {
        Self::from_fn(Trit::max)
    }

    /// Consensus: the shared value when both inputs agree, else zero.
    pub fn consensus() -> Self {
        Self::from_fn(Trit::consensus)
    }

    /// Single-trit product.
    pub fn product() -> Self {
        Self::from_fn(Trit::mul)
    }

    /// Carry-free sum, (a + b) mod 3.
    pub fn sum() -> Self {
        Self::from_fn(Trit::sum)
    }
}

impl fmt::Debug for OpTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpTable[")?;
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            for cell in row {
                write!(f, "{:?}", cell)?;
            }
        }
        write!(f, "]")
    }
}
