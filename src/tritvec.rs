//! Arbitrary-precision trit arrays.
//!
//! A [`TritVec`] stores an unbounded trit sequence as two parallel lists of
//! 64-bit plane words plus an explicit trit length. The length need not be a
//! multiple of 64: the final word is partially used and its unused high bits
//! are always zero in both planes, so whole-word comparisons and hashing
//! just work.
//!
//! The array is exclusively owned by its holder. Every operation returns a
//! new array (value semantics) except [`TritVec::resize`], which mutates in
//! place; concurrent mutation of one instance requires external
//! synchronization or a clone.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::op::{CompiledOp, OpCache, OpTable};
use crate::trit::Trit;

/// Bits (trits) per plane word.
const WORD_BITS: usize = 64;

/// Errors raised by trit-array operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TritVecError {
    /// Index at or past the array's length.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    /// Slice bounds inverted or past the array's length.
    #[error("invalid slice range {start}..{end} for length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
    /// Unrecognized character while parsing.
    #[error("invalid trit character: '{0}' (expected N/O/P or -/0/+)")]
    InvalidChar(char),
}

/// A resizable balanced ternary number of caller-chosen trit length.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TritVec {
    len: usize,
    neg: Vec<u64>,
    pos: Vec<u64>,
}

fn word_count(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

/// Mask keeping the bits of the final word that fall inside `len`.
fn tail_mask(len: usize) -> u64 {
    match len % WORD_BITS {
        0 => u64::MAX,
        r => (1u64 << r) - 1,
    }
}

impl TritVec {
    /// An all-zero array of `len` trits.
    pub fn zero(len: usize) -> Self {
        let words = word_count(len);
        Self { len, neg: vec![0; words], pos: vec![0; words] }
    }

    /// Build from a trit slice, least significant first.
    pub fn from_trits(trits: &[Trit]) -> Self {
        let mut out = Self::zero(trits.len());
        for (i, &t) in trits.iter().enumerate() {
            out.set_unchecked(i, t);
        }
        out
    }

    /// Length in trits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the array holds no trits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when every trit is zero.
    pub fn is_zero(&self) -> bool {
        self.neg.iter().all(|&w| w == 0) && self.pos.iter().all(|&w| w == 0)
    }

    /// Read the trit at `index`.
    pub fn get(&self, index: usize) -> Result<Trit, TritVecError> {
        if index >= self.len {
            return Err(TritVecError::OutOfRange { index, len: self.len });
        }
        Ok(self.get_unchecked(index))
    }

    /// Write the trit at `index`.
    pub fn set(&mut self, index: usize, trit: Trit) -> Result<(), TritVecError> {
        if index >= self.len {
            return Err(TritVecError::OutOfRange { index, len: self.len });
        }
        self.set_unchecked(index, trit);
        Ok(())
    }

    fn get_unchecked(&self, index: usize) -> Trit {
        let (w, b) = (index / WORD_BITS, index % WORD_BITS);
        if self.pos[w] >> b & 1 == 1 {
            Trit::P
        } else if self.neg[w] >> b & 1 == 1 {
            Trit::N
        } else {
            Trit::O
        }
    }

    fn set_unchecked(&mut self, index: usize, trit: Trit) {
        let (w, b) = (index / WORD_BITS, index % WORD_BITS);
        let bit = 1u64 << b;
        self.neg[w] &= !bit;
        self.pos[w] &= !bit;
        match trit {
            Trit::N => self.neg[w] |= bit,
            Trit::P => self.pos[w] |= bit,
            Trit::O => {}
        }
    }

    /// Iterate trits from least significant to most significant.
    pub fn trits(&self) -> impl Iterator<Item = Trit> + '_ {
        (0..self.len).map(move |i| self.get_unchecked(i))
    }

    /// Resize in place to `new_len` trits.
    ///
    /// Growing appends zero trits; shrinking truncates, preserving the
    /// low-order trits. Growing and then shrinking back restores the exact
    /// original bit pattern.
    pub fn resize(&mut self, new_len: usize) {
        let words = word_count(new_len);
        self.neg.resize(words, 0);
        self.pos.resize(words, 0);
        self.len = new_len;
        self.mask_tail();
    }

    /// Negate every trit (plane swap).
    pub fn negate(&self) -> Self {
        Self { len: self.len, neg: self.pos.clone(), pos: self.neg.clone() }
    }

    /// Shift by `k` trit positions within the current length: positive `k`
    /// shifts left (toward higher weight), negative `k` shifts right. Bits
    /// leaving either end are dropped; the length is unchanged.
    pub fn shift(&self, k: i64) -> Self {
        if k >= 0 {
            self.shift_left(k as usize)
        } else {
            self.shift_right(k.unsigned_abs() as usize)
        }
    }

    fn shift_left(&self, s: usize) -> Self {
        if s >= self.len {
            return Self::zero(self.len);
        }
        let words = self.neg.len();
        let (ws, bs) = (s / WORD_BITS, s % WORD_BITS);
        let mut out = Self::zero(self.len);

        for w in ws..words {
            let src = w - ws;
            if bs == 0 {
                out.neg[w] = self.neg[src];
                out.pos[w] = self.pos[src];
            } else {
                // Low bits arrive from the previous source word's high bits.
                let carry_neg = if src == 0 { 0 } else { self.neg[src - 1] >> (WORD_BITS - bs) };
                let carry_pos = if src == 0 { 0 } else { self.pos[src - 1] >> (WORD_BITS - bs) };
                out.neg[w] = (self.neg[src] << bs) | carry_neg;
                out.pos[w] = (self.pos[src] << bs) | carry_pos;
            }
        }
        out.mask_tail();
        out
    }

    fn shift_right(&self, s: usize) -> Self {
        if s >= self.len {
            return Self::zero(self.len);
        }
        let words = self.neg.len();
        let (ws, bs) = (s / WORD_BITS, s % WORD_BITS);
        let mut out = Self::zero(self.len);

        for w in 0..words - ws {
            let src = w + ws;
            if bs == 0 {
                out.neg[w] = self.neg[src];
                out.pos[w] = self.pos[src];
            } else {
                // High bits arrive from the next source word's low bits.
                let carry_neg = if src + 1 < words { self.neg[src + 1] << (WORD_BITS - bs) } else { 0 };
                let carry_pos = if src + 1 < words { self.pos[src + 1] << (WORD_BITS - bs) } else { 0 };
                out.neg[w] = (self.neg[src] >> bs) | carry_neg;
                out.pos[w] = (self.pos[src] >> bs) | carry_pos;
            }
        }
        out
    }

    /// Copy out the half-open trit range `start..end` as a new array.
    ///
    /// A `start` that is not word-aligned re-assembles every output word
    /// from the two overlapping source words. Inverted or out-of-range
    /// bounds are an error, never a clamp.
    pub fn slice(&self, start: usize, end: usize) -> Result<Self, TritVecError> {
        if start > end || end > self.len {
            return Err(TritVecError::InvalidRange { start, end, len: self.len });
        }
        if start == end {
            return Ok(Self::zero(0));
        }
        let mut out = self.shift_right(start);
        out.resize(end - start);
        Ok(out)
    }

    /// Add two arrays trit-wise with full carry propagation, including
    /// carries crossing 64-trit word boundaries. The shorter operand is
    /// treated as zero-extended; the result has the longer length and wraps
    /// past it.
    pub fn add(&self, other: &Self) -> Self {
        let len = self.len.max(other.len);
        let words = word_count(len);

        let fetch = |v: &[u64], w: usize| v.get(w).copied().unwrap_or(0);
        let mut neg_a: Vec<u64> = (0..words).map(|w| fetch(&self.neg, w)).collect();
        let mut pos_a: Vec<u64> = (0..words).map(|w| fetch(&self.pos, w)).collect();
        let mut neg_b: Vec<u64> = (0..words).map(|w| fetch(&other.neg, w)).collect();
        let mut pos_b: Vec<u64> = (0..words).map(|w| fetch(&other.pos, w)).collect();

        let mut both_neg = vec![0u64; words];
        let mut both_pos = vec![0u64; words];

        loop {
            for w in 0..words {
                let (na, pa, nb, pb) = (neg_a[w], pos_a[w], neg_b[w], pos_b[w]);
                let bp = pa & pb;
                let bn = na & nb;
                let op = pa ^ pb;
                let on = na ^ nb;
                pos_a[w] = (op & !na & !nb) | (bp & on) | (!pa & !pb & bn);
                neg_a[w] = (on & !pa & !pb) | (bn & op) | (!na & !nb & bp);
                both_pos[w] = bp;
                both_neg[w] = bn;
            }

            // The doubles become a carry one trit to the left, with the top
            // bit of each word crossing into the next word's bit 0.
            let mut any = false;
            for w in (0..words).rev() {
                let in_pos = if w == 0 { 0 } else { both_pos[w - 1] >> (WORD_BITS - 1) };
                let in_neg = if w == 0 { 0 } else { both_neg[w - 1] >> (WORD_BITS - 1) };
                pos_b[w] = (both_pos[w] << 1) | in_pos;
                neg_b[w] = (both_neg[w] << 1) | in_neg;
                any |= pos_b[w] != 0 || neg_b[w] != 0;
            }
            if !any {
                break;
            }
        }

        let mut out = Self { len, neg: neg_a, pos: pos_a };
        out.mask_tail();
        out
    }

    /// Subtract `other` from `self` (negate-then-add).
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    /// Apply a compiled binary operator word-by-word across two arrays.
    ///
    /// The shorter operand is treated as zero-extended; the result has the
    /// longer length.
    pub fn apply(&self, other: &Self, op: &CompiledOp) -> Self {
        let len = self.len.max(other.len);
        let words = word_count(len);
        let mut out = Self::zero(len);
        let fetch = |v: &[u64], w: usize| v.get(w).copied().unwrap_or(0);
        for w in 0..words {
            let (n, p) = op.apply_planes(
                fetch(&self.neg, w),
                fetch(&self.pos, w),
                fetch(&other.neg, w),
                fetch(&other.pos, w),
            );
            out.neg[w] = n;
            out.pos[w] = p;
        }
        // A table sending (O, O) to a nonzero trit would otherwise write
        // past the length into the tail.
        out.mask_tail();
        out
    }

    /// Apply an operator table across two arrays, compiling it through the
    /// shared process-wide cache. See [`TritVec::apply`].
    pub fn apply_table(&self, other: &Self, table: &OpTable) -> Self {
        let op = OpCache::shared().get_or_compile(table);
        self.apply(other, &op)
    }

    /// Apply a single-trit mapping to every position.
    pub fn map(&self, f: impl Fn(Trit) -> Trit) -> Self {
        // Word-wide: gather the selector mask of each input value into the
        // plane its mapped output calls for.
        let words = self.neg.len();
        let mut out = Self::zero(self.len);
        for w in 0..words {
            let sel = [self.neg[w], !(self.neg[w] | self.pos[w]), self.pos[w]];
            for (t, mask) in Trit::ALL.into_iter().zip(sel) {
                match f(t) {
                    Trit::N => out.neg[w] |= mask,
                    Trit::P => out.pos[w] |= mask,
                    Trit::O => {}
                }
            }
        }
        out.mask_tail();
        out
    }

    /// Parse from a most-significant-first string like `0tPONN` or `+0--`.
    pub fn parse(s: &str) -> Result<Self, TritVecError> {
        let s = s.trim();
        let s = s.strip_prefix("0t").unwrap_or(s);

        let mut trits = Vec::with_capacity(s.len());
        for c in s.chars().rev() {
            trits.push(match c {
                'N' | 'n' | '-' => Trit::N,
                'O' | 'o' | '0' => Trit::O,
                'P' | 'p' | '+' => Trit::P,
                _ => return Err(TritVecError::InvalidChar(c)),
            });
        }
        Ok(Self::from_trits(&trits))
    }

    fn mask_tail(&mut self) {
        if let (Some(n), Some(p)) = (self.neg.last_mut(), self.pos.last_mut()) {
            let mask = tail_mask(self.len);
            *n &= mask;
            *p &= mask;
        }
    }
}

impl fmt::Debug for TritVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TritVec(0t")?;
        for i in (0..self.len).rev() {
            write!(f, "{:?}", self.get_unchecked(i))?;
        }
        write!(f, ", len={})", self.len)
    }
}

impl fmt::Display for TritVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0t")?;
        for i in (0..self.len).rev() {
            write!(f, "{:?}", self.get_unchecked(i))?;
        }
        Ok(())
    }
}
