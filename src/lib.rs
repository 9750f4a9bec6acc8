//! # triplane
//!
//! Balanced ternary arithmetic on dual bit-plane encoded words.
//!
//! Integers are represented as sequences of trits (digits in {-1, 0, +1})
//! packed two-bitmasks-per-word: a negative plane and a positive plane. On
//! top of that encoding the crate provides:
//!
//! - lossless conversion between native integers and ternary words for
//!   8/16/32/64/128-trit widths ([`encode`] / [`decode`])
//! - arithmetic performed directly on the planes, without decoding
//!   ([`add`], [`sub`], [`mul`], [`shift`])
//! - a synthesizer that compiles any 3x3 ternary truth table into a bitwise
//!   formula applied word-parallel ([`compile_operator`], [`OpCache`])
//! - an arbitrary-precision trit array with cross-word shift, slice and
//!   carry propagation ([`TritVec`])

pub mod arith;
pub mod convert;
pub mod op;
pub mod trit;
pub mod tritvec;
pub mod word;

// Re-export commonly used items
pub use arith::{add, mul, shift, sub};
pub use convert::{decode, encode, max_value};
pub use op::{compile_operator, CompiledOp, OpCache, OpTable, TableError};
pub use trit::Trit;
pub use tritvec::{TritVec, TritVecError};
pub use word::{Plane, TritWord};
