//! Operator tables and the compiled-operator synthesizer.
//!
//! This module turns an arbitrary 3x3 ternary truth table into a pair of
//! boolean plane formulas applicable across a whole word at once:
//! - [`OpTable`] - the immutable 3x3 lookup table
//! - [`compile_operator`] / [`CompiledOp`] - the synthesized word-parallel form
//! - [`OpCache`] - a bounded FIFO cache of compiled operators

mod cache;
mod synth;
mod table;

pub use cache::OpCache;
pub use synth::{compile_operator, CompiledOp};
pub use table::{OpTable, TableError};
