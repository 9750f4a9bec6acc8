//! Compilation of operator tables into word-parallel boolean formulas.
//!
//! For each output sign the synthesizer collects the 3x3 boolean matrix of
//! (left, right) pairs producing that sign, then simplifies it against a
//! pattern catalog before falling back to a literal per-cell disjunction.
//! The resulting pair of formulas evaluates over six word-wide selector
//! signals (isNeg/isZero/isPos for each operand), so one application yields
//! the table's output at every trit position of a word in a handful of
//! bitwise instructions instead of per-trit lookups.

use crate::op::table::OpTable;
use crate::trit::Trit;
use crate::word::{Plane, TritWord};

/// One of the three mutually exclusive selector signals of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sel {
    Neg,
    Zero,
    Pos,
}

/// Selectors in N, O, P row/column order.
const SELS: [Sel; 3] = [Sel::Neg, Sel::Zero, Sel::Pos];

/// Word-wide selector signals for one operand.
struct Selectors<P: Plane> {
    neg: P,
    zero: P,
    pos: P,
}

impl<P: Plane> Selectors<P> {
    fn of(word: &TritWord<P>) -> Self {
        let neg = word.neg_plane();
        let pos = word.pos_plane();
        Self { neg, zero: !(neg | pos), pos }
    }

    #[inline]
    fn get(&self, sel: Sel) -> P {
        match sel {
            Sel::Neg => self.neg,
            Sel::Zero => self.zero,
            Sel::Pos => self.pos,
        }
    }
}

/// A boolean formula over the selector signals of two operands.
///
/// This is the compiled form: a small tree evaluated word-wide. Pattern
/// simplification keeps it shallow for every common operator.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Formula {
    Const(bool),
    A(Sel),
    B(Sel),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Xor(Box<Formula>, Box<Formula>),
}

impl Formula {
    fn eval<P: Plane>(&self, a: &Selectors<P>, b: &Selectors<P>) -> P {
        match self {
            Formula::Const(true) => P::ALL,
            Formula::Const(false) => P::ZERO,
            Formula::A(sel) => a.get(*sel),
            Formula::B(sel) => b.get(*sel),
            Formula::Not(x) => !x.eval(a, b),
            Formula::And(x, y) => x.eval(a, b) & y.eval(a, b),
            Formula::Or(x, y) => x.eval(a, b) | y.eval(a, b),
            Formula::Xor(x, y) => x.eval(a, b) ^ y.eval(a, b),
        }
    }
}

fn and(x: Formula, y: Formula) -> Formula {
    Formula::And(Box::new(x), Box::new(y))
}

fn or(x: Formula, y: Formula) -> Formula {
    Formula::Or(Box::new(x), Box::new(y))
}

fn not(x: Formula) -> Formula {
    Formula::Not(Box::new(x))
}

fn xor(x: Formula, y: Formula) -> Formula {
    Formula::Xor(Box::new(x), Box::new(y))
}

/// OR-fold a non-empty term list.
fn disjunction(mut terms: Vec<Formula>) -> Formula {
    let mut acc = terms.remove(0);
    for term in terms {
        acc = or(acc, term);
    }
    acc
}

/// The boolean matrix for one output sign: `cells[left][right]` in N, O, P
/// order.
type Matrix = [[bool; 3]; 3];

fn cell_count(m: &Matrix) -> usize {
    m.iter().flatten().filter(|&&c| c).count()
}

fn matches_shape(m: &Matrix, shape: impl Fn(usize, usize) -> bool) -> bool {
    (0..3).all(|i| (0..3).all(|j| m[i][j] == shape(i, j)))
}

/// Simplify a sign matrix into a formula.
///
/// Patterns are tried greedily in priority order: whole-matrix closed forms
/// first, then full and two-of-three rows and columns, and finally literal
/// AND pairs for any cells still uncovered. Every path produces an exact
/// formula for the matrix, never an approximation.
fn synthesize(m: &Matrix) -> Formula {
    match cell_count(m) {
        0 => return Formula::Const(false),
        9 => return Formula::Const(true),
        _ => {}
    }

    // Closed forms for the whole-matrix shapes.
    if matches_shape(m, |i, j| i == j) {
        // Diagonal: left == right.
        return disjunction(SELS.iter().map(|&s| and(Formula::A(s), Formula::B(s))).collect());
    }
    if matches_shape(m, |i, j| i + j == 2) {
        // Anti-diagonal: left == -right.
        return disjunction(
            SELS.iter()
                .zip(SELS.iter().rev())
                .map(|(&sa, &sb)| and(Formula::A(sa), Formula::B(sb)))
                .collect(),
        );
    }
    if matches_shape(m, |i, j| (i + j) % 2 == 0) {
        // Checkerboard: both operands zero or both nonzero.
        return not(xor(Formula::A(Sel::Zero), Formula::B(Sel::Zero)));
    }
    if matches_shape(m, |i, j| (i + j) % 2 == 1) {
        // Inverse checkerboard: exactly one operand zero.
        return xor(Formula::A(Sel::Zero), Formula::B(Sel::Zero));
    }

    let mut covered: Matrix = [[false; 3]; 3];
    let mut terms: Vec<Formula> = Vec::new();

    // Rows: a fully true row collapses to its A selector; two of three
    // collapse to the selector minus the missing column.
    for i in 0..3 {
        let row_count = (0..3).filter(|&j| m[i][j]).count();
        match row_count {
            3 => {
                terms.push(Formula::A(SELS[i]));
                covered[i] = [true; 3];
            }
            2 => {
                let missing = (0..3).find(|&j| !m[i][j]).unwrap();
                terms.push(and(Formula::A(SELS[i]), not(Formula::B(SELS[missing]))));
                for j in 0..3 {
                    covered[i][j] = m[i][j];
                }
            }
            _ => {}
        }
    }

    // Columns, symmetrically, but only when they still cover something new.
    for j in 0..3 {
        let col_count = (0..3).filter(|&i| m[i][j]).count();
        let covers_new = (0..3).any(|i| m[i][j] && !covered[i][j]);
        if !covers_new {
            continue;
        }
        match col_count {
            3 => {
                terms.push(Formula::B(SELS[j]));
                for i in 0..3 {
                    covered[i][j] = true;
                }
            }
            2 => {
                let missing = (0..3).find(|&i| !m[i][j]).unwrap();
                terms.push(and(Formula::B(SELS[j]), not(Formula::A(SELS[missing]))));
                for i in 0..3 {
                    covered[i][j] |= m[i][j];
                }
            }
            _ => {}
        }
    }

    // Literal fallback for whatever the catalog left uncovered.
    for i in 0..3 {
        for j in 0..3 {
            if m[i][j] && !covered[i][j] {
                terms.push(and(Formula::A(SELS[i]), Formula::B(SELS[j])));
            }
        }
    }

    disjunction(terms)
}

/// A table compiled into two word-parallel plane formulas.
///
/// Read-only after creation and safe to share across threads; applying it is
/// a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct CompiledOp {
    key: u32,
    neg: Formula,
    pos: Formula,
}

impl CompiledOp {
    /// The canonical key of the table this operator was compiled from.
    #[inline]
    pub fn key(&self) -> u32 {
        self.key
    }

    /// Apply the operator across every trit position of two words.
    pub fn apply<P: Plane>(&self, a: TritWord<P>, b: TritWord<P>) -> TritWord<P> {
        let sa = Selectors::of(&a);
        let sb = Selectors::of(&b);
        let neg = self.neg.eval(&sa, &sb);
        let pos = self.pos.eval(&sa, &sb);
        TritWord::from_planes(neg, pos)
    }

    /// Apply the operator to raw plane pairs (for callers that keep planes
    /// outside a [`TritWord`], like the arbitrary-precision array).
    pub fn apply_planes<P: Plane>(&self, neg_a: P, pos_a: P, neg_b: P, pos_b: P) -> (P, P) {
        let sa = Selectors { neg: neg_a, zero: !(neg_a | pos_a), pos: pos_a };
        let sb = Selectors { neg: neg_b, zero: !(neg_b | pos_b), pos: pos_b };
        (self.neg.eval(&sa, &sb), self.pos.eval(&sa, &sb))
    }
}

/// Compile an operator table into its word-parallel form.
///
/// The compiled function reproduces the table's value at every trit position
/// for all 9 input pairs, regardless of which simplification pattern fired.
pub fn compile_operator(table: &OpTable) -> CompiledOp {
    let mut neg_matrix: Matrix = [[false; 3]; 3];
    let mut pos_matrix: Matrix = [[false; 3]; 3];
    for l in Trit::ALL {
        for r in Trit::ALL {
            match table.get(l, r) {
                Trit::N => neg_matrix[l.index()][r.index()] = true,
                Trit::P => pos_matrix[l.index()][r.index()] = true,
                Trit::O => {}
            }
        }
    }
    CompiledOp {
        key: table.key(),
        neg: synthesize(&neg_matrix),
        pos: synthesize(&pos_matrix),
    }
}
