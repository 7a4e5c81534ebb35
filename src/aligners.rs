//! This module contains the alignment engine: the unrestricted and banded
//! matrix builders, and the backtrace shared by both.

use std::fmt::Debug;

use crate::cost_model::{Cost, LinearCost, INF};

pub mod band;
pub mod cigar;
pub mod matrix;
pub mod nw;
pub mod trace;


use self::matrix::{CellRef, Matrix};
use self::trace::Alignment;

/// An owned sequence.
pub type Sequence = Vec<u8>;
/// A sequence slice.
pub type Seq<'a> = &'a [u8];

/// A single element of a sequence.
///
/// Bytes are used for generated DNA input, `char`s for arbitrary text so
/// that multi-byte characters count as one position.
pub trait Symbol: Copy + Eq + Debug {
    fn to_char(self) -> char;
}

impl Symbol for u8 {
    fn to_char(self) -> char {
        self as char
    }
}

impl Symbol for char {
    fn to_char(self) -> char {
        self
    }
}

pub fn seq_to_string(s: Seq) -> String {
    String::from_utf8_lossy(s).into_owned()
}

/// Keep at most the first `max_len` symbols of `s`.
pub fn clamp<C>(s: &[C], max_len: Option<usize>) -> &[C] {
    match max_len {
        Some(n) if n < s.len() => &s[..n],
        _ => s,
    }
}

/// An aligner fills a cost matrix for two sequences using some variant of
/// the Needleman-Wunsch recurrence.
///
/// Note that insertions are when `b` has more characters than `a`, and
/// deletions are when `b` has less characters than `a`.
pub trait Aligner: Debug {
    /// Returns the cost model used by the aligner.
    fn cost_model(&self) -> &LinearCost;

    /// Fill the cost matrix and return it with the address of its terminal cell.
    /// Returns `None` when the aligner can not align these sequences at all.
    fn build<C: Symbol>(&self, a: &[C], b: &[C]) -> Option<(Matrix<C>, CellRef)>;

    /// Finds the cost of aligning `a` and `b`, or `INF` when impossible.
    fn cost<C: Symbol>(&self, a: &[C], b: &[C]) -> Cost {
        self.build(a, b).map_or(INF, |(m, end)| m[end].cost)
    }

    /// Finds an alignment of `a` and `b`.
    fn align<C: Symbol>(&self, a: &[C], b: &[C]) -> Option<Alignment> {
        let (m, end) = self.build(a, b)?;
        Some(trace::trace(&m, end))
    }
}
