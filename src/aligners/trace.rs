//! Backtrace: follow parent links from the terminal cell back to the origin.
use super::cigar::{Cigar, CigarOp};
use super::matrix::{CellRef, EditOp, Matrix};
use super::Symbol;
use crate::cost_model::Cost;

/// Marker for a gap in either aligned string.
pub const GAP: char = '-';

/// A complete alignment, before any truncation for display.
///
/// `a` and `b` always have the same number of characters: one per column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment {
    pub cost: Cost,
    /// `a` with gaps inserted.
    pub a: String,
    /// `b` with gaps inserted.
    pub b: String,
    pub cigar: Cigar,
    /// Number of cells in the matrix the alignment was traced through.
    pub cells: usize,
}

impl Alignment {
    /// The first `len` columns of both aligned strings.
    pub fn truncated(&self, len: usize) -> (String, String) {
        let cut = |s: &str| -> String { s.chars().take(len).collect() };
        (cut(&self.a), cut(&self.b))
    }
}

/// Reconstruct the alignment ending in `end`.
///
/// Runs in time linear in the length of the alignment.
pub fn trace<C: Symbol>(m: &Matrix<C>, end: CellRef) -> Alignment {
    let mut a = vec![];
    let mut b = vec![];
    let mut cigar = Cigar::default();
    let char_or_gap = |c: Option<C>| c.map_or(GAP, Symbol::to_char);

    let mut cur = Some(end);
    while let Some(r) = cur {
        let cell = &m[r];
        match cell.op {
            EditOp::None => break,
            EditOp::Sub => {
                a.push(char_or_gap(cell.ca));
                b.push(char_or_gap(cell.cb));
                cigar.push(if cell.ca == cell.cb {
                    CigarOp::Match
                } else {
                    CigarOp::Sub
                });
            }
            EditOp::Ins => {
                a.push(GAP);
                b.push(char_or_gap(cell.cb));
                cigar.push(CigarOp::Ins);
            }
            EditOp::Del => {
                a.push(char_or_gap(cell.ca));
                b.push(GAP);
                cigar.push(CigarOp::Del);
            }
        }
        cur = cell.parent;
    }

    // Built from the end backwards.
    cigar.reverse();
    Alignment {
        cost: m[end].cost,
        a: a.into_iter().rev().collect(),
        b: b.into_iter().rev().collect(),
        cigar,
        cells: m.cells(),
    }
}
