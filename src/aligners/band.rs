//! Banded Needleman-Wunsch: only cells with `|i - j| <= k` are computed.
//!
//! Row `i` stores the columns `max(0, i-k) ..= min(m, i+k)`, i.e. at most
//! `2k+1` cells, so time and memory are O(kn). Neighbours are addressed
//! through `band_local_column`, which translates an absolute column into the
//! index within its row.
//!
//! When the lengths differ by more than `k`, the end of the matrix lies
//! outside the band and no alignment is possible.
use std::cmp::min;

use tracing::{debug, trace};

use super::matrix::{best_parent, Cell, CellRef, EditOp, Matrix, Parent};
use super::{Aligner, Symbol};
use crate::cost_model::LinearCost;

/// Index of absolute column `j` within the stored cells of row `i`.
///
/// Row `i` starts at column `max(0, i-k)`. Requires `|i - j| <= k`, i.e.
/// `(i, j)` lies inside the band.
pub fn band_local_column(i: usize, j: usize, k: usize) -> usize {
    debug_assert!(
        i.abs_diff(j) <= k,
        "({i}, {j}) lies outside the band of width {k}"
    );
    j - i.saturating_sub(k)
}

/// Position of a cell relative to the edges of the band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandEdge {
    /// Strictly inside the band; all three neighbours are available.
    Interior,
    /// `i - j == k`: the left neighbour `(i, j-1)` lies outside the band.
    Lower,
    /// `j - i == k`: the neighbour above `(i-1, j)` lies outside the band.
    Upper,
    /// `k == 0`: only the diagonal neighbour exists.
    Both,
}

impl BandEdge {
    pub fn of(i: usize, j: usize, k: usize) -> Self {
        let lower = i >= j && i - j == k;
        let upper = j >= i && j - i == k;
        match (lower, upper) {
            (true, true) => BandEdge::Both,
            (true, false) => BandEdge::Lower,
            (false, true) => BandEdge::Upper,
            (false, false) => BandEdge::Interior,
        }
    }

    fn has_above(self) -> bool {
        matches!(self, BandEdge::Interior | BandEdge::Lower)
    }

    fn has_left(self) -> bool {
        matches!(self, BandEdge::Interior | BandEdge::Upper)
    }
}

/// The columns of a band of half-width `k` over `m+1` columns.
#[derive(Clone, Copy, Debug)]
pub struct Band {
    pub k: usize,
    pub m: usize,
}

impl Band {
    /// First column of row `i`.
    pub fn start(&self, i: usize) -> usize {
        i.saturating_sub(self.k)
    }

    /// Last column of row `i`, clipped by `m`.
    pub fn end(&self, i: usize) -> usize {
        min(self.m, i + self.k)
    }

    /// Number of cells in row `i`. Zero when the row lies right of the matrix.
    pub fn width(&self, i: usize) -> usize {
        (self.end(i) + 1).saturating_sub(self.start(i))
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        j <= self.m && i.abs_diff(j) <= self.k
    }
}

/// Needleman-Wunsch restricted to a diagonal band.
#[derive(Clone, Copy, Debug)]
pub struct BandedNW {
    /// The cost model to use.
    pub cm: LinearCost,
    /// The maximal skew `|i - j|` of any computed cell.
    pub bandwidth: usize,
}

impl BandedNW {
    pub fn new(cm: LinearCost, bandwidth: usize) -> Self {
        Self { cm, bandwidth }
    }

    /// Compute cell `(i, j)`, which must lie inside the band.
    fn next_cell<C: Symbol>(
        &self,
        m: &Matrix<C>,
        a: &[C],
        b: &[C],
        i: usize,
        j: usize,
    ) -> Cell<C> {
        if i == 0 && j == 0 {
            return Cell::origin();
        }
        let k = self.bandwidth;
        let edge = BandEdge::of(i, j, k);
        let ca = i.checked_sub(1).map(|i| a[i]);
        let cb = j.checked_sub(1).map(|j| b[j]);

        let del = (i > 0 && edge.has_above()).then(|| {
            let from = CellRef::new(i - 1, band_local_column(i - 1, j, k));
            Parent {
                cost: m[from].cost + self.cm.indel,
                op: EditOp::Del,
                from,
            }
        });
        let sub = ca.zip(cb).map(|(ca, cb)| {
            let from = CellRef::new(i - 1, band_local_column(i - 1, j - 1, k));
            Parent {
                cost: m[from].cost + self.cm.sub_cost(ca, cb),
                op: EditOp::Sub,
                from,
            }
        });
        let ins = (j > 0 && edge.has_left()).then(|| {
            let from = CellRef::new(i, band_local_column(i, j - 1, k));
            Parent {
                cost: m[from].cost + self.cm.indel,
                op: EditOp::Ins,
                from,
            }
        });

        let parent = best_parent([del, sub, ins]).expect(
            "every banded cell but the origin has its diagonal neighbour, or a straight one on row or column 0",
        );
        Cell::from_parent(parent, ca, cb)
    }
}

impl Aligner for BandedNW {
    fn cost_model(&self) -> &LinearCost {
        &self.cm
    }

    fn build<C: Symbol>(&self, a: &[C], b: &[C]) -> Option<(Matrix<C>, CellRef)> {
        let (n, m) = (a.len(), b.len());
        let k = self.bandwidth;
        if n.abs_diff(m) > k {
            debug!(n, m, k, "lengths differ by more than the bandwidth");
            return None;
        }
        trace!(n, m, k, "filling banded matrix");

        let band = Band { k, m };
        let mut matrix = Matrix::with_capacity(n + 1);
        for i in 0..=n {
            matrix.push_row(band.start(i), band.width(i));
            for j in band.start(i)..=band.end(i) {
                let cell = self.next_cell(&matrix, a, b, i, j);
                matrix.push(cell);
            }
        }
        // Since |n - m| <= k, the last column of the last row is m itself.
        let end = CellRef::new(n, band_local_column(n, band.end(n), k));
        debug_assert_eq!(matrix.column(end), m);
        Some((matrix, end))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::aligners::nw::NW;
    use crate::generate::setup_sequences_with_seed;

    #[test]
    fn local_column_first_rows() {
        // Rows 0..=k start at column 0.
        assert_eq!(band_local_column(0, 0, 3), 0);
        assert_eq!(band_local_column(0, 3, 3), 3);
        assert_eq!(band_local_column(2, 5, 3), 5);
        assert_eq!(band_local_column(3, 0, 3), 0);
    }

    #[test]
    fn local_column_middle_rows() {
        // Row 4 starts at column 1, row 5 at column 2.
        assert_eq!(band_local_column(4, 1, 3), 0);
        assert_eq!(band_local_column(4, 7, 3), 6);
        assert_eq!(band_local_column(5, 2, 3), 0);
        assert_eq!(band_local_column(5, 8, 3), 6);
        // The neighbour above (4, 5) from (5, 5).
        assert_eq!(band_local_column(4, 5, 3), 4);
    }

    #[test]
    fn local_column_zero_band() {
        for i in 0..10 {
            assert_eq!(band_local_column(i, i, 0), 0);
        }
    }

    #[test]
    fn edges() {
        assert_eq!(BandEdge::of(3, 0, 3), BandEdge::Lower);
        assert_eq!(BandEdge::of(2, 5, 3), BandEdge::Upper);
        assert_eq!(BandEdge::of(4, 4, 3), BandEdge::Interior);
        assert_eq!(BandEdge::of(4, 2, 3), BandEdge::Interior);
        assert_eq!(BandEdge::of(4, 4, 0), BandEdge::Both);
    }

    #[test]
    fn row_ranges_clipped_by_m() {
        let band = Band { k: 3, m: 8 };
        let ranges: Vec<_> = (0..=10).map(|i| (band.start(i), band.end(i))).collect();
        assert_eq!(
            ranges,
            [
                (0, 3),
                (0, 4),
                (0, 5),
                (0, 6),
                (1, 7),
                (2, 8),
                (3, 8),
                (4, 8),
                (5, 8),
                (6, 8),
                (7, 8)
            ]
        );
        assert!(band.contains(10, 8));
        assert!(!band.contains(10, 6));
        assert!(!band.contains(0, 4));
        assert!(!band.contains(5, 9));
    }

    #[test]
    fn stored_cells() {
        let nw = BandedNW::new(LinearCost::reference(), 3);
        let (m, end) = nw.build(b"ACGTACGTAC", b"ACGTACGT").unwrap();
        assert_eq!(m.cells(), 56);
        assert_eq!(end, CellRef::new(10, 1));
        assert_eq!(m.column(end), 8);
        for (i, row) in m.rows().iter().enumerate() {
            assert!(row.cells.len() <= 2 * 3 + 1);
            assert_eq!(row.start, i.saturating_sub(3));
        }

        let (m, _) = nw.build(b"polynomial", b"exponential").unwrap();
        assert_eq!(m.cells(), 68);
    }

    #[test]
    fn impossible_when_lengths_differ_too_much() {
        let nw = BandedNW::new(LinearCost::reference(), 3);
        assert!(nw.build(b"ACGTA", b"A").is_none());
        assert!(nw.build(b"", b"ACGT").is_none());
        assert!(nw.build(b"", b"ACG").is_some());
        assert!(BandedNW::new(LinearCost::reference(), 0)
            .build(b"AC", b"A")
            .is_none());
    }

    #[test]
    fn predecessors_are_neighbours() {
        let nw = BandedNW::new(LinearCost::reference(), 2);
        for seed in 0..20 {
            let (a, b) = setup_sequences_with_seed(seed, 30, 0.1);
            let Some((m, _)) = nw.build(&a, &b) else {
                continue;
            };
            for (i, row) in m.rows().iter().enumerate() {
                for (lj, cell) in row.cells.iter().enumerate() {
                    let j = row.start + lj;
                    let Some(p) = cell.parent else {
                        assert_eq!((i, j), (0, 0));
                        continue;
                    };
                    let (pi, pj) = (p.i, m.column(p));
                    let expected = match cell.op {
                        EditOp::Del => (i - 1, j),
                        EditOp::Sub => (i - 1, j - 1),
                        EditOp::Ins => (i, j - 1),
                        EditOp::None => unreachable!(),
                    };
                    assert_eq!((pi, pj), expected, "cell ({i}, {j}) seed {seed}");
                }
            }
        }
    }

    #[test]
    fn every_cell_at_least_unrestricted() {
        let cm = LinearCost::reference();
        for seed in 0..20 {
            let (a, b) = setup_sequences_with_seed(seed, 25, 0.2);
            let (full, _) = NW::new(cm).build(&a, &b).unwrap();
            for k in [1, 3, 5] {
                let Some((band, _)) = BandedNW::new(cm, k).build(&a, &b) else {
                    continue;
                };
                for (i, row) in band.rows().iter().enumerate() {
                    for (lj, cell) in row.cells.iter().enumerate() {
                        let j = row.start + lj;
                        assert!(cell.cost >= full.get(i, j).unwrap().cost);
                    }
                }
            }
        }
    }

    #[test]
    fn wide_band_is_unrestricted() {
        let cm = LinearCost::reference();
        for seed in 0..20 {
            let (a, b) = setup_sequences_with_seed(seed, 20, 0.3);
            let k = a.len().max(b.len());
            let (full, _) = NW::new(cm).build(&a, &b).unwrap();
            let (band, _) = BandedNW::new(cm, k).build(&a, &b).unwrap();
            assert_eq!(band.cells(), full.cells());
            for i in 0..=a.len() {
                for j in 0..=b.len() {
                    assert_eq!(band.get(i, j), full.get(i, j), "seed {seed} ({i}, {j})");
                }
            }
        }
    }
}
