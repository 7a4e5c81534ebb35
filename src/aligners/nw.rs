//! Unrestricted Needleman-Wunsch: fills the full `(n+1) x (m+1)` matrix.
//!
//! O(nm) time and memory.
use tracing::trace;

use super::matrix::{best_parent, Cell, CellRef, EditOp, Matrix, Parent};
use super::{Aligner, Symbol};
use crate::cost_model::LinearCost;

/// Needleman-Wunsch aligner computing every cell of the matrix.
#[derive(Clone, Copy, Debug, Default)]
pub struct NW {
    /// The cost model to use.
    pub cm: LinearCost,
}

impl NW {
    pub fn new(cm: LinearCost) -> Self {
        Self { cm }
    }

    /// Compute cell `(i, j)` from the already filled rows.
    /// Every row starts at column 0, so the local column equals `j`.
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
        let ca = i.checked_sub(1).map(|i| a[i]);
        let cb = j.checked_sub(1).map(|j| b[j]);

        let del = (i > 0).then(|| {
            let from = CellRef::new(i - 1, j);
            Parent {
                cost: m[from].cost + self.cm.indel,
                op: EditOp::Del,
                from,
            }
        });
        let sub = ca.zip(cb).map(|(ca, cb)| {
            let from = CellRef::new(i - 1, j - 1);
            Parent {
                cost: m[from].cost + self.cm.sub_cost(ca, cb),
                op: EditOp::Sub,
                from,
            }
        });
        let ins = (j > 0).then(|| {
            let from = CellRef::new(i, j - 1);
            Parent {
                cost: m[from].cost + self.cm.indel,
                op: EditOp::Ins,
                from,
            }
        });

        let parent = best_parent([del, sub, ins])
            .expect("every cell but the origin has a neighbour above, left, or diagonal");
        Cell::from_parent(parent, ca, cb)
    }
}

impl Aligner for NW {
    fn cost_model(&self) -> &LinearCost {
        &self.cm
    }

    fn build<C: Symbol>(&self, a: &[C], b: &[C]) -> Option<(Matrix<C>, CellRef)> {
        let (n, m) = (a.len(), b.len());
        trace!(n, m, "filling full matrix");
        let mut matrix = Matrix::with_capacity(n + 1);
        let mut end = CellRef::new(0, 0);
        for i in 0..=n {
            matrix.push_row(0, m + 1);
            for j in 0..=m {
                let cell = self.next_cell(&matrix, a, b, i, j);
                end = matrix.push(cell);
            }
        }
        Some((matrix, end))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cost_model::Cost;

    fn cost(a: &str, b: &str) -> Cost {
        NW::new(LinearCost::reference()).cost(a.as_bytes(), b.as_bytes())
    }

    #[test]
    fn boundary_row_and_column_are_pure_indels() {
        let nw = NW::new(LinearCost::reference());
        let (m, _) = nw.build(b"ACG", b"TT").unwrap();
        assert_eq!(m.cells(), 4 * 3);
        for j in 0..=2 {
            let c = m.get(0, j).unwrap();
            assert_eq!(c.cost, 5 * j as Cost);
            if j > 0 {
                assert_eq!(c.op, EditOp::Ins);
            }
        }
        for i in 1..=3 {
            let c = m.get(i, 0).unwrap();
            assert_eq!(c.cost, 5 * i as Cost);
            assert_eq!(c.op, EditOp::Del);
        }
    }

    #[test]
    fn small_costs() {
        assert_eq!(cost("", ""), 0);
        assert_eq!(cost("A", "A"), -3);
        assert_eq!(cost("A", "C"), 1);
        assert_eq!(cost("A", ""), 5);
        assert_eq!(cost("GATTACA", "GCATGCU"), -5);
        assert_eq!(cost("ACTGACCAGT", "CCGACAGGA"), -6);
        assert_eq!(cost("AGTTTTAT", "ACCGATTTTTA"), -1);
    }

    #[test]
    fn delete_wins_ties() {
        // Cell (2, 1) of "AA" vs "A": delete from (1,1) gives -3+5=2, sub from (1,0) gives 5-3=2.
        let nw = NW::new(LinearCost::reference());
        let (m, _) = nw.build(b"AA", b"A").unwrap();
        let c = m.get(2, 1).unwrap();
        assert_eq!(c.cost, 2);
        assert_eq!(c.op, EditOp::Del);
        assert_eq!(c.parent, Some(CellRef::new(1, 1)));
    }
}
