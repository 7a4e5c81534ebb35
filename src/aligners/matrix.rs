//! The cost matrix shared by the unrestricted and banded builders.
//!
//! Cells live in an arena of rows. Each row stores a contiguous run of columns
//! starting at `Row::start`, so a cell is addressed by its row and its
//! *local* column within that row. For the unrestricted matrix every row
//! starts at column 0; for the banded matrix row `i` starts at `max(0, i-k)`.
//!
//! Each cell stores a link to the single neighbour its cost was derived from.
//! The link is set once when the cell is pushed and never updated, so the
//! backtrace is a plain walk over these links.

use std::ops::Index;

use crate::cost_model::Cost;

/// The recurrence branch that produced a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOp {
    /// The origin `(0, 0)`.
    None,
    /// Consume a character of `b` only.
    Ins,
    /// Consume a character of `a` only.
    Del,
    /// Consume a character of both `a` and `b`. Covers both matches and substitutions.
    Sub,
}

/// Address of a cell: row `i` and the local column within that row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRef {
    pub i: usize,
    pub local_j: usize,
}

impl CellRef {
    pub fn new(i: usize, local_j: usize) -> Self {
        Self { i, local_j }
    }
}

/// One entry of the cost matrix, over symbols of type `C`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell<C> {
    /// Minimal cost of aligning the prefixes ending at this cell.
    pub cost: Cost,
    pub op: EditOp,
    /// `None` only for the origin.
    pub parent: Option<CellRef>,
    /// The character of `a` consumed by `op`, if any.
    pub ca: Option<C>,
    /// The character of `b` consumed by `op`, if any.
    pub cb: Option<C>,
}

impl<C> Cell<C> {
    pub fn origin() -> Self {
        Self {
            cost: 0,
            op: EditOp::None,
            parent: None,
            ca: None,
            cb: None,
        }
    }

    /// Build the cell for the chosen `parent`. `ca` and `cb` are the
    /// characters at this position; only those consumed by the edit are kept.
    pub fn from_parent(parent: Parent, ca: Option<C>, cb: Option<C>) -> Self {
        let (ca, cb) = match parent.op {
            EditOp::None => (None, None),
            EditOp::Ins => (None, cb),
            EditOp::Del => (ca, None),
            EditOp::Sub => (ca, cb),
        };
        Self {
            cost: parent.cost,
            op: parent.op,
            parent: Some(parent.from),
            ca,
            cb,
        }
    }
}

/// A candidate predecessor: the cost it would give, the edit used, and the
/// neighbour it comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parent {
    pub cost: Cost,
    pub op: EditOp,
    pub from: CellRef,
}

/// Pick the candidate of minimal cost.
///
/// Candidates must be given in tie-break order: delete, substitute/match,
/// insert. On equal cost the earliest candidate wins. Missing neighbours are
/// passed as `None`.
pub fn best_parent(candidates: [Option<Parent>; 3]) -> Option<Parent> {
    // `min_by_key` returns the first of several equal minima.
    candidates.into_iter().flatten().min_by_key(|p| p.cost)
}

#[derive(Clone, Debug)]
pub struct Row<C> {
    /// Absolute column of the first stored cell.
    pub start: usize,
    pub cells: Vec<Cell<C>>,
}

impl<C> Row<C> {
    /// Absolute column of the last stored cell, or `None` for an empty row.
    pub fn end(&self) -> Option<usize> {
        (!self.cells.is_empty()).then(|| self.start + self.cells.len() - 1)
    }
}

/// Row-major arena of cells.
#[derive(Clone, Debug)]
pub struct Matrix<C> {
    rows: Vec<Row<C>>,
}

impl<C> Matrix<C> {
    pub fn with_capacity(rows: usize) -> Self {
        Self {
            rows: Vec::with_capacity(rows),
        }
    }

    /// Start a new row whose first cell is at absolute column `start`.
    pub fn push_row(&mut self, start: usize, width: usize) {
        self.rows.push(Row {
            start,
            cells: Vec::with_capacity(width),
        });
    }

    /// Append a cell to the last row and return its address.
    ///
    /// Panics when no row was started.
    pub fn push(&mut self, cell: Cell<C>) -> CellRef {
        let i = self.rows.len() - 1;
        let row = &mut self.rows[i];
        row.cells.push(cell);
        CellRef::new(i, row.cells.len() - 1)
    }

    pub fn rows(&self) -> &[Row<C>] {
        &self.rows
    }

    /// Total number of stored cells.
    pub fn cells(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }

    /// The cell at row `i` and absolute column `j`, if it is stored.
    pub fn get(&self, i: usize, j: usize) -> Option<&Cell<C>> {
        let row = self.rows.get(i)?;
        row.cells.get(j.checked_sub(row.start)?)
    }

    /// Absolute column of a cell.
    pub fn column(&self, r: CellRef) -> usize {
        self.rows[r.i].start + r.local_j
    }

    /// The address of the last cell of the last row.
    pub fn terminal(&self) -> Option<CellRef> {
        let i = self.rows.len().checked_sub(1)?;
        let local_j = self.rows[i].cells.len().checked_sub(1)?;
        Some(CellRef::new(i, local_j))
    }
}

impl<C> Index<CellRef> for Matrix<C> {
    type Output = Cell<C>;

    fn index(&self, r: CellRef) -> &Cell<C> {
        &self.rows[r.i].cells[r.local_j]
    }
}
