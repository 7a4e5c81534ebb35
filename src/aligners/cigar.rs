use std::fmt::{self, Display, Write};

use serde::{Serialize, Serializer};

use super::Symbol;
use crate::cost_model::{Cost, LinearCost};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CigarOp {
    Match,
    Sub,
    Ins,
    Del,
}

impl CigarOp {
    fn get_char(&self) -> char {
        match self {
            CigarOp::Match => 'M',
            CigarOp::Sub => 'X',
            CigarOp::Ins => 'I',
            CigarOp::Del => 'D',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CigarElem {
    pub op: CigarOp,
    pub cnt: usize,
}

/// Run-length encoded list of edits, from the start of the alignment to the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cigar {
    pub ops: Vec<CigarElem>,
}

impl Cigar {
    pub fn push(&mut self, op: CigarOp) {
        if let Some(s) = self.ops.last_mut() {
            if s.op == op {
                s.cnt += 1;
                return;
            }
        }
        self.ops.push(CigarElem { op, cnt: 1 });
    }

    /// Reverse the cigar string.
    pub fn reverse(&mut self) {
        self.ops.reverse()
    }

    /// Total number of alignment columns.
    pub fn len(&self) -> usize {
        self.ops.iter().map(|e| e.cnt).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The cost of this alignment under the given cost model.
    pub fn cost(&self, cm: &LinearCost) -> Cost {
        self.ops
            .iter()
            .map(|e| match e.op {
                CigarOp::Match => e.cnt as Cost * cm.match_cost,
                CigarOp::Sub => e.cnt as Cost * cm.sub,
                CigarOp::Ins | CigarOp::Del => cm.gap_cost(e.cnt),
            })
            .sum()
    }

    /// Check that the cigar is a valid alignment of `a` and `b`, and return its cost.
    ///
    /// Panics when matches/substitutions do not agree with the sequences or
    /// when the cigar does not consume both sequences completely.
    pub fn verify<C: Symbol>(&self, cm: &LinearCost, a: &[C], b: &[C]) -> Cost {
        let (mut i, mut j) = (0, 0);
        for &CigarElem { op, cnt } in &self.ops {
            for _ in 0..cnt {
                match op {
                    CigarOp::Match => {
                        assert_eq!(a[i], b[j], "Match at ({i}, {j}) of different characters");
                        i += 1;
                        j += 1;
                    }
                    CigarOp::Sub => {
                        assert_ne!(a[i], b[j], "Substitution at ({i}, {j}) of equal characters");
                        i += 1;
                        j += 1;
                    }
                    CigarOp::Ins => j += 1,
                    CigarOp::Del => i += 1,
                }
            }
        }
        assert_eq!((i, j), (a.len(), b.len()), "Cigar does not end at the target");
        self.cost(cm)
    }
}

impl Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.ops {
            write!(f, "{}", e.cnt)?;
            f.write_char(e.op.get_char())?;
        }
        Ok(())
    }
}

impl Serialize for Cigar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
