//! This module contains the `LinearCost` cost model.
//!
//! Costs are minimized. A match has a (usually negative) cost of its own, so
//! that aligning equal characters is rewarded rather than merely free.

use serde::{Deserialize, Serialize};

/// Type for storing costs. Signed, since matches may have negative cost.
pub type Cost = i64;

/// Largest magnitude allowed for a single match, substitution, or indel cost.
/// Alignment costs are bounded by `(n + m) * MAX_COST`, which stays far below
/// `INF` for any matrix that fits in memory.
pub const MAX_COST: Cost = 1 << 24;

/// Sentinel cost of an alignment that can not be computed, e.g. a banded
/// alignment between sequences whose lengths differ by more than the band.
pub const INF: Cost = Cost::MAX;

/// Formats a cost, printing `inf` for the `INF` sentinel.
pub fn cost_to_string(cost: Cost) -> String {
    if cost == INF {
        "inf".into()
    } else {
        cost.to_string()
    }
}

/// Linear (non-affine) costs for matches, substitutions, and indels.
/// Insertions and deletions share the same cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearCost {
    /// Cost of aligning two equal characters.
    #[serde(rename = "match")]
    pub match_cost: Cost,
    /// Cost of aligning two different characters.
    pub sub: Cost,
    /// Cost of a single inserted or deleted character.
    pub indel: Cost,
}

impl LinearCost {
    pub fn new(match_cost: Cost, sub: Cost, indel: Cost) -> Self {
        Self {
            match_cost,
            sub,
            indel,
        }
    }

    /// match=-3, sub=1, indel=5.
    pub fn reference() -> Self {
        Self::new(-3, 1, 5)
    }

    /// Edit distance: match=0, sub=1, indel=1.
    pub fn unit() -> Self {
        Self::new(0, 1, 1)
    }

    /// The cost of aligning `ca` against `cb`.
    #[inline]
    pub fn sub_cost<C: PartialEq>(&self, ca: C, cb: C) -> Cost {
        if ca == cb {
            self.match_cost
        } else {
            self.sub
        }
    }

    /// The cost of `len` consecutive indels.
    #[inline]
    pub fn gap_cost(&self, len: usize) -> Cost {
        len as Cost * self.indel
    }
}

impl Default for LinearCost {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reference_constants() {
        let cm = LinearCost::reference();
        assert_eq!(cm.sub_cost(b'A', b'A'), -3);
        assert_eq!(cm.sub_cost(b'A', b'C'), 1);
        assert_eq!(cm.gap_cost(4), 20);
        assert_eq!(cm, LinearCost::default());
    }

    #[test]
    fn unicode_symbols() {
        let cm = LinearCost::reference();
        assert_eq!(cm.sub_cost('é', 'é'), -3);
        assert_eq!(cm.sub_cost('é', 'e'), 1);
    }

    #[test]
    fn inf_formatting() {
        assert_eq!(cost_to_string(INF), "inf");
        assert_eq!(cost_to_string(-7), "-7");
    }

    #[test]
    fn serde_uses_match_key() {
        let json = serde_json::to_string(&LinearCost::reference()).unwrap();
        assert_eq!(json, r#"{"match":-3,"sub":1,"indel":5}"#);
        let cm: LinearCost = serde_json::from_str(r#"{"match":0,"sub":1,"indel":1}"#).unwrap();
        assert_eq!(cm, LinearCost::unit());
    }
}
