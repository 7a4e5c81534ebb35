//!
//! # Banded pairwise aligner
//!
//! Global pairwise alignment of two sequences under the Needleman-Wunsch
//! recurrence with linear costs, in two modes:
//! - unrestricted: the full `(n+1) x (m+1)` matrix, O(nm);
//! - banded: only cells with `|i - j| <= k`, O(kn). Only alignments with at
//!   most `k` skew between the sequences are found, and sequences whose
//!   lengths differ by more than `k` can not be aligned at all.
//!
//! It can be used in a few ways:
//! - Call `align_unrestricted` or `align_banded` with the reference costs.
//! - Build an `AlignParams` with a custom cost model and call `align`.
//! - Use an `Aligner` (`NW` or `BandedNW`) directly to get the full matrix.
//!
//! Every call allocates its own matrix, so independent pairs can be aligned
//! in parallel.

pub mod aligners;
pub mod cost_model;
pub mod error;
pub mod generate;
pub mod params;
pub mod stats;

#[cfg(feature = "cli")]
pub mod cli;

pub mod prelude {
    pub use crate::aligners::{
        band::BandedNW, cigar::Cigar, clamp, nw::NW, seq_to_string, trace::Alignment, Aligner,
        Seq, Sequence, Symbol,
    };
    pub use crate::cost_model::{Cost, LinearCost, INF, MAX_COST};
    pub use crate::params::{AlignParams, Mode, DEFAULT_BANDWIDTH, DISPLAY_LEN};
    pub use crate::{align_banded, align_unrestricted, AlignResult};
}

use serde::Serialize;

use aligners::{cigar::Cigar, trace::Alignment};
use cost_model::{cost_to_string, Cost, INF};
use params::AlignParams;
use stats::AlignStats;

/// Placeholder returned in both alignment strings when no banded alignment exists.
pub const NO_ALIGNMENT: &str = "No Alignment Possible";

/// The outcome of aligning one pair.
#[derive(Serialize, Debug, Clone)]
pub struct AlignResult {
    /// The alignment cost, or `INF` when no alignment is possible.
    #[serde(serialize_with = "serialize_cost")]
    pub cost: Cost,
    /// The first characters of the aligned `a`, with `-` for gaps.
    pub align_a: String,
    /// The first characters of the aligned `b`, with `-` for gaps.
    pub align_b: String,
    /// The edits of the complete alignment.
    pub cigar: Option<Cigar>,
    pub stats: AlignStats,
}

fn serialize_cost<S: serde::Serializer>(cost: &Cost, s: S) -> Result<S::Ok, S::Error> {
    if *cost == INF {
        s.serialize_str("inf")
    } else {
        s.serialize_i64(*cost)
    }
}

impl AlignResult {
    /// Cut the aligned strings of `alignment` to `display_len` characters.
    pub fn new(alignment: &Alignment, display_len: usize, stats: AlignStats) -> Self {
        let (align_a, align_b) = alignment.truncated(display_len);
        Self {
            cost: alignment.cost,
            align_a,
            align_b,
            cigar: Some(alignment.cigar.clone()),
            stats,
        }
    }

    pub fn impossible(stats: AlignStats) -> Self {
        Self {
            cost: INF,
            align_a: NO_ALIGNMENT.into(),
            align_b: NO_ALIGNMENT.into(),
            cigar: None,
            stats,
        }
    }

    /// False for the `INF` sentinel, in which case the strings are placeholders.
    pub fn is_possible(&self) -> bool {
        self.cost != INF
    }

    pub fn print(&self) {
        println!("cost {}", cost_to_string(self.cost));
        println!("{}", self.align_a);
        println!("{}", self.align_b);
    }
}

/// Align the first `max_len` characters of `a` and `b` using the full matrix
/// and the reference costs.
pub fn align_unrestricted(a: &str, b: &str, max_len: usize) -> AlignResult {
    AlignParams::unrestricted(max_len).align(a, b)
}

/// Align the first `max_len` characters of `a` and `b`, only considering
/// alignments that stay within `bandwidth` of the main diagonal.
pub fn align_banded(a: &str, b: &str, max_len: usize, bandwidth: usize) -> AlignResult {
    AlignParams::banded(max_len, bandwidth).align(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impossible_result() {
        let r = align_banded("ACGTACGT", "ACG", 100, 3);
        assert!(!r.is_possible());
        assert_eq!(r.cost, INF);
        assert_eq!(r.align_a, NO_ALIGNMENT);
        assert_eq!(r.align_b, NO_ALIGNMENT);
        assert!(r.cigar.is_none());
    }

    #[test]
    fn json_output() {
        let r = align_unrestricted("AC", "AC", 100);
        let v: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(v["cost"], -6);
        assert_eq!(v["align_a"], "AC");
        assert_eq!(v["cigar"], "2M");

        let r = align_banded("ACGTACGT", "A", 100, 3);
        let v: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(v["cost"], "inf");
        assert!(v["cigar"].is_null());
    }

    #[test]
    fn clamps_before_aligning() {
        // Only "ACGT" vs "ACGT" is aligned.
        let r = align_unrestricted("ACGTTTTTTT", "ACGTAAAAAAAA", 4);
        assert_eq!(r.cost, -12);
        assert_eq!(r.align_a, "ACGT");
        // After clamping the lengths no longer differ.
        let r = align_banded("ACGTTTTTTT", "ACGT", 4, 0);
        assert_eq!(r.cost, -12);
    }

    #[test]
    fn non_ascii_input() {
        let r = align_unrestricted("héllo", "hello", 100);
        assert_eq!(r.cost, -11);
        assert_eq!(r.align_a, "héllo");
        assert_eq!(r.align_b, "hello");

        // Lengths are compared in characters, not bytes.
        let r = align_banded("ééééé", "eeeee", 100, 3);
        assert_eq!(r.cost, 5);
        assert_eq!(r.align_a.chars().count(), r.align_b.chars().count());
        let r = align_banded("naïve café", "naive cafe", 100, 0);
        assert_eq!(r.cost, -22);
    }
}
