//! Parameters for a single alignment call.
//!
//! Everything that used to be a global constant (scoring, bandwidth, the
//! length cap) is carried explicitly, so that calls with different settings
//! can run side by side.
use instant::Instant;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aligners::{band::BandedNW, clamp, nw::NW, trace::trace, Aligner, Symbol};
use crate::cost_model::{cost_to_string, LinearCost, MAX_COST};
use crate::error::{Error, Result};
use crate::stats::AlignStats;
use crate::AlignResult;

/// Default maximal skew of the banded aligner.
pub const DEFAULT_BANDWIDTH: usize = 3;

/// Default number of alignment columns returned to the caller.
pub const DISPLAY_LEN: usize = 100;

/// Which part of the matrix to compute.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The full `(n+1) x (m+1)` matrix.
    #[default]
    Unrestricted,
    /// Only cells with `|i - j| <= bandwidth`.
    Banded { bandwidth: usize },
}

impl Mode {
    pub fn banded() -> Self {
        Mode::Banded {
            bandwidth: DEFAULT_BANDWIDTH,
        }
    }
}

fn default_display_len() -> usize {
    DISPLAY_LEN
}

/// Parameters for aligning one pair of sequences.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AlignParams {
    /// The cost model.
    #[serde(default)]
    pub cm: LinearCost,

    /// Unrestricted or banded.
    #[serde(default)]
    pub mode: Mode,

    /// Only the first `max_len` characters of each sequence are aligned.
    #[serde(default)]
    pub max_len: Option<usize>,

    /// The returned alignment strings are cut to this many characters.
    /// The cost is always that of the full alignment.
    #[serde(default = "default_display_len")]
    pub display_len: usize,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            cm: LinearCost::reference(),
            mode: Mode::Unrestricted,
            max_len: None,
            display_len: DISPLAY_LEN,
        }
    }
}

impl AlignParams {
    pub fn unrestricted(max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
            ..Default::default()
        }
    }

    pub fn banded(max_len: usize, bandwidth: usize) -> Self {
        Self {
            mode: Mode::Banded { bandwidth },
            max_len: Some(max_len),
            ..Default::default()
        }
    }

    /// Parse and validate parameters from JSON. Missing fields take their default.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        let LinearCost {
            match_cost,
            sub,
            indel,
        } = self.cm;
        for (name, c) in [("match", match_cost), ("sub", sub), ("indel", indel)] {
            if c.unsigned_abs() > MAX_COST.unsigned_abs() {
                return Err(Error::InvalidParams(format!(
                    "{name} cost {c} exceeds the maximum magnitude {MAX_COST}"
                )));
            }
        }
        if indel < 0 {
            return Err(Error::InvalidParams(format!(
                "indel cost must be non-negative, got {indel}"
            )));
        }
        if match_cost > sub {
            return Err(Error::InvalidParams(format!(
                "match cost {match_cost} exceeds substitution cost {sub}"
            )));
        }
        Ok(())
    }

    /// Align two strings character by character.
    ///
    /// Both strings are clamped to `max_len` characters, and the alignment is
    /// cut to `display_len` characters for display.
    pub fn align(&self, a: &str, b: &str) -> AlignResult {
        let a = a.chars().collect_vec();
        let b = b.chars().collect_vec();
        self.align_seqs(&a, &b)
    }

    /// Like `align`, for sequences of arbitrary symbols, e.g. bytes.
    pub fn align_seqs<C: Symbol>(&self, a: &[C], b: &[C]) -> AlignResult {
        match self.mode {
            Mode::Unrestricted => self.run(&NW::new(self.cm), a, b),
            Mode::Banded { bandwidth } => self.run(&BandedNW::new(self.cm, bandwidth), a, b),
        }
    }

    fn run<C: Symbol>(&self, aligner: &impl Aligner, a: &[C], b: &[C]) -> AlignResult {
        let (a, b) = (clamp(a, self.max_len), clamp(b, self.max_len));
        let mut stats = AlignStats::init(a, b);

        let start = Instant::now();
        let built = aligner.build(a, b);
        stats.timing.build = start.elapsed().as_secs_f64();

        let result = match built {
            None => {
                stats.impossible = 1;
                stats.timing.total = stats.timing.build;
                AlignResult::impossible(stats)
            }
            Some((matrix, end)) => {
                let start = Instant::now();
                let alignment = trace(&matrix, end);
                // The predecessor links are no longer needed.
                drop(matrix);
                stats.timing.trace = start.elapsed().as_secs_f64();
                stats.timing.total = stats.timing.build + stats.timing.trace;
                stats.cells = alignment.cells;
                AlignResult::new(&alignment, self.display_len, stats)
            }
        };
        debug!(
            len_a = a.len(),
            len_b = b.len(),
            cost = %cost_to_string(result.cost),
            cells = stats.cells,
            "aligned pair"
        );
        result
    }
}
