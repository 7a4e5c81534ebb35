use crate::{
    aligners::seq_to_string,
    cost_model::{Cost, LinearCost},
    error::Result,
    generate::{generate_pair, GenerateArgs},
    params::{AlignParams, Mode, DEFAULT_BANDWIDTH},
};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use tracing::info;

#[derive(Parser, Serialize, Deserialize, Debug)]
#[clap(author, about)]
pub struct Cli {
    /// The first sequence. When no sequences are given, random pairs are generated.
    #[clap(requires = "b")]
    pub a: Option<String>,

    /// The second sequence.
    pub b: Option<String>,

    /// Options to generate an input pair.
    #[clap(flatten)]
    pub generate: GenerateArgs,

    #[clap(flatten)]
    pub align: AlignArgs,

    /// Print each result as a line of JSON.
    #[clap(long)]
    pub json: bool,

    /// Print less. Pass twice for summary line only.
    ///
    /// Do not print a new line per alignment, but instead overwrite the previous one.
    /// Pass twice to only print a summary line.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub silent: u8,

    /// Log debug information to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Serialize, Deserialize, Debug, Default)]
#[clap(next_help_heading = "Alignment")]
pub struct AlignArgs {
    /// Only compute cells within the band `|i-j| <= bandwidth`.
    #[clap(long)]
    pub banded: bool,

    /// Bandwidth of the banded aligner. Implies --banded.
    #[clap(short = 'k', long, value_name = "K")]
    pub bandwidth: Option<usize>,

    /// Only align the first N characters of each sequence.
    #[clap(long, value_name = "N")]
    pub max_len: Option<usize>,

    /// Cut the printed alignment to N characters.
    #[clap(long, value_name = "N")]
    pub display_len: Option<usize>,

    /// Cost of a match.
    #[clap(long = "match", value_name = "COST", allow_hyphen_values = true)]
    pub match_cost: Option<Cost>,

    /// Cost of a substitution.
    #[clap(long, value_name = "COST", allow_hyphen_values = true)]
    pub sub: Option<Cost>,

    /// Cost of an insertion or deletion.
    #[clap(long, value_name = "COST", allow_hyphen_values = true)]
    pub indel: Option<Cost>,

    /// Alignment parameters as JSON. Flags given on the command line take precedence.
    #[clap(long, value_name = "JSON", hide_short_help = true)]
    pub params: Option<String>,
}

impl AlignArgs {
    /// Combine `--params` with the individual flags and validate the result.
    pub fn to_params(&self) -> Result<AlignParams> {
        let mut params = match &self.params {
            Some(json) => AlignParams::from_json(json)?,
            None => AlignParams::default(),
        };
        if let Some(bandwidth) = self.bandwidth {
            params.mode = Mode::Banded { bandwidth };
        } else if self.banded && params.mode == Mode::Unrestricted {
            params.mode = Mode::Banded {
                bandwidth: DEFAULT_BANDWIDTH,
            };
        }
        if self.max_len.is_some() {
            params.max_len = self.max_len;
        }
        if let Some(display_len) = self.display_len {
            params.display_len = display_len;
        }
        let LinearCost {
            match_cost,
            sub,
            indel,
        } = params.cm;
        params.cm = LinearCost::new(
            self.match_cost.unwrap_or(match_cost),
            self.sub.unwrap_or(sub),
            self.indel.unwrap_or(indel),
        );
        params.validate()?;
        Ok(params)
    }
}

impl Cli {
    /// Call the given function for each pair in the input.
    pub fn process_input_pairs(&self, mut run_pair: impl FnMut(&str, &str) -> ControlFlow<()>) {
        if let (Some(a), Some(b)) = (&self.a, &self.b) {
            let _ = run_pair(a, b);
            return;
        }

        // Generate random input.
        let seed = self.generate.seed.unwrap_or_else(|| {
            let seed = ChaCha8Rng::from_entropy().gen_range(0..u64::MAX);
            info!(seed, "generating random input");
            seed
        });
        let ref mut rng = ChaCha8Rng::seed_from_u64(seed);
        let options = self.generate.to_generate_options();
        for _ in 0..self.generate.cnt {
            let (a, b) = generate_pair(&options, rng);
            if let ControlFlow::Break(()) = run_pair(&seq_to_string(&a), &seq_to_string(&b)) {
                break;
            }
        }
    }
}
