use anyhow::Context;
use banded_pairwise_aligner::{cli::Cli, stats::AlignStats};
use clap::Parser;
use std::ops::ControlFlow;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .init();

    let params = args
        .align
        .to_params()
        .context("invalid alignment parameters")?;
    tracing::debug!(?params, "starting");

    let mut avg_result = AlignStats::default();
    let mut error = None;

    // Process the input.
    args.process_input_pairs(|a: &str, b: &str| {
        let r = params.align(a, b);

        if args.json {
            match serde_json::to_string(&r) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    error = Some(e);
                    return ControlFlow::Break(());
                }
            }
        } else if args.silent <= 1 {
            print!("\r");
            if args.silent == 0 {
                r.print();
            }
        }
        avg_result += r.stats;
        if !args.json && args.silent <= 1 {
            avg_result.print_no_newline();
        }
        ControlFlow::Continue(())
    });

    if let Some(e) = error {
        return Err(e).context("could not serialize result");
    }

    if avg_result.sample_size > 0 && !args.json {
        print!("\r");
        avg_result.print_header();
        avg_result.print();
    }
    Ok(())
}
