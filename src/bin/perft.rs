//! The perft command.
//!
//! With an EPD suite present (at `perftsuite.epd` or wherever
//! `--suite` points), every `;D<depth> <nodes>` assertion is checked
//! and the run exits non-zero at the first mismatch. Without one, a
//! depth sweep on the starting position serves as a smoke test and
//! throughput probe.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use quadrille::perft::{perft_timed, LineOutcome};
use quadrille::{parse_suite, perft_divide, run_suite, Position};

#[derive(Parser, Debug)]
#[command(author, version, about = "Perft node counting and EPD suite verification")]
struct Cli {
    /// EPD perft suite to verify; the fallback depth sweep runs when
    /// the file does not exist
    #[arg(long, default_value = "perftsuite.epd")]
    suite: PathBuf,

    /// Depth ceiling for the fallback sweep
    #[arg(long, default_value_t = 6)]
    depth: u32,

    /// Position to sweep or divide, instead of the starting position
    #[arg(long)]
    fen: Option<String>,

    /// Print the per-ply breakdown at this depth and exit
    #[arg(long)]
    divide: Option<u32>,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let position = match &cli.fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("malformed FEN {fen:?}"))?,
        None => Position::startpos(),
    };

    if let Some(depth) = cli.divide {
        for (ply, nodes) in perft_divide(depth, &position) {
            println!("{ply}: {nodes}");
        }
        println!("total {}", quadrille::perft(depth, &position));
        return Ok(ExitCode::SUCCESS);
    }

    if cli.suite.exists() {
        let text = std::fs::read_to_string(&cli.suite)
            .with_context(|| format!("reading {}", cli.suite.display()))?;
        let cases = parse_suite(&text)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("parsing {}", cli.suite.display()))?;

        let report = run_suite(&cases);
        for (fen, outcome) in &report.lines {
            match outcome {
                LineOutcome::Ok { nodes } => println!("OK   {fen} ({nodes} nodes)"),
                LineOutcome::Fail {
                    depth,
                    expected,
                    actual,
                } => println!("FAIL {fen} D{depth}: expected {expected}, counted {actual}"),
            }
        }
        println!(
            "{} nodes in {:.3}s, {:.0} nodes/s",
            report.nodes,
            report.elapsed.as_secs_f64(),
            report.nodes_per_second()
        );
        return Ok(if report.passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    log::info!("no suite at {}, sweeping depths", cli.suite.display());
    for depth in 0..=cli.depth {
        let result = perft_timed(depth, &position);
        println!(
            "perft {depth}: {} nodes in {:.3}s, {:.0} nodes/s",
            result.nodes,
            result.elapsed.as_secs_f64(),
            result.nodes_per_second()
        );
    }
    Ok(ExitCode::SUCCESS)
}
