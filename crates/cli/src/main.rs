//! `uartverif` - randomized UART framing verification against the behavioural model.
//!
//! ```text
//! USAGE:
//!   uartverif run [--config FILE] [--iterations N] [--seed S] [--coverage FILE] [--verbose]
//!   uartverif show-config [--config FILE]
//! ```
//!
//! `run` programs the baud divisor, then repeats configure / transmit / receive cycles with
//! random framing and data, prints the tally and the coverage table, and exits non-zero on
//! any mismatch.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use uartverif_core::Config;
use uartverif_core::coverage::{CoverageSink, JsonFileSink};
use uartverif_core::sim::{self, Clock, Stimulus};

#[derive(Parser, Debug)]
#[command(
    name = "uartverif",
    author,
    version,
    about = "UART register access and framing verification harness"
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Run randomized transmit and receive cycles against the simulated UART.
    Run {
        /// JSON configuration file; built-in defaults otherwise.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of cycles (overrides `run.iterations`).
        #[arg(short = 'n', long)]
        iterations: Option<u32>,

        /// Stimulus seed (overrides `run.seed`).
        #[arg(short, long)]
        seed: Option<u64>,

        /// Coverage report output (overrides `run.coverage_path`).
        #[arg(long)]
        coverage: Option<PathBuf>,

        /// Log every register access (same as `RUST_LOG=debug`).
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the effective configuration as JSON.
    ShowConfig {
        /// JSON configuration file; built-in defaults otherwise.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Cmd::Run { verbose: true, .. });
    tracing_subscriber::fmt()
        .with_env_filter(if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
        })
        .init();

    match cli.command {
        Cmd::Run {
            config,
            iterations,
            seed,
            coverage,
            verbose: _,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(n) = iterations {
                config.run.iterations = n;
            }
            if let Some(s) = seed {
                config.run.seed = s;
            }
            if coverage.is_some() {
                config.run.coverage_path = coverage;
            }
            if !cmd_run(&config)? {
                process::exit(1);
            }
        }
        Cmd::ShowConfig { config } => cmd_show_config(config.as_deref())?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => {
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Runs the randomized session; returns whether every check passed.
fn cmd_run(config: &Config) -> Result<bool> {
    let (mut bench, uart) = sim::simulated(config)?;

    println!(
        "UART at {:#x}, {}-byte bus, {:?} control layout",
        config.uart.base,
        config.bus.width.bytes(),
        config.uart.control_layout
    );
    println!(
        "  clock {} Hz  divisor {}  seed {:#x}  iterations {}",
        config.uart.clock_hz, config.uart.divisor, config.run.seed, config.run.iterations
    );

    bench.initialize()?;
    let baud = bench.program_baud(config.uart.divisor)?;
    info!("Line rate {baud} baud");

    let mut stimulus = Stimulus::new(config.run.seed);
    let summary = bench.run_random(&mut stimulus, config.run.iterations)?;

    println!();
    println!("[*] {summary}");
    let (transfers, cycles) = uart.with(|u| (u.transfers(), u.cycles()));
    println!(
        "    bus transfers {transfers}  device cycles {cycles}  testbench cycles {}",
        bench.clock().now()
    );

    let report = bench.coverage().report();
    report.print();
    if let Some(path) = &config.run.coverage_path {
        JsonFileSink::new(path)
            .persist(&report)
            .with_context(|| format!("writing coverage report to {}", path.display()))?;
    }

    if summary.passed() {
        println!("\n[*] PASS");
    } else {
        println!("\n[!] FAIL");
    }
    Ok(summary.passed())
}

fn cmd_show_config(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
