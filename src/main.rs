use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use prime_sieve_bench::bench::{run_for_duration, MonotonicClock};
use prime_sieve_bench::config::{load_config_or_default, save_config, SETTINGS_FILE};
use prime_sieve_bench::engine_types::PrimeResult;
use prime_sieve_bench::output::write_report;
use prime_sieve_bench::verify::HistoricalPrimeCounts;

/// Odd-only sieve of Eratosthenes, run repeatedly for a fixed time window
#[derive(Parser, Debug)]
#[command(name = "prime-sieve-bench")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print every prime found in the last pass
    #[arg(long)]
    show_results: bool,

    /// Count primes below this value (overrides the settings file)
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Seconds to keep running passes (overrides the settings file)
    #[arg(long, value_name = "SECS")]
    duration: Option<f64>,

    /// Settings file; defaults are used when it does not exist
    #[arg(long, value_name = "PATH", default_value = SETTINGS_FILE)]
    config: PathBuf,

    /// Write the effective settings back to the settings file before running
    #[arg(long)]
    save_config: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> PrimeResult<()> {
    let mut cfg = load_config_or_default(&cli.config)?;
    if let Some(limit) = cli.limit {
        cfg.limit = limit;
    }
    if let Some(duration) = cli.duration {
        cfg.duration_secs = duration;
    }
    if cli.show_results {
        cfg.show_results = true;
    }

    if cli.save_config {
        save_config(&cfg, &cli.config)?;
        log::info!("Saved settings to {}", cli.config.display());
    }

    let clock = MonotonicClock::new();
    let run = run_for_duration(cfg.duration_secs, cfg.limit, &clock)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_report(&mut out, &run, cfg.show_results, &HistoricalPrimeCounts)?;
    Ok(())
}
