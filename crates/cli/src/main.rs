//! Cache trace replay CLI.
//!
//! This binary is the single entry point for the simulator. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON config file,
//!    and explicit geometry flags (flags win).
//! 2. **Replay:** Drives the trace through the cache model sequentially.
//! 3. **Reporting:** The one-line summary, an optional per-record echo
//!    (`--verbose`), and an optional full statistics report (`--stats`).

use clap::Parser;
use std::path::PathBuf;
use std::{fs, process};
use tracing_subscriber::EnvFilter;

use cachetrace_core::config::{Config, MalformedLinePolicy};
use cachetrace_core::sim;

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a valgrind-style memory access trace against a configurable cache \
geometry and report hit, miss, and eviction counts under true-LRU replacement.\n\n\
Examples:\n  \
csim -s 4 -E 2 -b 4 -t traces/yi.trace\n  \
csim -s 0 -E 1 -b 0 -t trace.txt --verbose\n  \
csim --config cache.json -t trace.txt --stats"
)]
struct Cli {
    /// Set-index bit width; the number of sets is 2^s.
    #[arg(short = 's', value_name = "BITS")]
    set_bits: Option<u32>,

    /// Associativity (lines per set).
    #[arg(short = 'E', value_name = "WAYS")]
    ways: Option<usize>,

    /// Block-offset bit width.
    #[arg(short = 'b', value_name = "BITS")]
    block_bits: Option<u32>,

    /// Trace file to replay.
    #[arg(short = 't', long = "trace", value_name = "FILE")]
    trace: PathBuf,

    /// Echo each record with its outcome(s).
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Fail on the first malformed trace line instead of skipping it.
    #[arg(long)]
    strict: bool,

    /// JSON configuration file; explicit flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the full statistics report after the summary line.
    #[arg(long)]
    stats: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli);
    let verbose = cli.verbose;

    let result = sim::run(&config, &cli.trace, |record, outcomes| {
        if verbose {
            let outcomes: Vec<String> = outcomes.iter().map(|o| o.to_string()).collect();
            println!("{} {}", record, outcomes.join(" "));
        }
    });

    match result {
        Ok(stats) => {
            println!("{}", stats.summary_line());
            if cli.stats {
                stats.print();
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Assembles the run configuration: config file first, then flag overrides.
///
/// Exits with a diagnostic and status 1 when the config file cannot be read
/// or parsed; geometry validation itself happens inside the run.
fn build_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config {}: {}", path.display(), e);
                process::exit(1);
            });
            Config::from_json_str(&text).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                process::exit(1);
            })
        }
        None => Config::default(),
    };

    if let Some(set_bits) = cli.set_bits {
        config.cache.set_bits = set_bits;
    }
    if let Some(ways) = cli.ways {
        config.cache.ways = ways;
    }
    if let Some(block_bits) = cli.block_bits {
        config.cache.block_bits = block_bits;
    }
    if cli.strict {
        config.trace.malformed_lines = MalformedLinePolicy::Strict;
    }

    config
}
