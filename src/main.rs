//! Rust Operators Engine CLI
//!
//! Command-line interface for processing multi-operator financial
//! transactions from CSV request files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- requests.csv > results.csv
//! cargo run -- --strategy sync requests.csv > results.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 requests.csv > results.csv
//! ```
//!
//! The program reads transaction requests from the input CSV file,
//! assembles and executes them through the engine using the selected
//! processing strategy, and writes the executed transactions to stdout.
//!
//! # Processing Strategies
//!
//! - **sync**: in-order, single-threaded processing (default)
//! - **async**: batched concurrent processing; output order may differ
//!   from input order (match rows by reference)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use rust_operators_engine::cli;
use rust_operators_engine::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; the result CSV owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
