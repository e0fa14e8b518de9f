//! Benchmark suite for fee schedules and processing strategies
//!
//! Compares the cost of raw fee computation, single transaction
//! execution, and the two end-to-end processing strategies using the
//! divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use rust_decimal_macros::dec;
use rust_operators_engine::cli::StrategyType;
use rust_operators_engine::core::{
    presets, CapabilityResolver, TransactionEngine, TransactionHistory,
};
use rust_operators_engine::operators::builtin_bundle;
use rust_operators_engine::strategy::{create_strategy, BatchConfig};
use rust_operators_engine::types::{OperatorType, TransactionType};
use std::io::Write;
use std::sync::Arc;

fn main() {
    divan::main();
}

/// Raw fee-table lookup across all operators and variants
#[divan::bench]
fn fee_schedule_sweep() -> rust_decimal::Decimal {
    let bundles: Vec<_> = OperatorType::ALL.into_iter().map(builtin_bundle).collect();
    let variants = [
        TransactionType::TransferInternal,
        TransactionType::TransferInterOperator,
        TransactionType::TransferInternational,
        TransactionType::Deposit,
        TransactionType::Withdrawal,
        TransactionType::Payment,
        TransactionType::BillPayment,
    ];

    let mut total = rust_decimal::Decimal::ZERO;
    for bundle in &bundles {
        for variant in variants {
            total += bundle
                .calculator
                .calculate_transaction_fee(divan::black_box(dec!(123456)), variant);
        }
    }
    total
}

/// Single fully-checked transfer through the engine
#[divan::bench]
fn execute_full_transfer() {
    let engine = TransactionEngine::new(
        Arc::new(CapabilityResolver::with_builtin_operators()),
        Arc::new(TransactionHistory::new()),
    );
    let spec = presets::full_transfer("CI1234567890", "CI0987654321", dec!(100000))
        .build()
        .expect("assembly failed");

    engine
        .process(OperatorType::Bank, divan::black_box(spec))
        .expect("processing failed");
}

/// Generate a request CSV with `rows` data rows
fn generate_requests(rows: usize) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "recipe,operator,source,destination,dest_operator,amount,target_currency,exchange_rate,reference"
    )
    .expect("write header");
    for i in 0..rows {
        writeln!(
            file,
            "full_transfer,bank,CI1234567890,CI0987654321,,{},,,BENCH-{}",
            10000 + i,
            i
        )
        .expect("write row");
    }
    file.flush().expect("flush");
    file
}

/// Synchronous strategy over 1,000 requests
#[divan::bench]
fn sync_strategy_small(bencher: divan::Bencher) {
    let input = generate_requests(1000);
    bencher.bench_local(|| {
        let strategy = create_strategy(StrategyType::Sync, None);
        let mut output = Vec::new();
        strategy
            .process(input.path(), &mut output)
            .expect("Processing failed");
    });
}

/// Asynchronous strategy over 1,000 requests
#[divan::bench]
fn async_strategy_small(bencher: divan::Bencher) {
    let input = generate_requests(1000);
    bencher.bench_local(|| {
        let strategy = create_strategy(StrategyType::Async, Some(BatchConfig::default()));
        let mut output = Vec::new();
        strategy
            .process(input.path(), &mut output)
            .expect("Processing failed");
    });
}
