//! Rust Operators Engine Library
//! # Overview
//!
//! This library provides a multi-operator financial-transaction engine:
//! it resolves a consistent family of behaviors for a financial operator
//! (bank, mobile-money provider, microfinance institution) and executes
//! transactions assembled from configurable processing steps.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (operators, specs, results, commissions)
//! - [`operators`] - Capability contracts and the three operator families
//! - [`core`] - Business logic components:
//!   - [`core::resolver`] - Operator capability resolution
//!   - [`core::builder`] - Step-accumulating transaction assembly
//!   - [`core::engine`] - Fixed-order transaction execution
//!   - [`core::presets`] - Named transaction recipes
//!   - [`core::history`] - Append-only executed-transaction log
//! - [`io`] - CSV request parsing and result output
//! - [`strategy`] - Processing pipelines (sync, async batch)
//! - [`cli`] - CLI argument parsing
//!
//! # Execution Model
//!
//! A caller resolves an operator's capability bundle, assembles a
//! transaction (directly or via a preset recipe) and hands it to the
//! engine, which runs the enabled steps in a fixed order:
//!
//! 1. **Verification** - operator account/amount policy (hard failure)
//! 2. **FraudCheck** - pluggable fraud policy (hard failure)
//! 3. **CurrencyConversion** - amount × rate (hard failure)
//! 4. **Fees/commissions** - always applied
//! 5. **Logging** - structured audit event (non-critical)
//! 6. **Notification** - operator-branded message (non-critical)
//!
//! Policy failures produce a failed [`types::TransactionResult`] rather
//! than an error, and every execution is appended to the history for
//! audit.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod operators;
pub mod strategy;
pub mod types;

pub use core::{
    CapabilityResolver, TransactionBuilder, TransactionEngine, TransactionHistory,
};
pub use io::write_results_csv;
pub use operators::CapabilityBundle;
pub use types::{
    Commission, EngineError, ExecutedTransaction, OperatorType, TransactionResult,
    TransactionSpec, TransactionType,
};
