//! Processing strategy module
//!
//! This module defines the Strategy pattern for complete request
//! processing pipelines, encompassing CSV request parsing, transaction
//! execution and result output. This allows different processing
//! implementations (synchronous, asynchronous batch) to be selected at
//! runtime.

use crate::cli::StrategyType;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete request pipelines
///
/// Each strategy reads transaction requests from a CSV file, assembles
/// and executes them through the transaction engine, and writes the
/// executed history to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process requests from the input file and write results to output
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file containing requests
    /// * `output` - Mutable reference to a writer for the result CSV
    ///
    /// # Returns
    ///
    /// * `Ok(())` if processing completed (possibly with recoverable,
    ///   skipped records)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O
    ///   error, runtime construction failure)
    ///
    /// # Error Handling
    ///
    /// Individual malformed requests are reported and skipped; they never
    /// abort the pipeline. Policy failures are regular executed
    /// transactions with `success = false` in the output.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy (Sync or Async)
/// * `config` - Optional batch configuration (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
