//! Synchronous processing strategy
//!
//! Single-threaded pipeline: requests stream through the engine one at a
//! time, in input order, so the output rows follow the input rows exactly.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Assembly to the recipe presets (via `TransferRequest::to_spec`)
//! - Execution to `TransactionEngine`
//! - CSV output to `csv_format::write_results_csv`

use crate::core::{CapabilityResolver, TransactionEngine, TransactionHistory};
use crate::io::csv_format::write_results_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_operators_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("requests.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process requests from the input file and write results to output
    ///
    /// 1. Creates an engine over the builtin operators and a fresh history
    /// 2. Streams requests from the CSV file
    /// 3. Assembles each request via its recipe and executes it
    /// 4. Writes the executed history as the result CSV
    ///
    /// Malformed records and rejected specifications are reported and
    /// skipped; processing continues with the next record.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let history = Arc::new(TransactionHistory::new());
        let engine = TransactionEngine::new(
            Arc::new(CapabilityResolver::with_builtin_operators()),
            Arc::clone(&history),
        );

        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(request) => {
                    let operator = request.operator;
                    match request.to_spec() {
                        Ok(spec) => {
                            if let Err(e) = engine.process(operator, spec) {
                                warn!("Transaction processing error: {}", e);
                            }
                        }
                        Err(e) => warn!("Request assembly error: {}", e),
                    }
                }
                Err(e) => warn!("CSV parsing error: {}", e),
            }
        }

        write_results_csv(&history.snapshot(), output)?;

        Ok(())
    }
}
