//! Asynchronous batch processing strategy
//!
//! Multi-threaded pipeline: requests are read in batches and each batch is
//! fanned out across tokio tasks sharing one engine.
//!
//! # Soundness
//!
//! Engine calls are stateless per transaction and history appends are
//! lock-guarded, so concurrent execution of unrelated requests preserves
//! every per-transaction guarantee. The engine imposes no ordering across
//! unrelated transactions, so output row order may differ from input
//! order (match rows by reference).
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── Arc<TransactionEngine> (shared, lock-guarded history)
//! ```

use crate::core::{CapabilityResolver, TransactionEngine, TransactionHistory};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_results_csv;
use crate::strategy::ProcessingStrategy;
use futures::future::join_all;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Configuration for batch processing
///
/// Controls how many requests are read per batch and how many worker
/// threads the runtime uses.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of requests per batch
    pub batch_size: usize,
    /// Maximum number of requests processing concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, falling back to defaults on zero values
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Reads requests in batches and processes each batch's requests
/// concurrently on a tokio multi-threaded runtime. Batches are processed
/// sequentially; within a batch every request runs as its own task.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    /// Batch processing configuration
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process requests from the input file and write results to output
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Creates a shared engine over the builtin operators
    /// 3. Reads requests in batches from CSV using AsyncReader
    /// 4. Fans each batch out across tokio tasks and awaits the batch
    /// 5. Writes the executed history as the result CSV
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, runtime construction) are returned
    /// immediately. Malformed or rejected requests are reported and
    /// skipped without aborting the pipeline.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let history = Arc::new(TransactionHistory::new());
            let engine = Arc::new(TransactionEngine::new(
                Arc::new(CapabilityResolver::with_builtin_operators()),
                Arc::clone(&history),
            ));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // Wrap the tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                // Fan the batch out; await completion before reading the
                // next batch so memory stays bounded by the batch size
                let tasks = batch.into_iter().map(|request| {
                    let engine = Arc::clone(&engine);
                    tokio::spawn(async move {
                        let operator = request.operator;
                        match request.to_spec() {
                            Ok(spec) => {
                                if let Err(e) = engine.process(operator, spec) {
                                    warn!("Transaction processing error: {}", e);
                                }
                            }
                            Err(e) => warn!("Request assembly error: {}", e),
                        }
                    })
                });

                for task_result in join_all(tasks).await {
                    if let Err(e) = task_result {
                        warn!("Worker task failed: {}", e);
                    }
                }
            }

            write_results_csv(&history.snapshot(), output)?;

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "recipe,operator,source,destination,dest_operator,amount,target_currency,exchange_rate,reference\n";

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_async_strategy_processes_valid_requests() {
        let content = format!(
            "{}deposit,bank,CI1234567890,,,60000,,,D-1\n\
             withdrawal,mobile_money,0712345678,,,5000,,,W-1\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let strategy = AsyncProcessingStrategy::new(BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(file.path(), &mut output);
        assert!(result.is_ok());

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("D-1"));
        assert!(output_str.contains("W-1"));
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncProcessingStrategy::new(BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_async_strategy_small_batches_cover_all_rows() {
        let mut content = HEADER.to_string();
        for i in 0..10 {
            content.push_str(&format!(
                "deposit,bank,CI1234567890,,,60000,,,REF-{}\n",
                i
            ));
        }
        let file = create_temp_csv(&content);

        // batch size 3 forces multiple batches
        let strategy = AsyncProcessingStrategy::new(BatchConfig::new(3, 2));
        let mut output = Vec::new();
        strategy.process(file.path(), &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        for i in 0..10 {
            assert!(
                output_str.contains(&format!("REF-{}", i)),
                "missing REF-{} in output",
                i
            );
        }
    }

    #[test]
    fn test_batch_config_zero_values_fall_back() {
        let config = BatchConfig::new(0, 0);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.max_concurrent_batches, num_cpus::get());
    }

    #[test]
    fn test_batch_config_custom_values() {
        let config = BatchConfig::new(250, 4);
        assert_eq!(config.batch_size, 250);
        assert_eq!(config.max_concurrent_batches, 4);
    }
}
