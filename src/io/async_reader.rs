//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading of transaction requests from an async source.
//! Used by the async processing strategy to fan batches out across tokio
//! tasks.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - the csv_format module for record conversion
//!
//! Invalid records are reported through `tracing` and skipped, mirroring
//! the recoverable-error behavior of the synchronous pipeline.

use crate::io::csv_format::{convert_request_record, RequestRecord, TransferRequest};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV request reader
///
/// Provides a batch reading interface over transaction requests while
/// maintaining streaming behavior with constant memory usage.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    ///
    /// # Arguments
    ///
    /// * `reader` - Async reader providing CSV data
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read a batch of transaction requests
    ///
    /// Reads up to `batch_size` records, converting them to
    /// `TransferRequest`s. Invalid records are logged and skipped.
    ///
    /// # Arguments
    ///
    /// * `batch_size` - Maximum number of requests to read
    ///
    /// # Returns
    ///
    /// A vector of successfully converted requests; empty at end of file.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<TransferRequest> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<RequestRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(record)) => match convert_request_record(record) {
                    Ok(request) => batch.push(request),
                    Err(e) => warn!("Record conversion error: {}", e),
                },
                Some(Err(e)) => warn!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}
