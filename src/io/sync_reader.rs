//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over transaction requests from a CSV
//! file. Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the
//!   iterator, with line numbers for debugging
//!
//! # Memory Efficiency
//!
//! The reader streams records one at a time; memory usage is O(1) per
//! record, not O(file_size).

use crate::io::csv_format::{convert_request_record, RequestRecord, TransferRequest};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV request reader
///
/// # Examples
///
/// ```no_run
/// use rust_operators_engine::io::sync_reader::SyncReader;
/// use std::path::Path;
///
/// let reader = SyncReader::new(Path::new("requests.csv")).unwrap();
/// let requests: Vec<_> = reader.filter_map(Result::ok).collect();
/// println!("Successfully parsed {} requests", requests.len());
/// ```
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to trim whitespace, allow flexible
    /// field counts (trailing optional columns) and use an 8KB buffer.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the file opened successfully
    /// * `Err(String)` if the file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<TransferRequest, String>;

    /// Get the next transaction request from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(TransferRequest))` - Successfully parsed request
    /// * `Some(Err(String))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<RequestRecord>();

        match deserializer.next()? {
            Ok(record) => {
                self.line_num += 1;
                Some(
                    convert_request_record(record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Recipe;
    use crate::types::OperatorType;
    use rust_decimal_macros::dec;
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
    fn test_sync_reader_new_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_reader_iterates_valid_request() {
        let content = format!("{}deposit,bank,CI1234567890,,,60000,,,\n", HEADER);
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let requests: Vec<_> = reader.collect();

        assert_eq!(requests.len(), 1);
        let request = requests[0].as_ref().unwrap();
        assert_eq!(request.recipe, Recipe::Deposit);
        assert_eq!(request.operator, OperatorType::Bank);
        assert_eq!(request.amount, dec!(60000));
    }

    #[test]
    fn test_sync_reader_includes_line_numbers_in_errors() {
        let content = format!(
            "{}deposit,bank,CI1234567890,,,60000,,,\n\
             deposit,bank,CI1234567890,,,not_a_number,,,\n\
             withdrawal,microfinance,MF12345678,,,5000,,,\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let requests: Vec<_> = reader.collect();

        assert_eq!(requests.len(), 3);
        assert!(requests[0].is_ok());
        assert!(requests[1].is_err());
        assert!(requests[2].is_ok());

        let error = requests[1].as_ref().unwrap_err();
        assert!(error.contains("Line 3")); // line 3 because of the header
        assert!(error.contains("Invalid amount"));
    }

    #[test]
    fn test_sync_reader_continues_after_unknown_recipe() {
        let content = format!(
            "{}instant_loan,bank,CI1234567890,,,60000,,,\n\
             deposit,bank,CI1234567890,,,60000,,,\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let requests: Vec<_> = reader.collect();

        assert_eq!(requests.len(), 2);
        assert!(requests[0].is_err());
        assert!(requests[1].is_ok());
    }

    #[test]
    fn test_sync_reader_handles_whitespace() {
        let content = format!(
            "{}  deposit  ,  bank  ,  CI1234567890  ,,,  60000  ,,,\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let requests: Vec<_> = reader.filter_map(Result::ok).collect();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount, dec!(60000));
        assert_eq!(requests[0].source, "CI1234567890");
    }

    #[test]
    fn test_sync_reader_empty_file_after_header() {
        let file = create_temp_csv(HEADER);

        let reader = SyncReader::new(file.path()).unwrap();
        let requests: Vec<_> = reader.collect();
        assert_eq!(requests.len(), 0);
    }

    #[test]
    fn test_sync_reader_all_recipes() {
        let content = format!(
            "{}quick_transfer,bank,CI1234567890,CI0987654321,,10000,,,\n\
             full_transfer,bank,CI1234567890,CI0987654321,,20000,,,\n\
             inter_operator_transfer,bank,CI1234567890,0712345678,mobile_money,30000,,,\n\
             international_transfer,bank,CI1234567890,DE4412345678,,500000,EUR,0.0015,\n\
             deposit,mobile_money,0712345678,,,5000,,,\n\
             withdrawal,microfinance,MF12345678,,,40000,,,\n\
             bill_payment,mobile_money,0712345678,ELEC-2024,,15000,,,\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let requests: Vec<_> = reader.filter_map(Result::ok).collect();
        assert_eq!(requests.len(), 7);
        assert_eq!(requests[2].destination_operator, Some(OperatorType::MobileMoney));
        assert_eq!(requests[3].exchange_rate, Some(dec!(0.0015)));
    }
}
