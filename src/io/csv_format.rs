//! CSV format handling for transaction requests and result output
//!
//! This module centralizes all CSV format concerns, providing:
//! - `RequestRecord` structure for deserialization
//! - Conversion from CSV records to domain requests and specs
//! - Executed-transaction output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::core::presets;
use crate::core::presets::Recipe;
use crate::types::{ExecutedTransaction, OperatorType, TransactionSpec};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns:
/// `recipe, operator, source, destination, dest_operator, amount,
/// target_currency, exchange_rate, reference`.
/// Trailing columns are optional; which ones are required depends on the
/// recipe and is validated during conversion.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RequestRecord {
    pub recipe: String,
    pub operator: String,
    pub source: String,
    pub destination: Option<String>,
    pub dest_operator: Option<String>,
    pub amount: Option<String>,
    pub target_currency: Option<String>,
    pub exchange_rate: Option<String>,
    pub reference: Option<String>,
}

/// A parsed transaction request, ready to be assembled into a spec
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub recipe: Recipe,
    pub operator: OperatorType,
    pub source: String,
    pub destination: Option<String>,
    pub destination_operator: Option<OperatorType>,
    pub amount: Decimal,
    pub target_currency: Option<String>,
    pub exchange_rate: Option<Decimal>,
    pub reference: Option<String>,
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Convert a RequestRecord to a TransferRequest
///
/// This function:
/// - Parses the recipe and operator identifiers
/// - Parses the amount (required, strictly positive)
/// - Parses the optional destination operator and exchange rate
///
/// Recipe-specific field requirements (destination, conversion data) are
/// checked later, in [`TransferRequest::to_spec`].
///
/// # Arguments
///
/// * `record` - The deserialized CSV record
///
/// # Returns
///
/// Result containing either:
/// - Ok(TransferRequest) - Successfully converted request
/// - Err(String) - Error message describing the conversion failure
pub fn convert_request_record(record: RequestRecord) -> Result<TransferRequest, String> {
    let recipe = record.recipe.parse::<Recipe>()?;
    let operator = record.operator.parse::<OperatorType>()?;

    let amount = match non_empty(&record.amount) {
        Some(raw) => match Decimal::from_str(&raw) {
            Ok(amount) => amount,
            Err(_) => return Err(format!("Invalid amount '{}'", raw)),
        },
        None => return Err(format!("Recipe '{}' requires an amount", record.recipe)),
    };
    if amount <= Decimal::ZERO {
        return Err(format!("Amount must be strictly positive, got {}", amount));
    }

    let destination_operator = match non_empty(&record.dest_operator) {
        Some(raw) => Some(raw.parse::<OperatorType>()?),
        None => None,
    };

    let exchange_rate = match non_empty(&record.exchange_rate) {
        Some(raw) => match Decimal::from_str(&raw) {
            Ok(rate) => Some(rate),
            Err(_) => return Err(format!("Invalid exchange rate '{}'", raw)),
        },
        None => None,
    };

    Ok(TransferRequest {
        recipe,
        operator,
        source: record.source.trim().to_string(),
        destination: non_empty(&record.destination),
        destination_operator,
        amount,
        target_currency: non_empty(&record.target_currency),
        exchange_rate,
        reference: non_empty(&record.reference),
    })
}

impl TransferRequest {
    /// Assemble this request into a transaction spec via its recipe
    ///
    /// # Returns
    ///
    /// * `Ok(TransactionSpec)` - The assembled spec
    /// * `Err(String)` - A recipe-specific required field was missing, or
    ///   the builder rejected the assembly
    pub fn to_spec(&self) -> Result<TransactionSpec, String> {
        let mut builder = match self.recipe {
            Recipe::QuickTransfer => {
                let destination = self.require_destination()?;
                presets::quick_transfer(&self.source, &destination, self.amount)
            }
            Recipe::FullTransfer => {
                let destination = self.require_destination()?;
                presets::full_transfer(&self.source, &destination, self.amount)
            }
            Recipe::InterOperatorTransfer => {
                let destination = self.require_destination()?;
                let destination_operator = self.destination_operator.ok_or_else(|| {
                    "inter_operator_transfer requires a dest_operator".to_string()
                })?;
                presets::inter_operator_transfer(
                    &self.source,
                    self.operator,
                    &destination,
                    destination_operator,
                    self.amount,
                )
            }
            Recipe::InternationalTransfer => {
                let destination = self.require_destination()?;
                let target_currency = self.target_currency.clone().ok_or_else(|| {
                    "international_transfer requires a target_currency".to_string()
                })?;
                let exchange_rate = self.exchange_rate.ok_or_else(|| {
                    "international_transfer requires an exchange_rate".to_string()
                })?;
                presets::international_transfer(
                    &self.source,
                    &destination,
                    self.amount,
                    &target_currency,
                    exchange_rate,
                )
            }
            Recipe::Deposit => presets::deposit(&self.source, self.amount),
            Recipe::Withdrawal => presets::withdrawal(&self.source, self.amount),
            Recipe::BillPayment => {
                // the destination column carries the biller reference
                let biller = self.require_destination()?;
                presets::bill_payment(&self.source, &biller, self.amount)
            }
        };

        if let Some(reference) = &self.reference {
            builder.reference(reference);
        }
        builder.build().map_err(|e| e.to_string())
    }

    fn require_destination(&self) -> Result<String, String> {
        self.destination
            .clone()
            .ok_or_else(|| "Recipe requires a destination column".to_string())
    }
}

/// Write executed transactions to CSV format
///
/// Writes entries with columns: `reference, operator, type, success,
/// amount, final_amount, fee, total_commission, message`, in the order
/// given.
///
/// # Arguments
///
/// * `entries` - Executed transactions to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_results_csv(
    entries: &[ExecutedTransaction],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "reference",
            "operator",
            "type",
            "success",
            "amount",
            "final_amount",
            "fee",
            "total_commission",
            "message",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for entry in entries {
        writer
            .write_record(&[
                entry.reference.clone(),
                entry.operator.name().to_string(),
                entry.spec.tx_type.tag().to_string(),
                entry.result.success.to_string(),
                entry.spec.amount.normalize().to_string(),
                entry.result.final_amount.normalize().to_string(),
                entry.result.fee.normalize().to_string(),
                entry.result.total_commission.normalize().to_string(),
                entry.result.message.clone(),
            ])
            .map_err(|e| format!("Failed to write result record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
