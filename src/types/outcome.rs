//! Capability outcome records
//!
//! Immutable value types produced by the operator capability contracts:
//! validation verdicts, notification receipts, external transfer
//! acknowledgments and synchronization summaries. All of them carry the
//! operator (or external system) name so callers can assert family
//! consistency.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Verdict of an account-creation or transaction validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountValidationOutcome {
    /// Whether the validator approved the request
    pub approved: bool,

    /// Human-readable approval confirmation or rejection reason
    ///
    /// May also carry a non-failing advisory (e.g. the Microfinance
    /// large-withdrawal notice) when `approved` is true.
    pub message: String,

    /// Operator family name of the validator that produced this outcome
    pub operator_name: String,
}

impl AccountValidationOutcome {
    /// Create an approved outcome
    pub fn approved(message: impl Into<String>, operator_name: &str) -> Self {
        AccountValidationOutcome {
            approved: true,
            message: message.into(),
            operator_name: operator_name.to_string(),
        }
    }

    /// Create a rejected outcome
    pub fn rejected(message: impl Into<String>, operator_name: &str) -> Self {
        AccountValidationOutcome {
            approved: false,
            message: message.into(),
            operator_name: operator_name.to_string(),
        }
    }
}

/// Receipt of a formatted notification
///
/// Notification modules perform pure formatting (no channel I/O), so
/// `delivered` reflects formatting success only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationOutcome {
    /// Whether the notification was produced
    pub delivered: bool,

    /// The operator-branded message text
    pub formatted_message: String,

    /// Delivery channel label (e.g. "SMS", "EMAIL")
    pub channel: String,

    /// Operator family name of the notifier
    pub operator_name: String,
}

/// Acknowledgment of an external-system transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalTransferOutcome {
    /// Whether the external system acknowledged the transfer
    pub succeeded: bool,

    /// Unique reference issued by the external system on success
    pub external_reference: Option<String>,

    /// Name of the external system
    pub system_name: String,

    /// Acknowledgment detail or failure reason
    pub diagnostic: String,
}

/// Summary of a synchronization push to an external system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncOutcome {
    /// Whether the external system accepted the push
    pub succeeded: bool,

    /// Number of records acknowledged
    pub synced_records: usize,

    /// Name of the external system
    pub system_name: String,

    /// Push detail or failure reason
    pub diagnostic: String,
}

/// Deterministic simulated balance helper for external adapters
///
/// External systems in this core are acknowledgment stubs; the balance
/// they report is a stable function of the account-number digits so every
/// lookup is repeatable under test.
pub fn simulated_balance(account_number: &str) -> Decimal {
    let digit_sum: u64 = account_number
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(u64::from)
        .sum();
    Decimal::from(digit_sum * 10_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validation_outcome_constructors() {
        let ok = AccountValidationOutcome::approved("approved", "Bank");
        assert!(ok.approved);
        assert_eq!(ok.operator_name, "Bank");

        let rejected = AccountValidationOutcome::rejected("bad format", "Bank");
        assert!(!rejected.approved);
        assert_eq!(rejected.message, "bad format");
    }

    #[test]
    fn test_simulated_balance_is_deterministic() {
        let first = simulated_balance("CI1234567890");
        let second = simulated_balance("CI1234567890");
        assert_eq!(first, second);
    }

    #[test]
    fn test_simulated_balance_value() {
        // digits 1+2+3+4+5+6+7+8+9+0 = 45
        assert_eq!(simulated_balance("CI1234567890"), dec!(450000));
        // no digits at all
        assert_eq!(simulated_balance("ABCD"), Decimal::ZERO);
    }
}
