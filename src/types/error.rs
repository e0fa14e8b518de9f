//! Error types for the Operators Engine
//!
//! This module defines all structured errors surfaced by the engine core
//! and the CSV pipeline around it.
//!
//! # Error Categories
//!
//! - **Configuration Errors**: unsupported operator, duplicate family
//!   registration, empty registry, inconsistent bundle. Fatal at startup
//!   or at the resolver call site, never retried.
//! - **Specification Errors**: missing builder field, non-positive amount.
//!   Rejected synchronously at `build()` or `process()`, no transaction
//!   is recorded.
//! - **Pipeline Errors**: file I/O and CSV parse failures.
//!
//! Policy failures (validation rejection, fraud trip, invalid conversion
//! rate) are *not* errors: they are failed `TransactionResult`s and are
//! still appended to history.

use crate::types::operator::OperatorType;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the Operators Engine
///
/// Each variant includes enough context to diagnose the failure without
/// consulting the input again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Lookup for an operator type with no registered capability family
    #[error("Operator '{operator}' is not supported by this resolver")]
    UnsupportedOperator {
        /// The unregistered operator type
        operator: OperatorType,
    },

    /// Two capability families claimed the same operator type
    ///
    /// Fatal at resolver construction.
    #[error("Duplicate capability bundle registered for operator '{operator}'")]
    DuplicateOperator {
        /// The doubly-claimed operator type
        operator: OperatorType,
    },

    /// Resolver constructed with no capability families at all
    ///
    /// Fatal at resolver construction.
    #[error("Capability resolver requires at least one registered operator")]
    EmptyRegistry,

    /// A bundle member reports a different operator family than its bundle
    ///
    /// Fatal at resolver construction; prevents cross-family mixes.
    #[error("Bundle for operator '{operator}' contains a member reporting family '{member_family}'")]
    InconsistentBundle {
        /// The operator the bundle was registered under
        operator: OperatorType,
        /// The family name the offending member reports
        member_family: String,
    },

    /// A required builder field was never set
    #[error("Transaction specification is incomplete: missing {field}")]
    IncompleteSpec {
        /// Name of the missing field ("type" or "amount")
        field: String,
    },

    /// Transaction amount is zero or negative
    #[error("Transaction amount must be strictly positive, got {amount}")]
    NonPositiveAmount {
        /// The offending amount
        amount: Decimal,
    },

    /// I/O error in the CSV pipeline
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error in the request pipeline
    ///
    /// Recoverable: the malformed record is skipped and processing
    /// continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());
        EngineError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper constructors for common errors

impl EngineError {
    /// Create an UnsupportedOperator error
    pub fn unsupported_operator(operator: OperatorType) -> Self {
        EngineError::UnsupportedOperator { operator }
    }

    /// Create a DuplicateOperator error
    pub fn duplicate_operator(operator: OperatorType) -> Self {
        EngineError::DuplicateOperator { operator }
    }

    /// Create an InconsistentBundle error
    pub fn inconsistent_bundle(operator: OperatorType, member_family: &str) -> Self {
        EngineError::InconsistentBundle {
            operator,
            member_family: member_family.to_string(),
        }
    }

    /// Create an IncompleteSpec error
    pub fn incomplete_spec(field: &str) -> Self {
        EngineError::IncompleteSpec {
            field: field.to_string(),
        }
    }

    /// Create a NonPositiveAmount error
    pub fn non_positive_amount(amount: Decimal) -> Self {
        EngineError::NonPositiveAmount { amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::unsupported(
        EngineError::unsupported_operator(OperatorType::Bank),
        "Operator 'Bank' is not supported by this resolver"
    )]
    #[case::duplicate(
        EngineError::duplicate_operator(OperatorType::Microfinance),
        "Duplicate capability bundle registered for operator 'Microfinance'"
    )]
    #[case::empty_registry(
        EngineError::EmptyRegistry,
        "Capability resolver requires at least one registered operator"
    )]
    #[case::inconsistent(
        EngineError::inconsistent_bundle(OperatorType::Bank, "Mobile Money"),
        "Bundle for operator 'Bank' contains a member reporting family 'Mobile Money'"
    )]
    #[case::incomplete(
        EngineError::incomplete_spec("amount"),
        "Transaction specification is incomplete: missing amount"
    )]
    #[case::non_positive(
        EngineError::non_positive_amount(dec!(-5)),
        "Transaction amount must be strictly positive, got -5"
    )]
    #[case::parse_with_line(
        EngineError::ParseError { line: Some(7), message: "bad field".to_string() },
        "CSV parse error at line 7: bad field"
    )]
    #[case::parse_without_line(
        EngineError::ParseError { line: None, message: "bad field".to_string() },
        "CSV parse error: bad field"
    )]
    fn test_error_display(#[case] error: EngineError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: EngineError = io_error.into();
        assert!(matches!(error, EngineError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
