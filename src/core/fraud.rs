//! Fraud-check policy
//!
//! The fraud gate is implementation-defined policy rather than an external
//! contract, so it is modeled as a pluggable trait: the engine runs
//! whatever policy it was constructed with. The default policy is a
//! deterministic amount ceiling.

use crate::types::TransactionSpec;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Pluggable fraud-decision policy
///
/// Implementations must be deterministic functions of the spec so fraud
/// outcomes are reproducible under test.
pub trait FraudPolicy: Send + Sync {
    /// Reason the transaction is flagged, or `None` when it is clean
    fn flag_reason(&self, spec: &TransactionSpec) -> Option<String>;
}

/// Default fraud policy: flag any transaction above a fixed amount ceiling
#[derive(Debug, Clone, Copy)]
pub struct AmountCeilingPolicy {
    /// Amounts strictly above this value are flagged
    pub ceiling: Decimal,
}

impl AmountCeilingPolicy {
    /// Create a policy with a custom ceiling
    pub fn new(ceiling: Decimal) -> Self {
        AmountCeilingPolicy { ceiling }
    }
}

impl Default for AmountCeilingPolicy {
    fn default() -> Self {
        AmountCeilingPolicy {
            ceiling: dec!(5000000),
        }
    }
}

impl FraudPolicy for AmountCeilingPolicy {
    fn flag_reason(&self, spec: &TransactionSpec) -> Option<String> {
        if spec.amount > self.ceiling {
            Some(format!(
                "amount {} exceeds the fraud ceiling of {}",
                spec.amount, self.ceiling
            ))
        } else {
            None
        }
    }
}
