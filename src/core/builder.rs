//! Transaction assembly
//!
//! This module provides the `TransactionBuilder`, the mutable accumulator
//! that records which fields, optional steps and commissions a transaction
//! will carry before it is finalized into an immutable
//! [`TransactionSpec`].
//!
//! # Behavior
//!
//! - Every setter returns the same accumulator, so calls chain.
//! - Step flags are a set: enabling a step twice equals enabling it once.
//! - The commission list preserves insertion order (it determines the
//!   order commissions are reported in; their sum is order-independent).
//! - `build()` borrows the accumulator: building twice from the same
//!   accumulator yields two structurally equal specs.

use crate::types::{
    Commission, EngineError, OperatorType, Step, StepSet, TransactionSpec, TransactionType,
};
use rust_decimal::Decimal;

/// Default currency for assembled transactions
const DEFAULT_CURRENCY: &str = "XOF";

/// Step-accumulating transaction builder
///
/// # Examples
///
/// ```
/// use rust_operators_engine::core::TransactionBuilder;
/// use rust_operators_engine::types::TransactionType;
/// use rust_decimal_macros::dec;
///
/// let mut builder = TransactionBuilder::new();
/// let spec = builder
///     .transaction_type(TransactionType::TransferInternal)
///     .from("CI1234567890")
///     .to("CI0987654321")
///     .amount(dec!(75000))
///     .with_verification()
///     .with_notification()
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.amount, dec!(75000));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    tx_type: Option<TransactionType>,
    source_account: String,
    source_operator: Option<OperatorType>,
    destination_account: Option<String>,
    destination_operator: Option<OperatorType>,
    amount: Option<Decimal>,
    currency: Option<String>,
    target_currency: Option<String>,
    exchange_rate: Option<Decimal>,
    reference: Option<String>,
    description: Option<String>,
    commissions: Vec<Commission>,
    steps: StepSet,
}

impl TransactionBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        TransactionBuilder::default()
    }

    /// Set the transaction variant (required)
    pub fn transaction_type(&mut self, tx_type: TransactionType) -> &mut Self {
        self.tx_type = Some(tx_type);
        self
    }

    /// Set the source account
    pub fn from(&mut self, account: &str) -> &mut Self {
        self.source_account = account.to_string();
        self
    }

    /// Record the operator owning the source account
    pub fn from_operator(&mut self, operator: OperatorType) -> &mut Self {
        self.source_operator = Some(operator);
        self
    }

    /// Set the destination account
    pub fn to(&mut self, account: &str) -> &mut Self {
        self.destination_account = Some(account.to_string());
        self
    }

    /// Record the operator owning the destination account
    pub fn to_operator(&mut self, operator: OperatorType) -> &mut Self {
        self.destination_operator = Some(operator);
        self
    }

    /// Set the transaction amount (required, strictly positive)
    pub fn amount(&mut self, amount: Decimal) -> &mut Self {
        self.amount = Some(amount);
        self
    }

    /// Override the default currency
    pub fn currency(&mut self, currency: &str) -> &mut Self {
        self.currency = Some(currency.to_string());
        self
    }

    /// Set a caller-supplied reference
    pub fn reference(&mut self, reference: &str) -> &mut Self {
        self.reference = Some(reference.to_string());
        self
    }

    /// Set a free-form description
    pub fn description(&mut self, description: &str) -> &mut Self {
        self.description = Some(description.to_string());
        self
    }

    /// Enable the verification step
    pub fn with_verification(&mut self) -> &mut Self {
        self.steps.insert(Step::Verification);
        self
    }

    /// Enable the fraud-check step
    pub fn with_fraud_check(&mut self) -> &mut Self {
        self.steps.insert(Step::FraudCheck);
        self
    }

    /// Enable the audit-logging step
    pub fn with_logging(&mut self) -> &mut Self {
        self.steps.insert(Step::Logging);
        self
    }

    /// Enable the notification step
    pub fn with_notification(&mut self) -> &mut Self {
        self.steps.insert(Step::Notification);
        self
    }

    /// Enable currency conversion into `target_currency` at `rate`
    pub fn with_currency_conversion(&mut self, target_currency: &str, rate: Decimal) -> &mut Self {
        self.steps.insert(Step::CurrencyConversion);
        self.target_currency = Some(target_currency.to_string());
        self.exchange_rate = Some(rate);
        self
    }

    /// Attach a commission (insertion order is preserved)
    pub fn with_commission(&mut self, commission: Commission) -> &mut Self {
        self.commissions.push(commission);
        self
    }

    /// Attach several commissions at once
    pub fn with_commissions(&mut self, commissions: impl IntoIterator<Item = Commission>) -> &mut Self {
        self.commissions.extend(commissions);
        self
    }

    /// Finalize the accumulated state into a `TransactionSpec`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction type was never set (`IncompleteSpec`)
    /// - The amount was never set (`IncompleteSpec`)
    /// - The amount is zero or negative (`NonPositiveAmount`)
    pub fn build(&self) -> Result<TransactionSpec, EngineError> {
        let tx_type = self
            .tx_type
            .ok_or_else(|| EngineError::incomplete_spec("type"))?;
        let amount = self
            .amount
            .ok_or_else(|| EngineError::incomplete_spec("amount"))?;
        if amount <= Decimal::ZERO {
            return Err(EngineError::non_positive_amount(amount));
        }

        Ok(TransactionSpec {
            tx_type,
            source_account: self.source_account.clone(),
            source_operator: self.source_operator,
            destination_account: self.destination_account.clone(),
            destination_operator: self.destination_operator,
            amount,
            currency: self
                .currency
                .clone()
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            target_currency: self.target_currency.clone(),
            exchange_rate: self.exchange_rate,
            reference: self.reference.clone(),
            description: self.description.clone(),
            commissions: self.commissions.clone(),
            steps: self.steps,
        })
    }
}
