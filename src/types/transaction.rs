//! Transaction-related types for the Operators Engine
//!
//! This module defines the transaction variants, the optional processing
//! steps, the assembled transaction specification and the structured
//! execution result used throughout the system.

use super::money::Commission;
use super::operator::OperatorType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction variants supported by the engine
///
/// The variant selects the operator fee table entry and, for the
/// inter-operator and international transfers, the inter-operator
/// surcharge and external-system dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Transfer between two accounts of the same operator
    TransferInternal,

    /// Transfer between accounts of two different operators
    TransferInterOperator,

    /// Transfer to a foreign-currency destination (requires conversion)
    TransferInternational,

    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account
    Withdrawal,

    /// Generic merchant payment
    Payment,

    /// Utility/bill payment against a biller reference
    BillPayment,
}

impl TransactionType {
    /// Short lowercase tag used in CSV output and log events
    pub fn tag(&self) -> &'static str {
        match self {
            TransactionType::TransferInternal => "transfer_internal",
            TransactionType::TransferInterOperator => "transfer_inter_operator",
            TransactionType::TransferInternational => "transfer_international",
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::Payment => "payment",
            TransactionType::BillPayment => "bill_payment",
        }
    }
}

/// Optional processing steps of a transaction
///
/// Steps are accumulated into a [`StepSet`] during assembly and executed
/// in the engine's fixed order. Fee/commission application is not listed
/// here because it always runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Account/amount validation through the operator's validator
    Verification,

    /// Fraud-policy gate
    FraudCheck,

    /// Structured audit record emission
    Logging,

    /// Operator-branded notification to the source account holder
    Notification,

    /// Conversion of the amount into a target currency
    CurrencyConversion,
}

impl Step {
    fn mask(self) -> u8 {
        match self {
            Step::Verification => 1 << 0,
            Step::FraudCheck => 1 << 1,
            Step::Logging => 1 << 2,
            Step::Notification => 1 << 3,
            Step::CurrencyConversion => 1 << 4,
        }
    }
}

/// Set of enabled processing steps
///
/// Insertion is idempotent: enabling a step twice has the same effect as
/// enabling it once (a set, not a counter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSet {
    bits: u8,
}

impl StepSet {
    /// Create an empty step set
    pub fn empty() -> Self {
        StepSet::default()
    }

    /// Enable a step (idempotent)
    pub fn insert(&mut self, step: Step) {
        self.bits |= step.mask();
    }

    /// Check whether a step is enabled
    pub fn contains(&self, step: Step) -> bool {
        self.bits & step.mask() != 0
    }

    /// Number of enabled steps
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// True if no step is enabled
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

/// Assembled transaction specification
///
/// Produced by the transaction builder and immutable once handed to the
/// execution engine. The amount must be strictly positive at execution
/// time; the builder enforces this at `build()` and the engine re-checks
/// it for specs constructed elsewhere (e.g. deserialized).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSpec {
    /// Transaction variant
    pub tx_type: TransactionType,

    /// Source account identifier (format is operator policy)
    pub source_account: String,

    /// Operator owning the source account, when relevant to the variant
    pub source_operator: Option<OperatorType>,

    /// Destination account identifier, for transfer-like variants
    pub destination_account: Option<String>,

    /// Operator owning the destination account (inter-operator transfers)
    pub destination_operator: Option<OperatorType>,

    /// Transaction amount in the source currency
    pub amount: Decimal,

    /// Source currency code
    pub currency: String,

    /// Target currency code, when currency conversion is enabled
    pub target_currency: Option<String>,

    /// Source-to-target exchange rate, when currency conversion is enabled
    pub exchange_rate: Option<Decimal>,

    /// Caller-supplied reference; assigned from the history sequence if absent
    pub reference: Option<String>,

    /// Free-form description
    pub description: Option<String>,

    /// Commissions to apply, in insertion order
    pub commissions: Vec<Commission>,

    /// Enabled optional processing steps
    pub steps: StepSet,
}

/// Outcome record of one executed step
///
/// Step outcomes are appended in execution order, including the outcome of
/// the hard-failing step when execution short-circuits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Step identifier (e.g. "verification", "fees", "notification")
    pub step: String,

    /// Whether the step passed
    pub passed: bool,

    /// Human-readable detail for diagnostics
    pub detail: String,
}

impl StepOutcome {
    /// Create a step outcome record
    pub fn new(step: &str, passed: bool, detail: impl Into<String>) -> Self {
        StepOutcome {
            step: step.to_string(),
            passed,
            detail: detail.into(),
        }
    }
}

/// Structured result of one transaction execution
///
/// Produced exactly once per execution and immutable afterwards. A policy
/// failure (validation rejection, fraud trip, invalid conversion rate)
/// yields `success = false` but never an error: the result is still
/// recorded in history for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResult {
    /// True iff no hard-failure step failed
    pub success: bool,

    /// Amount after currency conversion (equals `amount` when disabled)
    pub final_amount: Decimal,

    /// Operator fee from the rate calculator (ceiling-rounded)
    pub fee: Decimal,

    /// Sum of all attached commission charges
    pub total_commission: Decimal,

    /// Per-step outcome records, in execution order
    pub step_outcomes: Vec<StepOutcome>,

    /// Summary of the first failure, or a success confirmation
    pub message: String,
}

impl TransactionResult {
    /// Build a failed result from the outcomes collected so far
    pub fn failed(
        final_amount: Decimal,
        step_outcomes: Vec<StepOutcome>,
        message: impl Into<String>,
    ) -> Self {
        TransactionResult {
            success: false,
            final_amount,
            fee: Decimal::ZERO,
            total_commission: Decimal::ZERO,
            step_outcomes,
            message: message.into(),
        }
    }
}

/// An executed transaction as stored in history
///
/// Plain data: the engine exposes these for an external repository or the
/// reporting subsystem; it never persists them itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutedTransaction {
    /// Unique transaction reference (caller-supplied or history-assigned)
    pub reference: String,

    /// Operator the transaction was executed against
    pub operator: OperatorType,

    /// The assembled specification
    pub spec: TransactionSpec,

    /// The execution result
    pub result: TransactionResult,
}
