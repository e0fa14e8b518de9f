//! Operator capability families
//!
//! This module defines the four capability contracts every operator family
//! implements, the [`CapabilityBundle`] grouping one implementation of
//! each, and the three concrete families:
//! - [`bank`] - traditional commercial bank
//! - [`mobile_money`] - mobile-money provider
//! - [`microfinance`] - microfinance institution
//!
//! # Family Consistency
//!
//! A bundle's four members are always constructed together and report the
//! same operator family name. The capability resolver re-checks this at
//! registration, so a resolved bundle can never mix members across
//! families.

use crate::types::{
    AccountValidationOutcome, ExternalTransferOutcome, NotificationOutcome, OperatorType,
    SyncOutcome, TransactionSpec, TransactionType,
};
use rust_decimal::Decimal;
use std::sync::Arc;

pub mod bank;
pub mod microfinance;
pub mod mobile_money;

/// Account and transaction validation policy of one operator
///
/// Validators are pure policy: format patterns, identifier minimums,
/// deposit floors and per-transaction ceilings. They never perform I/O.
pub trait AccountValidator: Send + Sync {
    /// Operator family name shared by the whole bundle
    fn operator_name(&self) -> &'static str;

    /// Validate an account-creation request
    ///
    /// Rejects when the account number fails the operator's format
    /// pattern, the client identifier is shorter than the operator
    /// minimum, or the initial deposit is below the operator floor.
    ///
    /// # Arguments
    ///
    /// * `account_number` - Candidate account identifier
    /// * `client_id` - Client identifier
    /// * `initial_deposit` - Opening deposit amount
    fn validate_account_creation(
        &self,
        account_number: &str,
        client_id: &str,
        initial_deposit: Decimal,
    ) -> AccountValidationOutcome;

    /// Validate a transaction against the operator's amount policy
    ///
    /// Rejects non-positive amounts and amounts above the operator's
    /// per-transaction ceiling. Operators may attach non-failing
    /// advisories to approved outcomes.
    fn validate_transaction(
        &self,
        account_number: &str,
        amount: Decimal,
        tx_type: TransactionType,
    ) -> AccountValidationOutcome;
}

/// Fee and rate schedule of one operator
///
/// All fee computations are pure functions of their inputs; fees round up
/// to the whole currency unit (see [`crate::types::ceil_fee`]).
pub trait RateCalculator: Send + Sync {
    /// Operator family name shared by the whole bundle
    fn operator_name(&self) -> &'static str;

    /// Operator fee for a transaction of the given variant
    fn calculate_transaction_fee(&self, amount: Decimal, tx_type: TransactionType) -> Decimal;

    /// Surcharge applied on top of the base fee for cross-operator routing
    fn calculate_inter_operator_fee(&self, amount: Decimal) -> Decimal;

    /// Commission charged on cash withdrawals
    fn calculate_withdrawal_commission(&self, amount: Decimal) -> Decimal;

    /// Annual savings interest rate for the given balance
    ///
    /// Returned as a fraction (0.05 = 5%). The schedule is tiered by
    /// balance; the slope direction is operator policy (Microfinance is
    /// degressive: small balances earn the higher rate).
    fn calculate_savings_interest_rate(&self, balance: Decimal) -> Decimal;
}

/// Notification formatting of one operator
///
/// Pure formatting: no channel I/O happens in this core, so outcomes
/// always report delivery.
pub trait NotificationModule: Send + Sync {
    /// Operator family name shared by the whole bundle
    fn operator_name(&self) -> &'static str;

    /// Format a transaction notification with the final amount and balance
    fn send_transaction_notification(
        &self,
        account_number: &str,
        amount: Decimal,
        balance: Decimal,
    ) -> NotificationOutcome;

    /// Format a welcome notification for a newly opened account
    fn send_welcome_notification(
        &self,
        account_number: &str,
        client_name: &str,
    ) -> NotificationOutcome;

    /// Format a security alert for suspicious activity
    fn send_security_alert(&self, account_number: &str, reason: &str) -> NotificationOutcome;
}

/// External-system adapter of one operator
///
/// External transfers are acknowledgment stubs: adapters validate inputs,
/// issue deterministic references and report simulated balances, but no
/// network settlement happens.
pub trait ExternalSystemAdapter: Send + Sync {
    /// Operator family name shared by the whole bundle
    fn operator_name(&self) -> &'static str;

    /// Name of the external system behind this adapter
    fn system_name(&self) -> &'static str;

    /// Check connectivity to the external system
    fn check_connectivity(&self) -> bool;

    /// Submit a transfer to the external system
    ///
    /// Fails when connectivity is down or the destination account fails
    /// the operator's format pattern; on success a unique external
    /// reference is issued.
    fn execute_external_transfer(
        &self,
        destination_account: &str,
        amount: Decimal,
        reference: &str,
    ) -> ExternalTransferOutcome;

    /// Fetch the balance the external system reports for an account
    fn fetch_external_balance(&self, account_number: &str) -> Decimal;

    /// Push executed transactions to the external system
    fn synchronize(&self, records: &[TransactionSpec]) -> SyncOutcome;
}

/// The coherent set of four capability objects for one operator
///
/// Created once per operator family (stateless apart from adapter
/// reference counters) and shared for the process lifetime; members are
/// reference-counted trait objects so a resolved bundle is cheap to clone.
#[derive(Clone)]
pub struct CapabilityBundle {
    /// The operator family this bundle implements
    pub operator: OperatorType,

    /// Account and transaction validation policy
    pub validator: Arc<dyn AccountValidator>,

    /// Fee and rate schedule
    pub calculator: Arc<dyn RateCalculator>,

    /// Notification formatting
    pub notifier: Arc<dyn NotificationModule>,

    /// External-system adapter
    pub external: Arc<dyn ExternalSystemAdapter>,
}

impl CapabilityBundle {
    /// Family name reported by a member that disagrees with the bundle's
    /// operator, if any
    ///
    /// Used by the resolver to fail fast on cross-family mixes.
    pub fn mismatched_member(&self) -> Option<&'static str> {
        let expected = self.operator.name();
        [
            self.validator.operator_name(),
            self.calculator.operator_name(),
            self.notifier.operator_name(),
            self.external.operator_name(),
        ]
        .into_iter()
        .find(|name| *name != expected)
    }
}

impl std::fmt::Debug for CapabilityBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityBundle")
            .field("operator", &self.operator)
            .finish_non_exhaustive()
    }
}

/// Construct the bundle for an operator family
///
/// # Arguments
///
/// * `operator` - The operator family to build
///
/// # Returns
///
/// A freshly constructed [`CapabilityBundle`] with family-consistent
/// members
pub fn builtin_bundle(operator: OperatorType) -> CapabilityBundle {
    match operator {
        OperatorType::Bank => bank::bundle(),
        OperatorType::MobileMoney => mobile_money::bundle(),
        OperatorType::Microfinance => microfinance::bundle(),
    }
}
