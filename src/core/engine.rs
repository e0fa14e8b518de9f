//! Transaction execution engine
//!
//! This module provides the `TransactionEngine` that runs an assembled
//! [`TransactionSpec`] against a resolved capability bundle.
//!
//! # Step Order
//!
//! Enabled steps run in a fixed order, short-circuiting on the first hard
//! failure:
//!
//! 1. Verification (hard) - operator validator
//! 2. FraudCheck (hard) - pluggable fraud policy
//! 3. CurrencyConversion (hard) - amount × exchange rate
//! 4. Fee/commission application - always runs
//! 5. Logging (non-critical) - structured audit event
//! 6. Notification (non-critical) - operator-branded message
//! 7. External dispatch (non-critical) - cross-operator acknowledgment
//!
//! `success` is true iff none of the three hard steps failed. A policy
//! failure produces a failed result, never an error, and the transaction
//! is still appended to history for audit.

use crate::core::fraud::{AmountCeilingPolicy, FraudPolicy};
use crate::core::history::TransactionHistory;
use crate::core::resolver::CapabilityResolver;
use crate::operators::CapabilityBundle;
use crate::types::{
    EngineError, ExecutedTransaction, OperatorType, Step, StepOutcome, TransactionResult,
    TransactionSpec, TransactionType,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// Transaction execution engine
///
/// Holds the capability resolver, the injected history and the fraud
/// policy. The engine itself is stateless per call: `execute` never
/// mutates shared state except the append-only history, so one engine can
/// be shared across threads behind an `Arc`.
pub struct TransactionEngine {
    resolver: Arc<CapabilityResolver>,
    history: Arc<TransactionHistory>,
    fraud_policy: Box<dyn FraudPolicy>,
}

impl TransactionEngine {
    /// Create an engine with the default amount-ceiling fraud policy
    ///
    /// # Arguments
    ///
    /// * `resolver` - The operator capability registry
    /// * `history` - The history owned by the calling layer
    pub fn new(resolver: Arc<CapabilityResolver>, history: Arc<TransactionHistory>) -> Self {
        TransactionEngine {
            resolver,
            history,
            fraud_policy: Box::new(AmountCeilingPolicy::default()),
        }
    }

    /// Replace the fraud policy
    pub fn with_fraud_policy(mut self, policy: Box<dyn FraudPolicy>) -> Self {
        self.fraud_policy = policy;
        self
    }

    /// The history this engine appends to
    pub fn history(&self) -> &Arc<TransactionHistory> {
        &self.history
    }

    /// Process a transaction end to end
    ///
    /// Resolves the operator's bundle, rejects specification errors before
    /// anything is recorded, assigns a reference (caller-supplied or from
    /// the history sequence), executes the enabled steps and appends the
    /// outcome to history, on policy failure as well as on success.
    ///
    /// # Arguments
    ///
    /// * `operator` - The operator to execute against
    /// * `spec` - The assembled transaction specification
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The operator has no registered capability bundle
    /// - The amount is zero or negative (no transaction is recorded)
    pub fn process(
        &self,
        operator: OperatorType,
        mut spec: TransactionSpec,
    ) -> Result<ExecutedTransaction, EngineError> {
        let bundle = self.resolver.resolve(operator)?;
        if spec.amount <= Decimal::ZERO {
            return Err(EngineError::non_positive_amount(spec.amount));
        }

        let reference = match spec.reference.clone() {
            Some(reference) => reference,
            None => {
                let generated = self.history.next_reference();
                spec.reference = Some(generated.clone());
                generated
            }
        };

        let result = self.execute(&spec, &bundle);
        let executed = ExecutedTransaction {
            reference,
            operator,
            spec,
            result,
        };
        self.history.append(executed.clone());
        Ok(executed)
    }

    /// Run the enabled steps of a spec against a capability bundle
    ///
    /// Pure with respect to the engine: no history append happens here.
    /// Returns a result in every case; policy failures are reported
    /// through `success = false`.
    pub fn execute(&self, spec: &TransactionSpec, bundle: &CapabilityBundle) -> TransactionResult {
        let mut outcomes = Vec::new();
        let mut final_amount = spec.amount;

        // 1. Verification (hard)
        if spec.steps.contains(Step::Verification) {
            let verdict = bundle.validator.validate_transaction(
                &spec.source_account,
                spec.amount,
                spec.tx_type,
            );
            outcomes.push(StepOutcome::new(
                "verification",
                verdict.approved,
                verdict.message.clone(),
            ));
            if !verdict.approved {
                return TransactionResult::failed(final_amount, outcomes, verdict.message);
            }
        }

        // 2. Fraud check (hard)
        if spec.steps.contains(Step::FraudCheck) {
            match self.fraud_policy.flag_reason(spec) {
                None => outcomes.push(StepOutcome::new(
                    "fraud_check",
                    true,
                    "no fraud indicators",
                )),
                Some(reason) => {
                    outcomes.push(StepOutcome::new("fraud_check", false, reason.clone()));
                    return TransactionResult::failed(
                        final_amount,
                        outcomes,
                        format!("Fraud check failed: {}", reason),
                    );
                }
            }
        }

        // 3. Currency conversion (hard)
        if spec.steps.contains(Step::CurrencyConversion) {
            let rate = spec.exchange_rate.unwrap_or(Decimal::ZERO);
            if rate <= Decimal::ZERO {
                let detail = format!("invalid exchange rate {}", rate);
                outcomes.push(StepOutcome::new("currency_conversion", false, detail.clone()));
                return TransactionResult::failed(
                    final_amount,
                    outcomes,
                    format!("Currency conversion failed: {}", detail),
                );
            }
            match spec.amount.checked_mul(rate) {
                Some(converted) => {
                    final_amount = converted;
                    outcomes.push(StepOutcome::new(
                        "currency_conversion",
                        true,
                        format!(
                            "{} {} converted to {} {}",
                            spec.amount,
                            spec.currency,
                            final_amount,
                            spec.target_currency.as_deref().unwrap_or("?")
                        ),
                    ));
                }
                None => {
                    let detail = format!("conversion overflow at rate {}", rate);
                    outcomes.push(StepOutcome::new("currency_conversion", false, detail.clone()));
                    return TransactionResult::failed(
                        final_amount,
                        outcomes,
                        format!("Currency conversion failed: {}", detail),
                    );
                }
            }
        }

        // 4. Fee and commission application - always runs
        let mut fee = bundle
            .calculator
            .calculate_transaction_fee(final_amount, spec.tx_type);
        if matches!(
            spec.tx_type,
            TransactionType::TransferInterOperator | TransactionType::TransferInternational
        ) {
            fee += bundle.calculator.calculate_inter_operator_fee(final_amount);
        }
        let total_commission: Decimal = spec
            .commissions
            .iter()
            .map(|commission| commission.amount_on(final_amount))
            .sum();
        outcomes.push(StepOutcome::new(
            "fees",
            true,
            format!(
                "operator fee {}, commissions {}",
                fee, total_commission
            ),
        ));

        // 5. Audit logging (non-critical)
        if spec.steps.contains(Step::Logging) {
            info!(
                operator = bundle.operator.name(),
                tx_type = spec.tx_type.tag(),
                amount = %spec.amount,
                final_amount = %final_amount,
                fee = %fee,
                total_commission = %total_commission,
                reference = spec.reference.as_deref().unwrap_or(""),
                "transaction executed"
            );
            outcomes.push(StepOutcome::new("logging", true, "execution recorded"));
        }

        // 6. Notification (non-critical: a failure never aborts)
        if spec.steps.contains(Step::Notification) {
            let balance = bundle.external.fetch_external_balance(&spec.source_account)
                - final_amount
                - fee
                - total_commission;
            let receipt = bundle.notifier.send_transaction_notification(
                &spec.source_account,
                final_amount,
                balance,
            );
            outcomes.push(StepOutcome::new(
                "notification",
                receipt.delivered,
                receipt.formatted_message,
            ));
        }

        // 7. External dispatch (non-critical): push cross-operator
        // transfers into the destination operator's system
        if matches!(
            spec.tx_type,
            TransactionType::TransferInterOperator | TransactionType::TransferInternational
        ) {
            if let (Some(destination), Some(destination_operator)) = (
                spec.destination_account.as_deref(),
                spec.destination_operator,
            ) {
                if let Ok(destination_bundle) = self.resolver.resolve(destination_operator) {
                    let acknowledgment = destination_bundle.external.execute_external_transfer(
                        destination,
                        final_amount,
                        spec.reference.as_deref().unwrap_or("unassigned"),
                    );
                    outcomes.push(StepOutcome::new(
                        "external_dispatch",
                        acknowledgment.succeeded,
                        acknowledgment.diagnostic,
                    ));
                }
            }
        }

        let currency_label = spec
            .target_currency
            .as_deref()
            .unwrap_or(spec.currency.as_str());
        TransactionResult {
            success: true,
            final_amount,
            fee,
            total_commission,
            step_outcomes: outcomes,
            message: format!(
                "Transaction completed: {} {} (fee {}, commissions {})",
                final_amount, currency_label, fee, total_commission
            ),
        }
    }
}
