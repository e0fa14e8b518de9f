//! Transaction variant presets
//!
//! Named recipes over the transaction builder: each preset returns a
//! pre-configured [`TransactionBuilder`] so callers can still adjust the
//! assembly before `build()`. Presets add no state or error paths beyond
//! the builder's own.

use crate::core::builder::TransactionBuilder;
use crate::types::{Commission, OperatorType, TransactionType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Named transaction recipes, as accepted in CSV input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipe {
    /// Minimal same-operator transfer: express commission + notification
    QuickTransfer,

    /// Fully-checked same-operator transfer
    FullTransfer,

    /// Cross-operator transfer with interchange commission
    InterOperatorTransfer,

    /// Foreign-currency transfer with conversion
    InternationalTransfer,

    /// Account deposit
    Deposit,

    /// Cash withdrawal
    Withdrawal,

    /// Bill payment against a biller reference
    BillPayment,
}

impl FromStr for Recipe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quick_transfer" => Ok(Recipe::QuickTransfer),
            "full_transfer" => Ok(Recipe::FullTransfer),
            "inter_operator_transfer" => Ok(Recipe::InterOperatorTransfer),
            "international_transfer" => Ok(Recipe::InternationalTransfer),
            "deposit" => Ok(Recipe::Deposit),
            "withdrawal" => Ok(Recipe::Withdrawal),
            "bill_payment" => Ok(Recipe::BillPayment),
            _ => Err(format!("Unknown recipe: '{}'", s)),
        }
    }
}

/// Quick transfer: one flat express commission, notification only
pub fn quick_transfer(source: &str, destination: &str, amount: Decimal) -> TransactionBuilder {
    let mut builder = TransactionBuilder::new();
    builder
        .transaction_type(TransactionType::TransferInternal)
        .from(source)
        .to(destination)
        .amount(amount)
        .with_commission(Commission::flat("express", dec!(500)))
        .with_notification();
    builder
}

/// Full transfer: verification + fraud check + two commissions + logging
/// + notification
pub fn full_transfer(source: &str, destination: &str, amount: Decimal) -> TransactionBuilder {
    let mut builder = TransactionBuilder::new();
    builder
        .transaction_type(TransactionType::TransferInternal)
        .from(source)
        .to(destination)
        .amount(amount)
        .with_verification()
        .with_fraud_check()
        .with_commission(Commission::flat("processing", dec!(1000)))
        .with_commission(Commission::percentage("service", dec!(0.005)))
        .with_logging()
        .with_notification();
    builder
}

/// Inter-operator transfer: fully checked, with a clamped interchange
/// commission and both operators recorded
pub fn inter_operator_transfer(
    source: &str,
    source_operator: OperatorType,
    destination: &str,
    destination_operator: OperatorType,
    amount: Decimal,
) -> TransactionBuilder {
    let mut builder = TransactionBuilder::new();
    builder
        .transaction_type(TransactionType::TransferInterOperator)
        .from(source)
        .from_operator(source_operator)
        .to(destination)
        .to_operator(destination_operator)
        .amount(amount)
        .with_verification()
        .with_fraud_check()
        .with_commission(
            Commission::percentage("interchange", dec!(0.01))
                .with_minimum(dec!(500))
                .with_maximum(dec!(5000)),
        )
        .with_logging()
        .with_notification();
    builder
}

/// International transfer: fully checked, currency conversion plus
/// correspondent and messaging commissions
pub fn international_transfer(
    source: &str,
    destination: &str,
    amount: Decimal,
    target_currency: &str,
    exchange_rate: Decimal,
) -> TransactionBuilder {
    let mut builder = TransactionBuilder::new();
    builder
        .transaction_type(TransactionType::TransferInternational)
        .from(source)
        .to(destination)
        .amount(amount)
        .with_verification()
        .with_fraud_check()
        .with_currency_conversion(target_currency, exchange_rate)
        .with_commission(Commission::percentage("correspondent", dec!(0.015)))
        .with_commission(Commission::flat("messaging", dec!(2500)))
        .with_logging()
        .with_notification();
    builder
}

/// Deposit: verified, logged, notified; no commission
pub fn deposit(account: &str, amount: Decimal) -> TransactionBuilder {
    let mut builder = TransactionBuilder::new();
    builder
        .transaction_type(TransactionType::Deposit)
        .from(account)
        .amount(amount)
        .with_verification()
        .with_logging()
        .with_notification();
    builder
}

/// Withdrawal: fully checked with a clamped cash-out commission
pub fn withdrawal(account: &str, amount: Decimal) -> TransactionBuilder {
    let mut builder = TransactionBuilder::new();
    builder
        .transaction_type(TransactionType::Withdrawal)
        .from(account)
        .amount(amount)
        .with_verification()
        .with_fraud_check()
        .with_commission(Commission::percentage("cash-out", dec!(0.005)).with_minimum(dec!(200)))
        .with_logging()
        .with_notification();
    builder
}

/// Bill payment: verified with a flat biller commission
pub fn bill_payment(
    account: &str,
    biller_reference: &str,
    amount: Decimal,
) -> TransactionBuilder {
    let mut builder = TransactionBuilder::new();
    builder
        .transaction_type(TransactionType::BillPayment)
        .from(account)
        .amount(amount)
        .description(biller_reference)
        .with_verification()
        .with_commission(Commission::flat("biller", dec!(300)))
        .with_logging()
        .with_notification();
    builder
}
