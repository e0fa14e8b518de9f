//! Microfinance capability family
//!
//! Social-mission policy: a fee waiver below the 10,000 XOF threshold, a
//! low deposit floor, a 1,000,000 XOF per-transaction ceiling with an
//! advisory (not a failure) on large withdrawals, and a *degressive*
//! savings schedule: small balances earn the higher rate. The degressive
//! slope is deliberate social-equity policy, the opposite of typical
//! banking tiering.

use crate::operators::{
    AccountValidator, CapabilityBundle, ExternalSystemAdapter, NotificationModule, RateCalculator,
};
use crate::types::{
    ceil_fee, simulated_balance, AccountValidationOutcome, ExternalTransferOutcome,
    NotificationOutcome, OperatorType, SyncOutcome, TransactionSpec, TransactionType,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const OPERATOR_NAME: &str = "Microfinance";
const EXTERNAL_SYSTEM: &str = "Microfinance Switch";

const MIN_CLIENT_ID_LEN: usize = 4;
const MIN_INITIAL_DEPOSIT: Decimal = dec!(5000);
const MAX_TRANSACTION_AMOUNT: Decimal = dec!(1000000);

/// No fee is charged at or below this amount (social-mission waiver)
const FREE_FEE_THRESHOLD: Decimal = dec!(10000);

/// Withdrawals above this amount get a non-failing advisory
const LARGE_WITHDRAWAL_ADVISORY: Decimal = dec!(200000);

const INTERNAL_TRANSFER_RATE: Decimal = dec!(0.01);
const INTER_OPERATOR_RATE: Decimal = dec!(0.015);
const INTERNATIONAL_RATE: Decimal = dec!(0.02);
const PAYMENT_RATE: Decimal = dec!(0.01);
const WITHDRAWAL_RATE: Decimal = dec!(0.005);
const INTER_OPERATOR_SURCHARGE_RATE: Decimal = dec!(0.015);

/// Microfinance account format: "MF" followed by 8 digits
fn is_valid_account(account_number: &str) -> bool {
    let bytes = account_number.as_bytes();
    bytes.len() == 10
        && account_number.starts_with("MF")
        && bytes[2..].iter().all(|b| b.is_ascii_digit())
}

/// Build the Microfinance capability bundle
pub fn bundle() -> CapabilityBundle {
    CapabilityBundle {
        operator: OperatorType::Microfinance,
        validator: Arc::new(MicrofinanceValidator),
        calculator: Arc::new(MicrofinanceRates),
        notifier: Arc::new(MicrofinanceNotifier),
        external: Arc::new(MicrofinanceSwitch::new()),
    }
}

/// Microfinance account and transaction validation policy
#[derive(Debug, Clone, Copy)]
pub struct MicrofinanceValidator;

impl AccountValidator for MicrofinanceValidator {
    fn operator_name(&self) -> &'static str {
        OPERATOR_NAME
    }

    fn validate_account_creation(
        &self,
        account_number: &str,
        client_id: &str,
        initial_deposit: Decimal,
    ) -> AccountValidationOutcome {
        if !is_valid_account(account_number) {
            return AccountValidationOutcome::rejected(
                format!(
                    "Invalid Microfinance account number '{}': expected MF followed by 8 digits",
                    account_number
                ),
                OPERATOR_NAME,
            );
        }
        if client_id.len() < MIN_CLIENT_ID_LEN {
            return AccountValidationOutcome::rejected(
                format!(
                    "Client identifier '{}' is too short for Microfinance (minimum {} characters)",
                    client_id, MIN_CLIENT_ID_LEN
                ),
                OPERATOR_NAME,
            );
        }
        if initial_deposit < MIN_INITIAL_DEPOSIT {
            return AccountValidationOutcome::rejected(
                format!(
                    "Initial deposit {} XOF is below the Microfinance minimum of {} XOF",
                    initial_deposit, MIN_INITIAL_DEPOSIT
                ),
                OPERATOR_NAME,
            );
        }
        AccountValidationOutcome::approved(
            format!(
                "Microfinance account {} approved with an initial deposit of {} XOF",
                account_number, initial_deposit
            ),
            OPERATOR_NAME,
        )
    }

    fn validate_transaction(
        &self,
        account_number: &str,
        amount: Decimal,
        tx_type: TransactionType,
    ) -> AccountValidationOutcome {
        if !is_valid_account(account_number) {
            return AccountValidationOutcome::rejected(
                format!(
                    "Invalid Microfinance account number '{}': expected MF followed by 8 digits",
                    account_number
                ),
                OPERATOR_NAME,
            );
        }
        if amount <= Decimal::ZERO {
            return AccountValidationOutcome::rejected(
                format!("Transaction amount must be positive, got {}", amount),
                OPERATOR_NAME,
            );
        }
        if amount > MAX_TRANSACTION_AMOUNT {
            return AccountValidationOutcome::rejected(
                format!(
                    "Amount {} XOF exceeds the Microfinance per-transaction ceiling of {} XOF",
                    amount, MAX_TRANSACTION_AMOUNT
                ),
                OPERATOR_NAME,
            );
        }
        // Large withdrawals are approved with an advisory, never rejected
        if tx_type == TransactionType::Withdrawal && amount > LARGE_WITHDRAWAL_ADVISORY {
            return AccountValidationOutcome::approved(
                format!(
                    "withdrawal of {} XOF approved on account {} (advisory: amount above {} XOF, \
                     consider a scheduled disbursement)",
                    amount, account_number, LARGE_WITHDRAWAL_ADVISORY
                ),
                OPERATOR_NAME,
            );
        }
        AccountValidationOutcome::approved(
            format!(
                "{} of {} XOF approved on account {}",
                tx_type.tag(),
                amount,
                account_number
            ),
            OPERATOR_NAME,
        )
    }
}

/// Microfinance fee schedule with the social-mission waiver
#[derive(Debug, Clone, Copy)]
pub struct MicrofinanceRates;

impl RateCalculator for MicrofinanceRates {
    fn operator_name(&self) -> &'static str {
        OPERATOR_NAME
    }

    fn calculate_transaction_fee(&self, amount: Decimal, tx_type: TransactionType) -> Decimal {
        if amount <= FREE_FEE_THRESHOLD {
            return Decimal::ZERO;
        }
        match tx_type {
            TransactionType::Deposit => Decimal::ZERO,
            TransactionType::Withdrawal => self.calculate_withdrawal_commission(amount),
            TransactionType::TransferInternal => ceil_fee(amount * INTERNAL_TRANSFER_RATE),
            TransactionType::TransferInterOperator => ceil_fee(amount * INTER_OPERATOR_RATE),
            TransactionType::TransferInternational => ceil_fee(amount * INTERNATIONAL_RATE),
            TransactionType::Payment | TransactionType::BillPayment => {
                ceil_fee(amount * PAYMENT_RATE)
            }
        }
    }

    fn calculate_inter_operator_fee(&self, amount: Decimal) -> Decimal {
        if amount <= FREE_FEE_THRESHOLD {
            return Decimal::ZERO;
        }
        ceil_fee(amount * INTER_OPERATOR_SURCHARGE_RATE)
    }

    fn calculate_withdrawal_commission(&self, amount: Decimal) -> Decimal {
        if amount <= FREE_FEE_THRESHOLD {
            return Decimal::ZERO;
        }
        ceil_fee(amount * WITHDRAWAL_RATE)
    }

    /// Degressive tiering: small balances earn the higher rate.
    ///
    /// The slope is intentional social-equity policy; it must not be
    /// "corrected" to the usual progressive direction.
    fn calculate_savings_interest_rate(&self, balance: Decimal) -> Decimal {
        if balance < dec!(100000) {
            dec!(0.05)
        } else if balance < dec!(500000) {
            dec!(0.04)
        } else {
            dec!(0.03)
        }
    }
}

/// Microfinance notification formatting (SMS channel)
#[derive(Debug, Clone, Copy)]
pub struct MicrofinanceNotifier;

impl NotificationModule for MicrofinanceNotifier {
    fn operator_name(&self) -> &'static str {
        OPERATOR_NAME
    }

    fn send_transaction_notification(
        &self,
        account_number: &str,
        amount: Decimal,
        balance: Decimal,
    ) -> NotificationOutcome {
        NotificationOutcome {
            delivered: true,
            formatted_message: format!(
                "[Microfinance] Movement of {} XOF on account {}. Balance: {} XOF",
                amount, account_number, balance
            ),
            channel: "SMS".to_string(),
            operator_name: OPERATOR_NAME.to_string(),
        }
    }

    fn send_welcome_notification(
        &self,
        account_number: &str,
        client_name: &str,
    ) -> NotificationOutcome {
        NotificationOutcome {
            delivered: true,
            formatted_message: format!(
                "[Microfinance] Welcome {}, account {} has been opened",
                client_name, account_number
            ),
            channel: "SMS".to_string(),
            operator_name: OPERATOR_NAME.to_string(),
        }
    }

    fn send_security_alert(&self, account_number: &str, reason: &str) -> NotificationOutcome {
        NotificationOutcome {
            delivered: true,
            formatted_message: format!(
                "[Microfinance] Security alert on account {}: {}",
                account_number, reason
            ),
            channel: "SMS".to_string(),
            operator_name: OPERATOR_NAME.to_string(),
        }
    }
}

/// Adapter to the microfinance interbank switch
#[derive(Debug)]
pub struct MicrofinanceSwitch {
    online: bool,
    sequence: AtomicU64,
}

impl MicrofinanceSwitch {
    /// Create an online switch adapter
    pub fn new() -> Self {
        MicrofinanceSwitch {
            online: true,
            sequence: AtomicU64::new(0),
        }
    }

    /// Create a switch adapter whose connectivity check always fails
    pub fn offline() -> Self {
        MicrofinanceSwitch {
            online: false,
            sequence: AtomicU64::new(0),
        }
    }
}

impl Default for MicrofinanceSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl ExternalSystemAdapter for MicrofinanceSwitch {
    fn operator_name(&self) -> &'static str {
        OPERATOR_NAME
    }

    fn system_name(&self) -> &'static str {
        EXTERNAL_SYSTEM
    }

    fn check_connectivity(&self) -> bool {
        self.online
    }

    fn execute_external_transfer(
        &self,
        destination_account: &str,
        amount: Decimal,
        reference: &str,
    ) -> ExternalTransferOutcome {
        if !self.check_connectivity() {
            return ExternalTransferOutcome {
                succeeded: false,
                external_reference: None,
                system_name: EXTERNAL_SYSTEM.to_string(),
                diagnostic: format!("{} is unreachable", EXTERNAL_SYSTEM),
            };
        }
        if !is_valid_account(destination_account) {
            return ExternalTransferOutcome {
                succeeded: false,
                external_reference: None,
                system_name: EXTERNAL_SYSTEM.to_string(),
                diagnostic: format!(
                    "Destination '{}' is not a valid Microfinance account",
                    destination_account
                ),
            };
        }
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        ExternalTransferOutcome {
            succeeded: true,
            external_reference: Some(format!("MFS-{:06}", sequence)),
            system_name: EXTERNAL_SYSTEM.to_string(),
            diagnostic: format!(
                "Transfer of {} XOF to {} acknowledged ({})",
                amount, destination_account, reference
            ),
        }
    }

    fn fetch_external_balance(&self, account_number: &str) -> Decimal {
        simulated_balance(account_number)
    }

    fn synchronize(&self, records: &[TransactionSpec]) -> SyncOutcome {
        if !self.check_connectivity() {
            return SyncOutcome {
                succeeded: false,
                synced_records: 0,
                system_name: EXTERNAL_SYSTEM.to_string(),
                diagnostic: format!("{} is unreachable", EXTERNAL_SYSTEM),
            };
        }
        SyncOutcome {
            succeeded: true,
            synced_records: records.len(),
            system_name: EXTERNAL_SYSTEM.to_string(),
            diagnostic: format!("{} records acknowledged", records.len()),
        }
    }
}
