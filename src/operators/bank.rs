//! Bank capability family
//!
//! Traditional commercial bank policy: strict account format, the highest
//! deposit floor and per-transaction ceiling of the three families, low
//! percentage fees, progressive savings tiers, EMAIL notifications and an
//! interbank clearing network as the external system.

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

const OPERATOR_NAME: &str = "Bank";
const EXTERNAL_SYSTEM: &str = "Interbank Clearing Network";

/// Minimum client identifier length
const MIN_CLIENT_ID_LEN: usize = 5;

/// Minimum initial deposit for account creation
const MIN_INITIAL_DEPOSIT: Decimal = dec!(50000);

/// Per-transaction amount ceiling
const MAX_TRANSACTION_AMOUNT: Decimal = dec!(10000000);

/// Fee rates per transaction variant
const INTERNAL_TRANSFER_RATE: Decimal = dec!(0.005);
const INTER_OPERATOR_RATE: Decimal = dec!(0.008);
const INTERNATIONAL_RATE: Decimal = dec!(0.01);
const PAYMENT_RATE: Decimal = dec!(0.003);
const WITHDRAWAL_RATE: Decimal = dec!(0.002);

/// Inter-operator routing surcharge rate
const INTER_OPERATOR_SURCHARGE_RATE: Decimal = dec!(0.01);

/// Bank account format: 2 uppercase letters followed by 10 digits
fn is_valid_account(account_number: &str) -> bool {
    let bytes = account_number.as_bytes();
    bytes.len() == 12
        && bytes[..2].iter().all(|b| b.is_ascii_uppercase())
        && bytes[2..].iter().all(|b| b.is_ascii_digit())
}

/// Build the Bank capability bundle
pub fn bundle() -> CapabilityBundle {
    CapabilityBundle {
        operator: OperatorType::Bank,
        validator: Arc::new(BankValidator),
        calculator: Arc::new(BankRates),
        notifier: Arc::new(BankNotifier),
        external: Arc::new(BankGateway::new()),
    }
}

/// Bank account and transaction validation policy
#[derive(Debug, Clone, Copy)]
pub struct BankValidator;

impl AccountValidator for BankValidator {
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
                    "Invalid Bank account number '{}': expected 2 letters followed by 10 digits",
                    account_number
                ),
                OPERATOR_NAME,
            );
        }
        if client_id.len() < MIN_CLIENT_ID_LEN {
            return AccountValidationOutcome::rejected(
                format!(
                    "Client identifier '{}' is too short for Bank (minimum {} characters)",
                    client_id, MIN_CLIENT_ID_LEN
                ),
                OPERATOR_NAME,
            );
        }
        if initial_deposit < MIN_INITIAL_DEPOSIT {
            return AccountValidationOutcome::rejected(
                format!(
                    "Initial deposit {} XOF is below the Bank minimum of {} XOF",
                    initial_deposit, MIN_INITIAL_DEPOSIT
                ),
                OPERATOR_NAME,
            );
        }
        AccountValidationOutcome::approved(
            format!(
                "Bank account {} approved with an initial deposit of {} XOF",
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
                    "Invalid Bank account number '{}': expected 2 letters followed by 10 digits",
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
                    "Amount {} XOF exceeds the Bank per-transaction ceiling of {} XOF",
                    amount, MAX_TRANSACTION_AMOUNT
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

/// Bank fee and rate schedule
#[derive(Debug, Clone, Copy)]
pub struct BankRates;

impl RateCalculator for BankRates {
    fn operator_name(&self) -> &'static str {
        OPERATOR_NAME
    }

    fn calculate_transaction_fee(&self, amount: Decimal, tx_type: TransactionType) -> Decimal {
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
        ceil_fee(amount * INTER_OPERATOR_SURCHARGE_RATE)
    }

    fn calculate_withdrawal_commission(&self, amount: Decimal) -> Decimal {
        ceil_fee(amount * WITHDRAWAL_RATE)
    }

    /// Progressive tiering: larger balances earn the better rate
    fn calculate_savings_interest_rate(&self, balance: Decimal) -> Decimal {
        if balance < dec!(100000) {
            dec!(0.015)
        } else if balance < dec!(1000000) {
            dec!(0.02)
        } else {
            dec!(0.025)
        }
    }
}

/// Bank notification formatting (EMAIL channel)
#[derive(Debug, Clone, Copy)]
pub struct BankNotifier;

impl NotificationModule for BankNotifier {
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
                "[Bank] Transaction of {} XOF on account {}. New balance: {} XOF",
                amount, account_number, balance
            ),
            channel: "EMAIL".to_string(),
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
                "[Bank] Welcome {}, your account {} is now active",
                client_name, account_number
            ),
            channel: "EMAIL".to_string(),
            operator_name: OPERATOR_NAME.to_string(),
        }
    }

    fn send_security_alert(&self, account_number: &str, reason: &str) -> NotificationOutcome {
        NotificationOutcome {
            delivered: true,
            formatted_message: format!(
                "[Bank] Security alert on account {}: {}",
                account_number, reason
            ),
            channel: "EMAIL".to_string(),
            operator_name: OPERATOR_NAME.to_string(),
        }
    }
}

/// Adapter to the interbank clearing network
///
/// Acknowledgment stub: connectivity is a constructor flag and transfer
/// references come from an atomic counter, so every outcome is
/// deterministic under test.
#[derive(Debug)]
pub struct BankGateway {
    online: bool,
    sequence: AtomicU64,
}

impl BankGateway {
    /// Create an online gateway
    pub fn new() -> Self {
        BankGateway {
            online: true,
            sequence: AtomicU64::new(0),
        }
    }

    /// Create a gateway whose connectivity check always fails
    pub fn offline() -> Self {
        BankGateway {
            online: false,
            sequence: AtomicU64::new(0),
        }
    }
}

impl Default for BankGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl ExternalSystemAdapter for BankGateway {
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
                    "Destination account '{}' is not a valid Bank account",
                    destination_account
                ),
            };
        }
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        ExternalTransferOutcome {
            succeeded: true,
            external_reference: Some(format!("ICN-{:06}", sequence)),
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
