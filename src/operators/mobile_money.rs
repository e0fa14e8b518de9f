//! Mobile-money capability family
//!
//! Wallet accounts are addressed by phone number, the entry barrier is the
//! lowest of the three families (small minimum deposit, short client
//! identifiers), fees are the highest, the savings rate is flat, and
//! notifications go out over SMS through a wallet hub.

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

const OPERATOR_NAME: &str = "Mobile Money";
const EXTERNAL_SYSTEM: &str = "Mobile Wallet Hub";

const MIN_CLIENT_ID_LEN: usize = 4;
const MIN_INITIAL_DEPOSIT: Decimal = dec!(500);
const MAX_TRANSACTION_AMOUNT: Decimal = dec!(2000000);

const INTERNAL_TRANSFER_RATE: Decimal = dec!(0.01);
const INTER_OPERATOR_RATE: Decimal = dec!(0.015);
const INTERNATIONAL_RATE: Decimal = dec!(0.02);
const PAYMENT_RATE: Decimal = dec!(0.01);
const WITHDRAWAL_RATE: Decimal = dec!(0.01);
const INTER_OPERATOR_SURCHARGE_RATE: Decimal = dec!(0.02);

/// Flat savings rate; the wallet product has no balance tiers
const SAVINGS_RATE: Decimal = dec!(0.02);

/// Wallet number format: 10 digits starting with the 07 mobile prefix
fn is_valid_account(account_number: &str) -> bool {
    let bytes = account_number.as_bytes();
    bytes.len() == 10
        && account_number.starts_with("07")
        && bytes.iter().all(|b| b.is_ascii_digit())
}

/// Build the Mobile Money capability bundle
pub fn bundle() -> CapabilityBundle {
    CapabilityBundle {
        operator: OperatorType::MobileMoney,
        validator: Arc::new(MobileMoneyValidator),
        calculator: Arc::new(MobileMoneyRates),
        notifier: Arc::new(MobileMoneyNotifier),
        external: Arc::new(MobileWalletHub::new()),
    }
}

/// Mobile-money account and transaction validation policy
#[derive(Debug, Clone, Copy)]
pub struct MobileMoneyValidator;

impl AccountValidator for MobileMoneyValidator {
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
                    "Invalid Mobile Money wallet number '{}': expected 10 digits starting with 07",
                    account_number
                ),
                OPERATOR_NAME,
            );
        }
        if client_id.len() < MIN_CLIENT_ID_LEN {
            return AccountValidationOutcome::rejected(
                format!(
                    "Client identifier '{}' is too short for Mobile Money (minimum {} characters)",
                    client_id, MIN_CLIENT_ID_LEN
                ),
                OPERATOR_NAME,
            );
        }
        if initial_deposit < MIN_INITIAL_DEPOSIT {
            return AccountValidationOutcome::rejected(
                format!(
                    "Initial deposit {} XOF is below the Mobile Money minimum of {} XOF",
                    initial_deposit, MIN_INITIAL_DEPOSIT
                ),
                OPERATOR_NAME,
            );
        }
        AccountValidationOutcome::approved(
            format!(
                "Mobile Money wallet {} approved with an initial deposit of {} XOF",
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
                    "Invalid Mobile Money wallet number '{}': expected 10 digits starting with 07",
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
                    "Amount {} XOF exceeds the Mobile Money per-transaction ceiling of {} XOF",
                    amount, MAX_TRANSACTION_AMOUNT
                ),
                OPERATOR_NAME,
            );
        }
        AccountValidationOutcome::approved(
            format!(
                "{} of {} XOF approved on wallet {}",
                tx_type.tag(),
                amount,
                account_number
            ),
            OPERATOR_NAME,
        )
    }
}

/// Mobile-money fee schedule
#[derive(Debug, Clone, Copy)]
pub struct MobileMoneyRates;

impl RateCalculator for MobileMoneyRates {
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

    fn calculate_savings_interest_rate(&self, _balance: Decimal) -> Decimal {
        SAVINGS_RATE
    }
}

/// Mobile-money notification formatting (SMS channel)
#[derive(Debug, Clone, Copy)]
pub struct MobileMoneyNotifier;

impl NotificationModule for MobileMoneyNotifier {
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
                "[Mobile Money] {} XOF moved on wallet {}. Balance: {} XOF",
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
                "[Mobile Money] Hello {}, wallet {} is ready to use",
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
                "[Mobile Money] Security alert on wallet {}: {}",
                account_number, reason
            ),
            channel: "SMS".to_string(),
            operator_name: OPERATOR_NAME.to_string(),
        }
    }
}

/// Adapter to the mobile wallet interoperability hub
#[derive(Debug)]
pub struct MobileWalletHub {
    online: bool,
    sequence: AtomicU64,
}

impl MobileWalletHub {
    /// Create an online hub adapter
    pub fn new() -> Self {
        MobileWalletHub {
            online: true,
            sequence: AtomicU64::new(0),
        }
    }

    /// Create a hub adapter whose connectivity check always fails
    pub fn offline() -> Self {
        MobileWalletHub {
            online: false,
            sequence: AtomicU64::new(0),
        }
    }
}

impl Default for MobileWalletHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ExternalSystemAdapter for MobileWalletHub {
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
                    "Destination '{}' is not a valid Mobile Money wallet",
                    destination_account
                ),
            };
        }
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        ExternalTransferOutcome {
            succeeded: true,
            external_reference: Some(format!("MWH-{:06}", sequence)),
            system_name: EXTERNAL_SYSTEM.to_string(),
            diagnostic: format!(
                "Transfer of {} XOF to wallet {} acknowledged ({})",
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
