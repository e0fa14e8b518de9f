//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `money`: commission values and fee rounding
//! - `operator`: the closed operator enumeration
//! - `transaction`: transaction variants, step sets, specs and results
//! - `outcome`: capability outcome records
//! - `error`: error types for the engine

pub mod error;
pub mod money;
pub mod operator;
pub mod outcome;
pub mod transaction;

pub use error::EngineError;
pub use money::{ceil_fee, Commission, CommissionKind};
pub use operator::OperatorType;
pub use outcome::{
    simulated_balance, AccountValidationOutcome, ExternalTransferOutcome, NotificationOutcome,
    SyncOutcome,
};
pub use transaction::{
    ExecutedTransaction, Step, StepOutcome, StepSet, TransactionResult, TransactionSpec,
    TransactionType,
};
