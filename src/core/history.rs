//! Transaction history
//!
//! Append-only ordered log of executed transactions, keyed by a generated
//! reference string. The history is owned by the calling layer and passed
//! to the engine explicitly (never a process-wide singleton), which keeps
//! the engine testable in isolation.
//!
//! # Concurrency
//!
//! Appends are lock-guarded and the reference sequence is atomic, so the
//! history can be shared across concurrent callers. No ordering is
//! guaranteed across unrelated transactions; each append is atomic.

use crate::types::ExecutedTransaction;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Append-only log of executed transactions
#[derive(Debug, Default)]
pub struct TransactionHistory {
    /// Executed transactions, in append order
    entries: Mutex<Vec<ExecutedTransaction>>,

    /// Monotonic counter backing generated references
    sequence: AtomicU64,
}

impl TransactionHistory {
    /// Create an empty history
    pub fn new() -> Self {
        TransactionHistory::default()
    }

    /// Issue the next generated transaction reference (`TXN-XXXXXXXX`)
    ///
    /// Used for specs that carry no caller-supplied reference. The
    /// sequence is atomic, so references are unique across concurrent
    /// callers.
    pub fn next_reference(&self) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("TXN-{:08}", sequence)
    }

    /// Append an executed transaction
    ///
    /// Every execution is appended, including policy failures: the
    /// history is the audit trail.
    pub fn append(&self, entry: ExecutedTransaction) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.push(entry);
    }

    /// Clone the current entries, in append order
    ///
    /// This is the read-only iterable view consumed by the reporting
    /// subsystem.
    pub fn snapshot(&self) -> Vec<ExecutedTransaction> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Find an executed transaction by its reference
    pub fn find(&self, reference: &str) -> Option<ExecutedTransaction> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|entry| entry.reference == reference)
            .cloned()
    }

    /// Number of executed transactions
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// True when nothing has been executed yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        OperatorType, StepSet, TransactionResult, TransactionSpec, TransactionType,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn entry(reference: &str, amount: Decimal) -> ExecutedTransaction {
        ExecutedTransaction {
            reference: reference.to_string(),
            operator: OperatorType::Bank,
            spec: TransactionSpec {
                tx_type: TransactionType::Deposit,
                source_account: "CI1234567890".to_string(),
                source_operator: Some(OperatorType::Bank),
                destination_account: None,
                destination_operator: None,
                amount,
                currency: "XOF".to_string(),
                target_currency: None,
                exchange_rate: None,
                reference: Some(reference.to_string()),
                description: None,
                commissions: Vec::new(),
                steps: StepSet::empty(),
            },
            result: TransactionResult {
                success: true,
                final_amount: amount,
                fee: Decimal::ZERO,
                total_commission: Decimal::ZERO,
                step_outcomes: Vec::new(),
                message: "ok".to_string(),
            },
        }
    }

    #[test]
    fn test_references_are_sequential() {
        let history = TransactionHistory::new();
        assert_eq!(history.next_reference(), "TXN-00000001");
        assert_eq!(history.next_reference(), "TXN-00000002");
        assert_eq!(history.next_reference(), "TXN-00000003");
    }

    #[test]
    fn test_append_preserves_order() {
        let history = TransactionHistory::new();
        history.append(entry("TXN-A", dec!(100)));
        history.append(entry("TXN-B", dec!(200)));
        history.append(entry("TXN-C", dec!(300)));

        let snapshot = history.snapshot();
        let references: Vec<&str> = snapshot.iter().map(|e| e.reference.as_str()).collect();
        assert_eq!(references, vec!["TXN-A", "TXN-B", "TXN-C"]);
    }

    #[test]
    fn test_find_by_reference() {
        let history = TransactionHistory::new();
        history.append(entry("TXN-A", dec!(100)));
        history.append(entry("TXN-B", dec!(200)));

        let found = history.find("TXN-B").unwrap();
        assert_eq!(found.spec.amount, dec!(200));
        assert!(history.find("TXN-Z").is_none());
    }

    #[test]
    fn test_len_and_is_empty() {
        let history = TransactionHistory::new();
        assert!(history.is_empty());
        history.append(entry("TXN-A", dec!(100)));
        assert_eq!(history.len(), 1);
        assert!(!history.is_empty());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let history = TransactionHistory::new();
        history.append(entry("TXN-A", dec!(100)));

        let snapshot = history.snapshot();
        history.append(entry("TXN-B", dec!(200)));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_concurrent_appends_are_all_recorded() {
        use std::sync::Arc;
        use std::thread;

        let history = Arc::new(TransactionHistory::new());
        let mut handles = Vec::new();
        for worker in 0..4 {
            let history = Arc::clone(&history);
            handles.push(thread::spawn(move || {
                for i in 0..25 {
                    let reference = format!("TXN-{}-{}", worker, i);
                    history.append(entry(&reference, dec!(10)));
                }
            }));
        }
        for handle in handles {
            handle.join().expect("worker panicked");
        }
        assert_eq!(history.len(), 100);
    }
}
