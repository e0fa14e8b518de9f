//! Advisor selection
//!
//! Newly opened accounts are assigned a client advisor. Selection is a
//! pluggable strategy so callers (and tests) control the exact output;
//! the default is a round-robin cycle over a fixed roster.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Pluggable advisor-selection strategy
pub trait AdvisorChooser: Send + Sync {
    /// Name of the advisor to assign next
    fn next_advisor(&self) -> String;
}

/// Deterministic round-robin advisor roster
#[derive(Debug)]
pub struct RoundRobinAdvisors {
    names: Vec<String>,
    cursor: AtomicUsize,
}

impl RoundRobinAdvisors {
    /// Create a roster cycling over the given names
    ///
    /// An empty roster is replaced by the default one.
    pub fn new(names: Vec<String>) -> Self {
        let names = if names.is_empty() {
            Self::default_roster()
        } else {
            names
        };
        RoundRobinAdvisors {
            names,
            cursor: AtomicUsize::new(0),
        }
    }

    fn default_roster() -> Vec<String> {
        ["Aminata Diallo", "Kwame Mensah", "Fatou Ndiaye", "Ibrahim Koné"]
            .into_iter()
            .map(String::from)
            .collect()
    }
}

impl Default for RoundRobinAdvisors {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl AdvisorChooser for RoundRobinAdvisors {
    fn next_advisor(&self) -> String {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.names.len();
        self.names[index].clone()
    }
}
