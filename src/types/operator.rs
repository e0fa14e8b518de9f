//! Operator types for the Operators Engine
//!
//! This module defines the closed enumeration of supported financial
//! operators. The operator type is the lookup key of the capability
//! resolver; every capability produced for one operator reports the same
//! operator family name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported financial operator families
///
/// Each variant identifies one coherent family of capability
/// implementations (validator, rate calculator, notifier, external
/// adapter). The enumeration is closed: adding an operator means adding a
/// new capability family and registering it with the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorType {
    /// Traditional commercial bank
    Bank,

    /// Mobile-money provider (wallet accounts addressed by phone number)
    MobileMoney,

    /// Microfinance institution
    Microfinance,
}

impl OperatorType {
    /// All operator types, in registration order
    pub const ALL: [OperatorType; 3] = [
        OperatorType::Bank,
        OperatorType::MobileMoney,
        OperatorType::Microfinance,
    ];

    /// Display name of the operator family
    ///
    /// This is the name every member of the operator's capability bundle
    /// reports through its `operator_name()` accessor.
    pub fn name(&self) -> &'static str {
        match self {
            OperatorType::Bank => "Bank",
            OperatorType::MobileMoney => "Mobile Money",
            OperatorType::Microfinance => "Microfinance",
        }
    }
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperatorType {
    type Err = String;

    /// Parse an operator identifier as used in CSV input
    ///
    /// Accepts the snake_case identifiers `bank`, `mobile_money` and
    /// `microfinance`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bank" => Ok(OperatorType::Bank),
            "mobile_money" => Ok(OperatorType::MobileMoney),
            "microfinance" => Ok(OperatorType::Microfinance),
            _ => Err(format!("Unknown operator type: '{}'", s)),
        }
    }
}
