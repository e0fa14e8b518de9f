//! Account onboarding
//!
//! Drives the operator validator's account-creation policy and, on
//! approval, assigns a client advisor and formats the welcome
//! notification. The advisor chooser is injected so the assignment is
//! deterministic under test.

use crate::core::advisor::AdvisorChooser;
use crate::core::resolver::CapabilityResolver;
use crate::types::{AccountValidationOutcome, EngineError, NotificationOutcome, OperatorType};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Outcome of an account-opening request
#[derive(Debug, Clone, PartialEq)]
pub struct AccountOpening {
    /// The validator's verdict
    pub validation: AccountValidationOutcome,

    /// Welcome notification, present only when validation approved
    pub welcome: Option<NotificationOutcome>,

    /// Assigned advisor, present only when validation approved
    pub advisor: Option<String>,
}

impl AccountOpening {
    /// True when the account was opened
    pub fn opened(&self) -> bool {
        self.validation.approved
    }
}

/// Account-opening service over the capability resolver
pub struct AccountOnboarding {
    resolver: Arc<CapabilityResolver>,
    advisors: Arc<dyn AdvisorChooser>,
}

impl AccountOnboarding {
    /// Create an onboarding service
    ///
    /// # Arguments
    ///
    /// * `resolver` - The operator capability registry
    /// * `advisors` - The advisor-selection strategy
    pub fn new(resolver: Arc<CapabilityResolver>, advisors: Arc<dyn AdvisorChooser>) -> Self {
        AccountOnboarding { resolver, advisors }
    }

    /// Open an account with the given operator
    ///
    /// Validation failure is a policy outcome, not an error: the returned
    /// opening carries the rejection with no advisor and no welcome
    /// notification.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperator` if the operator has no registered
    /// capability bundle.
    pub fn open_account(
        &self,
        operator: OperatorType,
        account_number: &str,
        client_id: &str,
        client_name: &str,
        initial_deposit: Decimal,
    ) -> Result<AccountOpening, EngineError> {
        let bundle = self.resolver.resolve(operator)?;
        let validation =
            bundle
                .validator
                .validate_account_creation(account_number, client_id, initial_deposit);

        if !validation.approved {
            return Ok(AccountOpening {
                validation,
                welcome: None,
                advisor: None,
            });
        }

        let advisor = self.advisors.next_advisor();
        let welcome = bundle
            .notifier
            .send_welcome_notification(account_number, client_name);

        Ok(AccountOpening {
            validation,
            welcome: Some(welcome),
            advisor: Some(advisor),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::advisor::RoundRobinAdvisors;
    use rust_decimal_macros::dec;

    fn onboarding() -> AccountOnboarding {
        AccountOnboarding::new(
            Arc::new(CapabilityResolver::with_builtin_operators()),
            Arc::new(RoundRobinAdvisors::new(vec![
                "First Advisor".to_string(),
                "Second Advisor".to_string(),
            ])),
        )
    }

    #[test]
    fn test_successful_opening_assigns_advisor_and_welcome() {
        let service = onboarding();
        let opening = service
            .open_account(
                OperatorType::Bank,
                "CI1234567890",
                "CLT-001",
                "Awa Traoré",
                dec!(75000),
            )
            .unwrap();

        assert!(opening.opened());
        assert_eq!(opening.advisor.as_deref(), Some("First Advisor"));
        let welcome = opening.welcome.unwrap();
        assert!(welcome.delivered);
        assert!(welcome.formatted_message.contains("Awa Traoré"));
        assert_eq!(welcome.operator_name, "Bank");
    }

    #[test]
    fn test_advisor_assignment_is_deterministic_round_robin() {
        let service = onboarding();
        let first = service
            .open_account(
                OperatorType::MobileMoney,
                "0712345678",
                "C-42",
                "Kofi",
                dec!(1000),
            )
            .unwrap();
        let second = service
            .open_account(
                OperatorType::MobileMoney,
                "0712345679",
                "C-43",
                "Esi",
                dec!(1000),
            )
            .unwrap();
        let third = service
            .open_account(
                OperatorType::MobileMoney,
                "0712345670",
                "C-44",
                "Yaw",
                dec!(1000),
            )
            .unwrap();

        assert_eq!(first.advisor.as_deref(), Some("First Advisor"));
        assert_eq!(second.advisor.as_deref(), Some("Second Advisor"));
        assert_eq!(third.advisor.as_deref(), Some("First Advisor"));
    }

    #[test]
    fn test_rejected_opening_has_no_advisor_or_welcome() {
        let service = onboarding();
        let opening = service
            .open_account(
                OperatorType::Microfinance,
                "MF12345678",
                "CLT1",
                "Adama",
                dec!(100), // below the Microfinance floor
            )
            .unwrap();

        assert!(!opening.opened());
        assert!(opening.advisor.is_none());
        assert!(opening.welcome.is_none());
        assert!(opening.validation.message.contains("below the Microfinance minimum"));
    }

    #[test]
    fn test_unsupported_operator_is_an_error() {
        use crate::operators::bank;
        let service = AccountOnboarding::new(
            Arc::new(CapabilityResolver::new([bank::bundle()]).unwrap()),
            Arc::new(RoundRobinAdvisors::default()),
        );
        let result = service.open_account(
            OperatorType::Microfinance,
            "MF12345678",
            "CLT1",
            "Adama",
            dec!(10000),
        );
        assert_eq!(
            result.unwrap_err(),
            EngineError::UnsupportedOperator {
                operator: OperatorType::Microfinance
            }
        );
    }
}
