//! Money primitives for the Operators Engine
//!
//! This module defines commission values attached to transactions and the
//! fee-rounding rule shared by all operator rate calculators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Round an operator fee up to the next whole currency unit
///
/// Fee rounding is always ceiling, never floor or nearest, so partial
/// currency units are never under-collected.
///
/// # Arguments
///
/// * `amount` - The raw (possibly fractional) fee amount
///
/// # Returns
///
/// The fee rounded up to an integral number of currency units
pub fn ceil_fee(amount: Decimal) -> Decimal {
    amount.ceil()
}

/// How a commission derives its charge from the transaction amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionKind {
    /// Charge is `value * amount`, optionally clamped to minimum/maximum
    Percentage,

    /// Charge is `value`, taken as-is
    Flat,
}

/// A commission attached to a transaction at assembly time
///
/// Multiple commissions may apply to one transaction; the builder preserves
/// their insertion order and execution sums their charges. Percentage
/// commissions are computed on the post-conversion amount and clamped to
/// their optional minimum/maximum; flat commissions are added as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commission {
    /// Human-readable commission label (e.g. "interchange")
    pub label: String,

    /// Percentage or flat
    pub kind: CommissionKind,

    /// Rate (as a fraction, e.g. 0.05 for 5%) or flat amount
    pub value: Decimal,

    /// Lower clamp for percentage commissions
    pub minimum: Option<Decimal>,

    /// Upper clamp for percentage commissions
    pub maximum: Option<Decimal>,
}

impl Commission {
    /// Create a percentage commission with no clamps
    ///
    /// # Arguments
    ///
    /// * `label` - Commission label for reporting
    /// * `rate` - Fraction of the transaction amount (0.05 = 5%)
    pub fn percentage(label: &str, rate: Decimal) -> Self {
        Commission {
            label: label.to_string(),
            kind: CommissionKind::Percentage,
            value: rate,
            minimum: None,
            maximum: None,
        }
    }

    /// Create a flat commission
    ///
    /// # Arguments
    ///
    /// * `label` - Commission label for reporting
    /// * `amount` - Flat charge in currency units
    pub fn flat(label: &str, amount: Decimal) -> Self {
        Commission {
            label: label.to_string(),
            kind: CommissionKind::Flat,
            value: amount,
            minimum: None,
            maximum: None,
        }
    }

    /// Set the lower clamp (percentage commissions only)
    pub fn with_minimum(mut self, minimum: Decimal) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set the upper clamp (percentage commissions only)
    pub fn with_maximum(mut self, maximum: Decimal) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Compute the charge of this commission on a base amount
    ///
    /// Percentage commissions multiply the base by the rate and apply the
    /// optional minimum/maximum clamps. Flat commissions ignore the base.
    ///
    /// # Arguments
    ///
    /// * `base` - The post-conversion transaction amount
    ///
    /// # Returns
    ///
    /// The charge in currency units
    pub fn amount_on(&self, base: Decimal) -> Decimal {
        match self.kind {
            CommissionKind::Flat => self.value,
            CommissionKind::Percentage => {
                let mut charge = base * self.value;
                if let Some(minimum) = self.minimum {
                    charge = charge.max(minimum);
                }
                if let Some(maximum) = self.maximum {
                    charge = charge.min(maximum);
                }
                charge
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::whole_amount_unchanged(dec!(500), dec!(500))]
    #[case::fraction_rounds_up(dec!(500.01), dec!(501))]
    #[case::half_rounds_up(dec!(42.5), dec!(43))]
    #[case::near_next_unit(dec!(99.999), dec!(100))]
    #[case::zero(dec!(0), dec!(0))]
    fn test_ceil_fee(#[case] raw: Decimal, #[case] expected: Decimal) {
        assert_eq!(ceil_fee(raw), expected);
    }

    #[test]
    fn test_flat_commission_ignores_base() {
        let commission = Commission::flat("express", dec!(500));
        assert_eq!(commission.amount_on(dec!(100000)), dec!(500));
        assert_eq!(commission.amount_on(dec!(1)), dec!(500));
    }

    #[rstest]
    #[case::unclamped(dec!(100000), None, None, dec!(5000))]
    #[case::minimum_applies(dec!(1000), Some(dec!(200)), None, dec!(200))]
    #[case::minimum_not_binding(dec!(100000), Some(dec!(200)), None, dec!(5000))]
    #[case::maximum_applies(dec!(1000000), None, Some(dec!(10000)), dec!(10000))]
    #[case::maximum_not_binding(dec!(100000), None, Some(dec!(10000)), dec!(5000))]
    fn test_percentage_commission_clamping(
        #[case] base: Decimal,
        #[case] minimum: Option<Decimal>,
        #[case] maximum: Option<Decimal>,
        #[case] expected: Decimal,
    ) {
        let mut commission = Commission::percentage("service", dec!(0.05));
        commission.minimum = minimum;
        commission.maximum = maximum;
        assert_eq!(commission.amount_on(base), expected);
    }

    #[test]
    fn test_commission_builder_style_clamps() {
        let commission = Commission::percentage("interchange", dec!(0.01))
            .with_minimum(dec!(500))
            .with_maximum(dec!(5000));
        assert_eq!(commission.minimum, Some(dec!(500)));
        assert_eq!(commission.maximum, Some(dec!(5000)));
        assert_eq!(commission.amount_on(dec!(10000)), dec!(500));
        assert_eq!(commission.amount_on(dec!(2000000)), dec!(5000));
    }
}
