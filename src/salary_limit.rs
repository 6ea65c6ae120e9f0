//! Salary matching limits for simultaneous trades.
//!
//! A team sending out `outgoing` in first-season salary may take back at most
//! the limit computed here. Non-tax-paying teams get a three-bracket schedule:
//!
//! | outgoing                 | limit                        |
//! |--------------------------|------------------------------|
//! | `[0, 6,533,333)`         | 175% of outgoing + 100,000   |
//! | `[6,533,333, 19,600,000)`| outgoing + 5,000,000         |
//! | `19,600,000` and above   | 125% of outgoing + 100,000   |
//!
//! Tax-paying teams always use 125% + 100,000. All bounds come from
//! [`MatchingRules`] so a new CBA only touches config.

use crate::config::{pct, MatchingRules};
use crate::types::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitBracket {
    Low,
    Middle,
    High,
    TaxPayer,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LimitError {
    #[error("outgoing salary total {0} is negative")]
    NegativeTotal(Money),
}

/// Bracket a non-tax-paying team's outgoing total falls in. Both bounds are
/// half-open, so exactly 19,600,000 is in the high bracket.
pub fn non_tax_payer_bracket(
    outgoing_total: Money,
    rules: &MatchingRules,
) -> Result<LimitBracket, LimitError> {
    if outgoing_total.is_negative() {
        return Err(LimitError::NegativeTotal(outgoing_total));
    }

    let bracket = if outgoing_total < Money::from_whole(rules.low_bracket_max) {
        LimitBracket::Low
    } else if outgoing_total < Money::from_whole(rules.middle_bracket_max) {
        LimitBracket::Middle
    } else {
        LimitBracket::High
    };
    Ok(bracket)
}

pub fn non_tax_payer_limit(outgoing_total: Money, rules: &MatchingRules) -> Result<Money, LimitError> {
    let limit = match non_tax_payer_bracket(outgoing_total, rules)? {
        LimitBracket::Low => outgoing_total
            .mul(pct(rules.low_bracket_pct))
            .add(Money::from_whole(rules.low_bracket_cushion)),
        LimitBracket::Middle => outgoing_total.add(Money::from_whole(rules.middle_bracket_addition)),
        LimitBracket::High | LimitBracket::TaxPayer => outgoing_total
            .mul(pct(rules.high_bracket_pct))
            .add(Money::from_whole(rules.high_bracket_cushion)),
    };
    Ok(limit)
}

pub fn tax_payer_limit(outgoing_total: Money, rules: &MatchingRules) -> Result<Money, LimitError> {
    if outgoing_total.is_negative() {
        return Err(LimitError::NegativeTotal(outgoing_total));
    }
    Ok(outgoing_total
        .mul(pct(rules.tax_payer_pct))
        .add(Money::from_whole(rules.tax_payer_cushion)))
}

/// Picks the schedule by the team's own pre-trade tax status.
pub fn salary_limit(
    outgoing_total: Money,
    tax_paying: bool,
    rules: &MatchingRules,
) -> Result<Money, LimitError> {
    if tax_paying {
        tax_payer_limit(outgoing_total, rules)
    } else {
        non_tax_payer_limit(outgoing_total, rules)
    }
}

pub fn bracket_for(
    outgoing_total: Money,
    tax_paying: bool,
    rules: &MatchingRules,
) -> Result<LimitBracket, LimitError> {
    if tax_paying {
        if outgoing_total.is_negative() {
            return Err(LimitError::NegativeTotal(outgoing_total));
        }
        Ok(LimitBracket::TaxPayer)
    } else {
        non_tax_payer_bracket(outgoing_total, rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rules() -> MatchingRules {
        MatchingRules::default()
    }

    fn m(amount: i64) -> Money {
        Money::from_whole(amount)
    }

    #[test]
    fn low_bracket() {
        // 5M * 1.75 + 100k
        assert_eq!(non_tax_payer_limit(m(5_000_000), &rules()).unwrap(), m(8_850_000));
        assert_eq!(non_tax_payer_limit(m(0), &rules()).unwrap(), m(100_000));
    }

    #[test]
    fn low_bracket_keeps_cents() {
        let limit = non_tax_payer_limit(m(6_533_332), &rules()).unwrap();
        assert_eq!(limit.value(), dec!(11533331.00));
        let limit = non_tax_payer_limit(m(1_000_001), &rules()).unwrap();
        assert_eq!(limit.value(), dec!(1850001.75));
    }

    #[test]
    fn middle_bracket_starts_at_lower_bound() {
        assert_eq!(
            non_tax_payer_bracket(m(6_533_333), &rules()).unwrap(),
            LimitBracket::Middle
        );
        assert_eq!(non_tax_payer_limit(m(6_533_333), &rules()).unwrap(), m(11_533_333));
        assert_eq!(non_tax_payer_limit(m(19_599_999), &rules()).unwrap(), m(24_599_999));
    }

    #[test]
    fn exact_upper_bound_is_high_bracket() {
        assert_eq!(
            non_tax_payer_bracket(m(19_600_000), &rules()).unwrap(),
            LimitBracket::High
        );
        // 19.6M * 1.25 + 100k
        assert_eq!(non_tax_payer_limit(m(19_600_000), &rules()).unwrap(), m(24_600_000));
    }

    #[test]
    fn high_bracket() {
        assert_eq!(non_tax_payer_limit(m(20_000_000), &rules()).unwrap(), m(25_100_000));
    }

    #[test]
    fn tax_payer_ignores_brackets() {
        assert_eq!(tax_payer_limit(m(5_000_000), &rules()).unwrap(), m(6_350_000));
        assert_eq!(tax_payer_limit(m(20_000_000), &rules()).unwrap(), m(25_100_000));
        assert_eq!(
            bracket_for(m(5_000_000), true, &rules()).unwrap(),
            LimitBracket::TaxPayer
        );
    }

    #[test]
    fn negative_total_is_an_error() {
        assert_eq!(
            non_tax_payer_limit(m(-1), &rules()),
            Err(LimitError::NegativeTotal(m(-1)))
        );
        assert!(tax_payer_limit(m(-1), &rules()).is_err());
        assert!(bracket_for(m(-1), true, &rules()).is_err());
    }

    #[test]
    fn selection_by_tax_status() {
        assert_eq!(salary_limit(m(5_000_000), false, &rules()).unwrap(), m(8_850_000));
        assert_eq!(salary_limit(m(5_000_000), true, &rules()).unwrap(), m(6_350_000));
    }

    #[test]
    fn configured_rules_are_used() {
        let mut custom = rules();
        custom.middle_bracket_addition = 7_500_000;
        assert_eq!(non_tax_payer_limit(m(10_000_000), &custom).unwrap(), m(17_500_000));
    }
}
