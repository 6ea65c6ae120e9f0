// 1.0: primitives. money and season labels. every salary in the engine is a Money,
// every season column is keyed by a Season label. newtypes so a total never gets mixed up with a year.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

// 1.1: currency amount in whole dollars. limits can carry cents (x * 1.75) so this is Decimal, not i64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn from_whole(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn add(&self, other: Money) -> Self {
        Self(self.0 + other.0)
    }

    pub fn sub(&self, other: Money) -> Self {
        Self(self.0 - other.0)
    }

    pub fn mul(&self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }

    /// Fraction of `total` this amount represents, zero when `total` is zero.
    pub fn share_of(&self, total: Money) -> Decimal {
        if total.0.is_zero() {
            return Decimal::ZERO;
        }
        self.0 / total.0
    }

    /// `1,234,567.00` style, two decimals, no currency symbol.
    pub fn to_currency_string(&self) -> String {
        let rounded = self.0.round_dp(2);
        let negative = rounded < Decimal::ZERO;
        let abs = rounded.abs();
        let whole = abs.trunc().to_u128().unwrap_or_default();
        let cents = ((abs - abs.trunc()) * Decimal::ONE_HUNDRED)
            .round()
            .to_u32()
            .unwrap_or_default();

        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!("{}{}.{:02}", if negative { "-" } else { "" }, grouped, cents)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.to_currency_string())
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc.add(m))
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc.add(*m))
    }
}

// 1.2: season label like "2019-20". stored as the starting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Season {
    start_year: i32,
}

impl Season {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn next(&self) -> Self {
        Self::new(self.start_year + 1)
    }

    /// The `count` seasons after this one, in order.
    pub fn following(&self, count: usize) -> Vec<Season> {
        (1..=count as i32)
            .map(|offset| Season::new(self.start_year + offset))
            .collect()
    }

    pub fn label(&self) -> String {
        format!("{}-{:02}", self.start_year, (self.start_year + 1).rem_euclid(100))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid season label '{0}', expected e.g. 2019-20")]
pub struct SeasonParseError(pub String);

impl FromStr for Season {
    type Err = SeasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SeasonParseError(s.to_string());
        let (start, end) = s.trim().split_once('-').ok_or_else(err)?;
        if start.len() != 4 || end.len() != 2 {
            return Err(err());
        }
        let start_year: i32 = start.parse().map_err(|_| err())?;
        let end_year: i32 = end.parse().map_err(|_| err())?;
        if (start_year + 1).rem_euclid(100) != end_year {
            return Err(err());
        }
        Ok(Self::new(start_year))
    }
}

impl TryFrom<String> for Season {
    type Error = SeasonParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Season> for String {
    fn from(season: Season) -> Self {
        season.label()
    }
}
