//! Team rosters, contracts, and draft assets.
//!
//! A team holds each player's remaining guaranteed salary by season (current
//! season first), the future draft picks it owns, and its pre-trade tax status.
//! Only the first-season amount matters for salary matching; the rest of the
//! contract is carried for the before/after picture.

use crate::exception::TradeException;
use crate::types::{Money, Season};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// 3.1: guaranteed salary by season, aligned to the team's window. a season with
// nothing owed is zero. at least one season is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Money>", into = "Vec<Money>")]
pub struct Contract(Vec<Money>);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("contract owes nothing across the window")]
pub struct EmptyContract;

impl Contract {
    /// Keeps one amount per season, negatives read as zero. `None` when nothing is left to pay.
    pub fn from_amounts(amounts: impl IntoIterator<Item = Money>) -> Option<Self> {
        let seasons: Vec<Money> = amounts
            .into_iter()
            .map(|m| if m.is_positive() { m } else { Money::zero() })
            .collect();
        if seasons.iter().any(Money::is_positive) {
            Some(Self(seasons))
        } else {
            None
        }
    }

    /// Salary of the first season with money owed. This is the figure used for matching.
    pub fn first_year(&self) -> Money {
        self.0
            .iter()
            .copied()
            .find(Money::is_positive)
            .unwrap_or_default()
    }

    pub fn total(&self) -> Money {
        self.0.iter().sum()
    }

    /// One entry per window season, zeros included.
    pub fn seasons(&self) -> &[Money] {
        &self.0
    }

    /// Seasons with money owed.
    pub fn years(&self) -> usize {
        self.0.iter().filter(|m| m.is_positive()).count()
    }

    /// Salary owed in the n-th season of the window, zero for a gap or once the deal has run out.
    pub fn amount_in_year(&self, year: usize) -> Money {
        self.0.get(year).copied().unwrap_or_else(Money::zero)
    }
}

impl TryFrom<Vec<Money>> for Contract {
    type Error = EmptyContract;

    fn try_from(amounts: Vec<Money>) -> Result<Self, Self::Error> {
        Self::from_amounts(amounts).ok_or(EmptyContract)
    }
}

impl From<Contract> for Vec<Money> {
    fn from(contract: Contract) -> Self {
        contract.0
    }
}

// 3.2: one future pick. informational, never counted toward matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftInfo {
    pub season: String,
    pub round: u8,
    pub pick_info: String,
}

impl DraftInfo {
    pub fn new(season: impl Into<String>, round: u8, pick_info: impl Into<String>) -> Self {
        Self {
            season: season.into(),
            round,
            pick_info: pick_info.into(),
        }
    }
}

// 3.3: a player in flight between two rosters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePlayer {
    pub name: String,
    pub contract: Contract,
    pub from: String,
    pub to: String,
}

impl TradePlayer {
    pub fn first_year(&self) -> Money {
        self.contract.first_year()
    }
}

/// Sum of first-season salary across players.
pub fn outgoing_total(players: &[TradePlayer]) -> Money {
    players.iter().map(TradePlayer::first_year).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: BTreeMap<String, Contract>,
    pub draft_picks: Vec<DraftInfo>,
    /// Set before the trade is applied; never recomputed afterwards.
    pub tax_paying: bool,
    /// Season total from the cap overview used for tax classification.
    pub season_salary: Money,
    /// Most incoming salary this team may take on in the current trade.
    pub salary_limit: Option<Money>,
    pub traded_player_exception: Option<TradeException>,
    /// Seasons the contract vectors are indexed by.
    pub window: Vec<Season>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: BTreeMap::new(),
            draft_picks: Vec::new(),
            tax_paying: false,
            season_salary: Money::zero(),
            salary_limit: None,
            traded_player_exception: None,
            window: Vec::new(),
        }
    }

    pub fn add_player(&mut self, name: impl Into<String>, contract: Contract) {
        self.players.insert(name.into(), contract);
    }

    /// Removing an absent player is a no-op.
    pub fn remove_player(&mut self, name: &str) -> Option<Contract> {
        self.players.remove(name)
    }

    pub fn add_draft_pick(&mut self, pick: DraftInfo) {
        self.draft_picks.push(pick);
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.players.contains_key(name)
    }

    pub fn get_contract(&self, name: &str) -> Option<&Contract> {
        self.players.get(name)
    }

    /// Current-season payroll of the roster as loaded (guaranteed money only).
    pub fn payroll(&self) -> Money {
        self.players.values().map(Contract::first_year).sum()
    }

    pub fn payroll_in_year(&self, year: usize) -> Money {
        self.players.values().map(|c| c.amount_in_year(year)).sum()
    }

    /// Players sorted by current-season salary, highest first; ties by name.
    pub fn players_by_salary(&self) -> Vec<(&str, Money)> {
        let mut players: Vec<(&str, Money)> = self
            .players
            .iter()
            .map(|(name, contract)| (name.as_str(), contract.first_year()))
            .collect();
        players.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        players
    }

    /// Replaces any previously banked exception. Exceptions never stack.
    pub fn bank_exception(&mut self, exception: TradeException) {
        self.traded_player_exception = Some(exception);
    }
}
