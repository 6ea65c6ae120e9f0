// 8.0.2: result types and errors for trade evaluation.

use super::processor::TradeTeams;
use crate::config::ConfigError;
use crate::exception::TradeException;
use crate::roster::TradePlayer;
use crate::salary_limit::{LimitBracket, LimitError};
use crate::source::DataError;
use crate::types::{Money, Season, SeasonParseError};
use serde::{Deserialize, Serialize};

/// One direction of the salary match: what `team` sends, what it takes back, and its limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitCheck {
    pub team: String,
    pub outgoing: Money,
    pub incoming: Money,
    pub limit: Money,
    pub bracket: LimitBracket,
    pub passed: bool,
}

/// What an accepted trade did to the rosters it was applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSettlement {
    pub checks: Vec<LimitCheck>,
    pub moves: Vec<TradePlayer>,
    pub exceptions: Vec<TradeException>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeOutcome {
    pub season: Season,
    /// Involved teams in request order.
    pub teams: Vec<String>,
    pub pre_trade: TradeTeams,
    pub post_trade: TradeTeams,
    pub checks: Vec<LimitCheck>,
    pub moves: Vec<TradePlayer>,
    pub exceptions: Vec<TradeException>,
}

impl TradeOutcome {
    pub fn check_for(&self, team: &str) -> Option<&LimitCheck> {
        self.checks.iter().find(|c| c.team == team)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TradeError {
    #[error("Invalid Team Abbreviation: {0}")]
    InvalidTeamAbbreviation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid season: {0}")]
    InvalidSeason(#[from] SeasonParseError),

    #[error("{team} can only take up to {limit}. Cannot take contract {incoming}.")]
    TradeRejected {
        team: String,
        limit: Money,
        incoming: Money,
    },

    #[error("Only two-team trades are supported, got {0} teams")]
    UnsupportedTeamCount(usize),

    #[error("{player} is not on the {team} roster")]
    PlayerNotOnRoster { player: String, team: String },

    #[error("{team} already has a player named {player}")]
    DuplicatePlayer { player: String, team: String },

    #[error("{0} was not loaded for this trade")]
    TeamNotLoaded(String),

    #[error("No salary cap figure for {team} in {season}")]
    MissingCapData { team: String, season: String },

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl TradeError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, TradeError::TradeRejected { .. })
    }
}

impl From<LimitError> for TradeError {
    fn from(err: LimitError) -> Self {
        TradeError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_format() {
        let err = TradeError::TradeRejected {
            team: "Houston Rockets".to_string(),
            limit: Money::from_whole(8_850_000),
            incoming: Money::from_whole(10_605_600),
        };
        assert_eq!(
            err.to_string(),
            "Houston Rockets can only take up to $8,850,000.00. Cannot take contract $10,605,600.00."
        );
        assert!(err.is_rejection());
    }

    #[test]
    fn negative_total_maps_to_invalid_input() {
        let err: TradeError = LimitError::NegativeTotal(Money::from_whole(-5)).into();
        assert!(matches!(err, TradeError::InvalidInput(_)));
    }
}
