//! Trade requests as users type them (abbreviations) and as the engine runs them (full names).

use super::results::TradeError;
use crate::franchise;
use crate::types::Season;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMove {
    pub player: String,
    /// Abbreviated source team, e.g. "BRK".
    pub from: String,
    /// Abbreviated destination team.
    pub to: String,
}

impl PlayerMove {
    pub fn new(player: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub season: Season,
    pub moves: Vec<PlayerMove>,
}

impl TradeRequest {
    pub fn new(season: Season, moves: Vec<PlayerMove>) -> Self {
        Self { season, moves }
    }

    /// Zips parallel player / source / destination lists, the way the CLI takes them.
    pub fn from_lists(
        season: &str,
        players: &[String],
        src_teams: &[String],
        dest_teams: &[String],
    ) -> Result<Self, TradeError> {
        let season: Season = season.parse()?;
        if players.len() != src_teams.len() || players.len() != dest_teams.len() {
            return Err(TradeError::InvalidInput(format!(
                "{} players, {} source teams, {} destination teams; lists must line up",
                players.len(),
                src_teams.len(),
                dest_teams.len()
            )));
        }
        if players.is_empty() {
            return Err(TradeError::InvalidInput("no players in trade".to_string()));
        }

        let moves = players
            .iter()
            .zip(src_teams)
            .zip(dest_teams)
            .map(|((player, from), to)| PlayerMove::new(player.clone(), from.clone(), to.clone()))
            .collect();
        Ok(Self::new(season, moves))
    }

    /// Maps abbreviations to franchise names and fixes the team order.
    ///
    /// Runs before any data is touched: an unknown code fails here.
    pub fn resolve(&self) -> Result<ResolvedTrade, TradeError> {
        let mut moves = Vec::with_capacity(self.moves.len());
        for mv in &self.moves {
            let from = franchise::full_name(&mv.from)
                .ok_or_else(|| TradeError::InvalidTeamAbbreviation(mv.from.clone()))?;
            let to = franchise::full_name(&mv.to)
                .ok_or_else(|| TradeError::InvalidTeamAbbreviation(mv.to.clone()))?;
            moves.push(ResolvedMove {
                player: mv.player.clone(),
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        // source teams first, in request order, then any destination that only receives
        let mut teams: Vec<String> = Vec::new();
        for name in moves.iter().map(|m| &m.from).chain(moves.iter().map(|m| &m.to)) {
            if !teams.contains(name) {
                teams.push(name.clone());
            }
        }
        // a lone team only happens when every move is a self-trade
        if teams.is_empty() || teams.len() > 2 {
            return Err(TradeError::UnsupportedTeamCount(teams.len()));
        }

        Ok(ResolvedTrade {
            season: self.season,
            teams,
            moves,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMove {
    pub player: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTrade {
    pub season: Season,
    pub teams: Vec<String>,
    pub moves: Vec<ResolvedMove>,
}

impl ResolvedTrade {
    pub fn involves(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t == team)
    }
}
