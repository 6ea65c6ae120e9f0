//! Building rosters from league tables and classifying tax payers.

use super::core::TradeEngine;
use super::processor::TradeTeams;
use super::results::TradeError;
use crate::events::{EventPayload, TaxStatusEvent, TeamsLoadedEvent};
use crate::roster::{Contract, DraftInfo, Team};
use crate::source::LeagueDataSource;
use crate::types::Season;
use tracing::debug;

impl<S: LeagueDataSource> TradeEngine<S> {
    /// Loads each team's contracts for the seasons after `season`, plus its future picks.
    pub fn load_trade_teams(&mut self, season: Season, teams: &[String]) -> Result<TradeTeams, TradeError> {
        let window = season.following(self.cap.contract_window);
        let payroll = self.source.payroll(season)?;

        let mut trade_teams = TradeTeams::new();
        for name in teams {
            let mut team = Team::new(name.clone());
            team.window = window.clone();
            trade_teams.insert(name.clone(), team);
        }

        let mut players = 0;
        for row in payroll {
            let Some(team) = trade_teams.get_mut(&row.team) else {
                continue;
            };
            // nothing owed across the window: not on the books
            if let Some(contract) = Contract::from_amounts(row.amounts(&window)?) {
                team.add_player(row.player, contract);
                players += 1;
            }
        }

        let mut draft_picks = 0;
        for pick in self.source.future_draft_picks()? {
            if let Some(team) = trade_teams.get_mut(&pick.team) {
                team.add_draft_pick(DraftInfo::new(pick.season, pick.round, pick.pick_info));
                draft_picks += 1;
            }
        }

        debug!(%season, teams = teams.len(), players, draft_picks, "loaded trade teams");
        self.emit_event(EventPayload::TeamsLoaded(TeamsLoadedEvent {
            season,
            teams: teams.to_vec(),
            players,
            draft_picks,
        }));

        Ok(trade_teams)
    }

    /// Marks teams whose `season` salary is over the luxury tax line. Runs before any swap.
    pub fn classify_tax_paying(&mut self, season: Season, teams: &mut TradeTeams) -> Result<(), TradeError> {
        let overview = self.source.salary_cap_overview(season)?;
        let luxury_tax = self.cap.thresholds.luxury_tax();

        let names: Vec<&String> = teams.keys().collect();
        let mut classified = Vec::with_capacity(names.len());
        for name in names {
            let total = overview
                .iter()
                .find(|row| &row.team == name)
                .and_then(|row| row.total(season))
                .ok_or_else(|| TradeError::MissingCapData {
                    team: name.clone(),
                    season: season.label(),
                })??;
            classified.push((name.clone(), total, total > luxury_tax));
        }

        for (name, season_salary, tax_paying) in classified {
            if let Some(team) = teams.get_mut(&name) {
                team.season_salary = season_salary;
                team.tax_paying = tax_paying;
            }
            debug!(team = %name, %season_salary, tax_paying, "classified tax status");
            self.emit_event(EventPayload::TaxStatusClassified(TaxStatusEvent {
                team: name,
                season_salary,
                luxury_tax,
                tax_paying,
            }));
        }

        Ok(())
    }
}
