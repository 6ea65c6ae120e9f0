// 8.0 engine/core.rs: main engine. holds league config, the data source, and the audit log.

use super::config::EngineConfig;
use super::processor::process_trade_with_events;
use super::processor::TradeTeams;
use super::request::{ResolvedTrade, TradeRequest};
use super::results::{TradeError, TradeOutcome};
use crate::config::CapConfig;
use crate::events::{Event, EventId, EventPayload};
use crate::source::LeagueDataSource;
use tracing::{debug, info, warn};

/** 8.1: main engine struct. every evaluation builds its own rosters; only the event log persists */
#[derive(Debug)]
pub struct TradeEngine<S> {
    pub(super) config: EngineConfig,
    pub(super) cap: CapConfig,
    pub(super) source: S,
    pub(super) events: Vec<Event>,
    pub(super) next_event_id: u64,
}

impl<S: LeagueDataSource> TradeEngine<S> {
    pub fn new(config: EngineConfig, cap: CapConfig, source: S) -> Self {
        Self {
            config,
            cap,
            source,
            events: Vec::new(),
            next_event_id: 1,
        }
    }

    pub fn cap(&self) -> &CapConfig {
        &self.cap
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs a trade start to finish: resolve, load, classify, snapshot, swap, match, commit.
    ///
    /// A rejection comes back as [`TradeError::TradeRejected`]; nothing is mutated and the
    /// same request can be evaluated again.
    pub fn evaluate_trade(&mut self, request: &TradeRequest) -> Result<TradeOutcome, TradeError> {
        let trade = request.resolve()?;
        debug!(season = %trade.season, teams = ?trade.teams, "resolved trade");

        let mut teams = self.load_trade_teams(trade.season, &trade.teams)?;
        self.classify_tax_paying(trade.season, &mut teams)?;
        if self.config.strict_rosters {
            check_rosters(&teams, &trade)?;
        }

        let pre_trade = teams.clone();

        let mut pending = Vec::new();
        let result = process_trade_with_events(&mut teams, &trade, &self.cap, &mut pending);
        for payload in pending {
            self.emit_event(payload);
        }

        match result {
            Ok(settlement) => {
                info!(teams = ?trade.teams, players = settlement.moves.len(), "trade accepted");
                Ok(TradeOutcome {
                    season: trade.season,
                    teams: trade.teams,
                    pre_trade,
                    post_trade: teams,
                    checks: settlement.checks,
                    moves: settlement.moves,
                    exceptions: settlement.exceptions,
                })
            }
            Err(err) => {
                warn!(error = %err, "trade not processed");
                Err(err)
            }
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), payload);
        self.next_event_id += 1;

        if self.config.verbose {
            info!(id = event.id.0, payload = ?event.payload, "event");
        } else {
            debug!(id = event.id.0, payload = ?event.payload, "event");
        }

        self.events.push(event);

        if self.events.len() > self.config.max_events {
            let drain_count = self.events.len() - self.config.max_events;
            self.events.drain(0..drain_count);
        }
    }
}

/// 8.2: every non self-trade move must name a player on its source roster.
fn check_rosters(teams: &TradeTeams, trade: &ResolvedTrade) -> Result<(), TradeError> {
    for mv in trade.moves.iter().filter(|m| m.from != m.to) {
        let on_roster = teams.get(&mv.from).map_or(false, |t| t.has_player(&mv.player));
        if !on_roster {
            return Err(TradeError::PlayerNotOnRoster {
                player: mv.player.clone(),
                team: mv.from.clone(),
            });
        }
    }
    Ok(())
}
