//! Swap planning, salary matching, and commit.
//!
//! Everything runs against a working copy of the team map. The caller's map is
//! replaced only after both directions of the salary match pass, so a rejected
//! trade leaves every roster exactly as it was.

use super::request::ResolvedTrade;
use super::results::{LimitCheck, TradeError, TradeSettlement};
use crate::config::CapConfig;
use crate::events::{
    EventPayload, ExceptionCreatedEvent, LimitEvaluatedEvent, MoveSkippedEvent, PlayerMovedEvent,
    SkipReason, TradeAcceptedEvent, TradeRejectedEvent,
};
use crate::exception::evaluate_trade_exception;
use crate::roster::{outgoing_total, Team, TradePlayer};
use crate::salary_limit::{bracket_for, salary_limit};
use crate::types::Money;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Team name -> team, for every team in one evaluation. Ordered so snapshots serialize stably.
pub type TradeTeams = BTreeMap<String, Team>;

/// Applies `trade` to `teams` if it is legal. On error `teams` is untouched.
pub fn process_trade(
    teams: &mut TradeTeams,
    trade: &ResolvedTrade,
    cap: &CapConfig,
) -> Result<TradeSettlement, TradeError> {
    let mut events = Vec::new();
    process_trade_with_events(teams, trade, cap, &mut events)
}

pub(super) fn process_trade_with_events(
    teams: &mut TradeTeams,
    trade: &ResolvedTrade,
    cap: &CapConfig,
    events: &mut Vec<EventPayload>,
) -> Result<TradeSettlement, TradeError> {
    if let Some(missing) = trade.teams.iter().find(|t| !teams.contains_key(*t)) {
        return Err(TradeError::TeamNotLoaded(missing.clone()));
    }

    let mut working = teams.clone();
    let (moves, outgoing) = plan_swap(&mut working, trade, events)?;
    let checks = evaluate_limits(&working, trade, &outgoing, cap, events)?;

    if let Some(failed) = checks.iter().find(|c| !c.passed) {
        events.push(EventPayload::TradeRejected(TradeRejectedEvent {
            team: failed.team.clone(),
            limit: failed.limit,
            incoming: failed.incoming,
        }));
        return Err(TradeError::TradeRejected {
            team: failed.team.clone(),
            limit: failed.limit,
            incoming: failed.incoming,
        });
    }

    for check in &checks {
        if let Some(team) = working.get_mut(&check.team) {
            team.salary_limit = Some(check.limit);
        }
    }

    let mut exceptions = Vec::new();
    for name in &trade.teams {
        let sent = outgoing.get(name).map(Vec::as_slice).unwrap_or_default();
        // salary back makes it simultaneous: no exception
        let received: Money = moves
            .iter()
            .filter(|p| &p.to == name)
            .map(TradePlayer::first_year)
            .sum();
        if let Some(exception) = evaluate_trade_exception(name, sent, received, cap.exception_cushion()) {
            if let Some(team) = working.get_mut(name) {
                team.bank_exception(exception.clone());
            }
            events.push(EventPayload::ExceptionCreated(ExceptionCreatedEvent {
                team: exception.team.clone(),
                player: exception.player.clone(),
                amount: exception.amount,
            }));
            exceptions.push(exception);
        }
    }

    events.push(EventPayload::TradeAccepted(TradeAcceptedEvent {
        teams: trade.teams.clone(),
        players_moved: moves.len(),
    }));

    *teams = working;
    Ok(TradeSettlement {
        checks,
        moves,
        exceptions,
    })
}

/// Moves players on the working copy. Returns every move made plus the moves grouped by sender.
///
/// A destination already carrying a player of the same name fails the whole trade.
fn plan_swap(
    working: &mut TradeTeams,
    trade: &ResolvedTrade,
    events: &mut Vec<EventPayload>,
) -> Result<(Vec<TradePlayer>, HashMap<String, Vec<TradePlayer>>), TradeError> {
    let mut outgoing: HashMap<String, Vec<TradePlayer>> = trade
        .teams
        .iter()
        .map(|name| (name.clone(), Vec::new()))
        .collect();
    let mut moves = Vec::new();
    let mut traded: HashSet<&str> = HashSet::new();

    for mv in &trade.moves {
        let skip = |reason: SkipReason| {
            EventPayload::MoveSkipped(MoveSkippedEvent {
                player: mv.player.clone(),
                from: mv.from.clone(),
                to: mv.to.clone(),
                reason,
            })
        };

        if mv.from == mv.to {
            events.push(skip(SkipReason::SameTeam));
            continue;
        }
        if traded.contains(mv.player.as_str()) {
            events.push(skip(SkipReason::AlreadyTraded));
            continue;
        }
        let on_source = working.get(&mv.from).map_or(false, |t| t.has_player(&mv.player));
        if !on_source {
            events.push(skip(SkipReason::NotOnRoster));
            continue;
        }
        if working.get(&mv.to).map_or(false, |t| t.has_player(&mv.player)) {
            return Err(TradeError::DuplicatePlayer {
                player: mv.player.clone(),
                team: mv.to.clone(),
            });
        }
        let Some(contract) = working
            .get_mut(&mv.from)
            .and_then(|team| team.remove_player(&mv.player))
        else {
            events.push(skip(SkipReason::NotOnRoster));
            continue;
        };

        let player = TradePlayer {
            name: mv.player.clone(),
            contract: contract.clone(),
            from: mv.from.clone(),
            to: mv.to.clone(),
        };
        if let Some(dest) = working.get_mut(&mv.to) {
            dest.add_player(mv.player.clone(), contract);
        }
        traded.insert(mv.player.as_str());

        events.push(EventPayload::PlayerMoved(PlayerMovedEvent {
            player: player.name.clone(),
            from: player.from.clone(),
            to: player.to.clone(),
            first_year: player.first_year(),
        }));
        outgoing.entry(mv.from.clone()).or_default().push(player.clone());
        moves.push(player);
    }

    Ok((moves, outgoing))
}

/// Checks both directions. A team's limit comes from what it sends out and its own
/// tax status; what the other side sends must come in strictly under it.
fn evaluate_limits(
    working: &TradeTeams,
    trade: &ResolvedTrade,
    outgoing: &HashMap<String, Vec<TradePlayer>>,
    cap: &CapConfig,
    events: &mut Vec<EventPayload>,
) -> Result<Vec<LimitCheck>, TradeError> {
    // self-trades only: nothing moved, nothing to match
    let [first, second] = trade.teams.as_slice() else {
        return Ok(Vec::new());
    };

    let sent = |name: &String| outgoing.get(name).map(|p| outgoing_total(p)).unwrap_or_default();

    let mut checks = Vec::with_capacity(2);
    // first team's salary into the second team is checked first
    for (sender, receiver) in [(first, second), (second, first)] {
        let team = working
            .get(receiver)
            .ok_or_else(|| TradeError::TeamNotLoaded(receiver.clone()))?;
        let receiver_out = sent(receiver);
        let incoming = sent(sender);
        let limit = salary_limit(receiver_out, team.tax_paying, &cap.matching)?;
        let bracket = bracket_for(receiver_out, team.tax_paying, &cap.matching)?;
        let passed = incoming < limit;

        events.push(EventPayload::LimitEvaluated(LimitEvaluatedEvent {
            team: receiver.clone(),
            outgoing: receiver_out,
            incoming,
            limit,
            bracket,
            passed,
        }));
        checks.push(LimitCheck {
            team: receiver.clone(),
            outgoing: receiver_out,
            incoming,
            limit,
            bracket,
            passed,
        });
    }

    Ok(checks)
}
