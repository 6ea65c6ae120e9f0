//! Before/after roster and salary picture for an accepted trade.
//!
//! Text renditions of the four trade views: salary breakdown (`bar`), payroll
//! by season (`line`), share of payroll (`pie`), and side-by-side rosters
//! (`compare`).

use crate::engine::TradeOutcome;
use crate::exception::TradeException;
use crate::franchise;
use crate::roster::{DraftInfo, Team};
use crate::types::{Money, Season};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Bar,
    Line,
    Pie,
    Compare,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plot type '{0}', expected one of bar, line, pie, compare")]
pub struct ViewParseError(pub String);

impl FromStr for ViewKind {
    type Err = ViewParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(ViewKind::Bar),
            "line" => Ok(ViewKind::Line),
            "pie" => Ok(ViewKind::Pie),
            "compare" => Ok(ViewKind::Compare),
            "" => Ok(ViewKind::None),
            other => Err(ViewParseError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLine {
    pub name: String,
    pub salary: Money,
    /// Joined (after view) or left (before view) in this trade.
    pub moved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub name: String,
    pub tax_paying: bool,
    pub salary_limit: Option<Money>,
    pub payroll_before: Money,
    pub payroll_after: Money,
    pub acquired: Vec<PlayerLine>,
    pub sent: Vec<PlayerLine>,
    pub roster_before: Vec<PlayerLine>,
    pub roster_after: Vec<PlayerLine>,
    /// Payroll after the trade for each season of the window.
    pub payroll_by_season: Vec<(Season, Money)>,
    pub exception: Option<TradeException>,
    /// Picks are not traded; listed for context.
    pub draft_picks: Vec<DraftInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSummary {
    pub season: Season,
    pub teams: Vec<TeamSummary>,
}

fn roster_lines(team: &Team, other: Option<&Team>) -> Vec<PlayerLine> {
    team.players_by_salary()
        .into_iter()
        .map(|(name, salary)| PlayerLine {
            name: name.to_string(),
            salary,
            moved: other.map_or(false, |o| !o.has_player(name)),
        })
        .collect()
}

impl TradeSummary {
    pub fn build(outcome: &TradeOutcome) -> Self {
        let teams = outcome
            .teams
            .iter()
            .filter_map(|name| {
                let before = outcome.pre_trade.get(name)?;
                let after = outcome.post_trade.get(name)?;

                let roster_before = roster_lines(before, Some(after));
                let roster_after = roster_lines(after, Some(before));
                let sent = roster_before.iter().filter(|p| p.moved).cloned().collect();
                let acquired = roster_after.iter().filter(|p| p.moved).cloned().collect();
                let payroll_by_season = after
                    .window
                    .iter()
                    .enumerate()
                    .map(|(year, season)| (*season, after.payroll_in_year(year)))
                    .collect();

                Some(TeamSummary {
                    name: name.clone(),
                    tax_paying: before.tax_paying,
                    salary_limit: after.salary_limit,
                    payroll_before: before.payroll(),
                    payroll_after: after.payroll(),
                    acquired,
                    sent,
                    roster_before,
                    roster_after,
                    payroll_by_season,
                    exception: after.traded_player_exception.clone(),
                    draft_picks: after.draft_picks.clone(),
                })
            })
            .collect();

        Self {
            season: outcome.season,
            teams,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn render(&self, view: ViewKind) -> String {
        let mut out = String::new();
        for team in &self.teams {
            // String writes are infallible
            let _ = match view {
                ViewKind::Bar => render_bar(&mut out, team),
                ViewKind::Line => render_line(&mut out, team),
                ViewKind::Pie => render_pie(&mut out, team),
                ViewKind::Compare => render_compare(&mut out, team),
                ViewKind::None => render_headline(&mut out, team),
            };
        }
        out
    }
}

fn render_headline(out: &mut String, team: &TeamSummary) -> std::fmt::Result {
    let code = franchise::abbreviation(&team.name)
        .map(|a| format!(" ({})", a))
        .unwrap_or_default();
    writeln!(
        out,
        "{}{}: {} -> {}{}",
        team.name,
        code,
        team.payroll_before,
        team.payroll_after,
        if team.tax_paying { " (tax payer)" } else { "" }
    )?;
    if let Some(limit) = team.salary_limit {
        writeln!(out, "  incoming limit {}", limit)?;
    }
    for p in &team.acquired {
        writeln!(out, "  + {} {}", p.name, p.salary)?;
    }
    for p in &team.sent {
        writeln!(out, "  - {} {}", p.name, p.salary)?;
    }
    if let Some(exception) = &team.exception {
        writeln!(
            out,
            "  traded player exception {} ({})",
            exception.amount, exception.player
        )?;
    }
    Ok(())
}

const BAR_WIDTH: u32 = 40;

fn render_bar(out: &mut String, team: &TeamSummary) -> std::fmt::Result {
    writeln!(out, "New roster salary breakdown: {}", team.name)?;
    let top = team
        .roster_after
        .first()
        .map(|p| p.salary)
        .unwrap_or_default();
    for p in &team.roster_after {
        let len = (p.salary.share_of(top) * Decimal::from(BAR_WIDTH))
            .round()
            .to_u32()
            .unwrap_or(0);
        writeln!(
            out,
            "  {:<24} {:<40} {}{}",
            p.name,
            "#".repeat(len as usize),
            p.salary,
            if p.moved { " *" } else { "" }
        )?;
    }
    Ok(())
}

fn render_line(out: &mut String, team: &TeamSummary) -> std::fmt::Result {
    writeln!(out, "Payroll by season: {}", team.name)?;
    for (season, payroll) in &team.payroll_by_season {
        writeln!(out, "  {} {}", season, payroll)?;
    }
    Ok(())
}

fn render_pie(out: &mut String, team: &TeamSummary) -> std::fmt::Result {
    writeln!(out, "Share of payroll: {}", team.name)?;
    for p in &team.roster_after {
        let pct = p.salary.share_of(team.payroll_after) * Decimal::ONE_HUNDRED;
        writeln!(out, "  {:<24} {:>5.1}% {}", p.name, pct, p.salary)?;
    }
    Ok(())
}

fn render_compare(out: &mut String, team: &TeamSummary) -> std::fmt::Result {
    writeln!(out, "Trade recap: {}", team.name)?;
    writeln!(out, "  Before")?;
    for p in &team.roster_before {
        writeln!(out, "    {}{} {}", if p.moved { "-" } else { " " }, p.name, p.salary)?;
    }
    writeln!(out, "  After")?;
    for p in &team.roster_after {
        writeln!(out, "    {}{} {}", if p.moved { "+" } else { " " }, p.name, p.salary)?;
    }
    if !team.draft_picks.is_empty() {
        writeln!(out, "  Future picks")?;
        for pick in &team.draft_picks {
            writeln!(out, "    {} round {}: {}", pick.season, pick.round, pick.pick_info)?;
        }
    }
    Ok(())
}
