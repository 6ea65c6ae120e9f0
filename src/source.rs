//! External league data: payroll tables, salary cap overviews, and future picks.
//!
//! The engine never talks to a database directly. It reads typed rows through
//! [`LeagueDataSource`], whose columns mirror the published tables: `Team`,
//! `Player`, and one currency column per season (`"$1,234,567"` or empty).

use crate::types::{Money, Season};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

// 6.1: one player row of a payroll table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRow {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Player")]
    pub player: String,
    /// Season label -> currency string. Missing seasons read as empty.
    #[serde(flatten)]
    pub seasons: BTreeMap<String, String>,
}

impl PayrollRow {
    pub fn new(team: impl Into<String>, player: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            player: player.into(),
            seasons: BTreeMap::new(),
        }
    }

    pub fn with_season(mut self, season: Season, amount: impl Into<String>) -> Self {
        self.seasons.insert(season.label(), amount.into());
        self
    }

    /// Parsed amounts for each season of `window`, in window order.
    pub fn amounts(&self, window: &[Season]) -> Result<Vec<Money>, DataError> {
        window
            .iter()
            .map(|season| {
                self.seasons
                    .get(&season.label())
                    .map(|raw| parse_currency(raw))
                    .unwrap_or_else(|| Ok(Money::zero()))
            })
            .collect()
    }
}

// 6.2: one team row of the salary cap overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapOverviewRow {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(flatten)]
    pub seasons: BTreeMap<String, String>,
}

impl CapOverviewRow {
    pub fn new(team: impl Into<String>, season: Season, total: impl Into<String>) -> Self {
        let mut seasons = BTreeMap::new();
        seasons.insert(season.label(), total.into());
        Self {
            team: team.into(),
            seasons,
        }
    }

    /// Team salary for `season`. `None` when the column is absent.
    pub fn total(&self, season: Season) -> Option<Result<Money, DataError>> {
        self.seasons.get(&season.label()).map(|raw| parse_currency(raw))
    }
}

// 6.3: one future pick row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPickRow {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Round")]
    pub round: u8,
    #[serde(rename = "PickInfo")]
    pub pick_info: String,
}

/// Parses `"$1,234,567"` into whole dollars. Empty means no contract that season.
pub fn parse_currency(raw: &str) -> Result<Money, DataError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    if cleaned.is_empty() {
        return Ok(Money::zero());
    }
    cleaned
        .parse::<i64>()
        .map(Money::from_whole)
        .map_err(|_| DataError::InvalidCurrency(raw.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("invalid currency amount '{0}'")]
    InvalidCurrency(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no {table} table for season {season}")]
    MissingTable { table: &'static str, season: String },
}

/// Where payroll, cap, and draft tables come from. Reads are treated as atomic
/// and are never retried.
pub trait LeagueDataSource {
    fn payroll(&self, season: Season) -> Result<Vec<PayrollRow>, DataError>;

    fn salary_cap_overview(&self, season: Season) -> Result<Vec<CapOverviewRow>, DataError>;

    fn future_draft_picks(&self) -> Result<Vec<DraftPickRow>, DataError>;
}

impl<T: LeagueDataSource + ?Sized> LeagueDataSource for &T {
    fn payroll(&self, season: Season) -> Result<Vec<PayrollRow>, DataError> {
        (**self).payroll(season)
    }

    fn salary_cap_overview(&self, season: Season) -> Result<Vec<CapOverviewRow>, DataError> {
        (**self).salary_cap_overview(season)
    }

    fn future_draft_picks(&self) -> Result<Vec<DraftPickRow>, DataError> {
        (**self).future_draft_picks()
    }
}

/// JSON tables in one directory:
/// `payroll_<season>.json`, `salary_cap_overview_<season>.json`, `future_picks.json`.
/// Each file is an array of row objects keyed by column name.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn payroll_path(&self, season: Season) -> PathBuf {
        self.root.join(format!("payroll_{}.json", season.label()))
    }

    pub fn cap_overview_path(&self, season: Season) -> PathBuf {
        self.root
            .join(format!("salary_cap_overview_{}.json", season.label()))
    }

    pub fn draft_picks_path(&self) -> PathBuf {
        self.root.join("future_picks.json")
    }

    fn read_table<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, DataError> {
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DataError::Malformed {
            path: path.display().to_string(),
            source,
        })
    }
}

impl LeagueDataSource for JsonDirSource {
    fn payroll(&self, season: Season) -> Result<Vec<PayrollRow>, DataError> {
        Self::read_table(&self.payroll_path(season))
    }

    fn salary_cap_overview(&self, season: Season) -> Result<Vec<CapOverviewRow>, DataError> {
        Self::read_table(&self.cap_overview_path(season))
    }

    fn future_draft_picks(&self) -> Result<Vec<DraftPickRow>, DataError> {
        let path = self.draft_picks_path();
        // picks are informational; a league without the table just has none
        if !path.exists() {
            return Ok(Vec::new());
        }
        Self::read_table(&path)
    }
}

/// Tables held in memory. Used by tests and by callers that already have the data.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    payroll: HashMap<Season, Vec<PayrollRow>>,
    cap_overview: HashMap<Season, Vec<CapOverviewRow>>,
    draft_picks: Vec<DraftPickRow>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_payroll_row(&mut self, season: Season, row: PayrollRow) {
        self.payroll.entry(season).or_default().push(row);
    }

    pub fn add_cap_overview_row(&mut self, season: Season, row: CapOverviewRow) {
        self.cap_overview.entry(season).or_default().push(row);
    }

    pub fn add_draft_pick(&mut self, row: DraftPickRow) {
        self.draft_picks.push(row);
    }
}

impl LeagueDataSource for InMemorySource {
    fn payroll(&self, season: Season) -> Result<Vec<PayrollRow>, DataError> {
        self.payroll
            .get(&season)
            .cloned()
            .ok_or_else(|| DataError::MissingTable {
                table: "payroll",
                season: season.label(),
            })
    }

    fn salary_cap_overview(&self, season: Season) -> Result<Vec<CapOverviewRow>, DataError> {
        self.cap_overview
            .get(&season)
            .cloned()
            .ok_or_else(|| DataError::MissingTable {
                table: "salary cap overview",
                season: season.label(),
            })
    }

    fn future_draft_picks(&self) -> Result<Vec<DraftPickRow>, DataError> {
        Ok(self.draft_picks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(label: &str) -> Season {
        label.parse().unwrap()
    }

    #[test]
    fn currency_parsing() {
        assert_eq!(parse_currency("$10,605,600").unwrap(), Money::from_whole(10_605_600));
        assert_eq!(parse_currency("898310").unwrap(), Money::from_whole(898_310));
        assert_eq!(parse_currency(" $1,000 ").unwrap(), Money::from_whole(1_000));
        assert_eq!(parse_currency("").unwrap(), Money::zero());
        assert_eq!(parse_currency("$").unwrap(), Money::zero());
    }

    #[test]
    fn currency_garbage_rejected() {
        assert!(matches!(parse_currency("TBD"), Err(DataError::InvalidCurrency(_))));
        assert!(matches!(parse_currency("$1.5M"), Err(DataError::InvalidCurrency(_))));
    }

    #[test]
    fn payroll_row_amounts_follow_window() {
        let row = PayrollRow::new("Houston Rockets", "P.J. Tucker")
            .with_season(season("2020-21"), "$7,969,537")
            .with_season(season("2022-23"), "");
        let window = season("2019-20").following(3);
        let amounts = row.amounts(&window).unwrap();
        assert_eq!(
            amounts,
            vec![Money::from_whole(7_969_537), Money::zero(), Money::zero()]
        );
    }

    #[test]
    fn payroll_row_json_shape() {
        let json = r#"{"Team":"Brooklyn Nets","Player":"Spencer Dinwiddie","2020-21":"$11,454,048","2021-22":""}"#;
        let row: PayrollRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.team, "Brooklyn Nets");
        assert_eq!(row.seasons.len(), 2);
        assert_eq!(row.seasons["2020-21"], "$11,454,048");
    }

    #[test]
    fn draft_row_json_shape() {
        let json = r#"{"Team":"Houston Rockets","Season":"2021","Round":1,"PickInfo":"top-4 protected"}"#;
        let row: DraftPickRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.round, 1);
        assert_eq!(row.pick_info, "top-4 protected");
    }

    #[test]
    fn in_memory_missing_table() {
        let source = InMemorySource::new();
        assert!(matches!(
            source.payroll(season("2019-20")),
            Err(DataError::MissingTable { table: "payroll", .. })
        ));
        assert!(source.future_draft_picks().unwrap().is_empty());
    }
}
