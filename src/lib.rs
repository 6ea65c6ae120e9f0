// nba-trade-core: NBA trade machine engine.
// salary matching first: a trade is only applied once both teams fit under their limits.
// all evaluation is deterministic; league data comes in through a data source trait.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: Money, Season
//   2.x  franchise.rs: 30-team abbreviation table
//   3.x  roster.rs: Team, Contract, DraftInfo, TradePlayer
//   4.x  salary_limit.rs: matching brackets, tax-payer limit
//   5.x  exception.rs: traded player exceptions (non-simultaneous)
//   6.x  source.rs: payroll / cap overview / draft tables, JSON + in-memory sources
//   7.x  config.rs: cap thresholds, matching rules, per-season exception tables
//   8.x  engine/: trade processor: resolve, load, classify, snapshot, swap, match, commit
//   9.x  report.rs: before/after salary picture, text views
//   10.x events.rs: state transition events for audit
//   11.x logging.rs: tracing setup, error.log appender

// core trade modules
pub mod engine;
pub mod exception;
pub mod franchise;
pub mod roster;
pub mod salary_limit;
pub mod types;

// league data and settings
pub mod config;
pub mod source;

// output modules
pub mod events;
pub mod logging;
pub mod report;

// re exports for convenience
pub use config::{CapConfig, ConfigError, MatchingRules, SeasonExceptions, Thresholds};
pub use engine::*;
pub use events::*;
pub use exception::*;
pub use roster::*;
pub use salary_limit::*;
pub use source::{
    parse_currency, CapOverviewRow, DataError, DraftPickRow, InMemorySource, JsonDirSource,
    LeagueDataSource, PayrollRow,
};
pub use report::{TeamSummary, TradeSummary, ViewKind};
pub use types::*;
