// 8.0: trade processor. resolves a request, loads both rosters, classifies tax status,
// snapshots the pre-trade state, plans the swap, checks salary matching in both
// directions, and only then commits. single-threaded and synchronous.

mod config;
mod core;
mod load;
mod processor;
mod request;
mod results;

pub use config::EngineConfig;
pub use core::TradeEngine;
pub use processor::{process_trade, TradeTeams};
pub use request::{PlayerMove, ResolvedMove, ResolvedTrade, TradeRequest};
pub use results::{LimitCheck, TradeError, TradeOutcome, TradeSettlement};
