//! NBA trade machine.
//!
//! Evaluates a two-team trade against salary matching rules and prints the
//! before/after salary picture.
//!
//! ```text
//! trade-sim --src BRK HOU --players "Spencer Dinwiddie" "P.J. Tucker" --dest HOU BRK --plot bar
//! ```

use clap::Parser;
use nba_trade_core::logging::{init_tracing, ErrorLog};
use nba_trade_core::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "trade-sim")]
#[command(about = "Evaluate an NBA trade against salary matching rules")]
struct Args {
    /// Teams' season; contracts are read for the seasons after it
    #[arg(long, default_value = "2019-20")]
    season: String,

    /// Player(s) being traded
    #[arg(long, num_args = 1..)]
    players: Vec<String>,

    /// Abbreviated original team of each player
    #[arg(long = "src", num_args = 1..)]
    src_teams: Vec<String>,

    /// Abbreviated destination team of each player
    #[arg(long = "dest", num_args = 1..)]
    dest_teams: Vec<String>,

    /// Trade view: bar, line, pie, or compare
    #[arg(long, default_value = "", value_parser = parse_view)]
    plot: ViewKind,

    /// Directory holding payroll, cap overview, and draft pick tables
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// League config (TOML); built-in values are used if the file is missing
    #[arg(long, default_value = "config/league.toml")]
    config: PathBuf,

    /// Where error.log is appended
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Print the trade summary as JSON
    #[arg(long)]
    json: bool,

    /// Fail when a player is not on the given source team instead of skipping the move
    #[arg(long)]
    strict: bool,

    /// Log every engine event
    #[arg(long, short)]
    verbose: bool,
}

fn parse_view(s: &str) -> Result<ViewKind, String> {
    s.parse().map_err(|e: report::ViewParseError| e.to_string())
}

fn load_config(path: &Path) -> Result<CapConfig, ConfigError> {
    if path.exists() {
        CapConfig::from_file(path)
    } else {
        warn!(path = %path.display(), "config not found, using built-in league values");
        Ok(CapConfig::default())
    }
}

fn run(args: &Args) -> Result<TradeOutcome, TradeError> {
    // abbreviations are checked before any table is read
    let request = TradeRequest::from_lists(&args.season, &args.players, &args.src_teams, &args.dest_teams)?;
    request.resolve()?;

    let cap = load_config(&args.config)?;
    let engine_config = EngineConfig::default()
        .verbose(args.verbose)
        .strict_rosters(args.strict);
    let mut engine = TradeEngine::new(engine_config, cap, JsonDirSource::new(&args.data_dir));
    engine.evaluate_trade(&request)
}

fn main() -> ExitCode {
    init_tracing("info");
    let args = Args::parse();

    match run(&args) {
        Ok(outcome) => {
            println!("Trade Successful.");
            let summary = TradeSummary::build(&outcome);
            if args.json {
                match summary.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("cannot serialize summary: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", summary.render(args.plot));
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let message = err.to_string();
            println!("{}", message);
            if err.is_rejection() {
                let log = ErrorLog::new(&args.log_dir);
                if let Err(io) = log.append(&message) {
                    warn!(path = %log.path().display(), error = %io, "cannot write error log");
                } else {
                    info!(path = %log.path().display(), "rejection logged");
                }
            }
            eprintln!("Trade unable to be processed");
            ExitCode::FAILURE
        }
    }
}
