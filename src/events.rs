// 10.0: every stage of a trade evaluation produces an event. used for the audit trail
// and for explaining a rejection after the fact. the EventPayload enum lists all event types.

use crate::salary_limit::LimitBracket;
use crate::types::{Money, Season};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp: chrono::Utc::now(),
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    // Setup events
    TeamsLoaded(TeamsLoadedEvent),
    TaxStatusClassified(TaxStatusEvent),

    // Swap events
    PlayerMoved(PlayerMovedEvent),
    MoveSkipped(MoveSkippedEvent),

    // Evaluation events
    LimitEvaluated(LimitEvaluatedEvent),
    TradeAccepted(TradeAcceptedEvent),
    TradeRejected(TradeRejectedEvent),

    // Exception events
    ExceptionCreated(ExceptionCreatedEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsLoadedEvent {
    pub season: Season,
    pub teams: Vec<String>,
    pub players: usize,
    pub draft_picks: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxStatusEvent {
    pub team: String,
    pub season_salary: Money,
    pub luxury_tax: Money,
    pub tax_paying: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMovedEvent {
    pub player: String,
    pub from: String,
    pub to: String,
    pub first_year: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveSkippedEvent {
    pub player: String,
    pub from: String,
    pub to: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    NotOnRoster,
    SameTeam,
    AlreadyTraded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitEvaluatedEvent {
    pub team: String,
    pub outgoing: Money,
    pub incoming: Money,
    pub limit: Money,
    pub bracket: LimitBracket,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeAcceptedEvent {
    pub teams: Vec<String>,
    pub players_moved: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRejectedEvent {
    pub team: String,
    pub limit: Money,
    pub incoming: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExceptionCreatedEvent {
    pub team: String,
    pub player: String,
    pub amount: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_with_payload_tag() {
        let event = Event::new(
            EventId(7),
            EventPayload::TradeRejected(TradeRejectedEvent {
                team: "Houston Rockets".to_string(),
                limit: Money::from_whole(8_850_000),
                incoming: Money::from_whole(9_000_000),
            }),
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("TradeRejected"));
        assert!(json.contains("Houston Rockets"));
    }
}
