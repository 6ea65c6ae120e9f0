//! Traded player exceptions from non-simultaneous trades.
//!
//! A team that sends out a single player without taking salary back banks an
//! exception worth that player's first-season salary plus a cushion. Within a
//! year it may absorb one or more players whose combined salary fits under it.
//! The exception cannot be combined with another exception or with a player's
//! salary, and it cannot be handed to another team. Only the most recent
//! exception per team is tracked.

use crate::roster::TradePlayer;
use crate::types::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeException {
    pub team: String,
    /// Player whose departure created the exception.
    pub player: String,
    pub amount: Money,
}

impl TradeException {
    /// Whether incoming salary fits under this exception on its own.
    pub fn can_absorb(&self, incoming: Money) -> bool {
        !incoming.is_negative() && incoming <= self.amount
    }
}

/// Exception banked by `team` for its outgoing players, if any.
///
/// Only a single outgoing player with salary this season qualifies, and only when
/// nothing comes back (`incoming` is zero). Two or more players, or salary taken
/// in return, make it a simultaneous trade and create nothing.
pub fn evaluate_trade_exception(
    team: &str,
    outgoing: &[TradePlayer],
    incoming: Money,
    cushion: Money,
) -> Option<TradeException> {
    if incoming.is_positive() {
        return None;
    }
    let [player] = outgoing else {
        return None;
    };
    let salary = player.first_year();
    if !salary.is_positive() {
        return None;
    }

    Some(TradeException {
        team: team.to_string(),
        player: player.name.clone(),
        amount: salary.add(cushion),
    })
}
