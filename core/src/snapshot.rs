//! Snapshot serialization: the full state of a round as JSON.
//!
//! Out-of-process hosts poll this instead of holding a Round.

use crate::{
    error::AmidaResult,
    labels::Entrant,
    ladder::Ladder,
    round::Round,
    sink::RoundResults,
    token::Token,
    types::Tick,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub tick: Tick,
    pub all_finished: bool,
    pub ladder: Ladder,
    pub entrants: Vec<Entrant>,
    pub tokens: Vec<Token>,
    pub exit_labels: Vec<String>,
    pub results: Option<RoundResults>,
}

impl RoundSnapshot {
    pub fn of(round: &Round) -> Self {
        Self {
            tick: round.tick(),
            all_finished: round.is_finished(),
            ladder: round.ladder().clone(),
            entrants: round.entrants().to_vec(),
            tokens: round.tokens().to_vec(),
            exit_labels: round.exit_labels().to_vec(),
            results: round.results().cloned(),
        }
    }

    pub fn to_json(&self) -> AmidaResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
