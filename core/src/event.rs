//! Events emitted while a round runs.
//!
//! Hosts read these to drive sound, highlights or logs; the round
//! itself never reads them back.

use crate::types::{Column, Tick, TokenId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundEvent {
    RoundStarted {
        columns: usize,
        rungs: usize,
    },
    RungEntered {
        tick: Tick,
        token: TokenId,
        from_column: Column,
        to_column: Column,
        height: f64,
    },
    RungLeft {
        tick: Tick,
        token: TokenId,
        column: Column,
    },
    TokenFinished {
        tick: Tick,
        token: TokenId,
        final_column: Column,
    },
    RoundCompleted {
        tick: Tick,
    },
}

impl RoundEvent {
    /// Stable string name of the variant, for logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RoundStarted { .. } => "round_started",
            Self::RungEntered { .. } => "rung_entered",
            Self::RungLeft { .. } => "rung_left",
            Self::TokenFinished { .. } => "token_finished",
            Self::RoundCompleted { .. } => "round_completed",
        }
    }
}
