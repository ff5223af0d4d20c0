//! What the core hands to the outside world, and the traits hosts
//! implement to receive it. Sinks get views, never mutation rights.

use crate::{
    ladder::Ladder,
    layout::ColumnLayout,
    types::{Column, Tick, TokenId},
};
use serde::{Deserialize, Serialize};

/// Drawable state of one unfinished token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenView<'a> {
    pub id: TokenId,
    pub name: &'a str,
    pub color: &'a str,
    pub x: f64,
    pub y: f64,
}

/// Everything a renderer needs for one tick.
#[derive(Debug, Clone, Serialize)]
pub struct Frame<'a> {
    pub tick: Tick,
    pub ladder: &'a Ladder,
    pub layout: ColumnLayout,
    pub tokens: Vec<TokenView<'a>>,
}

/// Where one participant ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub final_column: Column,
    pub exit_label: String,
    pub participant: String,
    pub entry_column: Column,
}

/// Final outcome of a round, ordered by ascending final column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResults {
    pub ticks: Tick,
    pub placements: Vec<Placement>,
}

impl RoundResults {
    /// `result[c - 1]` is the exit column of the token that entered on `c`.
    pub fn exit_columns(&self) -> Vec<Column> {
        let mut exits = vec![0; self.placements.len()];
        for p in &self.placements {
            if let Some(slot) = exits.get_mut(p.entry_column.wrapping_sub(1)) {
                *slot = p.final_column;
            }
        }
        exits
    }

    /// True when every column in `1..=n` is exactly one token's exit.
    pub fn is_bijection(&self) -> bool {
        let n = self.placements.len();
        let mut seen = vec![false; n + 1];
        self.placements.iter().all(|p| {
            let fresh = (1..=n).contains(&p.final_column) && !seen[p.final_column];
            if fresh {
                seen[p.final_column] = true;
            }
            fresh
        })
    }
}

pub trait RenderSink {
    fn render(&mut self, frame: &Frame<'_>);
}

pub trait ResultsSink {
    fn publish(&mut self, results: &RoundResults);
}

/// Ignores every frame. For hosts that only want results.
pub struct NullRender;

impl RenderSink for NullRender {
    fn render(&mut self, _frame: &Frame<'_>) {}
}

impl ResultsSink for Vec<RoundResults> {
    fn publish(&mut self, results: &RoundResults) {
        self.push(results.clone());
    }
}
