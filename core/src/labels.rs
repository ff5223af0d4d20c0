//! Entry and exit labelling of a round.

use crate::{
    permutation,
    rng::{RngBank, StreamSlot},
    types::{Column, RoundNo},
};
use serde::{Deserialize, Serialize};

/// One participant, entering at the top of `column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    pub name: String,
    pub column: Column,
    /// Display colour, `#RRGGBB`.
    pub color: String,
}

/// Entrants on columns `1..=names.len()` in order, each with a random colour.
pub fn entrants(names: Vec<String>, bank: &RngBank, round: RoundNo) -> Vec<Entrant> {
    let mut rng = bank.for_round(round, StreamSlot::TokenColors);
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| Entrant {
            name,
            column: i + 1,
            color: format!("#{:06X}", rng.next_index(0x100_0000)),
        })
        .collect()
}

/// Rank labels "1".."columns" in shuffled order; index `c - 1` labels exit `c`.
pub fn exit_labels(columns: usize, bank: &RngBank, round: RoundNo) -> Vec<String> {
    let mut rng = bank.for_round(round, StreamSlot::ExitLabels);
    let ranks = (1..=columns).map(|rank| rank.to_string()).collect();
    permutation::shuffled(ranks, &mut rng)
}
