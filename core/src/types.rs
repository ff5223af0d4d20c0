//! Shared primitive types used across the whole game.

/// A simulation tick. One tick = one rendered frame of motion.
pub type Tick = u64;

/// A vertical line, 1-based: `1..=columns`.
pub type Column = usize;

/// Stable identifier of a token within one round (its entrant index).
pub type TokenId = usize;

/// Counts rounds started by a session. Feeds RNG stream derivation.
pub type RoundNo = u64;
