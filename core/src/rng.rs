//! Deterministic random number generation.
//!
//! RULE: Nothing in the game may call a platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed held by the Session.
//!
//! Each concern gets its own stream, seeded from
//! (master_seed, stream slot, round number). This means:
//!   - Drawing more ladder randomness never shifts the exit labels.
//!   - Every round of a session is reproducible in isolation.

use crate::types::RoundNo;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single stream.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Seed a stream directly. Tests use this; the game goes through RngBank.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform index in [0, n). Unbiased, unlike a bare modulo.
    pub fn next_index(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.gen::<u64>()
    }
}

/// Hands out the streams for every round of a session.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_round(&self, round: RoundNo, slot: StreamSlot) -> StreamRng {
        let derived = self.master_seed
            ^ (slot as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ round.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        StreamRng::from_seed(derived).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Ladder = 0,
    ExitLabels = 1,
    TokenColors = 2,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ladder => "ladder",
            Self::ExitLabels => "exit_labels",
            Self::TokenColors => "token_colors",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let bank = RngBank::new(12345);
        let mut a = bank.for_round(3, StreamSlot::Ladder);
        let mut b = bank.for_round(3, StreamSlot::Ladder);
        let xs: Vec<u64> = (0..16).map(|_| a.next_u64()).collect();
        let ys: Vec<u64> = (0..16).map(|_| b.next_u64()).collect();
        assert_eq!(xs, ys);
        assert_eq!(a.name, "ladder");
    }

    #[test]
    fn slots_and_rounds_are_independent_streams() {
        let bank = RngBank::new(12345);
        let ladder = bank.for_round(0, StreamSlot::Ladder).next_u64();
        let labels = bank.for_round(0, StreamSlot::ExitLabels).next_u64();
        let next_round = bank.for_round(1, StreamSlot::Ladder).next_u64();
        assert_ne!(ladder, labels);
        assert_ne!(ladder, next_round);
    }

    #[test]
    fn next_index_stays_in_range() {
        let mut rng = StreamRng::from_seed(7);
        for n in 1..20 {
            for _ in 0..50 {
                assert!(rng.next_index(n) < n);
            }
        }
    }

    #[test]
    fn next_f64_is_unit_interval() {
        let mut rng = StreamRng::from_seed(99);
        for _ in 0..1000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x), "{x} out of range");
        }
    }
}
