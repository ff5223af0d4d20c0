//! Exit-label ordering. Used for display only; routing never reads it.

use crate::rng::StreamRng;

/// Fisher–Yates: walk from the last index down, swapping each slot with
/// a uniformly chosen slot at or before it.
pub fn shuffle<T>(items: &mut [T], rng: &mut StreamRng) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

/// Owned convenience wrapper around [`shuffle`].
pub fn shuffled<T>(mut items: Vec<T>, rng: &mut StreamRng) -> Vec<T> {
    shuffle(&mut items, rng);
    items
}
