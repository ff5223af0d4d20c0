use amida_core::{permutation, rng::StreamRng};
use std::collections::HashMap;

#[test]
fn fisher_yates_is_uniform_over_four_labels() {
    const RUNS: usize = 10_000;
    let mut rng = StreamRng::from_seed(0x5EED_0F_A31DA);
    let mut counts: HashMap<Vec<&str>, usize> = HashMap::new();

    for _ in 0..RUNS {
        let mut labels = ["a", "b", "c", "d"];
        permutation::shuffle(&mut labels, &mut rng);
        *counts.entry(labels.to_vec()).or_default() += 1;
    }

    assert_eq!(counts.len(), 24, "not every permutation appeared");
    let expected = RUNS as f64 / 24.0;
    for (perm, &count) in &counts {
        let deviation = (count as f64 - expected).abs() / expected;
        assert!(
            deviation < 0.25,
            "{perm:?} appeared {count} times, expected ~{expected:.0}"
        );
    }

    // Chi-square, 23 degrees of freedom; 49.7 is the 0.1% critical value.
    let chi2: f64 = counts
        .values()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum();
    assert!(chi2 < 49.7, "chi-square {chi2:.1} too large");
}

#[test]
fn shuffle_keeps_every_element() {
    let mut rng = StreamRng::from_seed(3);
    let mut items: Vec<u32> = (0..50).collect();
    permutation::shuffle(&mut items, &mut rng);
    let mut sorted = items.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..50).collect::<Vec<_>>());
}

#[test]
fn tiny_lists_are_fine() {
    let mut rng = StreamRng::from_seed(3);
    assert!(permutation::shuffled(Vec::<u8>::new(), &mut rng).is_empty());
    assert_eq!(permutation::shuffled(vec![9], &mut rng), vec![9]);
}
