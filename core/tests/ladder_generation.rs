//! Structural invariants of generated ladders.

use amida_core::{
    config::GameConfig,
    ladder::{self, Ladder, SeparationPolicy},
    rng::{RngBank, StreamSlot},
};

const EPS: f64 = 1e-9;

fn generate(config: &GameConfig, seed: u64) -> Ladder {
    let mut rng = RngBank::new(seed).for_round(0, StreamSlot::Ladder);
    ladder::generate(
        config.columns,
        config.boundary_height,
        &config.ladder_params(),
        &mut rng,
    )
    .expect("valid ladder params")
}

fn configs(policy: SeparationPolicy) -> Vec<GameConfig> {
    [2, 3, 5, 12, 20]
        .into_iter()
        .map(|columns| GameConfig {
            columns,
            separation_policy: policy,
            ..GameConfig::default()
        })
        .collect()
}

fn assert_within_band(ladder: &Ladder, config: &GameConfig) {
    let top = config.rung_margin();
    let bottom = config.boundary_height - config.rung_margin();
    for rung in ladder.rungs() {
        assert!(
            rung.height >= top - EPS && rung.height <= bottom + EPS,
            "rung at {} outside [{top}, {bottom}]",
            rung.height
        );
        assert_eq!(rung.right_column, rung.left_column + 1);
        assert!(rung.left_column >= 1 && rung.right_column <= config.columns);
    }
    assert!(
        ladder.rungs().windows(2).all(|w| w[0].height <= w[1].height),
        "rungs not sorted by height"
    );
}

#[test]
fn adjacent_policy_separates_every_rung() {
    for config in configs(SeparationPolicy::Adjacent) {
        let d = config.min_rung_separation();
        for seed in 0..200 {
            let ladder = generate(&config, seed);
            assert_within_band(&ladder, &config);
            for w in ladder.rungs().windows(2) {
                assert!(
                    w[1].height - w[0].height >= d - EPS,
                    "columns={} seed={seed}: {} and {} closer than {d}",
                    config.columns,
                    w[0].height,
                    w[1].height
                );
            }
        }
    }
}

#[test]
fn per_column_policy_separates_rungs_sharing_a_column() {
    for config in configs(SeparationPolicy::PerColumn) {
        let d = config.min_rung_separation();
        for seed in 0..200 {
            let ladder = generate(&config, seed);
            assert_within_band(&ladder, &config);
            if let Some(gap) = ladder.min_shared_column_gap() {
                assert!(
                    gap >= d - EPS,
                    "columns={} seed={seed}: shared-column gap {gap} < {d}",
                    config.columns
                );
            }
        }
    }
}

#[test]
fn sparse_ladders_keep_every_rung() {
    // Plenty of room: nothing is pushed past the bottom.
    let config = GameConfig {
        columns: 4,
        boundary_height: 2_000.0,
        ..GameConfig::default()
    };
    for seed in 0..50 {
        assert_eq!(generate(&config, seed).len(), 9);
    }
}

#[test]
fn crowded_default_board_still_generates_rungs() {
    // 33 candidates at 20 apart cannot all fit in 568 units.
    let config = GameConfig::default();
    let ladder = generate(&config, 7);
    assert!(!ladder.is_empty());
    assert!(ladder.len() <= 33);
}

#[test]
fn same_seed_same_ladder() {
    let config = GameConfig::default();
    assert_eq!(generate(&config, 42), generate(&config, 42));
    assert_ne!(generate(&config, 42), generate(&config, 43));
}

#[test]
fn every_gap_gets_rungs_over_many_seeds() {
    let config = GameConfig::with_columns(6);
    let mut used = [false; 6];
    for seed in 0..20 {
        for rung in generate(&config, seed).rungs() {
            used[rung.left_column] = true;
        }
    }
    assert!(used[1..].iter().all(|&u| u), "some gap never got a rung: {used:?}");
}
