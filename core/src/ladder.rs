//! Ladder generation: the horizontal rungs of one round.
//!
//! Heights grow downward, from 0 at the entry row to `height` at the
//! exit row. A ladder's rungs are always sorted by ascending height.

use crate::{error::ConfigError, rng::StreamRng, types::Column};
use serde::{Deserialize, Serialize};

/// A horizontal connector between `left_column` and `left_column + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rung {
    pub left_column: Column,
    pub right_column: Column,
    pub height: f64,
}

impl Rung {
    pub fn new(left_column: Column, height: f64) -> Self {
        Self {
            left_column,
            right_column: left_column + 1,
            height,
        }
    }

    pub fn touches(&self, column: Column) -> bool {
        self.left_column == column || self.right_column == column
    }

    /// The column a token on `column` ends up on after crossing.
    pub fn other_end(&self, column: Column) -> Option<Column> {
        if column == self.left_column {
            Some(self.right_column)
        } else if column == self.right_column {
            Some(self.left_column)
        } else {
            None
        }
    }
}

/// How the generator keeps rungs apart vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparationPolicy {
    /// One pass over the height-sorted rungs, pushing each rung at least
    /// `min_separation` below its predecessor. Rungs pushed past the
    /// bottom of the band are discarded.
    #[default]
    Adjacent,
    /// Push each rung below the last rung placed on either of its two
    /// columns. Rungs on disjoint columns may share a height.
    PerColumn,
}

/// Generator knobs, derived from the game config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderParams {
    pub avg_rungs_per_gap: f64,
    pub min_separation: f64,
    /// Distance kept free at the top and bottom of the ladder.
    pub margin: f64,
    pub policy: SeparationPolicy,
}

/// Upper bound on candidate rungs per ladder, whatever the band could hold.
pub const MAX_CANDIDATE_RUNGS: f64 = 100_000.0;

impl LadderParams {
    /// Number of candidate rungs for `columns` lines over `height`, or why
    /// no ladder can be generated from these parameters.
    ///
    /// No column can hold more than `band / min_separation + 1` rungs, so
    /// asking for more than that per gap only produces rungs that get discarded.
    pub fn candidate_count(&self, columns: usize, height: f64) -> Result<usize, ConfigError> {
        if columns < 2 {
            return Err(ConfigError::TooFewColumns { columns });
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "boundary_height",
                value: height,
            });
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(ConfigError::Negative {
                field: "rung_margin",
                value: self.margin,
            });
        }
        if !(self.min_separation.is_finite() && self.min_separation > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "min_rung_separation",
                value: self.min_separation,
            });
        }
        if !(self.avg_rungs_per_gap.is_finite() && self.avg_rungs_per_gap >= 0.0) {
            return Err(ConfigError::Negative {
                field: "avg_rungs_per_gap",
                value: self.avg_rungs_per_gap,
            });
        }
        let band = height - 2.0 * self.margin;
        if band <= 0.0 {
            return Err(ConfigError::NoUsableHeight {
                height,
                margin: self.margin,
            });
        }

        let gaps = (columns - 1) as f64;
        let per_column = (band / self.min_separation).floor() + 1.0;
        let limit = (per_column * gaps).min(MAX_CANDIDATE_RUNGS);
        let requested = (gaps * self.avg_rungs_per_gap).round();
        if requested > limit {
            return Err(ConfigError::TooManyRungs { requested, limit });
        }
        Ok(requested as usize)
    }
}

/// The full, immutable rung set of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LadderFields")]
pub struct Ladder {
    columns: usize,
    height: f64,
    rungs: Vec<Rung>,
}

/// Wire form of a ladder; checked by `Ladder::from_rungs` on the way in.
#[derive(Deserialize)]
struct LadderFields {
    columns: usize,
    height: f64,
    rungs: Vec<Rung>,
}

impl TryFrom<LadderFields> for Ladder {
    type Error = ConfigError;

    fn try_from(fields: LadderFields) -> Result<Self, Self::Error> {
        Ladder::from_rungs(fields.columns, fields.height, fields.rungs)
    }
}

impl Ladder {
    /// A ladder with no rungs: every token goes straight down.
    pub fn empty(columns: usize, height: f64) -> Self {
        Self {
            columns,
            height,
            rungs: Vec::new(),
        }
    }

    /// Build a ladder from hand-placed rungs. Rungs may come in any order,
    /// but two rungs meeting the same column at the same height are rejected.
    pub fn from_rungs(
        columns: usize,
        height: f64,
        mut rungs: Vec<Rung>,
    ) -> Result<Self, ConfigError> {
        if columns < 2 {
            return Err(ConfigError::TooFewColumns { columns });
        }
        if let Some(bad) = rungs.iter().find(|r| {
            r.left_column < 1
                || r.right_column != r.left_column + 1
                || r.right_column > columns
                || !r.height.is_finite()
                || r.height <= 0.0
                || r.height >= height
        }) {
            return Err(ConfigError::InvalidRung {
                left: bad.left_column,
                right: bad.right_column,
                height: bad.height,
                columns,
            });
        }
        rungs.sort_by(|a, b| a.height.total_cmp(&b.height));
        for (i, a) in rungs.iter().enumerate() {
            let overlap = rungs[i + 1..]
                .iter()
                .take_while(|b| b.height == a.height)
                .find_map(|b| {
                    [b.left_column, b.right_column]
                        .into_iter()
                        .find(|&c| a.touches(c))
                });
            if let Some(column) = overlap {
                return Err(ConfigError::OverlappingRungs {
                    column,
                    height: a.height,
                });
            }
        }
        Ok(Self {
            columns,
            height,
            rungs,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }

    pub fn len(&self) -> usize {
        self.rungs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rungs.is_empty()
    }

    /// The first rung (smallest height) touching `column` with `above < height <= through`.
    /// Among rungs at the same height the first in ladder order wins.
    pub fn first_crossing(&self, column: Column, above: f64, through: f64) -> Option<&Rung> {
        let start = self.rungs.partition_point(|r| r.height <= above);
        self.rungs[start..]
            .iter()
            .take_while(|r| r.height <= through)
            .find(|r| r.touches(column))
    }

    /// Smallest vertical gap between two rungs sharing a column,
    /// or None when no column has two rungs.
    pub fn min_shared_column_gap(&self) -> Option<f64> {
        (1..=self.columns)
            .filter_map(|column| {
                let heights: Vec<f64> = self
                    .rungs
                    .iter()
                    .filter(|r| r.touches(column))
                    .map(|r| r.height)
                    .collect();
                heights
                    .windows(2)
                    .map(|w| w[1] - w[0])
                    .min_by(f64::total_cmp)
            })
            .min_by(f64::total_cmp)
    }
}

/// Generate the rungs for `columns` lines over a vertical extent of `height`.
///
/// Rung `i` of `n` is placed near the centre of the `i`-th of `n + 1`
/// equal segments, jittered by up to a quarter segment either way, on a
/// uniformly chosen gap.
pub fn generate(
    columns: usize,
    height: f64,
    params: &LadderParams,
    rng: &mut StreamRng,
) -> Result<Ladder, ConfigError> {
    let count = params.candidate_count(columns, height)?;
    let top = params.margin;
    let bottom = height - params.margin;
    let segment = height / (count + 1) as f64;

    let mut candidates: Vec<Rung> = (0..count)
        .map(|i| {
            let left = 1 + rng.next_index(columns - 1);
            let centre = segment * (i + 1) as f64;
            let jitter = (rng.next_f64() - 0.5) * segment * 0.5;
            Rung::new(left, (centre + jitter).clamp(top, bottom))
        })
        .collect();
    candidates.sort_by(|a, b| a.height.total_cmp(&b.height));

    let rungs = match params.policy {
        SeparationPolicy::Adjacent => separate_adjacent(candidates, params.min_separation, bottom),
        SeparationPolicy::PerColumn => {
            separate_per_column(candidates, columns, params.min_separation, bottom)
        }
    };

    let dropped = count - rungs.len();
    if dropped > 0 {
        log::debug!(
            "ladder: {dropped} of {count} rungs did not fit above {bottom:.1} ({:?})",
            params.policy
        );
    }
    log::debug!(
        "ladder: columns={columns} height={height} rungs={} policy={:?}",
        rungs.len(),
        params.policy
    );

    Ok(Ladder {
        columns,
        height,
        rungs,
    })
}

fn separate_adjacent(sorted: Vec<Rung>, min_separation: f64, bottom: f64) -> Vec<Rung> {
    let mut placed: Vec<Rung> = Vec::with_capacity(sorted.len());
    for mut rung in sorted {
        if let Some(prev) = placed.last() {
            if rung.height - prev.height < min_separation {
                let pushed = prev.height + min_separation;
                if pushed > bottom {
                    continue;
                }
                rung.height = pushed;
            }
        }
        placed.push(rung);
    }
    placed
}

fn separate_per_column(
    sorted: Vec<Rung>,
    columns: usize,
    min_separation: f64,
    bottom: f64,
) -> Vec<Rung> {
    let mut last_on: Vec<Option<f64>> = vec![None; columns + 1];
    let mut placed: Vec<Rung> = Vec::with_capacity(sorted.len());
    for mut rung in sorted {
        let earliest = [rung.left_column, rung.right_column]
            .iter()
            .filter_map(|&c| last_on[c])
            .map(|h| h + min_separation)
            .fold(rung.height, f64::max);
        if earliest > bottom {
            continue;
        }
        rung.height = earliest;
        last_on[rung.left_column] = Some(earliest);
        last_on[rung.right_column] = Some(earliest);
        placed.push(rung);
    }
    // Pushes can overtake later candidates on other columns.
    placed.sort_by(|a, b| a.height.total_cmp(&b.height));
    placed
}
