use crate::{
    error::ConfigError,
    ladder::{LadderParams, SeparationPolicy},
    layout::ColumnLayout,
    token::Motion,
};
use serde::{Deserialize, Serialize};

/// Everything needed to set up a round.
///
/// Defaults are the classic 12-lane board: 900 wide, 600 tall,
/// tokens of radius 8 moving 2 units per tick, three rungs per gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub columns: usize,
    pub canvas_width: f64,
    pub boundary_height: f64,
    pub step_size: f64,
    pub token_radius: f64,
    pub avg_rungs_per_gap: f64,
    /// Minimum vertical gap between rungs. Derived from radius and
    /// step size when absent.
    pub min_rung_separation: Option<f64>,
    pub separation_policy: SeparationPolicy,
    /// Either empty (all defaults) or exactly `columns` names.
    pub participants: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 12,
            canvas_width: 900.0,
            boundary_height: 600.0,
            step_size: 2.0,
            token_radius: 8.0,
            avg_rungs_per_gap: 3.0,
            min_rung_separation: None,
            separation_policy: SeparationPolicy::Adjacent,
            participants: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GameConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    /// A config with `columns` lanes and everything else at its default.
    pub fn with_columns(columns: usize) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Reject anything a round cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < 2 {
            return Err(ConfigError::TooFewColumns {
                columns: self.columns,
            });
        }
        positive("canvas_width", self.canvas_width)?;
        positive("boundary_height", self.boundary_height)?;
        positive("step_size", self.step_size)?;
        non_negative("token_radius", self.token_radius)?;
        non_negative("avg_rungs_per_gap", self.avg_rungs_per_gap)?;
        if let Some(d) = self.min_rung_separation {
            positive("min_rung_separation", d)?;
        }

        let margin = self.rung_margin();
        if self.boundary_height - margin <= margin {
            return Err(ConfigError::NoUsableHeight {
                height: self.boundary_height,
                margin,
            });
        }
        self.ladder_params()
            .candidate_count(self.columns, self.boundary_height)?;

        if !self.participants.is_empty() && self.participants.len() != self.columns {
            return Err(ConfigError::ParticipantCountMismatch {
                expected: self.columns,
                actual: self.participants.len(),
            });
        }
        Ok(())
    }

    /// Explicit separation, or enough room for a token plus two ticks
    /// of motion so no step ever sees two rungs.
    pub fn min_rung_separation(&self) -> f64 {
        self.min_rung_separation
            .unwrap_or(self.token_radius * 2.0 + self.step_size * 2.0)
    }

    /// Rungs stay this far from the top and bottom.
    pub fn rung_margin(&self) -> f64 {
        self.token_radius * 2.0
    }

    /// Trimmed participant names, one per column. Blank or missing
    /// entries become "Participant N".
    pub fn participant_names(&self) -> Vec<String> {
        (0..self.columns)
            .map(|i| {
                self.participants
                    .get(i)
                    .map(|name| name.trim())
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Participant {}", i + 1))
            })
            .collect()
    }

    pub fn layout(&self) -> ColumnLayout {
        ColumnLayout::for_canvas(self.canvas_width, self.columns)
    }

    pub fn motion(&self) -> Motion {
        Motion {
            step_size: self.step_size,
            boundary_height: self.boundary_height,
            layout: self.layout(),
        }
    }

    pub fn ladder_params(&self) -> LadderParams {
        LadderParams {
            avg_rungs_per_gap: self.avg_rungs_per_gap,
            min_separation: self.min_rung_separation(),
            margin: self.rung_margin(),
            policy: self.separation_policy,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
