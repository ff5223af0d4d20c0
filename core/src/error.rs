use crate::types::Column;
use thiserror::Error;

/// Everything that can be wrong with a round before it starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("At least 2 columns are required, got {columns}")]
    TooFewColumns { columns: usize },

    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Expected {expected} participant names, got {actual}")]
    ParticipantCountMismatch { expected: usize, actual: usize },

    #[error("Height {height} leaves no room for rungs with a margin of {margin}")]
    NoUsableHeight { height: f64, margin: f64 },

    #[error("Invalid rung {left}-{right} at height {height} on a {columns}-column ladder")]
    InvalidRung {
        left: Column,
        right: Column,
        height: f64,
        columns: usize,
    },

    #[error("Two rungs meet column {column} at the same height {height}")]
    OverlappingRungs { column: Column, height: f64 },

    #[error("{requested} rungs requested, at most {limit} can be placed")]
    TooManyRungs { requested: f64, limit: f64 },

    #[error("Entry columns must be a permutation of 1..={columns}")]
    EntryColumnsNotPermutation { columns: usize },

    #[error("Expected {expected} exit labels, got {actual}")]
    ExitLabelCountMismatch { expected: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum AmidaError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AmidaResult<T> = Result<T, AmidaError>;
