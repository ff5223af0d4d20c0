//! Ghost-leg lottery (amidakuji) engine.
//!
//! Generates a ladder of rungs between vertical lines, then walks one
//! token per participant down through it, tick by tick, to a distinct exit.

pub mod config;
pub mod error;
pub mod event;
pub mod labels;
pub mod ladder;
pub mod layout;
pub mod permutation;
pub mod rng;
pub mod round;
pub mod session;
pub mod sink;
pub mod snapshot;
pub mod token;
pub mod types;
