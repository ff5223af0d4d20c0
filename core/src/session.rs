//! A game session: the owner of the current round and the reset control.
//!
//! RULE: A session holds at most one Round. Starting, resetting or
//! reconfiguring discards it outright; nothing carries over except the
//! master seed and the round counter that keeps successive rounds distinct.

use crate::{
    config::GameConfig,
    error::AmidaResult,
    rng::RngBank,
    round::Round,
    sink::{RenderSink, ResultsSink, RoundResults},
    types::RoundNo,
};

pub struct Session {
    config: GameConfig,
    rng_bank: RngBank,
    rounds_started: RoundNo,
    round: Option<Round>,
}

impl Session {
    /// Validates `config` up front; a session never holds a bad config.
    pub fn new(config: GameConfig, seed: u64) -> AmidaResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng_bank: RngBank::new(seed),
            rounds_started: 0,
            round: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rounds_started(&self) -> RoundNo {
        self.rounds_started
    }

    /// Discard any current round and set up a new one.
    pub fn start(&mut self) -> AmidaResult<&mut Round> {
        self.round = None;
        let round = Round::generate(&self.config, &self.rng_bank, self.rounds_started)?;
        self.rounds_started += 1;
        Ok(self.round.insert(round))
    }

    /// Drop the current round, mid-flight or not.
    pub fn reset(&mut self) {
        if let Some(round) = self.round.take() {
            log::debug!("reset: discarding round at tick {}", round.tick());
        }
    }

    /// Swap in a new config. Resets only if the config is accepted.
    pub fn reconfigure(&mut self, config: GameConfig) -> AmidaResult<()> {
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn round_mut(&mut self) -> Option<&mut Round> {
        self.round.as_mut()
    }

    /// Reference host loop: start a round, render every tick, publish
    /// the results once every token is home.
    pub fn run_round(
        &mut self,
        render: &mut dyn RenderSink,
        results: &mut dyn ResultsSink,
    ) -> AmidaResult<RoundResults> {
        let round = self.start()?;
        render.render(&round.frame());
        loop {
            let outcome = round.step();
            render.render(&round.frame());
            if outcome.all_finished {
                break;
            }
        }
        // A finished round always carries results.
        let outcome = round.results().cloned().unwrap_or_else(|| RoundResults {
            ticks: round.tick(),
            placements: Vec::new(),
        });
        results.publish(&outcome);
        Ok(outcome)
    }
}
