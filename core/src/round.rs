//! The simulation driver: one round of the game.
//!
//! RULES:
//!   - A Round exclusively owns its ladder and tokens. Nothing outlives it.
//!   - The ladder never changes after construction.
//!   - `step()` advances every unfinished token exactly once, in token order.
//!   - The host owns the tick source; `step()` never blocks.

use crate::{
    config::GameConfig,
    error::{AmidaResult, ConfigError},
    event::RoundEvent,
    labels::{self, Entrant},
    ladder::{self, Ladder},
    rng::{RngBank, StreamSlot},
    sink::{Frame, Placement, RoundResults, TokenView},
    token::{advance, Motion, Token, Transition},
    types::{RoundNo, Tick, TokenId},
};

/// Result of one `step()` call.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub tick: Tick,
    pub all_finished: bool,
    pub events: Vec<RoundEvent>,
}

pub struct Round {
    motion: Motion,
    ladder: Ladder,
    entrants: Vec<Entrant>,
    exit_labels: Vec<String>,
    tokens: Vec<Token>,
    tick: Tick,
    results: Option<RoundResults>,
}

impl Round {
    /// Build round `round` of a session: fresh ladder, colours and exit labels.
    pub fn generate(config: &GameConfig, bank: &RngBank, round: RoundNo) -> AmidaResult<Self> {
        config.validate()?;

        let mut rng = bank.for_round(round, StreamSlot::Ladder);
        let ladder = ladder::generate(
            config.columns,
            config.boundary_height,
            &config.ladder_params(),
            &mut rng,
        )?;
        let entrants = labels::entrants(config.participant_names(), bank, round);
        let exit_labels = labels::exit_labels(config.columns, bank, round);

        log::info!(
            "round {round}: seed={} columns={} rungs={}",
            bank.master_seed(),
            config.columns,
            ladder.len()
        );
        Self::from_parts(config.motion(), ladder, entrants, exit_labels)
    }

    /// Assemble a round from explicit parts. Entrant columns must be a
    /// permutation of the ladder's columns; token `i` is entrant `i`.
    pub fn from_parts(
        motion: Motion,
        ladder: Ladder,
        entrants: Vec<Entrant>,
        exit_labels: Vec<String>,
    ) -> AmidaResult<Self> {
        let columns = ladder.columns();
        if !(motion.step_size.is_finite() && motion.step_size > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "step_size",
                value: motion.step_size,
            }
            .into());
        }
        if !(motion.boundary_height.is_finite() && motion.boundary_height > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "boundary_height",
                value: motion.boundary_height,
            }
            .into());
        }
        let spacing = motion.layout.spacing;
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "spacing",
                value: spacing,
            }
            .into());
        }

        let mut seen = vec![false; columns + 1];
        let is_permutation = entrants.len() == columns
            && entrants.iter().all(|e| {
                let fresh = (1..=columns).contains(&e.column) && !seen[e.column];
                if fresh {
                    seen[e.column] = true;
                }
                fresh
            });
        if !is_permutation {
            return Err(ConfigError::EntryColumnsNotPermutation { columns }.into());
        }
        if exit_labels.len() != columns {
            return Err(ConfigError::ExitLabelCountMismatch {
                expected: columns,
                actual: exit_labels.len(),
            }
            .into());
        }

        let tokens = entrants
            .iter()
            .enumerate()
            .map(|(id, e)| Token::new(id, e.column, &motion.layout))
            .collect();

        Ok(Self {
            motion,
            ladder,
            entrants,
            exit_labels,
            tokens,
            tick: 0,
            results: None,
        })
    }

    /// Advance every unfinished token one tick.
    /// Once all tokens are done this is a no-op.
    pub fn step(&mut self) -> StepOutcome {
        if self.results.is_some() {
            return StepOutcome {
                tick: self.tick,
                all_finished: true,
                events: Vec::new(),
            };
        }

        let mut events = Vec::new();
        if self.tick == 0 {
            events.push(RoundEvent::RoundStarted {
                columns: self.ladder.columns(),
                rungs: self.ladder.len(),
            });
        }
        self.tick += 1;
        let tick = self.tick;

        for token in self.tokens.iter_mut().filter(|t| !t.is_finished()) {
            let (next, transition) = advance(token, &self.ladder, &self.motion);
            *token = next;
            if let Some(transition) = transition {
                let event = event_for(tick, next.id, transition);
                log::trace!("tick={tick} token={} {}", next.id, event.type_name());
                events.push(event);
            }
        }

        let all_finished = self.tokens.iter().all(Token::is_finished);
        if all_finished {
            let results = self.build_results();
            log::info!(
                "round complete after {tick} ticks: {:?}",
                results.exit_columns()
            );
            self.results = Some(results);
            events.push(RoundEvent::RoundCompleted { tick });
        }

        StepOutcome {
            tick,
            all_finished,
            events,
        }
    }

    /// Upper bound on the ticks this round can take: the straight descent,
    /// plus for every rung the snap tick and a full horizontal crossing.
    pub fn tick_budget(&self) -> Tick {
        let step = self.motion.step_size;
        let descent = (self.motion.boundary_height / step).ceil() as Tick;
        let per_rung = (self.motion.layout.spacing / step).ceil() as Tick + 2;
        descent + self.ladder.len() as Tick * per_rung
    }

    /// Drawable view of the current tick.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            tick: self.tick,
            ladder: &self.ladder,
            layout: self.motion.layout,
            tokens: self
                .tokens
                .iter()
                .zip(&self.entrants)
                .filter(|(t, _)| !t.is_finished())
                .map(|(t, e)| TokenView {
                    id: t.id,
                    name: &e.name,
                    color: &e.color,
                    x: t.x,
                    y: t.position,
                })
                .collect(),
        }
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn ladder(&self) -> &Ladder {
        &self.ladder
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    pub fn exit_labels(&self) -> &[String] {
        &self.exit_labels
    }

    /// Published once every token has finished.
    pub fn results(&self) -> Option<&RoundResults> {
        self.results.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.results.is_some()
    }

    fn build_results(&self) -> RoundResults {
        let mut placements: Vec<Placement> = self
            .tokens
            .iter()
            .zip(&self.entrants)
            .filter_map(|(token, entrant)| {
                token.final_column().map(|final_column| Placement {
                    final_column,
                    exit_label: self
                        .exit_labels
                        .get(final_column - 1)
                        .cloned()
                        .unwrap_or_default(),
                    participant: entrant.name.clone(),
                    entry_column: entrant.column,
                })
            })
            .collect();
        placements.sort_by_key(|p| (p.final_column, p.entry_column));
        RoundResults {
            ticks: self.tick,
            placements,
        }
    }
}

fn event_for(tick: Tick, token: TokenId, transition: Transition) -> RoundEvent {
    match transition {
        Transition::EnteredRung {
            from_column,
            to_column,
            height,
        } => RoundEvent::RungEntered {
            tick,
            token,
            from_column,
            to_column,
            height,
        },
        Transition::LeftRung { column } => RoundEvent::RungLeft {
            tick,
            token,
            column,
        },
        Transition::Finished { final_column } => RoundEvent::TokenFinished {
            tick,
            token,
            final_column,
        },
    }
}
