//! The per-token routing state machine.
//!
//! `advance` is a pure function of a token, the ladder and the motion
//! parameters. Replaying the same ladder from the same entry columns
//! always produces the same paths.

use crate::{
    ladder::Ladder,
    layout::ColumnLayout,
    types::{Column, TokenId},
};
use serde::{Deserialize, Serialize};

/// Per-tick motion parameters shared by every token of a round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub step_size: f64,
    pub boundary_height: f64,
    pub layout: ColumnLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    fn toward(from: Column, to: Column) -> Self {
        if to > from {
            Self::Right
        } else {
            Self::Left
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Descending,
    Traversing { direction: Direction, target_x: f64 },
    Finished { final_column: Column },
}

/// A participant's marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub entry_column: Column,
    /// While traversing this is already the rung's far column.
    pub current_column: Column,
    pub x: f64,
    /// Progress down the ladder. Never decreases.
    pub position: f64,
    pub phase: Phase,
}

impl Token {
    pub fn new(id: TokenId, entry_column: Column, layout: &ColumnLayout) -> Self {
        Self {
            id,
            entry_column,
            current_column: entry_column,
            x: layout.x(entry_column),
            position: 0.0,
            phase: Phase::Descending,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    pub fn final_column(&self) -> Option<Column> {
        match self.phase {
            Phase::Finished { final_column } => Some(final_column),
            _ => None,
        }
    }
}

/// What a single `advance` call changed, beyond plain motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    EnteredRung {
        from_column: Column,
        to_column: Column,
        height: f64,
    },
    LeftRung {
        column: Column,
    },
    Finished {
        final_column: Column,
    },
}

/// Move `token` by one tick.
pub fn advance(token: &Token, ladder: &Ladder, motion: &Motion) -> (Token, Option<Transition>) {
    let mut next = *token;
    match token.phase {
        Phase::Finished { .. } => (next, None),

        Phase::Traversing {
            direction,
            target_x,
        } => {
            next.x += motion.step_size * direction.sign();
            let reached = match direction {
                Direction::Right => next.x >= target_x,
                Direction::Left => next.x <= target_x,
            };
            if !reached {
                return (next, None);
            }
            next.x = target_x;
            next.phase = Phase::Descending;
            (
                next,
                Some(Transition::LeftRung {
                    column: next.current_column,
                }),
            )
        }

        Phase::Descending => {
            let above = token.position;
            let through = above + motion.step_size;

            // A pending crossing is resolved before the token may finish.
            let crossing = ladder
                .first_crossing(token.current_column, above, through)
                .filter(|rung| rung.height < motion.boundary_height)
                .and_then(|rung| {
                    rung.other_end(token.current_column)
                        .map(|to| (to, rung.height))
                });

            if let Some((to_column, height)) = crossing {
                let from_column = token.current_column;
                next.position = height;
                next.current_column = to_column;
                next.phase = Phase::Traversing {
                    direction: Direction::toward(from_column, to_column),
                    target_x: motion.layout.x(to_column),
                };
                return (
                    next,
                    Some(Transition::EnteredRung {
                        from_column,
                        to_column,
                        height,
                    }),
                );
            }

            if through >= motion.boundary_height {
                next.position = motion.boundary_height;
                next.phase = Phase::Finished {
                    final_column: token.current_column,
                };
                return (
                    next,
                    Some(Transition::Finished {
                        final_column: token.current_column,
                    }),
                );
            }

            next.position = through;
            (next, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::Rung;

    fn motion() -> Motion {
        Motion {
            step_size: 2.0,
            boundary_height: 600.0,
            layout: ColumnLayout::new(100.0),
        }
    }

    #[test]
    fn descends_by_one_step() {
        let ladder = Ladder::empty(2, 600.0);
        let token = Token::new(0, 1, &motion().layout);
        let (next, transition) = advance(&token, &ladder, &motion());
        assert_eq!(next.position, 2.0);
        assert_eq!(next.x, 100.0);
        assert!(transition.is_none());
    }

    #[test]
    fn snaps_onto_rung_and_switches_column() {
        let ladder = Ladder::from_rungs(2, 600.0, vec![Rung::new(1, 301.0)]).unwrap();
        let mut token = Token::new(0, 2, &motion().layout);
        token.position = 300.0;
        let (next, transition) = advance(&token, &ladder, &motion());
        assert_eq!(next.position, 301.0);
        assert_eq!(next.current_column, 1);
        assert_eq!(
            next.phase,
            Phase::Traversing {
                direction: Direction::Left,
                target_x: 100.0
            }
        );
        assert_eq!(
            transition,
            Some(Transition::EnteredRung {
                from_column: 2,
                to_column: 1,
                height: 301.0
            })
        );
    }

    #[test]
    fn traversal_snaps_to_target_without_descending() {
        let ladder = Ladder::empty(2, 600.0);
        let mut token = Token::new(0, 1, &motion().layout);
        token.current_column = 2;
        token.position = 50.0;
        token.x = 199.0;
        token.phase = Phase::Traversing {
            direction: Direction::Right,
            target_x: 200.0,
        };
        let (next, transition) = advance(&token, &ladder, &motion());
        assert_eq!(next.x, 200.0);
        assert_eq!(next.position, 50.0);
        assert_eq!(next.phase, Phase::Descending);
        assert_eq!(transition, Some(Transition::LeftRung { column: 2 }));
    }

    #[test]
    fn finishes_at_boundary() {
        let ladder = Ladder::empty(2, 600.0);
        let mut token = Token::new(1, 2, &motion().layout);
        token.position = 599.0;
        let (next, transition) = advance(&token, &ladder, &motion());
        assert_eq!(next.position, 600.0);
        assert_eq!(next.final_column(), Some(2));
        assert_eq!(transition, Some(Transition::Finished { final_column: 2 }));
    }

    #[test]
    fn pending_crossing_beats_finishing() {
        let ladder = Ladder::from_rungs(2, 600.0, vec![Rung::new(1, 599.5)]).unwrap();
        let mut token = Token::new(0, 1, &motion().layout);
        token.position = 599.0;
        let (next, _) = advance(&token, &ladder, &motion());
        assert!(!next.is_finished());
        assert_eq!(next.current_column, 2);
        assert_eq!(next.position, 599.5);
    }

    #[test]
    fn finished_token_is_frozen() {
        let ladder = Ladder::empty(2, 600.0);
        let mut token = Token::new(0, 1, &motion().layout);
        token.position = 600.0;
        token.phase = Phase::Finished { final_column: 1 };
        let (next, transition) = advance(&token, &ladder, &motion());
        assert_eq!(next, token);
        assert!(transition.is_none());
    }
}
