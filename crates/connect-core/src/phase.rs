//! Game phase state machine.
//!
//! The phases run strictly in order:
//! `Start -> Setup -> Play -> (Win | Draw) -> End`.
//! `Play` repeats until a move decides the game.

use crate::game::GameError;
use crate::grid::PlayerId;
use crate::outcome::GameOutcome;
use crate::win::Axis;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    Start,
    /// Board and player registration
    Setup,
    /// Players take turns dropping tokens
    Play,
    /// A player completed a run
    Win {
        player: PlayerId,
        axis: Axis,
        run_length: usize,
    },
    /// Board filled with no winner
    Draw,
    /// Closing message; the session loop stops
    End,
}

/// Events that move the machine forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseTrigger {
    /// Leave the title screen
    Begin,
    /// Board built and players registered
    Registered,
    /// A move was resolved during play
    Moved(GameOutcome),
    /// Result has been shown
    Acknowledge,
}

impl GamePhase {
    /// Apply a trigger, returning the next phase.
    ///
    /// Any trigger that does not belong to the current phase is refused and
    /// the phase is unchanged.
    pub fn advance(self, trigger: PhaseTrigger) -> Result<GamePhase, GameError> {
        let next = match (self, trigger) {
            (GamePhase::Start, PhaseTrigger::Begin) => GamePhase::Setup,
            (GamePhase::Setup, PhaseTrigger::Registered) => GamePhase::Play,
            (GamePhase::Play, PhaseTrigger::Moved(outcome)) => match outcome {
                GameOutcome::Ongoing | GameOutcome::ColumnFull => GamePhase::Play,
                GameOutcome::Win {
                    player,
                    axis,
                    run_length,
                } => GamePhase::Win {
                    player,
                    axis,
                    run_length,
                },
                GameOutcome::Draw => GamePhase::Draw,
            },
            (GamePhase::Win { .. } | GamePhase::Draw, PhaseTrigger::Acknowledge) => GamePhase::End,
            (phase, trigger) => {
                return Err(GameError::InvalidTransition {
                    phase: phase.name().to_string(),
                    trigger: trigger.name().to_string(),
                })
            }
        };

        if next != self {
            debug!(from = self.name(), to = next.name(), "phase changed");
        }
        Ok(next)
    }

    /// Whether the session loop should keep running
    pub fn is_running(&self) -> bool {
        !matches!(self, GamePhase::End)
    }

    /// Check if the game has been decided
    pub fn is_decided(&self) -> bool {
        matches!(self, GamePhase::Win { .. } | GamePhase::Draw)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::Setup => "setup",
            GamePhase::Play => "play",
            GamePhase::Win { .. } => "win",
            GamePhase::Draw => "draw",
            GamePhase::End => "end",
        }
    }
}

impl PhaseTrigger {
    pub fn name(&self) -> &'static str {
        match self {
            PhaseTrigger::Begin => "begin",
            PhaseTrigger::Registered => "registered",
            PhaseTrigger::Moved(_) => "moved",
            PhaseTrigger::Acknowledge => "acknowledge",
        }
    }
}
