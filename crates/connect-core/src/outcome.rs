//! Results of a move attempt.

use crate::grid::PlayerId;
use crate::win::Axis;
use serde::{Deserialize, Serialize};

/// What happened when the current player tried a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Token placed, next player's turn
    Ongoing,
    /// Token placed and completed a run
    Win {
        player: PlayerId,
        axis: Axis,
        run_length: usize,
    },
    /// Column had no room; same player tries again
    ColumnFull,
    /// Token placed and filled the board without a winner
    Draw,
}

impl GameOutcome {
    /// Check if this outcome ends the game
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameOutcome::Win { .. } | GameOutcome::Draw)
    }

    /// Check if a token was actually placed
    pub fn placed_token(&self) -> bool {
        !matches!(self, GameOutcome::ColumnFull)
    }

    /// Get the winner, if any
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameOutcome::Win { player, .. } => Some(*player),
            _ => None,
        }
    }
}

/// Where a token landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub player: PlayerId,
    pub column: usize,
    pub row: usize,
}
