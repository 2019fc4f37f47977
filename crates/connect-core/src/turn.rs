//! Turn rotation and move resolution.

use crate::game::GameError;
use crate::grid::{DropError, Grid};
use crate::outcome::{GameOutcome, Placement};
use crate::player::Player;
use crate::win::WinDetector;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rotates through the players and resolves each drop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnEngine {
    /// Index into the player list of whoever moves next
    current: usize,
    detector: WinDetector,
    /// Last successful drop
    last_placement: Option<Placement>,
}

impl TurnEngine {
    /// Create an engine starting with the first player
    pub fn new(detector: WinDetector) -> Self {
        Self {
            current: 0,
            detector,
            last_placement: None,
        }
    }

    /// Index of the player whose turn it is
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn detector(&self) -> &WinDetector {
        &self.detector
    }

    pub fn last_placement(&self) -> Option<Placement> {
        self.last_placement
    }

    /// Drop the current player's token into `column` and resolve the result.
    ///
    /// The turn only passes on [`GameOutcome::Ongoing`]. A full column leaves
    /// the grid and the turn untouched so the same player can retry. A column
    /// outside the grid is an error, not a retry.
    pub fn step(
        &mut self,
        grid: &mut Grid,
        players: &[Player],
        column: usize,
    ) -> Result<GameOutcome, GameError> {
        if players.is_empty() {
            return Err(GameError::NotEnoughPlayers);
        }
        let player = players.get(self.current).ok_or(GameError::InvalidRoster)?.id;

        let row = match grid.drop(column, player) {
            Ok(row) => row,
            Err(DropError::ColumnFull) => {
                debug!(player, column, "column full");
                return Ok(GameOutcome::ColumnFull);
            }
            Err(DropError::InvalidColumn) => {
                return Err(GameError::InvalidColumn {
                    column,
                    width: grid.width(),
                });
            }
        };

        self.last_placement = Some(Placement {
            player,
            column,
            row,
        });
        debug!(player, column, row, "token dropped");

        if let Some(line) = self.detector.check(grid, column, row, player) {
            return Ok(GameOutcome::Win {
                player,
                axis: line.axis,
                run_length: line.run_length,
            });
        }

        if grid.is_full() {
            return Ok(GameOutcome::Draw);
        }

        self.current = (self.current + 1) % players.len();
        Ok(GameOutcome::Ongoing)
    }
}
