//! Win detection around the most recently placed token.
//!
//! Only the lines passing through the new token can have changed, so the
//! detector walks outwards from that cell along four axes instead of
//! scanning the whole grid.

use crate::grid::{CellOwner, Grid, PlayerId};
use serde::{Deserialize, Serialize};

/// Smallest run length that makes a playable game
pub const MIN_RUN: usize = 2;

/// Line orientation checked for a win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Along a row
    Horizontal,
    /// Along a column
    Vertical,
    /// `/` shaped: column and row indices move in opposite senses
    ForwardDiagonal,
    /// `\` shaped: column and row indices move in the same sense
    BackwardDiagonal,
}

impl Axis {
    /// All axes, in the order they are checked
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::ForwardDiagonal,
        Axis::BackwardDiagonal,
    ];

    /// Column and row step for one direction along this axis.
    /// The opposite direction is the negated step.
    pub fn step(&self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (1, 0),
            Axis::Vertical => (0, 1),
            Axis::ForwardDiagonal => (1, -1),
            Axis::BackwardDiagonal => (1, 1),
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
            Axis::ForwardDiagonal => "forward diagonal",
            Axis::BackwardDiagonal => "backward diagonal",
        }
    }
}

/// A winning line found through the placed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLine {
    pub axis: Axis,
    /// Tokens counted along the axis, including the placed one
    pub run_length: usize,
}

/// Checks whether a placed token completes a run of the required length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinDetector {
    required_run: usize,
}

impl WinDetector {
    /// Create a detector. Runs shorter than [`MIN_RUN`] are refused.
    pub fn new(required_run: usize) -> Option<Self> {
        if required_run < MIN_RUN {
            return None;
        }
        Some(Self { required_run })
    }

    /// Tokens in a row needed to win
    pub fn required_run(&self) -> usize {
        self.required_run
    }

    /// Check the four axes through `(column, row)` for `player`.
    ///
    /// The first axis reaching the required run is reported; later axes are
    /// not examined.
    pub fn check(
        &self,
        grid: &Grid,
        column: usize,
        row: usize,
        player: PlayerId,
    ) -> Option<WinLine> {
        for axis in Axis::ALL {
            let (dc, dr) = axis.step();
            let tally = 1
                + self.walk(grid, column, row, dc, dr, player)
                + self.walk(grid, column, row, -dc, -dr, player);

            if tally >= self.required_run {
                return Some(WinLine {
                    axis,
                    run_length: tally,
                });
            }
        }

        None
    }

    /// Count consecutive `player` tokens leaving `(column, row)` in one
    /// direction, at most `required_run - 1` steps.
    fn walk(
        &self,
        grid: &Grid,
        column: usize,
        row: usize,
        dc: isize,
        dr: isize,
        player: PlayerId,
    ) -> usize {
        let target = CellOwner::Player(player);
        let mut count = 0;

        for step in 1..self.required_run as isize {
            let c = column as isize + dc * step;
            let r = row as isize + dr * step;
            if c < 0 || r < 0 {
                break;
            }
            match grid.owner(c as usize, r as usize) {
                Some(owner) if owner == target => count += 1,
                _ => break,
            }
        }

        count
    }
}
