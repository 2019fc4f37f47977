//! Game sessions.
//!
//! This module contains the `GameSession` struct, which owns everything a
//! single game needs: the grid, the players, the turn engine and the random
//! source for computer players. Sessions share nothing with each other.

use crate::bot::Bot;
use crate::grid::{CellOwner, Grid, PlayerId};
use crate::outcome::{GameOutcome, Placement};
use crate::player::{Player, MIN_PLAYERS};
use crate::turn::TurnEngine;
use crate::win::{WinDetector, MIN_RUN};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

/// Default board width
pub const DEFAULT_WIDTH: usize = 7;

/// Default board height
pub const DEFAULT_HEIGHT: usize = 6;

/// Default tokens in a row needed to win
pub const DEFAULT_WIN_LENGTH: usize = 4;

/// Errors that can occur when setting up or playing a game
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Board must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Win length must be at least 2, got {0}")]
    InvalidWinLength(usize),

    #[error("At least 2 players are needed")]
    NotEnoughPlayers,

    #[error("There can only be up to {max} players")]
    TooManyPlayers { max: usize },

    #[error("Player ids must run from 1 in turn order")]
    InvalidRoster,

    #[error("Names may only contain letters and spaces")]
    InvalidName,

    #[error("Token must be a single letter")]
    InvalidToken,

    #[error("Token {0} has already been selected by another player")]
    TokenTaken(char),

    #[error("No tokens left for computer players")]
    NoComputerTokens,

    #[error("Column {column} is outside the board (width {width})")]
    InvalidColumn { column: usize, width: usize },

    #[error("Game is over")]
    GameOver,

    #[error("Cannot apply '{trigger}' during the '{phase}' phase")]
    InvalidTransition { phase: String, trigger: String },
}

/// Board shape and win condition, fixed for the whole game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    /// Tokens in a row needed to win
    pub win_length: usize,
}

impl BoardConfig {
    pub fn new(width: usize, height: usize, win_length: usize) -> Self {
        Self {
            width,
            height,
            win_length,
        }
    }

    /// Check the configuration can be played
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.win_length < MIN_RUN {
            return Err(GameError::InvalidWinLength(self.win_length));
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_WIN_LENGTH)
    }
}

/// Serializable view of a session, for display and debugging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: BoardConfig,
    pub players: Vec<Player>,
    /// Grid rows, top to bottom
    pub rows: Vec<Vec<CellOwner>>,
    pub current_player: PlayerId,
    pub moves_made: usize,
    pub outcome: Option<GameOutcome>,
}

/// Start a game on a `width` x `height` board
pub fn new_game(
    width: usize,
    height: usize,
    win_length: usize,
    players: Vec<Player>,
) -> Result<GameSession, GameError> {
    GameSession::new(BoardConfig::new(width, height, win_length), players)
}

/// One game from the first drop to a win or draw
#[derive(Debug, Clone)]
pub struct GameSession {
    config: BoardConfig,
    grid: Grid,
    players: Vec<Player>,
    engine: TurnEngine,
    bot: Bot,
    /// Set once a move decides the game
    outcome: Option<GameOutcome>,
}

impl GameSession {
    /// Create a session. Computer players draw from OS entropy.
    pub fn new(config: BoardConfig, players: Vec<Player>) -> Result<Self, GameError> {
        Self::with_bot(config, players, Bot::new())
    }

    /// Create a session with reproducible computer moves
    pub fn with_seed(config: BoardConfig, players: Vec<Player>, seed: u64) -> Result<Self, GameError> {
        Self::with_bot(config, players, Bot::with_seed(seed))
    }

    fn with_bot(config: BoardConfig, players: Vec<Player>, bot: Bot) -> Result<Self, GameError> {
        config.validate()?;
        Self::validate_players(&players)?;

        let grid = Grid::new(config.width, config.height).ok_or(GameError::InvalidDimensions {
            width: config.width,
            height: config.height,
        })?;
        let detector =
            WinDetector::new(config.win_length).ok_or(GameError::InvalidWinLength(config.win_length))?;

        info!(
            width = config.width,
            height = config.height,
            win_length = config.win_length,
            players = players.len(),
            "new game"
        );

        Ok(Self {
            config,
            grid,
            engine: TurnEngine::new(detector),
            players,
            bot,
            outcome: None,
        })
    }

    fn validate_players(players: &[Player]) -> Result<(), GameError> {
        if players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }

        let mut tokens = HashSet::new();
        for (i, player) in players.iter().enumerate() {
            if player.id as usize != i + 1 {
                return Err(GameError::InvalidRoster);
            }
            if !tokens.insert(player.token) {
                return Err(GameError::TokenTaken(player.token));
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Read-only view of the board for rendering
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player by id
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        (id as usize).checked_sub(1).and_then(|i| self.players.get(i))
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> &Player {
        &self.players[self.engine.current_index()]
    }

    /// The deciding outcome, once the game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get the winner if the game was won
    pub fn winner(&self) -> Option<&Player> {
        self.outcome
            .and_then(|o| o.winner())
            .and_then(|id| self.get_player(id))
    }

    /// Where the most recent token landed
    pub fn last_move(&self) -> Option<Placement> {
        self.engine.last_placement()
    }

    /// Successful drops so far
    pub fn moves_made(&self) -> usize {
        self.grid.filled_cells()
    }

    /// Drop the current player's token into `column` (0-based).
    ///
    /// Out-of-range columns are refused without touching the game. A full
    /// column comes back as [`GameOutcome::ColumnFull`] and the same player
    /// must choose again.
    pub fn submit_move(&mut self, column: usize) -> Result<GameOutcome, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        if column >= self.grid.width() {
            return Err(GameError::InvalidColumn {
                column,
                width: self.grid.width(),
            });
        }

        let outcome = self.engine.step(&mut self.grid, &self.players, column)?;
        self.record(outcome);
        Ok(outcome)
    }

    /// Let the random policy move for the current player.
    ///
    /// A full board is reported as a draw up front, so this never spins
    /// looking for an open column.
    pub fn play_computer_turn(&mut self) -> Result<GameOutcome, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        if self.grid.is_full() {
            debug!("no open columns left for computer move");
            return Ok(self.declare_draw());
        }

        match self.bot.choose_column(&self.grid) {
            Some(column) => self.submit_move(column),
            None => Ok(self.declare_draw()),
        }
    }

    fn declare_draw(&mut self) -> GameOutcome {
        self.record(GameOutcome::Draw);
        GameOutcome::Draw
    }

    fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win {
                player,
                axis,
                run_length,
            } => {
                info!(player, axis = axis.name(), run_length, "game won");
                self.outcome = Some(outcome);
            }
            GameOutcome::Draw => {
                info!(moves = self.moves_made(), "game drawn");
                self.outcome = Some(outcome);
            }
            GameOutcome::Ongoing | GameOutcome::ColumnFull => {}
        }
    }

    /// Serializable copy of the current state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config,
            players: self.players.clone(),
            rows: self.grid.to_rows(),
            current_player: self.current_player().id,
            moves_made: self.moves_made(),
            outcome: self.outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::win::Axis;

    fn two_players() -> Vec<Player> {
        vec![Player::human(1, "Ann", 'A'), Player::computer(2, "Ada", 'X')]
    }

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config, BoardConfig::new(7, 6, 4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_config_fails_fast() {
        assert_eq!(
            new_game(0, 6, 4, two_players()).unwrap_err(),
            GameError::InvalidDimensions {
                width: 0,
                height: 6
            }
        );
        assert_eq!(
            new_game(7, 6, 1, two_players()).unwrap_err(),
            GameError::InvalidWinLength(1)
        );
    }

    #[test]
    fn test_bad_rosters_rejected() {
        let solo = vec![Player::human(1, "Ann", 'A')];
        assert_eq!(new_game(7, 6, 4, solo).unwrap_err(), GameError::NotEnoughPlayers);

        let shuffled = vec![Player::human(2, "Ann", 'A'), Player::human(1, "Bob", 'B')];
        assert_eq!(new_game(7, 6, 4, shuffled).unwrap_err(), GameError::InvalidRoster);

        let clash = vec![Player::human(1, "Ann", 'A'), Player::human(2, "Bob", 'A')];
        assert_eq!(new_game(7, 6, 4, clash).unwrap_err(), GameError::TokenTaken('A'));
    }

    #[test]
    fn test_invalid_column_leaves_game_untouched() {
        let mut game = new_game(7, 6, 4, two_players()).unwrap();
        assert_eq!(
            game.submit_move(7),
            Err(GameError::InvalidColumn {
                column: 7,
                width: 7
            })
        );
        assert_eq!(game.current_player().id, 1);
        assert_eq!(game.moves_made(), 0);
    }

    #[test]
    fn test_moves_refused_after_win() {
        let mut game = new_game(4, 4, 2, two_players()).unwrap();
        game.submit_move(0).unwrap();
        game.submit_move(3).unwrap();
        let outcome = game.submit_move(1).unwrap();

        assert_eq!(
            outcome,
            GameOutcome::Win {
                player: 1,
                axis: Axis::Horizontal,
                run_length: 2
            }
        );
        assert!(game.is_over());
        assert_eq!(game.winner().map(|p| p.name.as_str()), Some("Ann"));
        assert_eq!(game.submit_move(2), Err(GameError::GameOver));
        assert_eq!(game.play_computer_turn(), Err(GameError::GameOver));
    }

    #[test]
    fn test_computer_game_always_terminates() {
        let players = vec![Player::computer(1, "Ada", 'X'), Player::computer(2, "Alan", 'Y')];
        for seed in 0..20 {
            let mut game =
                GameSession::with_seed(BoardConfig::new(5, 5, 5), players.clone(), seed).unwrap();
            let mut turns = 0;
            while !game.is_over() {
                let outcome = game.play_computer_turn().unwrap();
                assert_ne!(outcome, GameOutcome::ColumnFull);
                turns += 1;
                assert!(turns <= 25, "game did not finish");
            }
        }
    }

    #[test]
    fn test_last_move_tracks_placement() {
        let mut game = new_game(7, 6, 4, two_players()).unwrap();
        assert_eq!(game.last_move(), None);
        game.submit_move(2).unwrap();
        assert_eq!(
            game.last_move(),
            Some(Placement {
                player: 1,
                column: 2,
                row: 5
            })
        );
        assert_eq!(game.current_player().id, 2);
    }

    #[test]
    fn test_snapshot_json() {
        let mut game = new_game(3, 3, 3, two_players()).unwrap();
        game.submit_move(1).unwrap();

        let json = serde_json::to_string(&game.snapshot()).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rows[2][1], CellOwner::Player(1));
        assert_eq!(back.current_player, 2);
        assert_eq!(back.moves_made, 1);
        assert_eq!(back.outcome, None);
    }
}
