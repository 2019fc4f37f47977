//! Players and player registration.
//!
//! This module contains:
//! - Player struct with name, token and kind
//! - Roster for registering humans and computers with unique tokens
//! - Player-count limits derived from the board size

use crate::game::GameError;
use crate::grid::PlayerId;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fewest players a game can start with
pub const MIN_PLAYERS: usize = 2;

/// Tokens computer players prefer, in order of preference
pub const COMPUTER_TOKENS: [char; 4] = ['X', 'Y', 'Z', 'Q'];

/// Names handed out to computer players
pub const COMPUTER_NAMES: [&str; 10] = [
    "Howard", "Frances", "John", "Ada", "Charles", "Evelyn", "Bertrand", "Ida", "Alan", "Kathleen",
];

/// Whether a player picks columns themselves or by the random policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Computer,
}

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Turn-order id, starting at 1
    pub id: PlayerId,
    pub name: String,
    /// Single character shown on the board
    pub token: char,
    pub kind: PlayerKind,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, token: char, kind: PlayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            token,
            kind,
        }
    }

    pub fn human(id: PlayerId, name: impl Into<String>, token: char) -> Self {
        Self::new(id, name, token, PlayerKind::Human)
    }

    pub fn computer(id: PlayerId, name: impl Into<String>, token: char) -> Self {
        Self::new(id, name, token, PlayerKind::Computer)
    }

    pub fn is_computer(&self) -> bool {
        self.kind == PlayerKind::Computer
    }
}

/// Most players a board can hold: `floor(sqrt(width * height) / 2)`
pub fn max_players(width: usize, height: usize) -> usize {
    ((width * height) as f64).sqrt() as usize / 2
}

/// Ordered list of players being registered for a game.
///
/// Ids are handed out in registration order and tokens are kept unique.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
    capacity: usize,
}

impl Roster {
    /// Create a roster sized for a board
    pub fn for_board(width: usize, height: usize) -> Self {
        Self::with_capacity(max_players(width, height))
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            players: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Most players this roster accepts
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Check a requested human/computer split against the roster limits
    pub fn check_counts(&self, humans: usize, computers: usize) -> Result<(), GameError> {
        let total = humans + computers;
        if total > self.capacity {
            return Err(GameError::TooManyPlayers { max: self.capacity });
        }
        if total < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }
        Ok(())
    }

    /// Check if a token has already been claimed
    pub fn is_token_taken(&self, token: char) -> bool {
        self.players.iter().any(|p| p.token == token)
    }

    /// Register a human player.
    ///
    /// Names may only contain letters and spaces. The token must be a single
    /// ASCII letter and is stored upper-cased.
    pub fn add_human(&mut self, name: &str, token: &str) -> Result<&Player, GameError> {
        self.ensure_room()?;

        let name = validate_name(name)?;
        let token = parse_token(token)?;
        if self.is_token_taken(token) {
            return Err(GameError::TokenTaken(token));
        }

        Ok(self.push(name.to_string(), token, PlayerKind::Human))
    }

    /// Register a computer player with a random unused name and token
    pub fn add_computer<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Player, GameError> {
        self.ensure_room()?;

        let free_names: Vec<&str> = COMPUTER_NAMES
            .iter()
            .copied()
            .filter(|name| !self.players.iter().any(|p| p.name == *name))
            .collect();
        let name = match free_names.choose(&mut *rng) {
            Some(name) => name.to_string(),
            None => format!("Computer {}", self.players.len() + 1),
        };

        let preferred: Vec<char> = COMPUTER_TOKENS
            .iter()
            .copied()
            .filter(|t| !self.is_token_taken(*t))
            .collect();
        let token = match preferred.choose(&mut *rng) {
            Some(token) => *token,
            None => ('A'..='Z')
                .find(|t| !self.is_token_taken(*t))
                .ok_or(GameError::NoComputerTokens)?,
        };

        Ok(self.push(name, token, PlayerKind::Computer))
    }

    /// Finish registration and hand out the players in turn order
    pub fn into_players(self) -> Vec<Player> {
        self.players
    }

    fn ensure_room(&self) -> Result<(), GameError> {
        if self.players.len() >= self.capacity {
            return Err(GameError::TooManyPlayers { max: self.capacity });
        }
        Ok(())
    }

    fn push(&mut self, name: String, token: char, kind: PlayerKind) -> &Player {
        let id = (self.players.len() + 1) as PlayerId;
        self.players.push(Player::new(id, name, token, kind));
        &self.players[self.players.len() - 1]
    }
}

/// Trim a player name and check it only holds letters and spaces
pub fn validate_name(name: &str) -> Result<&str, GameError> {
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(GameError::InvalidName);
    }
    Ok(name)
}

/// Read a token: exactly one ASCII letter, returned upper-cased
pub fn parse_token(input: &str) -> Result<char, GameError> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(GameError::InvalidToken),
    }
}
