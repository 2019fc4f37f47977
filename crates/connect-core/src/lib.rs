//! Connect More - an N-player connect-K-in-a-row game engine
//!
//! This crate provides the core game logic for Connect More, including:
//! - A grid of any width and height with gravity-fill column drops
//! - Win detection along four axes from the most recent token
//! - Turn rotation for any number of human and computer players
//! - The phase state machine that drives a game from start to end
//!
//! # Architecture
//!
//! The engine is presentation agnostic. It can be compiled to:
//! - Native Rust for the terminal client
//! - WebAssembly for a browser front end (`wasm` feature)
//!
//! # Modules
//!
//! - [`grid`]: Cell storage and the drop rule
//! - [`win`]: Run detection around a placed token
//! - [`turn`]: Player rotation and move resolution
//! - [`player`]: Players and registration
//! - [`bot`]: Random column policy for computer players
//! - [`phase`]: Game phase state machine
//! - [`game`]: Game sessions

pub mod bot;
pub mod game;
pub mod grid;
pub mod outcome;
pub mod phase;
pub mod player;
pub mod turn;
#[cfg(feature = "wasm")]
pub mod wasm;
pub mod win;

// Re-export commonly used types
pub use bot::Bot;
pub use game::{new_game, BoardConfig, GameError, GameSession, GameSnapshot};
pub use grid::{CellOwner, DropError, Grid, PlayerId};
pub use outcome::{GameOutcome, Placement};
pub use phase::{GamePhase, PhaseTrigger};
pub use player::{max_players, Player, PlayerKind, Roster};
pub use turn::TurnEngine;
pub use win::{Axis, WinDetector, WinLine};
