//! Text rendering of the board and the fixed screens.

use connect_core::{CellOwner, Grid, Player};

pub const TITLE: &[&str] = &[
    "========================",
    "Welcome to Connect More!",
    "------------------------",
    " a game by Will DeHaven",
    "    written in Rust",
    "========================",
];

pub const WIN_BANNER: &[&str] = &[
    "==============================",
    "Congratulations! You Win!",
    "==============================",
];

pub const DRAW_BANNER: &[&str] = &[
    "==============================",
    "The board is full. It's a draw!",
    "==============================",
];

pub const GOODBYE: &[&str] = &[
    "",
    "================================",
    "Thanks for playing Connect More!",
    "--------------------------------",
    "       Goodbye for now...",
    "================================",
];

/// Draw the grid top row first, with 1-based column numbers above it
pub fn board(grid: &Grid, players: &[Player]) -> String {
    let width = grid.width();
    let mut out = String::new();

    out.push_str(&"===".repeat(width));
    out.push('\n');
    out.push_str("Columns:\n");
    let heading: String = (1..=width).map(|column| format!(" {} ", column)).collect();
    out.push_str(heading.trim_end());
    out.push('\n');
    out.push_str(&"---".repeat(width));
    out.push('\n');

    for row in grid.rows() {
        for cell in row {
            out.push('[');
            out.push(token(*cell, players));
            out.push(']');
        }
        out.push('\n');
    }

    out.push_str(&"---".repeat(width));
    out.push('\n');
    out
}

fn token(cell: CellOwner, players: &[Player]) -> char {
    cell.player()
        .and_then(|id| players.iter().find(|p| p.id == id))
        .map(|p| p.token)
        .unwrap_or(' ')
}
