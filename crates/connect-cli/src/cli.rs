//! Command-line interface for connect-more.

use clap::Parser;
use std::ops::RangeInclusive;

/// Board widths and heights offered during setup
pub const DIMENSION_RANGE: RangeInclusive<usize> = 5..=9;

/// Win lengths offered during setup
pub const WIN_LENGTH_RANGE: RangeInclusive<usize> = 3..=5;

/// Connect More - drop tokens, get enough in a row, win
#[derive(Parser, Debug, Default)]
#[command(name = "connect-more")]
#[command(about = "N-player connect-K-in-a-row in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Columns on the board (5-9). Prompted for if omitted.
    #[arg(long, env = "CONNECT_WIDTH", value_parser = clap::value_parser!(u8).range(5..=9))]
    pub width: Option<u8>,

    /// Rows on the board (5-9). Prompted for if omitted.
    #[arg(long, env = "CONNECT_HEIGHT", value_parser = clap::value_parser!(u8).range(5..=9))]
    pub height: Option<u8>,

    /// Tokens in a row needed to win (3-5). Prompted for if omitted.
    #[arg(long, env = "CONNECT_WIN_LENGTH", value_parser = clap::value_parser!(u8).range(3..=5))]
    pub win_length: Option<u8>,

    /// Number of human players. Prompted for if omitted; 0 runs a
    /// computer-only game.
    #[arg(long, env = "CONNECT_HUMANS")]
    pub humans: Option<usize>,

    /// Number of computer players. Prompted for if omitted.
    #[arg(long, env = "CONNECT_COMPUTERS")]
    pub computers: Option<usize>,

    /// Seed for computer names, tokens and moves
    #[arg(long, env = "CONNECT_SEED")]
    pub seed: Option<u64>,

    /// Delay between narration lines, in milliseconds
    #[arg(long, env = "CONNECT_PACE_MS", default_value = "0")]
    pub pace_ms: u64,

    /// Print the final game state as JSON when the game ends
    #[arg(long)]
    pub summary_json: bool,
}
