//! WebAssembly bindings for the Connect More engine.
//!
//! This module exposes game sessions to JavaScript through wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::game::{BoardConfig, GameSession};
use crate::player::Player;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game from a JSON array of players
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: usize,
        height: usize,
        win_length: usize,
        players_json: &str,
    ) -> Result<WasmGame, JsValue> {
        let players: Vec<Player> = serde_json::from_str(players_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid players: {}", e)))?;

        let session = GameSession::new(BoardConfig::new(width, height, win_length), players)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmGame { session })
    }

    /// Get the full game snapshot as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the grid rows (top to bottom) as JSON
    #[wasm_bindgen(js_name = getGrid)]
    pub fn get_grid(&self) -> String {
        serde_json::to_string(&self.session.grid().to_rows()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the id of the player whose turn it is
    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> u8 {
        self.session.current_player().id
    }

    /// Drop the current player's token, returns the outcome JSON or error
    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(&mut self, column: usize) -> Result<String, JsValue> {
        let outcome = self
            .session
            .submit_move(column)
            .map_err(|e| JsValue::from_str(&format!("Move failed: {}", e)))?;
        Ok(serde_json::to_string(&outcome).unwrap_or_else(|_| "null".to_string()))
    }

    /// Let the random policy move for the current player
    #[wasm_bindgen(js_name = playComputerTurn)]
    pub fn play_computer_turn(&mut self) -> Result<String, JsValue> {
        let outcome = self
            .session
            .play_computer_turn()
            .map_err(|e| JsValue::from_str(&format!("Move failed: {}", e)))?;
        Ok(serde_json::to_string(&outcome).unwrap_or_else(|_| "null".to_string()))
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.session.is_over()
    }

    /// Get the winner's id (if the game was won)
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<u8> {
        self.session.winner().map(|p| p.id)
    }
}
