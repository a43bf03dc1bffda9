use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{Game, Turn};
use crate::types::{Color, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Browser-facing game: black is the human, white the searcher.
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(depth: i32, pruning: bool) -> Self {
        let config = GameConfig {
            white_machine: true,
            depth,
            pruning,
            ..GameConfig::default()
        };
        Self {
            inner: Game::new(config),
        }
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.state())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        let positions: Vec<Position> = self
            .inner
            .legal_moves()
            .iter()
            .map(|s| s.mv.position())
            .collect();
        to_js(&positions)
    }

    pub fn place(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let position =
            Position::new(row, col).ok_or_else(|| JsValue::from_str("row/col out of range"))?;
        self.inner.ensure_turn(Color::Black).map_err(game_error)?;
        self.inner.play(position).map_err(game_error)?;
        self.state()
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        self.inner.ensure_turn(Color::White).map_err(game_error)?;
        self.inner.play_machine().map_err(game_error)?;
        self.state()
    }

    pub fn pass(&mut self) -> Result<JsValue, JsValue> {
        self.inner.pass().map_err(game_error)?;
        self.state()
    }

    /// Settles whether the game is over; call before asking for a move.
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&mut self) -> bool {
        matches!(self.inner.turn(), Turn::GameOver(_))
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.result())
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn game_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
