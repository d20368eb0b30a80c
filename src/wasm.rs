//! JavaScript bindings around [`Checkers`].

use wasm_bindgen::prelude::*;

use crate::coord::Coord;
use crate::game::Checkers;
use crate::types::{Color, MoveInfo};

#[wasm_bindgen]
pub struct WasmCheckers {
    inner: Checkers,
}

#[wasm_bindgen]
impl WasmCheckers {
    /// Engine on the standard opening position.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCheckers {
        WasmCheckers {
            inner: Checkers::new(),
        }
    }

    #[wasm_bindgen(js_name = fromAscii)]
    pub fn from_ascii(text: &str, dim: usize) -> Result<WasmCheckers, JsError> {
        Ok(WasmCheckers {
            inner: Checkers::from_ascii(text, dim)?,
        })
    }

    #[wasm_bindgen(js_name = toAscii)]
    pub fn to_ascii(&self) -> String {
        self.inner.board().to_string()
    }

    /// Plays a move; the error message names the rejected rule.
    #[wasm_bindgen(js_name = movePiece)]
    pub fn move_piece(
        &mut self,
        start_row: u8,
        start_col: char,
        end_row: u8,
        end_col: char,
    ) -> Result<(), JsError> {
        self.inner
            .move_piece(Coord::new(start_row, start_col), Coord::new(end_row, end_col))?;
        Ok(())
    }

    #[wasm_bindgen(js_name = anyPiecesLeft)]
    pub fn any_pieces_left(&self, color: &str) -> Result<bool, JsError> {
        Ok(self.inner.any_pieces_left(parse_color(color)?))
    }

    /// Legal moves as `[{ start, end, captured }]` with `{ row, col }` coordinates.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self, color: &str) -> Result<JsValue, JsValue> {
        let color = parse_color(color)?;
        let moves: Vec<MoveInfo> = self
            .inner
            .legal_moves_for(color)
            .iter()
            .map(MoveInfo::from)
            .collect();
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_state())?)
    }

    /// Color-only snapshot keyed 1..=32; 8x8 boards only.
    #[wasm_bindgen(js_name = checkersNotation)]
    pub fn checkers_notation(&self) -> Result<JsValue, JsValue> {
        let notation = self
            .inner
            .board()
            .to_checkers_notation()
            .map_err(JsError::from)?;
        Ok(serde_wasm_bindgen::to_value(&notation)?)
    }
}

impl Default for WasmCheckers {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_color(name: &str) -> Result<Color, JsError> {
    Color::parse(name).ok_or_else(|| JsError::new(&format!("unknown color {name:?}")))
}
