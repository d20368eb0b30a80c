use wasm_bindgen::prelude::*;

pub mod board;
pub mod coord;
pub mod error;
pub mod game;
pub mod rules;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use coord::Coord;
pub use error::{CoordError, MoveError, ParseError};
pub use game::Checkers;
pub use types::{Cell, Color, Move, Piece, Rank};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
