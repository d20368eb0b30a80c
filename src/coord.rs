use std::fmt;

use serde::Serialize;

use crate::error::CoordError;

/// Diagonal unit steps in generation order. Ties between equally long
/// capture chains resolve to whichever this order produces first.
pub const DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// External coordinate: row 1 is the bottom line, columns are letters from `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    pub row: u8,
    pub col: char,
}

impl Coord {
    pub const fn new(row: u8, col: char) -> Self {
        Self { row, col }
    }

    /// Converts to matrix indices: `x = dim - row`, `y = col - 'A'`.
    pub fn to_square(self, dim: usize) -> Result<Square, CoordError> {
        let out_of_range = CoordError::OutOfRange {
            row: self.row,
            col: self.col,
            dim,
        };
        let row = self.row as usize;
        if row == 0 || row > dim || !self.col.is_ascii_uppercase() {
            return Err(out_of_range);
        }
        let y = (self.col as u8 - b'A') as usize;
        if y >= dim {
            return Err(out_of_range);
        }
        Ok(Square::new(dim - row, y))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.col)
    }
}

impl From<(u8, char)> for Coord {
    fn from((row, col): (u8, char)) -> Self {
        Self::new(row, col)
    }
}

/// Internal matrix index. `x` counts lines from the top, `y` columns from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub x: usize,
    pub y: usize,
}

impl Square {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Inverse of [`Coord::to_square`]. Caller contract: `x, y < dim <= MAX_DIM`.
    pub fn to_coord(self, dim: usize) -> Coord {
        debug_assert!(self.x < dim && self.y < dim);
        Coord::new((dim - self.x) as u8, (b'A' + self.y as u8) as char)
    }

    /// Square `steps` units along `(dx, dy)`, or `None` off the board.
    pub fn offset(self, (dx, dy): (i32, i32), steps: i32, dim: usize) -> Option<Square> {
        let x = self.x as i32 + dx * steps;
        let y = self.y as i32 + dy * steps;
        if in_bounds(x, y, dim) {
            Some(Square::new(x as usize, y as usize))
        } else {
            None
        }
    }
}

/// Maps a checkers-notation index (1..=32) onto the 8x8 matrix.
pub fn notation_to_square(i: u8) -> Result<Square, CoordError> {
    if !(1..=NOTATION_SQUARES).contains(&i) {
        return Err(CoordError::NotationOutOfRange(i));
    }
    let i = (i - 1) as usize;
    let x = i / 4;
    let y = 1 - (x % 2) + 2 * (i % 4);
    Ok(Square::new(x, y))
}

/// Inverse of [`notation_to_square`]; `None` for squares outside the numbering.
pub fn square_to_notation(square: Square) -> Option<u8> {
    if square.x >= NOTATION_DIM || square.y >= NOTATION_DIM {
        return None;
    }
    let offset = 1 - (square.x % 2);
    if square.y < offset || (square.y - offset) % 2 != 0 {
        return None;
    }
    Some((square.x * 4 + (square.y - offset) / 2 + 1) as u8)
}

/// Largest board the row/letter coordinates can address (`A..=Z`).
pub const MAX_DIM: usize = 26;

/// Board dimension the 1..=32 numbering is defined for.
pub const NOTATION_DIM: usize = 8;
pub const NOTATION_SQUARES: u8 = (NOTATION_DIM * NOTATION_DIM / 2) as u8;

fn in_bounds(x: i32, y: i32, dim: usize) -> bool {
    (0..dim as i32).contains(&x) && (0..dim as i32).contains(&y)
}
