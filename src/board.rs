use std::collections::BTreeMap;
use std::fmt;

use crate::coord::{self, Coord, MAX_DIM, NOTATION_DIM, NOTATION_SQUARES, Square};
use crate::error::{CoordError, ParseError};
use crate::types::{BoardState, Cell, Color, Piece};

pub const DEFAULT_DIM: usize = 8;

/// Standard opening position: Black on the top three lines, White on the bottom three.
pub const OPENING: &str = concat!(
    "-o-o-o-o\n",
    "o-o-o-o-\n",
    "-o-o-o-o\n",
    " - - - -\n",
    "- - - - \n",
    "x-x-x-x-\n",
    "-x-x-x-x\n",
    "x-x-x-x-",
);

/// Square grid of `dim * dim` cells stored row-major, top line first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dim: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Parses the serialized form: `dim` lines of `dim` characters, top line = row `dim`.
    /// Blank lines around the grid are ignored. `dim` must be addressable by
    /// column letters, so at most 26.
    pub fn from_ascii(text: &str, dim: usize) -> Result<Self, ParseError> {
        if dim == 0 || dim > MAX_DIM {
            return Err(ParseError::UnsupportedDimension(dim));
        }
        let lines: Vec<&str> = text
            .trim_matches(|c| c == '\n' || c == '\r')
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        if lines.len() != dim {
            return Err(ParseError::RowCount {
                expected: dim,
                found: lines.len(),
            });
        }

        let mut cells = Vec::with_capacity(dim * dim);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != dim {
                return Err(ParseError::RowLength {
                    row: row + 1,
                    expected: dim,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(ParseError::UnknownChar {
                    row: row + 1,
                    col: col + 1,
                    ch,
                })?;
                cells.push(cell);
            }
        }

        Ok(Self { dim, cells })
    }

    /// Builds an 8x8 board from checkers notation. Squares absent from `notation`
    /// keep their opening-position content; listed squares hold a Man of the
    /// given color or are emptied.
    pub fn from_checkers_notation(
        notation: &BTreeMap<u8, Option<Color>>,
    ) -> Result<Self, ParseError> {
        let mut board = Self::opening();
        for (&index, &color) in notation {
            let square = coord::notation_to_square(index)?;
            let cell = match color {
                Some(color) => Cell::Occupied(Piece::man(color)),
                None => Cell::Empty,
            };
            board.set_cell(square, cell);
        }
        Ok(board)
    }

    pub fn opening() -> Self {
        match Self::from_ascii(OPENING, DEFAULT_DIM) {
            Ok(board) => board,
            Err(err) => unreachable!("opening position is malformed: {err}"),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Caller contract: `square` lies on the board.
    pub(crate) fn cell(&self, square: Square) -> Cell {
        self.cells[self.index(square)]
    }

    pub(crate) fn set_cell(&mut self, square: Square, cell: Cell) {
        let idx = self.index(square);
        self.cells[idx] = cell;
    }

    pub fn get(&self, coord: Coord) -> Result<Cell, CoordError> {
        Ok(self.cell(coord.to_square(self.dim)?))
    }

    pub fn square(&self, coord: Coord) -> Result<Square, CoordError> {
        coord.to_square(self.dim)
    }

    pub fn coord(&self, square: Square) -> Coord {
        square.to_coord(self.dim)
    }

    /// All pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, cell)| {
            cell.piece()
                .map(|piece| (Square::new(idx / self.dim, idx % self.dim), piece))
        })
    }

    pub fn any_pieces_left(&self, color: Color) -> bool {
        self.pieces().any(|(_, piece)| piece.color == color)
    }

    /// Returns `(white_count, black_count)`.
    pub fn count(&self) -> (usize, usize) {
        self.pieces()
            .fold((0, 0), |(white, black), (_, piece)| match piece.color {
                Color::White => (white + 1, black),
                Color::Black => (white, black + 1),
            })
    }

    /// Color-only snapshot keyed by the 1..=32 numbering. Defined for 8x8 boards only.
    pub fn to_checkers_notation(&self) -> Result<BTreeMap<u8, Option<Color>>, ParseError> {
        if self.dim != NOTATION_DIM {
            return Err(ParseError::UnsupportedDimension(self.dim));
        }
        let mut notation = BTreeMap::new();
        for index in 1..=NOTATION_SQUARES {
            let square = coord::notation_to_square(index)?;
            notation.insert(index, self.cell(square).piece().map(|piece| piece.color));
        }
        Ok(notation)
    }

    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.dim)
            .map(|row| row.iter().map(|cell| cell.to_char()).collect())
            .collect()
    }

    pub fn to_state(&self) -> BoardState {
        let (white_count, black_count) = self.count();
        BoardState {
            dim: self.dim,
            rows: self.rows(),
            white_count,
            black_count,
        }
    }

    fn index(&self, square: Square) -> usize {
        debug_assert!(square.x < self.dim && square.y < self.dim);
        square.x * self.dim + square.y
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::opening()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows().join("\n"))
    }
}
