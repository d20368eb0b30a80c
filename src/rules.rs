//! Move generation.
//!
//! All functions are pure over a `&Board`. The moving piece's `origin` square
//! is treated as vacated while its own moves are generated, so a chain may
//! pass back over the square the piece started from. Pieces captured earlier
//! in a chain stay on the board (they still block) and are only excluded as
//! targets.

use crate::board::Board;
use crate::coord::{DIRECTIONS, Square};
use crate::types::{Cell, Color, Move, Piece, Rank};

/// A single jump: the opponent on `captured` is taken and the piece lands on `landing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub captured: Square,
    pub landing: Square,
}

/// A complete capture sequence starting from the piece's origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub captured: Vec<Square>,
    pub end: Square,
}

/// Non-capturing destinations for the piece standing on `origin`.
pub fn step_candidates(board: &Board, origin: Square, piece: Piece) -> Vec<Square> {
    match piece.rank {
        Rank::Man => man_steps(board, origin, piece),
        Rank::FlyingKing => king_slides(board, origin),
    }
}

/// Immediate captures available to `piece` when standing on `from`.
pub fn capture_candidates(
    board: &Board,
    origin: Square,
    from: Square,
    piece: Piece,
) -> Vec<Capture> {
    match piece.rank {
        Rank::Man => man_captures(board, origin, from, piece),
        Rank::FlyingKing => king_captures(board, origin, from, piece),
    }
}

/// Longest capture chains for the piece on `origin`. Ties are all kept, in
/// direction order. Empty when the piece has no capture at all.
pub fn capture_chains(board: &Board, origin: Square, piece: Piece) -> Vec<Chain> {
    let mut chains = Vec::new();
    extend_chain(board, origin, origin, piece, &mut Vec::new(), &mut chains);

    let longest = chains.iter().map(|c| c.captured.len()).max().unwrap_or(0);
    if longest == 0 {
        return Vec::new();
    }
    chains.retain(|c| c.captured.len() == longest);

    tracing::trace!(
        origin = ?origin,
        chains = chains.len(),
        longest,
        "capture chains generated"
    );
    chains
}

/// Legal moves of the piece on `origin`, ignoring the rest of its side:
/// its longest capture chains if it can capture, otherwise its plain steps.
pub fn piece_moves(board: &Board, origin: Square) -> Vec<Move> {
    let Some(piece) = board.cell(origin).piece() else {
        return Vec::new();
    };
    let start = board.coord(origin);

    let chains = capture_chains(board, origin, piece);
    if !chains.is_empty() {
        return chains
            .into_iter()
            .map(|chain| Move {
                start,
                end: board.coord(chain.end),
                captured: chain
                    .captured
                    .into_iter()
                    .map(|sq| board.coord(sq))
                    .collect(),
            })
            .collect();
    }

    step_candidates(board, origin, piece)
        .into_iter()
        .map(|end| Move::new(start, board.coord(end)))
        .collect()
}

/// Longest capture count available to any piece of `color`; 0 when the side cannot capture.
pub fn side_max_capture(board: &Board, color: Color) -> usize {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .filter_map(|(square, piece)| {
            capture_chains(board, square, piece)
                .first()
                .map(|chain| chain.captured.len())
        })
        .max()
        .unwrap_or(0)
}

/// Every move `color` may legally play: only chains of the side-wide maximum
/// length when any capture exists, otherwise every plain step.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let required = side_max_capture(board, color);
    let squares: Vec<Square> = board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .map(|(square, _)| square)
        .collect();

    squares
        .into_iter()
        .flat_map(|square| piece_moves(board, square))
        .filter(|mv| mv.captured.len() == required)
        .collect()
}

fn extend_chain(
    board: &Board,
    origin: Square,
    from: Square,
    piece: Piece,
    captured: &mut Vec<Square>,
    out: &mut Vec<Chain>,
) {
    let candidates: Vec<Capture> = capture_candidates(board, origin, from, piece)
        .into_iter()
        .filter(|c| !captured.contains(&c.captured))
        .collect();

    if candidates.is_empty() {
        out.push(Chain {
            captured: captured.clone(),
            end: from,
        });
        return;
    }

    for capture in candidates {
        captured.push(capture.captured);
        extend_chain(board, origin, capture.landing, piece, captured, out);
        captured.pop();
    }
}

/// Cell content with the moving piece lifted off its origin.
fn occupant(board: &Board, origin: Square, square: Square) -> Cell {
    if square == origin {
        Cell::Empty
    } else {
        board.cell(square)
    }
}

fn man_steps(board: &Board, origin: Square, piece: Piece) -> Vec<Square> {
    let dim = board.dim();
    [-1, 1]
        .into_iter()
        .filter_map(|dy| origin.offset((piece.color.forward(), dy), 1, dim))
        .filter(|&square| occupant(board, origin, square).is_empty())
        .collect()
}

fn king_slides(board: &Board, origin: Square) -> Vec<Square> {
    let dim = board.dim();
    let mut out = Vec::new();
    for dir in DIRECTIONS {
        let mut steps = 1;
        while let Some(square) = origin.offset(dir, steps, dim) {
            if !occupant(board, origin, square).is_empty() {
                break;
            }
            out.push(square);
            steps += 1;
        }
    }
    out
}

fn man_captures(board: &Board, origin: Square, from: Square, piece: Piece) -> Vec<Capture> {
    let dim = board.dim();
    let mut out = Vec::new();
    for dir in DIRECTIONS {
        let (Some(over), Some(landing)) = (from.offset(dir, 1, dim), from.offset(dir, 2, dim))
        else {
            continue;
        };
        let is_opponent = matches!(
            occupant(board, origin, over),
            Cell::Occupied(target) if target.color != piece.color
        );
        if is_opponent && occupant(board, origin, landing).is_empty() {
            out.push(Capture {
                captured: over,
                landing,
            });
        }
    }
    out
}

fn king_captures(board: &Board, origin: Square, from: Square, piece: Piece) -> Vec<Capture> {
    let dim = board.dim();
    let mut out = Vec::new();
    for dir in DIRECTIONS {
        let mut steps = 1;
        while let Some(square) = from.offset(dir, steps, dim) {
            match occupant(board, origin, square) {
                Cell::Empty => {
                    steps += 1;
                    continue;
                }
                Cell::NonPlayable => {}
                Cell::Occupied(target) if target.color == piece.color => {}
                Cell::Occupied(_) => {
                    let mut beyond = steps + 1;
                    while let Some(landing) = from.offset(dir, beyond, dim) {
                        if !occupant(board, origin, landing).is_empty() {
                            break;
                        }
                        out.push(Capture {
                            captured: square,
                            landing,
                        });
                        beyond += 1;
                    }
                }
            }
            break;
        }
    }
    out
}
