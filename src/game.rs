use crate::board::Board;
use crate::coord::Coord;
use crate::error::{MoveError, ParseError};
use crate::rules;
use crate::types::{BoardState, Cell, Color, Move, Piece, Rank};

/// Rules engine owning one board. Turn order, clocks and history belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Checkers {
    board: Board,
}

impl Checkers {
    /// Engine on the standard 8x8 opening position.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_board(board: Board) -> Self {
        Self { board }
    }

    pub fn from_ascii(text: &str, dim: usize) -> Result<Self, ParseError> {
        Board::from_ascii(text, dim).map(Self::from_board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// Plays the piece on `start` to `end` and returns the committed move with
    /// its captured squares. When several longest chains join the same two
    /// squares, the first one in direction order is played; use
    /// [`Checkers::move_with_path`] to pick another.
    pub fn move_piece(
        &mut self,
        start: impl Into<Coord>,
        end: impl Into<Coord>,
    ) -> Result<Move, MoveError> {
        self.play(start.into(), end.into(), None)
    }

    /// Like [`Checkers::move_piece`], but the capture chain must be exactly `captured`.
    pub fn move_with_path(
        &mut self,
        start: impl Into<Coord>,
        end: impl Into<Coord>,
        captured: &[Coord],
    ) -> Result<Move, MoveError> {
        self.play(start.into(), end.into(), Some(captured))
    }

    pub fn any_pieces_left(&self, color: Color) -> bool {
        self.board.any_pieces_left(color)
    }

    /// Moves `color` could legally play now, mandatory maximum capture applied.
    pub fn legal_moves_for(&self, color: Color) -> Vec<Move> {
        rules::legal_moves(&self.board, color)
    }

    pub fn to_state(&self) -> BoardState {
        self.board.to_state()
    }

    fn play(
        &mut self,
        start: Coord,
        end: Coord,
        path: Option<&[Coord]>,
    ) -> Result<Move, MoveError> {
        let mv = self
            .resolve(start, end, path)
            .inspect_err(|err| tracing::debug!(%start, %end, error = %err, "move rejected"))?;
        let promoted = self.commit(&mv)?;

        tracing::debug!(
            %start,
            %end,
            captured = mv.captured.len(),
            promoted,
            "move applied"
        );
        Ok(mv)
    }

    /// Validates a request without touching the board.
    fn resolve(
        &self,
        start: Coord,
        end: Coord,
        path: Option<&[Coord]>,
    ) -> Result<Move, MoveError> {
        let from = self.board.square(start)?;
        let to = self.board.square(end)?;

        let piece = self
            .board
            .cell(from)
            .piece()
            .ok_or(MoveError::NoPieceAtSource(start))?;
        // The mover leaves `from` first, so a chain may finish where it began.
        if to != from && !self.board.cell(to).is_empty() {
            return Err(MoveError::TargetOccupied(end));
        }

        let requested = Move::new(start, end);
        let mv = rules::piece_moves(&self.board, from)
            .into_iter()
            .filter(|candidate| *candidate == requested)
            .find(|candidate| path.is_none_or(|path| candidate.captured == path))
            .ok_or(MoveError::IllegalMove { start, end })?;

        let required = rules::side_max_capture(&self.board, piece.color);
        if mv.captured.len() < required {
            return Err(MoveError::PrecedenceViolation {
                required,
                found: mv.captured.len(),
            });
        }

        Ok(mv)
    }

    /// Applies an already validated move. Returns whether the piece was promoted.
    fn commit(&mut self, mv: &Move) -> Result<bool, MoveError> {
        let from = self.board.square(mv.start)?;
        let to = self.board.square(mv.end)?;
        let Some(piece) = self.board.cell(from).piece() else {
            return Err(MoveError::NoPieceAtSource(mv.start));
        };
        let captured = mv
            .captured
            .iter()
            .map(|&coord| self.board.square(coord))
            .collect::<Result<Vec<_>, _>>()?;

        self.board.set_cell(from, Cell::Empty);
        for square in captured {
            self.board.set_cell(square, Cell::Empty);
        }

        let promoted =
            piece.rank == Rank::Man && mv.end.row == piece.color.promotion_row(self.board.dim());
        let placed = if promoted {
            Piece::king(piece.color)
        } else {
            piece
        };
        self.board.set_cell(to, Cell::Occupied(placed));

        Ok(promoted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(rows: &[&str]) -> Checkers {
        Checkers::from_ascii(&rows.join("\n"), rows.len()).unwrap()
    }

    fn cell(game: &Checkers, row: u8, col: char) -> Cell {
        game.board().get(Coord::new(row, col)).unwrap()
    }

    fn precedence_board() -> Checkers {
        // 2B can take one piece, 2H can take two.
        game(&[
            "- - - - ", " - - - -", "- - - - ", " - - -o-",
            "- - - - ", " -o- -o-", "-x- - -x", " - - - -",
        ])
    }

    #[test]
    fn opening_step_moves_a_man_diagonally() {
        let mut game = Checkers::new();

        let mv = game.move_piece((3, 'C'), (4, 'D')).unwrap();

        assert!(!mv.is_capture());
        assert_eq!(cell(&game, 3, 'C'), Cell::Empty);
        assert_eq!(cell(&game, 4, 'D'), Cell::Occupied(Piece::man(Color::White)));
    }

    #[test]
    fn opening_sequence_matches_expected_position() {
        let mut game = Checkers::new();

        game.move_piece((3, 'C'), (4, 'D')).unwrap();
        game.move_piece((6, 'B'), (5, 'A')).unwrap();
        game.move_piece((7, 'C'), (6, 'B')).unwrap();
        game.move_piece((2, 'D'), (3, 'C')).unwrap();

        let expected = [
            "-o-o-o-o", "o- -o-o-", "-o-o-o-o", "o- - - -",
            "- -x- - ", "x-x-x-x-", "-x- -x-x", "x-x-x-x-",
        ]
        .join("\n");
        assert_eq!(game.board().to_string(), expected);
    }

    #[test]
    fn jump_removes_captured_man_and_promotes_on_far_row() {
        let mut game = game(&["-o- ", " -o-", "-x- ", "x- -"]);

        let mv = game.move_piece((2, 'B'), (4, 'D')).unwrap();

        assert_eq!(mv.captured, vec![Coord::new(3, 'C')]);
        assert_eq!(
            game.board().to_string(),
            ["-o-X", " - -", "- - ", "x- -"].join("\n")
        );
    }

    #[test]
    fn backward_step_is_illegal_and_board_is_unchanged() {
        let mut game = game(&["- - ", " - -", "-x- ", " - -"]);
        let before = game.clone();

        let err = game.move_piece((2, 'B'), (1, 'C')).unwrap_err();

        assert_eq!(
            err,
            MoveError::IllegalMove {
                start: Coord::new(2, 'B'),
                end: Coord::new(1, 'C'),
            }
        );
        assert_eq!(game, before);
    }

    #[test]
    fn moving_from_empty_or_unplayable_square_fails() {
        let mut game = Checkers::new();

        assert_eq!(
            game.move_piece((4, 'B'), (5, 'A')),
            Err(MoveError::NoPieceAtSource(Coord::new(4, 'B')))
        );
        assert_eq!(
            game.move_piece((3, 'B'), (4, 'A')),
            Err(MoveError::NoPieceAtSource(Coord::new(3, 'B')))
        );
        assert_eq!(game, Checkers::new());
    }

    #[test]
    fn moving_onto_occupied_square_fails() {
        let mut game = Checkers::new();

        assert_eq!(
            game.move_piece((2, 'B'), (3, 'C')),
            Err(MoveError::TargetOccupied(Coord::new(3, 'C')))
        );
        assert_eq!(
            game.move_piece((3, 'C'), (4, 'C')),
            Err(MoveError::TargetOccupied(Coord::new(4, 'C')))
        );
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut game = Checkers::new();

        assert!(matches!(
            game.move_piece((9, 'A'), (3, 'C')),
            Err(MoveError::Coord(_))
        ));
        assert!(matches!(
            game.move_piece((3, 'C'), (4, 'Z')),
            Err(MoveError::Coord(_))
        ));
    }

    #[test]
    fn shorter_capture_loses_to_longer_chain_elsewhere() {
        let mut game = precedence_board();
        let before = game.clone();

        assert_eq!(
            game.move_piece((2, 'B'), (4, 'D')),
            Err(MoveError::PrecedenceViolation {
                required: 2,
                found: 1
            })
        );
        assert_eq!(game, before);

        let mv = game.move_piece((2, 'H'), (6, 'H')).unwrap();

        assert_eq!(mv.captured, vec![Coord::new(3, 'G'), Coord::new(5, 'G')]);
        assert_eq!(cell(&game, 3, 'G'), Cell::Empty);
        assert_eq!(cell(&game, 5, 'G'), Cell::Empty);
        assert_eq!(cell(&game, 2, 'H'), Cell::Empty);
        assert_eq!(cell(&game, 6, 'H'), Cell::Occupied(Piece::man(Color::White)));
        assert_eq!(cell(&game, 3, 'C'), Cell::Occupied(Piece::man(Color::Black)));
    }

    #[test]
    fn step_is_rejected_while_a_capture_exists() {
        let mut game = game(&[
            "- - - - ", " - - - -", "- - - - ", " - - - -",
            "- - - - ", " -o- - -", "-x- -x- ", " - - - -",
        ]);

        assert_eq!(
            game.move_piece((2, 'F'), (3, 'G')),
            Err(MoveError::PrecedenceViolation {
                required: 1,
                found: 0
            })
        );
        // The capturing piece itself may not step either.
        assert_eq!(
            game.move_piece((2, 'B'), (3, 'A')),
            Err(MoveError::IllegalMove {
                start: Coord::new(2, 'B'),
                end: Coord::new(3, 'A'),
            })
        );
        game.move_piece((2, 'B'), (4, 'D')).unwrap();
        assert!(!game.any_pieces_left(Color::Black));
    }

    #[test]
    fn partial_chain_is_not_a_legal_move() {
        let mut game = precedence_board();

        assert!(matches!(
            game.move_piece((2, 'H'), (4, 'F')),
            Err(MoveError::IllegalMove { .. })
        ));
    }

    #[test]
    fn black_man_promotes_on_row_one() {
        let mut game = game(&["- - ", " - -", "-o- ", " - -"]);

        game.move_piece((2, 'B'), (1, 'A')).unwrap();

        assert_eq!(cell(&game, 1, 'A'), Cell::Occupied(Piece::king(Color::Black)));
    }

    #[test]
    fn man_crossing_far_row_mid_chain_stays_a_man() {
        let mut game = game(&[
            "- - - - ", " -o-o- -", "-x- - - ", " - - - -",
            "- - - - ", " - - - -", "- - - - ", " - - - -",
        ]);

        let mv = game.move_piece((6, 'B'), (6, 'F')).unwrap();

        assert_eq!(mv.captured, vec![Coord::new(7, 'C'), Coord::new(7, 'E')]);
        assert_eq!(cell(&game, 6, 'F'), Cell::Occupied(Piece::man(Color::White)));
    }

    #[test]
    fn flying_king_slides_and_is_never_demoted() {
        let mut game = game(&[
            "- - - - ", " - - - -", "- - - - ", " - - - -",
            "- - - - ", " - - - -", "- - - - ", "X- - - -",
        ]);

        game.move_piece((1, 'A'), (6, 'F')).unwrap();
        game.move_piece((6, 'F'), (8, 'D')).unwrap();
        game.move_piece((8, 'D'), (1, 'C')).unwrap_err();

        assert_eq!(cell(&game, 8, 'D'), Cell::Occupied(Piece::king(Color::White)));
    }

    #[test]
    fn flying_king_captures_at_distance() {
        let mut game = game(&[
            "- - - - ", " - - - -", "- - - - ", " - - - -",
            "- - - - ", " -o- - -", "- - - - ", "X- - - -",
        ]);

        let mv = game.move_piece((1, 'A'), (7, 'G')).unwrap();

        assert_eq!(mv.captured, vec![Coord::new(3, 'C')]);
        assert!(!game.any_pieces_left(Color::Black));
        assert_eq!(cell(&game, 7, 'G'), Cell::Occupied(Piece::king(Color::White)));
    }

    #[test]
    fn tied_chains_play_first_in_direction_order_unless_path_given() {
        let loop_board = game(&[
            "- - - - ", " - - - -", "- - - - ", " -o-o- -",
            "- - - - ", " -o-o- -", "- -x- - ", " - - - -",
        ]);
        let right_first = vec![
            Coord::new(3, 'E'),
            Coord::new(5, 'E'),
            Coord::new(5, 'C'),
            Coord::new(3, 'C'),
        ];
        let left_first: Vec<Coord> = right_first.iter().rev().copied().collect();

        let mut game = loop_board.clone();
        let mv = game.move_piece((2, 'D'), (2, 'D')).unwrap();
        assert_eq!(mv.captured, right_first);
        assert!(!game.any_pieces_left(Color::Black));

        let mut game = loop_board.clone();
        let mv = game.move_with_path((2, 'D'), (2, 'D'), &left_first).unwrap();
        assert_eq!(mv.captured, left_first);

        let mut game = loop_board.clone();
        assert!(matches!(
            game.move_with_path((2, 'D'), (2, 'D'), &left_first[..2]),
            Err(MoveError::IllegalMove { .. })
        ));
        assert_eq!(game, loop_board);
    }

    #[test]
    fn legal_moves_for_applies_side_wide_precedence() {
        let game = precedence_board();

        let legal = game.legal_moves_for(Color::White);

        assert_eq!(legal, vec![Move::new((2, 'H'), (6, 'H'))]);
    }
}
