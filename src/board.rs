// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

use crate::{
    core::*,
    movegen::{self, BoardView},
};

/// Errors that can arise when querying or mutating a `Board`.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum BoardError {
    #[error("nothing there: no piece on {0}")]
    IllegalStart(Square),
    #[error("coordinates out of range: ({0}, {1})")]
    OutOfRange(i8, i8),
    #[error("square {0} is already occupied")]
    Occupied(Square),
}

/// The result of asking the board to make a move.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// The piece moved to an empty square.
    Moved,
    /// The piece moved onto an enemy piece, which was removed from the board.
    Captured(Piece),
    /// The destination is not among the piece's moves. The board is unchanged.
    Rejected,
}

/// An 8x8 chessboard. The board owns every piece standing on it; each cell holds at most one piece, and a stored
/// piece's `square` always names the cell it is stored in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// Creates a new, empty board.
    pub fn new() -> Board {
        Board { cells: [None; 64] }
    }

    /// Creates a board holding the initial layout if `populate` is set, or an empty board otherwise.
    pub fn setup(populate: bool) -> Board {
        let mut board = Board::new();
        if populate {
            board.setup_pawns();
            board.setup_back_ranks();
            tracing::debug!(pieces = board.len(), "set up initial layout");
        }

        board
    }

    pub fn from_start_position() -> Board {
        Board::setup(true)
    }

    fn setup_pawns(&mut self) {
        for file in 0..8 {
            self.place(file, 1, Color::White, PieceKind::Pawn);
            self.place(file, 6, Color::Black, PieceKind::Pawn);
        }
    }

    fn setup_back_ranks(&mut self) {
        for (rank, color) in [(0, Color::White), (7, Color::Black)] {
            self.place(0, rank, color, PieceKind::Rook);
            self.place(7, rank, color, PieceKind::Rook);
            self.place(1, rank, color, PieceKind::Knight);
            self.place(6, rank, color, PieceKind::Knight);
            self.place(2, rank, color, PieceKind::Bishop);
            self.place(5, rank, color, PieceKind::Bishop);
            self.place(3, rank, color, PieceKind::King);
            self.place(4, rank, color, PieceKind::Queen);
        }
    }

    /// Setup helper for coordinates that are known to be on the board.
    fn place(&mut self, file: i8, rank: i8, color: Color, kind: PieceKind) {
        if let Ok(square) = Square::new(file, rank) {
            self.set(square, Some(Piece::new(color, kind, square)));
        }
    }
}

//
// Raw cell access and piece placement.
//

impl Board {
    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.cells[square.as_u8() as usize].as_ref()
    }

    /// Looks up a cell by raw coordinates, failing if they are off the board.
    pub fn get_at(&self, file: i8, rank: i8) -> Result<Option<&Piece>, BoardError> {
        let square = Square::new(file, rank).map_err(|_| BoardError::OutOfRange(file, rank))?;
        Ok(self.get(square))
    }

    /// Overwrites a cell. A stored piece is re-stamped with the square it now occupies.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.as_u8() as usize] = piece.map(|mut piece| {
            piece.square = square;
            piece
        });
    }

    pub fn add_piece(
        &mut self,
        square: Square,
        color: Color,
        kind: PieceKind,
    ) -> Result<(), BoardError> {
        if self.get(square).is_some() {
            return Err(BoardError::Occupied(square));
        }

        self.set(square, Some(Piece::new(color, kind, square)));
        Ok(())
    }

    /// Removes and returns the piece on the given square, if any.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.as_u8() as usize].take()
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.cells
            .iter()
            .flatten()
            .filter(move |piece| piece.color == color)
    }

    pub fn occupied(&self) -> SquareSet {
        self.cells.iter().flatten().map(|piece| piece.square).collect()
    }

    /// The number of pieces on the board.
    pub fn len(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the squares the piece on `square` can move to.
    pub fn moves_from(&self, square: Square) -> Result<SquareSet, BoardError> {
        let piece = self.get(square).ok_or(BoardError::IllegalStart(square))?;
        Ok(movegen::moves(piece, self))
    }
}

impl BoardView for Board {
    fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.get(square)
    }
}

//
// Check detection.
//

impl Board {
    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|piece| piece.is_king())
            .map(|piece| piece.square)
    }

    /// Whether the king of the given color stands on a square that some enemy piece other than the enemy king can
    /// move to. A color without a king is never in check.
    pub fn in_check(&self, color: Color) -> bool {
        match self.king(color) {
            Some(king) => movegen::attacks_square(color.toggle(), king, self),
            None => false,
        }
    }
}

//
// Move application.
//

impl Board {
    /// Moves the piece on `start` to `destination`, capturing whatever enemy piece stands there.
    ///
    /// Fails if there is no piece on `start`. A destination outside the piece's move set is reported as
    /// `MoveOutcome::Rejected` and leaves the board untouched.
    pub fn make_move(
        &mut self,
        start: Square,
        destination: Square,
    ) -> Result<MoveOutcome, BoardError> {
        let _span = tracing::debug_span!("make_move", %start, %destination).entered();
        let moving_piece = *self.get(start).ok_or(BoardError::IllegalStart(start))?;
        if !movegen::moves(&moving_piece, self).contains(destination) {
            tracing::warn!(piece = %moving_piece, "rejected move to a square outside the move set");
            return Ok(MoveOutcome::Rejected);
        }

        // Move generation never yields an allied square, so anything standing on the destination is an enemy.
        let captured = self.remove_piece(destination);
        let piece = self.remove_piece(start);
        self.set(destination, piece);
        match captured {
            Some(captured) => {
                tracing::info!(piece = %moving_piece, captured = %captured, "capture");
                Ok(MoveOutcome::Captured(captured))
            }
            None => {
                tracing::debug!(piece = %moving_piece, "moved");
                Ok(MoveOutcome::Moved)
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, BoardError, MoveOutcome};
    use crate::core::*;

    fn sq(file: i8, rank: i8) -> Square {
        Square::new(file, rank).unwrap()
    }

    fn rook_and_pawn() -> Board {
        let mut board = Board::new();
        board
            .add_piece(sq(0, 0), Color::White, PieceKind::Rook)
            .unwrap();
        board
            .add_piece(sq(0, 3), Color::Black, PieceKind::Pawn)
            .unwrap();
        board
    }

    mod setup {
        use super::*;

        #[test]
        fn empty() {
            let board = Board::setup(false);
            assert!(board.is_empty());
            assert_eq!(board, Board::default());
        }

        #[test]
        fn starting_position() {
            let board = Board::from_start_position();
            assert_eq!(board.len(), 32);
            assert_eq!(board.pieces(Color::White).count(), 16);
            assert_eq!(board.pieces(Color::Black).count(), 16);

            let check_square = |file: i8, rank: i8, color: Color, kind: PieceKind| {
                let piece = board.get(sq(file, rank)).unwrap();
                assert_eq!(piece.color, color);
                assert_eq!(piece.kind, kind);
                assert_eq!(piece.square, sq(file, rank));
            };

            let back_rank = [
                PieceKind::Rook,
                PieceKind::Knight,
                PieceKind::Bishop,
                PieceKind::King,
                PieceKind::Queen,
                PieceKind::Bishop,
                PieceKind::Knight,
                PieceKind::Rook,
            ];
            for (file, &kind) in back_rank.iter().enumerate() {
                let file = file as i8;
                check_square(file, 0, Color::White, kind);
                check_square(file, 1, Color::White, PieceKind::Pawn);
                check_square(file, 6, Color::Black, PieceKind::Pawn);
                check_square(file, 7, Color::Black, kind);
                for rank in 2..6 {
                    assert!(board.get(sq(file, rank)).is_none());
                }
            }
        }

        #[test]
        fn kings() {
            let board = Board::from_start_position();
            assert_eq!(board.king(Color::White), Some(sq(3, 0)));
            assert_eq!(board.king(Color::Black), Some(sq(3, 7)));
        }
    }

    mod cells {
        use super::*;

        #[test]
        fn get_at_out_of_range() {
            let board = Board::new();
            assert_eq!(board.get_at(8, 0), Err(BoardError::OutOfRange(8, 0)));
            assert_eq!(board.get_at(0, -1), Err(BoardError::OutOfRange(0, -1)));
            assert_eq!(board.get_at(7, 7), Ok(None));
        }

        #[test]
        fn set_restamps_square() {
            let mut board = Board::new();
            let piece = Piece::new(Color::White, PieceKind::Queen, sq(0, 0));
            board.set(sq(5, 5), Some(piece));
            assert_eq!(board.get(sq(5, 5)).unwrap().square, sq(5, 5));
            assert!(board.get(sq(0, 0)).is_none());
            board.set(sq(5, 5), None);
            assert!(board.is_empty());
        }

        #[test]
        fn add_to_occupied_square() {
            let mut board = rook_and_pawn();
            assert_eq!(
                board.add_piece(sq(0, 3), Color::White, PieceKind::Knight),
                Err(BoardError::Occupied(sq(0, 3)))
            );
        }

        #[test]
        fn remove_returns_piece() {
            let mut board = rook_and_pawn();
            let removed = board.remove_piece(sq(0, 3)).unwrap();
            assert_eq!(removed.kind, PieceKind::Pawn);
            assert_eq!(board.remove_piece(sq(0, 3)), None);
            assert_eq!(board.len(), 1);
        }

        #[test]
        fn occupied_set() {
            let board = rook_and_pawn();
            let occupied: Vec<_> = board.occupied().into_iter().collect();
            assert_eq!(occupied, vec![sq(0, 0), sq(0, 3)]);
        }

        #[test]
        fn moves_from_empty_square() {
            let board = rook_and_pawn();
            assert_eq!(
                board.moves_from(sq(4, 4)),
                Err(BoardError::IllegalStart(sq(4, 4)))
            );
            assert_eq!(board.moves_from(sq(0, 0)).unwrap().len(), 10);
        }
    }

    mod check {
        use super::*;

        #[test]
        fn start_position_not_in_check() {
            let board = Board::from_start_position();
            assert!(!board.in_check(Color::White));
            assert!(!board.in_check(Color::Black));
        }

        #[test]
        fn no_king_not_in_check() {
            let board = rook_and_pawn();
            assert!(!board.in_check(Color::White));
            assert!(!board.in_check(Color::Black));
        }

        #[test]
        fn rook_gives_check() {
            let mut board = Board::new();
            board
                .add_piece(sq(4, 0), Color::White, PieceKind::King)
                .unwrap();
            board
                .add_piece(sq(4, 7), Color::Black, PieceKind::Rook)
                .unwrap();
            assert!(board.in_check(Color::White));
            assert!(!board.in_check(Color::Black));
        }

        #[test]
        fn blocked_rook_gives_no_check() {
            let mut board = Board::new();
            board
                .add_piece(sq(4, 0), Color::White, PieceKind::King)
                .unwrap();
            board
                .add_piece(sq(4, 3), Color::White, PieceKind::Bishop)
                .unwrap();
            board
                .add_piece(sq(4, 7), Color::Black, PieceKind::Rook)
                .unwrap();
            assert!(!board.in_check(Color::White));
        }

        #[test]
        fn pawn_gives_check() {
            let mut board = Board::new();
            board
                .add_piece(sq(3, 4), Color::White, PieceKind::King)
                .unwrap();
            board
                .add_piece(sq(4, 5), Color::Black, PieceKind::Pawn)
                .unwrap();
            assert!(board.in_check(Color::White));
        }

        #[test]
        fn pawn_push_square_is_not_check() {
            let mut board = Board::new();
            board
                .add_piece(sq(4, 4), Color::White, PieceKind::King)
                .unwrap();
            board
                .add_piece(sq(4, 5), Color::Black, PieceKind::Pawn)
                .unwrap();
            assert!(!board.in_check(Color::White));
        }

        #[test]
        fn knight_gives_check() {
            let mut board = Board::new();
            board
                .add_piece(sq(3, 7), Color::Black, PieceKind::King)
                .unwrap();
            board
                .add_piece(sq(4, 5), Color::White, PieceKind::Knight)
                .unwrap();
            assert!(board.in_check(Color::Black));
        }

        #[test]
        fn adjacent_kings_are_not_check() {
            let mut board = Board::new();
            board
                .add_piece(sq(3, 3), Color::White, PieceKind::King)
                .unwrap();
            board
                .add_piece(sq(3, 4), Color::Black, PieceKind::King)
                .unwrap();
            assert!(!board.in_check(Color::White));
            assert!(!board.in_check(Color::Black));
        }
    }

    mod make_move {
        use super::*;

        #[test]
        fn basic_capture() {
            let mut board = rook_and_pawn();
            let outcome = board.make_move(sq(0, 0), sq(0, 3)).unwrap();
            match outcome {
                MoveOutcome::Captured(captured) => {
                    assert_eq!(captured.color, Color::Black);
                    assert_eq!(captured.kind, PieceKind::Pawn);
                }
                other => panic!("expected a capture, got {:?}", other),
            }

            let rook = board.get(sq(0, 3)).unwrap();
            assert_eq!(rook.kind, PieceKind::Rook);
            assert_eq!(rook.color, Color::White);
            assert_eq!(rook.square, sq(0, 3));
            assert!(board.get(sq(0, 0)).is_none());
            assert_eq!(board.len(), 1);
            assert_eq!(board.pieces(Color::Black).count(), 0);
        }

        #[test]
        fn quiet_move() {
            let mut board = rook_and_pawn();
            assert_eq!(
                board.make_move(sq(0, 0), sq(5, 0)),
                Ok(MoveOutcome::Moved)
            );
            assert_eq!(board.get(sq(5, 0)).unwrap().square, sq(5, 0));
            assert!(board.get(sq(0, 0)).is_none());
            assert_eq!(board.len(), 2);
        }

        #[test]
        fn empty_start_fails() {
            let mut board = rook_and_pawn();
            let before = board.clone();
            assert_eq!(
                board.make_move(sq(4, 4), sq(4, 5)),
                Err(BoardError::IllegalStart(sq(4, 4)))
            );
            assert_eq!(board, before);
        }

        #[test]
        fn illegal_destination_rejected() {
            let mut board = rook_and_pawn();
            let before = board.clone();
            // Beyond the blocking pawn.
            assert_eq!(
                board.make_move(sq(0, 0), sq(0, 5)),
                Ok(MoveOutcome::Rejected)
            );
            // Not on a rook line at all.
            assert_eq!(
                board.make_move(sq(0, 0), sq(1, 1)),
                Ok(MoveOutcome::Rejected)
            );
            assert_eq!(board, before);
        }

        #[test]
        fn cannot_capture_ally() {
            let mut board = Board::from_start_position();
            let before = board.clone();
            assert_eq!(
                board.make_move(sq(0, 0), sq(0, 1)),
                Ok(MoveOutcome::Rejected)
            );
            assert_eq!(board, before);
        }

        #[test]
        fn opening_pawn_push() {
            let mut board = Board::from_start_position();
            assert_eq!(
                board.make_move(sq(4, 1), sq(4, 3)),
                Ok(MoveOutcome::Moved)
            );
            assert_eq!(
                board.make_move(sq(3, 6), sq(3, 4)),
                Ok(MoveOutcome::Moved)
            );
            assert!(matches!(
                board.make_move(sq(4, 3), sq(3, 4)),
                Ok(MoveOutcome::Captured(Piece {
                    color: Color::Black,
                    kind: PieceKind::Pawn,
                    ..
                }))
            ));
            assert_eq!(board.len(), 31);
        }

        #[test]
        fn move_into_check_detected() {
            let mut board = Board::from_start_position();
            // Open the file in front of the white king, then bring the black queen onto it.
            board.remove_piece(sq(3, 1));
            board.remove_piece(sq(3, 6));
            board.remove_piece(sq(4, 7));
            board
                .add_piece(sq(4, 4), Color::Black, PieceKind::Queen)
                .unwrap();
            assert!(!board.in_check(Color::White));
            assert_eq!(
                board.make_move(sq(4, 4), sq(3, 4)),
                Ok(MoveOutcome::Moved)
            );
            assert!(board.in_check(Color::White));
        }
    }
}
