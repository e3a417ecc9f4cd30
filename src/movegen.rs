// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move generation. Every piece computes its destination squares from its own square and a read-only view of the
//! board's occupancy; nothing here mutates the board.
use crate::core::*;

/// The read-only occupancy query that move generation needs from a board.
pub trait BoardView {
    /// Returns the piece standing on the given square, if any.
    fn piece_at(&self, square: Square) -> Option<&Piece>;

    fn is_vacant(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Whether the square holds a piece of the same color as `us`.
    fn allied_collision(&self, square: Square, us: Color) -> bool {
        matches!(self.piece_at(square), Some(piece) if piece.color == us)
    }

    /// Whether the square holds a piece that `us` could capture.
    fn capture_opportunity(&self, square: Square, us: Color) -> bool {
        matches!(self.piece_at(square), Some(piece) if piece.color != us)
    }
}

/// How a kind of piece moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Movement {
    /// Rides along each delta until blocked.
    Sliding(&'static [Delta]),
    /// Takes each delta exactly once.
    Stepping(&'static [Delta]),
    Pawn,
}

pub const ROOK_DELTAS: [Delta; 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

pub const BISHOP_DELTAS: [Delta; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const QUEEN_DELTAS: [Delta; 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const KING_DELTAS: [Delta; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const KNIGHT_DELTAS: [Delta; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

impl PieceKind {
    pub fn movement(self) -> Movement {
        match self {
            PieceKind::Bishop => Movement::Sliding(&BISHOP_DELTAS),
            PieceKind::Rook => Movement::Sliding(&ROOK_DELTAS),
            PieceKind::Queen => Movement::Sliding(&QUEEN_DELTAS),
            PieceKind::King => Movement::Stepping(&KING_DELTAS),
            PieceKind::Knight => Movement::Stepping(&KNIGHT_DELTAS),
            PieceKind::Pawn => Movement::Pawn,
        }
    }
}

/// The rank direction a pawn of the given color advances in, and the rank it starts on.
pub fn pawn_advance(color: Color) -> (i8, i8) {
    match color {
        Color::White => (1, 1),
        Color::Black => (-1, 6),
    }
}

/// Computes every square the given piece can move to on this board.
pub fn moves<B: BoardView>(piece: &Piece, board: &B) -> SquareSet {
    match piece.kind.movement() {
        Movement::Sliding(deltas) => sliding_moves(piece.square, piece.color, deltas, board),
        Movement::Stepping(deltas) => stepping_moves(piece.square, piece.color, deltas, board),
        Movement::Pawn => pawn_moves(piece.square, piece.color, board),
    }
}

pub fn sliding_moves<B: BoardView>(
    from: Square,
    us: Color,
    deltas: &[Delta],
    board: &B,
) -> SquareSet {
    let mut moves = SquareSet::empty();
    for &delta in deltas {
        let mut cursor = from.offset(delta);
        while let Some(target) = cursor {
            if board.allied_collision(target, us) {
                break;
            }

            moves.insert(target);
            if board.capture_opportunity(target, us) {
                break;
            }

            cursor = target.offset(delta);
        }
    }

    moves
}

pub fn stepping_moves<B: BoardView>(
    from: Square,
    us: Color,
    deltas: &[Delta],
    board: &B,
) -> SquareSet {
    deltas
        .iter()
        .filter_map(|&delta| from.offset(delta))
        .filter(|&target| !board.allied_collision(target, us))
        .collect()
}

pub fn pawn_moves<B: BoardView>(from: Square, us: Color, board: &B) -> SquareSet {
    let mut moves = SquareSet::empty();
    let (up, start_rank) = pawn_advance(us);

    // Pushes only land on empty squares, and the double push needs the square it jumps over to be empty as well.
    if let Some(single) = from.offset((0, up)) {
        if board.is_vacant(single) {
            moves.insert(single);
            if from.rank() == start_rank {
                if let Some(double) = single.offset((0, up)) {
                    if board.is_vacant(double) {
                        moves.insert(double);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        if let Some(target) = from.offset((side, up)) {
            if board.capture_opportunity(target, us) {
                moves.insert(target);
            }
        }
    }

    moves
}

/// Returns whether any piece of color `them`, kings excluded, can move to `target`.
pub fn attacks_square<B: BoardView>(them: Color, target: Square, board: &B) -> bool {
    squares()
        .filter_map(|sq| board.piece_at(sq))
        .filter(|piece| piece.color == them && !piece.is_king())
        .any(|piece| moves(piece, board).contains(target))
}

/// Collects every candidate move of every piece of color `us`, each tagged as quiet or capture.
pub fn generate_moves<B: BoardView>(us: Color, board: &B, moves_out: &mut Vec<Move>) {
    for piece in squares().filter_map(|sq| board.piece_at(sq)) {
        if piece.color != us {
            continue;
        }

        for target in moves(piece, board) {
            if board.capture_opportunity(target, us) {
                moves_out.push(Move::capture(piece.square, target));
            } else {
                moves_out.push(Move::quiet(piece.square, target));
            }
        }
    }
}
