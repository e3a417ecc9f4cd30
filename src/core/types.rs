// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{convert::TryFrom, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SquareParseError {
    #[error("coordinates out of range: ({0}, {1})")]
    OutOfRange(i8, i8),
    #[error("square index out of range: {0}")]
    IndexOutOfRange(u8),
    #[error("invalid square: {0}")]
    InvalidLength(String),
    #[error("invalid file char: {0}")]
    InvalidFile(char),
    #[error("invalid rank char: {0}")]
    InvalidRank(char),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PieceParseError {
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("invalid piece kind: {0}")]
    InvalidKind(String),
}

/// A displacement of a number of files and ranks, used to describe how pieces move.
pub type Delta = (i8, i8);

/// Returns whether or not the given coordinates lie on the 8x8 board.
pub const fn on_board(file: i8, rank: i8) -> bool {
    file >= 0 && file < 8 && rank >= 0 && rank < 8
}

/// A square on the chessboard, addressed by a file and a rank in the range `[0, 7]`.
///
/// Squares are validated on construction, so a `Square` value never refers to a location off of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(pub(in crate::core) u8);

impl Square {
    /// Creates a new Square from a file and a rank, failing if either coordinate is off the board.
    pub fn new(file: i8, rank: i8) -> Result<Square, SquareParseError> {
        if !on_board(file, rank) {
            return Err(SquareParseError::OutOfRange(file, rank));
        }

        Ok(Square((rank * 8 + file) as u8))
    }

    /// Returns the file of this square on the chessboard.
    pub const fn file(self) -> i8 {
        (self.0 & 7) as i8
    }

    /// Returns the rank of this square on the chessboard.
    pub const fn rank(self) -> i8 {
        (self.0 >> 3) as i8
    }

    /// Returns the square displaced from this one by the given delta, or `None` if that square is off the board.
    pub fn offset(self, delta: Delta) -> Option<Square> {
        let (df, dr) = delta;
        Square::new(self.file() + df, self.rank() + dr).ok()
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Square {
    type Error = SquareParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value >= 64 {
            return Err(SquareParseError::IndexOutOfRange(value));
        }

        Ok(Square(value))
    }
}

impl TryFrom<(i8, i8)> for Square {
    type Error = SquareParseError;

    fn try_from((file, rank): (i8, i8)) -> Result<Self, Self::Error> {
        Square::new(file, rank)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<_> = s.chars().collect();
        if chars.len() != 2 {
            return Err(SquareParseError::InvalidLength(s.to_string()));
        }

        let file = match chars[0] {
            c @ 'a'..='h' => (c as u8 - b'a') as i8,
            c => return Err(SquareParseError::InvalidFile(c)),
        };
        let rank = match chars[1] {
            c @ '1'..='8' => (c as u8 - b'1') as i8,
            c => return Err(SquareParseError::InvalidRank(c)),
        };

        Square::new(file, rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file() as u8) as char;
        let rank = (b'1' + self.rank() as u8) as char;
        write!(f, "{}{}", file, rank)
    }
}

/// An iterator over every square on the board, in index order.
pub struct AllSquares(u8);

impl Iterator for AllSquares {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 >= 64 {
            None
        } else {
            let next = self.0;
            self.0 += 1;
            Some(Square(next))
        }
    }
}

pub fn squares() -> AllSquares {
    AllSquares(0)
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Color::White => 'W',
            Color::Black => 'B',
        };

        write!(f, "{}", c)
    }
}

impl FromStr for Color {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Color::White),
            "b" | "black" => Ok(Color::Black),
            _ => Err(PieceParseError::InvalidColor(s.to_string())),
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    pub fn is_king(self) -> bool {
        self == PieceKind::King
    }
}

/// Piece kinds print with the board's own letter set: upper case for royalty, lower case for everyone else, with
/// `k` for the knight.
impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Pawn => 'p',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'k',
            PieceKind::Rook => 'r',
        };

        write!(f, "{}", c)
    }
}

impl FromStr for PieceKind {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The single letters are case sensitive since `K` and `k` are different pieces.
        let kind = match s {
            "K" => PieceKind::King,
            "Q" => PieceKind::Queen,
            "p" => PieceKind::Pawn,
            "b" => PieceKind::Bishop,
            "k" => PieceKind::Knight,
            "r" => PieceKind::Rook,
            _ => match s.to_ascii_lowercase().as_str() {
                "king" => PieceKind::King,
                "queen" => PieceKind::Queen,
                "pawn" => PieceKind::Pawn,
                "bishop" => PieceKind::Bishop,
                "knight" => PieceKind::Knight,
                "rook" => PieceKind::Rook,
                _ => return Err(PieceParseError::InvalidKind(s.to_string())),
            },
        };

        Ok(kind)
    }
}

/// A piece standing on the board. The square is kept in sync with the cell of the board that owns the piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, square: Square) -> Piece {
        Piece {
            color,
            kind,
            square,
        }
    }

    pub fn is_king(&self) -> bool {
        self.kind.is_king()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.color, self.kind)
    }
}

pub fn piece_kinds() -> ::std::vec::IntoIter<PieceKind> {
    vec![
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ]
    .into_iter()
}
