// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::{core::*, movegen::BoardView};
use std::fmt;

const SOURCE_MASK: u16 = 0xFC00;
const DESTINATION_MASK: u16 = 0x03F0;
const CAPTURE_BIT: u16 = 0x0004;

/// A candidate move, as produced by move generation.
/// ## Encoding
///
///  * 6 bits - source square
///  * 6 bits - destination square
///  * 2 bits - unused
///  * 1 bit  - capture bit
///  * 2 bits - unused
///
/// The board's rules have no castles, promotions or en-passant, so a move is either quiet or a capture.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Constructs a new quiet move from the source square to the destination
    /// square.
    pub fn quiet(source: Square, dest: Square) -> Move {
        let source_bits = (source.0 as u16) << 10;
        let dest_bits = (dest.0 as u16) << 4;
        Move(source_bits | dest_bits)
    }

    /// Constructs a new capture move from the source square to the destination
    /// square.
    pub fn capture(source: Square, dest: Square) -> Move {
        let mut mov = Move::quiet(source, dest);
        mov.0 |= CAPTURE_BIT;
        mov
    }

    /// Returns the source square of this move.
    pub fn source(self) -> Square {
        Square(((self.0 & SOURCE_MASK) >> 10) as u8)
    }

    /// Returns the destination square of this move.
    pub fn destination(self) -> Square {
        Square(((self.0 & DESTINATION_MASK) >> 4) as u8)
    }

    pub fn is_quiet(self) -> bool {
        !self.is_capture()
    }

    pub fn is_capture(self) -> bool {
        (self.0 & CAPTURE_BIT) != 0
    }

    /// Parses a move written as two algebraic squares (`a1a4`), consulting the board to decide whether it is a
    /// capture. Returns `None` if the text is malformed or there is no piece on the source square.
    ///
    /// The move is not checked against the piece's move set; that is the board's job when the move is applied.
    pub fn parse<B: BoardView>(board: &B, move_str: &str) -> Option<Move> {
        if move_str.len() != 4 || !move_str.is_ascii() {
            return None;
        }

        let source: Square = move_str[0..2].parse().ok()?;
        let dest: Square = move_str[2..4].parse().ok()?;
        let mover = board.piece_at(source)?;
        match board.piece_at(dest) {
            Some(target) if target.color != mover.color => Some(Move::capture(source, dest)),
            _ => Some(Move::quiet(source, dest)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        if self.is_capture() {
            write!(f, "{}x{}", self.source(), self.destination())
        } else {
            write!(f, "{}{}", self.source(), self.destination())
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} (0x{:x})", self, self.0)
    }
}
