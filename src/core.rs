// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Module `core` contains core datatypes and data structures used pervasively throughout `chess_rules`.

mod r#move;
mod squareset;
mod types;

pub use squareset::{SquareSet, SquareSetIterator};
pub use types::{
    on_board, piece_kinds, squares, AllSquares, Color, Delta, Piece, PieceKind,
    PieceParseError, Square, SquareParseError,
};

pub use r#move::Move;
