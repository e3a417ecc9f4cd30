// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `chess_rules` keeps an 8x8 board of pieces, computes where each piece can move, detects check and applies
//! moves, captures included.
//!
//! The rules are deliberately small: there is no castling, en-passant, promotion or turn order, and a king may
//! walk into check. Pieces compute their moves from a read-only [`movegen::BoardView`]; the [`Board`] owns the
//! pieces and builds check detection and move application on top of move generation.

pub mod board;
pub mod core;
pub mod movegen;
pub mod render;
pub mod repl;

pub use board::{Board, BoardError, MoveOutcome};
