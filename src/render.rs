// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Structured rendering of a board for whatever is displaying it.
//!
//! Rows are indexed by the first coordinate (the file) and each row lists the ranks from 0 to 7, so white's back
//! rank shows up as the first column rather than the bottom row.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{board::Board, core::*};

/// What a single square looks like when rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "square", rename_all = "snake_case")]
pub enum RenderedSquare {
    Empty,
    Occupied { color: Color, kind: PieceKind },
}

impl RenderedSquare {
    pub fn is_empty(&self) -> bool {
        *self == RenderedSquare::Empty
    }
}

impl From<Option<&Piece>> for RenderedSquare {
    fn from(piece: Option<&Piece>) -> Self {
        match piece {
            Some(piece) => RenderedSquare::Occupied {
                color: piece.color,
                kind: piece.kind,
            },
            None => RenderedSquare::Empty,
        }
    }
}

impl fmt::Display for RenderedSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedSquare::Empty => write!(f, "[___]"),
            RenderedSquare::Occupied { color, kind } => write!(f, "[{},{}]", color, kind),
        }
    }
}

pub type RenderedRow = [RenderedSquare; 8];

impl Board {
    /// Renders the board as eight rows of eight squares.
    pub fn render(&self) -> Vec<RenderedRow> {
        (0..8)
            .map(|file| {
                let mut row = [RenderedSquare::Empty; 8];
                for (rank, cell) in row.iter_mut().enumerate() {
                    if let Ok(square) = Square::new(file, rank as i8) {
                        *cell = self.get(square).into();
                    }
                }

                row
            })
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.render() {
            for square in row.iter() {
                write!(f, "{}", square)?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
