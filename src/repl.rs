// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented command loop that drives a single board. This is the front end used by the `chess-rules`
//! binary; all of the rules live in [`Board`] and the move generator, this module only parses commands and prints
//! what comes back.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context};

use crate::{
    board::{Board, MoveOutcome},
    core::{Color, Move, PieceKind, Square},
    movegen,
};

/// One game's worth of state.
pub struct Session {
    board: Board,
    populate: bool,
    json: bool,
}

impl Session {
    pub fn new(populate: bool, json: bool) -> Session {
        Session {
            board: Board::setup(populate),
            populate,
            json,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

/// What the loop should do after a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

pub fn run(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(session, stdin.lock(), &mut stdout.lock())
}

pub fn run_with<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    for maybe_line in input.lines() {
        let line = maybe_line?;
        let components: Vec<_> = line.split_whitespace().collect();
        let (&command, arguments) = match components.split_first() {
            Some(split) => split,
            None => continue,
        };

        match handle_command(session, command, arguments, output) {
            Ok(Control::Continue) => {}
            Ok(Control::Quit) => break,
            Err(e) => {
                tracing::debug!(command, "command failed: {:#}", e);
                writeln!(output, "error: {:#}", e)?;
            }
        }
    }

    Ok(())
}

fn handle_command<W: Write>(
    session: &mut Session,
    command: &str,
    arguments: &[&str],
    output: &mut W,
) -> anyhow::Result<Control> {
    match (command, arguments) {
        ("show", []) => handle_show(session, output)?,
        ("move", [mov]) => handle_move(session, mov, output)?,
        ("move", [from, to]) => {
            let from = parse_square(from)?;
            let to = parse_square(to)?;
            apply_move(session, from, to, output)?;
        }
        ("moves", [square]) => handle_moves(session, square, output)?,
        ("all", [color]) => handle_all(session, color, output)?,
        ("check", [color]) => {
            let color: Color = color.parse()?;
            writeln!(output, "{}", session.board.in_check(color))?;
        }
        ("place", [color, kind, square]) => {
            let color: Color = color.parse()?;
            let kind: PieceKind = kind.parse()?;
            let square = parse_square(square)?;
            session.board.add_piece(square, color, kind)?;
        }
        ("remove", [square]) => {
            let square = parse_square(square)?;
            if session.board.remove_piece(square).is_none() {
                bail!("nothing to remove on {}", square);
            }
        }
        ("reset", []) => session.board = Board::setup(session.populate),
        ("clear", []) => session.board = Board::new(),
        ("quit", []) => return Ok(Control::Quit),
        _ => bail!("unrecognized command: {} {:?}", command, arguments),
    }

    Ok(Control::Continue)
}

fn parse_square(text: &str) -> anyhow::Result<Square> {
    text.parse::<Square>()
        .with_context(|| format!("invalid square `{}`", text))
}

fn handle_show<W: Write>(session: &Session, output: &mut W) -> anyhow::Result<()> {
    if session.json {
        serde_json::to_writer(&mut *output, &session.board.render())?;
        writeln!(output)?;
    } else {
        write!(output, "{}", session.board)?;
    }

    Ok(())
}

fn handle_move<W: Write>(session: &mut Session, mov: &str, output: &mut W) -> anyhow::Result<()> {
    let mov = Move::parse(&session.board, mov)
        .ok_or_else(|| anyhow!("`{}` is not a move from an occupied square", mov))?;
    apply_move(session, mov.source(), mov.destination(), output)
}

fn apply_move<W: Write>(
    session: &mut Session,
    from: Square,
    to: Square,
    output: &mut W,
) -> anyhow::Result<()> {
    let mover = session.board.get(from).copied();
    match session.board.make_move(from, to)? {
        MoveOutcome::Moved => writeln!(output, "moved")?,
        MoveOutcome::Captured(captured) => {
            // The mover is known to exist here, since an empty start square is an error.
            if let Some(mover) = mover {
                writeln!(output, "The {} captured the {}", mover, captured)?;
            }
        }
        MoveOutcome::Rejected => writeln!(output, "rejected: {} cannot move to {}", from, to)?,
    }

    Ok(())
}

fn handle_moves<W: Write>(session: &Session, square: &str, output: &mut W) -> anyhow::Result<()> {
    let square = parse_square(square)?;
    let targets: Vec<_> = session
        .board
        .moves_from(square)?
        .into_iter()
        .map(|sq| sq.to_string())
        .collect();
    writeln!(output, "{}", targets.join(" "))?;
    Ok(())
}

fn handle_all<W: Write>(session: &Session, color: &str, output: &mut W) -> anyhow::Result<()> {
    let color: Color = color.parse()?;
    let mut moves = Vec::new();
    movegen::generate_moves(color, &session.board, &mut moves);
    let moves: Vec<_> = moves.iter().map(|m| m.to_string()).collect();
    writeln!(output, "{}", moves.join(" "))?;
    Ok(())
}
