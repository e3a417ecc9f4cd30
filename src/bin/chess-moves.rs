use structopt::StructOpt;

use chess_rules::core::{Color, Square};
use chess_rules::{movegen, Board};

/// Lists candidate moves on the initial board.
#[derive(Debug, StructOpt)]
struct Options {
    /// Square of the piece to move, e.g. `b1`. One destination is printed per line.
    #[structopt(name = "SQUARE", required_unless = "side")]
    square: Option<Square>,

    /// List every candidate move of this side instead (`white` or `black`).
    #[structopt(long, conflicts_with = "SQUARE")]
    side: Option<Color>,
}

fn main() -> anyhow::Result<()> {
    let ops = Options::from_args();
    let board = Board::from_start_position();
    if let Some(side) = ops.side {
        let mut moves = Vec::new();
        movegen::generate_moves(side, &board, &mut moves);
        for mov in moves {
            println!("{}", mov);
        }
    } else if let Some(square) = ops.square {
        for target in board.moves_from(square)? {
            println!("{}", target);
        }
    }

    Ok(())
}
