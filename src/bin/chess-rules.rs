// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chess_rules::repl::{self, Session};
use structopt::StructOpt;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

/// Plays moves on a chessboard, one command per line on stdin.
#[derive(Debug, StructOpt)]
struct Options {
    /// Start (and reset) with an empty board instead of the initial layout.
    #[structopt(long)]
    empty: bool,

    /// Print the board as JSON rows instead of text.
    #[structopt(long)]
    json: bool,

    /// Log applied moves and captures to stderr.
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Options::from_args();
    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::try_from_env("CHESS_RULES_LOG")
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut session = Session::new(!args.empty, args.json);
    repl::run(&mut session)?;
    Ok(())
}
