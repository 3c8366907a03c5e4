//! Classic Minesweeper.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

use clap::{CommandFactory, Parser};
use simple_logger::SimpleLogger;

mod config;
mod error;
mod game;
mod gui;
mod input;
mod layout;
mod render;

const TITLE: &str = "minesweeper";

fn main() {
    let args = config::Args::parse();

    SimpleLogger::new()
        .with_level(args.verbose.log_level_filter())
        .init()
        .expect("Failed to initialize logger");

    let board_config = match args.board_config() {
        Ok(c) => c,
        Err(e) => config::Args::command()
            .error(clap::error::ErrorKind::ValueValidation, e)
            .exit(),
    };

    let seed = args.seed.unwrap_or_else(game::time_seed);
    let game = match game::Game::new(board_config, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    gui::show_gui(&args, game);
}
