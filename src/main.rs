mod app;
mod apples;
mod direction;
mod game;
mod math;
mod render;
mod snake;
mod term;

use std::{fs::File, sync::Mutex};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{Flow, SnakeApp};

pub type TermInt = u16;
pub type GridInt = i32;
pub type Coords = (GridInt, GridInt);

const LOG_FILE: &str = "snake.log";
const LOG_FILTER_VAR: &str = "SNAKE_LOG";

fn init_logging() -> Result<()> {
    // stdout belongs to the game screen, so logs go to a file
    let file = File::create(LOG_FILE).with_context(|| format!("creating {}", LOG_FILE))?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(game: &mut SnakeApp) -> Result<()> {
    game.initialize()?;

    if game.show_intro()? == Flow::Quit {
        return Ok(());
    }

    game.play()?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    info!("starting");

    let mut game = SnakeApp::new()?;
    let result = run(&mut game);

    // The terminal is restored on every path out of the game
    game.restore();
    info!(ok = result.is_ok(), "shutting down");
    result
}
