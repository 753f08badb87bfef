use std::{thread::sleep, time::{Duration, Instant}};

use crate::direction::Direction::{self, *};
use crate::game::{Game, Status, GRID_SIZE};
use crate::term::{PixelCanvas, Scoreboard, TermManager};

use anyhow::Result;
use crossterm::event::{KeyEvent, KeyModifiers, KeyCode};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

const FRAME_INTERVAL_MS: u64 = 16;
const PIXELS_PER_TILE: usize = 2;

/// What the player asked for from a screen that waits on input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum KeyAction {
    Turn(Direction),
    TogglePause,
    Quit,
}

pub struct SnakeApp {
    paused: bool,
    term: TermManager,
    canvas: PixelCanvas,
    scoreboard: Scoreboard,
}

impl SnakeApp {
    pub fn new() -> Result<Self> {
        let canvas = PixelCanvas::new(GRID_SIZE as usize * PIXELS_PER_TILE);
        let term = TermManager::new(&canvas)?;
        Ok(SnakeApp { paused: false, term, canvas, scoreboard: Scoreboard::default() })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()?;
        self.term.clear()?;
        self.term.draw_borders()
    }

    pub fn restore(&mut self) {
        self.term.restore();
    }

    pub fn show_intro(&mut self) -> Result<Flow> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        Ok(Flow::Continue)
    }

    /// Runs one game until it ends or the player quits.
    pub fn play(&mut self) -> Result<Flow> {
        let mut game = Game::new(StdRng::from_entropy(), &mut self.scoreboard);
        let mut last_frame = Instant::now();

        loop {
            sleep(Duration::from_millis(FRAME_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match key_action(&key_ev) {
                    Some(KeyAction::Quit) => return Ok(Flow::Quit),
                    Some(KeyAction::TogglePause) => {
                        self.toggle_pause()?;
                        // Paused time never reaches the simulation
                        last_frame = Instant::now();
                    },
                    Some(KeyAction::Turn(dir)) if !self.paused => {
                        if !game.request_direction(dir) {
                            debug!(?dir, heading = ?game.direction(), "turn ignored");
                        }
                    },
                    _ => {}
                }
            }

            if self.paused { continue; }

            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f64() * 1000.0;
            last_frame = now;

            game.frame(dt, &mut self.canvas, &mut self.scoreboard);
            self.term.present(&self.canvas, &mut self.scoreboard)?;

            if game.status() == Status::GameOver {
                break;
            }
        }

        self.game_over(&game)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, game: &Game<StdRng>) -> Result<Flow> {
        info!(
            score = game.score(),
            length = game.snake().len(),
            apples_left = game.apples().len(),
            heading = ?game.direction(),
            "final board"
        );

        self.term.show_message(&[
            "Game over!",
            &*format!("Score: {}", game.score()),
            "",
            "Press any key to quit",
        ])?;

        self.term.read_key_blocking()?;
        Ok(Flow::Quit)
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
        Ok(())
    }
}

fn key_action(ev: &KeyEvent) -> Option<KeyAction> {
    if is_ctrl_c(ev) {
        return Some(KeyAction::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(KeyAction::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(KeyAction::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(KeyAction::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(KeyAction::Turn(Right)),
        KeyCode::Esc => Some(KeyAction::TogglePause),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
