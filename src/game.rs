use rand::Rng;
use tracing::{debug, info, trace};

use crate::{Coords, GridInt};
use crate::apples::Apples;
use crate::direction::{can_change_direction, Direction::{self, *}};
use crate::render::{self, RenderSurface, ScoreDisplay};
use crate::snake::Snake;

pub const GRID_SIZE: GridInt = 20;
/// Milliseconds per discrete step.
pub const TICK_INTERVAL: f64 = 100.0;
pub const INITIAL_SNAKE_LENGTH: usize = 6;

const START_CELL: Coords = (5, 5);
const INITIAL_DIRECTION: Direction = Right;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOver,
}

/// Everything the frame loop mutates. Drive it with [`Game::frame`] from
/// whatever clock the host has.
pub struct Game<R> {
    snake: Snake,
    apples: Apples,
    direction: Direction,
    next_direction: Option<Direction>,
    score: u32,
    timer: f64,
    status: Status,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new<D: ScoreDisplay + ?Sized>(mut rng: R, scoreboard: &mut D) -> Self {
        let (dx, dy) = INITIAL_DIRECTION.vector();
        let mut snake = Snake::new((START_CELL.0 + dx, START_CELL.1 + dy), START_CELL);
        for _ in 1..INITIAL_SNAKE_LENGTH {
            snake.grow((-dx, -dy));
        }

        let mut apples = Apples::new();
        apples.spawn(&mut rng, GRID_SIZE);

        scoreboard.set_score(0);
        info!(grid = GRID_SIZE, length = snake.len(), "game started");

        Game {
            snake,
            apples,
            direction: INITIAL_DIRECTION,
            next_direction: None,
            score: 0,
            timer: 0.0,
            status: Status::Running,
            rng,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apples(&self) -> &Apples {
        &self.apples
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Queues a turn for the next tick. Returns whether it was accepted.
    pub fn request_direction(&mut self, candidate: Direction) -> bool {
        if self.status == Status::GameOver || !can_change_direction(self.direction, candidate) {
            return false;
        }

        debug!(?candidate, "direction queued");
        self.next_direction = Some(candidate);
        true
    }

    /// Runs one frame with `dt` milliseconds elapsed since the previous one.
    /// At most one tick is taken per frame; leftover time carries over.
    pub fn frame<S, D>(&mut self, dt: f64, surface: &mut S, scoreboard: &mut D) -> Status
    where
        S: RenderSurface + ?Sized,
        D: ScoreDisplay + ?Sized,
    {
        if self.status == Status::GameOver {
            return self.status;
        }

        self.timer += dt;
        if self.timer > TICK_INTERVAL {
            self.timer -= TICK_INTERVAL;
            self.step();
        }

        if self.status == Status::Running {
            self.try_to_eat(scoreboard);
        }

        self.snake.interpolate(self.timer / TICK_INTERVAL);
        render::draw(surface, GRID_SIZE, &self.snake, &self.apples);

        self.status
    }

    fn step(&mut self) {
        if let Some(dir) = self.next_direction.take() {
            self.direction = dir;
        }
        self.snake.advance(self.direction);
        trace!(head = ?self.snake.head().pos(), "tick");

        let cause = if self.snake.is_self_colliding() {
            "self"
        } else if self.snake.is_wall_colliding(GRID_SIZE) {
            "wall"
        } else {
            return;
        };

        self.status = Status::GameOver;
        info!(score = self.score, length = self.snake.len(), cause, "game over");
    }

    fn try_to_eat<D: ScoreDisplay + ?Sized>(&mut self, scoreboard: &mut D) {
        // Apples are matched against the cell the head is leaving
        if self.apples.try_consume(self.snake.head().start()).is_none() {
            return;
        }

        self.apples.spawn(&mut self.rng, GRID_SIZE);
        self.snake.grow((0, 0));
        self.score += 1;
        scoreboard.set_score(self.score);
        debug!(score = self.score, length = self.snake.len(), "apple eaten");
    }

    #[cfg(test)]
    fn clear_apples(&mut self) {
        self.apples = Apples::new();
    }
}
