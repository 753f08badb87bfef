use std::iter::successors;

use crate::{Coords, GridInt};
use crate::direction::Direction;
use crate::math::lerp;

const HEAD: usize = 0;

/// One body segment. Links are indices into the owning [`Snake`]'s arena.
#[derive(Clone, Debug)]
pub struct SnakePart {
    pos: Coords,
    start: Coords,
    drawn: (f64, f64),
    previous: Option<usize>,
    next: Option<usize>,
}

impl SnakePart {
    fn resting_at(pos: Coords) -> Self {
        SnakePart {
            pos,
            start: pos,
            drawn: (pos.0 as f64, pos.1 as f64),
            previous: None,
            next: None,
        }
    }

    /// Discrete cell after the latest tick.
    pub fn pos(&self) -> Coords {
        self.pos
    }

    /// Discrete cell before the latest tick.
    pub fn start(&self) -> Coords {
        self.start
    }

    /// Interpolated position for drawing, in grid units.
    pub fn drawn(&self) -> (f64, f64) {
        self.drawn
    }
}

/// Chain of segments from head to tail. Segments are only ever appended, so
/// the arena index of a segment never changes.
#[derive(Clone, Debug)]
pub struct Snake {
    parts: Vec<SnakePart>,
    tail: usize,
}

impl Snake {
    /// A single-segment snake whose head is moving from `start` to `pos`.
    pub fn new(pos: Coords, start: Coords) -> Self {
        let mut head = SnakePart::resting_at(pos);
        head.start = start;
        head.drawn = (start.0 as f64, start.1 as f64);

        Snake { parts: vec![head], tail: HEAD }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn head(&self) -> &SnakePart {
        &self.parts[HEAD]
    }

    pub fn tail(&self) -> &SnakePart {
        &self.parts[self.tail]
    }

    /// Segments in chain order, head first.
    pub fn parts(&self) -> impl Iterator<Item = &SnakePart> + '_ {
        successors(Some(HEAD), move |&i| self.parts[i].next).map(move |i| &self.parts[i])
    }

    /// Segments from the tail up to and including the head.
    pub fn parts_from_tail(&self) -> impl Iterator<Item = &SnakePart> + '_ {
        successors(Some(self.tail), move |&i| self.parts[i].previous).map(move |i| &self.parts[i])
    }

    /// Appends a segment at `tail + offset`, already at rest.
    pub fn grow(&mut self, offset: Coords) {
        let (tx, ty) = self.tail().pos;
        let mut part = SnakePart::resting_at((tx + offset.0, ty + offset.1));
        part.previous = Some(self.tail);

        let idx = self.parts.len();
        self.parts.push(part);
        self.parts[self.tail].next = Some(idx);
        self.tail = idx;
    }

    /// One discrete step: every segment takes the cell of the one ahead of
    /// it, then the head moves by `direction`.
    pub fn advance(&mut self, direction: Direction) {
        // Walk tail to head so each segment still sees its predecessor's old cell
        let mut current = self.tail;
        while let Some(prev) = self.parts[current].previous {
            let ahead = self.parts[prev].pos;
            let part = &mut self.parts[current];
            part.start = part.pos;
            part.pos = ahead;
            current = prev;
        }

        let (dx, dy) = direction.vector();
        let head = &mut self.parts[HEAD];
        head.start = head.pos;
        head.pos = (head.pos.0 + dx, head.pos.1 + dy);
    }

    /// Places every segment `fraction` of the way from its pre-tick cell to
    /// its current one.
    pub fn interpolate(&mut self, fraction: f64) {
        let mut current = Some(HEAD);
        while let Some(idx) = current {
            let part = &mut self.parts[idx];
            part.drawn = (
                lerp(fraction, part.start.0 as f64, part.pos.0 as f64),
                lerp(fraction, part.start.1 as f64, part.pos.1 as f64),
            );
            current = part.next;
        }
    }

    pub fn is_self_colliding(&self) -> bool {
        let head = self.head().pos;
        self.parts().skip(1).any(|part| part.pos == head)
    }

    pub fn is_wall_colliding(&self, grid_size: GridInt) -> bool {
        let (x, y) = self.head().pos;
        x < 0 || y < 0 || x >= grid_size || y >= grid_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction::*;

    fn straight_snake() -> Snake {
        let mut snake = Snake::new((6, 5), (5, 5));
        for _ in 0..5 {
            snake.grow((-1, 0));
        }
        snake
    }

    fn positions(snake: &Snake) -> Vec<Coords> {
        snake.parts().map(|p| p.pos()).collect()
    }

    #[test]
    fn grow_appends_a_resting_tail() {
        let mut snake = Snake::new((3, 3), (2, 3));
        snake.grow((0, 1));

        assert_eq!(snake.len(), 2);
        let tail = snake.tail();
        assert_eq!(tail.pos(), (3, 4));
        assert_eq!(tail.start(), (3, 4));
        assert_eq!(tail.drawn(), (3.0, 4.0));

        snake.grow((0, 0));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail().pos(), (3, 4));
        assert_eq!(snake.tail().start(), (3, 4));
    }

    #[test]
    fn chain_is_walkable_both_ways() {
        let snake = straight_snake();
        let forward = positions(&snake);
        let mut backward: Vec<Coords> = snake.parts_from_tail().map(|p| p.pos()).collect();
        backward.reverse();

        assert_eq!(forward, vec![(6, 5), (5, 5), (4, 5), (3, 5), (2, 5), (1, 5)]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn advance_shifts_each_segment_into_its_predecessor() {
        let mut snake = straight_snake();
        snake.advance(Down);
        let before = positions(&snake);

        snake.advance(Left);
        let after = positions(&snake);
        let starts: Vec<Coords> = snake.parts().map(|p| p.start()).collect();

        assert_eq!(after[0], (before[0].0 - 1, before[0].1));
        for i in 1..after.len() {
            assert_eq!(after[i], before[i - 1]);
        }
        assert_eq!(starts, before);
    }

    #[test]
    fn interpolate_uses_start_and_current_cells() {
        let mut snake = straight_snake();
        snake.advance(Right);
        snake.interpolate(0.5);

        assert_eq!(snake.head().drawn(), (6.5, 5.0));
        assert_eq!(snake.tail().drawn(), (1.5, 5.0));

        snake.interpolate(3.0);
        assert_eq!(snake.head().drawn(), (7.0, 5.0));
        snake.interpolate(-3.0);
        assert_eq!(snake.head().drawn(), (6.0, 5.0));
    }

    #[test]
    fn interpolate_reaches_every_segment() {
        let mut snake = straight_snake();
        snake.grow((0, 1));
        snake.advance(Up);
        snake.interpolate(0.5);

        for part in snake.parts() {
            let (sx, sy) = part.start();
            let (x, y) = part.pos();
            assert_eq!(part.drawn(), ((sx + x) as f64 / 2.0, (sy + y) as f64 / 2.0));
        }
    }

    #[test]
    fn fresh_snake_does_not_collide() {
        let snake = straight_snake();
        assert!(!snake.is_self_colliding());
        assert!(!snake.is_wall_colliding(20));
    }

    #[test]
    fn turning_into_itself_collides() {
        let mut snake = straight_snake();
        snake.advance(Down);
        snake.advance(Left);
        assert!(!snake.is_self_colliding());
        snake.advance(Up);
        assert!(snake.is_self_colliding());
    }

    #[test]
    fn wall_bounds() {
        assert!(Snake::new((20, 5), (19, 5)).is_wall_colliding(20));
        assert!(Snake::new((-1, 5), (0, 5)).is_wall_colliding(20));
        assert!(Snake::new((4, 20), (4, 19)).is_wall_colliding(20));
        assert!(Snake::new((4, -1), (4, 0)).is_wall_colliding(20));
        assert!(!Snake::new((19, 19), (18, 19)).is_wall_colliding(20));
        assert!(!Snake::new((0, 0), (1, 0)).is_wall_colliding(20));
    }
}
