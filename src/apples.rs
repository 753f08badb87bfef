use rand::Rng;
use tracing::debug;

use crate::{Coords, GridInt};

pub type Apple = Coords;

/// Food currently on the board, in spawn order.
#[derive(Clone, Debug, Default)]
pub struct Apples {
    active: Vec<Apple>,
}

impl Apples {
    pub fn new() -> Self {
        Apples { active: vec![] }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Apple> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Drops an apple on a uniformly random cell. Occupied cells are not
    /// avoided.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, grid_size: GridInt) -> Apple {
        let apple = (rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        debug!(x = apple.0, y = apple.1, "apple spawned");

        self.active.push(apple);
        apple
    }

    pub fn try_consume(&mut self, pos: Coords) -> Option<Apple> {
        let idx = self.active.iter().position(|&apple| apple == pos)?;
        Some(self.active.remove(idx))
    }

    #[cfg(test)]
    pub fn place(&mut self, apple: Apple) {
        self.active.push(apple);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn spawns_inside_the_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut apples = Apples::new();

        for _ in 0..500 {
            let (x, y) = apples.spawn(&mut rng, 20);
            assert!((0..20).contains(&x) && (0..20).contains(&y));
        }
        assert_eq!(apples.len(), 500);
    }

    #[test]
    fn consume_removes_only_the_matching_apple() {
        let mut apples = Apples::new();
        apples.place((1, 1));
        apples.place((4, 2));
        apples.place((7, 7));

        assert_eq!(apples.try_consume((4, 2)), Some((4, 2)));
        assert_eq!(apples.iter().copied().collect::<Vec<_>>(), vec![(1, 1), (7, 7)]);
        assert_eq!(apples.try_consume((4, 2)), None);
        assert_eq!(apples.len(), 2);
    }

    #[test]
    fn duplicates_are_consumed_one_at_a_time() {
        let mut apples = Apples::new();
        apples.place((3, 3));
        apples.place((3, 3));

        assert_eq!(apples.try_consume((3, 3)), Some((3, 3)));
        assert_eq!(apples.len(), 1);
    }
}
