use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit vector on the grid, y grows downwards.
    pub fn vector(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// A turn is rejected when it would be a no-op or would send the head back
/// into the neck.
pub fn can_change_direction(current: Direction, desired: Direction) -> bool {
    let (cx, cy) = current.vector();
    let (dx, dy) = desired.vector();

    if cx == dx && cy == dy { return false; }
    if cx == -dx && cy == dy { return false; }
    if cx == dx && cy == -dy { return false; }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [Up, Down, Left, Right];

    fn is_reversal(a: Direction, b: Direction) -> bool {
        matches!((a, b), (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left))
    }

    #[test]
    fn vectors_are_axis_aligned_units() {
        for dir in ALL.iter() {
            let (x, y) = dir.vector();
            assert_eq!(x.abs() + y.abs(), 1, "{:?}", dir);
        }
    }

    #[test]
    fn all_sixteen_pairs() {
        for &current in ALL.iter() {
            for &desired in ALL.iter() {
                let expected = current != desired && !is_reversal(current, desired);
                assert_eq!(
                    can_change_direction(current, desired),
                    expected,
                    "{:?} -> {:?}",
                    current,
                    desired
                );
            }
        }
    }

    #[test]
    fn perpendicular_turns_are_allowed() {
        assert!(can_change_direction(Right, Up));
        assert!(can_change_direction(Right, Down));
        assert!(can_change_direction(Up, Left));
        assert!(!can_change_direction(Up, Down));
        assert!(!can_change_direction(Left, Left));
    }
}
