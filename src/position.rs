//! Position and movement in a 2-dimensional map.

/// A position in a 2-dimensional map.
///
/// The `x` and `y` coordinates are signed integers, making it easier to deal
/// with movements around `0`, which can result in negative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Column index, growing right.
    pub x: i16,
    /// Row index, growing down.
    pub y: i16,
}

impl Position {
    pub fn new(x: i16, y: i16) -> Self {
        Position { x, y }
    }

    /// Returns the new position after a `movement` from `self`.
    #[must_use]
    pub fn step(self, movement: Movement) -> Self {
        let (dx, dy) = movement.to_offset();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Number of orthogonal steps between `self` and `other`.
    pub fn manhattan(self, other: Position) -> u32 {
        let dx = (i32::from(self.x) - i32::from(other.x)).unsigned_abs();
        let dy = (i32::from(self.y) - i32::from(other.y)).unsigned_abs();
        dx + dy
    }

    /// Straight-line distance between `self` and `other`.
    pub fn euclidean(self, other: Position) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// Whether `other` is exactly one orthogonal step away from `self`.
    pub fn adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }
}

/// An individual movement of the agent.
///
/// The declaration order is the expansion order of the search engine, and
/// therefore the tie-break order between otherwise equivalent neighbors.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    North,
    South,
    East,
    West,
}

impl Movement {
    /// All movements, in expansion order.
    pub const ALL: [Movement; 4] = [
        Movement::North,
        Movement::South,
        Movement::East,
        Movement::West,
    ];

    fn to_offset(self) -> (i16, i16) {
        // The map origin is at the top left, and row indices grow down.
        match self {
            Movement::North => (0, -1),
            Movement::South => (0, 1),
            Movement::East => (1, 0),
            Movement::West => (-1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_south_and_west() {
        let p0 = Position::new(5, 3);
        let p1 = p0.step(Movement::South);
        let p2 = p1.step(Movement::West);
        assert_eq!(p2, Position::new(4, 4));
    }

    #[test]
    fn expansion_order_is_north_south_east_west() {
        let p = Position::new(2, 2);
        let neighbors: Vec<_> = Movement::ALL.iter().map(|&m| p.step(m)).collect();
        assert_eq!(
            neighbors,
            vec![
                Position::new(2, 1),
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(1, 2),
            ]
        );
    }

    #[test]
    fn distances() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(a.euclidean(b), 5.0);
        assert!(a.adjacent(Position::new(1, 0)));
        assert!(!a.adjacent(Position::new(1, 1)));
        assert!(!a.adjacent(a));
    }
}
