//! A dense per-cell bit set, used for closed sets and fringe membership.

use std::iter;

use bit_vec::BitVec;

use crate::position::Position;

/// A set of positions backed by one bit per map cell.
///
/// Supports removal because UCS/A* may reopen a settled state when a cheaper
/// path to it is found.
#[derive(Debug, Clone)]
pub struct BitGrid {
    width: i16,
    height: i16,
    raw: BitVec,
    len: usize,
}

impl BitGrid {
    pub fn new(width: i16, height: i16) -> Self {
        let (w, h): (usize, usize) = (width.try_into().unwrap(), height.try_into().unwrap());
        let raw = BitVec::from_elem(w * h, false);
        Self {
            width,
            height,
            raw,
            len: 0,
        }
    }

    /// Inserts `position`; returns whether it was newly inserted.
    #[inline]
    pub fn insert(&mut self, position: Position) -> bool {
        let offset = self.offset(position).unwrap();
        let newly = !self.raw[offset];
        if newly {
            self.raw.set(offset, true);
            self.len += 1;
        }
        newly
    }

    /// Removes `position`; returns whether it was present.
    #[inline]
    pub fn remove(&mut self, position: Position) -> bool {
        let offset = self.offset(position).unwrap();
        let present = self.raw[offset];
        if present {
            self.raw.set(offset, false);
            self.len -= 1;
        }
        present
    }

    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        if let Some(offset) = self.offset(position) {
            self.raw[offset]
        } else {
            false
        }
    }

    /// Number of positions in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate through the contained positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        let mut pos = Position { x: 0, y: 0 };
        iter::from_fn(move || {
            while let Some(offset) = self.offset(pos) {
                let cur = pos;
                pos.x += 1;
                if pos.x >= self.width {
                    pos.x = 0;
                    pos.y += 1;
                }
                if self.raw[offset] {
                    return Some(cur);
                }
            }
            None
        })
    }

    #[inline]
    fn offset(&self, position: Position) -> Option<usize> {
        if !(0..self.width).contains(&position.x) || !(0..self.height).contains(&position.y) {
            return None;
        }
        let (x, y, w): (usize, usize, usize) = (position.x as _, position.y as _, self.width as _);
        Some(y * w + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_contains_remove() {
        let mut grid = BitGrid::new(10, 5);
        assert!(grid.is_empty());
        assert_eq!(grid.iter().collect::<Vec<_>>(), vec![]);

        assert!(grid.insert(Position::new(9, 4)));
        assert!(!grid.insert(Position::new(9, 4)));
        assert!(grid.contains(Position::new(9, 4)));
        assert!(!grid.contains(Position::new(4, 9)));
        assert_eq!(grid.len(), 1);

        assert!(grid.remove(Position::new(9, 4)));
        assert!(!grid.remove(Position::new(9, 4)));
        assert!(grid.is_empty());
    }

    #[test]
    fn iterates_in_row_major_order() {
        let mut grid = BitGrid::new(3, 2);
        grid.insert(Position::new(2, 1));
        grid.insert(Position::new(0, 1));
        grid.insert(Position::new(1, 0));
        assert_eq!(
            grid.iter().collect::<Vec<_>>(),
            vec![
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(2, 1)
            ]
        );
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn out_of_bounds_is_never_contained() {
        let grid = BitGrid::new(3, 2);
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(3, 0)));
    }
}
