//! Open-set disciplines: FIFO/LIFO deques and the cost-ordered fringe.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use ahash::AHashMap;

use crate::arena::NodeId;
use crate::bitgrid::BitGrid;
use crate::position::Position;

/// Pop discipline of a [`DequeFringe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Pop-front: insertion order equals discovery order (BFS).
    Fifo,
    /// Pop-back (DFS and the depth-limited variants).
    Lifo,
}

/// The open set for the unweighted strategies.
///
/// Backed by a deque of node handles plus a per-cell bit set for the O(1)
/// membership query the admit policy needs.
#[derive(Debug)]
pub struct DequeFringe {
    order: Order,
    queue: VecDeque<(Position, NodeId)>,
    members: BitGrid,
}

impl DequeFringe {
    pub fn new(order: Order, width: i16, height: i16) -> Self {
        Self {
            order,
            queue: VecDeque::new(),
            members: BitGrid::new(width, height),
        }
    }

    /// Inserts `state`, which must not already be in the fringe.
    pub fn push(&mut self, state: Position, node: NodeId) {
        let newly = self.members.insert(state);
        debug_assert!(newly, "state {state:?} inserted into fringe twice");
        self.queue.push_back((state, node));
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        let (state, node) = match self.order {
            Order::Fifo => self.queue.pop_front()?,
            Order::Lifo => self.queue.pop_back()?,
        };
        self.members.remove(state);
        Some(node)
    }

    pub fn contains(&self, state: Position) -> bool {
        self.members.contains(state)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// A fringe ordering key: path cost plus (for A*) a heuristic estimate.
///
/// Keys are finite floats; ordering is `f64::total_cmp`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Key(f64);

impl Key {
    pub fn new(value: f64) -> Self {
        debug_assert!(value.is_finite() && value >= 0.0);
        Key(value)
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct HeapEntry {
    key: Key,
    /// Monotonic insertion counter; equal keys pop in insertion order.
    seq: u64,
    state: Position,
    node: NodeId,
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.key, self.seq).cmp(&(other.key, other.seq))
    }
}

/// The open set for UCS and A*: pops the minimum-key entry, with stable FIFO
/// ordering between equal keys.
///
/// Decrease-key is implemented lazily: a strictly lower offer for a state
/// already in the fringe records the new key and pushes a fresh heap entry;
/// the superseded entry is skipped when popped. Equal-or-higher offers are
/// ignored, so ties keep the first-discovered parent.
#[derive(Debug, Default)]
pub struct CostFringe {
    heap: BinaryHeap<Reverse<HeapEntry>>,
    recorded: AHashMap<Position, (Key, NodeId)>,
    seq: u64,
}

impl CostFringe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers `state` at `key`; returns whether the offer was recorded.
    pub fn offer(&mut self, state: Position, key: Key, node: NodeId) -> bool {
        if let Some(&(recorded, _)) = self.recorded.get(&state) {
            if key >= recorded {
                return false;
            }
        }
        self.recorded.insert(state, (key, node));
        self.heap.push(Reverse(HeapEntry {
            key,
            seq: self.seq,
            state,
            node,
        }));
        self.seq += 1;
        true
    }

    /// Pops the minimum-key entry and removes the state from the fringe.
    pub fn pop(&mut self) -> Option<(Position, NodeId)> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            match self.recorded.get(&entry.state) {
                Some(&(key, _)) if key == entry.key => {
                    self.recorded.remove(&entry.state);
                    return Some((entry.state, entry.node));
                }
                // Superseded by a decrease-key, or already popped.
                _ => continue,
            }
        }
        None
    }

    /// The key currently recorded for `state`, if it is in the fringe.
    pub fn recorded_key(&self, state: Position) -> Option<Key> {
        self.recorded.get(&state).map(|&(key, _)| key)
    }

    pub fn contains(&self, state: Position) -> bool {
        self.recorded.contains_key(&state)
    }

    pub fn is_empty(&self) -> bool {
        self.recorded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;

    fn ids(n: usize) -> (Arena, Vec<NodeId>) {
        let mut arena = Arena::new();
        let ids = (0..n)
            .map(|i| arena.push(Position::new(i as i16, 0), None, 0))
            .collect();
        (arena, ids)
    }

    #[test]
    fn fifo_pops_in_insertion_order() {
        let (_arena, ids) = ids(3);
        let mut fringe = DequeFringe::new(Order::Fifo, 10, 10);
        for (i, &id) in ids.iter().enumerate() {
            fringe.push(Position::new(i as i16, 0), id);
        }
        assert!(fringe.contains(Position::new(1, 0)));
        assert_eq!(fringe.pop(), Some(ids[0]));
        assert_eq!(fringe.pop(), Some(ids[1]));
        assert_eq!(fringe.pop(), Some(ids[2]));
        assert_eq!(fringe.pop(), None);
        assert!(!fringe.contains(Position::new(1, 0)));
    }

    #[test]
    fn lifo_pops_in_reverse_insertion_order() {
        let (_arena, ids) = ids(3);
        let mut fringe = DequeFringe::new(Order::Lifo, 10, 10);
        for (i, &id) in ids.iter().enumerate() {
            fringe.push(Position::new(i as i16, 0), id);
        }
        assert_eq!(fringe.pop(), Some(ids[2]));
        assert_eq!(fringe.pop(), Some(ids[1]));
        assert_eq!(fringe.pop(), Some(ids[0]));
        assert_eq!(fringe.pop(), None);
    }

    #[test]
    fn cost_fringe_pops_minimum_key_first() {
        let (_arena, ids) = ids(3);
        let mut fringe = CostFringe::new();
        fringe.offer(Position::new(0, 0), Key::new(5.0), ids[0]);
        fringe.offer(Position::new(1, 0), Key::new(2.0), ids[1]);
        fringe.offer(Position::new(2, 0), Key::new(9.0), ids[2]);

        assert_eq!(fringe.pop(), Some((Position::new(1, 0), ids[1])));
        assert_eq!(fringe.pop(), Some((Position::new(0, 0), ids[0])));
        assert_eq!(fringe.pop(), Some((Position::new(2, 0), ids[2])));
        assert_eq!(fringe.pop(), None);
        assert!(fringe.is_empty());
    }

    #[test]
    fn equal_keys_pop_in_insertion_order() {
        let (_arena, ids) = ids(4);
        let mut fringe = CostFringe::new();
        for (i, &id) in ids.iter().enumerate() {
            fringe.offer(Position::new(i as i16, 0), Key::new(3.0), id);
        }
        let order: Vec<_> = std::iter::from_fn(|| fringe.pop()).collect();
        assert_eq!(
            order,
            vec![
                (Position::new(0, 0), ids[0]),
                (Position::new(1, 0), ids[1]),
                (Position::new(2, 0), ids[2]),
                (Position::new(3, 0), ids[3]),
            ]
        );
    }

    #[test]
    fn strictly_lower_offer_replaces_equal_or_higher_is_ignored() {
        let (_arena, ids) = ids(2);
        let state = Position::new(0, 0);
        let mut fringe = CostFringe::new();

        assert!(fringe.offer(state, Key::new(5.0), ids[0]));
        assert_eq!(fringe.recorded_key(state), Some(Key::new(5.0)));

        // Equal offer is ignored: the first entry keeps its parent node.
        assert!(!fringe.offer(state, Key::new(5.0), ids[1]));
        // Higher offer is ignored.
        assert!(!fringe.offer(state, Key::new(7.0), ids[1]));
        // Strictly lower offer replaces (decrease-key).
        assert!(fringe.offer(state, Key::new(3.0), ids[1]));
        assert_eq!(fringe.recorded_key(state), Some(Key::new(3.0)));

        assert_eq!(fringe.pop(), Some((state, ids[1])));
        // The superseded entry must not resurface.
        assert_eq!(fringe.pop(), None);
    }
}
