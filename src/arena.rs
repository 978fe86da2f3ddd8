//! The search-tree node pool.
//!
//! Nodes live in a flat arena and refer to their parents by index, avoiding
//! owned parent pointers and making path reconstruction trivially iterative.
//! Each search run owns its own arena; nodes are never shared across runs.

use std::ops::Index;

use crate::position::Position;

/// Handle to a [`SearchNode`] within one [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u32);

/// One node of the search tree.
#[derive(Debug, Clone, Copy)]
pub struct SearchNode {
    pub state: Position,
    pub parent: Option<NodeId>,
    /// Sum of the entry costs of every state on the path from the start; the
    /// start itself contributes 0.
    pub path_cost: u32,
    pub depth: u32,
}

/// Node pool for a single search run.
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<SearchNode>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a node for `state` reached from `parent` at `path_cost`.
    pub fn push(&mut self, state: Position, parent: Option<NodeId>, path_cost: u32) -> NodeId {
        let depth = match parent {
            Some(parent) => self[parent].depth + 1,
            None => 0,
        };
        let id = NodeId(self.nodes.len().try_into().unwrap());
        self.nodes.push(SearchNode {
            state,
            parent,
            path_cost,
            depth,
        });
        id
    }

    /// Redirects `id` through a cheaper parent (relaxation).
    ///
    /// The new cost must be strictly lower than the current one; equal-cost
    /// offers keep the first-discovered parent.
    pub fn relax(&mut self, id: NodeId, parent: NodeId, path_cost: u32) {
        debug_assert!(path_cost < self[id].path_cost);
        let depth = self[parent].depth + 1;
        let node = &mut self.nodes[id.0 as usize];
        node.parent = Some(parent);
        node.path_cost = path_cost;
        node.depth = depth;
    }

    /// Reconstructs the start-to-`id` path by walking parent links.
    ///
    /// Panics if the parent chain is broken (an invariant violation, not a
    /// user-facing error): parent links must strictly decrease depth down to
    /// a root of depth 0.
    pub fn path_to(&self, id: NodeId) -> Vec<Position> {
        let mut path = Vec::with_capacity(self[id].depth as usize + 1);
        let mut cursor = id;
        loop {
            let node = &self[cursor];
            path.push(node.state);
            match node.parent {
                Some(parent) => {
                    assert!(
                        self[parent].depth < node.depth,
                        "parent chain does not decrease depth"
                    );
                    cursor = parent;
                }
                None => {
                    assert_eq!(node.depth, 0, "root node has nonzero depth");
                    break;
                }
            }
        }
        path.reverse();
        path
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl Index<NodeId> for Arena {
    type Output = SearchNode;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_reconstruction_walks_to_the_root() {
        let mut arena = Arena::new();
        let a = arena.push(Position::new(0, 0), None, 0);
        let b = arena.push(Position::new(1, 0), Some(a), 2);
        let c = arena.push(Position::new(1, 1), Some(b), 3);
        // A sibling of b; must not appear in the path.
        let _ = arena.push(Position::new(0, 1), Some(a), 5);

        assert_eq!(arena[c].depth, 2);
        assert_eq!(
            arena.path_to(c),
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1)
            ]
        );
        assert_eq!(arena.path_to(a), vec![Position::new(0, 0)]);
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn relax_redirects_parent_cost_and_depth() {
        let mut arena = Arena::new();
        let root = arena.push(Position::new(0, 0), None, 0);
        let detour = arena.push(Position::new(0, 1), Some(root), 7);
        let child = arena.push(Position::new(1, 1), Some(detour), 9);
        assert_eq!(arena[child].depth, 2);

        let direct = arena.push(Position::new(1, 0), Some(root), 1);
        arena.relax(child, direct, 3);

        assert_eq!(arena[child].path_cost, 3);
        assert_eq!(arena[child].depth, 2);
        assert_eq!(
            arena.path_to(child),
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1)
            ]
        );
    }
}
