//! Node storage for the linked sparse matrix
//!
//! Every node (master sentinel, row and column sentinels, stored elements)
//! lives in a single arena and refers to its neighbours by [`NodeId`].
//! A fresh node is self-looped in both directions, so an empty ring is a
//! sentinel whose `right` points back at itself.

/// Index of a node inside a [`NodeArena`]
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(value: usize) -> Self {
        Self(value)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A sentinel or a stored non-zero element
///
/// `row` is -1 for the master sentinel and 0 for column sentinels;
/// `col` is -1 for the master sentinel and 0 for row sentinels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Node<T> {
    /// Next node in the same row ring (or the next column sentinel)
    pub(crate) right: NodeId,
    /// Next row sentinel
    pub(crate) down: NodeId,
    pub(crate) row: isize,
    pub(crate) col: isize,
    pub(crate) value: T,
}

/// Owner of every node of one matrix
///
/// Slots released by [`NodeArena::release`] are recycled by the next
/// allocation, so clearing and refilling a matrix does not grow the arena.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<T> {
    nodes: Vec<Node<T>>,
    free: Vec<NodeId>,
}

impl<T: Copy> NodeArena<T> {
    /// Creates an empty arena with room for `capacity` nodes, reporting a
    /// capacity that cannot be reserved instead of aborting
    pub(crate) fn try_with_capacity(
        capacity: usize,
    ) -> Result<Self, std::collections::TryReserveError> {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(capacity)?;
        Ok(Self {
            nodes,
            free: Vec::new(),
        })
    }

    /// Allocates a self-looped node
    pub(crate) fn alloc(&mut self, row: isize, col: isize, value: T) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = Node {
                    right: id,
                    down: id,
                    row,
                    col,
                    value,
                };
                id
            }
            None => {
                let id = NodeId::new(self.nodes.len());
                self.nodes.push(Node {
                    right: id,
                    down: id,
                    row,
                    col,
                    value,
                });
                id
            }
        }
    }

    /// Returns a slot to the free list; the caller must already have
    /// unlinked it from every ring
    pub(crate) fn release(&mut self, id: NodeId) {
        self.free.push(id);
    }

    /// Number of slots currently linked into the matrix
    pub(crate) fn live(&self) -> usize {
        self.nodes.len() - self.free.len()
    }
}

impl<T> std::ops::Index<NodeId> for NodeArena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }
}

impl<T> std::ops::IndexMut<NodeId> for NodeArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_is_self_looped() {
        let mut arena = NodeArena::try_with_capacity(1).unwrap();
        let id = arena.alloc(-1, -1, 0.0);
        assert_eq!(arena[id].right, id);
        assert_eq!(arena[id].down, id);
        assert_eq!(arena.live(), 1);
    }

    #[test]
    fn test_released_slots_are_reused() {
        let mut arena = NodeArena::try_with_capacity(2).unwrap();
        let a = arena.alloc(1, 1, 1.0);
        let b = arena.alloc(1, 2, 2.0);
        arena.release(a);
        assert_eq!(arena.live(), 1);

        let c = arena.alloc(2, 3, 3.0);
        assert_eq!(c, a);
        assert_ne!(c, b);
        assert_eq!(arena[c].col, 3);
        assert_eq!(arena[c].right, c);
        assert_eq!(arena.live(), 2);
    }

    #[test]
    fn test_try_with_capacity_rejects_huge_requests() {
        assert!(NodeArena::<f64>::try_with_capacity(usize::MAX).is_err());

        let arena = NodeArena::<f64>::try_with_capacity(4).unwrap();
        assert_eq!(arena.live(), 0);
    }
}
