use std::cmp::Ordering;

use tidepath_core::BlockPos;

/// The visited-state record of one grid cell during a search.
///
/// Nodes belong to the arena of a single search. The `submerged` flag is
/// resolved by the movement model when the node is created and never changes
/// afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pos: BlockPos,
    cost: f64,
    heuristic: f64,
    parent: Option<usize>,
    submerged: bool,
    pub(crate) closed: bool,
    /// Sequence number of the most recent heap entry for this node.
    pub(crate) seq: u64,
}

impl Node {
    pub(crate) fn new(
        pos: BlockPos,
        cost: f64,
        heuristic: f64,
        parent: Option<usize>,
        submerged: bool,
        seq: u64,
    ) -> Self {
        Self {
            pos,
            cost,
            heuristic,
            parent,
            submerged,
            closed: false,
            seq,
        }
    }

    #[inline]
    pub fn pos(&self) -> BlockPos {
        self.pos
    }

    /// Accumulated cost from the search start.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Heuristic estimate supplied by the strategy.
    #[inline]
    pub fn heuristic(&self) -> f64 {
        self.heuristic
    }

    /// `cost + heuristic`, the open-set priority.
    #[inline]
    pub fn total(&self) -> f64 {
        self.cost + self.heuristic
    }

    /// Arena index of the predecessor, `None` for the start node.
    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Whether the agent is swimming at this node.
    #[inline]
    pub fn is_submerged(&self) -> bool {
        self.submerged
    }

    /// Lower the accumulated cost through a new predecessor.
    pub(crate) fn relink(&mut self, cost: f64, parent: usize, seq: u64) {
        self.cost = cost;
        self.parent = Some(parent);
        self.seq = seq;
    }
}

/// Heap entry pointing into the node arena.
///
/// Ordered so that `BinaryHeap` pops the lowest total first, then the lowest
/// heuristic, then the earliest insertion.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) total: f64,
    pub(crate) heuristic: f64,
    pub(crate) seq: u64,
}

impl NodeRef {
    pub(crate) fn of(idx: usize, node: &Node) -> Self {
        Self {
            idx,
            total: node.total(),
            heuristic: node.heuristic,
            seq: node.seq,
        }
    }
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .total
            .total_cmp(&self.total)
            .then_with(|| other.heuristic.total_cmp(&self.heuristic))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}
