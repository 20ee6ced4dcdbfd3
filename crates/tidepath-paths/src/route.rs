use tidepath_core::BlockPos;

/// Ordered cells from the search start to the route's terminal, inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    points: Vec<BlockPos>,
}

impl Route {
    pub fn new(points: Vec<BlockPos>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[BlockPos] {
        &self.points
    }

    pub fn start(&self) -> Option<BlockPos> {
        self.points.first().copied()
    }

    /// The cell the route ends on.
    pub fn terminal(&self) -> Option<BlockPos> {
        self.points.last().copied()
    }

    /// Number of cells, both endpoints included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<BlockPos> {
        self.points
    }
}

impl From<Vec<BlockPos>> for Route {
    fn from(points: Vec<BlockPos>) -> Self {
        Self::new(points)
    }
}

/// What a destination predicate found: the accepted target and the cell the
/// returned route ends on.
///
/// For water searches `target` is the liquid cell and `endpoint` the shore
/// tile the agent should stand on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalRecord {
    target: BlockPos,
    endpoint: BlockPos,
}

impl GoalRecord {
    pub const fn new(target: BlockPos, endpoint: BlockPos) -> Self {
        Self { target, endpoint }
    }

    #[inline]
    pub const fn target(&self) -> BlockPos {
        self.target
    }

    #[inline]
    pub const fn endpoint(&self) -> BlockPos {
        self.endpoint
    }
}

/// Outcome of a destination check.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Reject,
    /// Accept; the route ends on the node itself.
    Accept,
    /// Accept and record a goal. When `goal.endpoint()` differs from the
    /// node, `approach` leads from the node to the endpoint.
    AcceptWith { goal: GoalRecord, approach: Route },
}

impl Verdict {
    #[inline]
    pub fn is_accept(&self) -> bool {
        !matches!(self, Self::Reject)
    }
}

impl From<bool> for Verdict {
    fn from(accept: bool) -> Self {
        if accept { Self::Accept } else { Self::Reject }
    }
}

/// A successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub route: Route,
    pub goal: Option<GoalRecord>,
    /// Number of nodes popped from the open set.
    pub visited: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_endpoints() {
        let r = Route::new(vec![
            BlockPos::new(0, 64, 0),
            BlockPos::new(1, 64, 0),
            BlockPos::new(2, 65, 0),
        ]);
        assert_eq!(r.start(), Some(BlockPos::new(0, 64, 0)));
        assert_eq!(r.terminal(), Some(BlockPos::new(2, 65, 0)));
        assert_eq!(r.len(), 3);
        assert!(Route::default().terminal().is_none());
    }

    #[test]
    fn verdict_from_bool() {
        assert_eq!(Verdict::from(true), Verdict::Accept);
        assert!(!Verdict::from(false).is_accept());
        let goal = GoalRecord::new(BlockPos::ZERO, BlockPos::new(1, 0, 0));
        assert!(
            Verdict::AcceptWith {
                goal,
                approach: Route::default()
            }
            .is_accept()
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn goal_round_trip() {
        let g = GoalRecord::new(BlockPos::new(10, 63, 64), BlockPos::new(9, 64, 64));
        let json = serde_json::to_string(&g).unwrap();
        let back: GoalRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}
