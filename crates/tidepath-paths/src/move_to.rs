use tidepath_core::{BlockPos, GridClassifier};

use crate::distance::manhattan;
use crate::error::SearchError;
use crate::node::Node;
use crate::options::PathingOptions;
use crate::route::{PathResult, Verdict};
use crate::search::SearchContext;
use crate::traits::{Probe, Strategy};

/// Plain travel to a fixed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTo {
    goal: BlockPos,
}

impl MoveTo {
    pub fn new(goal: BlockPos) -> Self {
        Self { goal }
    }

    #[inline]
    pub fn goal(&self) -> BlockPos {
        self.goal
    }
}

impl<W: ?Sized> Strategy<W> for MoveTo {
    fn heuristic(&self, p: BlockPos) -> f64 {
        manhattan(self.goal, p) as f64
    }

    fn at_destination(&mut self, node: &Node, _probe: &Probe<'_, W>) -> Verdict {
        Verdict::from(node.pos() == self.goal)
    }
}

/// Route from `start` to `goal`, searching at most `max_range` blocks out.
pub fn move_to<W: GridClassifier + ?Sized>(
    world: &W,
    start: BlockPos,
    goal: BlockPos,
    max_range: f64,
    options: PathingOptions,
) -> Result<Option<PathResult>, SearchError> {
    let ctx = SearchContext::new(world, start, max_range, options)?;
    Ok(ctx.search(&mut MoveTo::new(goal)))
}
