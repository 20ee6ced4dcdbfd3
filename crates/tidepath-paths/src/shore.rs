use tidepath_core::{BlockPos, GridClassifier, Vec3, VisibilityOracle};

use crate::distance::manhattan;
use crate::error::SearchError;
use crate::node::Node;
use crate::options::PathingOptions;
use crate::route::{PathResult, Verdict};
use crate::search::SearchContext;
use crate::traits::{Probe, Strategy};

/// Reverse lookup from a point in the water to dry land an agent can stand
/// on and still see that point from.
///
/// A shore tile is accepted when it is dry, closer than `distance` blocks
/// (Manhattan) to `start`, stands on a walkable block, and has a clear line
/// of sight to a point `eye_height` above `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FindShore {
    start: BlockPos,
    direction: BlockPos,
    distance: i32,
    eye_height: f64,
}

impl FindShore {
    /// Height above the water cell the sight line is cast from.
    pub const EYE_HEIGHT: f64 = 1.8;

    /// Search outward from `start`, drawn towards `direction`.
    pub fn new(start: BlockPos, direction: BlockPos, distance: i32) -> Self {
        Self {
            start,
            direction,
            distance,
            eye_height: Self::EYE_HEIGHT,
        }
    }

    pub fn with_eye_height(self, eye_height: f64) -> Self {
        Self { eye_height, ..self }
    }

    #[inline]
    pub fn start(&self) -> BlockPos {
        self.start
    }

    #[inline]
    pub fn direction(&self) -> BlockPos {
        self.direction
    }

    #[inline]
    pub fn distance(&self) -> i32 {
        self.distance
    }

    /// Run the shore search to completion.
    pub fn search<W>(
        mut self,
        world: &W,
        options: PathingOptions,
        max_range: f64,
    ) -> Result<Option<PathResult>, SearchError>
    where
        W: GridClassifier + VisibilityOracle + ?Sized,
    {
        if self.distance <= 0 {
            return Err(SearchError::InvalidDistance {
                name: "shore_distance",
                value: self.distance,
            });
        }
        let ctx = SearchContext::new(world, self.start, max_range, options)?;
        Ok(ctx.search(&mut self))
    }

    /// Whether `p` can be seen from the eye point above the start.
    pub fn can_see<W: VisibilityOracle + ?Sized>(&self, world: &W, p: BlockPos) -> bool {
        let eye = self.start.corner() + Vec3::new(0.0, self.eye_height, 0.0);
        world.clear_line_of_sight(eye, p.corner())
    }

    /// All four acceptance conditions for a candidate at `p`.
    pub fn accepts<W>(&self, world: &W, p: BlockPos, submerged: bool) -> bool
    where
        W: GridClassifier + VisibilityOracle + ?Sized,
    {
        !submerged
            && manhattan(self.start, p) < i64::from(self.distance)
            && world.is_walkable(p.below(1))
            && self.can_see(world, p)
    }
}

impl<W: GridClassifier + VisibilityOracle + ?Sized> Strategy<W> for FindShore {
    fn heuristic(&self, p: BlockPos) -> f64 {
        manhattan(self.direction, p) as f64
    }

    fn at_destination(&mut self, node: &Node, probe: &Probe<'_, W>) -> Verdict {
        Verdict::from(self.accepts(probe.world(), node.pos(), node.is_submerged()))
    }
}
