use tidepath_core::BlockPos;

use crate::node::Node;
use crate::options::PathingOptions;
use crate::route::Verdict;

/// Read-only view of the running search handed to destination checks.
pub struct Probe<'a, W: ?Sized> {
    pub(crate) world: &'a W,
    pub(crate) start: BlockPos,
    pub(crate) options: &'a PathingOptions,
}

impl<'a, W: ?Sized> Probe<'a, W> {
    /// The world snapshot the search runs on.
    #[inline]
    pub fn world(&self) -> &'a W {
        self.world
    }

    #[inline]
    pub fn start(&self) -> BlockPos {
        self.start
    }

    #[inline]
    pub fn options(&self) -> &'a PathingOptions {
        self.options
    }
}

/// The two hooks that turn the generic search into a concrete job.
///
/// `at_destination` may have effects: it can run a complete nested search
/// against the same world before answering.
pub trait Strategy<W: ?Sized> {
    /// Estimated remaining cost from `p`; drives expansion order.
    fn heuristic(&self, p: BlockPos) -> f64;

    /// Decide whether `node` ends the search.
    fn at_destination(&mut self, node: &Node, probe: &Probe<'_, W>) -> Verdict;
}

/// A [`Strategy`] assembled from two closures.
pub struct FnStrategy<H, D> {
    heuristic: H,
    destination: D,
}

/// Build a strategy from a heuristic and a destination predicate.
pub fn from_fns<W, H, D>(heuristic: H, destination: D) -> FnStrategy<H, D>
where
    W: ?Sized,
    H: Fn(BlockPos) -> f64,
    D: FnMut(&Node, &Probe<'_, W>) -> Verdict,
{
    FnStrategy {
        heuristic,
        destination,
    }
}

impl<W, H, D> Strategy<W> for FnStrategy<H, D>
where
    W: ?Sized,
    H: Fn(BlockPos) -> f64,
    D: FnMut(&Node, &Probe<'_, W>) -> Verdict,
{
    #[inline]
    fn heuristic(&self, p: BlockPos) -> f64 {
        (self.heuristic)(p)
    }

    #[inline]
    fn at_destination(&mut self, node: &Node, probe: &Probe<'_, W>) -> Verdict {
        (self.destination)(node, probe)
    }
}
