use std::collections::{BinaryHeap, HashMap};

use tidepath_core::{BlockPos, GridClassifier};

use crate::distance::dist_sqr;
use crate::error::SearchError;
use crate::movement::{self, Move};
use crate::node::{Node, NodeRef};
use crate::options::PathingOptions;
use crate::route::{GoalRecord, PathResult, Route, Verdict};
use crate::traits::{Probe, Strategy};

/// State of a single search: the borrowed world, the limits, and the
/// node arena with its open set.
///
/// A context is consumed by [`search`](Self::search). Nested searches build
/// their own context over the same world.
pub struct SearchContext<'w, W: ?Sized> {
    world: &'w W,
    start: BlockPos,
    max_range: f64,
    options: PathingOptions,
    node_budget: Option<usize>,
    nodes: Vec<Node>,
    index: HashMap<BlockPos, usize>,
    open: BinaryHeap<NodeRef>,
    seq: u64,
}

enum Outcome {
    Found {
        idx: usize,
        goal: Option<GoalRecord>,
        approach: Route,
    },
    Exhausted,
    OutOfRange,
    BudgetSpent,
}

impl<'w, W: GridClassifier + ?Sized> SearchContext<'w, W> {
    /// Set up a search from `start` that gives up once it pops a node farther
    /// than `max_range` (straight-line) from `start`.
    pub fn new(
        world: &'w W,
        start: BlockPos,
        max_range: f64,
        options: PathingOptions,
    ) -> Result<Self, SearchError> {
        if !max_range.is_finite() || max_range <= 0.0 {
            return Err(SearchError::InvalidRange(max_range));
        }
        options.validate()?;
        Ok(Self {
            world,
            start,
            max_range,
            options,
            node_budget: None,
            nodes: Vec::new(),
            index: HashMap::new(),
            open: BinaryHeap::new(),
            seq: 0,
        })
    }

    /// Stop after popping `budget` nodes without reaching a destination.
    pub fn with_node_budget(mut self, budget: usize) -> Self {
        self.node_budget = Some(budget);
        self
    }

    #[inline]
    pub fn start(&self) -> BlockPos {
        self.start
    }

    #[inline]
    pub fn max_range(&self) -> f64 {
        self.max_range
    }

    #[inline]
    pub fn options(&self) -> &PathingOptions {
        &self.options
    }

    /// Run best-first expansion until `strategy` accepts a node.
    ///
    /// Returns `None` when the open set runs dry, the range is exceeded, or
    /// the node budget is spent; these cases are not told apart.
    pub fn search<S: Strategy<W>>(mut self, strategy: &mut S) -> Option<PathResult> {
        let start = self.start;
        let submerged = self.world.is_liquid(start);
        self.insert(start, 0.0, strategy.heuristic(start), None, submerged);

        let range_sqr = self.max_range * self.max_range;
        let mut visited = 0usize;
        let mut moves: Vec<Move> = Vec::with_capacity(6);

        let outcome = loop {
            let Some(current) = self.open.pop() else {
                break Outcome::Exhausted;
            };
            let ci = current.idx;

            // Skip stale entries.
            let node = self.nodes[ci];
            if node.closed || node.seq != current.seq {
                continue;
            }

            if dist_sqr(start, node.pos()) as f64 > range_sqr {
                break Outcome::OutOfRange;
            }
            visited += 1;
            if self.node_budget.is_some_and(|budget| visited > budget) {
                break Outcome::BudgetSpent;
            }

            let probe = Probe {
                world: self.world,
                start,
                options: &self.options,
            };
            match strategy.at_destination(&node, &probe) {
                Verdict::Reject => {}
                Verdict::Accept => {
                    break Outcome::Found {
                        idx: ci,
                        goal: None,
                        approach: Route::default(),
                    };
                }
                Verdict::AcceptWith { goal, approach } => {
                    break Outcome::Found {
                        idx: ci,
                        goal: Some(goal),
                        approach,
                    };
                }
            }

            self.nodes[ci].closed = true;

            moves.clear();
            movement::successors(
                self.world,
                &self.options,
                node.pos(),
                node.is_submerged(),
                &mut moves,
            );
            for mv in &moves {
                self.relax(strategy, ci, node.cost(), mv);
            }
        };

        match outcome {
            Outcome::Found {
                idx,
                goal,
                approach,
            } => {
                let route = self.build_route(idx, goal.as_ref(), approach);
                log::debug!(
                    "search from {start} reached {} after {visited} nodes",
                    route.terminal().unwrap_or(start)
                );
                Some(PathResult {
                    route,
                    goal,
                    visited,
                })
            }
            Outcome::Exhausted => {
                log::debug!("search from {start} exhausted after {visited} nodes");
                None
            }
            Outcome::OutOfRange => {
                log::debug!(
                    "search from {start} left range {} after {visited} nodes",
                    self.max_range
                );
                None
            }
            Outcome::BudgetSpent => {
                log::debug!("search from {start} spent its node budget");
                None
            }
        }
    }

    fn relax<S: Strategy<W>>(&mut self, strategy: &S, parent: usize, parent_cost: f64, mv: &Move) {
        let cost = parent_cost + mv.cost;
        match self.index.get(&mv.pos) {
            Some(&ni) => {
                let n = &self.nodes[ni];
                if n.closed || cost >= n.cost() {
                    return;
                }
                self.seq += 1;
                let n = &mut self.nodes[ni];
                n.relink(cost, parent, self.seq);
                self.open.push(NodeRef::of(ni, n));
            }
            None => {
                let h = strategy.heuristic(mv.pos);
                self.insert(mv.pos, cost, h, Some(parent), mv.submerged);
            }
        }
    }

    fn insert(
        &mut self,
        pos: BlockPos,
        cost: f64,
        heuristic: f64,
        parent: Option<usize>,
        submerged: bool,
    ) {
        self.seq += 1;
        let idx = self.nodes.len();
        let node = Node::new(pos, cost, heuristic, parent, submerged, self.seq);
        self.open.push(NodeRef::of(idx, &node));
        self.nodes.push(node);
        self.index.insert(pos, idx);
    }

    /// Walk parent links from `idx` back to the start.
    fn path_to(&self, idx: usize) -> Vec<BlockPos> {
        let mut path = Vec::new();
        let mut cur = Some(idx);
        while let Some(ci) = cur {
            let n = &self.nodes[ci];
            path.push(n.pos());
            cur = n.parent();
        }
        path.reverse();
        path
    }

    /// The route ends on the accepted node, or on the goal's endpoint when
    /// one was recorded. An endpoint this search already reached is walked
    /// back through its own parent links; otherwise the approach path is
    /// appended.
    fn build_route(&self, idx: usize, goal: Option<&GoalRecord>, approach: Route) -> Route {
        let pos = self.nodes[idx].pos();
        let Some(goal) = goal.filter(|g| g.endpoint() != pos) else {
            return Route::new(self.path_to(idx));
        };
        if let Some(&ei) = self.index.get(&goal.endpoint()) {
            return Route::new(self.path_to(ei));
        }
        let mut path = self.path_to(idx);
        path.extend(approach.into_points().into_iter().skip_while(|&p| p == pos));
        Route::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use crate::traits::from_fns;
    use tidepath_core::{CellKind, Cuboid};
    use tidepath_world::VoxelWorld;

    /// Walkable floor at y = 63 over x, z in [0, 16).
    fn field() -> VoxelWorld {
        let mut w = VoxelWorld::new(Cuboid::new(
            BlockPos::new(0, 60, 0),
            BlockPos::new(16, 70, 16),
        ));
        w.fill(
            Cuboid::inclusive(BlockPos::new(0, 60, 0), BlockPos::new(15, 63, 15)),
            CellKind::Walkable,
        );
        w
    }

    fn reach(goal: BlockPos) -> impl Strategy<VoxelWorld> {
        from_fns(
            move |p| manhattan(p, goal) as f64,
            move |n: &Node, _: &Probe<'_, VoxelWorld>| Verdict::from(n.pos() == goal),
        )
    }

    fn is_connected(route: &Route) -> bool {
        route
            .points()
            .windows(2)
            .all(|w| (w[0].x - w[1].x).abs() + (w[0].z - w[1].z).abs() <= 1)
    }

    #[test]
    fn rejects_bad_range() {
        let w = field();
        let start = BlockPos::new(1, 64, 1);
        for r in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                SearchContext::new(&w, start, r, PathingOptions::default()),
                Err(SearchError::InvalidRange(_))
            ));
        }
        let bad = PathingOptions {
            walk_cost: -1.0,
            ..PathingOptions::default()
        };
        assert!(SearchContext::new(&w, start, 10.0, bad).is_err());
    }

    #[test]
    fn shortest_walk_on_open_field() {
        let w = field();
        let start = BlockPos::new(1, 64, 1);
        let goal = BlockPos::new(6, 64, 4);
        let ctx = SearchContext::new(&w, start, 32.0, PathingOptions::default()).unwrap();
        let res = ctx.search(&mut reach(goal)).unwrap();
        assert_eq!(res.route.start(), Some(start));
        assert_eq!(res.route.terminal(), Some(goal));
        assert_eq!(res.route.len(), manhattan(start, goal) as usize + 1);
        assert!(is_connected(&res.route));
        assert!(res.goal.is_none());
    }

    #[test]
    fn start_can_be_the_destination() {
        let w = field();
        let start = BlockPos::new(3, 64, 3);
        let ctx = SearchContext::new(&w, start, 5.0, PathingOptions::default()).unwrap();
        let res = ctx.search(&mut reach(start)).unwrap();
        assert_eq!(res.route.points(), &[start]);
        assert_eq!(res.visited, 1);
    }

    #[test]
    fn walled_off_goal_exhausts() {
        let mut w = field();
        w.fill(
            Cuboid::inclusive(BlockPos::new(8, 64, 0), BlockPos::new(8, 66, 15)),
            CellKind::Solid,
        );
        let ctx =
            SearchContext::new(&w, BlockPos::new(1, 64, 1), 64.0, PathingOptions::default()).unwrap();
        assert!(ctx.search(&mut reach(BlockPos::new(12, 64, 1))).is_none());
    }

    #[test]
    fn range_cutoff_reports_no_route() {
        let w = field();
        let start = BlockPos::new(0, 64, 0);
        let goal = BlockPos::new(15, 64, 0);
        let near = SearchContext::new(&w, start, 8.0, PathingOptions::default()).unwrap();
        assert!(near.search(&mut reach(goal)).is_none());
        let far = SearchContext::new(&w, start, 16.0, PathingOptions::default()).unwrap();
        assert!(far.search(&mut reach(goal)).is_some());
    }

    #[test]
    fn node_budget_stops_the_search() {
        let w = field();
        let start = BlockPos::new(0, 64, 0);
        let mut never = from_fns(|_| 0.0, |_: &Node, _: &Probe<'_, VoxelWorld>| Verdict::Reject);
        let ctx = SearchContext::new(&w, start, 64.0, PathingOptions::default())
            .unwrap()
            .with_node_budget(10);
        assert!(ctx.search(&mut never).is_none());

        let mut seen = 0usize;
        let mut counting = from_fns(|_| 0.0, |_: &Node, _: &Probe<'_, VoxelWorld>| {
            seen += 1;
            Verdict::Reject
        });
        let ctx = SearchContext::new(&w, start, 64.0, PathingOptions::default())
            .unwrap()
            .with_node_budget(10);
        assert!(ctx.search(&mut counting).is_none());
        drop(counting);
        assert_eq!(seen, 10);
    }

    #[test]
    fn ties_break_the_same_way_every_time() {
        let w = field();
        let start = BlockPos::new(2, 64, 2);
        let goal = BlockPos::new(9, 64, 9);
        let run = || {
            SearchContext::new(&w, start, 32.0, PathingOptions::default())
                .unwrap()
                .search(&mut reach(goal))
                .unwrap()
        };
        let first = run();
        for _ in 0..5 {
            assert_eq!(run(), first);
        }
    }

    #[test]
    fn endpoint_already_reached_is_walked_back() {
        let w = field();
        let start = BlockPos::new(1, 64, 1);
        let target = BlockPos::new(5, 64, 1);
        let endpoint = BlockPos::new(3, 64, 1);
        let mut s = from_fns(
            move |p| manhattan(p, target) as f64,
            move |n: &Node, _: &Probe<'_, VoxelWorld>| {
                if n.pos() == target {
                    Verdict::AcceptWith {
                        goal: GoalRecord::new(target, endpoint),
                        approach: Route::default(),
                    }
                } else {
                    Verdict::Reject
                }
            },
        );
        let res = SearchContext::new(&w, start, 32.0, PathingOptions::default())
            .unwrap()
            .search(&mut s)
            .unwrap();
        assert_eq!(res.route.terminal(), Some(endpoint));
        assert_eq!(res.route.len(), 3);
        assert_eq!(res.goal.map(|g| g.target()), Some(target));
    }

    #[test]
    fn unseen_endpoint_is_reached_through_the_approach() {
        let w = field();
        let start = BlockPos::new(1, 64, 1);
        let target = BlockPos::new(3, 64, 1);
        let approach = Route::new(vec![
            target,
            BlockPos::new(3, 64, 2),
            BlockPos::new(3, 64, 3),
        ]);
        let endpoint = BlockPos::new(3, 64, 3);
        let mut s = from_fns(
            move |p| manhattan(p, target) as f64,
            move |n: &Node, _: &Probe<'_, VoxelWorld>| {
                if n.pos() == target {
                    Verdict::AcceptWith {
                        goal: GoalRecord::new(target, endpoint),
                        approach: approach.clone(),
                    }
                } else {
                    Verdict::Reject
                }
            },
        );
        let res = SearchContext::new(&w, start, 32.0, PathingOptions::default())
            .unwrap()
            .search(&mut s)
            .unwrap();
        assert_eq!(
            res.route.points(),
            &[
                start,
                BlockPos::new(2, 64, 1),
                target,
                BlockPos::new(3, 64, 2),
                endpoint
            ]
        );
    }

    #[test]
    fn destination_check_may_run_a_nested_search() {
        let w = field();
        let start = BlockPos::new(1, 64, 1);
        let corner = BlockPos::new(12, 64, 12);
        let mut nested_runs = 0;
        let mut s = from_fns(
            |_| 0.0,
            |n: &Node, probe: &Probe<'_, VoxelWorld>| {
                if manhattan(n.pos(), start) < 3 {
                    return Verdict::Reject;
                }
                nested_runs += 1;
                let inner = SearchContext::new(probe.world(), n.pos(), 4.0, *probe.options())
                    .unwrap()
                    .search(&mut reach(corner));
                Verdict::from(inner.is_some())
            },
        );
        let outer = SearchContext::new(&w, start, 64.0, PathingOptions::default()).unwrap();
        let res = outer.search(&mut s).unwrap();
        drop(s);
        let terminal = res.route.terminal().unwrap();
        assert!(f64::from(dist_sqr(terminal, corner) as i32).sqrt() <= 4.0 + 1e-9);
        assert!(nested_runs > 1);
    }
}
