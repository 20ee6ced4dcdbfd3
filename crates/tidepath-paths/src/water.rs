//! Finding a body of water to work at.
//!
//! [`FindWater`] scans outward for swimmable water near an anchor (usually
//! the agent's home). Each candidate is only accepted after a nested
//! [`FindShore`] search proves there is a visible bank to stand on, so the
//! route it returns ends on that bank rather than in the water.

use tidepath_core::{BlockPos, GridClassifier, VisibilityOracle};

use crate::distance::{dist_sqr, manhattan};
use crate::error::SearchError;
use crate::node::Node;
use crate::options::PathingOptions;
use crate::route::{GoalRecord, Route, Verdict};
use crate::search::SearchContext;
use crate::shore::FindShore;
use crate::traits::{Probe, Strategy};

/// A previously used pond, paired with the bank it was worked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExcludedPond {
    pub location: BlockPos,
    pub reference: BlockPos,
}

impl ExcludedPond {
    pub const fn new(location: BlockPos, reference: BlockPos) -> Self {
        Self {
            location,
            reference,
        }
    }
}

/// Tuning for water searches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WaterSearchConfig {
    /// Candidates farther than this (straight-line) from the anchor are ignored.
    pub max_anchor_range: i32,
    /// Minimum Manhattan distance from every excluded pond.
    pub min_separation: i32,
    /// Shore tiles must be closer than this (Manhattan) to the water.
    pub shore_distance: i32,
    /// Extra search radius given to the shore search beyond `shore_distance`.
    pub shore_range_slack: f64,
    pub eye_height: f64,
}

impl Default for WaterSearchConfig {
    fn default() -> Self {
        Self {
            max_anchor_range: 100,
            min_separation: 7,
            shore_distance: 10,
            shore_range_slack: 100.0,
            eye_height: FindShore::EYE_HEIGHT,
        }
    }
}

impl WaterSearchConfig {
    pub fn with_min_separation(self, min_separation: i32) -> Self {
        Self {
            min_separation,
            ..self
        }
    }

    pub fn with_shore_distance(self, shore_distance: i32) -> Self {
        Self {
            shore_distance,
            ..self
        }
    }

    pub fn with_max_anchor_range(self, max_anchor_range: i32) -> Self {
        Self {
            max_anchor_range,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        let bounds = [
            ("max_anchor_range", self.max_anchor_range),
            ("shore_distance", self.shore_distance),
        ];
        for (name, value) in bounds {
            if value <= 0 {
                return Err(SearchError::InvalidDistance { name, value });
            }
        }
        if self.min_separation < 0 {
            return Err(SearchError::InvalidDistance {
                name: "min_separation",
                value: self.min_separation,
            });
        }
        if !self.shore_range_slack.is_finite() || self.shore_range_slack < 0.0 {
            return Err(SearchError::InvalidRange(self.shore_range_slack));
        }
        if !self.eye_height.is_finite() {
            return Err(SearchError::InvalidRange(self.eye_height));
        }
        Ok(())
    }

    fn shore_range(&self) -> f64 {
        f64::from(self.shore_distance) + self.shore_range_slack
    }
}

/// Strategy accepting the first swimmable water cell near `anchor` that has
/// a usable shore.
pub struct FindWater<'a> {
    anchor: BlockPos,
    exclusions: &'a [ExcludedPond],
    config: WaterSearchConfig,
    shore_options: PathingOptions,
    shore_searches: usize,
}

impl<'a> FindWater<'a> {
    /// `shore_options` are used unchanged by the nested shore searches. The
    /// search driving this strategy should run with [`Self::search_options`].
    pub fn new(
        anchor: BlockPos,
        exclusions: &'a [ExcludedPond],
        config: WaterSearchConfig,
        shore_options: PathingOptions,
    ) -> Self {
        Self {
            anchor,
            exclusions,
            config,
            shore_options,
            shore_searches: 0,
        }
    }

    #[inline]
    pub fn anchor(&self) -> BlockPos {
        self.anchor
    }

    /// Options for the search over water: the shore options with both swim
    /// costs zeroed, so water on the way is never avoided.
    pub fn search_options(&self) -> PathingOptions {
        self.shore_options.without_swim_penalty()
    }

    /// How many nested shore searches have run so far.
    #[inline]
    pub fn shore_searches(&self) -> usize {
        self.shore_searches
    }

    fn is_excluded(&self, p: BlockPos) -> bool {
        self.exclusions
            .iter()
            .any(|pond| manhattan(pond.location, p) < i64::from(self.config.min_separation))
    }
}

impl<W: GridClassifier + VisibilityOracle + ?Sized> Strategy<W> for FindWater<'_> {
    fn heuristic(&self, p: BlockPos) -> f64 {
        manhattan(self.anchor, p) as f64
    }

    fn at_destination(&mut self, node: &Node, probe: &Probe<'_, W>) -> Verdict {
        let pos = node.pos();
        let max = i64::from(self.config.max_anchor_range);
        if dist_sqr(self.anchor, pos) > max * max {
            return Verdict::Reject;
        }

        let world = probe.world();
        if !node.is_submerged() || !world.is_liquid(pos.below(1)) {
            return Verdict::Reject;
        }

        if self.is_excluded(pos) {
            log::trace!("water at {pos} is too close to a used pond");
            return Verdict::Reject;
        }

        self.shore_searches += 1;
        let shore = FindShore::new(pos, self.anchor, self.config.shore_distance)
            .with_eye_height(self.config.eye_height);
        let found = match shore.search(world, self.shore_options, self.config.shore_range()) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("shore search from {pos} not started: {e}");
                return Verdict::Reject;
            }
        };
        let Some(found) = found else {
            log::trace!("water at {pos} has no visible shore");
            return Verdict::Reject;
        };
        let Some(bank) = found.route.terminal() else {
            return Verdict::Reject;
        };
        Verdict::AcceptWith {
            goal: GoalRecord::new(pos, bank),
            approach: found.route,
        }
    }
}

/// A found pond and the route to its bank.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterPath {
    /// Ends on the bank, not in the water.
    pub route: Route,
    /// `target()` is the water cell, `endpoint()` the bank.
    pub pond: GoalRecord,
    pub visited: usize,
}

impl WaterPath {
    /// The entry to add to the exclusion list once this pond has been used.
    pub fn excluded_pond(&self) -> ExcludedPond {
        ExcludedPond::new(self.pond.target(), self.pond.endpoint())
    }
}

/// A ready-to-run water search: world, start, anchor and limits.
///
/// The outer search ignores swimming costs so that water is never avoided
/// on the way; the shore searches use the options as given.
pub struct FindWaterJob<'a, W: ?Sized> {
    world: &'a W,
    start: BlockPos,
    anchor: BlockPos,
    range: f64,
    exclusions: &'a [ExcludedPond],
    config: WaterSearchConfig,
    options: PathingOptions,
    node_budget: Option<usize>,
}

impl<'a, W> FindWaterJob<'a, W>
where
    W: GridClassifier + VisibilityOracle + ?Sized,
{
    pub fn new(
        world: &'a W,
        start: BlockPos,
        anchor: BlockPos,
        range: f64,
        exclusions: &'a [ExcludedPond],
    ) -> Self {
        Self {
            world,
            start,
            anchor,
            range,
            exclusions,
            config: WaterSearchConfig::default(),
            options: PathingOptions::default(),
            node_budget: None,
        }
    }

    pub fn with_config(mut self, config: WaterSearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_options(mut self, options: PathingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_node_budget(mut self, budget: usize) -> Self {
        self.node_budget = Some(budget);
        self
    }

    /// Options the outer search runs with.
    pub fn options(&self) -> PathingOptions {
        self.strategy().search_options()
    }

    fn strategy(&self) -> FindWater<'a> {
        FindWater::new(self.anchor, self.exclusions, self.config, self.options)
    }

    /// Run the search. `Ok(None)` means no usable water was found.
    pub fn search(&self) -> Result<Option<WaterPath>, SearchError> {
        self.config.validate()?;
        let mut strategy = self.strategy();
        let options = strategy.search_options();
        let mut ctx = SearchContext::new(self.world, self.start, self.range, options)?;
        if let Some(budget) = self.node_budget {
            ctx = ctx.with_node_budget(budget);
        }
        let found = ctx.search(&mut strategy);
        log::debug!(
            "water search from {} ran {} shore searches",
            self.start,
            strategy.shore_searches()
        );
        Ok(found.and_then(|res| {
            let pond = res.goal?;
            Some(WaterPath {
                route: res.route,
                pond,
                visited: res.visited,
            })
        }))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_fills_missing_fields() {
        let config: WaterSearchConfig = serde_json::from_str(r#"{"min_separation":3}"#).unwrap();
        assert_eq!(config.min_separation, 3);
        assert_eq!(config.shore_distance, 10);
        assert_eq!(config.eye_height, FindShore::EYE_HEIGHT);
    }

    #[test]
    fn excluded_pond_round_trip() {
        let pond = ExcludedPond::new(BlockPos::new(10, 63, 64), BlockPos::new(9, 64, 64));
        let json = serde_json::to_string(&pond).unwrap();
        let back: ExcludedPond = serde_json::from_str(&json).unwrap();
        assert_eq!(pond, back);
    }
}
