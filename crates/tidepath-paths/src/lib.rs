//! Goal-directed best-first search over voxel grids.
//!
//! One search routine ([`SearchContext::search`]) is specialised by a
//! [`Strategy`]: a heuristic plus a destination check. The strategies
//! shipped here are:
//!
//! - **Find-Water** ([`FindWater`], [`FindWaterJob`]): the nearest deep water
//!   around an anchor that has a visible shore and is far enough from ponds
//!   already used
//! - **Find-Shore** ([`FindShore`]): dry, walkable land near a point in the
//!   water with a clear line of sight back to it
//! - **Move-To** ([`MoveTo`], [`move_to`]): plain travel to a fixed cell
//!
//! A destination check may run a whole nested search before answering;
//! Find-Water does exactly that with Find-Shore for every candidate.
//!
//! # Traits
//!
//! | Trait | Required for |
//! |---|---|
//! | [`GridClassifier`] | every search |
//! | [`VisibilityOracle`] | Find-Shore, Find-Water |
//! | [`Strategy`] | plugging a job into [`SearchContext`] |
//!
//! Worlds are borrowed immutably, so independent searches over the same
//! world can run on separate threads.

mod distance;
mod error;
mod move_to;
mod movement;
mod node;
mod options;
mod route;
mod search;
mod shore;
mod traits;
mod water;

pub use distance::{dist_sqr, manhattan};
pub use error::SearchError;
pub use move_to::{MoveTo, move_to};
pub use movement::{Move, successors};
pub use node::Node;
pub use options::PathingOptions;
pub use route::{GoalRecord, PathResult, Route, Verdict};
pub use search::SearchContext;
pub use shore::FindShore;
pub use traits::{FnStrategy, Probe, Strategy, from_fns};
pub use water::{ExcludedPond, FindWater, FindWaterJob, WaterPath, WaterSearchConfig};

pub use tidepath_core::{BlockPos, CellKind, GridClassifier, VisibilityOracle};
