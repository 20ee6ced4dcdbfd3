//! Shared types for voxel pathfinding.
//!
//! This crate provides the foundational types used across the *tidepath*
//! workspace: integer block positions, continuous points, axis-aligned
//! cuboids, and the two traits through which a search talks to a world
//! snapshot ([`GridClassifier`] and [`VisibilityOracle`]).

pub mod geom;
pub mod world;

pub use geom::{BlockPos, Cuboid, Vec3};
pub use world::{CellKind, GridClassifier, VisibilityOracle};
