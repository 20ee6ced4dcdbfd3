//! A reference voxel world for tidepath searches: dense storage, text
//! layers, and ray-traced line of sight.

pub mod grid;
pub mod layers;
pub mod raycast;

pub use grid::VoxelWorld;
pub use layers::{Layers, WorldError};
pub use raycast::{Ray, line_of_sight};
