//! A dense voxel snapshot.
//!
//! [`VoxelWorld`] stores one [`CellKind`] per cell of a bounding [`Cuboid`].
//! Everything outside the bounds classifies as [`CellKind::Solid`], so
//! searches near the edge simply see a wall.

use tidepath_core::{BlockPos, CellKind, Cuboid, GridClassifier};

/// A bounded, densely stored voxel world.
///
/// Mutation happens while building; searches only ever borrow it shared.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelWorld {
    bounds: Cuboid,
    cells: Vec<CellKind>,
}

impl VoxelWorld {
    /// Create a world over `bounds` filled with [`CellKind::Open`].
    pub fn new(bounds: Cuboid) -> Self {
        Self {
            bounds,
            cells: vec![CellKind::Open; bounds.len()],
        }
    }

    /// Returns the bounding cuboid of this world.
    pub fn bounds(&self) -> Cuboid {
        self.bounds
    }

    /// Whether `p` lies inside the stored region.
    pub fn contains(&self, p: BlockPos) -> bool {
        self.bounds.contains(p)
    }

    fn index(&self, p: BlockPos) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let size = self.bounds.size();
        let d = p - self.bounds.min;
        Some(((d.y * size.z + d.z) * size.x + d.x) as usize)
    }

    /// Get the cell at `p`, or `None` if out of bounds.
    pub fn get(&self, p: BlockPos) -> Option<CellKind> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the cell at `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: BlockPos, kind: CellKind) {
        if let Some(i) = self.index(p) {
            self.cells[i] = kind;
        }
    }

    /// Fill the part of `region` inside the bounds with `kind`.
    pub fn fill(&mut self, region: Cuboid, kind: CellKind) {
        for p in region.intersect(self.bounds) {
            self.set(p, kind);
        }
    }

    /// Fill the whole world using a function of each position.
    pub fn fill_fn(&mut self, mut f: impl FnMut(BlockPos) -> CellKind) {
        for p in self.bounds {
            self.set(p, f(p));
        }
    }

    /// Count the cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }
}

impl GridClassifier for VoxelWorld {
    #[inline]
    fn classify(&self, p: BlockPos) -> CellKind {
        self.get(p).unwrap_or(CellKind::Solid)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn world_round_trip() {
        let mut w = VoxelWorld::new(Cuboid::new(BlockPos::ZERO, BlockPos::new(2, 2, 2)));
        w.set(BlockPos::new(1, 0, 1), CellKind::Liquid);
        let json = serde_json::to_string(&w).unwrap();
        let back: VoxelWorld = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }
}
