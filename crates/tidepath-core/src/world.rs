//! World-query traits.
//!
//! A search never owns the world it runs on. It borrows a snapshot through
//! these two traits, so anything from a dense test grid to a chunked game
//! world can back it.

use crate::geom::{BlockPos, Vec3};

/// Movement classification of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Air and anything else an agent can occupy.
    #[default]
    Open,
    /// Swimmable liquid.
    Liquid,
    /// Blocks movement and can be stood on.
    Walkable,
    /// Blocks movement but cannot be stood on (fences, foliage, hazards).
    Solid,
}

impl CellKind {
    /// Whether an agent can occupy a cell of this kind.
    #[inline]
    pub const fn is_passable(self) -> bool {
        matches!(self, Self::Open | Self::Liquid)
    }

    /// Whether the cell stops movement and sight.
    #[inline]
    pub const fn is_obstruction(self) -> bool {
        matches!(self, Self::Walkable | Self::Solid)
    }
}

/// Read-only cell classification over a fixed world snapshot.
///
/// Implementations must be total: positions outside the loaded world should
/// classify as [`CellKind::Solid`] rather than panic.
pub trait GridClassifier {
    /// Classify the cell at `p`.
    fn classify(&self, p: BlockPos) -> CellKind;

    /// Whether the cell at `p` is liquid.
    #[inline]
    fn is_liquid(&self, p: BlockPos) -> bool {
        self.classify(p) == CellKind::Liquid
    }

    /// Whether an agent can occupy the cell at `p`.
    #[inline]
    fn is_passable(&self, p: BlockPos) -> bool {
        self.classify(p).is_passable()
    }

    /// Whether the cell at `p` can be stood on.
    #[inline]
    fn is_walkable(&self, p: BlockPos) -> bool {
        self.classify(p) == CellKind::Walkable
    }
}

/// Line-of-sight queries over a fixed world snapshot.
pub trait VisibilityOracle {
    /// Whether the straight segment from `from` to `to` is unobstructed.
    /// Liquids do not block sight.
    fn clear_line_of_sight(&self, from: Vec3, to: Vec3) -> bool;
}

impl<T: GridClassifier + ?Sized> GridClassifier for &T {
    #[inline]
    fn classify(&self, p: BlockPos) -> CellKind {
        (**self).classify(p)
    }
}

impl<T: VisibilityOracle + ?Sized> VisibilityOracle for &T {
    #[inline]
    fn clear_line_of_sight(&self, from: Vec3, to: Vec3) -> bool {
        (**self).clear_line_of_sight(from, to)
    }
}
