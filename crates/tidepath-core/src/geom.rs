//! Geometry primitives: [`BlockPos`], [`Vec3`] and [`Cuboid`].
//!
//! The grid is y-up: `y` is the vertical axis, `x` and `z` span the ground
//! plane.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// BlockPos
// ---------------------------------------------------------------------------

/// Integer coordinates of one grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a position shifted by (dx, dy, dz).
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// The cell `n` levels above.
    #[inline]
    pub const fn above(self, n: i32) -> Self {
        self.offset(0, n, 0)
    }

    /// The cell `n` levels below.
    #[inline]
    pub const fn below(self, n: i32) -> Self {
        self.offset(0, -n, 0)
    }

    /// The four horizontal neighbours (north, east, south, west).
    ///
    /// North is `-z`, east is `+x`.
    #[inline]
    pub const fn horizontal_neighbors(self) -> [BlockPos; 4] {
        [
            self.offset(0, 0, -1),
            self.offset(1, 0, 0),
            self.offset(0, 0, 1),
            self.offset(-1, 0, 0),
        ]
    }

    /// The point at this cell's minimum corner.
    #[inline]
    pub fn corner(self) -> Vec3 {
        Vec3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// The point at the centre of this cell.
    #[inline]
    pub fn center(self) -> Vec3 {
        self.corner() + Vec3::new(0.5, 0.5, 0.5)
    }
}

impl PartialOrd for BlockPos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BlockPos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y
            .cmp(&other.y)
            .then(self.z.cmp(&other.z))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for BlockPos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for BlockPos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

// ---------------------------------------------------------------------------
// Vec3
// ---------------------------------------------------------------------------

/// A continuous point in world space, used for line-of-sight queries.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The cell containing this point.
    #[inline]
    pub fn block(self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<BlockPos> for Vec3 {
    fn from(p: BlockPos) -> Self {
        p.corner()
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Cuboid
// ---------------------------------------------------------------------------

/// A half-open box \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cuboid {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl Cuboid {
    /// Create a new cuboid from two corners and auto-canonicalize so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// The cuboid containing exactly the cells between `a` and `b`, both
    /// inclusive.
    #[inline]
    pub fn inclusive(a: BlockPos, b: BlockPos) -> Self {
        let c = Self::new(a, b);
        Self {
            min: c.min,
            max: c.max.offset(1, 1, 1),
        }
    }

    /// Size along each axis.
    #[inline]
    pub fn size(self) -> BlockPos {
        self.max - self.min
    }

    /// Total number of cells in the cuboid.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let s = self.size();
        (s.x as usize) * (s.y as usize) * (s.z as usize)
    }

    /// Whether the cuboid has zero or negative volume.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y || self.min.z >= self.max.z
    }

    /// Whether `p` is inside the half-open cuboid.
    #[inline]
    pub fn contains(self, p: BlockPos) -> bool {
        p.x >= self.min.x
            && p.x < self.max.x
            && p.y >= self.min.y
            && p.y < self.max.y
            && p.z >= self.min.z
            && p.z < self.max.z
    }

    /// Intersection of two cuboids (may be empty).
    ///
    /// If the two cuboids do not overlap, the zero (empty) cuboid is returned.
    #[inline]
    pub fn intersect(self, other: Cuboid) -> Self {
        let r = Self {
            min: BlockPos::new(
                self.min.x.max(other.min.x),
                self.min.y.max(other.min.y),
                self.min.z.max(other.min.z),
            ),
            max: BlockPos::new(
                self.max.x.min(other.max.x),
                self.max.y.min(other.max.y),
                self.max.z.min(other.max.z),
            ),
        };
        if r.is_empty() { Self::default() } else { r }
    }

    /// Iterator over every cell in the cuboid, x fastest, then z, then y.
    #[inline]
    pub fn iter(self) -> CuboidIter {
        CuboidIter {
            cuboid: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Cuboid {
    type Item = BlockPos;
    type IntoIter = CuboidIter;
    #[inline]
    fn into_iter(self) -> CuboidIter {
        self.iter()
    }
}

impl fmt::Display for Cuboid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

/// Iterator over the cells of a [`Cuboid`].
#[derive(Clone, Debug)]
pub struct CuboidIter {
    cuboid: Cuboid,
    cur: BlockPos,
}

impl Iterator for CuboidIter {
    type Item = BlockPos;

    fn next(&mut self) -> Option<BlockPos> {
        if self.cuboid.is_empty() || self.cur.y >= self.cuboid.max.y {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.cuboid.max.x {
            self.cur.x = self.cuboid.min.x;
            self.cur.z += 1;
            if self.cur.z >= self.cuboid.max.z {
                self.cur.z = self.cuboid.min.z;
                self.cur.y += 1;
            }
        }
        Some(p)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn blockpos_round_trip() {
        let p = BlockPos::new(-3, 64, 12);
        let json = serde_json::to_string(&p).unwrap();
        let back: BlockPos = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn cuboid_round_trip() {
        let c = Cuboid::new(BlockPos::new(0, 60, 0), BlockPos::new(16, 70, 16));
        let json = serde_json::to_string(&c).unwrap();
        let back: Cuboid = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
