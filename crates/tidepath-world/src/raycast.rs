//! Line of sight through a voxel world.
//!
//! [`Ray`] walks the cells a straight segment passes through, in order,
//! using the Amanatides–Woo grid traversal. A sight line is blocked by the
//! first obstruction it enters before reaching its end point.

use tidepath_core::{BlockPos, GridClassifier, Vec3, VisibilityOracle};

use crate::grid::VoxelWorld;

/// Cells crossed by the segment from one point to another.
///
/// The cell holding the start point is not yielded. Cells entered exactly
/// at the end point are not yielded either, so a ray aimed at the corner of
/// a block stops before going inside it.
#[derive(Debug, Clone)]
pub struct Ray {
    origin: [f64; 3],
    dir: [f64; 3],
    cell: [i32; 3],
    step: [i32; 3],
    // Next cell boundary on each axis. Whole numbers, so stepping is exact.
    boundary: [f64; 3],
    done: bool,
}

impl Ray {
    pub fn new(from: Vec3, to: Vec3) -> Self {
        let origin = [from.x, from.y, from.z];
        let dir = [to.x - from.x, to.y - from.y, to.z - from.z];
        let start = from.block();
        let mut ray = Self {
            origin,
            dir,
            cell: [start.x, start.y, start.z],
            step: [0; 3],
            boundary: [0.0; 3],
            done: false,
        };
        for axis in 0..3 {
            let o = origin[axis];
            if dir[axis] > 0.0 {
                ray.step[axis] = 1;
                ray.boundary[axis] = o.floor() + 1.0;
            } else if dir[axis] < 0.0 {
                ray.step[axis] = -1;
                ray.boundary[axis] = o.floor();
            }
        }
        ray
    }

    /// Segment parameter at which the next boundary on `axis` is crossed.
    ///
    /// Computed from the origin each time rather than accumulated, so a
    /// boundary lying on the end point gives exactly 1.
    fn crossing(&self, axis: usize) -> f64 {
        if self.step[axis] == 0 {
            f64::INFINITY
        } else {
            (self.boundary[axis] - self.origin[axis]) / self.dir[axis]
        }
    }
}

impl Iterator for Ray {
    type Item = BlockPos;

    fn next(&mut self) -> Option<BlockPos> {
        if self.done {
            return None;
        }
        let mut axis = 0;
        let mut t = self.crossing(0);
        for a in 1..3 {
            let ta = self.crossing(a);
            if ta < t {
                axis = a;
                t = ta;
            }
        }
        if t.is_nan() || t >= 1.0 {
            self.done = true;
            return None;
        }
        self.cell[axis] += self.step[axis];
        self.boundary[axis] += f64::from(self.step[axis]);
        Some(BlockPos::new(self.cell[0], self.cell[1], self.cell[2]))
    }
}

impl std::iter::FusedIterator for Ray {}

fn is_finite(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Whether the segment from `from` to `to` crosses no obstruction in `world`.
pub fn line_of_sight<W: GridClassifier + ?Sized>(world: &W, from: Vec3, to: Vec3) -> bool {
    if !is_finite(from) || !is_finite(to) {
        return false;
    }
    Ray::new(from, to).all(|p| !world.classify(p).is_obstruction())
}

impl VisibilityOracle for VoxelWorld {
    fn clear_line_of_sight(&self, from: Vec3, to: Vec3) -> bool {
        line_of_sight(self, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidepath_core::{CellKind, Cuboid};

    fn open_box() -> VoxelWorld {
        VoxelWorld::new(Cuboid::new(BlockPos::ZERO, BlockPos::new(8, 8, 8)))
    }

    #[test]
    fn ray_cells_in_order() {
        let cells: Vec<_> =
            Ray::new(Vec3::new(0.5, 0.5, 0.5), Vec3::new(3.5, 0.5, 0.5)).collect();
        assert_eq!(
            cells,
            vec![
                BlockPos::new(1, 0, 0),
                BlockPos::new(2, 0, 0),
                BlockPos::new(3, 0, 0)
            ]
        );
    }

    #[test]
    fn ray_from_a_cell_boundary() {
        let cells: Vec<_> =
            Ray::new(Vec3::new(5.0, 64.8, 5.0), Vec3::new(3.0, 64.0, 5.0)).collect();
        assert_eq!(cells, vec![BlockPos::new(4, 64, 5), BlockPos::new(3, 64, 5)]);
    }

    #[test]
    fn ray_ending_on_a_boundary_stops_there() {
        let cells: Vec<_> =
            Ray::new(Vec3::new(7.0, 0.5, 0.5), Vec3::new(1.0, 0.5, 0.5)).collect();
        let xs: Vec<_> = cells.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![6, 5, 4, 3, 2, 1]);

        for n in 1..=20 {
            let from = Vec3::new(0.5, 0.5, f64::from(n) + 2.0);
            let to = Vec3::new(0.5, 0.5, 2.0);
            assert_eq!(Ray::new(from, to).count(), n as usize, "length {n}");
            // Starting on a boundary going up stays in the start cell.
            assert_eq!(Ray::new(to, from).count(), n as usize - 1, "length {n}");
        }
    }

    #[test]
    fn block_just_past_the_end_does_not_block() {
        let mut w = open_box();
        w.set(BlockPos::ZERO, CellKind::Solid);
        assert!(w.clear_line_of_sight(Vec3::new(7.0, 0.5, 0.5), Vec3::new(1.0, 0.5, 0.5)));
        w.set(BlockPos::new(1, 0, 0), CellKind::Solid);
        assert!(!w.clear_line_of_sight(Vec3::new(7.0, 0.5, 0.5), Vec3::new(1.0, 0.5, 0.5)));
    }

    #[test]
    fn ray_crosses_every_axis() {
        let cells: Vec<_> =
            Ray::new(Vec3::new(0.2, 0.3, 0.4), Vec3::new(2.6, 1.7, 1.9)).collect();
        // One step per boundary crossed: two in x, one in y, one in z.
        assert_eq!(cells.len(), 4);
        assert_eq!(cells.last(), Some(&BlockPos::new(2, 1, 1)));
        for w in cells.windows(2) {
            let d = w[1] - w[0];
            assert_eq!(d.x.abs() + d.y.abs() + d.z.abs(), 1);
        }
    }

    #[test]
    fn zero_length_ray_is_empty() {
        let p = Vec3::new(1.5, 1.5, 1.5);
        assert_eq!(Ray::new(p, p).count(), 0);
    }

    #[test]
    fn open_air_is_clear() {
        let w = open_box();
        assert!(w.clear_line_of_sight(Vec3::new(0.5, 0.5, 0.5), Vec3::new(7.5, 7.5, 7.5)));
    }

    #[test]
    fn walls_block_and_water_does_not() {
        let mut w = open_box();
        let from = Vec3::new(0.5, 2.5, 2.5);
        let to = Vec3::new(6.5, 2.5, 2.5);
        w.set(BlockPos::new(3, 2, 2), CellKind::Liquid);
        assert!(w.clear_line_of_sight(from, to));
        w.set(BlockPos::new(4, 2, 2), CellKind::Walkable);
        assert!(!w.clear_line_of_sight(from, to));
        w.set(BlockPos::new(4, 2, 2), CellKind::Solid);
        assert!(!w.clear_line_of_sight(to, from));
    }

    #[test]
    fn corner_on_the_ground_is_visible() {
        let mut w = open_box();
        w.fill(
            Cuboid::inclusive(BlockPos::ZERO, BlockPos::new(7, 0, 7)),
            CellKind::Walkable,
        );
        assert!(w.clear_line_of_sight(Vec3::new(0.5, 2.5, 0.5), Vec3::new(2.0, 1.0, 0.5)));
        // Aimed into the ground instead.
        assert!(!w.clear_line_of_sight(Vec3::new(0.5, 2.5, 0.5), Vec3::new(2.0, 0.5, 0.5)));
    }

    #[test]
    fn leaving_the_world_blocks() {
        let w = open_box();
        assert!(!w.clear_line_of_sight(Vec3::new(1.5, 1.5, 1.5), Vec3::new(12.5, 1.5, 1.5)));
        assert!(!w.clear_line_of_sight(Vec3::new(1.5, f64::NAN, 1.5), Vec3::new(2.5, 1.5, 1.5)));
    }
}
