//! Shared scaffolding for the tidepath demos: a small random landscape of
//! meadows, low hills, bushes and ponds, and a top-down text renderer.

use rand::{Rng, RngExt};
use tidepath_core::{BlockPos, CellKind, Cuboid, GridClassifier};
use tidepath_world::VoxelWorld;
use tidepath_world::layers::rune_of;

pub const SIZE: i32 = 48;
/// Height of the flat ground surface.
pub const GROUND: i32 = 63;
const FLOOR: i32 = 56;
const SKY: i32 = 72;

/// Random landscape generator.
pub struct Lakeland<R: Rng> {
    pub rng: R,
    pub world: VoxelWorld,
}

impl<R: Rng> Lakeland<R> {
    /// Flat walkable ground up to [`GROUND`] with open air above.
    pub fn new(rng: R) -> Self {
        let mut world = VoxelWorld::new(Cuboid::new(
            BlockPos::new(0, FLOOR, 0),
            BlockPos::new(SIZE, SKY, SIZE),
        ));
        world.fill(
            Cuboid::inclusive(
                BlockPos::new(0, FLOOR, 0),
                BlockPos::new(SIZE - 1, GROUND, SIZE - 1),
            ),
            CellKind::Walkable,
        );
        Self { rng, world }
    }

    fn random_patch(&mut self, min: i32, max: i32) -> (i32, i32, i32, i32) {
        let w = self.rng.random_range(min..=max);
        let d = self.rng.random_range(min..=max);
        let x = self.rng.random_range(1..SIZE - w - 1);
        let z = self.rng.random_range(1..SIZE - d - 1);
        (x, z, w, d)
    }

    /// Raise `n` one-block hills.
    pub fn raise_hills(&mut self, n: usize) {
        for _ in 0..n {
            let (x, z, w, d) = self.random_patch(3, 8);
            self.world.fill(
                Cuboid::new(
                    BlockPos::new(x, GROUND + 1, z),
                    BlockPos::new(x + w, GROUND + 2, z + d),
                ),
                CellKind::Walkable,
            );
        }
    }

    /// Dig `n` ponds two blocks deep, levelling any hill above them.
    pub fn dig_ponds(&mut self, n: usize) -> Vec<Cuboid> {
        (0..n)
            .map(|_| {
                let (x, z, w, d) = self.random_patch(2, 6);
                let pond = Cuboid::new(
                    BlockPos::new(x, GROUND - 1, z),
                    BlockPos::new(x + w, GROUND + 1, z + d),
                );
                self.dig_pond(pond);
                pond
            })
            .collect()
    }

    /// Fill `pond` with liquid and clear the air above it.
    pub fn dig_pond(&mut self, pond: Cuboid) {
        self.world.fill(pond, CellKind::Liquid);
        let air = Cuboid::new(
            BlockPos::new(pond.min.x, pond.max.y, pond.min.z),
            BlockPos::new(pond.max.x, SKY, pond.max.z),
        );
        self.world.fill(air, CellKind::Open);
    }

    /// Scatter `n` single-block bushes on dry ground.
    pub fn plant_bushes(&mut self, n: usize) {
        for _ in 0..n {
            let x = self.rng.random_range(0..SIZE);
            let z = self.rng.random_range(0..SIZE);
            if let Some(p) = stand_at(&self.world, x, z) {
                self.world.set(p, CellKind::Solid);
            }
        }
    }
}

/// The highest cell in column (x, z) an agent could stand in on dry ground.
pub fn stand_at(world: &VoxelWorld, x: i32, z: i32) -> Option<BlockPos> {
    let top = world.bounds().max.y - 2;
    (FLOOR + 1..=top)
        .rev()
        .map(|y| BlockPos::new(x, y, z))
        .find(|&p| world.is_walkable(p.below(1)))
        .filter(|&p| world.classify(p) == CellKind::Open && world.is_passable(p.above(1)))
}

/// Top-down view: the uppermost non-open cell of every column, with
/// `marks` drawn over it. Rows are z, columns are x.
pub fn render_top(world: &VoxelWorld, marks: &[(BlockPos, char)]) -> String {
    let b = world.bounds();
    let mut out = String::new();
    for z in b.min.z..b.max.z {
        for x in b.min.x..b.max.x {
            let mark = marks.iter().rev().find(|(p, _)| p.x == x && p.z == z);
            let ch = match mark {
                Some(&(_, ch)) => ch,
                None => (b.min.y..b.max.y)
                    .rev()
                    .map(|y| world.classify(BlockPos::new(x, y, z)))
                    .find(|&k| k != CellKind::Open)
                    .map_or(' ', rune_of),
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
