//! Voxel worlds described as text.
//!
//! [`Layers`] parses stacked ASCII maps, one block of lines per y level,
//! separated by blank lines, bottom level first. Within a level each line
//! is one z row and each character one x column:
//!
//! | Rune | Cell |
//! |---|---|
//! | `.` | [`CellKind::Open`] |
//! | `~` | [`CellKind::Liquid`] |
//! | `#` | [`CellKind::Walkable`] |
//! | `X` | [`CellKind::Solid`] |

use std::fmt;

use tidepath_core::{BlockPos, CellKind, Cuboid};

use crate::grid::VoxelWorld;

/// Map a legend character to its cell kind.
pub fn kind_of(ch: char) -> Option<CellKind> {
    match ch {
        '.' => Some(CellKind::Open),
        '~' => Some(CellKind::Liquid),
        '#' => Some(CellKind::Walkable),
        'X' => Some(CellKind::Solid),
        _ => None,
    }
}

/// The legend character for a cell kind.
pub fn rune_of(kind: CellKind) -> char {
    match kind {
        CellKind::Open => '.',
        CellKind::Liquid => '~',
        CellKind::Walkable => '#',
        CellKind::Solid => 'X',
    }
}

/// A parsed stack of text levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layers {
    cells: Vec<CellKind>,
    size: BlockPos,
}

impl Layers {
    /// Parse the given text.
    ///
    /// Every row of every level must have the same width and every level
    /// the same number of rows. Surrounding blank lines are ignored.
    pub fn new(s: &str) -> Result<Self, WorldError> {
        let mut levels: Vec<Vec<&str>> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        for line in s.lines().map(str::trim_end) {
            if line.is_empty() {
                if !current.is_empty() {
                    levels.push(std::mem::take(&mut current));
                }
                continue;
            }
            current.push(line);
        }
        if !current.is_empty() {
            levels.push(current);
        }

        let Some(first) = levels.first() else {
            return Err(WorldError::Empty);
        };
        let depth = first.len();
        let width = first[0].chars().count();

        let mut cells = Vec::with_capacity(levels.len() * depth * width);
        for (y, rows) in levels.iter().enumerate() {
            if rows.len() != depth {
                return Err(WorldError::InconsistentSize { level: y });
            }
            for (z, row) in rows.iter().enumerate() {
                if row.chars().count() != width {
                    return Err(WorldError::InconsistentSize { level: y });
                }
                for (x, ch) in row.chars().enumerate() {
                    let kind = kind_of(ch).ok_or(WorldError::InvalidRune {
                        ch,
                        pos: BlockPos::new(x as i32, y as i32, z as i32),
                    })?;
                    cells.push(kind);
                }
            }
        }

        Ok(Self {
            cells,
            size: BlockPos::new(width as i32, levels.len() as i32, depth as i32),
        })
    }

    /// Return the (x, y, z) extent in cells.
    pub fn size(&self) -> BlockPos {
        self.size
    }

    /// Iterate over every cell with its position relative to the bottom
    /// north-west corner.
    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, CellKind)> + '_ {
        Cuboid::new(BlockPos::ZERO, self.size)
            .into_iter()
            .zip(self.cells.iter().copied())
    }

    /// Draw the layers into `world` with their corner at `origin`.
    /// Cells falling outside the world are dropped.
    pub fn draw(&self, world: &mut VoxelWorld, origin: BlockPos) {
        for (p, kind) in self.iter() {
            world.set(origin + p, kind);
        }
    }

    /// A world spanning exactly these layers, placed at `origin`.
    pub fn to_world(&self, origin: BlockPos) -> VoxelWorld {
        let mut world = VoxelWorld::new(Cuboid::new(origin, origin + self.size));
        self.draw(&mut world, origin);
        world
    }
}

impl VoxelWorld {
    /// Parse `s` as [`Layers`] and build a world with its corner at `origin`.
    pub fn from_layers(origin: BlockPos, s: &str) -> Result<Self, WorldError> {
        Ok(Layers::new(s)?.to_world(origin))
    }
}

/// Errors that can occur when building a world from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// A level's rows or row widths differ from the first level's.
    InconsistentSize { level: usize },
    /// A character outside the legend was found.
    InvalidRune { ch: char, pos: BlockPos },
    /// The text holds no level at all.
    Empty,
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize { level } => {
                write!(f, "layers: level {level} does not match the size of level 0")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "layers contain invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::Empty => write!(f, "layers: no levels"),
        }
    }
}

impl std::error::Error for WorldError {}
