//! Neighbour expansion for a two-block-tall agent.
//!
//! A node's position is the cell holding the agent's feet. From every node
//! the agent may walk, step up one block, drop down, or (while swimming)
//! move vertically through liquid.

use tidepath_core::{BlockPos, CellKind, GridClassifier};

use crate::options::PathingOptions;

/// One resolved movement out of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub pos: BlockPos,
    /// Whether the agent swims at `pos`.
    pub submerged: bool,
    /// Cost of this single step.
    pub cost: f64,
}

/// Append every legal move out of `from` into `out`.
///
/// Horizontal moves are produced in north, east, south, west order, then
/// swimming up and down. The caller clears `out` before calling.
pub fn successors<W: GridClassifier + ?Sized>(
    world: &W,
    opts: &PathingOptions,
    from: BlockPos,
    submerged: bool,
    out: &mut Vec<Move>,
) {
    for column in from.horizontal_neighbors() {
        if let Some(mv) = horizontal(world, opts, from, submerged, column) {
            out.push(mv);
        }
    }

    if submerged && opts.can_swim {
        for target in [from.above(1), from.below(1)] {
            if world.is_liquid(target) {
                out.push(Move {
                    pos: target,
                    submerged: true,
                    cost: opts.swim_cost,
                });
            }
        }
    }
}

fn horizontal<W: GridClassifier + ?Sized>(
    world: &W,
    opts: &PathingOptions,
    from: BlockPos,
    submerged: bool,
    column: BlockPos,
) -> Option<Move> {
    if world.is_passable(column) && world.is_passable(column.above(1)) {
        return walk_or_drop(world, opts, submerged, column);
    }

    // Step up onto the obstruction in front.
    let top = column.above(1);
    if world.classify(column).is_obstruction()
        && world.is_passable(top)
        && world.is_passable(top.above(1))
        && world.is_passable(from.above(2))
    {
        let lands_in_liquid = world.is_liquid(top);
        if !lands_in_liquid && !world.is_walkable(column) {
            return None;
        }
        return land(opts, submerged, top, lands_in_liquid, 1);
    }
    None
}

/// Scan down the open column in front of the agent for somewhere to land.
fn walk_or_drop<W: GridClassifier + ?Sized>(
    world: &W,
    opts: &PathingOptions,
    submerged: bool,
    column: BlockPos,
) -> Option<Move> {
    let mut p = column;
    for fall in 0..=opts.max_drop {
        match world.classify(p) {
            CellKind::Liquid => return land(opts, submerged, p, true, -fall),
            CellKind::Open => match world.classify(p.below(1)) {
                CellKind::Walkable => return land(opts, submerged, p, false, -fall),
                CellKind::Solid => return None,
                CellKind::Open | CellKind::Liquid => p = p.below(1),
            },
            CellKind::Walkable | CellKind::Solid => return None,
        }
    }
    None
}

fn land(
    opts: &PathingOptions,
    from_submerged: bool,
    pos: BlockPos,
    submerged: bool,
    rise: i32,
) -> Option<Move> {
    if submerged && !opts.can_swim {
        return None;
    }
    let mut cost = if submerged {
        opts.swim_cost
    } else {
        opts.walk_cost
    };
    if rise > 0 {
        cost += opts.jump_cost;
    } else if rise < 0 && !submerged {
        cost += opts.drop_cost * f64::from(-rise);
    }
    if submerged && !from_submerged {
        cost += opts.swim_cost_enter;
    }
    Some(Move {
        pos,
        submerged,
        cost,
    })
}
