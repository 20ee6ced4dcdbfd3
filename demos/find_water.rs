//! Random landscape water search demo.
//!
//! Run: cargo run --bin find-water [seed]
//!
//! Builds a landscape from the seed, then finds up to three ponds around the
//! middle of the map, each far enough from the ones used before.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tidepath_demos::{Lakeland, SIZE, render_top, stand_at};
use tidepath_paths::{ExcludedPond, FindWaterJob};

fn main() {
    let seed = match std::env::args().nth(1).map(|s| s.parse::<u64>()) {
        None => 42,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("Error: invalid seed: {e}");
            std::process::exit(2);
        }
    };

    let mut land = Lakeland::new(StdRng::seed_from_u64(seed));
    land.raise_hills(8);
    land.dig_ponds(6);
    land.plant_bushes(40);
    let world = land.world;

    let Some(home) = stand_at(&world, SIZE / 2, SIZE / 2) else {
        eprintln!("Error: nowhere to stand at the middle of the map");
        std::process::exit(1);
    };

    let mut used: Vec<ExcludedPond> = Vec::new();
    let mut marks = Vec::new();
    for round in 1..=3 {
        let found = match FindWaterJob::new(&world, home, home, 48.0, &used).search() {
            Ok(found) => found,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        };
        let Some(found) = found else {
            println!("round {round}: no more water in reach");
            break;
        };
        println!(
            "round {round}: pond {} worked from {} ({} steps, {} nodes visited)",
            found.pond.target(),
            found.pond.endpoint(),
            found.route.len(),
            found.visited,
        );
        marks.extend(found.route.points().iter().map(|&p| (p, '*')));
        marks.push((found.pond.target(), 'P'));
        marks.push((found.pond.endpoint(), 'B'));
        used.push(found.excluded_pond());
    }

    marks.push((home, 'H'));
    print!("{}", render_top(&world, &marks));
}
