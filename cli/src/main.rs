use clap::Parser;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use maze::{Backtracker, Grid};

/// Carve a perfect maze with a randomized depth-first backtracker and print
/// it to stdout. Set RUST_LOG=debug to trace every generation step.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Maze width in cells
    #[arg(long, default_value_t = 10)]
    width: usize,

    /// Maze height in cells
    #[arg(long, default_value_t = 10)]
    height: usize,

    /// Seed for a reproducible layout; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        "carving a {}x{} maze with seed {}",
        args.width, args.height, seed
    );

    let grid = Grid::new(args.width, args.height);
    let mut generator = Backtracker::new(grid, StdRng::seed_from_u64(seed));

    let mut steps = 0;
    while let Some(step) = generator.step() {
        steps += 1;
        match step.wall_break {
            Some(wall_break) => debug!(
                "step {}: broke the {} wall of ({}, {}) into ({}, {})",
                steps,
                wall_break.direction,
                wall_break.from.0,
                wall_break.from.1,
                wall_break.to.0,
                wall_break.to.1
            ),
            None => debug!(
                "step {}: dead end at ({}, {})",
                steps, step.popped.0, step.popped.1
            ),
        }
    }

    info!(
        "visited {} cells in {} steps",
        generator.cells_visited(),
        steps
    );
    println!("{}", generator.into_grid());
}
