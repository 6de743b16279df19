pub mod generator;
pub mod grid;

pub use generator::{Backtracker, Step, WallBreak};
pub use grid::{Cell, Direction, Grid};
