use rand::prelude::{IndexedRandom, Rng};

use crate::grid::{Direction, Grid};

/// What one generation step did: the cell popped off the traversal stack,
/// the wall broken this step if the cell still had an unvisited neighbor,
/// and whether generation finished.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub popped: (usize, usize),
    pub wall_break: Option<WallBreak>,
    pub done: bool,
}

/// A wall coming down between two adjacent cells; `to` is `from`'s neighbor
/// in `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallBreak {
    pub from: (usize, usize),
    pub to: (usize, usize),
    pub direction: Direction,
}

/// The randomized depth-first backtracker. It owns the grid while carving
/// and hands it back through `grid`, `into_grid`, or `run`; callers drawing
/// progress pull one `Step` at a time and pace themselves.
pub struct Backtracker<R: Rng> {
    grid: Grid,
    stack: Vec<(usize, usize)>,
    rng: R,
    cells_visited: usize,
}

impl<R: Rng> Backtracker<R> {
    /// Picks a start cell uniformly at random and pushes it onto the stack.
    /// A grid with no cells starts out done.
    pub fn new(grid: Grid, mut rng: R) -> Self {
        let mut stack = Vec::new();
        let mut cells_visited = 0;

        if grid.cell_count() > 0 {
            let start = (
                rng.random_range(0..grid.width()),
                rng.random_range(0..grid.height()),
            );
            stack.push(start);
            cells_visited = 1;
        }

        Self {
            grid,
            stack,
            rng,
            cells_visited,
        }
    }

    /// Runs one step: pop a cell; if it still has unvisited neighbors, pick
    /// one uniformly at random, break the wall between the two, and push
    /// both cells back. A pop with no unvisited neighbors pushes nothing,
    /// which is the backtrack.
    ///
    /// Returns `None` once the stack is empty, and keeps returning `None`
    /// on every later call; the last real `Step` carries `done: true`.
    pub fn step(&mut self) -> Option<Step> {
        let current = self.stack.pop()?;

        let cell = self.grid.cell_at(current.0, current.1);
        let neighbors = self.grid.unvisited_neighbors(cell);

        let mut wall_break = None;
        if let Some(&(direction, next)) = neighbors.choose(&mut self.rng) {
            self.stack.push(current);
            self.grid.break_wall_between(current, next, direction);
            self.stack.push(next);
            self.cells_visited += 1;
            wall_break = Some(WallBreak {
                from: current,
                to: next,
                direction,
            });
        }

        Some(Step {
            popped: current,
            wall_break,
            done: self.stack.is_empty(),
        })
    }

    pub fn is_done(&self) -> bool {
        self.stack.is_empty()
    }

    /// Read-only view of the grid mid-run, for callers drawing progress.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cells carved into the maze so far; `width * height` once done.
    pub fn cells_visited(&self) -> usize {
        self.cells_visited
    }

    /// Hands the grid back. A caller that stops early gets a partial maze.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Drives generation to completion and returns the finished grid.
    pub fn run(mut self) -> Grid {
        while self.step().is_some() {}
        self.grid
    }
}

impl<R: Rng> Iterator for Backtracker<R> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.step()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_an_empty_grid_is_done_before_the_first_step() {
        let mut generator = Backtracker::new(Grid::new(0, 3), StdRng::seed_from_u64(1));
        assert!(generator.is_done());
        assert_eq!(generator.cells_visited(), 0);
        assert_eq!(generator.step(), None);
    }

    #[test]
    fn test_a_single_cell_takes_one_step_and_breaks_no_walls() {
        let mut generator = Backtracker::new(Grid::new(1, 1), StdRng::seed_from_u64(1));
        assert!(!generator.is_done());

        let step = generator.step().expect("the start cell should be popped");
        assert_eq!(
            step,
            Step {
                popped: (0, 0),
                wall_break: None,
                done: true,
            }
        );

        assert!(generator.is_done());
        assert_eq!(generator.step(), None);
        assert_eq!(generator.cells_visited(), 1);
        assert!(generator.grid().cell_at(0, 0).has_all_walls());
    }

    #[test]
    fn test_two_cells_side_by_side_break_their_shared_wall_and_finish() {
        let mut generator = Backtracker::new(Grid::new(2, 1), StdRng::seed_from_u64(9));

        // First step: whichever cell was picked as the start, its only
        // unvisited neighbor is the other cell.
        let first = generator.step().expect("generation just started");
        let wall_break = first
            .wall_break
            .expect("the start cell has an unvisited neighbor");
        assert_eq!(wall_break.from, first.popped);
        assert!(!first.done);
        let expected_direction = if wall_break.from == (0, 0) {
            Direction::East
        } else {
            Direction::West
        };
        assert_eq!(wall_break.direction, expected_direction);

        // Second step: the far cell is a dead end.
        let second = generator.step().expect("two cells are still stacked");
        assert_eq!(second.popped, wall_break.to);
        assert_eq!(second.wall_break, None);
        assert!(!second.done);

        // Third step: the start cell has no unvisited neighbors left either.
        let third = generator.step().expect("the start cell is still stacked");
        assert_eq!(third.popped, wall_break.from);
        assert_eq!(third.wall_break, None);
        assert!(third.done);

        assert_eq!(generator.step(), None);
        assert_eq!(generator.cells_visited(), 2);

        // Whatever the seed, a 2x1 maze has exactly one possible passage.
        let grid = generator.into_grid();
        assert!(!grid.cell_at(0, 0).has_wall(Direction::East));
        assert!(!grid.cell_at(1, 0).has_wall(Direction::West));
        assert!(grid.cell_at(0, 0).has_wall(Direction::North));
        assert!(grid.cell_at(0, 0).has_wall(Direction::South));
        assert!(grid.cell_at(0, 0).has_wall(Direction::West));
        assert!(grid.cell_at(1, 0).has_wall(Direction::North));
        assert!(grid.cell_at(1, 0).has_wall(Direction::South));
        assert!(grid.cell_at(1, 0).has_wall(Direction::East));
    }

    #[test]
    fn test_run_returns_a_grid_with_every_cell_visited() {
        let grid = Backtracker::new(Grid::new(4, 3), StdRng::seed_from_u64(5)).run();
        for x in 0..4 {
            for y in 0..3 {
                assert!(!grid.cell_at(x, y).has_all_walls());
            }
        }
    }

    #[test]
    fn test_the_iterator_yields_the_same_steps_as_calling_step() {
        let collected: Vec<Step> =
            Backtracker::new(Grid::new(3, 3), StdRng::seed_from_u64(7)).collect();

        let mut generator = Backtracker::new(Grid::new(3, 3), StdRng::seed_from_u64(7));
        let mut stepped = Vec::new();
        while let Some(step) = generator.step() {
            stepped.push(step);
        }

        assert_eq!(collected, stepped);
    }
}
