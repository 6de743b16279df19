use std::fmt;

use strum::{Display, EnumIter, IntoEnumIterator};

/// Compass directions. Neighbors are scanned in declaration order, so a
/// fixed seed always sees candidates in the same order.
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, PartialEq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Grid offset of the neighbor in this direction; y grows southward.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One grid position and its four wall flags. A cell with all walls still
/// standing has not been visited by the generator yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    walls: [bool; 4],
}

impl Cell {
    fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            walls: [true; 4],
        }
    }

    pub fn has_all_walls(&self) -> bool {
        self.walls == [true; 4]
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.index()]
    }
}

/// A rectangular grid of cells. The grid owns all wall state: walls only
/// come down through `break_wall_between`, and only in facing pairs.
#[derive(Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a fully walled grid of `width * height` cells. Either
    /// dimension may be zero, which yields a grid with no cells.
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                cells.push(Cell::new(x, y));
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn index_of(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) is out of bounds for a {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );

        x * self.height + y
    }

    pub fn cell_at(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index_of(x, y)]
    }

    /// Unvisited in-bounds neighbors of `cell`, in compass order.
    pub fn unvisited_neighbors(&self, cell: &Cell) -> Vec<(Direction, (usize, usize))> {
        let mut neighbors = Vec::new();

        for direction in Direction::iter() {
            let (dx, dy) = direction.delta();
            let nx = cell.x as isize + dx;
            let ny = cell.y as isize + dy;

            let in_bounds =
                nx >= 0 && nx < self.width as isize && ny >= 0 && ny < self.height as isize;
            if !in_bounds {
                continue;
            }

            let neighbor = self.cell_at(nx as usize, ny as usize);
            if neighbor.has_all_walls() {
                neighbors.push((direction, (neighbor.x, neighbor.y)));
            }
        }

        neighbors
    }

    /// Breaks the wall between `a` and `b`, where `b` must be `a`'s neighbor
    /// in `direction`. Both flags of the pair come down together; passing
    /// cells that are not adjacent along `direction` is a programming error
    /// and panics rather than leaving wall state inconsistent.
    pub fn break_wall_between(
        &mut self,
        a: (usize, usize),
        b: (usize, usize),
        direction: Direction,
    ) {
        let (dx, dy) = direction.delta();
        assert!(
            b.0 as isize == a.0 as isize + dx && b.1 as isize == a.1 as isize + dy,
            "cell ({}, {}) is not the {} neighbor of ({}, {})",
            b.0,
            b.1,
            direction,
            a.0,
            a.1
        );

        let index_a = self.index_of(a.0, a.1);
        let index_b = self.index_of(b.0, b.1);
        self.cells[index_a].walls[direction.index()] = false;
        self.cells[index_b].walls[direction.opposite().index()] = false;
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cell_count() == 0 {
            return Ok(());
        }

        let mut rows = Vec::new();

        for y in 0..self.height {
            let mut upper = String::new();
            let mut lower = String::new();

            for x in 0..self.width {
                let cell = self.cell_at(x, y);
                upper.push('+');
                upper.push_str(if cell.has_wall(Direction::North) {
                    "--"
                } else {
                    "  "
                });
                lower.push(if cell.has_wall(Direction::West) {
                    '|'
                } else {
                    ' '
                });
                lower.push_str("  ");
            }

            upper.push('+');
            lower.push(if self.cell_at(self.width - 1, y).has_wall(Direction::East) {
                '|'
            } else {
                ' '
            });

            rows.push(upper);
            rows.push(lower);
        }

        let mut bottom = String::new();
        for x in 0..self.width {
            bottom.push('+');
            bottom.push_str(if self.cell_at(x, self.height - 1).has_wall(Direction::South) {
                "--"
            } else {
                "  "
            });
        }
        bottom.push('+');
        rows.push(bottom);

        write!(f, "{}", rows.join("\n"))
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
