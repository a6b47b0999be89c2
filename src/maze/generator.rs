//! Randomized depth-first maze generation
//!
//! Classic recursive backtracker, run as a loop over an explicit frame stack
//! so deep grids never touch the native stack. Each frame holds a cell, its
//! shuffled neighbour list and a cursor into that list; neighbour order,
//! RNG draw order and backtrack order are the same as the recursive form:
//!
//! ```text
//! visit(cell):
//!     if visited: return
//!     mark visited, shuffle [up, right, down, left]
//!     for each in-bounds unvisited neighbour:
//!         push cell to history, open wall, visit(neighbour)
//!     if none was taken: visit(history.pop())   // stop when history is empty
//! ```

use log::{debug, trace};

use super::grid::{BoolMatrix, Cell, Direction};
use super::random::{RandomSource, shuffle};
use super::Maze;
use crate::error::{Error, Result};

/// Generates perfect mazes of a fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeGenerator {
    rows: usize,
    columns: usize,
}

impl MazeGenerator {
    /// Rejects zero-sized grids and grids whose cell count overflows `usize`
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 || rows.checked_mul(columns).is_none() {
            return Err(Error::InvalidDimensions { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Run one full traversal. Draws the start row, then the start column,
    /// then one shuffle per entered cell.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Maze {
        let start = Cell::new(rng.index_below(self.rows), rng.index_below(self.columns));

        let mut traversal = Traversal::new(self.rows, self.columns, rng);
        traversal.run(start);

        let maze = Maze {
            rows: self.rows,
            columns: self.columns,
            start,
            vertical: traversal.vertical,
            horizontal: traversal.horizontal,
        };
        debug!(
            "Generated {}x{} maze from ({}, {}) with {} passages",
            maze.rows,
            maze.columns,
            start.row,
            start.col,
            maze.passage_count()
        );
        maze
    }
}

/// Validate dimensions and generate in one call
pub fn generate<R: RandomSource + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> Result<Maze> {
    Ok(MazeGenerator::new(rows, columns)?.generate(rng))
}

/// A cell being explored, with the neighbours it has yet to try
#[derive(Debug)]
struct Frame {
    cell: Cell,
    neighbors: [Direction; 4],
    cursor: usize,
    /// At least one neighbour was entered from this cell
    advanced: bool,
}

/// Per-call traversal state; never shared between mazes
struct Traversal<'a, R: ?Sized> {
    rows: usize,
    columns: usize,
    rng: &'a mut R,
    visited: BoolMatrix,
    vertical: BoolMatrix,
    horizontal: BoolMatrix,
    /// Cells to resume from after a dead end
    history: Vec<Cell>,
    frames: Vec<Frame>,
}

impl<'a, R: RandomSource + ?Sized> Traversal<'a, R> {
    fn new(rows: usize, columns: usize, rng: &'a mut R) -> Self {
        Self {
            rows,
            columns,
            rng,
            visited: BoolMatrix::new(rows, columns),
            vertical: BoolMatrix::new(rows, columns - 1),
            horizontal: BoolMatrix::new(rows - 1, columns),
            history: Vec::new(),
            frames: Vec::new(),
        }
    }

    fn run(&mut self, start: Cell) {
        self.visit(start);

        while let Some(top) = self.frames.len().checked_sub(1) {
            let frame = &mut self.frames[top];
            if let Some(&dir) = frame.neighbors.get(frame.cursor) {
                frame.cursor += 1;
                let from = frame.cell;

                let Some(next) = from.step(dir, self.rows, self.columns) else {
                    continue;
                };
                if self.visited.get(next.row, next.col) {
                    continue;
                }

                self.frames[top].advanced = true;
                self.history.push(from);
                self.open_wall(from, dir);
                self.visit(next);
                continue;
            }

            let dead_end = !frame.advanced;
            self.frames.truncate(top);
            if dead_end {
                self.backtrack();
            }
        }
    }

    /// Enter a cell. Already-visited cells are a no-op.
    fn visit(&mut self, cell: Cell) {
        if self.visited.get(cell.row, cell.col) {
            return;
        }
        self.visited.set(cell.row, cell.col, true);

        let mut neighbors = Direction::ALL;
        shuffle(&mut neighbors, &mut *self.rng);
        self.frames.push(Frame {
            cell,
            neighbors,
            cursor: 0,
            advanced: false,
        });
    }

    /// Resume from the most recent history cell; an empty history ends the traversal
    fn backtrack(&mut self) {
        match self.history.pop() {
            Some(cell) => self.visit(cell),
            None => trace!("History exhausted, traversal complete"),
        }
    }

    fn open_wall(&mut self, from: Cell, dir: Direction) {
        let Cell { row, col } = from;
        match dir {
            Direction::Left => self.vertical.set(row, col - 1, true),
            Direction::Right => self.vertical.set(row, col, true),
            Direction::Up => self.horizontal.set(row - 1, col, true),
            Direction::Down => self.horizontal.set(row, col, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::random::tests::Scripted;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rejects_zero_dimensions() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(
            generate(0, 5, &mut rng).unwrap_err(),
            Error::InvalidDimensions { rows: 0, columns: 5 }
        );
        assert_eq!(
            generate(5, 0, &mut rng).unwrap_err(),
            Error::InvalidDimensions { rows: 5, columns: 0 }
        );
        assert!(MazeGenerator::new(0, 0).is_err());
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(
            generate(usize::MAX / 2, 4, &mut rng).unwrap_err(),
            Error::InvalidDimensions { rows: usize::MAX / 2, columns: 4 }
        );
        assert_eq!(
            MazeGenerator::new(9_999_999_999_999, 9_999_999).unwrap_err(),
            Error::InvalidDimensions { rows: 9_999_999_999_999, columns: 9_999_999 }
        );
        assert!(MazeGenerator::new(usize::MAX, 1).is_ok());
    }

    #[test]
    fn test_single_cell() {
        let mut rng = Pcg32::seed_from_u64(1);
        let maze = generate(1, 1, &mut rng).unwrap();
        assert_eq!(maze.passage_count(), 0);
        assert_eq!(maze.start, Cell::new(0, 0));
        assert_eq!(maze.vertical.rows(), 1);
        assert_eq!(maze.vertical.cols(), 0);
        assert_eq!(maze.horizontal.rows(), 0);
        assert!(maze.is_perfect());
    }

    #[test]
    fn test_single_row_opens_every_passage() {
        let mut rng = Pcg32::seed_from_u64(9);
        let maze = generate(1, 8, &mut rng).unwrap();
        assert_eq!(maze.horizontal.rows(), 0);
        assert_eq!(maze.vertical.cols(), 7);
        assert!((0..7).all(|c| maze.vertical.get(0, c)));
        assert_eq!(maze.passage_count(), 7);
    }

    #[test]
    fn test_single_column_opens_every_passage() {
        let mut rng = Pcg32::seed_from_u64(9);
        let maze = generate(5, 1, &mut rng).unwrap();
        assert_eq!(maze.vertical.cols(), 0);
        assert!((0..4).all(|r| maze.horizontal.get(r, 0)));
    }

    #[test]
    fn test_six_by_six_seed_42() {
        let mut rng = Pcg32::seed_from_u64(42);
        let maze = generate(6, 6, &mut rng).unwrap();
        assert_eq!((maze.vertical.rows(), maze.vertical.cols()), (6, 5));
        assert_eq!((maze.horizontal.rows(), maze.horizontal.cols()), (5, 6));
        assert_eq!(maze.passage_count(), 35);
        assert!(maze.is_perfect());
    }

    #[test]
    fn test_determinism() {
        let a = generate(12, 17, &mut Pcg32::seed_from_u64(2024)).unwrap();
        let b = generate(12, 17, &mut Pcg32::seed_from_u64(2024)).unwrap();
        assert_eq!(a, b);

        let c = generate(12, 17, &mut Pcg32::seed_from_u64(2025)).unwrap();
        assert_ne!(a.vertical, c.vertical);
    }

    #[test]
    fn test_scripted_two_by_two() {
        // start (0,0); no-op shuffles keep order [up, right, down, left]
        // (0,0) -> right (0,1) -> down (1,1) -> left (1,0), dead end
        let draws = [0, 0, 3, 2, 1, 3, 2, 1, 3, 2, 1, 3, 2, 1];
        let mut rng = Scripted::new(&draws);
        let maze = generate(2, 2, &mut rng).unwrap();

        assert!(maze.vertical.get(0, 0));
        assert!(maze.horizontal.get(0, 1));
        assert!(maze.vertical.get(1, 0));
        assert!(!maze.horizontal.get(0, 0));
        // Bounds: start row, start column, then 3 draws per entered cell
        assert_eq!(rng.bounds, vec![2, 2, 4, 3, 2, 4, 3, 2, 4, 3, 2, 4, 3, 2]);
    }

    #[test]
    fn test_scripted_reversed_order() {
        // Shuffle draws [0,0,0] turn [up,right,down,left] into [right,down,left,up]
        // Start (1,1): right is out, down is out, left -> (1,0), then up -> (0,0),
        // then right -> (0,1)
        let draws = [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut rng = Scripted::new(&draws);
        let maze = generate(2, 2, &mut rng).unwrap();

        assert_eq!(maze.start, Cell::new(1, 1));
        assert!(maze.vertical.get(1, 0));
        assert!(maze.horizontal.get(0, 0));
        assert!(maze.vertical.get(0, 0));
        assert!(!maze.horizontal.get(0, 1));
        assert_eq!(maze.passage_count(), 3);
    }

    /// Straight recursive backtracker, kept as the reference ordering
    struct RecursiveWalk<'a> {
        rows: usize,
        columns: usize,
        rng: &'a mut Pcg32,
        visited: BoolMatrix,
        vertical: BoolMatrix,
        horizontal: BoolMatrix,
        history: Vec<Cell>,
    }

    impl RecursiveWalk<'_> {
        fn visit(&mut self, cell: Cell) {
            if self.visited.get(cell.row, cell.col) {
                return;
            }
            self.visited.set(cell.row, cell.col, true);

            let mut neighbors = Direction::ALL;
            shuffle(&mut neighbors, &mut *self.rng);

            let mut found = false;
            for dir in neighbors {
                let Some(next) = cell.step(dir, self.rows, self.columns) else {
                    continue;
                };
                if self.visited.get(next.row, next.col) {
                    continue;
                }
                self.history.push(cell);
                found = true;
                match dir {
                    Direction::Left => self.vertical.set(cell.row, cell.col - 1, true),
                    Direction::Right => self.vertical.set(cell.row, cell.col, true),
                    Direction::Up => self.horizontal.set(cell.row - 1, cell.col, true),
                    Direction::Down => self.horizontal.set(cell.row, cell.col, true),
                }
                self.visit(next);
            }

            if !found {
                if let Some(prev) = self.history.pop() {
                    self.visit(prev);
                }
            }
        }
    }

    fn recursive_maze(rows: usize, columns: usize, seed: u64) -> (Cell, BoolMatrix, BoolMatrix) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let start = Cell::new(rng.index_below(rows), rng.index_below(columns));
        let mut walk = RecursiveWalk {
            rows,
            columns,
            rng: &mut rng,
            visited: BoolMatrix::new(rows, columns),
            vertical: BoolMatrix::new(rows, columns - 1),
            horizontal: BoolMatrix::new(rows - 1, columns),
            history: Vec::new(),
        };
        walk.visit(start);
        (start, walk.vertical, walk.horizontal)
    }

    #[test]
    fn test_loop_matches_recursive_order() {
        let sizes = [(1, 1), (1, 40), (40, 1), (6, 6), (7, 13), (20, 20)];
        for (rows, columns) in sizes {
            for seed in 0..300 {
                let maze = generate(rows, columns, &mut Pcg32::seed_from_u64(seed)).unwrap();
                let (start, vertical, horizontal) = recursive_maze(rows, columns, seed);
                assert_eq!(maze.start, start, "{rows}x{columns} seed {seed}");
                assert_eq!(maze.vertical, vertical, "{rows}x{columns} seed {seed}");
                assert_eq!(maze.horizontal, horizontal, "{rows}x{columns} seed {seed}");
            }
        }
    }

    #[test]
    fn test_large_grid_does_not_recurse() {
        // A single corridor is as deep as it is long
        let mut rng = Pcg32::seed_from_u64(3);
        let maze = generate(1, 200_000, &mut rng).unwrap();
        assert_eq!(maze.passage_count(), 199_999);
    }
}
