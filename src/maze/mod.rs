//! Perfect maze generation and queries
//!
//! A maze is frozen once generated: the passage matrices are only exposed
//! read-only. Every maze produced by [`MazeGenerator`] is a spanning tree
//! over its cells (one path between any two cells).

pub mod generator;
pub mod grid;
pub mod random;

pub use generator::{MazeGenerator, generate};
pub use grid::{BoolMatrix, Cell, Direction};
pub use random::{RandomSource, shuffle};

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A generated maze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    pub(crate) rows: usize,
    pub(crate) columns: usize,
    /// Cell the traversal started from
    pub(crate) start: Cell,
    /// `rows x (columns - 1)`, true = passage between `(r, c)` and `(r, c + 1)`
    pub(crate) vertical: BoolMatrix,
    /// `(rows - 1) x columns`, true = passage between `(r, c)` and `(r + 1, c)`
    pub(crate) horizontal: BoolMatrix,
}

impl Maze {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn vertical_open(&self) -> &BoolMatrix {
        &self.vertical
    }

    pub fn horizontal_open(&self) -> &BoolMatrix {
        &self.horizontal
    }

    /// Top-left cell, where the ball is placed
    pub fn entry(&self) -> Cell {
        Cell::new(0, 0)
    }

    /// Bottom-right cell, where the goal is placed
    pub fn goal(&self) -> Cell {
        Cell::new(self.rows - 1, self.columns - 1)
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn passage_count(&self) -> usize {
        self.vertical.count() + self.horizontal.count()
    }

    /// Whether a passage leads out of `cell` in `dir`. Grid edges are always closed.
    pub fn is_open(&self, cell: Cell, dir: Direction) -> bool {
        let Cell { row, col } = cell;
        if row >= self.rows || col >= self.columns {
            return false;
        }
        match dir {
            Direction::Right => col + 1 < self.columns && self.vertical.get(row, col),
            Direction::Left => col > 0 && self.vertical.get(row, col - 1),
            Direction::Down => row + 1 < self.rows && self.horizontal.get(row, col),
            Direction::Up => row > 0 && self.horizontal.get(row - 1, col),
        }
    }

    /// Cells reachable from `cell` in one step
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            if self.is_open(cell, dir) {
                cell.step(dir, self.rows, self.columns)
            } else {
                None
            }
        })
    }

    /// Connected with exactly `cells - 1` passages, i.e. a spanning tree
    pub fn is_perfect(&self) -> bool {
        if self.passage_count() + 1 != self.cell_count() {
            return false;
        }
        let mut seen = BoolMatrix::new(self.rows, self.columns);
        let mut queue = VecDeque::from([self.entry()]);
        seen.set(0, 0, true);
        let mut reached = 1;
        while let Some(cell) = queue.pop_front() {
            for next in self.open_neighbors(cell) {
                if !seen.get(next.row, next.col) {
                    seen.set(next.row, next.col, true);
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached == self.cell_count()
    }

    /// Path from `from` to `to` inclusive, following open passages
    pub fn solve(&self, from: Cell, to: Cell) -> Option<Vec<Cell>> {
        let in_bounds = |c: Cell| c.row < self.rows && c.col < self.columns;
        if !in_bounds(from) || !in_bounds(to) {
            return None;
        }

        let mut parent: Vec<Option<Cell>> = vec![None; self.cell_count()];
        let index = |c: Cell| c.row * self.columns + c.col;
        let mut queue = VecDeque::from([from]);
        parent[index(from)] = Some(from);

        while let Some(cell) = queue.pop_front() {
            if cell == to {
                let mut path = vec![to];
                let mut cur = to;
                while cur != from {
                    cur = parent[index(cur)]?;
                    path.push(cur);
                }
                path.reverse();
                return Some(path);
            }
            for next in self.open_neighbors(cell) {
                if parent[index(next)].is_none() {
                    parent[index(next)] = Some(cell);
                    queue.push_back(next);
                }
            }
        }
        None
    }
}

/// ASCII rendering, three characters per cell
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+{}", "---+".repeat(self.columns))?;
        for row in 0..self.rows {
            write!(f, "|")?;
            for col in 0..self.columns {
                let open = self.is_open(Cell::new(row, col), Direction::Right);
                write!(f, "   {}", if open { ' ' } else { '|' })?;
            }
            writeln!(f)?;
            write!(f, "+")?;
            for col in 0..self.columns {
                let open = self.is_open(Cell::new(row, col), Direction::Down);
                write!(f, "{}+", if open { "   " } else { "---" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
