//! Cells, directions and the passage matrices
//!
//! A maze of `rows x columns` cells has two kinds of internal walls:
//! - vertical walls between `(r, c)` and `(r, c + 1)`, stored `rows x (columns - 1)`
//! - horizontal walls between `(r, c)` and `(r + 1, c)`, stored `(rows - 1) x columns`
//!
//! `true` in either matrix means the wall has been removed (a passage exists).

use serde::{Deserialize, Serialize};

/// A grid cell addressed by row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbour one step in `dir`, if it lies inside a `rows x columns` grid
    pub fn step(self, dir: Direction, rows: usize, columns: usize) -> Option<Cell> {
        let (dr, dc) = dir.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < rows && col < columns).then_some(Cell { row, col })
    }
}

/// The four grid directions, in the order neighbours are assembled before shuffling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// (row, column) delta
    #[inline]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// Dense row-major boolean matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl BoolMatrix {
    /// All-false matrix. Either dimension may be zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Panics if out of range
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        self.cells[row * self.cols + col] = value;
    }

    /// Number of `true` entries
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&v| v).count()
    }

    /// Iterate `(row, col, value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &v)| (i / self.cols, i % self.cols, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_bounds() {
        let c = Cell::new(0, 0);
        assert_eq!(c.step(Direction::Up, 3, 3), None);
        assert_eq!(c.step(Direction::Left, 3, 3), None);
        assert_eq!(c.step(Direction::Right, 3, 3), Some(Cell::new(0, 1)));
        assert_eq!(c.step(Direction::Down, 3, 3), Some(Cell::new(1, 0)));

        let corner = Cell::new(2, 2);
        assert_eq!(corner.step(Direction::Down, 3, 3), None);
        assert_eq!(corner.step(Direction::Right, 3, 3), None);
    }

    #[test]
    fn test_opposite_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dr, dc) = dir.offset();
            let (or, oc) = dir.opposite().offset();
            assert_eq!((dr + or, dc + oc), (0, 0));
        }
    }

    #[test]
    fn test_matrix_zero_rows() {
        let m = BoolMatrix::new(0, 5);
        assert_eq!(m.rows(), 0);
        assert_eq!(m.count(), 0);
        assert_eq!(m.iter().count(), 0);
    }

    #[test]
    fn test_matrix_set_get() {
        let mut m = BoolMatrix::new(2, 3);
        m.set(1, 2, true);
        assert!(m.get(1, 2));
        assert!(!m.get(0, 2));
        assert_eq!(m.count(), 1);
        let set: Vec<_> = m.iter().filter(|&(_, _, v)| v).collect();
        assert_eq!(set, vec![(1, 2, true)]);
    }
}
