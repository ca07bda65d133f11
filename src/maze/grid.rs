//! Grid addressing and wall matrices
//!
//! A maze of `rows × cols` cells stores its passages in two boolean matrices:
//! - vertical walls (`rows × (cols - 1)`): entry `(r, c)` separates `(r, c)` from `(r, c + 1)`
//! - horizontal walls (`(rows - 1) × cols`): entry `(r, c)` separates `(r, c)` from `(r + 1, c)`
//!
//! `true` means the wall has been opened into a passage.

use serde::{Deserialize, Serialize};

use crate::error::MazeError;

/// A grid cell, addressed by row then column (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The adjacent cell in `direction`, or `None` if it would fall outside a `rows × cols` grid
    pub fn step(self, direction: Direction, rows: usize, cols: usize) -> Option<Cell> {
        let (row, col) = match direction {
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Right => (self.row, self.col + 1),
            Direction::Down => (self.row + 1, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
        };
        (row < rows && col < cols).then_some(Cell { row, col })
    }

    /// Row-major index into a grid with `cols` columns
    #[inline]
    pub fn index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}

/// One of the four moves out of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Candidate order before shuffling
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// Which of the two wall matrices an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallKind {
    /// Between horizontally adjacent cells
    Vertical,
    /// Between vertically adjacent cells
    Horizontal,
}

/// The matrix entry separating `cell` from its neighbour in `direction`
///
/// Does not check that the neighbour is inside the grid.
pub fn wall_between(cell: Cell, direction: Direction) -> (WallKind, usize, usize) {
    match direction {
        Direction::Right => (WallKind::Vertical, cell.row, cell.col),
        Direction::Left => (WallKind::Vertical, cell.row, cell.col - 1),
        Direction::Up => (WallKind::Horizontal, cell.row - 1, cell.col),
        Direction::Down => (WallKind::Horizontal, cell.row, cell.col),
    }
}

/// Dense row-major boolean matrix of wall entries (`true` = open)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWallMatrix")]
pub struct WallMatrix {
    rows: usize,
    cols: usize,
    open: Vec<bool>,
}

/// Unchecked wire form of `WallMatrix`
#[derive(Deserialize)]
struct RawWallMatrix {
    rows: usize,
    cols: usize,
    open: Vec<bool>,
}

impl TryFrom<RawWallMatrix> for WallMatrix {
    type Error = MazeError;

    fn try_from(raw: RawWallMatrix) -> Result<Self, Self::Error> {
        let expected = raw.rows.checked_mul(raw.cols);
        if expected != Some(raw.open.len()) {
            return Err(MazeError::MalformedMaze(format!(
                "{}x{} wall matrix holds {} entries",
                raw.rows,
                raw.cols,
                raw.open.len()
            )));
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            open: raw.open,
        })
    }
}

impl WallMatrix {
    /// All walls present
    pub fn closed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            open: vec![false; rows * cols],
        }
    }

    /// Build from nested rows, mostly for fixtures
    ///
    /// Panics if the rows are ragged.
    pub fn from_rows(rows: &[&[bool]]) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        assert!(
            rows.iter().all(|r| r.len() == cols),
            "wall matrix rows must all have the same length"
        );
        Self {
            rows: rows.len(),
            cols,
            open: rows.iter().flat_map(|r| r.iter().copied()).collect(),
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

    /// Panics on an out-of-range entry
    #[inline]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.open[self.offset(row, col)]
    }

    /// Panics on an out-of-range entry
    #[inline]
    pub fn open(&mut self, row: usize, col: usize) {
        let i = self.offset(row, col);
        self.open[i] = true;
    }

    /// Number of opened entries
    pub fn open_count(&self) -> usize {
        self.open.iter().filter(|&&o| o).count()
    }

    /// Entries in row-major order as `(row, col, open)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let cols = self.cols.max(1);
        self.open
            .iter()
            .enumerate()
            .map(move |(i, &open)| (i / cols, i % cols, open))
    }

    /// Nested copy, handy for assertions and debugging
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.open.chunks(self.cols).map(|c| c.to_vec()).collect()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "wall entry ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}
