//! Maze topology
//!
//! Pure and deterministic given a random source:
//! - `grid`: cell addressing and the two wall matrices
//! - `random`: the uniform integer source the generator draws from
//! - `generator`: randomized depth-first spanning tree carving
//! - `layout`: translation of the wall matrices into axis-aligned rectangles

pub mod generator;
pub mod grid;
pub mod layout;
pub mod random;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use generator::{MazeGenerator, Traversal, shuffle};
pub use grid::{Cell, Direction, WallKind, WallMatrix};
pub use layout::{Layout, Orientation, Rect, WallSegment, emit_walls};
pub use random::{RandomSource, SequenceSource};

use crate::error::{MazeError, Result};
use grid::wall_between;

/// A fully carved maze; immutable once generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMaze")]
pub struct Maze {
    rows: usize,
    cols: usize,
    /// Root of the carving walk (does not affect where the player starts)
    start: Cell,
    verticals: WallMatrix,
    horizontals: WallMatrix,
}

/// Unchecked wire form of `Maze`
#[derive(Deserialize)]
struct RawMaze {
    rows: usize,
    cols: usize,
    start: Cell,
    verticals: WallMatrix,
    horizontals: WallMatrix,
}

impl TryFrom<RawMaze> for Maze {
    type Error = MazeError;

    fn try_from(raw: RawMaze) -> Result<Self> {
        let RawMaze {
            rows,
            cols,
            start,
            verticals,
            horizontals,
        } = raw;
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        if (verticals.rows(), verticals.cols()) != (rows, cols - 1) {
            return Err(MazeError::MalformedMaze(format!(
                "vertical walls are {}x{}, expected {}x{}",
                verticals.rows(),
                verticals.cols(),
                rows,
                cols - 1
            )));
        }
        if (horizontals.rows(), horizontals.cols()) != (rows - 1, cols) {
            return Err(MazeError::MalformedMaze(format!(
                "horizontal walls are {}x{}, expected {}x{}",
                horizontals.rows(),
                horizontals.cols(),
                rows - 1,
                cols
            )));
        }
        if start.row >= rows || start.col >= cols {
            return Err(MazeError::MalformedMaze(format!(
                "start ({}, {}) is outside the {}x{} grid",
                start.row, start.col, rows, cols
            )));
        }
        Ok(Self::from_parts(rows, cols, start, verticals, horizontals))
    }
}

impl Maze {
    /// Generate a `rows × cols` maze
    pub fn generate<R: RandomSource + ?Sized>(
        rows: usize,
        cols: usize,
        rng: &mut R,
        traversal: Traversal,
    ) -> Result<Self> {
        let maze = MazeGenerator::new(rows, cols)?.generate(rng, traversal);
        log::info!(
            "Generated {}x{} maze with {} passages",
            rows,
            cols,
            maze.passage_count()
        );
        Ok(maze)
    }

    pub(crate) fn from_parts(
        rows: usize,
        cols: usize,
        start: Cell,
        verticals: WallMatrix,
        horizontals: WallMatrix,
    ) -> Self {
        Self {
            rows,
            cols,
            start,
            verticals,
            horizontals,
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

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    /// `rows × (cols - 1)`, `true` where a passage joins `(r, c)` and `(r, c + 1)`
    #[inline]
    pub fn verticals(&self) -> &WallMatrix {
        &self.verticals
    }

    /// `(rows - 1) × cols`, `true` where a passage joins `(r, c)` and `(r + 1, c)`
    #[inline]
    pub fn horizontals(&self) -> &WallMatrix {
        &self.horizontals
    }

    /// Total opened walls across both matrices
    pub fn passage_count(&self) -> usize {
        self.verticals.open_count() + self.horizontals.open_count()
    }

    /// Whether a passage leads out of `cell` in `direction`
    ///
    /// False at the grid edge and for cells outside the grid.
    pub fn is_open(&self, cell: Cell, direction: Direction) -> bool {
        if cell.row >= self.rows || cell.col >= self.cols {
            return false;
        }
        if cell.step(direction, self.rows, self.cols).is_none() {
            return false;
        }
        match wall_between(cell, direction) {
            (WallKind::Vertical, row, col) => self.verticals.is_open(row, col),
            (WallKind::Horizontal, row, col) => self.horizontals.is_open(row, col),
        }
    }

    /// Cells reachable from `cell` in one step through a passage
    pub fn neighbours(&self, cell: Cell) -> Vec<Cell> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.is_open(cell, dir))
            .filter_map(|dir| cell.step(dir, self.rows, self.cols))
            .collect()
    }

    /// ASCII picture: `+` corners, `---`/`|` walls, blanks for passages
    pub fn log(&self) -> String {
        let mut out = String::new();
        out.push('+');
        out.push_str(&"---+".repeat(self.cols));

        for row in 0..self.rows {
            out.push_str("\n|");
            for col in 0..self.cols {
                out.push_str("   ");
                let open = self.is_open(Cell::new(row, col), Direction::Right);
                out.push(if open { ' ' } else { '|' });
            }

            out.push_str("\n+");
            for col in 0..self.cols {
                let open = self.is_open(Cell::new(row, col), Direction::Down);
                out.push_str(if open { "   +" } else { "---+" });
            }
        }
        out
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spiral() -> Maze {
        Maze::generate(3, 3, &mut SequenceSource::zeros(), Traversal::Stack).unwrap()
    }

    #[test]
    fn test_generate_propagates_invalid_dimensions() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(Maze::generate(0, 0, &mut rng, Traversal::Stack).is_err());
    }

    #[test]
    fn test_is_open_is_symmetric() {
        let maze = spiral();
        for row in 0..3 {
            for col in 0..3 {
                let cell = Cell::new(row, col);
                for dir in Direction::ALL {
                    if let Some(other) = cell.step(dir, 3, 3) {
                        assert_eq!(maze.is_open(cell, dir), maze.is_open(other, dir.opposite()));
                    } else {
                        assert!(!maze.is_open(cell, dir));
                    }
                }
            }
        }
    }

    #[test]
    fn test_neighbours_follow_passages() {
        let maze = spiral();
        // (1, 1) is the dead end at the centre of the spiral
        assert_eq!(maze.neighbours(Cell::new(1, 1)), vec![Cell::new(1, 0)]);
        assert_eq!(
            maze.neighbours(Cell::new(0, 1)),
            vec![Cell::new(0, 2), Cell::new(0, 0)]
        );
        assert!(maze.neighbours(Cell::new(7, 7)).is_empty());
    }

    #[test]
    fn test_ascii_rendering() {
        let expected = "\
+---+---+---+
|           |
+---+---+   +
|       |   |
+   +---+   +
|           |
+---+---+---+";
        assert_eq!(spiral().to_string(), expected);
    }

    #[test]
    fn test_serde_roundtrip_keeps_topology() {
        let mut rng = Pcg32::seed_from_u64(77);
        let maze = Maze::generate(5, 4, &mut rng, Traversal::Recursive).unwrap();
        let json = serde_json::to_string(&maze).unwrap();
        let back: Maze = serde_json::from_str(&json).unwrap();
        assert_eq!(maze, back);
    }

    #[test]
    fn test_deserialize_rejects_mismatched_shapes() {
        let mut value = serde_json::to_value(spiral()).unwrap();
        value["cols"] = serde_json::json!(4);
        let err = serde_json::from_value::<Maze>(value).unwrap_err().to_string();
        assert!(err.contains("vertical walls are 3x2, expected 3x3"), "{err}");

        let mut value = serde_json::to_value(spiral()).unwrap();
        value["start"] = serde_json::json!({ "row": 3, "col": 0 });
        let err = serde_json::from_value::<Maze>(value).unwrap_err().to_string();
        assert!(err.contains("outside the 3x3 grid"), "{err}");

        let mut value = serde_json::to_value(spiral()).unwrap();
        value["rows"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Maze>(value).is_err());
    }
}
