//! Randomized depth-first maze carving
//!
//! Starting from a random cell, each visited cell shuffles its four candidate moves and
//! carves into every neighbour that is inside the grid and not yet visited, descending
//! into it before trying the next move. Every cell is entered exactly once, so the opened
//! walls form a spanning tree of `rows * cols - 1` passages.
//!
//! Two traversals are provided. They draw from the random source in the same order and
//! therefore carve identical mazes for identical input.

use serde::{Deserialize, Serialize};

use super::Maze;
use super::grid::{Cell, Direction, WallKind, WallMatrix, wall_between};
use super::random::RandomSource;
use crate::error::{MazeError, Result};

/// How the depth-first walk keeps track of where it has been
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Traversal {
    /// Call-stack recursion; depth grows up to `rows * cols`
    Recursive,
    /// Heap-allocated frame stack; safe for any grid size
    #[default]
    Stack,
}

impl Traversal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Traversal::Recursive => "recursive",
            Traversal::Stack => "stack",
        }
    }
}

/// In-place Fisher-Yates shuffle driven by `uniform_int`
///
/// Walks `counter` from `len` down to 1, swapping a random pick from `[0, counter)` into
/// position `counter - 1`. Always draws exactly `len` values.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    let mut counter = items.len();
    while counter > 0 {
        let index = rng.uniform_int(counter);
        counter -= 1;
        items.swap(index, counter);
    }
}

/// Owns the working state of one maze generation
#[derive(Debug)]
pub struct MazeGenerator {
    rows: usize,
    cols: usize,
    visited: Vec<bool>,
    verticals: WallMatrix,
    horizontals: WallMatrix,
}

/// A cell on the explicit stack together with its remaining moves
struct Frame {
    cell: Cell,
    moves: [Direction; 4],
    next: usize,
}

impl MazeGenerator {
    /// Fails with `InvalidDimensions` if either dimension is zero
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            visited: vec![false; rows * cols],
            verticals: WallMatrix::closed(rows, cols - 1),
            horizontals: WallMatrix::closed(rows - 1, cols),
        })
    }

    /// Pick a start cell and carve the whole grid, consuming the generator
    pub fn generate<R: RandomSource + ?Sized>(mut self, rng: &mut R, traversal: Traversal) -> Maze {
        let start = Cell::new(rng.uniform_int(self.rows), rng.uniform_int(self.cols));
        log::debug!(
            "Carving {}x{} maze from ({}, {}) using {} traversal",
            self.rows,
            self.cols,
            start.row,
            start.col,
            traversal.as_str()
        );

        match traversal {
            Traversal::Recursive => self.visit(start, rng),
            Traversal::Stack => self.walk(start, rng),
        }

        debug_assert!(self.visited.iter().all(|&v| v), "every cell should be visited");

        Maze::from_parts(
            self.rows,
            self.cols,
            start,
            self.verticals,
            self.horizontals,
        )
    }

    fn is_visited(&self, cell: Cell) -> bool {
        self.visited[cell.index(self.cols)]
    }

    fn mark_visited(&mut self, cell: Cell) {
        let i = cell.index(self.cols);
        self.visited[i] = true;
    }

    fn open_wall(&mut self, cell: Cell, direction: Direction) {
        match wall_between(cell, direction) {
            (WallKind::Vertical, row, col) => self.verticals.open(row, col),
            (WallKind::Horizontal, row, col) => self.horizontals.open(row, col),
        }
    }

    /// Next unvisited in-bounds neighbour, or `None` if the move should be skipped
    fn carve_target(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        cell.step(direction, self.rows, self.cols)
            .filter(|&next| !self.is_visited(next))
    }

    fn shuffled_moves<R: RandomSource + ?Sized>(rng: &mut R) -> [Direction; 4] {
        let mut moves = Direction::ALL;
        shuffle(&mut moves, rng);
        moves
    }

    fn visit<R: RandomSource + ?Sized>(&mut self, cell: Cell, rng: &mut R) {
        if self.is_visited(cell) {
            return;
        }
        self.mark_visited(cell);

        for direction in Self::shuffled_moves(rng) {
            // Re-checked per move: an earlier branch may have reached this neighbour
            let Some(next) = self.carve_target(cell, direction) else {
                continue;
            };
            self.open_wall(cell, direction);
            self.visit(next, rng);
        }
    }

    fn walk<R: RandomSource + ?Sized>(&mut self, start: Cell, rng: &mut R) {
        let mut stack = Vec::with_capacity(self.rows * self.cols);
        self.mark_visited(start);
        stack.push(Frame {
            cell: start,
            moves: Self::shuffled_moves(rng),
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let Some(&direction) = frame.moves.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let cell = frame.cell;

            let Some(next) = self.carve_target(cell, direction) else {
                continue;
            };
            self.open_wall(cell, direction);
            self.mark_visited(next);
            stack.push(Frame {
                cell: next,
                moves: Self::shuffled_moves(rng),
                next: 0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::random::SequenceSource;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::VecDeque;

    fn carve(rows: usize, cols: usize, seed: u64, traversal: Traversal) -> Maze {
        let mut rng = Pcg32::seed_from_u64(seed);
        MazeGenerator::new(rows, cols)
            .expect("valid dimensions")
            .generate(&mut rng, traversal)
    }

    /// Breadth-first count of cells reachable from (0, 0) through open passages
    fn reachable_cells(maze: &Maze) -> usize {
        let mut seen = vec![false; maze.rows() * maze.cols()];
        let mut queue = VecDeque::from([Cell::new(0, 0)]);
        seen[0] = true;
        let mut count = 0;
        while let Some(cell) = queue.pop_front() {
            count += 1;
            for next in maze.neighbours(cell) {
                let i = next.index(maze.cols());
                if !seen[i] {
                    seen[i] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    #[test]
    fn test_shuffle_with_zeros_rotates() {
        let mut moves = Direction::ALL;
        shuffle(&mut moves, &mut SequenceSource::zeros());
        assert_eq!(
            moves,
            [
                Direction::Right,
                Direction::Down,
                Direction::Left,
                Direction::Up
            ]
        );
    }

    #[test]
    fn test_shuffle_draws_descending_bounds() {
        let mut src = SequenceSource::zeros();
        let mut items = [1, 2, 3, 4, 5];
        shuffle(&mut items, &mut src);
        assert_eq!(src.requests(), &[5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut items: Vec<u32> = (0..16).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            MazeGenerator::new(0, 4).unwrap_err(),
            MazeError::InvalidDimensions { rows: 0, cols: 4 }
        );
        assert_eq!(
            MazeGenerator::new(3, 0).unwrap_err(),
            MazeError::InvalidDimensions { rows: 3, cols: 0 }
        );
    }

    #[test]
    fn test_all_zero_source_fixture() {
        // Shuffle order is [right, down, left, up] at every cell, giving a spiral:
        // (0,0) → (0,1) → (0,2) → (1,2) → (2,2) → (2,1) → (2,0) → (1,0) → (1,1)
        for traversal in [Traversal::Recursive, Traversal::Stack] {
            let maze = MazeGenerator::new(3, 3)
                .unwrap()
                .generate(&mut SequenceSource::zeros(), traversal);

            assert_eq!(maze.start(), Cell::new(0, 0));
            assert_eq!(
                maze.verticals().to_rows(),
                vec![
                    vec![true, true],
                    vec![true, false],
                    vec![true, true]
                ]
            );
            assert_eq!(
                maze.horizontals().to_rows(),
                vec![vec![false, false, true], vec![true, false, true]]
            );
            assert_eq!(maze.passage_count(), 8);
        }
    }

    #[test]
    fn test_start_cell_drawn_row_then_column() {
        let mut src = SequenceSource::new(vec![2, 1, 0]);
        let maze = MazeGenerator::new(4, 5)
            .unwrap()
            .generate(&mut src, Traversal::Stack);
        assert_eq!(maze.start(), Cell::new(2, 1));
        assert_eq!(&src.requests()[..2], &[4, 5]);
    }

    #[test]
    fn test_single_cell() {
        let mut src = SequenceSource::zeros();
        let maze = MazeGenerator::new(1, 1)
            .unwrap()
            .generate(&mut src, Traversal::Recursive);
        assert_eq!(maze.passage_count(), 0);
        assert_eq!(maze.verticals().iter().count(), 0);
        assert_eq!(maze.horizontals().iter().count(), 0);
        // start row, start col, one shuffle
        assert_eq!(src.requests(), &[1, 1, 4, 3, 2, 1]);
    }

    #[test]
    fn test_single_row_is_a_corridor() {
        let maze = carve(1, 8, 11, Traversal::Stack);
        assert_eq!(maze.horizontals().rows(), 0);
        assert_eq!(maze.verticals().open_count(), 7);
        assert_eq!(reachable_cells(&maze), 8);
    }

    #[test]
    fn test_single_column_is_a_corridor() {
        let maze = carve(6, 1, 5, Traversal::Recursive);
        assert_eq!(maze.verticals().cols(), 0);
        assert_eq!(maze.horizontals().open_count(), 5);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_source_is_not_masked() {
        let mut src = SequenceSource::new(vec![9]);
        let _ = MazeGenerator::new(3, 3)
            .unwrap()
            .generate(&mut src, Traversal::Stack);
    }

    #[test]
    fn test_large_grid_with_stack_traversal() {
        let maze = carve(200, 200, 1, Traversal::Stack);
        assert_eq!(maze.passage_count(), 200 * 200 - 1);
        assert_eq!(reachable_cells(&maze), 200 * 200);
    }

    proptest! {
        #[test]
        fn prop_spanning_tree(rows in 1usize..24, cols in 1usize..24, seed in any::<u64>()) {
            let maze = carve(rows, cols, seed, Traversal::Stack);
            // n - 1 edges and connected implies acyclic
            prop_assert_eq!(maze.passage_count(), rows * cols - 1);
            prop_assert_eq!(reachable_cells(&maze), rows * cols);
        }

        #[test]
        fn prop_matrix_shapes(rows in 1usize..24, cols in 1usize..24, seed in any::<u64>()) {
            let maze = carve(rows, cols, seed, Traversal::Recursive);
            prop_assert_eq!((maze.verticals().rows(), maze.verticals().cols()), (rows, cols - 1));
            prop_assert_eq!((maze.horizontals().rows(), maze.horizontals().cols()), (rows - 1, cols));
            prop_assert!(maze.start().row < rows && maze.start().col < cols);
        }

        #[test]
        fn prop_traversals_agree(rows in 1usize..20, cols in 1usize..20, seed in any::<u64>()) {
            let recursive = carve(rows, cols, seed, Traversal::Recursive);
            let stack = carve(rows, cols, seed, Traversal::Stack);
            prop_assert_eq!(recursive, stack);
        }

        #[test]
        fn prop_same_sequence_same_maze(values in prop::collection::vec(any::<usize>(), 1..64)) {
            let replay = |values: &[usize]| {
                let mut src = BoundedReplay::new(values.to_vec());
                MazeGenerator::new(4, 4).unwrap().generate(&mut src, Traversal::Stack)
            };
            prop_assert_eq!(replay(values.as_slice()), replay(values.as_slice()));
        }
    }

    /// Replays recorded values reduced into the requested range
    struct BoundedReplay {
        inner: SequenceSource,
    }

    impl BoundedReplay {
        fn new(values: Vec<usize>) -> Self {
            Self {
                inner: SequenceSource::new(values),
            }
        }
    }

    impl RandomSource for BoundedReplay {
        fn uniform_int(&mut self, n: usize) -> usize {
            self.inner.uniform_int(n) % n
        }
    }
}
