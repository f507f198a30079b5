#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The brute-force backtracking Sudoku solver.
//!
//! The [`Solver`] owns two grids: an immutable clue grid (the puzzle as
//! given) and a mutable solution grid, initialized as a copy of the clue.
//! [`Solver::solve`] walks the cells in row-major order and, at each blank
//! cell, tries the digits 1 through 9 in ascending order. A digit may be
//! placed when it does not already appear in the cell's row, column, or 3x3
//! box; the search then recurses on the next cell. When a recursive attempt
//! fails, the cell is reset to blank and the next digit is tried; when all
//! nine digits fail, the current frame reports failure and the previous one
//! backtracks in turn.
//!
//! The search is exhaustive and deterministic: the same clue grid always
//! produces the same solution grid, namely the first solution under this
//! cell and digit order. Recursion depth is at most 81 frames, one per cell.
//!
//! The solver assumes a well-formed clue grid (9x9 cells, values `0..=9`)
//! and does not validate it; a clue set that already violates a uniqueness
//! constraint is the loader's job to reject (see
//! [`parser`](super::parser)), and handing one to the solver gives an
//! unspecified result.

use super::grid::{BLANK, DIMENSION, Grid, REGION_DIM};

/// The standard published easy puzzle. Its unique solution starts with
/// `5 3 4 6 7 8 9 1 2` in the top row.
pub const EXAMPLE_EASY: [[u8; DIMENSION]; DIMENSION] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// A 21-clue puzzle that forces heavy backtracking under the 1-to-9,
/// row-major search order. Used by the benchmarks.
pub const EXAMPLE_HARD: [[u8; DIMENSION]; DIMENSION] = [
    [8, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 3, 6, 0, 0, 0, 0, 0],
    [0, 7, 0, 0, 9, 0, 2, 0, 0],
    [0, 5, 0, 0, 0, 7, 0, 0, 0],
    [0, 0, 0, 0, 4, 5, 7, 0, 0],
    [0, 0, 0, 1, 0, 0, 0, 3, 0],
    [0, 0, 1, 0, 0, 0, 0, 6, 8],
    [0, 0, 8, 5, 0, 0, 0, 1, 0],
    [0, 9, 0, 0, 0, 0, 4, 0, 0],
];

/// Counters describing one run of the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of tentative digit placements.
    pub placements: usize,
    /// Number of placements that were undone after the recursive attempt
    /// beneath them failed.
    pub backtracks: usize,
}

/// A backtracking solver for one 9x9 Sudoku puzzle.
///
/// The solver is single-use: construct it from a clue grid, call
/// [`Solver::solve`] once, and inspect [`Solver::solution`].
#[derive(Debug, Clone)]
pub struct Solver {
    clue: Grid,
    solution: Grid,
    stats: SearchStats,
}

impl Solver {
    /// Creates a solver for the given clue grid. The solution grid starts
    /// as a copy of the clue.
    #[must_use]
    pub fn new(clue: Grid) -> Self {
        Self {
            clue,
            solution: clue,
            stats: SearchStats::default(),
        }
    }

    /// Attempts to fill every blank cell of the solution grid.
    ///
    /// Returns `true` when a fully valid assignment was found; the solution
    /// grid then holds it. Returns `false` when no assignment satisfies the
    /// constraints; every cell touched by the search has then been reset to
    /// blank, leaving the solution grid equal to the clue.
    pub fn solve(&mut self) -> bool {
        self.solve_from(0, 0)
    }

    /// The original puzzle, unchanged by the search.
    #[must_use]
    pub const fn clue(&self) -> &Grid {
        &self.clue
    }

    /// The working grid: the found solution after a successful
    /// [`Solver::solve`], otherwise its current (possibly partial) state.
    #[must_use]
    pub const fn solution(&self) -> &Grid {
        &self.solution
    }

    /// Counters from the search so far.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Solves the remainder of the grid starting at `(row, col)`, assuming
    /// every earlier cell in row-major order already satisfies the
    /// constraints.
    fn solve_from(&mut self, row: usize, col: usize) -> bool {
        if row == DIMENSION {
            // Walked past the last cell: all 81 are filled consistently.
            return true;
        }

        let (next_row, next_col) = if col == DIMENSION - 1 {
            (row + 1, 0)
        } else {
            (row, col + 1)
        };

        // Givens are fixed; skip straight to the next cell.
        if self.clue[(row, col)] != BLANK {
            return self.solve_from(next_row, next_col);
        }

        for digit in 1..=9u8 {
            if !self.fits(row, col, digit) {
                continue;
            }
            self.solution[(row, col)] = digit;
            self.stats.placements += 1;
            if self.solve_from(next_row, next_col) {
                return true;
            }
            self.solution[(row, col)] = BLANK;
            self.stats.backtracks += 1;
        }

        false
    }

    /// Tells whether `digit` may be placed at `(row, col)`: it must not
    /// already appear in the cell's row, column, or box.
    fn fits(&self, row: usize, col: usize, digit: u8) -> bool {
        !self.in_row(row, digit) && !self.in_col(col, digit) && !self.in_box(row, col, digit)
    }

    /// Tells whether `digit` appears anywhere in `row`.
    fn in_row(&self, row: usize, digit: u8) -> bool {
        (0..DIMENSION).any(|col| self.solution[(row, col)] == digit)
    }

    /// Tells whether `digit` appears anywhere in `col`.
    fn in_col(&self, col: usize, digit: u8) -> bool {
        (0..DIMENSION).any(|row| self.solution[(row, col)] == digit)
    }

    /// Tells whether `digit` appears anywhere in the 3x3 box containing
    /// `(row, col)`.
    fn in_box(&self, row: usize, col: usize, digit: u8) -> bool {
        let corner_row = row / REGION_DIM * REGION_DIM;
        let corner_col = col / REGION_DIM * REGION_DIM;
        (0..REGION_DIM).any(|r| {
            (0..REGION_DIM).any(|c| self.solution[(corner_row + r, corner_col + c)] == digit)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_EASY_SOLUTION: [[u8; DIMENSION]; DIMENSION] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    /// A consistent grid with no solution: the first blank cell `(0, 0)`
    /// needs the 1 missing from its row, but its column already has one.
    const NO_CANDIDATE: [[u8; DIMENSION]; DIMENSION] = [
        [0, 2, 3, 4, 5, 6, 7, 8, 9],
        [1, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
    ];

    #[test]
    fn easy_puzzle_finds_the_published_solution() {
        let mut solver = Solver::new(Grid::from_rows(EXAMPLE_EASY));
        assert!(solver.solve());
        assert_eq!(*solver.solution(), Grid::from_rows(EXAMPLE_EASY_SOLUTION));
    }

    #[test]
    fn solved_grids_are_valid_and_keep_the_givens() {
        let clue = Grid::from_rows(EXAMPLE_EASY);
        let mut solver = Solver::new(clue);
        assert!(solver.solve());

        let solution = solver.solution();
        assert!(solution.is_solved());
        for row in 0..DIMENSION {
            for col in 0..DIMENSION {
                if clue[(row, col)] != BLANK {
                    assert_eq!(clue[(row, col)], solution[(row, col)]);
                }
            }
        }
    }

    #[test]
    fn empty_grid_solves() {
        let mut solver = Solver::new(Grid::new());
        assert!(solver.solve());
        assert!(solver.solution().is_solved());
    }

    #[test]
    fn search_is_deterministic() {
        let mut first = Solver::new(Grid::new());
        let mut second = Solver::new(Grid::new());
        assert!(first.solve());
        assert!(second.solve());
        assert_eq!(first.solution(), second.solution());

        let mut first = Solver::new(Grid::from_rows(EXAMPLE_EASY));
        let mut second = Solver::new(Grid::from_rows(EXAMPLE_EASY));
        assert!(first.solve());
        assert!(second.solve());
        assert_eq!(first.solution(), second.solution());
    }

    #[test]
    fn already_solved_grid_succeeds_unchanged() {
        let clue = {
            let mut solver = Solver::new(Grid::from_rows(EXAMPLE_EASY));
            assert!(solver.solve());
            *solver.solution()
        };

        let mut solver = Solver::new(clue);
        assert!(solver.solve());
        assert_eq!(*solver.solution(), clue);
        // Nothing was blank, so nothing was placed.
        assert_eq!(solver.stats(), SearchStats::default());
    }

    #[test]
    fn unsatisfiable_grid_reports_failure_and_resets() {
        let clue = Grid::from_rows(NO_CANDIDATE);
        assert!(clue.is_consistent());

        let mut solver = Solver::new(clue);
        assert!(!solver.solve());
        // Every failure branch resets its cell, so no progress survives.
        assert_eq!(*solver.solution(), clue);
        assert_eq!(solver.stats().placements, solver.stats().backtracks);
    }

    #[test]
    fn stats_count_the_work() {
        let clue = Grid::from_rows(EXAMPLE_EASY);
        let blanks = 81 - clue.len();
        let mut solver = Solver::new(clue);
        assert!(solver.solve());

        let stats = solver.stats();
        // One surviving placement per blank cell, plus one per backtrack.
        assert_eq!(stats.placements, blanks + stats.backtracks);
    }

    #[test]
    fn clue_grid_is_never_modified() {
        let clue = Grid::from_rows(EXAMPLE_EASY);
        let mut solver = Solver::new(clue);
        assert!(solver.solve());
        assert_eq!(*solver.clue(), clue);

        let mut solver = Solver::new(Grid::from_rows(NO_CANDIDATE));
        assert!(!solver.solve());
        assert_eq!(*solver.clue(), Grid::from_rows(NO_CANDIDATE));
    }
}
