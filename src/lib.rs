#![deny(missing_docs)]
//! This crate provides a brute-force backtracking solver for 9x9 Sudoku puzzles.

/// The `sudoku` module implements the grid model, the puzzle loader, and the
/// backtracking solver.
pub mod sudoku;
