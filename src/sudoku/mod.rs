#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving Sudoku puzzles.

/// The `grid` module defines the 9x9 grid and its validity checks.
pub mod grid;

/// The `parser` module loads puzzles from text sources.
pub mod parser;

/// The `solver` module contains the backtracking search.
pub mod solver;
