#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A loader for Sudoku puzzle files.
//!
//! The expected format is the classic one: 81 whitespace-separated digits in
//! row-major order, usually laid out as nine lines of nine digits. A digit
//! from `1..=9` is a given clue and `0` (or `.`) marks a blank cell.
//! Decoration characters are ignored, so pretty-printed grids load too.
//!
//! The loader performs the validation the solver itself does not (the
//! solver assumes well-formed input): it rejects inputs with the wrong
//! number of cells and clue sets that already repeat a digit within a row,
//! column, or box.

use super::grid::{Cell, Grid};
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// The ways loading a puzzle can fail.
#[derive(Debug)]
pub enum ParsePuzzleError {
    /// The source could not be read.
    Io(io::Error),
    /// The text did not contain exactly 81 cells.
    Malformed(String),
    /// The clues already violate a uniqueness constraint; the listed cells
    /// are the offending ones.
    InconsistentClues(SmallVec<[Cell; 8]>),
}

impl fmt::Display for ParsePuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read puzzle: {e}"),
            Self::Malformed(msg) => write!(f, "malformed puzzle: {msg}"),
            Self::InconsistentClues(cells) => {
                let cells = cells.iter().map(|(row, col)| format!("({row}, {col})")).join(", ");
                write!(f, "clues conflict at {cells}")
            }
        }
    }
}

impl std::error::Error for ParsePuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Malformed(_) | Self::InconsistentClues(_) => None,
        }
    }
}

impl From<io::Error> for ParsePuzzleError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parses a puzzle from a string.
///
/// # Errors
///
/// Returns [`ParsePuzzleError::Malformed`] when the text does not hold
/// exactly 81 cells, and [`ParsePuzzleError::InconsistentClues`] when the
/// given clues already repeat a digit within a row, column, or box.
pub fn parse_puzzle_text(text: &str) -> Result<Grid, ParsePuzzleError> {
    let grid: Grid = text.parse().map_err(ParsePuzzleError::Malformed)?;
    let conflicts = grid.conflicts();
    if conflicts.is_empty() {
        Ok(grid)
    } else {
        Err(ParsePuzzleError::InconsistentClues(conflicts))
    }
}

/// Parses a puzzle from any reader.
///
/// # Errors
///
/// Returns [`ParsePuzzleError::Io`] when the reader fails, plus everything
/// [`parse_puzzle_text`] rejects.
pub fn parse_puzzle<R: Read>(mut reader: R) -> Result<Grid, ParsePuzzleError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_puzzle_text(&text)
}

/// Parses a puzzle file.
///
/// This is a convenience function that opens the file, wraps it in a
/// `BufReader`, and calls [`parse_puzzle`].
///
/// # Errors
///
/// Returns [`ParsePuzzleError::Io`] when the file cannot be opened or read,
/// plus everything [`parse_puzzle_text`] rejects.
pub fn parse_puzzle_file<P: AsRef<Path>>(path: P) -> Result<Grid, ParsePuzzleError> {
    let file = File::open(path)?;
    parse_puzzle(BufReader::new(file))
}
