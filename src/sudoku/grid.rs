#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The 9x9 Sudoku grid model.
//!
//! A [`Grid`] is a fixed 9x9 array of cell values in `0..=9`, where `0`
//! ([`BLANK`]) marks a blank cell and `1..=9` a placed digit. The type is a
//! plain value: it is `Copy`, indexed by `(row, col)` pairs, and carries the
//! uniqueness checks shared by the puzzle loader and the command-line
//! front end. The solver itself keeps its own constraint predicates and
//! never consults these.

use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Overall size of the grid (number of rows, columns, and boxes).
pub const DIMENSION: usize = 9;

/// Side length of one of the nine 3x3 boxes.
pub const REGION_DIM: usize = 3;

/// Cell value marking a blank position.
pub const BLANK: u8 = 0;

/// Total number of cells in a grid.
pub const CELL_COUNT: usize = DIMENSION * DIMENSION;

/// A pair of zero-based `(row, col)` coordinates.
pub type Cell = (usize, usize);

/// A 9x9 Sudoku grid in row-major order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid([[u8; DIMENSION]; DIMENSION]);

impl Grid {
    /// Makes an all-blank grid.
    #[must_use]
    pub const fn new() -> Self {
        Self([[BLANK; DIMENSION]; DIMENSION])
    }

    /// Makes a grid from an array of rows.
    ///
    /// The caller is responsible for keeping cell values in `0..=9`; see
    /// [`Grid::conflicts`] for detecting clue sets that already break the
    /// uniqueness rules.
    #[must_use]
    pub const fn from_rows(rows: [[u8; DIMENSION]; DIMENSION]) -> Self {
        Self(rows)
    }

    /// Returns the number of non-blank cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.iter().flatten().filter(|&&v| v != BLANK).count()
    }

    /// Tells whether every cell is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tells whether every cell holds a digit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.len() == CELL_COUNT
    }

    /// Iterates the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8; DIMENSION]> {
        self.0.iter()
    }

    /// Finds every cell that shares its digit with another cell in the same
    /// row, column, or box.
    ///
    /// Blank cells never conflict. The result is sorted and free of
    /// duplicates, so an empty result means the grid is consistent.
    #[must_use]
    pub fn conflicts(&self) -> SmallVec<[Cell; 8]> {
        let mut found: SmallVec<[Cell; 8]> = SmallVec::new();

        for unit in Self::units() {
            let mut where_seen: [Option<Cell>; DIMENSION] = [None; DIMENSION];
            for (row, col) in unit {
                let value = self.0[row][col];
                if value == BLANK {
                    continue;
                }
                let slot = &mut where_seen[(value - 1) as usize];
                if let Some(first) = *slot {
                    found.push(first);
                    found.push((row, col));
                } else {
                    *slot = Some((row, col));
                }
            }
        }

        found.into_iter().sorted_unstable().dedup().collect()
    }

    /// Tells whether no row, column, or box contains a repeated digit.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.conflicts().is_empty()
    }

    /// Tells whether this grid is a complete and valid Sudoku solution.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.is_complete() && self.is_consistent()
    }

    /// Returns the grid as 81 characters in row-major order, with `.` for
    /// blank cells.
    #[must_use]
    pub fn to_flat_string(&self) -> String {
        self.0
            .iter()
            .flatten()
            .map(|&v| cell_char(v))
            .collect()
    }

    /// Iterates the 27 units of the grid: 9 rows, 9 columns, 9 boxes.
    fn units() -> impl Iterator<Item = [Cell; DIMENSION]> {
        let rows = (0..DIMENSION).map(|row| {
            let unit: [Cell; DIMENSION] = std::array::from_fn(|col| (row, col));
            unit
        });
        let cols = (0..DIMENSION).map(|col| {
            let unit: [Cell; DIMENSION] = std::array::from_fn(|row| (row, col));
            unit
        });
        let boxes = (0..DIMENSION).map(|b| {
            let corner = (b / REGION_DIM * REGION_DIM, b % REGION_DIM * REGION_DIM);
            let unit: [Cell; DIMENSION] =
                std::array::from_fn(|i| (corner.0 + i / REGION_DIM, corner.1 + i % REGION_DIM));
            unit
        });
        rows.chain(cols).chain(boxes)
    }
}

const fn cell_char(value: u8) -> char {
    if value == BLANK {
        '.'
    } else {
        (b'0' + value) as char
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Cell> for Grid {
    type Output = u8;

    fn index(&self, (row, col): Cell) -> &u8 {
        &self.0[row][col]
    }
}

impl IndexMut<Cell> for Grid {
    fn index_mut(&mut self, (row, col): Cell) -> &mut u8 {
        &mut self.0[row][col]
    }
}

impl fmt::Display for Grid {
    /// Prints the grid framed into its nine boxes, with `.` for blank cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = "+---------+---------+---------+";
        writeln!(f, "{frame}")?;
        for (row_idx, row) in self.0.iter().enumerate() {
            write!(f, "|")?;
            for (col_idx, &value) in row.iter().enumerate() {
                write!(f, " {} ", cell_char(value))?;
                if col_idx % REGION_DIM == REGION_DIM - 1 {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;
            if row_idx % REGION_DIM == REGION_DIM - 1 {
                writeln!(f, "{frame}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Grid {
    type Err = String;

    /// Constructs a grid from a string containing exactly 81 cell
    /// characters, plus any amount of whitespace or decoration.
    ///
    /// A cell character is `1` through `9`, assigning that digit to the
    /// corresponding cell in row-major order, or `0` or `.`, leaving the
    /// cell blank. Whitespace-separated tokens made only of other
    /// characters (box frames, separators) are ignored, so both the
    /// original nine-lines-of-nine-digits file format and this type's own
    /// `Display` output parse back into the grid they describe.
    ///
    /// A token may hold one cell, one full row of cells, or the whole
    /// grid. Any other run of cell characters is rejected: `12` is an
    /// out-of-range value, not the cells `1` and `2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Self::new();
        let mut i = 0;
        for token in s.split_whitespace() {
            let cells = token.chars().filter(|&c| c == '.' || c.is_ascii_digit());
            match cells.clone().count() {
                0 => continue,
                1 | DIMENSION | CELL_COUNT => {}
                _ => return Err(format!("out-of-range token `{token}` in puzzle text")),
            }
            for c in cells {
                if i >= CELL_COUNT {
                    return Err(format!("more than {CELL_COUNT} cells in puzzle text"));
                }
                if c.is_ascii_digit() {
                    grid.0[i / DIMENSION][i % DIMENSION] = c as u8 - b'0';
                }
                i += 1;
            }
        }
        if i == CELL_COUNT {
            Ok(grid)
        } else {
            Err(format!("expected {CELL_COUNT} cells in puzzle text, found {i}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str =
        "123456789456789123789123456234567891567891234891234567345678912678912345912345678";

    #[test]
    fn new_grid_is_blank() {
        let grid = Grid::new();
        assert_eq!(grid.len(), 0);
        assert!(grid.is_empty());
        assert!(grid.is_consistent());
        assert!(!grid.is_complete());
    }

    #[test]
    fn index_round_trip() {
        let mut grid = Grid::new();
        grid[(4, 7)] = 5;
        assert_eq!(grid[(4, 7)], 5);
        assert_eq!(grid[(7, 4)], BLANK);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn rows_iterate_top_to_bottom() {
        let mut grid = Grid::new();
        grid[(0, 8)] = 1;
        grid[(8, 0)] = 9;
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), DIMENSION);
        assert_eq!(rows[0][8], 1);
        assert_eq!(rows[8][0], 9);
    }

    #[test]
    fn flat_string_round_trip() {
        let s = ".1..5..8.4.89.62.1..6...7....5.3.9.....8.7.....1.4.3....4...1..2.93.16.7.7..6..2.";
        let grid = s.parse::<Grid>().unwrap();
        assert_eq!(grid.to_flat_string(), s);
        assert!(grid.is_consistent());
    }

    #[test]
    fn display_round_trip() {
        let grid = SOLVED.parse::<Grid>().unwrap();
        let pretty = grid.to_string();
        assert_eq!(pretty.parse::<Grid>().unwrap(), grid);
    }

    #[test]
    fn display_format() {
        let grid = SOLVED.parse::<Grid>().unwrap();
        let expected = "\
+---------+---------+---------+
| 1  2  3 | 4  5  6 | 7  8  9 |
| 4  5  6 | 7  8  9 | 1  2  3 |
| 7  8  9 | 1  2  3 | 4  5  6 |
+---------+---------+---------+
| 2  3  4 | 5  6  7 | 8  9  1 |
| 5  6  7 | 8  9  1 | 2  3  4 |
| 8  9  1 | 2  3  4 | 5  6  7 |
+---------+---------+---------+
| 3  4  5 | 6  7  8 | 9  1  2 |
| 6  7  8 | 9  1  2 | 3  4  5 |
| 9  1  2 | 3  4  5 | 6  7  8 |
+---------+---------+---------+
";
        assert_eq!(grid.to_string(), expected);
    }

    #[test]
    fn rejects_short_and_long_input() {
        assert!("123".parse::<Grid>().is_err());
        let too_long = "0 ".repeat(CELL_COUNT + 1);
        assert!(too_long.parse::<Grid>().is_err());
    }

    #[test]
    fn rejects_out_of_range_tokens() {
        // 81 cells worth of text, but the first token is the value 12.
        let text = format!("12 {}", "0 ".repeat(CELL_COUNT - 2));
        let err = text.parse::<Grid>().unwrap_err();
        assert!(err.contains("`12`"));

        // A chunk that is neither a cell, a row, nor a whole grid.
        assert!("53007 ".repeat(20).parse::<Grid>().is_err());
    }

    #[test]
    fn accepts_row_sized_tokens() {
        let mut text = String::from("530070000\n");
        text.push_str(&"000000000\n".repeat(8));
        let grid = text.parse::<Grid>().unwrap();
        assert_eq!(grid[(0, 0)], 5);
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn solved_grid_is_solved() {
        let grid = SOLVED.parse::<Grid>().unwrap();
        assert!(grid.is_complete());
        assert!(grid.is_consistent());
        assert!(grid.is_solved());
    }

    #[test]
    fn duplicate_in_row_is_a_conflict() {
        let mut grid = Grid::new();
        grid[(0, 2)] = 5;
        grid[(0, 6)] = 5;
        assert!(!grid.is_consistent());
        assert_eq!(grid.conflicts().as_slice(), &[(0, 2), (0, 6)]);
    }

    #[test]
    fn duplicate_in_column_and_box_is_a_conflict() {
        let mut grid = Grid::new();
        grid[(1, 3)] = 9;
        grid[(7, 3)] = 9;
        assert_eq!(grid.conflicts().as_slice(), &[(1, 3), (7, 3)]);

        let mut grid = Grid::new();
        grid[(0, 0)] = 2;
        grid[(2, 2)] = 2;
        assert_eq!(grid.conflicts().as_slice(), &[(0, 0), (2, 2)]);
    }

    #[test]
    fn shared_row_and_box_conflict_reported_once() {
        let mut grid = Grid::new();
        grid[(3, 3)] = 4;
        grid[(3, 4)] = 4;
        // Same pair conflicts in both its row and its box.
        assert_eq!(grid.conflicts().as_slice(), &[(3, 3), (3, 4)]);
    }

    #[test]
    fn complete_but_inconsistent_is_not_solved() {
        let mut grid = SOLVED.parse::<Grid>().unwrap();
        grid[(0, 0)] = 9;
        assert!(grid.is_complete());
        assert!(!grid.is_solved());
    }
}
