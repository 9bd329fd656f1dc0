//! Core word-search engine.
//!
//! Two leaf services share this crate: a randomized [`Generator`] that lays
//! a fixed word list onto a square letter grid, and a pure selection
//! [`resolver`] that interprets a drag gesture's endpoints as a straight-line
//! path and matches it against the recorded placements. [`Session`] layers
//! the found-word bookkeeping on top so shells only render. Everything here
//! operates on grid coordinates; mapping screen pixels to cells belongs to
//! the presentation layer.

pub mod generator;
pub mod resolver;
pub mod session;
pub mod story;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use generator::{GenerateError, Generator, GeneratorConfig};
pub use resolver::{line_between, resolve};
pub use session::{SelectionOutcome, Session};
pub use story::{Finale, HintInfo, SentencePart, Story};

/// A cell coordinate on the letter grid. `(0, 0)` is the top-left corner.
/// Identity is structural.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One word to hide: uppercase ASCII letters plus the caller's stable id,
/// used to correlate a discovery with external meaning (e.g. which sentence
/// blank it fills).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSpec {
    pub word: String,
    pub id: String,
}

impl WordSpec {
    pub fn new(word: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            id: id.into(),
        }
    }
}

/// The recorded straight-line location of one placed word.
///
/// The path from `start` to `end` covers exactly `word.len()` cells and
/// spells the word or its character-reversal. Which of the two is never
/// stored: `start`/`end` reflect the laid-out direction, and matching
/// checks both readings at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub spec: WordSpec,
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Placement {
    /// Cells this word covers, re-derived from its endpoints.
    pub fn span(&self) -> Vec<Coordinate> {
        resolver::line_between(self.start, self.end)
    }
}

/// A successful selection: the discovered word and its caller-facing id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub word: String,
    pub id: String,
}

impl From<&Placement> for Match {
    fn from(placement: &Placement) -> Self {
        Self {
            word: placement.spec.word.clone(),
            id: placement.spec.id.clone(),
        }
    }
}

/// An immutable square board of uppercase letters, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<char>,
}

impl Grid {
    pub(crate) fn from_cells(size: usize, cells: Vec<char>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Build a grid from rows of letters. Returns `None` unless the rows
    /// form a non-empty square.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        if size == 0 {
            return None;
        }
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            if row.chars().count() != size {
                return None;
            }
            cells.extend(row.chars());
        }
        Some(Self { size, cells })
    }

    /// Grid dimension N (the board is N×N).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        at.row < self.size && at.col < self.size
    }

    /// Letter at a cell, or `None` out of bounds.
    pub fn letter(&self, at: Coordinate) -> Option<char> {
        if self.contains(at) {
            Some(self.cells[at.row * self.size + at.col])
        } else {
            None
        }
    }

    /// The string spelled along a path, or `None` if any step leaves the
    /// grid.
    pub fn read_along(&self, path: &[Coordinate]) -> Option<String> {
        path.iter().map(|&at| self.letter(at)).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.cells[row * self.size + col])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The output pair of one generation run: the finished grid plus where
/// every word landed. Immutable for the lifetime of the puzzle; a fresh
/// session gets a fresh generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub grid: Grid,
    pub placements: Vec<Placement>,
    unplaced: Vec<String>,
}

impl Puzzle {
    pub(crate) fn new(grid: Grid, placements: Vec<Placement>, unplaced: Vec<String>) -> Self {
        Self {
            grid,
            placements,
            unplaced,
        }
    }

    /// Ids of words that missed the placement budget. Best-effort policy:
    /// the rest of the puzzle is still usable, and callers that need every
    /// word present decide whether to regenerate.
    pub fn unplaced(&self) -> &[String] {
        &self.unplaced
    }

    /// True when every requested word landed on the board.
    pub fn all_words_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Placement of the word with this id, if it landed.
    pub fn placement(&self, id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.spec.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_requires_a_square() {
        assert!(Grid::from_rows(&["AB", "CD"]).is_some());
        assert!(Grid::from_rows(&[]).is_none());
        assert!(Grid::from_rows(&["ABC", "DE", "FGH"]).is_none());
        assert!(Grid::from_rows(&["AB", "CD", "EF"]).is_none());
    }

    #[test]
    fn letter_is_none_out_of_bounds() {
        let grid = Grid::from_rows(&["AB", "CD"]).unwrap();
        assert_eq!(grid.letter(Coordinate::new(0, 1)), Some('B'));
        assert_eq!(grid.letter(Coordinate::new(1, 0)), Some('C'));
        assert_eq!(grid.letter(Coordinate::new(2, 0)), None);
        assert_eq!(grid.letter(Coordinate::new(0, 2)), None);
    }

    #[test]
    fn read_along_fails_when_the_path_leaves_the_grid() {
        let grid = Grid::from_rows(&["AB", "CD"]).unwrap();
        let inside = [Coordinate::new(0, 0), Coordinate::new(0, 1)];
        let outside = [Coordinate::new(0, 1), Coordinate::new(0, 2)];
        assert_eq!(grid.read_along(&inside), Some("AB".to_string()));
        assert_eq!(grid.read_along(&outside), None);
    }

    #[test]
    fn display_renders_rows() {
        let grid = Grid::from_rows(&["AB", "CD"]).unwrap();
        assert_eq!(grid.to_string(), "A B\nC D\n");
    }

    #[test]
    fn placement_span_covers_the_word() {
        let placement = Placement {
            spec: WordSpec::new("LOVE", "final_verb"),
            start: Coordinate::new(0, 0),
            end: Coordinate::new(0, 3),
        };
        assert_eq!(placement.span().len(), 4);
        assert_eq!(placement.span()[0], Coordinate::new(0, 0));
        assert_eq!(placement.span()[3], Coordinate::new(0, 3));
    }

    #[test]
    fn puzzle_lookup_by_id() {
        let grid = Grid::from_rows(&["LOVE", "XXXX", "XXXX", "XXXX"]).unwrap();
        let placements = vec![Placement {
            spec: WordSpec::new("LOVE", "final_verb"),
            start: Coordinate::new(0, 0),
            end: Coordinate::new(0, 3),
        }];
        let puzzle = Puzzle::new(grid, placements, vec!["belief".to_string()]);
        assert!(puzzle.placement("final_verb").is_some());
        assert!(puzzle.placement("missing").is_none());
        assert!(!puzzle.all_words_placed());
        assert_eq!(puzzle.unplaced(), ["belief".to_string()]);
    }
}
