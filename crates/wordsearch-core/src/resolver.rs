//! Drag-selection geometry and word matching.
//!
//! A selection is just a pair of grid coordinates. [`line_between`] turns the
//! pair into the straight path it covers, and [`resolve`] decides whether that
//! path spells one of the puzzle's words. Anything geometrically invalid is
//! simply not a match; the caller never has to pre-check input.

use crate::{Coordinate, Match, Puzzle};
use std::collections::HashSet;

/// Every cell on the straight line from `start` to `end`, inclusive.
///
/// Returns an empty vector when the endpoints do not lie on a horizontal,
/// vertical, or 45-degree diagonal line. A selection of a single cell is the
/// one-element path.
pub fn line_between(start: Coordinate, end: Coordinate) -> Vec<Coordinate> {
    let row_diff = end.row as isize - start.row as isize;
    let col_diff = end.col as isize - start.col as isize;

    if row_diff != 0 && col_diff != 0 && row_diff.abs() != col_diff.abs() {
        return Vec::new();
    }

    let steps = row_diff.abs().max(col_diff.abs());
    let row_step = row_diff.signum();
    let col_step = col_diff.signum();

    (0..=steps)
        .map(|i| {
            Coordinate::new(
                (start.row as isize + i * row_step) as usize,
                (start.col as isize + i * col_step) as usize,
            )
        })
        .collect()
}

/// Decide whether the selection from `start` to `end` finds a word.
///
/// A placement matches when the selection's letters spell its word forward or
/// reversed, and the selection's endpoints are exactly the placement's
/// endpoints in either order. The endpoint check keeps a selection that
/// happens to spell a word somewhere else on the board from counting. Words
/// whose ids are in `found` are not reported again.
pub fn resolve(
    puzzle: &Puzzle,
    start: Coordinate,
    end: Coordinate,
    found: &HashSet<String>,
) -> Option<Match> {
    let path = line_between(start, end);
    if path.is_empty() {
        return None;
    }

    let selected = match puzzle.grid.read_along(&path) {
        Some(letters) => letters,
        None => return None,
    };
    let selected_reversed: String = selected.chars().rev().collect();

    for placement in &puzzle.placements {
        if found.contains(&placement.spec.id) {
            continue;
        }
        let spells = selected == placement.spec.word || selected_reversed == placement.spec.word;
        let same_line = (start == placement.start && end == placement.end)
            || (start == placement.end && end == placement.start);
        if spells && same_line {
            return Some(Match::from(placement));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grid, Placement, WordSpec};

    // L O V E
    // X X X X
    // L O V E
    // X X X X
    //
    // Row 0 is the real placement; row 2 spells the same word by chance.
    fn love_puzzle() -> Puzzle {
        let grid = Grid::from_rows(&["LOVE", "XXXX", "LOVE", "XXXX"]).unwrap();
        let placements = vec![Placement {
            spec: WordSpec::new("LOVE", "final_verb"),
            start: Coordinate::new(0, 0),
            end: Coordinate::new(0, 3),
        }];
        Puzzle::new(grid, placements, Vec::new())
    }

    fn no_found() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn line_covers_all_four_orientations() {
        let horizontal = line_between(Coordinate::new(2, 0), Coordinate::new(2, 3));
        assert_eq!(horizontal.len(), 4);
        assert_eq!(horizontal[1], Coordinate::new(2, 1));

        let vertical = line_between(Coordinate::new(0, 2), Coordinate::new(3, 2));
        assert_eq!(vertical.len(), 4);
        assert_eq!(vertical[2], Coordinate::new(2, 2));

        let down_right = line_between(Coordinate::new(0, 0), Coordinate::new(3, 3));
        assert_eq!(down_right[1], Coordinate::new(1, 1));

        let down_left = line_between(Coordinate::new(0, 3), Coordinate::new(3, 0));
        assert_eq!(down_left[1], Coordinate::new(1, 2));
    }

    #[test]
    fn line_runs_in_either_endpoint_order() {
        let forward = line_between(Coordinate::new(1, 1), Coordinate::new(1, 4));
        let backward = line_between(Coordinate::new(1, 4), Coordinate::new(1, 1));
        let mut reversed = backward.clone();
        reversed.reverse();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn bent_line_is_empty() {
        assert!(line_between(Coordinate::new(0, 0), Coordinate::new(1, 3)).is_empty());
        assert!(line_between(Coordinate::new(2, 5), Coordinate::new(4, 6)).is_empty());
    }

    #[test]
    fn single_cell_is_its_own_line() {
        let at = Coordinate::new(3, 3);
        assert_eq!(line_between(at, at), vec![at]);
    }

    #[test]
    fn exact_selection_matches() {
        let puzzle = love_puzzle();
        let found = resolve(
            &puzzle,
            Coordinate::new(0, 0),
            Coordinate::new(0, 3),
            &no_found(),
        );
        assert_eq!(
            found,
            Some(Match {
                word: "LOVE".to_string(),
                id: "final_verb".to_string()
            })
        );
    }

    #[test]
    fn swapped_endpoints_still_match() {
        let puzzle = love_puzzle();
        let found = resolve(
            &puzzle,
            Coordinate::new(0, 3),
            Coordinate::new(0, 0),
            &no_found(),
        );
        assert!(found.is_some());
    }

    #[test]
    fn resolving_twice_gives_the_same_answer() {
        let puzzle = love_puzzle();
        let start = Coordinate::new(0, 0);
        let end = Coordinate::new(0, 3);
        let first = resolve(&puzzle, start, end, &no_found());
        let second = resolve(&puzzle, start, end, &no_found());
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn chance_spelling_elsewhere_does_not_match() {
        // Row 2 spells LOVE but is not where the word was placed.
        let puzzle = love_puzzle();
        let found = resolve(
            &puzzle,
            Coordinate::new(2, 0),
            Coordinate::new(2, 3),
            &no_found(),
        );
        assert_eq!(found, None);
    }

    #[test]
    fn partial_overlap_of_the_placement_does_not_match() {
        let puzzle = love_puzzle();
        let found = resolve(
            &puzzle,
            Coordinate::new(0, 0),
            Coordinate::new(0, 2),
            &no_found(),
        );
        assert_eq!(found, None);
    }

    #[test]
    fn bent_selection_does_not_match() {
        let puzzle = love_puzzle();
        let found = resolve(
            &puzzle,
            Coordinate::new(0, 0),
            Coordinate::new(2, 3),
            &no_found(),
        );
        assert_eq!(found, None);
    }

    #[test]
    fn out_of_bounds_selection_does_not_match() {
        let puzzle = love_puzzle();
        let found = resolve(
            &puzzle,
            Coordinate::new(0, 0),
            Coordinate::new(0, 9),
            &no_found(),
        );
        assert_eq!(found, None);
    }

    #[test]
    fn found_words_are_not_reported_again() {
        let puzzle = love_puzzle();
        let mut found = HashSet::new();
        found.insert("final_verb".to_string());
        let again = resolve(
            &puzzle,
            Coordinate::new(0, 0),
            Coordinate::new(0, 3),
            &found,
        );
        assert_eq!(again, None);
    }

    #[test]
    fn reversed_layout_matches_the_forward_word() {
        // The word was laid right-to-left, so the grid reads EVOL; selecting
        // its line in either direction still finds LOVE.
        let grid = Grid::from_rows(&["EVOL", "XXXX", "XXXX", "XXXX"]).unwrap();
        let placements = vec![Placement {
            spec: WordSpec::new("LOVE", "final_verb"),
            start: Coordinate::new(0, 0),
            end: Coordinate::new(0, 3),
        }];
        let puzzle = Puzzle::new(grid, placements, Vec::new());

        for (a, b) in [
            (Coordinate::new(0, 0), Coordinate::new(0, 3)),
            (Coordinate::new(0, 3), Coordinate::new(0, 0)),
        ] {
            assert!(resolve(&puzzle, a, b, &no_found()).is_some());
        }
    }
}
