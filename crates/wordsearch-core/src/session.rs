//! A play session: one puzzle plus the words found so far.

use crate::{resolver, Coordinate, Match, Puzzle};
use std::collections::HashSet;

/// What a selection did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The selection found this word; it is now recorded.
    Found(Match),
    /// The selection was a valid hit on a word already found.
    AlreadyFound,
    /// The selection hit nothing.
    NoMatch,
}

/// Tracks found words over an immutable [`Puzzle`].
///
/// The session is the mutable layer the front ends drive: feed it the two
/// endpoints of each drag and render from [`found`](Self::found) and
/// [`found_cells`](Self::found_cells).
pub struct Session {
    puzzle: Puzzle,
    found: Vec<Match>,
}

impl Session {
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            found: Vec::new(),
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Apply one drag selection.
    pub fn select(&mut self, start: Coordinate, end: Coordinate) -> SelectionOutcome {
        let found_ids: HashSet<String> = self.found.iter().map(|hit| hit.id.clone()).collect();
        if let Some(hit) = resolver::resolve(&self.puzzle, start, end, &found_ids) {
            self.found.push(hit.clone());
            return SelectionOutcome::Found(hit);
        }
        // Nothing new: either a repeat of a found word or a plain miss
        if resolver::resolve(&self.puzzle, start, end, &HashSet::new()).is_some() {
            SelectionOutcome::AlreadyFound
        } else {
            SelectionOutcome::NoMatch
        }
    }

    /// Words found so far, in find order.
    pub fn found(&self) -> &[Match] {
        &self.found
    }

    pub fn found_word(&self, id: &str) -> bool {
        self.found.iter().any(|hit| hit.id == id)
    }

    /// (found, total placed) word counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.found.len(), self.puzzle.placements.len())
    }

    /// True once every placed word has been found.
    pub fn is_complete(&self) -> bool {
        self.found.len() == self.puzzle.placements.len()
    }

    /// Every cell covered by a found word, for highlighting.
    pub fn found_cells(&self) -> HashSet<Coordinate> {
        let mut cells = HashSet::new();
        for hit in &self.found {
            if let Some(placement) = self.puzzle.placement(&hit.id) {
                cells.extend(placement.span());
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Generator, Grid, Placement, Story, WordSpec};

    fn two_word_puzzle() -> Puzzle {
        let grid = Grid::from_rows(&["LOVE", "XXXX", "HELP", "XXXX"]).unwrap();
        let placements = vec![
            Placement {
                spec: WordSpec::new("LOVE", "final_verb"),
                start: Coordinate::new(0, 0),
                end: Coordinate::new(0, 3),
            },
            Placement {
                spec: WordSpec::new("HELP", "help"),
                start: Coordinate::new(2, 0),
                end: Coordinate::new(2, 3),
            },
        ];
        Puzzle::new(grid, placements, Vec::new())
    }

    #[test]
    fn finding_words_advances_progress() {
        let mut session = Session::new(two_word_puzzle());
        assert_eq!(session.progress(), (0, 2));
        assert!(!session.is_complete());

        let outcome = session.select(Coordinate::new(0, 0), Coordinate::new(0, 3));
        assert_eq!(
            outcome,
            SelectionOutcome::Found(Match {
                word: "LOVE".to_string(),
                id: "final_verb".to_string()
            })
        );
        assert_eq!(session.progress(), (1, 2));

        session.select(Coordinate::new(2, 3), Coordinate::new(2, 0));
        assert_eq!(session.progress(), (2, 2));
        assert!(session.is_complete());
    }

    #[test]
    fn repeated_selection_reports_already_found() {
        let mut session = Session::new(two_word_puzzle());
        session.select(Coordinate::new(0, 0), Coordinate::new(0, 3));
        let again = session.select(Coordinate::new(0, 0), Coordinate::new(0, 3));
        assert_eq!(again, SelectionOutcome::AlreadyFound);
        assert_eq!(session.found().len(), 1);
    }

    #[test]
    fn duplicate_words_on_one_line_are_found_one_at_a_time() {
        // Same-letter crossings let a repeated word land on the exact same
        // cells; each id still has to be discoverable.
        let grid = Grid::from_rows(&["LOVE", "XXXX", "XXXX", "XXXX"]).unwrap();
        let placements = vec![
            Placement {
                spec: WordSpec::new("LOVE", "final_verb"),
                start: Coordinate::new(0, 0),
                end: Coordinate::new(0, 3),
            },
            Placement {
                spec: WordSpec::new("LOVE", "encore"),
                start: Coordinate::new(0, 0),
                end: Coordinate::new(0, 3),
            },
        ];
        let mut session = Session::new(Puzzle::new(grid, placements, Vec::new()));

        let endpoints = (Coordinate::new(0, 0), Coordinate::new(0, 3));
        assert!(matches!(
            session.select(endpoints.0, endpoints.1),
            SelectionOutcome::Found(Match { ref id, .. }) if id == "final_verb"
        ));
        assert!(matches!(
            session.select(endpoints.0, endpoints.1),
            SelectionOutcome::Found(Match { ref id, .. }) if id == "encore"
        ));
        assert_eq!(
            session.select(endpoints.0, endpoints.1),
            SelectionOutcome::AlreadyFound
        );
        assert!(session.is_complete());
    }

    #[test]
    fn stray_selection_changes_nothing() {
        let mut session = Session::new(two_word_puzzle());
        let outcome = session.select(Coordinate::new(1, 0), Coordinate::new(1, 3));
        assert_eq!(outcome, SelectionOutcome::NoMatch);
        assert!(session.found().is_empty());
    }

    #[test]
    fn found_cells_cover_exactly_the_found_words() {
        let mut session = Session::new(two_word_puzzle());
        session.select(Coordinate::new(0, 0), Coordinate::new(0, 3));
        let cells = session.found_cells();
        assert_eq!(cells.len(), 4);
        assert!(cells.contains(&Coordinate::new(0, 2)));
        assert!(!cells.contains(&Coordinate::new(2, 2)));
    }

    #[test]
    fn generated_puzzle_plays_to_completion() {
        let story = Story::reference();
        let mut generator = Generator::with_seed(11);
        let puzzle = generator.generate(&story.words, story.grid_size).unwrap();
        let targets: Vec<(Coordinate, Coordinate)> = puzzle
            .placements
            .iter()
            .map(|p| (p.start, p.end))
            .collect();

        let mut session = Session::new(puzzle);
        for (start, end) in targets {
            assert!(matches!(
                session.select(start, end),
                SelectionOutcome::Found(_)
            ));
        }
        assert!(session.is_complete());
    }
}
