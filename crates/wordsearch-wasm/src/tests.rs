//! Tests for the WASM word-search game logic

#[cfg(test)]
mod tests {
    use crate::game::{GameState, ScreenState, ANSWERS_KEY, NOTE_KEY};
    use crate::render::layout;
    use wordsearch_core::{Coordinate, Story};

    /// localStorage survives between tests in one run; wipe it so every
    /// test starts from a fresh save.
    fn clear_saved() {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(ANSWERS_KEY);
            let _ = storage.remove_item(NOTE_KEY);
        }
    }

    fn new_game() -> GameState {
        clear_saved();
        GameState::new(Story::reference()).unwrap()
    }

    /// Drag every placement end to end
    fn complete_board(state: &mut GameState) {
        let endpoints: Vec<(Coordinate, Coordinate)> = state
            .session()
            .puzzle()
            .placements
            .iter()
            .map(|p| (p.start, p.end))
            .collect();
        for (start, end) in endpoints {
            state.begin_drag(start);
            state.extend_drag(end);
            state.end_drag();
        }
    }

    #[test]
    fn test_new_game_starts_playing() {
        let state = new_game();
        assert_eq!(state.screen(), ScreenState::Playing);
        assert!(!state.is_complete());
        assert_eq!(state.session().progress().0, 0);
        assert!(state.session().progress().1 > 0);
    }

    #[test]
    fn test_drag_selection_finds_a_placed_word() {
        let mut state = new_game();
        let placement = state.session().puzzle().placements[0].clone();

        state.begin_drag(placement.start);
        state.extend_drag(placement.end);
        state.end_drag();

        assert!(state.session().found_word(&placement.spec.id));
        assert!(state.message().is_some());
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_bent_drag_resolves_nothing() {
        let mut state = new_game();

        // (0,0) to (1,2) is neither straight nor diagonal
        state.begin_drag(Coordinate::new(0, 0));
        state.extend_drag(Coordinate::new(1, 2));
        state.end_drag();

        assert_eq!(state.session().progress().0, 0);
    }

    #[test]
    fn test_repeating_a_selection_reports_already_found() {
        let mut state = new_game();
        let placement = state.session().puzzle().placements[0].clone();

        state.begin_drag(placement.start);
        state.extend_drag(placement.end);
        state.end_drag();
        assert_eq!(state.session().progress().0, 1);

        state.begin_drag(placement.start);
        state.extend_drag(placement.end);
        state.end_drag();

        assert_eq!(state.session().progress().0, 1);
        assert_eq!(state.message(), Some("Already found that one"));
    }

    #[test]
    fn test_selection_highlight_follows_the_drag() {
        let mut state = new_game();

        state.begin_drag(Coordinate::new(2, 2));
        state.extend_drag(Coordinate::new(2, 5));
        assert_eq!(state.selection_cells().len(), 4);

        // A bent drag collapses the highlight to its anchor
        state.extend_drag(Coordinate::new(4, 3));
        assert_eq!(state.selection_cells(), vec![Coordinate::new(2, 2)]);

        state.end_drag();
        assert!(state.selection_cells().is_empty());
    }

    #[test]
    fn test_clicking_a_locked_hint_opens_the_prompt() {
        let mut state = new_game();

        state.click_hint(0);
        let question = state.prompt().map(|p| p.question.clone());
        assert!(question.is_some());

        // Escape closes it without unlocking
        state.handle_key("Escape");
        assert!(state.prompt().is_none());
    }

    #[test]
    fn test_short_answers_are_rejected() {
        let mut state = new_game();

        state.click_hint(0);
        state.handle_key("h");
        state.handle_key("i");
        state.handle_key("Enter");

        let prompt = state.prompt().expect("prompt should stay open");
        assert!(prompt.error.is_some());
    }

    #[test]
    fn test_a_real_answer_unlocks_the_hint() {
        let mut state = new_game();
        let first_id = state.hint_entries()[0].id.clone();

        state.click_hint(0);
        state.handle_key("h");
        state.handle_key("i");
        state.handle_key("!");
        state.handle_key("Enter");

        assert!(state.prompt().is_none());
        assert!(state.is_unlocked(&first_id));
        assert_eq!(state.message(), Some("Hint unlocked"));
    }

    #[test]
    fn test_finding_every_word_reaches_the_finale() {
        let mut state = new_game();
        complete_board(&mut state);
        assert!(state.is_complete());

        state.tick();
        assert_eq!(state.screen(), ScreenState::Finale);

        // Any key moves on to the summary
        state.handle_key("x");
        assert_eq!(state.screen(), ScreenState::Summary);

        // Escape goes back to the solved board
        state.handle_key("Escape");
        assert_eq!(state.screen(), ScreenState::Playing);

        // The finale does not retrigger
        state.tick();
        assert_eq!(state.screen(), ScreenState::Playing);
    }

    #[test]
    fn test_note_editing_on_the_summary() {
        let mut state = new_game();
        complete_board(&mut state);
        state.tick();
        state.handle_key("x");
        assert_eq!(state.screen(), ScreenState::Summary);

        state.handle_key("e");
        assert!(state.note_input().is_some());

        state.handle_key(" ");
        state.handle_key("o");
        state.handle_key("k");
        state.handle_key("Enter");

        assert!(state.note_input().is_none());
        let note = state.note().expect("note should be kept");
        assert!(note.contains("ok"));
    }

    #[test]
    fn test_layout_maps_pixels_to_cells() {
        let layout = layout(12, 1000, 36.0, 20.0);

        assert_eq!(
            layout.cell_at(41.0, 93.0, 12),
            Some(Coordinate::new(0, 0))
        );
        assert_eq!(
            layout.cell_at(41.0 + 36.0 * 3.0, 93.0 + 36.0, 12),
            Some(Coordinate::new(1, 3))
        );
        // Left of the grid
        assert_eq!(layout.cell_at(10.0, 120.0, 12), None);
        // Past the last row
        assert_eq!(layout.cell_at(41.0, 93.0 + 36.0 * 12.0, 12), None);
    }

    #[test]
    fn test_layout_maps_pixels_to_hint_rows() {
        let layout = layout(12, 1000, 36.0, 20.0);
        let x = layout.panel_x + 4.0;

        assert_eq!(layout.hint_at(x, layout.hints_y + 1.0, 11), Some(0));
        assert_eq!(
            layout.hint_at(x, layout.hints_y + layout.hint_entry_height * 2.0 + 1.0, 11),
            Some(2)
        );
        // Above the list
        assert_eq!(layout.hint_at(x, layout.hints_y - 30.0, 11), None);
        // Past the last entry
        assert_eq!(
            layout.hint_at(x, layout.hints_y + layout.hint_entry_height * 11.0, 11),
            None
        );
    }
}
