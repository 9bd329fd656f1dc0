use crate::animations::FinaleScreen;
use crate::keepsake::Keepsake;
use crate::theme::{Theme, ThemeKind};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use std::time::Duration;
use wordsearch_core::{
    line_between, Coordinate, GenerateError, Generator, SelectionOutcome, Session, Story, WordSpec,
};

/// Result of handling an input event
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Completion overlay with the closing lines
    Finale,
    /// Keepsake view: answers and the final note
    Summary,
}

/// Which panel keyboard input goes to while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Grid,
    Hints,
}

/// Modal prompt asking one word's unlock question
pub struct AnswerPrompt {
    pub id: String,
    pub question: String,
    pub input: String,
    pub error: Option<String>,
}

/// The main application state
pub struct App {
    /// Story content driving this playthrough
    pub story: Story,
    /// Engine session: puzzle plus found words
    pub session: Session,
    /// Active theme
    pub theme: Theme,
    pub theme_kind: ThemeKind,
    /// Currently selected cell
    pub cursor: Coordinate,
    /// First endpoint of an in-progress selection
    pub anchor: Option<Coordinate>,
    /// Which panel has keyboard focus
    pub focus: Focus,
    /// Selected entry in the hint panel (indexes unfound words)
    pub hint_selection: usize,
    /// Open unlock prompt, if any
    pub prompt: Option<AnswerPrompt>,
    /// Persisted answers and note
    pub keepsake: Keepsake,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Finale animation
    pub finale_screen: FinaleScreen,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Scroll offset in the summary answer list
    pub summary_scroll: usize,
    /// Note editor buffer on the summary screen, when open
    pub note_input: Option<String>,
    /// Top-left terminal position of the grid box, recorded by the renderer
    /// so mouse positions can be mapped back to cells
    pub grid_origin: (u16, u16),
    /// Whether a mouse drag is in progress
    dragging: bool,
    /// Whether the finale has already been shown for this board
    finale_shown: bool,
    /// Skip keepsake reads and writes
    no_save: bool,
}

impl App {
    pub fn new(
        story: Story,
        seed: Option<u64>,
        theme_kind: ThemeKind,
        no_save: bool,
    ) -> Result<Self, GenerateError> {
        let mut generator = match seed {
            Some(seed) => Generator::with_seed(seed),
            None => Generator::new(),
        };
        let puzzle = generator.generate(&story.words, story.grid_size)?;
        let unplaced = puzzle.unplaced().len();

        let keepsake = if no_save {
            Keepsake::default()
        } else {
            Keepsake::load()
        };

        let center = story.grid_size / 2;
        let mut app = Self {
            story,
            session: Session::new(puzzle),
            theme: theme_kind.theme(),
            theme_kind,
            cursor: Coordinate::new(center, center),
            anchor: None,
            focus: Focus::Grid,
            hint_selection: 0,
            prompt: None,
            keepsake,
            screen_state: ScreenState::Playing,
            finale_screen: FinaleScreen::new(),
            message: None,
            message_timer: 0,
            summary_scroll: 0,
            note_input: None,
            grid_origin: (0, 0),
            dragging: false,
            finale_shown: false,
            no_save,
        };
        if unplaced > 0 {
            app.show_message(&unplaced_notice(unplaced));
        }
        Ok(app)
    }

    /// Get the tick rate based on current screen
    pub fn get_tick_rate(&self) -> Duration {
        match self.screen_state {
            ScreenState::Finale => Duration::from_millis(33), // 30 FPS for the animation
            ScreenState::Playing | ScreenState::Summary => Duration::from_millis(100),
        }
    }

    /// Update animations and timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        match self.screen_state {
            ScreenState::Finale => {
                self.finale_screen.update();
            }
            ScreenState::Playing => {
                if self.session.is_complete() && !self.finale_shown {
                    self.finale_shown = true;
                    self.finale_screen.reset();
                    self.screen_state = ScreenState::Finale;
                }
            }
            ScreenState::Summary => {}
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Words whose hints still matter: everything not yet found, story order
    pub fn hint_entries(&self) -> Vec<&WordSpec> {
        self.story
            .words
            .iter()
            .filter(|spec| !self.session.found_word(&spec.id))
            .collect()
    }

    /// Cells the in-progress selection covers, for highlighting. A bent
    /// selection collapses to just the anchor.
    pub fn selection_cells(&self) -> Vec<Coordinate> {
        match self.anchor {
            Some(anchor) => {
                let path = line_between(anchor, self.cursor);
                if path.is_empty() {
                    vec![anchor]
                } else {
                    path
                }
            }
            None => Vec::new(),
        }
    }

    /// Map a terminal position to a grid cell, using the origin the renderer
    /// recorded. Cells are drawn three columns wide.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Coordinate> {
        let (gx, gy) = self.grid_origin;
        let size = self.session.puzzle().grid.size() as u16;
        if column <= gx || row <= gy {
            return None;
        }
        let cell_col = (column - gx - 1) / 3;
        let cell_row = row - gy - 1;
        if cell_row < size && cell_col < size {
            Some(Coordinate::new(cell_row as usize, cell_col as usize))
        } else {
            None
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Finale => self.handle_finale_key(key),
            ScreenState::Summary => self.handle_summary_key(key),
            ScreenState::Playing => {
                if self.prompt.is_some() {
                    self.handle_prompt_key(key)
                } else {
                    match self.focus {
                        Focus::Grid => self.handle_grid_key(key),
                        Focus::Hints => self.handle_hints_key(key),
                    }
                }
            }
        }
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Finale => {
                if matches!(mouse.kind, MouseEventKind::Up(_)) {
                    self.enter_summary();
                }
            }
            ScreenState::Summary => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.summary_scroll = self.summary_scroll.saturating_sub(1);
                }
                MouseEventKind::ScrollDown => {
                    let max = self.keepsake.answers.len().saturating_sub(1);
                    self.summary_scroll = (self.summary_scroll + 1).min(max);
                }
                _ => {}
            },
            ScreenState::Playing => {
                if self.prompt.is_some() {
                    return AppAction::Continue;
                }
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        if let Some(cell) = self.cell_at(mouse.column, mouse.row) {
                            self.focus = Focus::Grid;
                            self.anchor = Some(cell);
                            self.cursor = cell;
                            self.dragging = true;
                        }
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        if self.dragging {
                            if let Some(cell) = self.cell_at(mouse.column, mouse.row) {
                                self.cursor = cell;
                            }
                        }
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        if self.dragging {
                            self.dragging = false;
                            self.confirm_selection();
                        }
                    }
                    _ => {}
                }
            }
        }
        AppAction::Continue
    }

    fn handle_grid_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),

            // Anchor, then confirm, with the same key
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.anchor.is_none() {
                    self.anchor = Some(self.cursor);
                } else {
                    self.confirm_selection();
                }
            }

            KeyCode::Esc => {
                self.anchor = None;
            }

            // Hint panel
            KeyCode::Tab | KeyCode::Char('?') => {
                self.focus = Focus::Hints;
                self.clamp_hint_selection();
            }

            // New board
            KeyCode::Char('n') => self.new_board(),

            // Theme cycle
            KeyCode::Char('t') => {
                self.theme_kind = self.theme_kind.next();
                self.theme = self.theme_kind.theme();
                self.show_message(&format!("{} theme", self.theme_kind.name()));
            }

            _ => {}
        }
        AppAction::Continue
    }

    fn handle_hints_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            KeyCode::Up | KeyCode::Char('k') => {
                self.hint_selection = self.hint_selection.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.hint_entries().len().saturating_sub(1);
                self.hint_selection = (self.hint_selection + 1).min(max);
            }

            KeyCode::Enter | KeyCode::Char(' ') => self.open_prompt(),

            KeyCode::Tab | KeyCode::Esc => {
                self.focus = Focus::Grid;
            }

            _ => {}
        }
        AppAction::Continue
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc => {
                self.prompt = None;
            }
            KeyCode::Enter => self.submit_prompt(),
            KeyCode::Backspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.pop();
                    prompt.error = None;
                }
            }
            KeyCode::Char(c) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    if !c.is_control() && prompt.input.chars().count() < 80 {
                        prompt.input.push(c);
                        prompt.error = None;
                    }
                }
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_finale_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => AppAction::Quit,
            _ => {
                self.enter_summary();
                AppAction::Continue
            }
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) -> AppAction {
        if self.note_input.is_some() {
            match key.code {
                KeyCode::Esc => {
                    self.note_input = None;
                }
                KeyCode::Enter => self.save_note(),
                KeyCode::Backspace => {
                    if let Some(note) = self.note_input.as_mut() {
                        note.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(note) = self.note_input.as_mut() {
                        if !c.is_control() && note.chars().count() < 200 {
                            note.push(c);
                        }
                    }
                }
                _ => {}
            }
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Esc => {
                // Back to the (finished) board
                self.screen_state = ScreenState::Playing;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.summary_scroll = self.summary_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.keepsake.answers.len().saturating_sub(1);
                self.summary_scroll = (self.summary_scroll + 1).min(max);
            }
            KeyCode::Char('e') => {
                self.note_input = Some(self.keepsake.note.clone().unwrap_or_default());
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn enter_summary(&mut self) {
        self.screen_state = ScreenState::Summary;
        self.summary_scroll = 0;
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let limit = self.session.puzzle().grid.size().saturating_sub(1) as i32;
        let new_row = (self.cursor.row as i32 + row_delta).clamp(0, limit) as usize;
        let new_col = (self.cursor.col as i32 + col_delta).clamp(0, limit) as usize;
        self.cursor = Coordinate::new(new_row, new_col);
    }

    fn confirm_selection(&mut self) {
        let anchor = match self.anchor.take() {
            Some(anchor) => anchor,
            None => return,
        };
        match self.session.select(anchor, self.cursor) {
            SelectionOutcome::Found(hit) => {
                let (found, total) = self.session.progress();
                self.show_message(&format!("You found {}! ({}/{})", hit.word, found, total));
                self.clamp_hint_selection();
            }
            SelectionOutcome::AlreadyFound => {
                self.show_message("Already found that one");
            }
            // Misses stay silent, like lifting a drag over nothing
            SelectionOutcome::NoMatch => {}
        }
    }

    fn clamp_hint_selection(&mut self) {
        let max = self.hint_entries().len().saturating_sub(1);
        self.hint_selection = self.hint_selection.min(max);
    }

    fn open_prompt(&mut self) {
        let opened = {
            let entries = self.hint_entries();
            match entries.get(self.hint_selection) {
                Some(spec) if !self.keepsake.is_unlocked(&spec.id) => {
                    self.story.hints.get(&spec.id).map(|hint| AnswerPrompt {
                        id: spec.id.clone(),
                        question: hint.question.clone(),
                        input: String::new(),
                        error: None,
                    })
                }
                _ => None,
            }
        };
        if opened.is_some() {
            self.prompt = opened;
        }
    }

    fn submit_prompt(&mut self) {
        let ready = match self.prompt.as_mut() {
            Some(prompt) => {
                if prompt.input.trim().chars().count() < 3 {
                    prompt.error =
                        Some("Please write a bit more... (at least 3 characters)".to_string());
                    false
                } else {
                    true
                }
            }
            None => false,
        };
        if !ready {
            return;
        }

        let prompt = match self.prompt.take() {
            Some(prompt) => prompt,
            None => return,
        };
        let word = match self.story.word(&prompt.id) {
            Some(spec) => spec.word.clone(),
            None => return,
        };
        self.keepsake
            .record_answer(&prompt.id, &word, &prompt.question, prompt.input.trim());
        self.save_keepsake();
        self.show_message("Hint unlocked");
    }

    fn save_note(&mut self) {
        let note = match self.note_input.take() {
            Some(note) => note,
            None => return,
        };
        self.keepsake.set_note(&note);
        self.save_keepsake();
        self.show_message("Note saved");
    }

    fn save_keepsake(&self) {
        if !self.no_save {
            self.keepsake.save();
        }
    }

    fn new_board(&mut self) {
        // Reshuffles draw fresh entropy even when the first board was seeded
        if let Ok(puzzle) = Generator::new().generate(&self.story.words, self.story.grid_size) {
            let unplaced = puzzle.unplaced().len();
            self.session = Session::new(puzzle);
            self.anchor = None;
            self.dragging = false;
            self.hint_selection = 0;
            self.finale_shown = false;
            self.screen_state = ScreenState::Playing;
            if unplaced > 0 {
                self.show_message(&unplaced_notice(unplaced));
            } else {
                self.show_message("New board");
            }
        }
    }
}

fn unplaced_notice(count: usize) -> String {
    format!(
        "{} word{} would not fit this time; press n to reshuffle",
        count,
        if count == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn test_app() -> App {
        App::new(Story::reference(), Some(4), ThemeKind::Rose, true).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keyboard_selection_finds_a_word() {
        let mut app = test_app();
        let placement = app.session.puzzle().placements[0].clone();

        app.cursor = placement.start;
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.anchor, Some(placement.start));

        app.cursor = placement.end;
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.anchor, None);
        assert!(app.session.found_word(&placement.spec.id));
    }

    #[test]
    fn escape_abandons_the_anchor() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.anchor.is_some());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.anchor.is_none());
    }

    #[test]
    fn mouse_drag_selects_like_the_keyboard() {
        let mut app = test_app();
        app.grid_origin = (10, 5);
        let placement = app.session.puzzle().placements[0].clone();

        let at = |cell: Coordinate| {
            // Inverse of cell_at: origin + border + 3 columns per cell
            (
                10 + 1 + cell.col as u16 * 3,
                5 + 1 + cell.row as u16,
            )
        };

        let (sx, sy) = at(placement.start);
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: sx,
            row: sy,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.anchor, Some(placement.start));

        let (ex, ey) = at(placement.end);
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: ex,
            row: ey,
            modifiers: KeyModifiers::NONE,
        });
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: ex,
            row: ey,
            modifiers: KeyModifiers::NONE,
        });

        assert!(app.session.found_word(&placement.spec.id));
    }

    #[test]
    fn prompt_rejects_short_answers() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Hints);

        app.handle_key(key(KeyCode::Enter));
        assert!(app.prompt.is_some());

        app.handle_key(key(KeyCode::Char('h')));
        app.handle_key(key(KeyCode::Char('i')));
        app.handle_key(key(KeyCode::Enter));
        let prompt = app.prompt.as_ref().unwrap();
        assert!(prompt.error.is_some());

        app.handle_key(key(KeyCode::Char('!')));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.prompt.is_none());

        let first_id = app.story.words[0].id.clone();
        assert!(app.keepsake.is_unlocked(&first_id));
        assert_eq!(
            app.keepsake.answer_for(&first_id).map(|a| a.answer.as_str()),
            Some("hi!")
        );
    }

    #[test]
    fn completion_flows_to_finale_then_summary() {
        let mut app = test_app();
        let targets: Vec<(Coordinate, Coordinate)> = app
            .session
            .puzzle()
            .placements
            .iter()
            .map(|p| (p.start, p.end))
            .collect();
        for (start, end) in targets {
            app.session.select(start, end);
        }
        assert!(app.session.is_complete());

        app.tick();
        assert_eq!(app.screen_state, ScreenState::Finale);

        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.screen_state, ScreenState::Summary);

        // Esc goes back to the finished board without re-triggering the finale
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen_state, ScreenState::Playing);
        app.tick();
        assert_eq!(app.screen_state, ScreenState::Playing);
    }

    #[test]
    fn hint_panel_skips_found_words() {
        let mut app = test_app();
        let placement = app.session.puzzle().placements[0].clone();
        app.session.select(placement.start, placement.end);

        let entries = app.hint_entries();
        assert_eq!(entries.len(), app.story.words.len() - 1);
        assert!(entries.iter().all(|spec| spec.id != placement.spec.id));
    }
}
