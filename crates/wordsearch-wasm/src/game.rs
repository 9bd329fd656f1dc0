//! Game state management for the canvas word search

use crate::animations::FinaleScreen;
use serde::{Deserialize, Serialize};
use wordsearch_core::{
    line_between, Coordinate, GenerateError, Generator, SelectionOutcome, Session, Story, WordSpec,
};

/// localStorage key for unlocked hint answers
pub(crate) const ANSWERS_KEY: &str = "wordsearch_answers";
/// localStorage key for the final note
pub(crate) const NOTE_KEY: &str = "wordsearch_note";

/// Screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Playing,
    Finale,
    Summary,
}

/// An answer written to unlock a hint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAnswer {
    pub id: String,
    pub word: String,
    pub question: String,
    pub answer: String,
}

/// The open unlock dialog
#[derive(Debug, Clone)]
pub struct Prompt {
    pub id: String,
    pub question: String,
    pub input: String,
    pub error: Option<String>,
}

/// The game state
pub struct GameState {
    /// The story being told
    story: Story,
    /// Puzzle plus found words
    session: Session,
    /// Screen state
    screen: ScreenState,
    /// First cell of the active drag
    drag_anchor: Option<Coordinate>,
    /// Latest cell of the active drag
    drag_cursor: Option<Coordinate>,
    /// Open unlock dialog
    prompt: Option<Prompt>,
    /// Answers written to unlock hints
    answers: Vec<StoredAnswer>,
    /// The final note, if written
    note: Option<String>,
    /// Note editing buffer on the summary screen
    note_input: Option<String>,
    /// Current message to display
    message: Option<String>,
    /// Message timer (ticks remaining)
    message_timer: u32,
    /// Animation frame counter
    frame: u32,
    /// Finale animation, created once the last word is found
    finale_screen: Option<FinaleScreen>,
}

impl GameState {
    /// Create a new game from a story
    pub fn new(story: Story) -> Result<Self, GenerateError> {
        let mut generator = Generator::new();
        let puzzle = generator.generate(&story.words, story.grid_size)?;
        let unplaced = puzzle.unplaced().len();

        let mut state = Self {
            story,
            session: Session::new(puzzle),
            screen: ScreenState::Playing,
            drag_anchor: None,
            drag_cursor: None,
            prompt: None,
            answers: Self::load_answers(),
            note: Self::load_note(),
            note_input: None,
            message: None,
            message_timer: 0,
            frame: 0,
            finale_screen: None,
        };

        if unplaced > 0 {
            state.show_message(&unplaced_notice(unplaced));
        }
        Ok(state)
    }

    /// Get current timestamp in milliseconds
    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// Update game state (called each frame)
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);

        // Update message timer
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        // The finale starts once, when the last word lands
        if self.screen == ScreenState::Playing
            && self.session.is_complete()
            && self.finale_screen.is_none()
        {
            self.screen = ScreenState::Finale;
            let seed = (Self::now() * 1000.0) as u64;
            self.finale_screen = Some(FinaleScreen::new(seed));
        }

        if let Some(ref mut finale) = self.finale_screen {
            finale.update();
        }
    }

    // Pointer handling. The controller maps pixel positions to cells
    // and hint rows before calling these.

    /// Start a drag on a grid cell
    pub fn begin_drag(&mut self, cell: Coordinate) {
        if self.screen != ScreenState::Playing || self.prompt.is_some() {
            return;
        }
        self.drag_anchor = Some(cell);
        self.drag_cursor = Some(cell);
    }

    /// Extend the active drag to another cell
    pub fn extend_drag(&mut self, cell: Coordinate) {
        if self.drag_anchor.is_some() {
            self.drag_cursor = Some(cell);
        }
    }

    /// Finish the drag and resolve it as a selection
    pub fn end_drag(&mut self) {
        let anchor = self.drag_anchor.take();
        let cursor = self.drag_cursor.take();

        if let (Some(anchor), Some(cursor)) = (anchor, cursor) {
            match self.session.select(anchor, cursor) {
                SelectionOutcome::Found(hit) => {
                    let (found, total) = self.session.progress();
                    self.show_message(&format!("You found {}! ({}/{})", hit.word, found, total));
                }
                SelectionOutcome::AlreadyFound => self.show_message("Already found that one"),
                SelectionOutcome::NoMatch => {}
            }
        }
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Cells under the current drag; a bent drag highlights only its anchor
    pub fn selection_cells(&self) -> Vec<Coordinate> {
        match (self.drag_anchor, self.drag_cursor) {
            (Some(anchor), Some(cursor)) => {
                let cells = line_between(anchor, cursor);
                if cells.is_empty() {
                    vec![anchor]
                } else {
                    cells
                }
            }
            _ => Vec::new(),
        }
    }

    /// Click on a hint row: locked hints open the unlock dialog
    pub fn click_hint(&mut self, index: usize) {
        if self.screen != ScreenState::Playing || self.prompt.is_some() {
            return;
        }
        let opened = {
            let entries = self.hint_entries();
            match entries.get(index) {
                Some(spec) if !self.is_unlocked(&spec.id) => {
                    self.story.hints.get(&spec.id).map(|info| Prompt {
                        id: spec.id.clone(),
                        question: info.question.clone(),
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

    /// Advance past the finale
    pub fn enter_summary(&mut self) {
        if self.screen == ScreenState::Finale {
            self.screen = ScreenState::Summary;
        }
    }

    /// Handle keyboard input, returns true if the key was consumed
    pub fn handle_key(&mut self, key: &str) -> bool {
        match self.screen {
            ScreenState::Finale => {
                self.enter_summary();
                true
            }
            ScreenState::Summary => self.handle_summary_key(key),
            ScreenState::Playing => self.handle_playing_key(key),
        }
    }

    fn handle_playing_key(&mut self, key: &str) -> bool {
        if self.prompt.is_some() {
            return self.handle_prompt_key(key);
        }
        match key {
            "n" => {
                self.new_board();
                true
            }
            _ => false,
        }
    }

    fn handle_prompt_key(&mut self, key: &str) -> bool {
        match key {
            "Escape" => {
                self.prompt = None;
                true
            }
            "Enter" => {
                self.submit_prompt();
                true
            }
            "Backspace" => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.pop();
                    prompt.error = None;
                }
                true
            }
            _ => match single_char(key) {
                Some(c) => {
                    if let Some(prompt) = self.prompt.as_mut() {
                        if prompt.input.chars().count() < 80 {
                            prompt.input.push(c);
                            prompt.error = None;
                        }
                    }
                    true
                }
                None => false,
            },
        }
    }

    fn handle_summary_key(&mut self, key: &str) -> bool {
        if self.note_input.is_some() {
            match key {
                "Escape" => self.note_input = None,
                "Enter" => self.save_note(),
                "Backspace" => {
                    if let Some(buffer) = self.note_input.as_mut() {
                        buffer.pop();
                    }
                }
                _ => match single_char(key) {
                    Some(c) => {
                        if let Some(buffer) = self.note_input.as_mut() {
                            if buffer.chars().count() < 200 {
                                buffer.push(c);
                            }
                        }
                    }
                    None => return false,
                },
            }
            return true;
        }

        match key {
            "e" => {
                self.note_input = Some(self.note.clone().unwrap_or_default());
                true
            }
            "Escape" => {
                self.screen = ScreenState::Playing;
                true
            }
            _ => false,
        }
    }

    fn submit_prompt(&mut self) {
        let too_short = self
            .prompt
            .as_ref()
            .map(|p| p.input.trim().chars().count() < 3)
            .unwrap_or(true);
        if too_short {
            if let Some(prompt) = self.prompt.as_mut() {
                prompt.error =
                    Some("Please write a bit more... (at least 3 characters)".to_string());
            }
            return;
        }

        if let Some(prompt) = self.prompt.take() {
            let word = self
                .story
                .word(&prompt.id)
                .map(|spec| spec.word.clone())
                .unwrap_or_default();
            self.answers.retain(|a| a.id != prompt.id);
            self.answers.push(StoredAnswer {
                id: prompt.id,
                word,
                question: prompt.question,
                answer: prompt.input.trim().to_string(),
            });
            self.save_answers();
            self.show_message("Hint unlocked");
        }
    }

    fn save_note(&mut self) {
        if let Some(buffer) = self.note_input.take() {
            let trimmed = buffer.trim();
            self.note = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            };
            self.persist_note();
            self.show_message("Note saved");
        }
    }

    /// Reshuffle the board; found words start over, unlocked answers stay
    pub fn new_board(&mut self) {
        let mut generator = Generator::new();
        if let Ok(puzzle) = generator.generate(&self.story.words, self.story.grid_size) {
            let unplaced = puzzle.unplaced().len();
            self.session = Session::new(puzzle);
            self.drag_anchor = None;
            self.drag_cursor = None;
            self.prompt = None;
            self.finale_screen = None;
            self.screen = ScreenState::Playing;
            if unplaced > 0 {
                self.show_message(&unplaced_notice(unplaced));
            } else {
                self.show_message("New board");
            }
        }
    }

    fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 90; // ~3 seconds at 30fps
    }

    // Storage. Missing window or storage degrades to in-memory state.

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    fn load_answers() -> Vec<StoredAnswer> {
        Self::storage()
            .and_then(|s| s.get_item(ANSWERS_KEY).ok().flatten())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    fn save_answers(&self) {
        if let Some(storage) = Self::storage() {
            if let Ok(json) = serde_json::to_string(&self.answers) {
                let _ = storage.set_item(ANSWERS_KEY, &json);
            }
        }
    }

    fn load_note() -> Option<String> {
        Self::storage()
            .and_then(|s| s.get_item(NOTE_KEY).ok().flatten())
            .filter(|note| !note.is_empty())
    }

    fn persist_note(&self) {
        if let Some(storage) = Self::storage() {
            match self.note.as_ref() {
                Some(note) => {
                    let _ = storage.set_item(NOTE_KEY, note);
                }
                None => {
                    let _ = storage.remove_item(NOTE_KEY);
                }
            }
        }
    }

    // Getters
    pub fn story(&self) -> &Story {
        &self.story
    }
    pub fn session(&self) -> &Session {
        &self.session
    }
    pub fn screen(&self) -> ScreenState {
        self.screen
    }
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }
    pub fn answers(&self) -> &[StoredAnswer] {
        &self.answers
    }
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
    pub fn note_input(&self) -> Option<&str> {
        self.note_input.as_deref()
    }
    pub fn frame(&self) -> u32 {
        self.frame
    }
    pub fn finale_screen(&self) -> Option<&FinaleScreen> {
        self.finale_screen.as_ref()
    }

    /// Words not yet found, in story order
    pub fn hint_entries(&self) -> Vec<&WordSpec> {
        self.story
            .words
            .iter()
            .filter(|spec| !self.session.found_word(&spec.id))
            .collect()
    }

    /// Whether a hint has been unlocked by answering its question
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.answers.iter().any(|a| a.id == id)
    }

    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }
}

fn unplaced_notice(count: usize) -> String {
    format!(
        "{} word{} would not fit this time; press n to reshuffle",
        count,
        if count == 1 { "" } else { "s" }
    )
}

/// KeyboardEvent.key values for printable keys are the character itself
fn single_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
