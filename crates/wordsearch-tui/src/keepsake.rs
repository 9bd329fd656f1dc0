//! Persisted keepsake: the answers typed to unlock hints, plus the final note.
//!
//! Answers outlive the session on purpose; the board itself is never saved.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// One answered unlock question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAnswer {
    /// Word id the question belongs to
    pub id: String,
    /// The word itself, for display
    pub word: String,
    pub question: String,
    pub answer: String,
}

/// Everything the player has written, in answer order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keepsake {
    pub answers: Vec<StoredAnswer>,
    pub note: Option<String>,
}

impl Keepsake {
    /// Get the save file path
    fn save_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordsearch_keepsake.json")
    }

    /// Load the keepsake from file
    pub fn load() -> Self {
        match fs::read_to_string(Self::save_path()) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save the keepsake to file
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(Self::save_path(), json);
        }
    }

    /// Record an answer, replacing any earlier answer for the same word.
    pub fn record_answer(&mut self, id: &str, word: &str, question: &str, answer: &str) {
        self.answers.retain(|stored| stored.id != id);
        self.answers.push(StoredAnswer {
            id: id.to_string(),
            word: word.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
        });
    }

    /// A hint is unlocked once its question has been answered.
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.answers.iter().any(|stored| stored.id == id)
    }

    pub fn answer_for(&self, id: &str) -> Option<&StoredAnswer> {
        self.answers.iter().find(|stored| stored.id == id)
    }

    pub fn set_note(&mut self, note: &str) {
        let trimmed = note.trim();
        if trimmed.is_empty() {
            self.note = None;
        } else {
            self.note = Some(trimmed.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answering_unlocks_the_hint() {
        let mut keepsake = Keepsake::default();
        assert!(!keepsake.is_unlocked("gf_trait_2"));

        keepsake.record_answer(
            "gf_trait_2",
            "SWEET",
            "What is your favorite dessert?",
            "tiramisu",
        );
        assert!(keepsake.is_unlocked("gf_trait_2"));
        assert_eq!(
            keepsake.answer_for("gf_trait_2").map(|a| a.answer.as_str()),
            Some("tiramisu")
        );
    }

    #[test]
    fn answering_again_replaces_the_old_answer() {
        let mut keepsake = Keepsake::default();
        keepsake.record_answer("action", "DANCE", "What song makes you think of me?", "old");
        keepsake.record_answer("action", "DANCE", "What song makes you think of me?", "new");

        assert_eq!(keepsake.answers.len(), 1);
        assert_eq!(
            keepsake.answer_for("action").map(|a| a.answer.as_str()),
            Some("new")
        );
    }

    #[test]
    fn blank_notes_are_dropped() {
        let mut keepsake = Keepsake::default();
        keepsake.set_note("  always  ");
        assert_eq!(keepsake.note.as_deref(), Some("always"));

        keepsake.set_note("   ");
        assert_eq!(keepsake.note, None);
    }

    #[test]
    fn keepsake_round_trips_through_json() {
        let mut keepsake = Keepsake::default();
        keepsake.record_answer("help", "HELP", "What is one way you like to be supported?", "listen");
        keepsake.set_note("made my day");

        let json = serde_json::to_string_pretty(&keepsake).unwrap();
        let back: Keepsake = serde_json::from_str(&json).unwrap();
        assert_eq!(back, keepsake);
    }
}
