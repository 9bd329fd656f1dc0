//! Story content: the words to hide plus the prose they unlock.
//!
//! A [`Story`] bundles everything one playthrough needs beyond the engine
//! itself: the word list, the fill-in-the-blank sentences revealed as words
//! are found, per-word hints gated behind a question, and the text shown when
//! the last word lands. [`Story::reference`] is the built-in valentine story;
//! custom stories deserialize from JSON with the same shape.

use crate::WordSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One piece of a sentence: literal text, or a blank that stays hidden until
/// the word with the matching id is found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentencePart {
    Text(String),
    Blank { id: String },
}

/// A hint and the question that has to be answered before it is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintInfo {
    pub hint: String,
    pub question: String,
}

/// Text shown once every word has been found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finale {
    pub heading: String,
    pub line: String,
    pub signoff: String,
}

/// A complete playthrough's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub occasion: String,
    pub title: String,
    pub tagline: String,
    pub grid_size: usize,
    pub words: Vec<WordSpec>,
    /// Sentences in reveal order; blanks reference word ids.
    pub sentences: Vec<Vec<SentencePart>>,
    /// Hints keyed by word id. A word without an entry simply has no hint.
    pub hints: HashMap<String, HintInfo>,
    pub finale: Finale,
}

impl Story {
    /// Word for the given id, if the story has one.
    pub fn word(&self, id: &str) -> Option<&WordSpec> {
        self.words.iter().find(|spec| spec.id == id)
    }

    /// The built-in story.
    pub fn reference() -> Self {
        let words = vec![
            WordSpec::new("DHRUV", "name_me"),
            WordSpec::new("VALENTINE", "belief"),
            WordSpec::new("HELP", "help"),
            WordSpec::new("FEELING", "feeling"),
            WordSpec::new("LOYAL", "trait_1"),
            WordSpec::new("FUNNY", "trait_2"),
            WordSpec::new("DANCE", "action"),
            WordSpec::new("CUTE", "gf_trait_1"),
            WordSpec::new("SWEET", "gf_trait_2"),
            WordSpec::new("LOVE", "final_verb"),
            WordSpec::new("PRIYA", "name_her"),
        ];

        let sentences = vec![
            vec![text("As you know, I am "), blank("name_me"), text(".")],
            vec![
                text("I don’t think we heavily believe in "),
                blank("belief"),
                text("."),
            ],
            vec![
                text("Firstly, thanks. You were a big "),
                blank("help"),
                text("."),
            ],
            vec![
                text("You didn’t back off when I was having a bad "),
                blank("feeling"),
                text("."),
            ],
            vec![
                text("Thanks for being so "),
                blank("trait_1"),
                text(" and "),
                blank("trait_2"),
                text("."),
            ],
            vec![text("You "), blank("action"), text(" really good.")],
            vec![
                text("I’ll never find such a "),
                blank("gf_trait_1"),
                text(" and "),
                blank("gf_trait_2"),
                text(" girlfriend."),
            ],
            vec![
                text("I "),
                blank("final_verb"),
                text(" you, "),
                blank("name_her"),
                text("."),
            ],
        ];

        let mut hints = HashMap::new();
        hint(
            &mut hints,
            "name_me",
            "The guy who built this because Dhruv loves this girl.",
            "What is one thing you appreciate about me?",
        );
        hint(
            &mut hints,
            "name_her",
            "The girl who turned effort into meaning.",
            "What is your favorite quality about yourself?",
        );
        hint(
            &mut hints,
            "trait_1",
            "Being on your side always. No cheating. No switching.",
            "What does loyalty mean to you in one word?",
        );
        hint(
            &mut hints,
            "trait_2",
            "The one who makes me laugh.",
            "What is a moment we shared that made you laugh hard?",
        );
        hint(
            &mut hints,
            "final_verb",
            "Something we do to each other.",
            "How would you describe us in one word?",
        );
        hint(
            &mut hints,
            "action",
            "You do it really, really well… on music.",
            "What song makes you think of me?",
        );
        hint(
            &mut hints,
            "feeling",
            "Present participle of feel.",
            "How are you feeling right now?",
        );
        hint(
            &mut hints,
            "help",
            "Four letters. What you were when I needed it most.",
            "What is one way you like to be supported?",
        );
        hint(
            &mut hints,
            "belief",
            "A day we don’t heavily believe in.",
            "What is your idea of a perfect date?",
        );
        hint(
            &mut hints,
            "gf_trait_1",
            "Five letters. Starts with C. You deny it.",
            "What do you think is my cutest habit?",
        );
        hint(
            &mut hints,
            "gf_trait_2",
            "And you smell like that.",
            "What is your favorite dessert?",
        );

        Self {
            occasion: "Valentine's Special".to_string(),
            title: "To My Priya".to_string(),
            tagline: "Find the hidden words to complete our story.".to_string(),
            grid_size: 12,
            words,
            sentences,
            hints,
            finale: Finale {
                heading: "You found every word.".to_string(),
                line: "Just like you found your way into my life.".to_string(),
                signoff: "I LOVE YOU, PRIYA.".to_string(),
            },
        }
    }
}

fn text(s: &str) -> SentencePart {
    SentencePart::Text(s.to_string())
}

fn blank(id: &str) -> SentencePart {
    SentencePart::Blank { id: id.to_string() }
}

fn hint(hints: &mut HashMap<String, HintInfo>, id: &str, hint: &str, question: &str) {
    hints.insert(
        id.to_string(),
        HintInfo {
            hint: hint.to_string(),
            question: question.to_string(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn reference_blanks_cover_exactly_the_word_ids() {
        let story = Story::reference();
        let word_ids: HashSet<&str> = story.words.iter().map(|spec| spec.id.as_str()).collect();
        let mut blank_ids = HashSet::new();
        for sentence in &story.sentences {
            for part in sentence {
                if let SentencePart::Blank { id } = part {
                    assert!(word_ids.contains(id.as_str()), "blank '{}' has no word", id);
                    blank_ids.insert(id.as_str());
                }
            }
        }
        assert_eq!(blank_ids, word_ids);
    }

    #[test]
    fn reference_hints_cover_every_word() {
        let story = Story::reference();
        for spec in &story.words {
            assert!(story.hints.contains_key(&spec.id), "no hint for '{}'", spec.id);
        }
        assert_eq!(story.hints.len(), story.words.len());
    }

    #[test]
    fn reference_words_fit_the_grid() {
        let story = Story::reference();
        let longest = story
            .words
            .iter()
            .map(|spec| spec.word.len())
            .max()
            .unwrap();
        assert!(longest <= story.grid_size);
    }

    #[test]
    fn word_lookup_uses_ids() {
        let story = Story::reference();
        assert_eq!(story.word("name_her").map(|s| s.word.as_str()), Some("PRIYA"));
        assert_eq!(story.word("PRIYA"), None);
    }

    #[test]
    fn story_round_trips_through_json() {
        // Custom stories load from JSON files, so the reference story must
        // survive the same path.
        let story = Story::reference();
        let json = serde_json::to_string(&story).unwrap();
        let back: Story = serde_json::from_str(&json).unwrap();
        assert_eq!(back, story);
    }
}
