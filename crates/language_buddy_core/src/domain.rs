//! crates/language_buddy_core/src/domain.rs
//!
//! Defines the core data structures for the application.
//! These structs carry serde derives because every store and every client
//! exchanges them as JSON, but they hold no storage or transport details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ports::{PortError, PortResult};

/// A single word with its translation, pronunciation and usage example.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabItem {
    pub word_target: String,
    pub word_english: String,
    #[serde(default)]
    pub phonetic: String,
    #[serde(default)]
    pub example_sentence: String,
}

impl VocabItem {
    pub fn new(word_target: impl Into<String>, word_english: impl Into<String>) -> Self {
        Self {
            word_target: word_target.into(),
            word_english: word_english.into(),
            ..Default::default()
        }
    }
}

/// A named, language-tagged collection of words owned by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabSet {
    pub id: Uuid,
    pub topic: String,
    pub language: String,
    pub vocab_list: Vec<VocabItem>,
    pub saved_at: DateTime<Utc>,
}

/// A set payload that has not been assigned an id or timestamp yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVocabSet {
    pub topic: String,
    pub language: String,
    pub vocab_list: Vec<VocabItem>,
}

impl NewVocabSet {
    /// Trims a hand-entered set and rejects it if a required field is blank.
    pub fn validated_manual_entry(self) -> PortResult<Self> {
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            return Err(PortError::InvalidInput("Topic is required".to_string()));
        }
        if self.vocab_list.is_empty() {
            return Err(PortError::InvalidInput(
                "At least one word is required".to_string(),
            ));
        }

        let mut vocab_list = Vec::with_capacity(self.vocab_list.len());
        for (index, item) in self.vocab_list.into_iter().enumerate() {
            let word = VocabItem {
                word_target: item.word_target.trim().to_string(),
                word_english: item.word_english.trim().to_string(),
                phonetic: item.phonetic.trim().to_string(),
                example_sentence: item.example_sentence.trim().to_string(),
            };
            if word.word_target.is_empty() {
                return Err(PortError::InvalidInput(format!(
                    "Word {} is required",
                    index + 1
                )));
            }
            if word.word_english.is_empty() {
                return Err(PortError::InvalidInput(format!(
                    "English translation for word {} is required",
                    index + 1
                )));
            }
            vocab_list.push(word);
        }

        Ok(Self {
            topic,
            language: self.language.trim().to_string(),
            vocab_list,
        })
    }
}

/// Outcome of adding a set payload to the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddVocabSetResult {
    pub merged: bool,
    pub new_words_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_words_count: Option<usize>,
}

impl AddVocabSetResult {
    /// The tutor's confirmation line shown after a save.
    pub fn confirmation_message(&self, topic: &str) -> String {
        if !self.merged {
            return format!(
                "Great! I've saved {} words about \"{}\" to your vocabulary! 📚",
                self.new_words_count, topic
            );
        }
        if self.new_words_count == 0 {
            return format!(
                "All words from \"{}\" already exist in your vocabulary! No new words were added. 📚",
                topic
            );
        }
        let plural = if self.new_words_count > 1 { "s" } else { "" };
        let total = self.existing_words_count.unwrap_or(0) + self.new_words_count;
        format!(
            "Great! I've merged {} new word{} into your existing topic \"{}\". You now have {} words in total! 📚",
            self.new_words_count, plural, topic, total
        )
    }
}

/// The two kinds of multiple-choice question the quiz engine produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Shows the target-language word, asks for its English meaning.
    Meaning,
    /// Shows the English meaning, asks for the correct target spelling.
    Spelling,
}

/// A generated multiple-choice question. Lives only inside a quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: Uuid,
    pub kind: QuestionKind,
    pub word: VocabItem,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_id: Uuid,
    pub selected_answer: String,
    pub is_correct: bool,
}

/// A quiz outcome before the result store assigns it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuizResult {
    pub vocab_set_id: Option<Uuid>,
    pub vocab_set_title: Option<String>,
    pub score: usize,
    pub total: usize,
    pub answers: Vec<QuizAnswer>,
    pub completed_at: DateTime<Utc>,
}

/// The persisted record of a completed quiz. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: Uuid,
    pub vocab_set_id: Option<Uuid>,
    pub vocab_set_title: Option<String>,
    pub score: usize,
    pub total: usize,
    pub answers: Vec<QuizAnswer>,
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn from_new(id: Uuid, result: NewQuizResult) -> Self {
        Self {
            id,
            vocab_set_id: result.vocab_set_id,
            vocab_set_title: result.vocab_set_title,
            score: result.score,
            total: result.total,
            answers: result.answers,
            completed_at: result.completed_at,
        }
    }
}

/// What the tutor is asked for: a target language and a free-form instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabRequest {
    pub target_language: String,
    pub instruction: String,
}

/// The tutor's parsed answer, ready to be saved as a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabResponse {
    pub topic: String,
    pub target_language: String,
    pub vocab_list: Vec<VocabItem>,
    pub summary_message: String,
}

impl VocabResponse {
    pub fn into_new_set(self) -> NewVocabSet {
        NewVocabSet {
            topic: self.topic,
            language: self.target_language,
            vocab_list: self.vocab_list,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "french", name: "French", flag: "🇫🇷" },
    Language { code: "chinese", name: "Chinese", flag: "🇨🇳" },
    Language { code: "spanish", name: "Spanish", flag: "🇪🇸" },
    Language { code: "hindi", name: "Hindi", flag: "🇮🇳" },
    Language { code: "russian", name: "Russian", flag: "🇷🇺" },
    Language { code: "german", name: "German", flag: "🇩🇪" },
    Language { code: "portuguese", name: "Portuguese", flag: "🇵🇹" },
    Language { code: "italian", name: "Italian", flag: "🇮🇹" },
];

pub const DEFAULT_LANGUAGE: &str = "french";

/// Looks a language up by code or display name, ignoring case.
pub fn find_language(code_or_name: &str) -> Option<&'static Language> {
    let needle = code_or_name.trim().to_lowercase();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.code == needle || lang.name.to_lowercase() == needle)
}
