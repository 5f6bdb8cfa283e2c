//! Turns the user's vocabulary sets into a ready-to-run list of questions.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::builders::{build_meaning_question, build_spelling_question};
use super::random::shuffle;
use crate::domain::{QuestionKind, QuizQuestion, VocabItem, VocabSet};

/// Title used when the quiz draws from every set.
pub const ALL_SETS_TITLE: &str = "All Sets";
/// Selection value meaning "every set".
pub const ALL_SETS_PARAM: &str = "all";

/// Which words a quiz is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetSelection {
    All,
    Set(Uuid),
}

impl SetSelection {
    /// Reads an optional set id where a missing, empty or `"all"` value means
    /// every set.
    pub fn from_param(param: Option<&str>) -> Result<Self, uuid::Error> {
        match param.map(str::trim) {
            None | Some("") | Some(ALL_SETS_PARAM) => Ok(Self::All),
            Some(raw) => Uuid::parse_str(raw).map(Self::Set),
        }
    }

    /// The set id a finished quiz should be attributed to.
    pub fn set_id(&self) -> Option<Uuid> {
        match self {
            Self::All => None,
            Self::Set(id) => Some(*id),
        }
    }
}

/// The assembled questions plus the title to display above them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuiz {
    pub questions: Vec<QuizQuestion>,
    pub title: Option<String>,
}

/// Generates up to `requested_count` questions using the thread-local RNG.
pub fn generate_quiz_questions(
    sets: &[VocabSet],
    selection: SetSelection,
    requested_count: usize,
) -> GeneratedQuiz {
    generate_quiz_questions_with_rng(sets, selection, requested_count, &mut rand::rng())
}

/// Generates up to `requested_count` questions.
///
/// The quiz silently shrinks to the pool size when fewer words are available,
/// and an empty pool gives an empty quiz. Distractors are drawn from every set,
/// not just the selected one.
pub fn generate_quiz_questions_with_rng<R: Rng + ?Sized>(
    sets: &[VocabSet],
    selection: SetSelection,
    requested_count: usize,
    rng: &mut R,
) -> GeneratedQuiz {
    let (available, title): (Vec<VocabItem>, Option<String>) = match selection {
        SetSelection::Set(id) => match sets.iter().find(|set| set.id == id) {
            Some(set) => (set.vocab_list.clone(), Some(set.topic.clone())),
            None => (Vec::new(), None),
        },
        SetSelection::All => (all_words(sets), Some(ALL_SETS_TITLE.to_string())),
    };

    if available.is_empty() {
        debug!(?selection, "No words available for a quiz");
        return GeneratedQuiz {
            questions: Vec::new(),
            title,
        };
    }

    let mut sampled = shuffle(&available, rng);
    sampled.truncate(requested_count);

    let distractor_pool = all_words(sets);
    let kinds = shuffle(&balanced_kinds(sampled.len()), rng);

    let mut questions = Vec::with_capacity(sampled.len());
    for (index, word) in sampled.iter().enumerate() {
        let kind = kinds.get(index).copied().unwrap_or_else(|| {
            if rng.random_bool(0.5) {
                QuestionKind::Meaning
            } else {
                QuestionKind::Spelling
            }
        });
        let question = match kind {
            QuestionKind::Meaning => build_meaning_question(word, &distractor_pool, rng),
            QuestionKind::Spelling => build_spelling_question(word, &distractor_pool, rng),
        };
        questions.push(question);
    }

    debug!(
        count = questions.len(),
        requested = requested_count,
        title = title.as_deref().unwrap_or_default(),
        "Assembled quiz"
    );

    GeneratedQuiz {
        questions: shuffle(&questions, rng),
        title,
    }
}

/// Meaning, spelling, meaning, ... for `count` questions.
fn balanced_kinds(count: usize) -> Vec<QuestionKind> {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                QuestionKind::Meaning
            } else {
                QuestionKind::Spelling
            }
        })
        .collect()
}

fn all_words(sets: &[VocabSet]) -> Vec<VocabItem> {
    sets.iter()
        .flat_map(|set| set.vocab_list.iter().cloned())
        .collect()
}
