//! crates/language_buddy_core/src/quiz/mod.rs
//!
//! The quiz question generation engine.
//!
//! Everything here is synchronous and infallible: a small or empty word pool
//! produces fewer questions or fewer options, never an error. Functions that
//! need randomness take a caller-supplied `rand::Rng`.

pub mod assembler;
pub mod builders;
pub mod case_set;
pub mod distractors;
pub mod feedback;
pub mod options;
pub mod random;
pub mod session;
pub mod typos;

pub use assembler::{
    generate_quiz_questions, generate_quiz_questions_with_rng, GeneratedQuiz, SetSelection,
    ALL_SETS_PARAM, ALL_SETS_TITLE,
};
pub use builders::{build_meaning_question, build_spelling_question};
pub use case_set::{dedup_ignore_case, eq_ignore_case, CaseInsensitiveSet};
pub use distractors::select_distractors;
pub use feedback::{feedback_for_score, feedback_for_score_with_rng, FeedbackTier};
pub use options::MAX_OPTIONS;
pub use random::shuffle;
pub use session::QuizSession;
pub use typos::generate_typos;
