//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the browser client and the
//! quiz runner. Every frame is a JSON text message tagged by `type`.

use language_buddy_core::domain::{QuestionKind, QuizQuestion, QuizResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Starts a new quiz, replacing any quiz already in progress.
    /// A missing `set_id` or `"all"` draws from every set.
    StartQuiz {
        set_id: Option<String>,
        question_count: Option<usize>,
    },

    /// Answers the current question.
    SubmitAnswer { answer: String },

    /// Drops the quiz in progress without recording a result.
    AbandonQuiz,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    QuizStarted {
        title: Option<String>,
        total: usize,
    },

    /// The next question. The correct answer is withheld until it is checked.
    Question {
        index: usize,
        total: usize,
        question_id: Uuid,
        kind: QuestionKind,
        prompt: String,
        options: Vec<String>,
    },

    AnswerChecked {
        question_id: Uuid,
        selected_answer: String,
        is_correct: bool,
        correct_answer: String,
    },

    /// The stored result of a finished quiz.
    QuizCompleted { result: QuizResult, feedback: String },

    /// The selection had no words to ask about.
    NothingToQuiz { message: String },

    Error { message: String },
}

impl ServerMessage {
    pub fn question(index: usize, total: usize, question: &QuizQuestion) -> Self {
        Self::Question {
            index,
            total,
            question_id: question.id,
            kind: question.kind,
            prompt: question.question.clone(),
            options: question.options.clone(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
