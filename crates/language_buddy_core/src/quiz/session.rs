//! An in-progress quiz attempt.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{NewQuizResult, QuizAnswer, QuizQuestion};

/// Questions for one attempt plus the answers collected so far.
///
/// Ephemeral: it is either turned into a [`NewQuizResult`] with [`finish`]
/// or dropped.
///
/// [`finish`]: QuizSession::finish
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current_index: usize,
    answers: Vec<QuizAnswer>,
    vocab_set_id: Option<Uuid>,
    vocab_set_title: Option<String>,
}

impl QuizSession {
    pub fn new(
        questions: Vec<QuizQuestion>,
        vocab_set_id: Option<Uuid>,
        vocab_set_title: Option<String>,
    ) -> Self {
        Self {
            questions,
            current_index: 0,
            answers: Vec::new(),
            vocab_set_id,
            vocab_set_title,
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn answers(&self) -> &[QuizAnswer] {
        &self.answers
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    /// Records an answer for the current question and moves on.
    /// Returns `None` when there is no question left to answer.
    pub fn submit_answer(&mut self, selected_answer: &str) -> Option<QuizAnswer> {
        let question = self.questions.get(self.current_index)?;
        let answer = QuizAnswer {
            question_id: question.id,
            selected_answer: selected_answer.to_string(),
            is_correct: selected_answer == question.correct_answer,
        };
        self.answers.push(answer.clone());
        self.current_index += 1;
        Some(answer)
    }

    /// Converts the attempt into a result ready for the result store.
    pub fn finish(self) -> NewQuizResult {
        NewQuizResult {
            vocab_set_id: self.vocab_set_id,
            score: self.answers.iter().filter(|a| a.is_correct).count(),
            total: self.questions.len(),
            vocab_set_title: self.vocab_set_title,
            answers: self.answers,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{QuestionKind, VocabItem};

    fn question(answer: &str) -> QuizQuestion {
        QuizQuestion {
            id: Uuid::new_v4(),
            kind: QuestionKind::Meaning,
            word: VocabItem::new("mot", answer),
            question: "What does \"mot\" mean?".to_string(),
            options: vec![answer.to_string(), "other".to_string()],
            correct_answer: answer.to_string(),
        }
    }

    #[test]
    fn walks_through_questions_and_scores() {
        let set_id = Uuid::new_v4();
        let questions = vec![question("word"), question("thing"), question("stuff")];
        let ids: Vec<Uuid> = questions.iter().map(|q| q.id).collect();
        let mut session = QuizSession::new(questions, Some(set_id), Some("Basics".into()));

        assert_eq!(session.current_question().map(|q| q.id), Some(ids[0]));
        assert!(session.submit_answer("word").unwrap().is_correct);
        assert!(!session.submit_answer("other").unwrap().is_correct);
        assert!(!session.is_complete());
        // Grading is exact.
        assert!(!session.submit_answer("STUFF").unwrap().is_correct);
        assert!(session.is_complete());
        assert!(session.submit_answer("late").is_none());
        assert_eq!(session.score(), 1);

        let result = session.finish();
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 3);
        assert_eq!(result.vocab_set_id, Some(set_id));
        assert_eq!(result.vocab_set_title.as_deref(), Some("Basics"));
        let answered: Vec<Uuid> = result.answers.iter().map(|a| a.question_id).collect();
        assert_eq!(answered, ids);
    }

    #[test]
    fn empty_session_is_complete() {
        let session = QuizSession::new(Vec::new(), None, None);
        assert!(session.is_complete());
        assert!(session.current_question().is_none());
        assert_eq!(session.finish().total, 0);
    }
}
