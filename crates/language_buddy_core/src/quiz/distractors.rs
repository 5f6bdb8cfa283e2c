//! Wrong-but-plausible answers pulled from the wider vocabulary pool.

use rand::Rng;

use super::case_set::{eq_ignore_case, CaseInsensitiveSet};
use super::random::shuffle;
use crate::domain::VocabItem;

/// Number of distractors a question wants next to its correct answer.
pub const DISTRACTOR_COUNT: usize = 3;

/// Trimmed `field` values of `pool` that are non-empty and not equal (ignoring
/// case) to `correct_answer`, deduplicated ignoring case in pool order.
pub fn candidate_answers<F>(correct_answer: &str, pool: &[VocabItem], field: F) -> Vec<String>
where
    F: Fn(&VocabItem) -> &str,
{
    pool.iter()
        .map(|item| field(item).trim())
        .filter(|answer| !answer.is_empty() && !eq_ignore_case(answer, correct_answer))
        .collect::<CaseInsensitiveSet>()
        .into_vec()
}

/// Picks up to [`DISTRACTOR_COUNT`] random candidates from `pool`.
///
/// No returned entry equals `correct_answer` ignoring case, and no two returned
/// entries equal each other ignoring case.
pub fn select_distractors<F, R>(
    correct_answer: &str,
    pool: &[VocabItem],
    field: F,
    rng: &mut R,
) -> Vec<String>
where
    F: Fn(&VocabItem) -> &str,
    R: Rng + ?Sized,
{
    let candidates = candidate_answers(correct_answer, pool, field);
    let mut picked = shuffle(&candidates, rng);
    picked.truncate(DISTRACTOR_COUNT);
    picked
}
