//! Meaning and spelling question builders.

use rand::Rng;
use uuid::Uuid;

use super::case_set::{eq_ignore_case, CaseInsensitiveSet};
use super::distractors::{candidate_answers, select_distractors, DISTRACTOR_COUNT};
use super::options::assemble_options;
use super::random::shuffle;
use super::typos::generate_typos;
use crate::domain::{QuestionKind, QuizQuestion, VocabItem};

/// How many times a spelling question retries typo generation before it
/// falls back to other words from the pool.
pub const MAX_TYPO_ATTEMPTS: usize = 10;

/// Builds a question asking for the English meaning of `word`.
///
/// Distractors are other English glosses from `pool`, which may span every set
/// the user owns.
pub fn build_meaning_question<R: Rng + ?Sized>(
    word: &VocabItem,
    pool: &[VocabItem],
    rng: &mut R,
) -> QuizQuestion {
    let correct_answer = word.word_english.trim().to_string();
    let gloss_pool = candidate_answers(&correct_answer, pool, |item| item.word_english.as_str());

    let mut chosen: CaseInsensitiveSet =
        select_distractors(&correct_answer, pool, |item| item.word_english.as_str(), rng)
            .into_iter()
            .collect();
    for gloss in &gloss_pool {
        if chosen.len() >= DISTRACTOR_COUNT {
            break;
        }
        chosen.insert(gloss.as_str());
    }

    let mut distractors = shuffle(chosen.as_slice(), rng);
    distractors.truncate(DISTRACTOR_COUNT);

    let options = assemble_options(&correct_answer, &distractors, &gloss_pool, rng);

    QuizQuestion {
        id: Uuid::new_v4(),
        kind: QuestionKind::Meaning,
        word: word.clone(),
        question: format!("What does \"{}\" mean?", word.word_target),
        options,
        correct_answer,
    }
}

/// Builds a question asking for the correct spelling of `word`.
///
/// Near-miss typos of the answer are preferred over unrelated words, since the
/// question tests recognition of the right orthography.
pub fn build_spelling_question<R: Rng + ?Sized>(
    word: &VocabItem,
    pool: &[VocabItem],
    rng: &mut R,
) -> QuizQuestion {
    let correct_answer = word.word_target.trim().to_string();
    let spelling_pool = candidate_answers(&correct_answer, pool, |item| item.word_target.as_str());

    let typos = fresh_typos(&correct_answer, &CaseInsensitiveSet::new());
    let picked = select_distractors(&correct_answer, pool, |item| item.word_target.as_str(), rng);

    let mut distractors: Vec<String> = typos
        .into_iter()
        .chain(picked)
        .filter(|d| !eq_ignore_case(d.trim(), &correct_answer))
        .collect::<CaseInsensitiveSet>()
        .into_vec();
    distractors.truncate(DISTRACTOR_COUNT);

    if distractors.len() < DISTRACTOR_COUNT {
        let mut used: CaseInsensitiveSet = distractors.iter().cloned().collect();

        let mut attempts = 0;
        while distractors.len() < DISTRACTOR_COUNT && attempts < MAX_TYPO_ATTEMPTS {
            for typo in fresh_typos(&correct_answer, &used) {
                if distractors.len() < DISTRACTOR_COUNT {
                    distractors.push(typo.clone());
                }
                used.insert(typo);
            }
            attempts += 1;
        }

        for spelling in &spelling_pool {
            if distractors.len() >= DISTRACTOR_COUNT {
                break;
            }
            if used.insert(spelling.as_str()) {
                distractors.push(spelling.clone());
            }
        }
    }

    let options = assemble_options(&correct_answer, &distractors, &spelling_pool, rng);

    QuizQuestion {
        id: Uuid::new_v4(),
        kind: QuestionKind::Spelling,
        word: word.clone(),
        question: format!("How do you spell \"{}\"?", word.word_english),
        options,
        correct_answer,
    }
}

/// Typos of `correct_answer` that are neither the answer (ignoring case) nor
/// already in `used`.
fn fresh_typos(correct_answer: &str, used: &CaseInsensitiveSet) -> Vec<String> {
    generate_typos(correct_answer)
        .into_iter()
        .filter(|t| !eq_ignore_case(t.trim(), correct_answer) && !used.contains(t))
        .collect()
}
