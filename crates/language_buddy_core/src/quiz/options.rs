//! Final option-list assembly shared by both question builders.

use rand::Rng;

use super::case_set::{dedup_ignore_case, eq_ignore_case, CaseInsensitiveSet};
use super::random::shuffle;

/// Options shown for one question, correct answer included.
pub const MAX_OPTIONS: usize = 4;

/// Builds the shuffled option list for a question.
///
/// The correct answer goes in first, then `distractors` and finally `backfill`
/// until [`MAX_OPTIONS`] entries are collected. Duplicates (ignoring case) are
/// skipped. A short pool yields a short list; nothing is padded.
pub fn assemble_options<R: Rng + ?Sized>(
    correct_answer: &str,
    distractors: &[String],
    backfill: &[String],
    rng: &mut R,
) -> Vec<String> {
    let mut collected = CaseInsensitiveSet::new();
    collected.insert(correct_answer);

    for candidate in distractors.iter().chain(backfill) {
        if collected.len() >= MAX_OPTIONS {
            break;
        }
        collected.insert(candidate.as_str());
    }

    let mut options = collected.into_vec();
    if !options.iter().any(|o| eq_ignore_case(o, correct_answer)) {
        match options.first_mut() {
            Some(first) => *first = correct_answer.to_string(),
            None => options.push(correct_answer.to_string()),
        }
    }

    dedup_ignore_case(shuffle(&options, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn caps_at_four_and_keeps_the_answer() {
        let mut rng = StdRng::seed_from_u64(11);
        let options = assemble_options(
            "dog",
            &strings(&["cat", "bird", "fish", "cow"]),
            &strings(&["horse"]),
            &mut rng,
        );
        assert_eq!(options.len(), MAX_OPTIONS);
        assert!(options.contains(&"dog".to_string()));
        assert!(!options.contains(&"cow".to_string()));
        assert!(!options.contains(&"horse".to_string()));
    }

    #[test]
    fn backfills_when_distractors_run_short() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut options = assemble_options(
            "dog",
            &strings(&["cat"]),
            &strings(&["CAT", "Dog", "bird", "fish", "cow"]),
            &mut rng,
        );
        options.sort();
        assert_eq!(options, strings(&["bird", "cat", "dog", "fish"]));
    }

    #[test]
    fn tolerates_short_lists() {
        let mut rng = StdRng::seed_from_u64(5);
        let options = assemble_options("dog", &strings(&["DOG"]), &[], &mut rng);
        assert_eq!(options, strings(&["dog"]));
    }

    #[test]
    fn correct_answer_casing_wins() {
        let mut rng = StdRng::seed_from_u64(2);
        let options = assemble_options("Paris", &strings(&["paris", "Lyon"]), &[], &mut rng);
        assert_eq!(options.len(), 2);
        assert!(options.contains(&"Paris".to_string()));
        assert!(!options.contains(&"paris".to_string()));
    }
}
