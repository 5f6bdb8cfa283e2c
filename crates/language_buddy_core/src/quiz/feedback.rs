//! Encouragement shown on the result screen.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Perfect,
    Great,
    Good,
    Fair,
    Struggling,
}

impl FeedbackTier {
    /// Buckets a score. A zero total falls into the lowest tier.
    pub fn for_score(score: usize, total: usize) -> Self {
        if total == 0 {
            return Self::Struggling;
        }
        let percentage = score as f64 * 100.0 / total as f64;
        if percentage >= 100.0 {
            Self::Perfect
        } else if percentage >= 80.0 {
            Self::Great
        } else if percentage >= 60.0 {
            Self::Good
        } else if percentage >= 40.0 {
            Self::Fair
        } else {
            Self::Struggling
        }
    }

    pub fn messages(self) -> &'static [&'static str; 5] {
        match self {
            Self::Perfect => &[
                "Brilliant! You nailed every single one!",
                "Flawless victory. Dobby is impressed!",
                "Outstanding! You're unstoppable!",
                "Perfect memory! You're a true word wizard",
                "Dobby bows. You have mastered today's quiz",
            ],
            Self::Great => &[
                "Keep shining! Just a few words left to perfect",
                "Strong work! Your vocabulary is leveling up fast!",
                "Almost flawless! Keep polishing those edges",
                "Fantastic job. Consistency is your magic!",
                "Dobby says: wisdom grows word by word.",
            ],
            Self::Good => &[
                "Good effort! You're on the right path.",
                "Solid progress. Review those tricky ones tomorrow!",
                "Step by step, you're growing stronger",
                "Not bad at all! Dobby is proud of your focus.",
                "You're improving. Keep the habit alive!",
            ],
            Self::Fair => &[
                "Hmm... not your best day, but Dobby believes in you!",
                "Let's review these words again. Tomorrow will be better.",
                "Every mistake is a seed of improvement!",
                "You remembered some. Now let's fill the gaps!",
                "A little revision and you'll shine again!",
            ],
            Self::Struggling => &[
                "That was tough! Let's try again after a quick break",
                "Even wizards have off days. Rest and retry!",
                "Don't give up. Dobby never does!",
                "Every master starts with mistakes. You're learning!",
                "Wipe the dust off your vocabulary and give it another go!",
            ],
        }
    }
}

/// Picks an encouragement for `score` out of `total` using the thread-local RNG.
pub fn feedback_for_score(score: usize, total: usize) -> &'static str {
    feedback_for_score_with_rng(score, total, &mut rand::rng())
}

pub fn feedback_for_score_with_rng<R: Rng + ?Sized>(
    score: usize,
    total: usize,
    rng: &mut R,
) -> &'static str {
    let messages = FeedbackTier::for_score(score, total).messages();
    messages.choose(rng).copied().unwrap_or(messages[0])
}
