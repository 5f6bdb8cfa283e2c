//! Shuffle primitive shared by every quiz component.

use rand::seq::SliceRandom;
use rand::Rng;

/// Returns a uniformly shuffled copy of `items`, leaving the input untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
