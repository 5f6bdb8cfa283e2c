//! Synthetic misspellings used as spelling-question distractors.
//!
//! Every candidate is exactly one edit away from the input: an adjacent
//! transposition, a substitution with the next ASCII letter, a deletion, or an
//! insertion of `a`. Generation is deterministic for a given word.

/// Upper bound on the typos returned for a single word.
pub const MAX_TYPOS: usize = 3;

const SUBSTITUTION_POSITIONS: usize = 3;
const DELETION_POSITIONS: usize = 2;
const INSERTION_POSITIONS: usize = 2;
/// Words this long or longer get no insertion candidates.
const INSERTION_MAX_LEN: usize = 20;

/// Generates up to [`MAX_TYPOS`] plausible misspellings of `word`.
pub fn generate_typos(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let len = chars.len();
    if len == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<String> = Vec::new();

    for i in 0..len - 1 {
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        candidates.push(swapped.into_iter().collect());
    }

    for i in 0..SUBSTITUTION_POSITIONS.min(len) {
        if chars[i].is_ascii_lowercase() {
            let mut changed = chars.clone();
            changed[i] = next_letter(chars[i]);
            candidates.push(changed.into_iter().collect());
        }
    }

    if len > 1 {
        for i in 0..DELETION_POSITIONS.min(len) {
            let mut shortened = chars.clone();
            shortened.remove(i);
            candidates.push(shortened.into_iter().collect());
        }
    }

    if len < INSERTION_MAX_LEN {
        for i in 0..INSERTION_POSITIONS.min(len + 1) {
            let mut lengthened = chars.clone();
            lengthened.insert(i, 'a');
            candidates.push(lengthened.into_iter().collect());
        }
    }

    let mut typos: Vec<String> = Vec::with_capacity(MAX_TYPOS);
    for candidate in candidates {
        if candidate != word && !typos.contains(&candidate) {
            typos.push(candidate);
            if typos.len() == MAX_TYPOS {
                break;
            }
        }
    }
    typos
}

/// `a -> b`, ..., `z -> a`.
fn next_letter(c: char) -> char {
    let offset = (c as u8 - b'a' + 1) % 26;
    (b'a' + offset) as char
}

#[cfg(test)]
pub(crate) fn is_single_edit(original: &str, typo: &str) -> bool {
    let a: Vec<char> = original.chars().collect();
    let b: Vec<char> = typo.chars().collect();

    if a.len() == b.len() {
        let diffs: Vec<usize> = (0..a.len()).filter(|&i| a[i] != b[i]).collect();
        return match diffs.as_slice() {
            [_] => true,
            [i, j] => *j == i + 1 && a[*i] == b[*j] && a[*j] == b[*i],
            _ => false,
        };
    }

    let (long, short) = if a.len() > b.len() { (&a, &b) } else { (&b, &a) };
    if long.len() != short.len() + 1 {
        return false;
    }
    (0..long.len()).any(|skip| {
        long.iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, c)| c)
            .eq(short.iter())
    })
}
