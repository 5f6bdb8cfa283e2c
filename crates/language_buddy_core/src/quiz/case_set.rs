//! Case-insensitive, insertion-ordered string set.
//!
//! Keys are compared by their lowercase form; the stored value keeps the casing
//! of the first insertion.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct CaseInsensitiveSet {
    keys: HashSet<String>,
    values: Vec<String>,
}

impl CaseInsensitiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` unless an equal (ignoring case) entry exists.
    /// Returns whether the value was added.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.keys.insert(value.to_lowercase()) {
            self.values.push(value);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.keys.contains(&value.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<String> {
        self.values
    }
}

impl<S: Into<String>> FromIterator<S> for CaseInsensitiveSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

/// Case-insensitive equality.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Drops later duplicates (ignoring case), keeping first-seen casing and order.
pub fn dedup_ignore_case<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().collect::<CaseInsensitiveSet>().into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_seen_casing() {
        let deduped = dedup_ignore_case(["Apple", "apple", "PEAR", "APPLE", "pear", "plum"]);
        assert_eq!(deduped, vec!["Apple", "PEAR", "plum"]);
    }

    #[test]
    fn insert_and_contains() {
        let mut set = CaseInsensitiveSet::new();
        assert!(set.insert("Straße"));
        assert!(!set.insert("straße"));
        assert!(set.contains("STRAßE"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn eq_ignores_case() {
        assert!(eq_ignore_case("Bonjour", "bONJOUR"));
        assert!(!eq_ignore_case("bonjour", "bonsoir"));
    }
}
