//! crates/language_buddy_core/src/library.rs
//!
//! The user's vocabulary library: saving, merging and pruning sets on top of a
//! `VocabularyStore`.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{AddVocabSetResult, NewVocabSet, VocabSet};
use crate::ports::{PortError, PortResult, VocabularyStore};

#[derive(Clone)]
pub struct VocabLibrary {
    store: Arc<dyn VocabularyStore>,
}

impl VocabLibrary {
    pub fn new(store: Arc<dyn VocabularyStore>) -> Self {
        Self { store }
    }

    pub async fn sets(&self) -> PortResult<Vec<VocabSet>> {
        self.store.get_all().await
    }

    /// Saves a set payload, merging it into an existing set when one has the
    /// same topic (ignoring case) and the same language.
    ///
    /// Only words whose target spelling (ignoring case) is not already in the
    /// set are appended. Nothing is written when no word is new.
    pub async fn add_vocab_set(&self, payload: NewVocabSet) -> PortResult<AddVocabSetResult> {
        let sets = self.store.get_all().await?;
        let topic_key = payload.topic.to_lowercase();

        let existing = sets
            .into_iter()
            .find(|set| set.topic.to_lowercase() == topic_key && set.language == payload.language);

        let Some(mut existing) = existing else {
            let new_words_count = payload.vocab_list.len();
            let set = VocabSet {
                id: Uuid::new_v4(),
                topic: payload.topic,
                language: payload.language,
                vocab_list: payload.vocab_list,
                saved_at: Utc::now(),
            };
            info!(set_id = %set.id, topic = %set.topic, words = new_words_count, "Saved new vocabulary set");
            self.store.save(set).await?;
            return Ok(AddVocabSetResult {
                merged: false,
                new_words_count,
                existing_words_count: None,
            });
        };

        let existing_words_count = existing.vocab_list.len();
        let mut known: HashSet<String> = existing
            .vocab_list
            .iter()
            .map(|word| word.word_target.to_lowercase())
            .collect();
        let new_words: Vec<_> = payload
            .vocab_list
            .into_iter()
            .filter(|word| known.insert(word.word_target.to_lowercase()))
            .collect();
        let new_words_count = new_words.len();

        if new_words_count > 0 {
            existing.vocab_list.extend(new_words);
            existing.saved_at = Utc::now();
            info!(set_id = %existing.id, added = new_words_count, "Merged words into existing set");
            self.store.update(existing).await?;
        }

        Ok(AddVocabSetResult {
            merged: true,
            new_words_count,
            existing_words_count: Some(existing_words_count),
        })
    }

    pub async fn remove_set(&self, set_id: Uuid) -> PortResult<()> {
        self.find(set_id).await?;
        self.store.delete(set_id).await?;
        info!(%set_id, "Removed vocabulary set");
        Ok(())
    }

    /// Removes the word at `word_index` from a set.
    pub async fn remove_word(&self, set_id: Uuid, word_index: usize) -> PortResult<()> {
        let set = self.find(set_id).await?;
        if word_index >= set.vocab_list.len() {
            return Err(PortError::NotFound(format!(
                "Word {} in set {}",
                word_index, set_id
            )));
        }
        self.store.delete_word(set_id, word_index).await
    }

    async fn find(&self, set_id: Uuid) -> PortResult<VocabSet> {
        self.store
            .get_all()
            .await?
            .into_iter()
            .find(|set| set.id == set_id)
            .ok_or_else(|| PortError::NotFound(format!("Vocabulary set {}", set_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VocabItem;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        sets: Mutex<Vec<VocabSet>>,
        writes: Mutex<usize>,
    }

    #[async_trait]
    impl VocabularyStore for MemoryStore {
        async fn get_all(&self) -> PortResult<Vec<VocabSet>> {
            Ok(self.sets.lock().await.clone())
        }

        async fn save(&self, set: VocabSet) -> PortResult<()> {
            *self.writes.lock().await += 1;
            self.sets.lock().await.push(set);
            Ok(())
        }

        async fn update(&self, set: VocabSet) -> PortResult<()> {
            *self.writes.lock().await += 1;
            for existing in self.sets.lock().await.iter_mut() {
                if existing.id == set.id {
                    *existing = set.clone();
                }
            }
            Ok(())
        }

        async fn delete(&self, set_id: Uuid) -> PortResult<()> {
            self.sets.lock().await.retain(|s| s.id != set_id);
            Ok(())
        }

        async fn delete_word(&self, set_id: Uuid, word_index: usize) -> PortResult<()> {
            for set in self.sets.lock().await.iter_mut() {
                if set.id == set_id && word_index < set.vocab_list.len() {
                    set.vocab_list.remove(word_index);
                }
            }
            Ok(())
        }
    }

    fn payload(topic: &str, language: &str, words: &[(&str, &str)]) -> NewVocabSet {
        NewVocabSet {
            topic: topic.to_string(),
            language: language.to_string(),
            vocab_list: words.iter().map(|(t, e)| VocabItem::new(*t, *e)).collect(),
        }
    }

    fn library() -> (VocabLibrary, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        (VocabLibrary::new(store.clone()), store)
    }

    #[tokio::test]
    async fn first_save_creates_a_set() {
        let (library, _) = library();
        let result = library
            .add_vocab_set(payload("Food", "french", &[("pain", "bread"), ("lait", "milk")]))
            .await
            .unwrap();

        assert_eq!(
            result,
            AddVocabSetResult {
                merged: false,
                new_words_count: 2,
                existing_words_count: None
            }
        );
        let sets = library.sets().await.unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].topic, "Food");
    }

    #[tokio::test]
    async fn merge_appends_only_new_words() {
        let (library, _) = library();
        library
            .add_vocab_set(payload("Food", "french", &[("pain", "bread"), ("lait", "milk")]))
            .await
            .unwrap();

        let result = library
            .add_vocab_set(payload("FOOD", "french", &[("Pain", "bread"), ("fromage", "cheese")]))
            .await
            .unwrap();

        assert!(result.merged);
        assert_eq!(result.new_words_count, 1);
        assert_eq!(result.existing_words_count, Some(2));

        let sets = library.sets().await.unwrap();
        assert_eq!(sets.len(), 1);
        let targets: Vec<&str> = sets[0].vocab_list.iter().map(|w| w.word_target.as_str()).collect();
        assert_eq!(targets, vec!["pain", "lait", "fromage"]);
        assert_eq!(sets[0].topic, "Food");
    }

    #[tokio::test]
    async fn merge_with_nothing_new_does_not_write() {
        let (library, store) = library();
        library
            .add_vocab_set(payload("Food", "french", &[("pain", "bread")]))
            .await
            .unwrap();
        let result = library
            .add_vocab_set(payload("food", "french", &[("PAIN", "bread")]))
            .await
            .unwrap();

        assert_eq!(result.new_words_count, 0);
        assert!(result.merged);
        assert_eq!(*store.writes.lock().await, 1);
    }

    #[tokio::test]
    async fn different_language_is_a_different_set() {
        let (library, _) = library();
        library
            .add_vocab_set(payload("Food", "french", &[("pain", "bread")]))
            .await
            .unwrap();
        let result = library
            .add_vocab_set(payload("Food", "spanish", &[("pan", "bread")]))
            .await
            .unwrap();
        assert!(!result.merged);
        assert_eq!(library.sets().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn duplicates_inside_one_payload_are_merged_once() {
        let (library, _) = library();
        library
            .add_vocab_set(payload("Food", "french", &[("pain", "bread")]))
            .await
            .unwrap();
        let result = library
            .add_vocab_set(payload("Food", "french", &[("eau", "water"), ("EAU", "water")]))
            .await
            .unwrap();
        assert_eq!(result.new_words_count, 1);
    }

    #[tokio::test]
    async fn removing_sets_and_words() {
        let (library, _) = library();
        library
            .add_vocab_set(payload("Food", "french", &[("pain", "bread"), ("lait", "milk")]))
            .await
            .unwrap();
        let set_id = library.sets().await.unwrap()[0].id;

        assert!(matches!(
            library.remove_word(set_id, 5).await,
            Err(PortError::NotFound(_))
        ));
        library.remove_word(set_id, 0).await.unwrap();
        let sets = library.sets().await.unwrap();
        assert_eq!(sets[0].vocab_list, vec![VocabItem::new("lait", "milk")]);

        assert!(matches!(
            library.remove_set(Uuid::new_v4()).await,
            Err(PortError::NotFound(_))
        ));
        library.remove_set(set_id).await.unwrap();
        assert!(library.sets().await.unwrap().is_empty());
    }
}
