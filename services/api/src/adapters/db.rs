//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, the concrete implementation of the
//! `VocabularyStore`, `QuizResultStore` and `SettingsStore` ports from the core
//! crate. Each collection is one JSON document in the SQLite `kv_store` table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use language_buddy_core::domain::{NewQuizResult, QuizResult, VocabSet};
use language_buddy_core::ports::{
    PortError, PortResult, QuizResultStore, SettingsStore, VocabularyStore,
};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{FromRow, SqlitePool};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

pub const VOCAB_SETS_KEY: &str = "dobby_vocab_sets";
pub const QUIZ_RESULTS_KEY: &str = "dobby_quiz_results";
pub const API_KEY_KEY: &str = "dobby_fireworks_api_key";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the storage ports.
#[derive(Clone)]
pub struct DbAdapter {
    pool: SqlitePool,
    /// Serializes read-modify-write cycles on a document.
    write_lock: Arc<Mutex<()>>,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct KvRecord {
    value: String,
    updated_at: DateTime<Utc>,
}

//=========================================================================================
// Document Helpers
//=========================================================================================

impl DbAdapter {
    async fn read_raw(&self, key: &str) -> PortResult<Option<String>> {
        let record = sqlx::query_as::<_, KvRecord>(
            "SELECT value, updated_at FROM kv_store WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.map(|r| {
            debug!(key, updated_at = %r.updated_at, "Loaded stored document");
            r.value
        }))
    }

    /// Reads a JSON document. A missing or undecodable document reads as empty.
    async fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> PortResult<T> {
        let Some(raw) = self.read_raw(key).await? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, "Error reading stored document, treating it as empty: {}", e);
                Ok(T::default())
            }
        }
    }

    async fn write_raw(&self, key: &str, value: &str) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) -> PortResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.write_raw(key, &raw).await
    }

    async fn delete_raw(&self, key: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}

//=========================================================================================
// `VocabularyStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl VocabularyStore for DbAdapter {
    async fn get_all(&self) -> PortResult<Vec<VocabSet>> {
        self.read_json(VOCAB_SETS_KEY).await
    }

    async fn save(&self, set: VocabSet) -> PortResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut sets: Vec<VocabSet> = self.read_json(VOCAB_SETS_KEY).await?;
        sets.push(set);
        self.write_json(VOCAB_SETS_KEY, &sets).await
    }

    async fn update(&self, set: VocabSet) -> PortResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut sets: Vec<VocabSet> = self.read_json(VOCAB_SETS_KEY).await?;
        let existing = sets
            .iter_mut()
            .find(|s| s.id == set.id)
            .ok_or_else(|| PortError::NotFound(format!("Vocabulary set {}", set.id)))?;
        *existing = set;
        self.write_json(VOCAB_SETS_KEY, &sets).await
    }

    async fn delete(&self, set_id: Uuid) -> PortResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut sets: Vec<VocabSet> = self.read_json(VOCAB_SETS_KEY).await?;
        sets.retain(|s| s.id != set_id);
        self.write_json(VOCAB_SETS_KEY, &sets).await
    }

    async fn delete_word(&self, set_id: Uuid, word_index: usize) -> PortResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut sets: Vec<VocabSet> = self.read_json(VOCAB_SETS_KEY).await?;
        let set = sets
            .iter_mut()
            .find(|s| s.id == set_id)
            .ok_or_else(|| PortError::NotFound(format!("Vocabulary set {}", set_id)))?;
        if word_index >= set.vocab_list.len() {
            return Err(PortError::NotFound(format!(
                "Word {} in set {}",
                word_index, set_id
            )));
        }
        set.vocab_list.remove(word_index);
        self.write_json(VOCAB_SETS_KEY, &sets).await
    }
}

//=========================================================================================
// `QuizResultStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl QuizResultStore for DbAdapter {
    async fn save(&self, result: NewQuizResult) -> PortResult<QuizResult> {
        let _guard = self.write_lock.lock().await;
        let mut results: Vec<QuizResult> = self.read_json(QUIZ_RESULTS_KEY).await?;
        let saved = QuizResult::from_new(Uuid::new_v4(), result);
        results.insert(0, saved.clone());
        self.write_json(QUIZ_RESULTS_KEY, &results).await?;
        Ok(saved)
    }

    async fn get_all(&self) -> PortResult<Vec<QuizResult>> {
        self.read_json(QUIZ_RESULTS_KEY).await
    }
}

//=========================================================================================
// `SettingsStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl SettingsStore for DbAdapter {
    async fn get_api_key(&self) -> PortResult<Option<String>> {
        Ok(self
            .read_raw(API_KEY_KEY)
            .await?
            .filter(|key| !key.trim().is_empty()))
    }

    async fn save_api_key(&self, api_key: &str) -> PortResult<()> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(PortError::InvalidInput("API key must not be empty".to_string()));
        }
        self.write_raw(API_KEY_KEY, api_key).await
    }

    async fn delete_api_key(&self) -> PortResult<()> {
        self.delete_raw(API_KEY_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use language_buddy_core::domain::{QuizAnswer, VocabItem};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn adapter() -> DbAdapter {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let adapter = DbAdapter::new(pool);
        adapter.run_migrations().await.unwrap();
        adapter
    }

    fn set(topic: &str) -> VocabSet {
        VocabSet {
            id: Uuid::new_v4(),
            topic: topic.to_string(),
            language: "french".to_string(),
            vocab_list: vec![VocabItem::new("chat", "cat"), VocabItem::new("chien", "dog")],
            saved_at: Utc::now(),
        }
    }

    fn result(score: usize) -> NewQuizResult {
        NewQuizResult {
            vocab_set_id: None,
            vocab_set_title: Some("All Sets".to_string()),
            score,
            total: 2,
            answers: vec![QuizAnswer {
                question_id: Uuid::new_v4(),
                selected_answer: "cat".to_string(),
                is_correct: true,
            }],
            completed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn vocab_sets_round_trip_in_order() {
        let db = adapter().await;
        assert!(VocabularyStore::get_all(&db).await.unwrap().is_empty());

        let first = set("Animals");
        let second = set("Food");
        VocabularyStore::save(&db, first.clone()).await.unwrap();
        VocabularyStore::save(&db, second.clone()).await.unwrap();

        let stored = VocabularyStore::get_all(&db).await.unwrap();
        assert_eq!(stored, vec![first.clone(), second]);

        let mut renamed = first.clone();
        renamed.topic = "Pets".to_string();
        db.update(renamed).await.unwrap();
        db.delete_word(first.id, 0).await.unwrap();

        let stored = VocabularyStore::get_all(&db).await.unwrap();
        assert_eq!(stored[0].topic, "Pets");
        assert_eq!(stored[0].vocab_list, vec![VocabItem::new("chien", "dog")]);

        db.delete(first.id).await.unwrap();
        assert_eq!(VocabularyStore::get_all(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_targets_are_not_found() {
        let db = adapter().await;
        let existing = set("Animals");
        VocabularyStore::save(&db, existing.clone()).await.unwrap();

        assert!(matches!(
            db.update(set("Ghost")).await,
            Err(PortError::NotFound(_))
        ));
        assert!(matches!(
            db.delete_word(existing.id, 7).await,
            Err(PortError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn corrupt_document_reads_as_empty() {
        let db = adapter().await;
        db.write_raw(VOCAB_SETS_KEY, "{not json").await.unwrap();
        assert!(VocabularyStore::get_all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn quiz_results_are_newest_first() {
        let db = adapter().await;
        let older = QuizResultStore::save(&db, result(1)).await.unwrap();
        let newer = QuizResultStore::save(&db, result(2)).await.unwrap();
        assert_ne!(older.id, newer.id);

        let history = QuizResultStore::get_all(&db).await.unwrap();
        let ids: Vec<Uuid> = history.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert_eq!(history[0].score, 2);
    }

    #[tokio::test]
    async fn api_key_lifecycle() {
        let db = adapter().await;
        assert_eq!(db.get_api_key().await.unwrap(), None);

        db.save_api_key("  fw-secret  ").await.unwrap();
        assert_eq!(db.get_api_key().await.unwrap().as_deref(), Some("fw-secret"));

        assert!(matches!(
            db.save_api_key("   ").await,
            Err(PortError::InvalidInput(_))
        ));

        db.delete_api_key().await.unwrap();
        assert_eq!(db.get_api_key().await.unwrap(), None);
    }
}
