//! crates/language_buddy_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core depends on.
//! These traits form the boundary of the hexagonal architecture, keeping the
//! quiz engine and the vocabulary library independent of the concrete store
//! and of the text-generation endpoint.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewQuizResult, QuizResult, VocabRequest, VocabResponse, VocabSet};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    MissingCredential(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait VocabularyStore: Send + Sync {
    /// Every saved set, in insertion order.
    async fn get_all(&self) -> PortResult<Vec<VocabSet>>;

    /// Appends a new set.
    async fn save(&self, set: VocabSet) -> PortResult<()>;

    /// Replaces the set with the same id.
    async fn update(&self, set: VocabSet) -> PortResult<()>;

    async fn delete(&self, set_id: Uuid) -> PortResult<()>;

    /// Removes one word from one set by position.
    async fn delete_word(&self, set_id: Uuid, word_index: usize) -> PortResult<()>;
}

#[async_trait]
pub trait QuizResultStore: Send + Sync {
    /// Assigns an id, prepends the result to the history and persists it.
    async fn save(&self, result: NewQuizResult) -> PortResult<QuizResult>;

    /// The full history, newest first.
    async fn get_all(&self) -> PortResult<Vec<QuizResult>>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_api_key(&self) -> PortResult<Option<String>>;

    async fn save_api_key(&self, api_key: &str) -> PortResult<()>;

    async fn delete_api_key(&self) -> PortResult<()>;
}

#[async_trait]
pub trait VocabularyGenerationService: Send + Sync {
    /// Asks the tutor model for a vocabulary list and parses its reply.
    async fn generate_vocabulary(
        &self,
        request: &VocabRequest,
        api_key: &str,
    ) -> PortResult<VocabResponse>;
}
