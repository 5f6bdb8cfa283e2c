//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use language_buddy_core::library::VocabLibrary;
use language_buddy_core::ports::{
    PortError, PortResult, QuizResultStore, SettingsStore, VocabularyGenerationService,
    VocabularyStore,
};
use std::sync::Arc;

pub const MISSING_API_KEY_MESSAGE: &str =
    "Missing Fireworks API key. Please configure it in Settings.";

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub library: VocabLibrary,
    pub results: Arc<dyn QuizResultStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub vocab_generator: Arc<dyn VocabularyGenerationService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        vocab_store: Arc<dyn VocabularyStore>,
        results: Arc<dyn QuizResultStore>,
        settings: Arc<dyn SettingsStore>,
        vocab_generator: Arc<dyn VocabularyGenerationService>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            library: VocabLibrary::new(vocab_store),
            results,
            settings,
            vocab_generator,
            config,
        }
    }

    /// The key used for tutor requests: the stored one first, then the
    /// environment fallback.
    pub async fn resolve_api_key(&self) -> PortResult<String> {
        if let Some(key) = self.settings.get_api_key().await? {
            return Ok(key);
        }
        self.config
            .fireworks_api_key
            .clone()
            .ok_or_else(|| PortError::MissingCredential(MISSING_API_KEY_MESSAGE.to_string()))
    }
}
