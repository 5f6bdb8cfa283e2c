#![allow(dead_code)]

use std::sync::Arc;

use api_lib::adapters::db::DbAdapter;
use api_lib::adapters::vocab_llm::GENERATION_FAILED_MESSAGE;
use api_lib::config::{Config, DEFAULT_API_BASE, DEFAULT_VOCAB_MODEL};
use api_lib::web::{self, AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use language_buddy_core::domain::{VocabItem, VocabRequest, VocabResponse};
use language_buddy_core::ports::{PortError, PortResult, VocabularyGenerationService};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::sync::Mutex;
use tower::ServiceExt;

/// A tutor that answers every request with the same small list.
#[derive(Default)]
pub struct StubTutor {
    pub fail: bool,
    pub seen_keys: Mutex<Vec<String>>,
}

#[async_trait]
impl VocabularyGenerationService for StubTutor {
    async fn generate_vocabulary(
        &self,
        request: &VocabRequest,
        api_key: &str,
    ) -> PortResult<VocabResponse> {
        self.seen_keys.lock().await.push(api_key.to_string());
        if self.fail {
            return Err(PortError::Unexpected(GENERATION_FAILED_MESSAGE.to_string()));
        }
        Ok(VocabResponse {
            topic: "Food".to_string(),
            target_language: request.target_language.clone(),
            vocab_list: vec![VocabItem::new("pain", "bread"), VocabItem::new("lait", "milk")],
            summary_message: "Here are 2 words about Food".to_string(),
        })
    }
}

pub fn test_config(env_key: Option<&str>) -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        database_url: "sqlite::memory:".to_string(),
        log_level: tracing::Level::INFO,
        fireworks_api_key: env_key.map(str::to_string),
        fireworks_api_base: DEFAULT_API_BASE.to_string(),
        vocab_model: DEFAULT_VOCAB_MODEL.to_string(),
        vocab_temperature: 0.6,
        cors_origin: "http://localhost:5173".to_string(),
    }
}

pub async fn test_state_with(env_key: Option<&str>, tutor: Arc<StubTutor>) -> Arc<AppState> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let db = Arc::new(DbAdapter::new(pool));
    db.run_migrations().await.unwrap();

    Arc::new(AppState::new(
        db.clone(),
        db.clone(),
        db,
        tutor,
        Arc::new(test_config(env_key)),
    ))
}

pub async fn test_state() -> Arc<AppState> {
    test_state_with(None, Arc::new(StubTutor::default())).await
}

pub async fn create_test_app() -> Router {
    web::router(test_state().await)
}

/// Sends one request and returns the status plus the body as JSON
/// (`Null` when empty, a string when not JSON).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}
