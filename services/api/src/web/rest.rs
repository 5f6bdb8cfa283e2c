//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI document.

use crate::adapters::vocab_llm::GENERATION_FAILED_MESSAGE;
use crate::error::port_error_response;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use language_buddy_core::domain::{
    Language, NewQuizResult, NewVocabSet, QuizAnswer, QuizQuestion, VocabItem, VocabRequest,
    DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES,
};
use language_buddy_core::ports::PortError;
use language_buddy_core::quiz::{feedback_for_score, generate_quiz_questions, SetSelection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

pub const DEFAULT_QUESTION_COUNT: usize = 10;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_languages_handler,
        list_vocab_sets_handler,
        add_vocab_set_handler,
        add_manual_vocab_set_handler,
        delete_vocab_set_handler,
        delete_word_handler,
        chat_handler,
        get_api_key_status_handler,
        save_api_key_handler,
        delete_api_key_handler,
        generate_quiz_handler,
        list_quiz_results_handler,
        save_quiz_result_handler,
    ),
    components(
        schemas(
            LanguagesResponse,
            VocabSetPayload,
            AddVocabSetResponse,
            ChatRequest,
            ApiKeyStatus,
            SaveApiKeyRequest,
            GenerateQuizRequest,
            QuizResponse,
            SubmitQuizResultRequest,
            QuizResultResponse,
        )
    ),
    tags(
        (name = "Language Buddy API", description = "Vocabulary library, tutor chat and quizzes.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct LanguagesResponse {
    #[schema(value_type = Vec<Object>)]
    pub languages: Vec<Language>,
    pub default_language: String,
}

/// A vocabulary set as submitted by the client, before it gets an id.
#[derive(Deserialize, ToSchema)]
pub struct VocabSetPayload {
    pub topic: String,
    #[serde(default)]
    pub language: String,
    #[schema(value_type = Vec<Object>)]
    pub vocab_list: Vec<VocabItem>,
}

impl From<VocabSetPayload> for NewVocabSet {
    fn from(payload: VocabSetPayload) -> Self {
        NewVocabSet {
            topic: payload.topic,
            language: payload.language,
            vocab_list: payload.vocab_list,
        }
    }
}

/// The outcome of saving a set, with the tutor's confirmation line.
#[derive(Serialize, ToSchema)]
pub struct AddVocabSetResponse {
    pub merged: bool,
    pub new_words_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_words_count: Option<usize>,
    pub message: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Language code; defaults to French.
    pub target_language: Option<String>,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ApiKeyStatus {
    pub configured: bool,
    /// `stored` or `environment` when a key is available.
    pub source: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct SaveApiKeyRequest {
    pub api_key: String,
}

#[derive(Deserialize, ToSchema)]
pub struct GenerateQuizRequest {
    /// A set id, or `all` / omitted for every set.
    pub set_id: Option<String>,
    #[serde(default = "default_question_count")]
    pub question_count: usize,
}

fn default_question_count() -> usize {
    DEFAULT_QUESTION_COUNT
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct QuizResponse {
    #[schema(value_type = Vec<Object>)]
    pub questions: Vec<QuizQuestion>,
    pub title: Option<String>,
    /// Set the result should be attributed to; absent for an all-sets quiz.
    pub vocab_set_id: Option<Uuid>,
}

#[derive(Deserialize, ToSchema)]
pub struct SubmitQuizResultRequest {
    pub vocab_set_id: Option<Uuid>,
    pub vocab_set_title: Option<String>,
    #[schema(value_type = Vec<Object>)]
    pub answers: Vec<QuizAnswer>,
    /// Number of questions in the quiz; defaults to the number of answers.
    pub total: Option<usize>,
}

#[derive(Serialize, ToSchema)]
pub struct QuizResultResponse {
    #[schema(value_type = Object)]
    pub result: language_buddy_core::domain::QuizResult,
    pub feedback: String,
}

//=========================================================================================
// Languages
//=========================================================================================

/// List the languages the tutor can teach.
#[utoipa::path(
    get,
    path = "/languages",
    responses((status = 200, description = "Supported languages", body = LanguagesResponse))
)]
pub async fn list_languages_handler() -> impl IntoResponse {
    Json(LanguagesResponse {
        languages: SUPPORTED_LANGUAGES.to_vec(),
        default_language: DEFAULT_LANGUAGE.to_string(),
    })
}

//=========================================================================================
// Vocabulary Sets
//=========================================================================================

/// List every saved vocabulary set.
#[utoipa::path(
    get,
    path = "/vocab-sets",
    responses(
        (status = 200, description = "All saved sets, oldest first"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_vocab_sets_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let sets = app_state.library.sets().await.map_err(port_error_response)?;
    Ok(Json(sets))
}

/// Save a tutor-generated set, merging it into an existing set with the same
/// topic and language.
#[utoipa::path(
    post,
    path = "/vocab-sets",
    request_body = VocabSetPayload,
    responses(
        (status = 201, description = "A new set was created", body = AddVocabSetResponse),
        (status = 200, description = "Words were merged into an existing set", body = AddVocabSetResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_vocab_set_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<VocabSetPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    save_vocab_set(&app_state, payload.into()).await
}

/// Save a hand-entered set after validating it.
#[utoipa::path(
    post,
    path = "/vocab-sets/manual",
    request_body = VocabSetPayload,
    responses(
        (status = 201, description = "A new set was created", body = AddVocabSetResponse),
        (status = 200, description = "Words were merged into an existing set", body = AddVocabSetResponse),
        (status = 400, description = "A required field is missing")
    )
)]
pub async fn add_manual_vocab_set_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<VocabSetPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut new_set = NewVocabSet::from(payload)
        .validated_manual_entry()
        .map_err(port_error_response)?;
    if new_set.language.is_empty() {
        new_set.language = DEFAULT_LANGUAGE.to_string();
    }
    save_vocab_set(&app_state, new_set).await
}

async fn save_vocab_set(
    app_state: &AppState,
    new_set: NewVocabSet,
) -> Result<(StatusCode, Json<AddVocabSetResponse>), (StatusCode, String)> {
    let topic = new_set.topic.clone();
    let outcome = app_state
        .library
        .add_vocab_set(new_set)
        .await
        .map_err(port_error_response)?;

    let status = if outcome.merged {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((
        status,
        Json(AddVocabSetResponse {
            message: outcome.confirmation_message(&topic),
            merged: outcome.merged,
            new_words_count: outcome.new_words_count,
            existing_words_count: outcome.existing_words_count,
        }),
    ))
}

/// Delete a vocabulary set.
#[utoipa::path(
    delete,
    path = "/vocab-sets/{id}",
    params(("id" = Uuid, Path, description = "The set to delete.")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such set")
    )
)]
pub async fn delete_vocab_set_handler(
    State(app_state): State<Arc<AppState>>,
    Path(set_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state
        .library
        .remove_set(set_id)
        .await
        .map_err(port_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete one word from a vocabulary set by position.
#[utoipa::path(
    delete,
    path = "/vocab-sets/{id}/words/{index}",
    params(
        ("id" = Uuid, Path, description = "The set holding the word."),
        ("index" = usize, Path, description = "Zero-based position of the word.")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such set or word")
    )
)]
pub async fn delete_word_handler(
    State(app_state): State<Arc<AppState>>,
    Path((set_id, word_index)): Path<(Uuid, usize)>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state
        .library
        .remove_word(set_id, word_index)
        .await
        .map_err(port_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Tutor Chat
//=========================================================================================

/// Ask the tutor for a vocabulary list. Nothing is saved until the client
/// posts the reply to `/vocab-sets`.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "The tutor's vocabulary list"),
        (status = 400, description = "Empty message or missing API key"),
        (status = 502, description = "The tutor could not produce a list")
    )
)]
pub async fn chat_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let instruction = payload.message.trim().to_string();
    if instruction.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Message is required".to_string()));
    }
    let target_language = payload
        .target_language
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let api_key = app_state
        .resolve_api_key()
        .await
        .map_err(port_error_response)?;

    let request = VocabRequest {
        target_language,
        instruction,
    };
    match app_state
        .vocab_generator
        .generate_vocabulary(&request, &api_key)
        .await
    {
        Ok(response) => {
            info!(topic = %response.topic, words = response.vocab_list.len(), "Tutor replied");
            Ok(Json(response))
        }
        Err(PortError::Unexpected(e)) => {
            error!("Tutor request failed: {}", e);
            Err((StatusCode::BAD_GATEWAY, GENERATION_FAILED_MESSAGE.to_string()))
        }
        Err(e) => Err(port_error_response(e)),
    }
}

//=========================================================================================
// Settings
//=========================================================================================

/// Report whether a tutor API key is available.
#[utoipa::path(
    get,
    path = "/settings/api-key",
    responses((status = 200, description = "Key status", body = ApiKeyStatus))
)]
pub async fn get_api_key_status_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let stored = app_state
        .settings
        .get_api_key()
        .await
        .map_err(port_error_response)?;

    let source = if stored.is_some() {
        Some("stored")
    } else if app_state.config.fireworks_api_key.is_some() {
        Some("environment")
    } else {
        None
    };
    Ok(Json(ApiKeyStatus {
        configured: source.is_some(),
        source: source.map(str::to_string),
    }))
}

/// Store the tutor API key.
#[utoipa::path(
    put,
    path = "/settings/api-key",
    request_body = SaveApiKeyRequest,
    responses(
        (status = 204, description = "Stored"),
        (status = 400, description = "Empty key")
    )
)]
pub async fn save_api_key_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<SaveApiKeyRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state
        .settings
        .save_api_key(&payload.api_key)
        .await
        .map_err(port_error_response)?;
    info!("Tutor API key stored");
    Ok(StatusCode::NO_CONTENT)
}

/// Remove the stored tutor API key.
#[utoipa::path(
    delete,
    path = "/settings/api-key",
    responses((status = 204, description = "Removed"))
)]
pub async fn delete_api_key_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state
        .settings
        .delete_api_key()
        .await
        .map_err(port_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Quiz
//=========================================================================================

/// Generate a quiz from one set or from every set.
#[utoipa::path(
    post,
    path = "/quiz",
    request_body = GenerateQuizRequest,
    responses(
        (status = 200, description = "The questions, possibly fewer than requested", body = QuizResponse),
        (status = 400, description = "Malformed set id")
    )
)]
pub async fn generate_quiz_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let selection = SetSelection::from_param(payload.set_id.as_deref())
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid set id: {}", e)))?;
    let sets = app_state.library.sets().await.map_err(port_error_response)?;

    let quiz = generate_quiz_questions(&sets, selection, payload.question_count);
    Ok(Json(QuizResponse {
        questions: quiz.questions,
        title: quiz.title,
        vocab_set_id: selection.set_id(),
    }))
}

/// List past quiz results, newest first.
#[utoipa::path(
    get,
    path = "/quiz/results",
    responses((status = 200, description = "Quiz history"))
)]
pub async fn list_quiz_results_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let results = app_state.results.get_all().await.map_err(port_error_response)?;
    Ok(Json(results))
}

/// Record a finished quiz. The score is computed from the answers.
#[utoipa::path(
    post,
    path = "/quiz/results",
    request_body = SubmitQuizResultRequest,
    responses(
        (status = 201, description = "Stored result with encouragement", body = QuizResultResponse),
        (status = 400, description = "Total smaller than the number of answers")
    )
)]
pub async fn save_quiz_result_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<SubmitQuizResultRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let total = payload.total.unwrap_or(payload.answers.len());
    if total < payload.answers.len() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Total must not be smaller than the number of answers".to_string(),
        ));
    }

    let mut vocab_set_title = payload.vocab_set_title.filter(|t| !t.is_empty());
    if vocab_set_title.is_none() {
        if let Some(set_id) = payload.vocab_set_id {
            let sets = app_state.library.sets().await.map_err(port_error_response)?;
            vocab_set_title = sets.into_iter().find(|s| s.id == set_id).map(|s| s.topic);
        }
    }

    let new_result = NewQuizResult {
        vocab_set_id: payload.vocab_set_id,
        vocab_set_title,
        score: payload.answers.iter().filter(|a| a.is_correct).count(),
        total,
        answers: payload.answers,
        completed_at: Utc::now(),
    };
    let saved = app_state
        .results
        .save(new_result)
        .await
        .map_err(port_error_response)?;

    info!(result_id = %saved.id, score = saved.score, total = saved.total, "Quiz result saved");
    Ok((
        StatusCode::CREATED,
        Json(QuizResultResponse {
            feedback: feedback_for_score(saved.score, saved.total).to_string(),
            result: saved,
        }),
    ))
}
