pub mod protocol;
pub mod rest;
pub mod state;
pub mod ws_handler;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

pub use rest::ApiDoc;
pub use state::AppState;
pub use ws_handler::ws_handler;

/// Builds the API routes. CORS and Swagger UI are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/languages", get(rest::list_languages_handler))
        .route(
            "/vocab-sets",
            get(rest::list_vocab_sets_handler).post(rest::add_vocab_set_handler),
        )
        .route("/vocab-sets/manual", post(rest::add_manual_vocab_set_handler))
        .route("/vocab-sets/{id}", delete(rest::delete_vocab_set_handler))
        .route(
            "/vocab-sets/{id}/words/{index}",
            delete(rest::delete_word_handler),
        )
        .route("/chat", post(rest::chat_handler))
        .route(
            "/settings/api-key",
            get(rest::get_api_key_status_handler)
                .put(rest::save_api_key_handler)
                .delete(rest::delete_api_key_handler),
        )
        .route("/quiz", post(rest::generate_quiz_handler))
        .route(
            "/quiz/results",
            get(rest::list_quiz_results_handler).post(rest::save_quiz_result_handler),
        )
        .route("/quiz/ws", get(ws_handler))
        .with_state(app_state)
}
