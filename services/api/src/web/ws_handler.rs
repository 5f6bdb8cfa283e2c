//! services/api/src/web/ws_handler.rs
//!
//! The WebSocket quiz runner. Each connection holds at most one quiz session
//! and answers every client message with zero or more server messages.

use crate::web::{
    protocol::{ClientMessage, ServerMessage},
    rest::DEFAULT_QUESTION_COUNT,
    state::AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{stream::StreamExt, SinkExt};
use language_buddy_core::quiz::{
    feedback_for_score, generate_quiz_questions, QuizSession, SetSelection,
};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const NOTHING_TO_QUIZ_MESSAGE: &str =
    "No words available for this quiz. Chat with Dobby or add some words first!";

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    info!("New quiz WebSocket connection established");

    let (mut sender, mut receiver) = socket.split();
    let mut session: Option<QuizSession> = None;

    while let Some(Ok(msg)) = receiver.next().await {
        let replies = match msg {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(client_msg) => handle_client_message(&app_state, &mut session, client_msg).await,
                Err(e) => {
                    warn!("Failed to deserialize client message: {}", e);
                    vec![ServerMessage::error(format!("Unrecognized message: {}", e))]
                }
            },
            Message::Close(_) => {
                info!("Client sent close message.");
                break;
            }
            _ => continue,
        };

        for reply in replies {
            let json = match serde_json::to_string(&reply) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize server message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                error!("Failed to send message, closing connection.");
                return;
            }
        }
    }

    if session.is_some() {
        info!("Connection closed with a quiz in progress; it is discarded.");
    }
    info!("Quiz WebSocket connection closed.");
}

/// Applies one client message to the connection's quiz session.
pub async fn handle_client_message(
    app_state: &AppState,
    session: &mut Option<QuizSession>,
    message: ClientMessage,
) -> Vec<ServerMessage> {
    match message {
        ClientMessage::StartQuiz {
            set_id,
            question_count,
        } => start_quiz(app_state, session, set_id.as_deref(), question_count).await,
        ClientMessage::SubmitAnswer { answer } => submit_answer(app_state, session, &answer).await,
        ClientMessage::AbandonQuiz => {
            if session.take().is_some() {
                info!("Quiz abandoned.");
            }
            Vec::new()
        }
    }
}

async fn start_quiz(
    app_state: &AppState,
    session: &mut Option<QuizSession>,
    set_id: Option<&str>,
    question_count: Option<usize>,
) -> Vec<ServerMessage> {
    let selection = match SetSelection::from_param(set_id) {
        Ok(selection) => selection,
        Err(e) => return vec![ServerMessage::error(format!("Invalid set id: {}", e))],
    };
    let sets = match app_state.library.sets().await {
        Ok(sets) => sets,
        Err(e) => {
            error!("Failed to load vocabulary sets: {:?}", e);
            return vec![ServerMessage::error("Failed to load your vocabulary.")];
        }
    };

    if session.is_some() {
        info!("Replacing the quiz in progress with a new one.");
    }

    let quiz = generate_quiz_questions(
        &sets,
        selection,
        question_count.unwrap_or(DEFAULT_QUESTION_COUNT),
    );
    if quiz.questions.is_empty() {
        *session = None;
        return vec![ServerMessage::NothingToQuiz {
            message: NOTHING_TO_QUIZ_MESSAGE.to_string(),
        }];
    }

    let started = QuizSession::new(quiz.questions, selection.set_id(), quiz.title.clone());
    let mut replies = vec![ServerMessage::QuizStarted {
        title: quiz.title,
        total: started.total(),
    }];
    if let Some(first) = started.current_question() {
        replies.push(ServerMessage::question(0, started.total(), first));
    }
    info!(total = started.total(), "Quiz started");
    *session = Some(started);
    replies
}

async fn submit_answer(
    app_state: &AppState,
    session: &mut Option<QuizSession>,
    answer: &str,
) -> Vec<ServerMessage> {
    let Some(active) = session.as_mut() else {
        return vec![ServerMessage::error("No quiz in progress.")];
    };
    let Some(correct_answer) = active.current_question().map(|q| q.correct_answer.clone()) else {
        return vec![ServerMessage::error("No question left to answer.")];
    };
    let Some(checked) = active.submit_answer(answer) else {
        return vec![ServerMessage::error("No question left to answer.")];
    };

    let mut replies = vec![ServerMessage::AnswerChecked {
        question_id: checked.question_id,
        selected_answer: checked.selected_answer,
        is_correct: checked.is_correct,
        correct_answer,
    }];

    if let Some(next) = active.current_question() {
        replies.push(ServerMessage::question(
            active.current_index(),
            active.total(),
            next,
        ));
        return replies;
    }

    let Some(finished) = session.take() else {
        return replies;
    };
    match app_state.results.save(finished.finish()).await {
        Ok(result) => {
            info!(result_id = %result.id, score = result.score, total = result.total, "Quiz completed");
            replies.push(ServerMessage::QuizCompleted {
                feedback: feedback_for_score(result.score, result.total).to_string(),
                result,
            });
        }
        Err(e) => {
            error!("Failed to save quiz result: {:?}", e);
            replies.push(ServerMessage::error("Failed to save your quiz result."));
        }
    }
    replies
}
