//! # Chat Session Handlers
//!
//! One browser session maps to one chat session. A session is created with the
//! greeting already in its transcript; each posted message runs one full turn.
//!
//! The session mutex is never held across the completion call. A turn locks the
//! session to begin, releases it while the provider answers, and locks it again
//! to record the reply, so the transcript stays readable during a slow answer.

use super::{AppError, AppState};
use askdocs::{ChatMessage, SessionError, TurnState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

// --- API Payloads for Chat Handlers ---

#[derive(Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub messages: Vec<ChatMessage>,
    /// True while a question is waiting for its answer.
    #[serde(default)]
    pub pending: bool,
}

#[derive(Deserialize, Debug)]
pub struct MessageRequest {
    pub content: String,
}

/// The user message and the reply that answered it.
#[derive(Serialize, Deserialize, Debug)]
pub struct TurnResponse {
    pub question: ChatMessage,
    pub answer: ChatMessage,
}

// --- Chat Handlers ---

/// Handler for `POST /api/sessions`.
pub async fn create_session_handler(
    State(app_state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let (session_id, handle) = app_state
        .sessions
        .create(app_state.profile.clone())
        .await;
    let messages = handle.lock().await.transcript().messages().to_vec();
    info!(%session_id, "Chat session started.");

    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            messages,
            pending: false,
        }),
    )
}

/// Handler for `GET /api/sessions/{id}`. Returns the transcript in order.
pub async fn get_session_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let handle = app_state
        .sessions
        .get(&session_id)
        .await
        .ok_or(AppError::SessionNotFound)?;
    let session = handle.lock().await;

    Ok(Json(SessionResponse {
        session_id,
        messages: session.transcript().messages().to_vec(),
        pending: session.state() == TurnState::AwaitingCompletion,
    }))
}

/// Handler for `POST /api/sessions/{id}/messages`.
///
/// Runs one turn: the question is appended, the prompt is built from the
/// shared knowledge base, and exactly one reply is appended. A completion
/// failure still produces a reply (the apology), so this only fails for input
/// the session refuses. A session already waiting on a completion is busy.
///
/// The completion and the recording of its reply run in their own task, so a
/// client that disconnects mid-turn still leaves the session `Idle`.
pub async fn post_message_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<MessageRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let handle = app_state
        .sessions
        .get(&session_id)
        .await
        .ok_or(AppError::SessionNotFound)?;
    let prompt = handle
        .lock()
        .await
        .begin_turn(&payload.content, &app_state.knowledge)?;

    let provider = app_state.ai_provider.clone();
    let turn = tokio::spawn(
        async move {
            let outcome = provider.generate(&prompt).await;
            if outcome.is_ok() {
                info!("Completion succeeded.");
            }

            let mut session = handle.lock().await;
            let answer = session.finish_turn(outcome)?.clone();
            // The question sits right before the answer: no other turn can
            // interleave while this one is pending.
            let messages = session.transcript().messages();
            let question = messages
                .len()
                .checked_sub(2)
                .and_then(|i| messages.get(i))
                .cloned()
                .ok_or(SessionError::NoPendingTurn)?;
            Ok::<_, SessionError>(TurnResponse { question, answer })
        }
        .instrument(info_span!("chat_turn", %session_id)),
    );

    let response = turn.await.map_err(|e| AppError::Internal(e.into()))??;
    Ok(Json(response))
}

/// Handler for `DELETE /api/sessions/{id}`. Discards the transcript.
pub async fn delete_session_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.sessions.remove(&session_id).await {
        info!(%session_id, "Chat session ended.");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::SessionNotFound)
    }
}
