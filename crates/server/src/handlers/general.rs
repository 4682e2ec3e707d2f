//! # General Route Handlers
//!
//! Health check and the status payload that drives the page header, side panel,
//! and empty-documents banner.

use super::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

// --- API Payloads for General Handlers ---

#[derive(Serialize, Deserialize, Debug)]
pub struct StatusResponse {
    pub title: String,
    pub subtitle: String,
    pub input_placeholder: String,
    pub model: String,
    pub document_count: usize,
    /// Present only when no document was loaded.
    pub warning: Option<String>,
}

// --- General-Purpose Handlers ---

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The handler for `/api/status`.
pub async fn status_handler(State(app_state): State<AppState>) -> Json<StatusResponse> {
    let profile = &app_state.profile;
    let document_count = app_state.knowledge.file_count();

    Json(StatusResponse {
        title: profile.title.clone(),
        subtitle: profile.subtitle.clone(),
        input_placeholder: profile.input_placeholder.clone(),
        model: app_state.model_name.clone(),
        document_count,
        warning: (document_count == 0).then(|| profile.empty_warning.clone()),
    })
}
