use super::{frontend::frontend_router, handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .merge(frontend_router::<AppState>())
        .route("/health", get(handlers::health_check))
        .route("/api/status", get(handlers::status_handler))
        .route("/api/sessions", post(handlers::create_session_handler))
        .route(
            "/api/sessions/{id}",
            get(handlers::get_session_handler).delete(handlers::delete_session_handler),
        )
        .route(
            "/api/sessions/{id}/messages",
            post(handlers::post_message_handler),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
