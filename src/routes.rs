// src/routes.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers::session, state::AppState};

/// Assembles the application router.
///
/// * `/` renders whichever screen the session is on.
/// * Form posts carry the participant's intents and redirect back to `/`.
/// * `/api/session` exposes the same state as JSON.
pub fn create_router(state: AppState) -> Router {
    let intent_routes = Router::new()
        .route("/start", post(session::start))
        .route("/answer", post(session::select_option))
        .route("/next", post(session::go_next))
        .route("/previous", post(session::go_previous))
        .route("/submit", post(session::submit))
        .route("/dismiss", post(session::dismiss));

    Router::new()
        .route("/", get(session::show_screen))
        .route("/api/session", get(session::session_state))
        .merge(intent_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
