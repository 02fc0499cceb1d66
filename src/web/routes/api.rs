//! REST API route definitions.

use axum::{
    routing::{get, post},
    Router,
};

use crate::web::handlers::sessions;
use crate::web::state::WebAppState;

/// Build the API router with all REST endpoints.
pub fn api_routes() -> Router<WebAppState> {
    Router::new()
        // Session routes
        .route("/sessions", post(sessions::start_session))
        .route("/sessions/continue", post(sessions::continue_session))
        // History inspection
        .route("/histories/{token}", get(sessions::get_history))
}
