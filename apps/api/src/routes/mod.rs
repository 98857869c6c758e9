pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview API
        .route("/api/v1/sessions", post(handlers::handle_start_session))
        .route(
            "/api/v1/sessions/:id/turns",
            post(handlers::handle_submit_turn),
        )
        .route(
            "/api/v1/sessions/:id/preview",
            get(handlers::handle_fetch_preview),
        )
        .route("/api/v1/sessions/:id", delete(handlers::handle_end_session))
        .with_state(state)
}
