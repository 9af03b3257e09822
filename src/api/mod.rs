use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

pub mod handlers;
pub mod requests;
pub mod responses;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/form", get(handlers::get_form))
        .route("/api/bedtime", post(handlers::post_bedtime))
        .route("/api/health", get(handlers::get_health))
        .with_state(state)
}
