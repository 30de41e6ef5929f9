use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/demographic-view", get(handlers::demographic_view))
        .route("/api/status", get(handlers::get_status))
        .route("/api/refresh", post(handlers::refresh))
        .route("/api/marketing", get(handlers::get_marketing))
        .route("/api/overview", get(handlers::get_overview))
        .route("/api/demographics", get(handlers::get_demographics))
        .with_state(state)
}
