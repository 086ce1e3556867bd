use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::api::handlers::{
    AppState, completion_handler, form_transition_handler, health_handler, normalize_handler,
    parse_schedule_handler, recommend_handler,
};

pub mod errors;
pub mod handlers;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/schedule/parse", post(parse_schedule_handler))
        .route("/recommendations/normalize", post(normalize_handler))
        .route("/recommendations/{kind}", post(recommend_handler))
        .route("/profile/completion", post(completion_handler))
        .route("/profile/form", post(form_transition_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
