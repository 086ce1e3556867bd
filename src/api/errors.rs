use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::recommendation::RecommendationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Unparseable(#[from] RecommendationError),

    #[error("Upstream error: {0}")]
    Upstream(anyhow::Error),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<RecommendationError>() {
            Ok(recommendation_error) => AppError::Unparseable(recommendation_error),
            Err(error) => AppError::Upstream(error),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unparseable(e) => {
                tracing::warn!(error = %e, "recommendation.unparseable");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNPARSEABLE_RECOMMENDATION",
                    e.to_string(),
                )
            }
            AppError::Upstream(e) => {
                tracing::error!(error = %e, "recommendation.upstream_failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The recommendation service is unavailable".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
