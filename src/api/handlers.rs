use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::api::errors::AppError;
use crate::clients::models::common::RecommendationKind;
use crate::clients::models::requests::ProfileSnapshot;
use crate::clients::models::responses::RawRecommendation;
use crate::config::Config;
use crate::services::completion::{PROFILE_REQUIRED_FIELDS, completion_percentage};
use crate::services::profile_form::{FormAction, FormState, FormStatus};
use crate::services::profile_metrics::{BmiCategory, bmi, bmi_category, profile_completion};
use crate::services::recommendation::{
    NormalizedRecommendation, RecommendationService, interpret,
};
use crate::services::schedule_parser::{ParsedDayPlan, parse_schedule};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub recommendation_service: RecommendationService,
}

#[derive(Deserialize)]
pub struct ParseScheduleRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct ParseScheduleResponse {
    pub days: Vec<ParsedDayPlan>,
}

#[derive(Deserialize)]
pub struct NormalizeRequest {
    pub kind: RecommendationKind,
    pub payload: RawRecommendation,
}

#[derive(Serialize)]
pub struct RecommendationResponse {
    pub recommendation: NormalizedRecommendation,
    pub profile_completion: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi_category: Option<BmiCategory>,
}

#[derive(Deserialize)]
pub struct CompletionRequest {
    pub profile: Map<String, Value>,
    #[serde(default)]
    pub required_fields: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct CompletionResponse {
    pub completion: u8,
}

#[derive(Deserialize)]
pub struct FormTransitionRequest {
    #[serde(default)]
    pub state: FormState,
    pub action: FormAction,
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn parse_schedule_handler(
    Json(request): Json<ParseScheduleRequest>,
) -> Json<ParseScheduleResponse> {
    let days = parse_schedule(&request.text);
    tracing::debug!(day_count = days.len(), "schedule.parsed");
    Json(ParseScheduleResponse { days })
}

pub async fn normalize_handler(
    Json(request): Json<NormalizeRequest>,
) -> Result<Json<NormalizedRecommendation>, AppError> {
    let recommendation = interpret(request.kind, &request.payload)?;
    tracing::debug!(kind = %request.kind, "recommendation.normalized");
    Ok(Json(recommendation))
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    Path(kind): Path<RecommendationKind>,
    Json(profile): Json<ProfileSnapshot>,
) -> Result<Json<RecommendationResponse>, AppError> {
    validate_profile(&profile)?;

    tracing::info!(
        %kind,
        upstream = %state.config.recommendation_api_url,
        "recommendation.requested"
    );

    let recommendation = state
        .recommendation_service
        .recommend(kind, &profile)
        .await?;

    tracing::info!(%kind, "recommendation.delivered");

    Ok(Json(RecommendationResponse {
        recommendation,
        profile_completion: profile_completion(&profile),
        bmi: bmi(&profile),
        bmi_category: bmi_category(&profile),
    }))
}

fn validate_profile(profile: &ProfileSnapshot) -> Result<(), AppError> {
    if profile.age == 0 {
        return Err(AppError::Validation("age must be greater than zero".to_string()));
    }
    if !(profile.weight.is_finite() && profile.weight > 0.0) {
        return Err(AppError::Validation("weight must be a positive number".to_string()));
    }
    if !(profile.height.is_finite() && profile.height > 0.0) {
        return Err(AppError::Validation("height must be a positive number".to_string()));
    }
    Ok(())
}

pub async fn completion_handler(Json(request): Json<CompletionRequest>) -> Json<CompletionResponse> {
    let completion = match &request.required_fields {
        Some(fields) => completion_percentage(&request.profile, fields),
        None => completion_percentage(&request.profile, PROFILE_REQUIRED_FIELDS),
    };
    Json(CompletionResponse { completion })
}

pub async fn form_transition_handler(
    Json(request): Json<FormTransitionRequest>,
) -> Json<FormState> {
    let next = request.state.apply(request.action);
    if let FormStatus::Submitted { profile } = &next.status {
        tracing::info!(completion = profile_completion(profile), "profile_form.submitted");
    }
    Json(next)
}
