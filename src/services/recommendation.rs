use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::clients::models::common::RecommendationKind;
use crate::clients::models::requests::ProfileSnapshot;
use crate::clients::models::responses::RawRecommendation;
use crate::clients::recommendations::RecommendationClient;
use crate::services::display::{DisplayEntry, display_entries, format_day_plan};
use crate::services::plan_normalizer::{NormalizedPlan, missing_sections, normalize};
use crate::services::schedule_parser::{ParsedDayPlan, parse_schedule};

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("unparseable recommendation: {0}")]
    Unparseable(String),
}

/// Display-ready form of a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum NormalizedRecommendation {
    Schedule {
        days: Vec<ParsedDayPlan>,
    },
    Plan {
        plan: NormalizedPlan,
        #[serde(skip_serializing_if = "Option::is_none")]
        schedule: Option<Vec<ParsedDayPlan>>,
        additional_details: Vec<DisplayEntry>,
    },
}

pub fn interpret(
    kind: RecommendationKind,
    raw: &RawRecommendation,
) -> Result<NormalizedRecommendation, RecommendationError> {
    match raw {
        RawRecommendation::Structured(fields) => Ok(plan_recommendation(kind, fields)),
        RawRecommendation::Text(text) if looks_like_json(text) => {
            let fields = match parse_json_recommendation(text)? {
                Value::Object(fields) => fields,
                other => {
                    return Err(RecommendationError::Unparseable(format!(
                        "expected a JSON object, found {}",
                        json_type_name(&other)
                    )));
                }
            };
            Ok(plan_recommendation(kind, &fields))
        }
        RawRecommendation::Text(text) => Ok(NormalizedRecommendation::Schedule {
            days: parse_schedule(text),
        }),
    }
}

fn plan_recommendation(
    kind: RecommendationKind,
    fields: &Map<String, Value>,
) -> NormalizedRecommendation {
    let plan = normalize(kind, fields);

    debug!(
        kind = %plan.kind(),
        missing = ?missing_sections(kind, fields),
        additional = plan.additional().len(),
        "recommendation.plan_normalized"
    );

    let schedule = match &plan {
        NormalizedPlan::Workout(workout) => workout.parsed_schedule(),
        _ => None,
    };
    let additional_details = display_entries(plan.additional());

    NormalizedRecommendation::Plan {
        plan,
        schedule,
        additional_details,
    }
}

const FENCE: &str = "```";

// Only an object or a code fence marks text as JSON; bracketed headings like
// "[Week 1]" stay freeform schedules.
fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with(FENCE) || text.contains("```json")
}

/// Parses recommendation text as JSON, unwrapping a fenced code block if present.
pub fn parse_json_recommendation(text: &str) -> Result<Value, RecommendationError> {
    serde_json::from_str(extract_json_block(text))
        .map_err(|e| RecommendationError::Unparseable(e.to_string()))
}

fn extract_json_block(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return trimmed;
    }
    fenced_block(trimmed).unwrap_or(trimmed)
}

/// Body of the first code fence, with an optional `json` tag dropped. An
/// unterminated fence runs to the end of the text.
fn fenced_block(text: &str) -> Option<&str> {
    let (_, after_open) = text.split_once(FENCE)?;
    let body = after_open.strip_prefix("json").unwrap_or(after_open);
    let body = body.split_once(FENCE).map_or(body, |(inner, _)| inner);
    Some(body.trim())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Clone)]
pub struct RecommendationService {
    client: RecommendationClient,
}

impl RecommendationService {
    pub fn new(client: RecommendationClient) -> Self {
        Self { client }
    }

    pub async fn recommend(
        &self,
        kind: RecommendationKind,
        profile: &ProfileSnapshot,
    ) -> anyhow::Result<NormalizedRecommendation> {
        let raw = self.client.fetch_recommendation(kind, profile).await?;
        let recommendation = interpret(kind, &raw)?;

        if let NormalizedRecommendation::Schedule { days } = &recommendation {
            for day in days {
                debug!(%kind, plan = %format_day_plan(day), "recommendation.day_plan");
            }
        }

        Ok(recommendation)
    }
}
