use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Recommendation payload as produced by the backend: either a freeform
/// "Day: exercise; exercise" text block or a JSON object of unknown shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRecommendation {
    Text(String),
    Structured(Map<String, Value>),
}

// Some backend versions wrap the payload, others return it bare
pub const RECOMMENDATION_ENVELOPE_KEY: &str = "recommendation";
