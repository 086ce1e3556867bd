use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub age: u32,
    pub gender: String,
    pub weight: f64, // kg
    pub height: f64, // cm
    pub fitness_level: String,
    pub activity_level: String,
    pub goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_conditions: Option<String>,
}
