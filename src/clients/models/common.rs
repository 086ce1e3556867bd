use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Workout,
    Nutrition,
    Meditation,
}

impl RecommendationKind {
    /// Path segment used by the recommendation backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Workout => "workout",
            RecommendationKind::Nutrition => "nutrition",
            RecommendationKind::Meditation => "meditation",
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
