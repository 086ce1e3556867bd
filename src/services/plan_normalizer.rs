use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::models::common::RecommendationKind;
use crate::services::schedule_parser::{ParsedDayPlan, assemble, parse_schedule};

pub const WORKOUT_SECTIONS: &[&str] = &[
    "workout_overview",
    "weekly_workout_schedule",
    "warm_up_routine",
    "cool_down_routine",
    "workout_safety_guidelines",
];

pub const NUTRITION_SECTIONS: &[&str] = &[
    "nutrition_overview",
    "daily_meal_plan",
    "macronutrient_breakdown",
    "hydration_guidelines",
    "nutrition_safety_guidelines",
];

pub const MEDITATION_SECTIONS: &[&str] = &[
    "meditation_overview",
    "daily_meditation_schedule",
    "recommended_techniques",
    "breathing_exercises",
    "meditation_safety_guidelines",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkoutPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_overview: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_workout_schedule: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warm_up_routine: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cool_down_routine: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_safety_guidelines: Option<Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub additional: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NutritionPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition_overview: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_meal_plan: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macronutrient_breakdown: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydration_guidelines: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition_safety_guidelines: Option<Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub additional: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeditationPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meditation_overview: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_meditation_schedule: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_techniques: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breathing_exercises: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meditation_safety_guidelines: Option<Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub additional: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizedPlan {
    Workout(WorkoutPlan),
    Nutrition(NutritionPlan),
    Meditation(MeditationPlan),
}

impl NormalizedPlan {
    pub fn kind(&self) -> RecommendationKind {
        match self {
            NormalizedPlan::Workout(_) => RecommendationKind::Workout,
            NormalizedPlan::Nutrition(_) => RecommendationKind::Nutrition,
            NormalizedPlan::Meditation(_) => RecommendationKind::Meditation,
        }
    }

    /// Keys without a dedicated field, kept for generic display.
    pub fn additional(&self) -> &Map<String, Value> {
        match self {
            NormalizedPlan::Workout(plan) => &plan.additional,
            NormalizedPlan::Nutrition(plan) => &plan.additional,
            NormalizedPlan::Meditation(plan) => &plan.additional,
        }
    }
}

pub fn sections_for(kind: RecommendationKind) -> &'static [&'static str] {
    match kind {
        RecommendationKind::Workout => WORKOUT_SECTIONS,
        RecommendationKind::Nutrition => NUTRITION_SECTIONS,
        RecommendationKind::Meditation => MEDITATION_SECTIONS,
    }
}

/// Known sections of `kind` that `raw` does not provide.
pub fn missing_sections(kind: RecommendationKind, raw: &Map<String, Value>) -> Vec<&'static str> {
    sections_for(kind)
        .iter()
        .copied()
        .filter(|key| raw.get(*key).is_none_or(Value::is_null))
        .collect()
}

// Explicit nulls are treated like missing keys. `shift_remove` keeps the
// remaining keys in source order.
fn take_section(fields: &mut Map<String, Value>, key: &str) -> Option<Value> {
    fields.shift_remove(key).filter(|value| !value.is_null())
}

pub fn normalize_workout(raw: &Map<String, Value>) -> WorkoutPlan {
    let mut fields = raw.clone();
    WorkoutPlan {
        workout_overview: take_section(&mut fields, "workout_overview"),
        weekly_workout_schedule: take_section(&mut fields, "weekly_workout_schedule"),
        warm_up_routine: take_section(&mut fields, "warm_up_routine"),
        cool_down_routine: take_section(&mut fields, "cool_down_routine"),
        workout_safety_guidelines: take_section(&mut fields, "workout_safety_guidelines"),
        additional: fields,
    }
}

pub fn normalize_nutrition(raw: &Map<String, Value>) -> NutritionPlan {
    let mut fields = raw.clone();
    NutritionPlan {
        nutrition_overview: take_section(&mut fields, "nutrition_overview"),
        daily_meal_plan: take_section(&mut fields, "daily_meal_plan"),
        macronutrient_breakdown: take_section(&mut fields, "macronutrient_breakdown"),
        hydration_guidelines: take_section(&mut fields, "hydration_guidelines"),
        nutrition_safety_guidelines: take_section(&mut fields, "nutrition_safety_guidelines"),
        additional: fields,
    }
}

pub fn normalize_meditation(raw: &Map<String, Value>) -> MeditationPlan {
    let mut fields = raw.clone();
    MeditationPlan {
        meditation_overview: take_section(&mut fields, "meditation_overview"),
        daily_meditation_schedule: take_section(&mut fields, "daily_meditation_schedule"),
        recommended_techniques: take_section(&mut fields, "recommended_techniques"),
        breathing_exercises: take_section(&mut fields, "breathing_exercises"),
        meditation_safety_guidelines: take_section(&mut fields, "meditation_safety_guidelines"),
        additional: fields,
    }
}

pub fn normalize(kind: RecommendationKind, raw: &Map<String, Value>) -> NormalizedPlan {
    match kind {
        RecommendationKind::Workout => NormalizedPlan::Workout(normalize_workout(raw)),
        RecommendationKind::Nutrition => NormalizedPlan::Nutrition(normalize_nutrition(raw)),
        RecommendationKind::Meditation => NormalizedPlan::Meditation(normalize_meditation(raw)),
    }
}

impl WorkoutPlan {
    /// Reads `weekly_workout_schedule` as day lines when it is given as a text
    /// block, a list of lines, or a `{day: exercises}` object. Other shapes are
    /// left to generic display.
    pub fn parsed_schedule(&self) -> Option<Vec<ParsedDayPlan>> {
        match self.weekly_workout_schedule.as_ref()? {
            Value::String(text) => Some(parse_schedule(text)),
            Value::Array(items) => {
                let lines = items
                    .iter()
                    .map(|item| item.as_str())
                    .collect::<Option<Vec<_>>>()?;
                Some(assemble(&lines))
            }
            Value::Object(days) => {
                let lines = days
                    .iter()
                    .map(|(day, exercises)| {
                        day_exercises_text(exercises).map(|text| format!("{}: {}", day, text))
                    })
                    .collect::<Option<Vec<_>>>()?;
                Some(assemble(&lines))
            }
            _ => None,
        }
    }
}

fn day_exercises_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str())
            .collect::<Option<Vec<_>>>()
            .map(|exercises| exercises.join("; ")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::schedule_parser::ExerciseType;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(fields) => fields,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn test_normalize_keeps_present_sections_only() {
        let raw = object(json!({ "workout_overview": { "duration": "4 weeks" } }));
        let plan = normalize_workout(&raw);

        assert_eq!(
            plan.workout_overview.as_ref().and_then(|o| o.get("duration")),
            Some(&json!("4 weeks"))
        );
        assert!(plan.weekly_workout_schedule.is_none());
        assert!(plan.additional.is_empty());

        let serialized = serde_json::to_value(NormalizedPlan::Workout(plan)).unwrap();
        assert_eq!(
            serialized,
            json!({
                "kind": "workout",
                "workout_overview": { "duration": "4 weeks" }
            })
        );
        assert!(serialized.get("weekly_workout_schedule").is_none());
    }

    #[test]
    fn test_normalize_empty_object() {
        assert_eq!(normalize_workout(&Map::new()), WorkoutPlan::default());
        assert_eq!(normalize_nutrition(&Map::new()), NutritionPlan::default());
        assert_eq!(normalize_meditation(&Map::new()), MeditationPlan::default());
    }

    #[test]
    fn test_unknown_keys_are_kept_for_display() {
        let raw = object(json!({
            "nutrition_overview": "High protein",
            "daily_meal_plan": [{ "meal": "breakfast", "items": ["oats", "berries"] }],
            "shopping_list": ["tofu", "rice"],
            "hydration_guidelines": null
        }));

        let plan = normalize(RecommendationKind::Nutrition, &raw);
        assert_eq!(plan.kind(), RecommendationKind::Nutrition);
        assert_eq!(plan.additional().len(), 1);
        assert_eq!(plan.additional()["shopping_list"], json!(["tofu", "rice"]));

        match plan {
            NormalizedPlan::Nutrition(nutrition) => {
                assert_eq!(nutrition.nutrition_overview, Some(json!("High protein")));
                assert_eq!(
                    nutrition.daily_meal_plan,
                    Some(json!([{ "meal": "breakfast", "items": ["oats", "berries"] }]))
                );
                assert!(nutrition.hydration_guidelines.is_none());
            }
            other => panic!("expected nutrition plan, got {:?}", other),
        }
    }

    #[test]
    fn test_sections_for_kind() {
        assert!(sections_for(RecommendationKind::Workout).contains(&"warm_up_routine"));
        assert!(sections_for(RecommendationKind::Meditation).contains(&"breathing_exercises"));
        assert_eq!(sections_for(RecommendationKind::Nutrition).len(), 5);
    }

    #[test]
    fn test_missing_sections() {
        let raw = object(json!({
            "meditation_overview": "Evening wind-down",
            "breathing_exercises": null
        }));
        assert_eq!(
            missing_sections(RecommendationKind::Meditation, &raw),
            vec![
                "daily_meditation_schedule",
                "recommended_techniques",
                "breathing_exercises",
                "meditation_safety_guidelines",
            ]
        );
    }

    #[test]
    fn test_parsed_schedule_from_text() {
        let plan = normalize_workout(&object(json!({
            "weekly_workout_schedule": "Monday: Squats - 3 sets of 5 reps\nTuesday: Cycling - 45 minutes"
        })));

        let schedule = plan.parsed_schedule().unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[1].exercises[0].name, "Cycling");
        assert_eq!(schedule[1].exercises[0].exercise_type, ExerciseType::Cardio);
    }

    #[test]
    fn test_parsed_schedule_from_object() {
        let plan = normalize_workout(&object(json!({
            "weekly_workout_schedule": {
                "Monday": ["Bench press - 3 sets of 8 reps", "Rowing - 10 minutes"],
                "Wednesday": "Yoga"
            }
        })));

        let schedule = plan.parsed_schedule().unwrap();
        assert_eq!(schedule[0].day, "Monday");
        assert_eq!(schedule[0].exercises.len(), 2);
        assert_eq!(schedule[1].day, "Wednesday");
        assert_eq!(schedule[1].exercises[0].name, "Yoga");
    }

    #[test]
    fn test_parsed_schedule_from_object_keeps_day_order() {
        let plan = normalize_workout(&object(json!({
            "weekly_workout_schedule": {
                "Wednesday": "Yoga",
                "Monday": "Squats",
                "Friday": "Run - 20 minutes"
            }
        })));

        let days: Vec<_> = plan
            .parsed_schedule()
            .unwrap()
            .into_iter()
            .map(|day| day.day)
            .collect();
        assert_eq!(days, vec!["Wednesday", "Monday", "Friday"]);
    }

    #[test]
    fn test_unknown_keys_keep_source_order() {
        let raw = object(json!({
            "workout_overview": "Base building",
            "zone_targets": "Z2",
            "cool_down_routine": "Walk",
            "equipment": ["rower"],
            "coach_notes": "Keep it easy"
        }));

        let keys: Vec<_> = normalize_workout(&raw).additional.keys().cloned().collect();
        assert_eq!(keys, vec!["zone_targets", "equipment", "coach_notes"]);
    }

    #[test]
    fn test_parsed_schedule_unsupported_shapes() {
        let nested = normalize_workout(&object(json!({
            "weekly_workout_schedule": [{ "day": "Monday", "focus": "legs" }]
        })));
        assert_eq!(nested.parsed_schedule(), None);
        assert_eq!(WorkoutPlan::default().parsed_schedule(), None);
    }
}
