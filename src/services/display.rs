use serde::Serialize;
use serde_json::{Map, Value};

use crate::services::schedule_parser::ParsedDayPlan;

const MISSING_VALUE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayEntry {
    pub key: String,
    pub label: String,
    pub value: DisplayValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DisplayValue {
    Text(String),
    List(Vec<DisplayValue>),
    Fields(Vec<DisplayEntry>),
}

/// `warm_up_routine` -> `Warm Up Routine`
pub fn humanize_key(key: &str) -> String {
    key.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn display_value(value: &Value) -> DisplayValue {
    match value {
        Value::Null => DisplayValue::Text(MISSING_VALUE.to_string()),
        Value::Bool(flag) => DisplayValue::Text(flag.to_string()),
        Value::Number(number) => DisplayValue::Text(number.to_string()),
        Value::String(text) => DisplayValue::Text(text.clone()),
        Value::Array(items) => DisplayValue::List(items.iter().map(display_value).collect()),
        Value::Object(fields) => DisplayValue::Fields(display_entries(fields)),
    }
}

pub fn display_entries(fields: &Map<String, Value>) -> Vec<DisplayEntry> {
    fields
        .iter()
        .map(|(key, value)| DisplayEntry {
            key: key.clone(),
            label: humanize_key(key),
            value: display_value(value),
        })
        .collect()
}

pub fn format_day_plan(plan: &ParsedDayPlan) -> String {
    let mut lines = vec![plan.day.clone()];

    for exercise in &plan.exercises {
        let detail = [exercise.sets_reps.as_str(), exercise.duration.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let kind = exercise.exercise_type.as_str();

        if detail.is_empty() {
            lines.push(format!("  - {} [{}]", exercise.name, kind));
        } else {
            lines.push(format!("  - {} ({}) [{}]", exercise.name, detail, kind));
        }
    }

    lines.join("\n")
}
