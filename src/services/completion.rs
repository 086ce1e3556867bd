use serde_json::{Map, Value};

pub const PROFILE_REQUIRED_FIELDS: &[&str] = &[
    "age",
    "gender",
    "weight",
    "height",
    "fitness_level",
    "activity_level",
    "goal",
    "dietary_preference",
];

/// Null, blank strings and empty collections count as missing. Numbers and
/// booleans count as present whatever their value.
pub fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Percentage (0-100, rounded) of `required_fields` present in `profile`.
pub fn completion_percentage<S: AsRef<str>>(
    profile: &Map<String, Value>,
    required_fields: &[S],
) -> u8 {
    if required_fields.is_empty() {
        return 0;
    }

    let filled = required_fields
        .iter()
        .filter(|field| {
            let name: &str = (*field).as_ref();
            profile.get(name).is_some_and(is_filled)
        })
        .count();

    let percentage = (100.0 * filled as f64 / required_fields.len() as f64).round();
    percentage.clamp(0.0, 100.0) as u8
}
