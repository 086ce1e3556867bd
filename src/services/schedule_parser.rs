use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

static SETS_REPS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[0-9]+\s*sets?\s+of\s+[0-9]+\s*reps?").expect("sets/reps pattern is valid")
});

static DURATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[0-9]+\s*minutes?").expect("duration pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Cardio,
    Strength,
}

impl ExerciseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Cardio => "cardio",
            ExerciseType::Strength => "strength",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub name: String,
    pub sets_reps: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDayPlan {
    pub day: String,
    pub exercises: Vec<ExerciseEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySplit<'a> {
    pub day_label: &'a str,
    pub exercise_segments: Vec<&'a str>,
}

/// Splits a raw schedule into its non-blank lines, in order.
pub fn tokenize(raw: &str) -> Vec<&str> {
    raw.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Splits `"<Day>: a; b; c"` on the first colon. Lines without a colon or
/// with a blank day label yield `None`.
pub fn split_day(line: &str) -> Option<DaySplit<'_>> {
    let (label, body) = line.split_once(':')?;
    let day_label = label.trim();
    if day_label.is_empty() {
        return None;
    }

    let exercise_segments = body
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();

    Some(DaySplit {
        day_label,
        exercise_segments,
    })
}

pub fn extract_sets_reps(segment: &str) -> Option<&str> {
    SETS_REPS_REGEX.find(segment).map(|m| m.as_str())
}

pub fn extract_duration(segment: &str) -> Option<&str> {
    DURATION_REGEX.find(segment).map(|m| m.as_str())
}

/// Anything mentioning cardio, or carrying a duration, counts as cardio.
/// A timed strength circuit is therefore classified as cardio.
pub fn classify(segment: &str, duration: &str) -> ExerciseType {
    if segment.to_lowercase().contains("cardio") || !duration.is_empty() {
        ExerciseType::Cardio
    } else {
        ExerciseType::Strength
    }
}

pub fn extract_exercise(segment: &str) -> ExerciseEntry {
    let sets_reps = extract_sets_reps(segment).unwrap_or_default();
    let duration = extract_duration(segment).unwrap_or_default();

    let mut name = segment.to_string();
    for matched in [sets_reps, duration] {
        if !matched.is_empty() {
            name = name.replacen(matched, "", 1);
        }
    }

    let trimmed = name.trim_end();
    let name = trimmed.strip_suffix('-').unwrap_or(trimmed).trim();

    ExerciseEntry {
        name: name.to_string(),
        sets_reps: sets_reps.to_string(),
        duration: duration.to_string(),
        exercise_type: classify(segment, duration),
    }
}

pub fn assemble<S: AsRef<str>>(lines: &[S]) -> Vec<ParsedDayPlan> {
    lines
        .iter()
        .filter_map(|line| {
            let line = line.as_ref();
            let split = split_day(line);
            if split.is_none() {
                debug!(line = %line, "schedule.line_skipped");
            }
            split
        })
        .map(|split| ParsedDayPlan {
            day: split.day_label.to_string(),
            exercises: split
                .exercise_segments
                .into_iter()
                .map(extract_exercise)
                .collect(),
        })
        .collect()
}

pub fn parse_schedule(raw: &str) -> Vec<ParsedDayPlan> {
    assemble(&tokenize(raw))
}
