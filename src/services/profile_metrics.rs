use serde::Serialize;
use serde_json::Value;

use crate::clients::models::requests::ProfileSnapshot;
use crate::services::completion::{PROFILE_REQUIRED_FIELDS, completion_percentage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        match bmi {
            b if b < 18.5 => BmiCategory::Underweight,
            b if b < 25.0 => BmiCategory::Normal,
            b if b < 30.0 => BmiCategory::Overweight,
            _ => BmiCategory::Obese,
        }
    }
}

/// Body mass index, rounded to one decimal. `None` when height or weight is not positive.
pub fn bmi(profile: &ProfileSnapshot) -> Option<f64> {
    if profile.height <= 0.0 || profile.weight <= 0.0 {
        return None;
    }
    let height_m = profile.height / 100.0;
    let bmi = profile.weight / (height_m * height_m);
    Some((bmi * 10.0).round() / 10.0)
}

pub fn bmi_category(profile: &ProfileSnapshot) -> Option<BmiCategory> {
    bmi(profile).map(BmiCategory::from_bmi)
}

pub fn profile_completion(profile: &ProfileSnapshot) -> u8 {
    match serde_json::to_value(profile) {
        Ok(Value::Object(fields)) => completion_percentage(&fields, PROFILE_REQUIRED_FIELDS),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ProfileSnapshot {
        ProfileSnapshot {
            age: 30,
            gender: "female".to_string(),
            weight: 70.0,
            height: 175.0,
            fitness_level: "intermediate".to_string(),
            activity_level: "moderate".to_string(),
            goal: "build strength".to_string(),
            dietary_preference: None,
            medical_conditions: None,
        }
    }

    #[test]
    fn test_bmi() {
        assert_eq!(bmi(&profile()), Some(22.9));
        assert_eq!(bmi_category(&profile()), Some(BmiCategory::Normal));

        let heavy = ProfileSnapshot {
            weight: 100.0,
            ..profile()
        };
        assert_eq!(bmi(&heavy), Some(32.7));
        assert_eq!(bmi_category(&heavy), Some(BmiCategory::Obese));
    }

    #[test]
    fn test_bmi_without_height() {
        let no_height = ProfileSnapshot {
            height: 0.0,
            ..profile()
        };
        assert_eq!(bmi(&no_height), None);
        assert_eq!(bmi_category(&no_height), None);
    }

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_profile_completion() {
        // 7 of 8 required fields, dietary preference missing
        assert_eq!(profile_completion(&profile()), 88);

        let complete = ProfileSnapshot {
            dietary_preference: Some("vegetarian".to_string()),
            ..profile()
        };
        assert_eq!(profile_completion(&complete), 100);

        let blank_goal = ProfileSnapshot {
            goal: "  ".to_string(),
            ..profile()
        };
        assert_eq!(profile_completion(&blank_goal), 75);
    }
}
