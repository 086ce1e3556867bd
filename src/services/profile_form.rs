use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::clients::models::requests::ProfileSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Age,
    Gender,
    Weight,
    Height,
    FitnessLevel,
    ActivityLevel,
    Goal,
    DietaryPreference,
    MedicalConditions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStep {
    #[default]
    Basics,
    Body,
    Lifestyle,
    Preferences,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::Basics,
        FormStep::Body,
        FormStep::Lifestyle,
        FormStep::Preferences,
    ];

    pub fn required_fields(&self) -> &'static [ProfileField] {
        match self {
            FormStep::Basics => &[ProfileField::Age, ProfileField::Gender],
            FormStep::Body => &[ProfileField::Weight, ProfileField::Height],
            FormStep::Lifestyle => &[
                ProfileField::FitnessLevel,
                ProfileField::ActivityLevel,
                ProfileField::Goal,
            ],
            FormStep::Preferences => &[],
        }
    }

    pub fn next(&self) -> Option<FormStep> {
        match self {
            FormStep::Basics => Some(FormStep::Body),
            FormStep::Body => Some(FormStep::Lifestyle),
            FormStep::Lifestyle => Some(FormStep::Preferences),
            FormStep::Preferences => None,
        }
    }

    pub fn previous(&self) -> Option<FormStep> {
        match self {
            FormStep::Basics => None,
            FormStep::Body => Some(FormStep::Basics),
            FormStep::Lifestyle => Some(FormStep::Body),
            FormStep::Preferences => Some(FormStep::Lifestyle),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormAction {
    StepForward,
    StepBack,
    FieldChanged { field: ProfileField, value: String },
    Submit,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormStatus {
    #[default]
    Editing,
    Submitted { profile: ProfileSnapshot },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormState {
    pub step: FormStep,
    #[serde(default)]
    pub values: BTreeMap<ProfileField, String>,
    #[serde(default)]
    pub missing: Vec<ProfileField>,
    #[serde(default)]
    pub invalid: Vec<ProfileField>,
    #[serde(default)]
    pub status: FormStatus,
}

impl FormState {
    pub fn apply(self, action: FormAction) -> FormState {
        match action {
            FormAction::StepForward => self.step_forward(),
            FormAction::StepBack => self.step_back(),
            FormAction::FieldChanged { field, value } => self.field_changed(field, value),
            FormAction::Submit => self.submit(),
        }
    }

    pub fn value(&self, field: ProfileField) -> Option<&str> {
        self.values
            .get(&field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    fn missing_in(&self, step: FormStep) -> Vec<ProfileField> {
        step.required_fields()
            .iter()
            .copied()
            .filter(|field| self.value(*field).is_none())
            .collect()
    }

    fn step_forward(self) -> FormState {
        let missing = self.missing_in(self.step);
        if !missing.is_empty() {
            return FormState { missing, ..self };
        }

        match self.step.next() {
            Some(step) => FormState {
                step,
                missing: Vec::new(),
                ..self
            },
            None => FormState {
                missing: Vec::new(),
                ..self
            },
        }
    }

    fn step_back(self) -> FormState {
        match self.step.previous() {
            Some(step) => FormState {
                step,
                missing: Vec::new(),
                ..self
            },
            None => self,
        }
    }

    fn field_changed(self, field: ProfileField, value: String) -> FormState {
        let mut values = self.values;
        values.insert(field, value);

        FormState {
            step: self.step,
            values,
            missing: self.missing.into_iter().filter(|f| *f != field).collect(),
            invalid: self.invalid.into_iter().filter(|f| *f != field).collect(),
            status: FormStatus::Editing,
        }
    }

    fn submit(self) -> FormState {
        let mut first_incomplete = None;
        let mut missing = Vec::new();
        for step in FormStep::ALL {
            let step_missing = self.missing_in(step);
            if first_incomplete.is_none() && !step_missing.is_empty() {
                first_incomplete = Some(step);
            }
            missing.extend(step_missing);
        }

        if let Some(step) = first_incomplete {
            return FormState {
                step,
                missing,
                ..self
            };
        }

        match self.to_profile() {
            Ok(profile) => FormState {
                missing: Vec::new(),
                invalid: Vec::new(),
                status: FormStatus::Submitted { profile },
                ..self
            },
            Err(invalid) => FormState {
                missing: Vec::new(),
                invalid,
                ..self
            },
        }
    }

    /// Builds the snapshot, or returns the fields whose values do not parse.
    fn to_profile(&self) -> Result<ProfileSnapshot, Vec<ProfileField>> {
        let mut invalid = Vec::new();

        let age = self.parse_number::<u32>(ProfileField::Age, &mut invalid);
        let weight = self.parse_positive(ProfileField::Weight, &mut invalid);
        let height = self.parse_positive(ProfileField::Height, &mut invalid);

        match (age, weight, height) {
            (Some(age), Some(weight), Some(height)) => Ok(ProfileSnapshot {
                age,
                gender: self.text(ProfileField::Gender),
                weight,
                height,
                fitness_level: self.text(ProfileField::FitnessLevel),
                activity_level: self.text(ProfileField::ActivityLevel),
                goal: self.text(ProfileField::Goal),
                dietary_preference: self.value(ProfileField::DietaryPreference).map(str::to_string),
                medical_conditions: self.value(ProfileField::MedicalConditions).map(str::to_string),
            }),
            _ => Err(invalid),
        }
    }

    fn text(&self, field: ProfileField) -> String {
        self.value(field).unwrap_or_default().to_string()
    }

    fn parse_number<T: std::str::FromStr>(
        &self,
        field: ProfileField,
        invalid: &mut Vec<ProfileField>,
    ) -> Option<T> {
        let parsed = self.value(field).and_then(|value| value.parse().ok());
        if parsed.is_none() {
            invalid.push(field);
        }
        parsed
    }

    fn parse_positive(&self, field: ProfileField, invalid: &mut Vec<ProfileField>) -> Option<f64> {
        match self.parse_number::<f64>(field, invalid) {
            Some(value) if value.is_finite() && value > 0.0 => Some(value),
            Some(_) => {
                invalid.push(field);
                None
            }
            None => None,
        }
    }
}
