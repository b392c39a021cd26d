use serde::{Deserialize, Serialize};

use crate::domain::{Choice, Course, Gender, YesNo};

/// Request body for `POST /predict`, one row of model input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub age: u32,
    pub gender: u8,
    pub year_of_study: u32,
    pub course: u8,
    pub cgpa: f64,
    pub marital_status: u8,
    pub specialist_treatment: u8,
}

impl SubmissionPayload {
    pub fn new(
        age: u32,
        gender: Gender,
        year_of_study: u32,
        course: Course,
        cgpa: f64,
        married: YesNo,
        specialized_treatment: YesNo,
    ) -> Self {
        Self {
            age,
            gender: gender.code(),
            year_of_study,
            course: course.code(),
            cgpa,
            marital_status: married.code(),
            specialist_treatment: specialized_treatment.code(),
        }
    }
}

/// The service answers with a `"Yes"`/`"No"` discriminator; anything other
/// than an exact `"Yes"` is read as no stress.
pub const STRESS_DETECTED: &str = "Yes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub stress: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PredictionOutcome {
    pub fn new(stress: impl Into<String>) -> Self {
        Self {
            stress: stress.into(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn stress_detected(&self) -> bool {
        self.stress == STRESS_DETECTED
    }
}

/// Response body of `POST /predict_multiple`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPredictionResponse {
    pub predictions: Vec<PredictionOutcome>,
}
