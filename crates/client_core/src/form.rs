use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use shared::{
    domain::{Course, Gender, YesNo},
    protocol::{PredictionOutcome, SubmissionPayload},
};
use tracing::{debug, info};

use crate::{
    coordinator::RequestCoordinator,
    error::{FieldError, SubmitError, ValidationErrors},
    schema::{validate_raw, FieldName, FieldValue},
};

/// Form contents as the user typed or picked them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFormValues {
    #[serde(deserialize_with = "text_or_number")]
    pub age: String,
    #[serde(deserialize_with = "text_or_number")]
    pub gender: String,
    #[serde(deserialize_with = "text_or_number")]
    pub year_of_study: String,
    #[serde(deserialize_with = "text_or_number")]
    pub course: String,
    #[serde(deserialize_with = "text_or_number")]
    pub cgpa: String,
    #[serde(deserialize_with = "text_or_number")]
    pub married: String,
    #[serde(deserialize_with = "text_or_number")]
    pub specialized_treatment: String,
}

impl Default for RawFormValues {
    fn default() -> Self {
        let default = |field: FieldName| field.spec().default.to_string();
        Self {
            age: default(FieldName::Age),
            gender: default(FieldName::Gender),
            year_of_study: default(FieldName::YearOfStudy),
            course: default(FieldName::Course),
            cgpa: default(FieldName::Cgpa),
            married: default(FieldName::Married),
            specialized_treatment: default(FieldName::SpecializedTreatment),
        }
    }
}

impl RawFormValues {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Age => &self.age,
            FieldName::Gender => &self.gender,
            FieldName::YearOfStudy => &self.year_of_study,
            FieldName::Course => &self.course,
            FieldName::Cgpa => &self.cgpa,
            FieldName::Married => &self.married,
            FieldName::SpecializedTreatment => &self.specialized_treatment,
        }
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let slot = match field {
            FieldName::Age => &mut self.age,
            FieldName::Gender => &mut self.gender,
            FieldName::YearOfStudy => &mut self.year_of_study,
            FieldName::Course => &mut self.course,
            FieldName::Cgpa => &mut self.cgpa,
            FieldName::Married => &mut self.married,
            FieldName::SpecializedTreatment => &mut self.specialized_treatment,
        };
        *slot = value.into();
    }

    pub fn validate_field(&self, field: FieldName) -> Result<FieldValue, FieldError> {
        validate_raw(field.spec(), self.get(field))
    }
}

// Record files may carry numbers as JSON numbers rather than text.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected text or number, found {other}"
        ))),
    }
}

/// Every field validated and typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub age: u32,
    pub gender: Gender,
    pub year_of_study: u32,
    pub course: Course,
    pub cgpa: f64,
    pub married: YesNo,
    pub specialized_treatment: YesNo,
}

impl ValidatedForm {
    pub fn from_raw(values: &RawFormValues) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let age = typed(values, FieldName::Age, &mut errors, |value| {
            value.as_integer().and_then(|n| u32::try_from(n).ok())
        });
        let gender = typed(
            values,
            FieldName::Gender,
            &mut errors,
            FieldValue::as_choice::<Gender>,
        );
        let year_of_study = typed(values, FieldName::YearOfStudy, &mut errors, |value| {
            value.as_integer().and_then(|n| u32::try_from(n).ok())
        });
        let course = typed(
            values,
            FieldName::Course,
            &mut errors,
            FieldValue::as_choice::<Course>,
        );
        let cgpa = typed(values, FieldName::Cgpa, &mut errors, FieldValue::as_decimal);
        let married = typed(
            values,
            FieldName::Married,
            &mut errors,
            FieldValue::as_choice::<YesNo>,
        );
        let specialized_treatment = typed(
            values,
            FieldName::SpecializedTreatment,
            &mut errors,
            FieldValue::as_choice::<YesNo>,
        );

        match (
            age,
            gender,
            year_of_study,
            course,
            cgpa,
            married,
            specialized_treatment,
        ) {
            (
                Some(age),
                Some(gender),
                Some(year_of_study),
                Some(course),
                Some(cgpa),
                Some(married),
                Some(specialized_treatment),
            ) if errors.is_empty() => Ok(Self {
                age,
                gender,
                year_of_study,
                course,
                cgpa,
                married,
                specialized_treatment,
            }),
            _ => Err(errors),
        }
    }

    pub fn to_payload(&self) -> SubmissionPayload {
        SubmissionPayload::from(self)
    }
}

fn typed<T>(
    values: &RawFormValues,
    field: FieldName,
    errors: &mut ValidationErrors,
    convert: impl FnOnce(FieldValue) -> Option<T>,
) -> Option<T> {
    match values.validate_field(field) {
        Ok(value) => {
            let typed = convert(value);
            if typed.is_none() {
                errors.push(FieldError::new(field, field.spec().invalid_message));
            }
            typed
        }
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

impl From<&ValidatedForm> for SubmissionPayload {
    fn from(form: &ValidatedForm) -> Self {
        SubmissionPayload::new(
            form.age,
            form.gender,
            form.year_of_study,
            form.course,
            form.cgpa,
            form.married,
            form.specialized_treatment,
        )
    }
}

/// Owns the raw form values and the per-field error messages shown next to
/// each input.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    values: RawFormValues,
    errors: BTreeMap<FieldName, String>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: RawFormValues) -> Self {
        Self {
            values,
            errors: BTreeMap::new(),
        }
    }

    pub fn values(&self) -> &RawFormValues {
        &self.values
    }

    /// Updates one field. A field already showing an error is revalidated so
    /// the message disappears as soon as the input becomes valid.
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.set(field, value);
        if self.errors.contains_key(&field) {
            match self.values.validate_field(field) {
                Ok(_) => {
                    self.errors.remove(&field);
                }
                Err(error) => {
                    self.errors.insert(field, error.message);
                }
            }
        }
    }

    pub fn validate_field(&self, field: FieldName) -> Result<FieldValue, FieldError> {
        self.values.validate_field(field)
    }

    pub fn field_error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.errors
            .iter()
            .map(|(field, message)| FieldError::new(*field, message.clone()))
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Validates every field and records the resulting messages.
    pub fn validate(&mut self) -> Result<ValidatedForm, ValidationErrors> {
        let result = ValidatedForm::from_raw(&self.values);
        self.errors.clear();
        if let Err(errors) = &result {
            for error in errors.iter() {
                self.errors.insert(error.field, error.message.clone());
            }
        }
        result
    }

    /// Validates and, only when every field passes, hands the encoded payload
    /// to the coordinator. Values are reset after a prediction comes back and
    /// kept after any failure.
    pub async fn submit(
        &mut self,
        coordinator: &RequestCoordinator,
    ) -> Result<PredictionOutcome, SubmitError> {
        let form = match self.validate() {
            Ok(form) => form,
            Err(errors) => {
                debug!(invalid_fields = errors.len(), "form submission blocked by validation");
                return Err(SubmitError::Validation(errors));
            }
        };

        let payload = form.to_payload();
        debug!(?payload, "submitting form");
        let outcome = coordinator.predict(payload).await?;
        info!(stress = %outcome.stress, "form submission completed");
        self.reset();
        Ok(outcome)
    }

    pub fn reset(&mut self) {
        self.values = RawFormValues::default();
        self.errors.clear();
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
