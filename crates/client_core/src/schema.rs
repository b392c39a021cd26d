//! Declarative field table for the prediction form.
//!
//! Each field is described once in [`FIELD_SPECS`]; [`validate_raw`] is the
//! only place that interprets those descriptions.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared::domain::{Choice, Course, Gender, YesNo};

use crate::error::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Age,
    Gender,
    YearOfStudy,
    Course,
    Cgpa,
    Married,
    SpecializedTreatment,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        FieldName::Age,
        FieldName::Gender,
        FieldName::YearOfStudy,
        FieldName::Course,
        FieldName::Cgpa,
        FieldName::Married,
        FieldName::SpecializedTreatment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Age => "age",
            FieldName::Gender => "gender",
            FieldName::YearOfStudy => "yearOfStudy",
            FieldName::Course => "course",
            FieldName::Cgpa => "cgpa",
            FieldName::Married => "married",
            FieldName::SpecializedTreatment => "specializedTreatment",
        }
    }

    pub fn spec(self) -> &'static FieldSpec {
        match self {
            FieldName::Age => &FIELD_SPECS[0],
            FieldName::Gender => &FIELD_SPECS[1],
            FieldName::YearOfStudy => &FIELD_SPECS[2],
            FieldName::Course => &FIELD_SPECS[3],
            FieldName::Cgpa => &FIELD_SPECS[4],
            FieldName::Married => &FIELD_SPECS[5],
            FieldName::SpecializedTreatment => &FIELD_SPECS[6],
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Integer {
        min: i64,
        max: i64,
    },
    Decimal {
        min: f64,
        max: f64,
    },
    /// One of a fixed ordered label set. With `accepts_index` the zero-based
    /// position is accepted in place of the label.
    Choice {
        options: &'static [&'static str],
        accepts_index: bool,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: FieldName,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: &'static str,
    pub placeholder: &'static str,
    pub description: Option<&'static str>,
    /// Shown when the input is empty.
    pub required_message: &'static str,
    /// Shown when the input is present but out of range or unrecognized.
    pub invalid_message: &'static str,
}

pub static FIELD_SPECS: [FieldSpec; 7] = [
    FieldSpec {
        name: FieldName::Age,
        label: "Edad",
        kind: FieldKind::Integer { min: 16, max: 100 },
        default: "0",
        placeholder: "Ej: 21",
        description: None,
        required_message: "Por favor introduce tu edad",
        invalid_message: "La edad debe ser un número entero entre 16 y 100",
    },
    FieldSpec {
        name: FieldName::Gender,
        label: "Género",
        kind: FieldKind::Choice {
            options: Gender::LABELS,
            accepts_index: false,
        },
        default: "",
        placeholder: "Selecciona tu género",
        description: None,
        required_message: "Por favor selecciona un género",
        invalid_message: "Género no reconocido",
    },
    FieldSpec {
        name: FieldName::YearOfStudy,
        label: "Año de estudio",
        kind: FieldKind::Integer { min: 1, max: 10 },
        default: "0",
        placeholder: "Selecciona tu año",
        description: None,
        required_message: "Por favor selecciona tu año",
        invalid_message: "El año de estudio debe ser un número entero entre 1 y 10",
    },
    FieldSpec {
        name: FieldName::Course,
        label: "Curso",
        kind: FieldKind::Choice {
            options: Course::LABELS,
            accepts_index: true,
        },
        default: "",
        placeholder: "Selecciona tu curso",
        description: None,
        required_message: "Por favor selecciona un curso",
        invalid_message: "Curso no reconocido",
    },
    FieldSpec {
        name: FieldName::Cgpa,
        label: "CGPA",
        kind: FieldKind::Decimal {
            min: 0.0,
            max: 10.0,
        },
        default: "0",
        placeholder: "Ej: 7.5",
        description: Some("Promedio académico (0-10)"),
        required_message: "Por favor introduce tu promedio",
        invalid_message: "El CGPA debe ser un número entre 0 y 10",
    },
    FieldSpec {
        name: FieldName::Married,
        label: "¿Casado/a?",
        kind: FieldKind::Choice {
            options: YesNo::LABELS,
            accepts_index: false,
        },
        default: "",
        placeholder: "Selecciona",
        description: None,
        required_message: "Por favor selecciona una opción",
        invalid_message: "Opción no reconocida",
    },
    FieldSpec {
        name: FieldName::SpecializedTreatment,
        label: "¿Ha buscado tratamiento especializado?",
        kind: FieldKind::Choice {
            options: YesNo::LABELS,
            accepts_index: false,
        },
        default: "",
        placeholder: "Selecciona",
        description: None,
        required_message: "Por favor selecciona una opción",
        invalid_message: "Opción no reconocida",
    },
];

/// A field value that passed its constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Decimal(f64),
    /// Position in the field's option list.
    Choice(usize),
}

impl FieldValue {
    pub fn as_integer(self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_decimal(self) -> Option<f64> {
        match self {
            FieldValue::Decimal(value) => Some(value),
            FieldValue::Integer(value) => Some(value as f64),
            FieldValue::Choice(_) => None,
        }
    }

    pub fn as_choice<T: Choice>(self) -> Option<T> {
        match self {
            FieldValue::Choice(index) => T::from_index(index),
            _ => None,
        }
    }
}

pub fn validate_raw(spec: &FieldSpec, raw: &str) -> Result<FieldValue, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::new(spec.name, spec.required_message));
    }
    let invalid = || FieldError::new(spec.name, spec.invalid_message);

    match spec.kind {
        FieldKind::Integer { min, max } => {
            let value = parse_integer(raw).ok_or_else(invalid)?;
            if (min..=max).contains(&value) {
                Ok(FieldValue::Integer(value))
            } else {
                Err(invalid())
            }
        }
        FieldKind::Decimal { min, max } => {
            let value = raw
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(invalid)?;
            if (min..=max).contains(&value) {
                Ok(FieldValue::Decimal(value))
            } else {
                Err(invalid())
            }
        }
        FieldKind::Choice {
            options,
            accepts_index,
        } => {
            if let Some(index) = options.iter().position(|option| *option == raw) {
                return Ok(FieldValue::Choice(index));
            }
            if accepts_index {
                if let Ok(index) = raw.parse::<usize>() {
                    if index < options.len() {
                        return Ok(FieldValue::Choice(index));
                    }
                }
            }
            Err(invalid())
        }
    }
}

/// Whole numbers only. Plain decimal text with a zero fraction such as
/// `"21.0"` counts as 21; `"21.5"` and exponent forms like `"1e2"` do not.
fn parse_integer(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let (whole, fraction) = raw.split_once('.')?;
    if fraction.is_empty() || !fraction.bytes().all(|digit| digit == b'0') {
        return None;
    }
    whole.parse::<i64>().ok()
}

#[cfg(test)]
#[path = "tests/schema_tests.rs"]
mod tests;
