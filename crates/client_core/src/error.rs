use std::fmt;

use thiserror::Error;

use crate::schema::FieldName;

pub const SERVER_UNREACHABLE_MESSAGE: &str = "Error al conectar con el servidor";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Error desconocido";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Respuesta inesperada del servidor";

/// Failure of a call to the prediction service. The display text is the
/// page-level message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The service answered with a non-success status. The body is not read.
    #[error("{}", SERVER_UNREACHABLE_MESSAGE)]
    Status { status: u16 },
    #[error("{0}")]
    Network(String),
    /// A success status with a body that is not a prediction.
    #[error("{}", MALFORMED_RESPONSE_MESSAGE)]
    MalformedResponse { detail: String },
}

impl TransportError {
    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Network(UNKNOWN_ERROR_MESSAGE.to_string())
        } else {
            Self::Network(message)
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return Self::Status {
                status: status.as_u16(),
            };
        }
        if error.is_decode() {
            return Self::malformed(error.to_string());
        }
        Self::network(error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {message}", .field.spec().label)]
pub struct FieldError {
    pub field: FieldName,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("El formulario tiene campos inválidos: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
