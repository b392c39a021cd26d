//! Client side of the student stress predictor: form validation, payload
//! encoding and the request lifecycle against the prediction service.

pub mod coordinator;
pub mod error;
pub mod form;
pub mod schema;
pub mod view;

pub use coordinator::{
    CoordinatorEvent, HttpPredictionApi, PredictionApi, PredictionStatus, RequestCoordinator,
    ServerStatus,
};
pub use error::{FieldError, SubmitError, TransportError, ValidationErrors};
pub use form::{FormController, RawFormValues, ValidatedForm};
pub use schema::{FieldKind, FieldName, FieldSpec, FieldValue, FIELD_SPECS};
pub use view::{Verdict, ViewState};
