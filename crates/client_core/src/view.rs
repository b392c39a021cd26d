//! Snapshot of everything the presentation layer renders.

use shared::protocol::PredictionOutcome;

use crate::{
    coordinator::{RequestCoordinator, ServerStatus},
    error::FieldError,
    form::{FormController, RawFormValues},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    StressDetected,
    NoStress,
}

impl Verdict {
    pub fn title(self) -> &'static str {
        match self {
            Verdict::StressDetected => "Resultado: Estrés Detectado",
            Verdict::NoStress => "Resultado: Sin Estrés",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::StressDetected => {
                "Según los datos proporcionados, es probable que estés experimentando estrés. \
                 Te recomendamos revisar la sección de Salud para obtener más información."
            }
            Verdict::NoStress => {
                "Según los datos proporcionados, no se detectan signos de estrés. ¡Sigue así!"
            }
        }
    }
}

impl From<&PredictionOutcome> for Verdict {
    fn from(outcome: &PredictionOutcome) -> Self {
        if outcome.stress_detected() {
            Verdict::StressDetected
        } else {
            Verdict::NoStress
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub values: RawFormValues,
    pub field_errors: Vec<FieldError>,
    pub submitting: bool,
    pub outcome: Option<PredictionOutcome>,
    pub error: Option<String>,
    pub server_status: ServerStatus,
}

impl ViewState {
    pub async fn capture(form: &FormController, coordinator: &RequestCoordinator) -> Self {
        let prediction = coordinator.prediction_status().await;
        Self {
            values: form.values().clone(),
            field_errors: form.field_errors(),
            submitting: prediction.is_loading(),
            outcome: prediction.outcome().cloned(),
            error: prediction.error().map(str::to_string),
            server_status: coordinator.server_status().await,
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.outcome.as_ref().map(Verdict::from)
    }
}
