use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::protocol::{BatchPredictionResponse, PredictionOutcome, SubmissionPayload};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::error::TransportError;

/// Remote prediction service. Every method makes exactly one attempt.
#[async_trait]
pub trait PredictionApi: Send + Sync {
    async fn predict(&self, payload: &SubmissionPayload)
        -> Result<PredictionOutcome, TransportError>;
    async fn predict_batch(
        &self,
        payloads: &[SubmissionPayload],
    ) -> Result<Vec<PredictionOutcome>, TransportError>;
    async fn health(&self) -> Result<(), TransportError>;
}

pub struct HttpPredictionApi {
    http: Client,
    base_url: String,
}

impl HttpPredictionApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }
}

#[async_trait]
impl PredictionApi for HttpPredictionApi {
    async fn predict(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<PredictionOutcome, TransportError> {
        let url = format!("{}/predict", self.base_url);
        debug!(%url, ?payload, "sending prediction request");
        let response = self.http.post(&url).json(payload).send().await?;
        let outcome = ensure_success(response)?
            .json::<PredictionOutcome>()
            .await?;
        Ok(outcome)
    }

    async fn predict_batch(
        &self,
        payloads: &[SubmissionPayload],
    ) -> Result<Vec<PredictionOutcome>, TransportError> {
        let url = format!("{}/predict_multiple", self.base_url);
        debug!(%url, count = payloads.len(), "sending batch prediction request");
        let response = self.http.post(&url).json(payloads).send().await?;
        let body: BatchPredictionResponse = ensure_success(response)?.json().await?;
        Ok(body.predictions)
    }

    async fn health(&self) -> Result<(), TransportError> {
        let url = format!("{}/health", self.base_url);
        let response = self.http.get(&url).send().await?;
        debug!(%url, status = response.status().as_u16(), "health probe answered");
        ensure_success(response)?;
        Ok(())
    }
}

// Only 2xx counts; redirects and informational codes are failures too.
fn ensure_success(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(TransportError::Status {
            status: status.as_u16(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PredictionStatus {
    #[default]
    Idle,
    Loading,
    Result(PredictionOutcome),
    Error(String),
}

impl PredictionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, PredictionStatus::Loading)
    }

    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        match self {
            PredictionStatus::Result(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PredictionStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerStatus {
    #[default]
    Unknown,
    Checking,
    Online,
    Offline,
}

impl ServerStatus {
    pub fn description(self) -> Option<&'static str> {
        match self {
            ServerStatus::Unknown => None,
            ServerStatus::Checking => Some("Verificando estado del servidor..."),
            ServerStatus::Online => Some("El servidor está en línea y funcionando correctamente."),
            ServerStatus::Offline => Some("El servidor está fuera de línea o no responde."),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoordinatorEvent {
    PredictionStatusChanged(PredictionStatus),
    ServerStatusChanged(ServerStatus),
}

/// Runs prediction and health checks against the service and keeps the
/// status of each. The two operations touch disjoint state and may be in
/// flight at the same time.
pub struct RequestCoordinator {
    api: Arc<dyn PredictionApi>,
    prediction: RwLock<PredictionStatus>,
    server_status: RwLock<ServerStatus>,
    events: broadcast::Sender<CoordinatorEvent>,
}

impl RequestCoordinator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_api(Arc::new(HttpPredictionApi::new(base_url)))
    }

    pub fn with_api(api: Arc<dyn PredictionApi>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            api,
            prediction: RwLock::new(PredictionStatus::Idle),
            server_status: RwLock::new(ServerStatus::Unknown),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.events.subscribe()
    }

    pub async fn prediction_status(&self) -> PredictionStatus {
        self.prediction.read().await.clone()
    }

    pub async fn server_status(&self) -> ServerStatus {
        *self.server_status.read().await
    }

    pub async fn is_submitting(&self) -> bool {
        self.prediction.read().await.is_loading()
    }

    /// Entering `Loading` drops any previous result or error. There is no
    /// sequencing between overlapping calls; whichever resolves last wins.
    pub async fn predict(
        &self,
        payload: SubmissionPayload,
    ) -> Result<PredictionOutcome, TransportError> {
        self.set_prediction(PredictionStatus::Loading).await;

        let result = self.api.predict(&payload).await;
        match &result {
            Ok(outcome) => {
                info!(stress = %outcome.stress, "prediction received");
                self.set_prediction(PredictionStatus::Result(outcome.clone()))
                    .await;
            }
            Err(error) => {
                warn!(%error, "prediction request failed");
                self.set_prediction(PredictionStatus::Error(error.to_string()))
                    .await;
            }
        }
        result
    }

    /// Any failure, including a non-success status, is reported as offline.
    pub async fn check_health(&self) -> ServerStatus {
        self.set_server_status(ServerStatus::Checking).await;

        let status = match self.api.health().await {
            Ok(()) => ServerStatus::Online,
            Err(error) => {
                debug!(?error, "health probe failed");
                ServerStatus::Offline
            }
        };
        info!(?status, "server status checked");
        self.set_server_status(status).await;
        status
    }

    /// Scores several payloads in one call. Leaves the interactive prediction
    /// and server status untouched.
    pub async fn predict_batch(
        &self,
        payloads: &[SubmissionPayload],
    ) -> Result<Vec<PredictionOutcome>, TransportError> {
        if payloads.is_empty() {
            return Ok(Vec::new());
        }
        let predictions = self.api.predict_batch(payloads).await.map_err(|error| {
            warn!(%error, count = payloads.len(), "batch prediction request failed");
            error
        })?;
        if predictions.len() != payloads.len() {
            warn!(
                expected = payloads.len(),
                actual = predictions.len(),
                "batch prediction count mismatch"
            );
            return Err(TransportError::malformed(format!(
                "expected {} predictions, got {}",
                payloads.len(),
                predictions.len()
            )));
        }
        Ok(predictions)
    }

    async fn set_prediction(&self, status: PredictionStatus) {
        *self.prediction.write().await = status.clone();
        let _ = self
            .events
            .send(CoordinatorEvent::PredictionStatusChanged(status));
    }

    async fn set_server_status(&self, status: ServerStatus) {
        *self.server_status.write().await = status;
        let _ = self
            .events
            .send(CoordinatorEvent::ServerStatusChanged(status));
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
