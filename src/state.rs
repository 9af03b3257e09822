use crate::error::AppError;
use crate::estimation::model::SleepModel;
use crate::form::BedtimeRequest;
use crate::predictor::{ClockStyle, compute_bedtime};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared, read-only server state.
///
/// Holds no per-request data: every calculation gets its inputs as a
/// `BedtimeRequest` and returns its outcome.
#[derive(Debug)]
pub struct AppState {
    model: Arc<dyn SleepModel>,
    clock: ClockStyle,
    prediction_gate: Mutex<()>,
}

impl AppState {
    pub fn new(model: Arc<dyn SleepModel>, clock: ClockStyle) -> Self {
        Self {
            model,
            clock,
            prediction_gate: Mutex::new(()),
        }
    }

    pub fn model(&self) -> &Arc<dyn SleepModel> {
        &self.model
    }

    /// Runs one bedtime calculation on a blocking worker.
    ///
    /// Calculations are single-flight: a request arriving while another is
    /// running waits for it to finish.
    pub async fn compute_bedtime(
        &self,
        request: BedtimeRequest,
    ) -> Result<Result<String, &'static str>, AppError> {
        let _gate = self.prediction_gate.lock().await;
        let model = Arc::clone(&self.model);
        let clock = self.clock;
        tokio::task::spawn_blocking(move || compute_bedtime(model.as_ref(), &request, clock))
            .await
            .map_err(|err| AppError::PredictionTask(err.to_string()))
    }
}
