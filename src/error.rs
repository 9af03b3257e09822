use crate::form::InvalidWakeTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidWakeTime(#[from] InvalidWakeTime),
    #[error("prediction task failed: {0}")]
    PredictionTask(String),
}
