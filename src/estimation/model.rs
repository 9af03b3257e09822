//! Sleep model trait for pluggable bedtime regression.
//!
//! This module defines the `SleepModel` trait that every regressor must implement.
//! Models are selected via `calibration.json` and loaded at startup.

use serde::Serialize;
use thiserror::Error;

/// Feature vector handed to a sleep model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SleepFeatures {
    /// Wake time in seconds past midnight.
    pub wake: f64,
    /// Desired sleep in hours.
    pub estimated_sleep: f64,
    /// Daily coffee intake in cups.
    pub coffee: f64,
}

/// The model could not produce a usable sleep duration.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("prediction unavailable: {reason}")]
pub struct PredictionUnavailable {
    pub reason: String,
}

impl PredictionUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Trait for regressors that estimate the actual sleep a user needs.
///
/// Implement this trait to add new models. The model is selected via the
/// `model` field in `calibration.json`.
pub trait SleepModel: Send + Sync + std::fmt::Debug {
    /// Estimated actual sleep duration, in seconds.
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictionUnavailable>;

    /// Short identifier reported by the health endpoint.
    fn name(&self) -> &str;
}
