//! Linear sleep model using a fitted coefficient per feature.
//!
//! Formula: actual_sleep = intercept + wake * w + estimated_sleep * s + coffee * c

use crate::estimation::model::{PredictionUnavailable, SleepFeatures, SleepModel};
use serde::Deserialize;

/// Inclusive range of a feature seen during training.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FeatureRange {
    pub min: f64,
    pub max: f64,
}

impl FeatureRange {
    fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Feature ranges outside of which the regression is not trusted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrainingRange {
    pub wake: Option<FeatureRange>,
    pub estimated_sleep: Option<FeatureRange>,
    pub coffee: Option<FeatureRange>,
}

/// Linear model parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearSleepParams {
    pub intercept: f64,
    pub wake_coefficient: f64,
    pub sleep_coefficient: f64,
    pub coffee_coefficient: f64,
    pub min_sleep_seconds: Option<f64>,
    pub max_sleep_seconds: Option<f64>,
    #[serde(default)]
    pub training_range: Option<TrainingRange>,
}

impl Default for LinearSleepParams {
    fn default() -> Self {
        Self {
            intercept: 0.0,
            wake_coefficient: 0.0,
            sleep_coefficient: 3600.0,
            coffee_coefficient: 300.0, // 5 extra minutes per cup
            min_sleep_seconds: None,
            max_sleep_seconds: None,
            training_range: None,
        }
    }
}

/// Linear sleep model.
///
/// Computes actual sleep using:
/// `intercept + wake_coefficient * wake + sleep_coefficient * estimated_sleep + coffee_coefficient * coffee`
#[derive(Debug)]
pub struct LinearSleepModel {
    pub params: LinearSleepParams,
}

impl LinearSleepModel {
    pub fn new(params: LinearSleepParams) -> Self {
        Self { params }
    }

    pub fn with_defaults() -> Self {
        Self::new(LinearSleepParams::default())
    }

    fn check_training_range(&self, features: &SleepFeatures) -> Result<(), PredictionUnavailable> {
        let Some(range) = self.params.training_range.as_ref() else {
            return Ok(());
        };
        let checks = [
            ("wake", range.wake, features.wake),
            ("estimated_sleep", range.estimated_sleep, features.estimated_sleep),
            ("coffee", range.coffee, features.coffee),
        ];
        for (name, bounds, value) in checks {
            if let Some(bounds) = bounds
                && !bounds.contains(value)
            {
                return Err(PredictionUnavailable::new(format!(
                    "{name}={value} outside training range [{}, {}]",
                    bounds.min, bounds.max
                )));
            }
        }
        Ok(())
    }
}

impl SleepModel for LinearSleepModel {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictionUnavailable> {
        self.check_training_range(features)?;

        let params = &self.params;
        let mut actual_sleep = params.intercept
            + params.wake_coefficient * features.wake
            + params.sleep_coefficient * features.estimated_sleep
            + params.coffee_coefficient * features.coffee;

        // Apply bounds
        if let Some(min) = params.min_sleep_seconds {
            actual_sleep = actual_sleep.max(min);
        }
        if let Some(max) = params.max_sleep_seconds {
            actual_sleep = actual_sleep.min(max);
        }

        Ok(actual_sleep)
    }

    fn name(&self) -> &str {
        "linear"
    }
}
