//! BetterRest: predicts an ideal bedtime from a wake-up time, a desired amount
//! of sleep and daily coffee intake, using a pluggable sleep regression model.

pub mod api;
pub mod config;
pub mod error;
pub mod estimation;
pub mod form;
pub mod predictor;
pub mod state;

pub use estimation::model::{PredictionUnavailable, SleepFeatures, SleepModel};
pub use form::{BedtimeRequest, CoffeeIntake, SleepAmount, WakeTime};
pub use predictor::{ClockStyle, compute_bedtime, predict_bedtime};
