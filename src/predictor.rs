//! Bedtime prediction.
//!
//! The wake time is decomposed into seconds past midnight, the sleep model
//! estimates how much actual sleep is needed, and that duration is subtracted
//! from the wake time on a 24-hour wall clock (wrapping into the previous day).

use crate::estimation::model::{PredictionUnavailable, SleepFeatures, SleepModel};
use crate::form::BedtimeRequest;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Duration, Time};
use tracing::{debug, warn};

pub const BEDTIME_TITLE: &str = "Your ideal bedtime is...";
pub const ERROR_TITLE: &str = "Error";
pub const BEDTIME_ERROR_MESSAGE: &str = "Sorry, there was a problem calculating your bedtime.";

const SECONDS_PER_DAY: f64 = 86_400.0;

/// How a bedtime is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum ClockStyle {
    /// `23:00`
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    /// `11:00 PM`
    #[serde(rename = "12h")]
    TwelveHour,
}

impl ClockStyle {
    pub fn format(self, time: Time) -> Result<String, time::error::Format> {
        match self {
            ClockStyle::TwentyFourHour => time.format(format_description!("[hour]:[minute]")),
            ClockStyle::TwelveHour => time.format(format_description!(
                "[hour repr:12 padding:none]:[minute] [period]"
            )),
        }
    }
}

pub fn prediction_features(request: &BedtimeRequest) -> SleepFeatures {
    SleepFeatures {
        wake: request.wake_time.seconds_past_midnight(),
        estimated_sleep: request.sleep_amount.hours(),
        coffee: f64::from(request.coffee_intake.cups()),
    }
}

/// Predicted bedtime as a wall-clock time.
pub fn predict_bedtime(
    model: &dyn SleepModel,
    request: &BedtimeRequest,
) -> Result<Time, PredictionUnavailable> {
    let features = prediction_features(request);
    let seconds = model.predict(&features)?;
    let sleep = sleep_duration(seconds)?;
    Ok(request.wake_time.time() - sleep)
}

/// Predicted bedtime rendered for display, or the user-facing error message.
pub fn compute_bedtime(
    model: &dyn SleepModel,
    request: &BedtimeRequest,
    clock: ClockStyle,
) -> Result<String, &'static str> {
    let bedtime = match predict_bedtime(model, request) {
        Ok(bedtime) => bedtime,
        Err(err) => {
            warn!(
                model = model.name(),
                wake_time = %request.wake_time,
                sleep_amount = request.sleep_amount.hours(),
                coffee_intake = request.coffee_intake.cups(),
                reason = %err.reason,
                "Bedtime prediction failed"
            );
            return Err(BEDTIME_ERROR_MESSAGE);
        }
    };

    match clock.format(bedtime) {
        Ok(formatted) => {
            debug!(model = model.name(), bedtime = %formatted, "Bedtime predicted");
            Ok(formatted)
        }
        Err(err) => {
            warn!(error = %err, "Failed to format bedtime");
            Err(BEDTIME_ERROR_MESSAGE)
        }
    }
}

fn sleep_duration(seconds: f64) -> Result<Duration, PredictionUnavailable> {
    if !seconds.is_finite() {
        return Err(PredictionUnavailable::new(format!(
            "model returned non-finite duration {seconds}"
        )));
    }
    if seconds < 0.0 {
        return Err(PredictionUnavailable::new(format!(
            "model returned negative duration {seconds}"
        )));
    }
    // Only the time of day matters; whole days fall away.
    Ok(Duration::seconds_f64(seconds.rem_euclid(SECONDS_PER_DAY)))
}

/// Alert shown after a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BedtimeAlert {
    pub title: String,
    pub message: String,
}

impl BedtimeAlert {
    pub fn from_outcome(outcome: &Result<String, &'static str>) -> Self {
        match outcome {
            Ok(bedtime) => Self {
                title: BEDTIME_TITLE.to_string(),
                message: bedtime.clone(),
            },
            Err(message) => Self {
                title: ERROR_TITLE.to_string(),
                message: (*message).to_string(),
            },
        }
    }
}
