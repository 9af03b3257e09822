//! Form inputs for the bedtime calculator.
//!
//! Each field mirrors one input widget: the wake time picker, the sleep amount
//! stepper and the coffee stepper. Constructors clamp to the widget ranges so
//! the predictor never has to re-validate them.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use time::Time;
use time::macros::{format_description, time};

pub const DEFAULT_WAKE_TIME: Time = time!(7:00);

pub const SLEEP_AMOUNT_MIN: f64 = 4.0;
pub const SLEEP_AMOUNT_MAX: f64 = 12.0;
pub const SLEEP_AMOUNT_STEP: f64 = 0.25;
pub const SLEEP_AMOUNT_DEFAULT: f64 = 8.0;

pub const COFFEE_INTAKE_MIN: u8 = 0;
pub const COFFEE_INTAKE_MAX: u8 = 20;
pub const COFFEE_INTAKE_DEFAULT: u8 = 0;

/// Desired wake-up time. Only hour and minute are significant.
///
/// The value is a naive wall-clock time: no timezone or calendar date is
/// attached, and seconds are dropped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeTime(Time);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid wake time {0:?}, expected HH:MM")]
pub struct InvalidWakeTime(pub String);

impl WakeTime {
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, InvalidWakeTime> {
        Time::from_hms(hour, minute, 0)
            .map(Self)
            .map_err(|_| InvalidWakeTime(format!("{hour}:{minute:02}")))
    }

    /// Parses `HH:MM` or `H:MM` (24-hour clock).
    pub fn parse(input: &str) -> Result<Self, InvalidWakeTime> {
        Time::parse(input.trim(), format_description!("[hour padding:none]:[minute]"))
            .map(Self)
            .map_err(|_| InvalidWakeTime(input.to_string()))
    }

    pub fn time(&self) -> Time {
        self.0
    }

    pub fn hour(&self) -> u8 {
        self.0.hour()
    }

    pub fn minute(&self) -> u8 {
        self.0.minute()
    }

    pub fn seconds_past_midnight(&self) -> f64 {
        let hour = u32::from(self.hour()) * 60 * 60;
        let minute = u32::from(self.minute()) * 60;
        f64::from(hour + minute)
    }
}

impl Default for WakeTime {
    fn default() -> Self {
        Self(DEFAULT_WAKE_TIME)
    }
}

impl fmt::Display for WakeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Desired hours of sleep, kept on the stepper grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepAmount(f64);

impl SleepAmount {
    /// Clamps to `[4, 12]` and snaps to the nearest quarter hour.
    pub fn new(hours: f64) -> Self {
        if !hours.is_finite() {
            return Self::default();
        }
        let clamped = hours.clamp(SLEEP_AMOUNT_MIN, SLEEP_AMOUNT_MAX);
        let steps = (clamped / SLEEP_AMOUNT_STEP).round();
        Self(steps * SLEEP_AMOUNT_STEP)
    }

    pub fn hours(&self) -> f64 {
        self.0
    }

    /// Shortest representation: `8`, `8.25`.
    pub fn label(&self) -> String {
        format!("{}", self.0)
    }
}

impl Default for SleepAmount {
    fn default() -> Self {
        Self(SLEEP_AMOUNT_DEFAULT)
    }
}

/// Daily coffee intake in cups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoffeeIntake(u8);

impl CoffeeIntake {
    pub fn new(cups: i64) -> Self {
        let clamped = cups.clamp(i64::from(COFFEE_INTAKE_MIN), i64::from(COFFEE_INTAKE_MAX));
        Self(u8::try_from(clamped).unwrap_or(COFFEE_INTAKE_DEFAULT))
    }

    pub fn cups(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> String {
        if self.0 == 1 {
            "1 cup".to_string()
        } else {
            format!("{} cups", self.0)
        }
    }
}

/// Immutable input record for one bedtime calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BedtimeRequest {
    pub wake_time: WakeTime,
    pub sleep_amount: SleepAmount,
    pub coffee_intake: CoffeeIntake,
}

impl BedtimeRequest {
    pub fn new(wake_time: WakeTime, sleep_amount: SleepAmount, coffee_intake: CoffeeIntake) -> Self {
        Self {
            wake_time,
            sleep_amount,
            coffee_intake,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSpec<T> {
    pub min: T,
    pub max: T,
    pub step: T,
    pub default: T,
}

/// Defaults and ranges the form starts from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDefaults {
    pub wake_time: String,
    pub sleep_amount: RangeSpec<f64>,
    pub coffee_intake: RangeSpec<u8>,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            wake_time: WakeTime::default().to_string(),
            sleep_amount: RangeSpec {
                min: SLEEP_AMOUNT_MIN,
                max: SLEEP_AMOUNT_MAX,
                step: SLEEP_AMOUNT_STEP,
                default: SLEEP_AMOUNT_DEFAULT,
            },
            coffee_intake: RangeSpec {
                min: COFFEE_INTAKE_MIN,
                max: COFFEE_INTAKE_MAX,
                step: 1,
                default: COFFEE_INTAKE_DEFAULT,
            },
        }
    }
}
