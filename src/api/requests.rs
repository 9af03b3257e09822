use crate::form::{BedtimeRequest, CoffeeIntake, InvalidWakeTime, SleepAmount, WakeTime};
use serde::Deserialize;

/// Body of `POST /api/bedtime`. Missing fields take the form defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BedtimeForm {
    pub wake_time: Option<String>,
    pub sleep_amount: Option<f64>,
    pub coffee_intake: Option<i64>,
}

impl BedtimeForm {
    pub fn into_request(self) -> Result<BedtimeRequest, InvalidWakeTime> {
        let wake_time = match self.wake_time.as_deref() {
            Some(raw) => WakeTime::parse(raw)?,
            None => WakeTime::default(),
        };
        let sleep_amount = self
            .sleep_amount
            .map(SleepAmount::new)
            .unwrap_or_default();
        let coffee_intake = self
            .coffee_intake
            .map(CoffeeIntake::new)
            .unwrap_or_default();
        Ok(BedtimeRequest::new(wake_time, sleep_amount, coffee_intake))
    }
}
