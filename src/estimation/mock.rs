use crate::estimation::model::{PredictionUnavailable, SleepFeatures, SleepModel};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockSleepBehavior {
    /// Always return this many seconds.
    Fixed(f64),
    /// Return the desired sleep hours converted to seconds.
    EchoDesiredSleep,
    /// Always fail.
    Unavailable,
}

#[derive(Debug)]
pub struct MockSleepModel {
    behavior: MockSleepBehavior,
    calls: AtomicUsize,
}

impl MockSleepModel {
    pub fn new(behavior: MockSleepBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fixed(seconds: f64) -> Self {
        Self::new(MockSleepBehavior::Fixed(seconds))
    }

    pub fn echo() -> Self {
        Self::new(MockSleepBehavior::EchoDesiredSleep)
    }

    pub fn unavailable() -> Self {
        Self::new(MockSleepBehavior::Unavailable)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SleepModel for MockSleepModel {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, PredictionUnavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockSleepBehavior::Fixed(seconds) => Ok(seconds),
            MockSleepBehavior::EchoDesiredSleep => Ok(features.estimated_sleep * 3600.0),
            MockSleepBehavior::Unavailable => {
                Err(PredictionUnavailable::new("mock model configured to fail"))
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
