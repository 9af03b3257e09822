use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub mod linear;
pub mod mock;
pub mod model;
pub mod remote;

use linear::{LinearSleepModel, LinearSleepParams};
use model::SleepModel;
use remote::{DEFAULT_REMOTE_TIMEOUT, RemoteSleepModel};

// Model Factory
pub fn create_model(config: &CalibrationFile) -> Result<Box<dyn SleepModel>, CalibrationError> {
    match config.model.as_str() {
        "linear" => {
            let params: LinearSleepParams = serde_json::from_value(config.params.clone())?;
            Ok(Box::new(LinearSleepModel::new(params)))
        }
        "remote" => {
            let params: RemoteParams = serde_json::from_value(config.params.clone())?;
            if params.endpoint.trim().is_empty() {
                return Err(CalibrationError::Invalid(
                    "remote model requires an endpoint".to_string(),
                ));
            }
            let timeout = params
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_REMOTE_TIMEOUT);
            let fallback = params
                .fallback
                .map(|fallback| Box::new(LinearSleepModel::new(fallback)) as Box<dyn SleepModel>);
            Ok(Box::new(RemoteSleepModel::new(
                params.endpoint,
                timeout,
                params.model_id.unwrap_or_else(|| "sleep-calculator".to_string()),
                fallback,
            )))
        }
        other => Err(CalibrationError::Invalid(format!("unknown model: {other}"))),
    }
}

#[derive(Debug, Deserialize)]
pub struct CalibrationFile {
    pub model: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RemoteParams {
    endpoint: String,
    timeout_ms: Option<u64>,
    model_id: Option<String>,
    fallback: Option<LinearSleepParams>,
}

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("failed to read calibration file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse calibration file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid calibration: {0}")]
    Invalid(String),
}

pub fn load_calibration_from_path(
    path: impl AsRef<Path>,
) -> Result<Box<dyn SleepModel>, CalibrationError> {
    let contents = std::fs::read_to_string(path)?;
    let config: CalibrationFile = serde_json::from_str(&contents)?;
    create_model(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn calibration(model: &str, params: serde_json::Value) -> CalibrationFile {
        CalibrationFile {
            model: model.to_string(),
            params,
        }
    }

    #[test]
    fn linear_calibration_builds_linear_model() -> Result<(), CalibrationError> {
        let config = calibration(
            "linear",
            json!({
                "intercept": 0.0,
                "wake_coefficient": 0.0,
                "sleep_coefficient": 3600.0,
                "coffee_coefficient": 0.0
            }),
        );

        let model = create_model(&config)?;

        assert_eq!(model.name(), "linear");
        Ok(())
    }

    #[test]
    fn remote_calibration_builds_remote_model() -> Result<(), CalibrationError> {
        let config = calibration(
            "remote",
            json!({
                "endpoint": "http://127.0.0.1:9000/predict",
                "timeout_ms": 500,
                "fallback": {
                    "intercept": 0.0,
                    "wake_coefficient": 0.0,
                    "sleep_coefficient": 3600.0,
                    "coffee_coefficient": 300.0
                }
            }),
        );

        let model = create_model(&config)?;

        assert_eq!(model.name(), "remote");
        assert!(format!("{model:?}").contains("has_fallback: true"));
        Ok(())
    }

    #[test]
    fn remote_calibration_requires_endpoint() {
        let config = calibration("remote", json!({ "endpoint": "  " }));

        let result = create_model(&config);

        assert!(matches!(result, Err(CalibrationError::Invalid(_))));
    }

    #[test]
    fn unknown_model_is_invalid() {
        let config = calibration("coreml", json!({}));

        let result = create_model(&config);

        assert!(matches!(result, Err(CalibrationError::Invalid(_))));
    }

    #[test]
    fn malformed_params_return_parse_error() {
        let config = calibration("linear", json!({ "intercept": "zero" }));

        let result = create_model(&config);

        assert!(matches!(result, Err(CalibrationError::Parse(_))));
    }

    #[test]
    fn bundled_calibration_file_loads() -> Result<(), CalibrationError> {
        let model = load_calibration_from_path("config/calibration.json")?;
        assert_eq!(model.name(), "linear");
        Ok(())
    }

    #[test]
    fn missing_calibration_file_returns_read_error() -> Result<(), Box<dyn std::error::Error>> {
        let unique = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
        let path = std::env::temp_dir().join(format!("better-rest-calibration-{unique}.json"));

        let result = load_calibration_from_path(&path);

        assert!(matches!(result, Err(CalibrationError::Read(_))));
        Ok(())
    }

    #[test]
    fn invalid_json_returns_parse_error() -> Result<(), Box<dyn std::error::Error>> {
        let unique = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
        let path = std::env::temp_dir().join(format!("better-rest-calibration-bad-{unique}.json"));
        fs::write(&path, "{ \"model\": ")?;

        let result = load_calibration_from_path(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(CalibrationError::Parse(_))));
        Ok(())
    }
}
