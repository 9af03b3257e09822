use serde::Serialize;

/// Inputs as the form displays them after clamping.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FormInputs {
    pub wake_time: String,
    pub sleep_amount: String,
    pub coffee_intake: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BedtimeSuccessResponse {
    pub title: String,
    pub message: String,
    pub bedtime: String,
    pub inputs: FormInputs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BedtimeErrorResponse {
    pub error_code: BedtimeErrorCode,
    pub title: String,
    pub error_message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BedtimeErrorCode {
    PredictionUnavailable,
    InvalidWakeTime,
    InvalidBody,
    InternalError,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_response_nests_inputs() {
        let response = BedtimeSuccessResponse {
            title: "Your ideal bedtime is...".to_string(),
            message: "23:00".to_string(),
            bedtime: "23:00".to_string(),
            inputs: FormInputs {
                wake_time: "07:00".to_string(),
                sleep_amount: "8".to_string(),
                coffee_intake: "1 cup".to_string(),
            },
        };

        let value = serde_json::to_value(response).expect("serialize success response");
        assert_eq!(
            value,
            json!({
                "title": "Your ideal bedtime is...",
                "message": "23:00",
                "bedtime": "23:00",
                "inputs": {
                    "wake_time": "07:00",
                    "sleep_amount": "8",
                    "coffee_intake": "1 cup"
                }
            })
        );
    }

    #[test]
    fn error_response_uses_screaming_snake_case_code() {
        let response = BedtimeErrorResponse {
            error_code: BedtimeErrorCode::PredictionUnavailable,
            title: "Error".to_string(),
            error_message: "no prediction".to_string(),
        };

        let value = serde_json::to_value(response).expect("serialize error response");
        assert_eq!(
            value,
            json!({
                "error_code": "PREDICTION_UNAVAILABLE",
                "title": "Error",
                "error_message": "no prediction"
            })
        );
    }

    #[test]
    fn health_response_serializes_status() {
        let response = HealthResponse {
            status: HealthStatus::Ok,
            model: "linear".to_string(),
        };

        let value = serde_json::to_value(response).expect("serialize health response");
        assert_eq!(value, json!({ "status": "ok", "model": "linear" }));
    }
}
