use crate::api::requests::BedtimeForm;
use crate::api::responses::{
    BedtimeErrorCode, BedtimeErrorResponse, BedtimeSuccessResponse, FormInputs, HealthResponse,
    HealthStatus,
};
use crate::error::AppError;
use crate::form::{BedtimeRequest, FormDefaults};
use crate::predictor::{BedtimeAlert, ERROR_TITLE};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::{error, info, warn};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

pub enum BedtimeResponse {
    Success(BedtimeSuccessResponse),
    Error {
        status: StatusCode,
        body: BedtimeErrorResponse,
    },
}

impl IntoResponse for BedtimeResponse {
    fn into_response(self) -> Response {
        match self {
            BedtimeResponse::Success(body) => (StatusCode::OK, Json(body)).into_response(),
            BedtimeResponse::Error { status, body } => (status, Json(body)).into_response(),
        }
    }
}

pub async fn get_form() -> Json<FormDefaults> {
    Json(FormDefaults::default())
}

pub async fn post_bedtime(
    State(state): State<Arc<AppState>>,
    form: Result<Json<BedtimeForm>, JsonRejection>,
) -> impl IntoResponse {
    let Json(form) = match form {
        Ok(form) => form,
        Err(rejection) => return invalid_body(&rejection),
    };
    let request = match form.into_request() {
        Ok(request) => request,
        Err(err) => return invalid_wake_time(AppError::from(err)),
    };
    let outcome = state.compute_bedtime(request).await;
    build_bedtime_response(&request, outcome)
}

pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Ok,
        model: state.model().name().to_string(),
    })
}

fn build_bedtime_response(
    request: &BedtimeRequest,
    outcome: Result<Result<String, &'static str>, AppError>,
) -> BedtimeResponse {
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => return internal_error(&err),
    };

    let alert = BedtimeAlert::from_outcome(&outcome);
    match outcome {
        Ok(bedtime) => {
            info!(
                wake_time = %request.wake_time,
                sleep_amount = request.sleep_amount.hours(),
                coffee_intake = request.coffee_intake.cups(),
                bedtime = %bedtime,
                "Bedtime calculated"
            );
            BedtimeResponse::Success(BedtimeSuccessResponse {
                title: alert.title,
                message: alert.message,
                bedtime,
                inputs: FormInputs {
                    wake_time: request.wake_time.to_string(),
                    sleep_amount: request.sleep_amount.label(),
                    coffee_intake: request.coffee_intake.label(),
                },
            })
        }
        Err(_) => BedtimeResponse::Error {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: BedtimeErrorResponse {
                error_code: BedtimeErrorCode::PredictionUnavailable,
                title: alert.title,
                error_message: alert.message,
            },
        },
    }
}

fn invalid_wake_time(err: AppError) -> BedtimeResponse {
    BedtimeResponse::Error {
        status: StatusCode::BAD_REQUEST,
        body: BedtimeErrorResponse {
            error_code: BedtimeErrorCode::InvalidWakeTime,
            title: ERROR_TITLE.to_string(),
            error_message: err.to_string(),
        },
    }
}

fn invalid_body(rejection: &JsonRejection) -> BedtimeResponse {
    warn!(
        status = %rejection.status(),
        error = %rejection.body_text(),
        "Rejected /api/bedtime body"
    );
    BedtimeResponse::Error {
        status: StatusCode::BAD_REQUEST,
        body: BedtimeErrorResponse {
            error_code: BedtimeErrorCode::InvalidBody,
            title: ERROR_TITLE.to_string(),
            error_message: rejection.body_text(),
        },
    }
}

fn internal_error(err: &AppError) -> BedtimeResponse {
    error!(error = %err, "Internal error while handling /api/bedtime");
    BedtimeResponse::Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: BedtimeErrorResponse {
            error_code: BedtimeErrorCode::InternalError,
            title: ERROR_TITLE.to_string(),
            error_message: INTERNAL_ERROR_MESSAGE.to_string(),
        },
    }
}
