//! Axum request handlers for all service endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    CipherResult, ErrorResponse, FormFields, HealthResponse, IssueBody, ValidateResponse,
};
use common::ServiceError;
use tracing::info;
use validation::{normalize, Preset};

use super::state::AppState;
use crate::downstream::Operation;

/// `POST /validate` — report every issue with the submitted form, without submitting it.
pub async fn validate(
    State(state): State<AppState>,
    body: Result<Json<FormFields>, JsonRejection>,
) -> Response {
    let form = match read_form(body) {
        Ok(form) => form,
        Err(e) => return error_response(&e, Vec::new()),
    };

    let report = state.validator.validate(&normalize(&form));
    let body = ValidateResponse {
        admissible: report.is_admissible(),
        message: report.joined(),
        issues: report.to_bodies(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `POST /encrypt` — validate, then relay to the cipher service.
pub async fn encrypt(
    State(state): State<AppState>,
    body: Result<Json<FormFields>, JsonRejection>,
) -> Response {
    relay(&state, Operation::Encrypt, body).await
}

/// `POST /decrypt` — validate, then relay to the cipher service.
pub async fn decrypt(
    State(state): State<AppState>,
    body: Result<Json<FormFields>, JsonRejection>,
) -> Response {
    relay(&state, Operation::Decrypt, body).await
}

/// `GET /presets/:name` — canned form values.
pub async fn preset(Path(name): Path<String>) -> Response {
    match name.parse::<Preset>() {
        Ok(preset) => (StatusCode::OK, Json(preset.fields())).into_response(),
        Err(e) => {
            let err = ErrorResponse::new("not_found", e.to_string());
            (StatusCode::NOT_FOUND, Json(err)).into_response()
        }
    }
}

/// `POST /presets/:name` — apply a preset to the submitted form.
pub async fn apply_preset(
    Path(name): Path<String>,
    body: Result<Json<FormFields>, JsonRejection>,
) -> Response {
    let preset = match name.parse::<Preset>() {
        Ok(preset) => preset,
        Err(e) => {
            let err = ErrorResponse::new("not_found", e.to_string());
            return (StatusCode::NOT_FOUND, Json(err)).into_response();
        }
    };
    match read_form(body) {
        Ok(form) => (StatusCode::OK, Json(preset.apply(form))).into_response(),
        Err(e) => error_response(&e, Vec::new()),
    }
}

/// `GET /health` — liveness check.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        downstream: state.client.base_url().to_owned(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_form(body: Result<Json<FormFields>, JsonRejection>) -> Result<FormFields, ServiceError> {
    body.map(|Json(form)| form)
        .map_err(|rejection| ServiceError::BadRequest(rejection.body_text()))
}

fn error_response(err: &ServiceError, issues: Vec<IssueBody>) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorResponse::new(err.code(), err.to_string()).with_issues(issues);
    (status, Json(body)).into_response()
}

/// Normalise, validate, and — only when admissible — submit to the cipher service.
async fn relay(
    state: &AppState,
    operation: Operation,
    body: Result<Json<FormFields>, JsonRejection>,
) -> Response {
    let form = match read_form(body) {
        Ok(form) => form,
        Err(e) => return error_response(&e, Vec::new()),
    };

    let request = normalize(&form);
    let report = state.validator.validate(&request);
    if !report.is_admissible() {
        info!(
            operation = operation.as_str(),
            algorithm = %request.algorithm,
            mode = %request.mode,
            issues = report.len(),
            "request rejected by validation"
        );
        let err = ServiceError::Invalid(report.joined());
        return error_response(&err, report.to_bodies());
    }

    match state.client.submit(operation, &request).await {
        Ok(cipher_text) => (StatusCode::OK, Json(CipherResult { cipher_text })).into_response(),
        Err(e) => error_response(&ServiceError::from(e), Vec::new()),
    }
}
