//! HTTP handlers for exam timetable lookups
//!
//! One endpoint: POST a `{ type, data }` body, get back the matching
//! `{ name, time }` rows or `{ error }`.

use std::any::Any;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::AppState;
use examtime_core::{ExtractRequest, MatchResult, TimetableError};

/// Body of every failed response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Lookup failure mapped to an HTTP response
///
/// Invalid queries and empty results are 400; everything else is 500.
#[derive(Debug)]
pub struct ApiError(TimetableError);

impl From<TimetableError> for ApiError {
    fn from(err: TimetableError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            error!("timetable lookup failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        error_response(status, self.0.to_string())
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

/// Look up exam times.
///
/// The body is read raw so that a missing or malformed body still goes
/// through validation and gets a validation message.
///
/// # Returns
/// * `200` with a JSON array of `{ name, time }` in timetable order
/// * `400 { error }` for validation failures and lookups with no matches
/// * `500 { error }` if the timetable could not be loaded
pub async fn lookup(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<MatchResult>>, ApiError> {
    let request = ExtractRequest::from_body(&body);
    let results = state.extractor().extract_request(request).await?;
    Ok(Json(results))
}

/// Turn a panic inside a handler into a generic 500 response.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "internal error".to_string()
    };
    error!("handler panicked: {}", message);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}
