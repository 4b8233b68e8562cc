use crate::errors::{ApiError, UserError};
use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::Serialize;

/// Build a successful JSON response.
///
/// A body that fails to serialize degrades to a 500 error envelope so the
/// status code and body shape never disagree.
pub fn json_response<T: Serialize + ?Sized>(
    status: StatusCode,
    body: &T,
) -> Result<Response<Body>, Error> {
    match serde_json::to_string(body) {
        Ok(body) => build_response(status, body),
        Err(e) => error_response(&UserError::Internal(format!("failed to marshal JSON: {}", e))),
    }
}

/// Build the `{"error": ...}` response for a failure and log its detail.
pub fn error_response(err: &UserError) -> Result<Response<Body>, Error> {
    let api_error = ApiError::from(err);
    if api_error.status().is_server_error() {
        tracing::error!("{} ({})", api_error, err);
    } else {
        tracing::warn!("{} ({})", api_error, err);
    }

    build_response(
        api_error.status(),
        serde_json::json!({ "error": api_error.message() }).to_string(),
    )
}

fn build_response(status: StatusCode, body: String) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(body.into())
        .map_err(Box::new)?)
}
