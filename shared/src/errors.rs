use lambda_http::http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Failures raised while serving a user request.
///
/// The messages carry backend detail and are only ever logged. Callers see
/// the [`ApiError`] each variant maps to.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("failed to get item from DynamoDB: {0}")]
    GetItem(String),

    #[error("failed to scan items from DynamoDB: {0}")]
    ScanItems(String),

    #[error("failed to put item to DynamoDB: {0}")]
    PutItem(String),

    #[error("failed to delete item from DynamoDB: {0}")]
    DeleteItem(String),

    #[error("failed to unmarshal item: {0}")]
    UnmarshalItem(String),

    #[error("user does not exist")]
    UserDoesNotExist,

    #[error("failed to validate user: {0}")]
    Validation(&'static str),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("method not supported: {0}")]
    MethodNotAllowed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// The public error contract: what a caller sees in `{"error": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    NotFound,
    MethodNotSupported,
    InternalServerError,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotSupported => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ApiError::BadRequest => "bad request",
            ApiError::NotFound => "not found",
            ApiError::MethodNotSupported => "method not supported",
            ApiError::InternalServerError => "internal server error",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Maps internal failures to the HTTP-visible error.
impl From<&UserError> for ApiError {
    fn from(err: &UserError) -> Self {
        match err {
            UserError::GetItem(_)
            | UserError::ScanItems(_)
            | UserError::PutItem(_)
            | UserError::DeleteItem(_)
            | UserError::UnmarshalItem(_) => ApiError::InternalServerError,
            UserError::UserDoesNotExist => ApiError::NotFound,
            UserError::Validation(_) | UserError::InvalidJson(_) => ApiError::BadRequest,
            UserError::MethodNotAllowed(_) => ApiError::MethodNotSupported,
            UserError::Internal(_) => ApiError::InternalServerError,
        }
    }
}
