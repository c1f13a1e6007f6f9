use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum LoanscopeError {
    #[error("No applicant with identifier {0}")]
    NotFound(i64),

    #[error("No client has been selected yet")]
    UninitializedState,

    #[error("Unknown feature: {0}")]
    FeatureNotFound(String),

    #[error("Undefined value in column {column} at row {row}")]
    UndefinedValue { column: String, row: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LoanscopeError>;

/// Error returned by HTTP handlers. Renders as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_)   => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_)   => StatusCode::CONFLICT,
            ApiError::Internal(_)   => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LoanscopeError> for ApiError {
    fn from(err: LoanscopeError) -> Self {
        match err {
            LoanscopeError::NotFound(_) => ApiError::NotFound(err.to_string()),
            LoanscopeError::UninitializedState => ApiError::Conflict(
                "No client selected: choose a file number on the home page first".to_string(),
            ),
            LoanscopeError::FeatureNotFound(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
