use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Every error the API can hand back to a client. The display strings
/// are part of the wire contract and must not change.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Please enter all fields")]
    MissingFields,
    #[error("User already exists")]
    DuplicateAccount,
    #[error("User does not exist")]
    NoSuchAccount,
    #[error("Invalid credentials")]
    BadCredentials,
    #[error("Unauthorized: No token provided")]
    NoToken,
    #[error("Unauthorized: Token expired")]
    TokenExpired,
    #[error("Unauthorized: Invalid token")]
    TokenInvalid,
    #[error("Missing required \"operation\" header")]
    MissingOperationHeader,
    #[error("{0}")]
    Operation(String),
    #[error("Server error: {0}")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoToken | Self::TokenExpired | Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
