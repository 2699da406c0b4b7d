use axum::extract::Request;
use axum::http::{HeaderMap, Method};
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::post;
use axum::{Extension, Json, Router};
use tracing::{debug, instrument};

use crate::auth::claims::Claims;
use crate::calc::dto::{CalculateRequest, CalculateResponse};
use crate::calc::service::{coerce_number, to_json_number, Operation};
use crate::error::ApiError;
use crate::state::AppState;

/// Header selecting the arithmetic operation.
pub const OPERATION_HEADER: &str = "operation";

pub fn routes() -> Router<AppState> {
    Router::new().route("/calculate", post(calculate))
}

/// Rejects calculator posts that lack the operation header. Runs ahead
/// of the auth gate: a malformed request shape beats a missing token.
pub async fn require_operation_header(req: Request, next: Next) -> Result<Response, ApiError> {
    let applies = req.method() == Method::POST && req.uri().path() == "/calculate";
    if applies && !req.headers().contains_key(OPERATION_HEADER) {
        return Err(ApiError::MissingOperationHeader);
    }
    Ok(next.run(req).await)
}

#[instrument(skip(headers, payload))]
pub async fn calculate(
    Extension(claims): Extension<Claims>,
    headers: HeaderMap,
    Json(payload): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let operands = (
        payload.number1.as_ref().and_then(coerce_number),
        payload.number2.as_ref().and_then(coerce_number),
    );
    let (Some(a), Some(b)) = operands else {
        return Err(ApiError::Operation("Both numbers must be numeric".into()));
    };

    let op: Operation = headers
        .get(OPERATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .parse()?;

    let result = op.apply(a, b)?;
    debug!(user_id = claims.user_id, operation = ?op, "calculation served");
    Ok(Json(CalculateResponse {
        result: to_json_number(result),
    }))
}
