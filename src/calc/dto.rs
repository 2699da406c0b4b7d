use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operands arrive as raw JSON values; numbers and numeric strings
/// are both accepted.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub number1: Option<Value>,
    pub number2: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub result: Value,
}
