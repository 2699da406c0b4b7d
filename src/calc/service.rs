use std::str::FromStr;

use serde_json::Value;

use crate::error::ApiError;

/// Arithmetic selected by the request's `operation` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl FromStr for Operation {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "subtract" => Ok(Self::Subtract),
            "multiply" => Ok(Self::Multiply),
            "divide" => Ok(Self::Divide),
            _ => Err(ApiError::Operation(
                "Invalid operation. Supported: add, subtract, multiply, divide".into(),
            )),
        }
    }
}

impl Operation {
    pub fn apply(self, a: f64, b: f64) -> Result<f64, ApiError> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide if b == 0.0 => Err(ApiError::Operation("Cannot divide by zero".into())),
            Self::Divide => Ok(a / b),
        }
    }
}

/// JSON numbers pass through; strings are parsed after trimming. A
/// string that parses to NaN still counts as non-numeric.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (!n.is_nan()).then_some(n)
}

/// Integral results serialize as plain JSON integers; non-finite
/// values have no JSON form and become null.
pub fn to_json_number(n: f64) -> Value {
    if !n.is_finite() {
        Value::Null
    } else if n.fract() == 0.0 && n.abs() < 9.0e18 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}
