use serde::{Deserialize, Serialize};

/// Request body for user registration. Fields are optional so the
/// handler can answer absent and empty values with the same message.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub token: String,
}
