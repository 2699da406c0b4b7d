use axum::extract::{FromRef, State};
use axum::http::{header::SET_COOKIE, HeaderName, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{info, instrument, warn};

use crate::auth::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::store::{next_user_id, User};
use crate::auth::TOKEN_COOKIE;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Cookie lifetime. Shorter than the seven-day token on purpose; the
/// token inside stays valid after the browser drops the cookie.
const COOKIE_MAX_AGE_SECS: i64 = 3600;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (name, email, password) = match (
        present(payload.name),
        present(payload.email),
        present(payload.password),
    ) {
        (Some(n), Some(e), Some(p)) => (n, e, p),
        _ => return Err(ApiError::MissingFields),
    };

    let mut users = state.store.load_all().await?;
    if users.iter().any(|u| u.email == email) {
        warn!(email = %email, "email already registered");
        return Err(ApiError::DuplicateAccount);
    }

    let user = User {
        id: next_user_id(&users),
        email,
        password: hash_password(&password)?,
        name,
    };
    users.push(user.clone());
    state.store.save_all(&users).await?;

    let token = JwtKeys::from_ref(&state).sign(user.id, &user.email)?;
    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        auth_cookie(&state.config, &token),
        Json(AuthResponse {
            user_id: user.id,
            name: user.name,
            email: user.email,
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (email, password) = match (present(payload.email), present(payload.password)) {
        (Some(e), Some(p)) => (e, p),
        _ => return Err(ApiError::MissingFields),
    };

    let users = state.store.load_all().await?;
    let user = users.iter().find(|u| u.email == email).ok_or_else(|| {
        warn!(email = %email, "login unknown email");
        ApiError::NoSuchAccount
    })?;

    if !verify_password(&password, &user.password)? {
        warn!(email = %email, user_id = user.id, "login invalid password");
        return Err(ApiError::BadCredentials);
    }

    let token = JwtKeys::from_ref(&state).sign(user.id, &user.email)?;
    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok((
        StatusCode::OK,
        auth_cookie(&state.config, &token),
        Json(AuthResponse {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            token,
        }),
    ))
}

/// Treats an absent field and an empty string the same way.
fn present(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}

/// `Set-Cookie` pair carrying the fresh token. Marked `Secure` only in
/// production so plain-HTTP development setups keep working.
fn auth_cookie(config: &AppConfig, token: &str) -> [(HeaderName, String); 1] {
    let mut cookie = format!(
        "{TOKEN_COOKIE}={token}; Max-Age={COOKIE_MAX_AGE_SECS}; Path=/; HttpOnly; SameSite=Strict"
    );
    if config.production {
        cookie.push_str("; Secure");
    }
    [(SET_COOKIE, cookie)]
}
