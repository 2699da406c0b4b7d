use axum::extract::{FromRef, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::auth::jwt::{JwtKeys, TokenError};
use crate::auth::TOKEN_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

/// Paths reachable without a token. Matched exactly, no prefixes.
const PUBLIC_PATHS: [&str; 4] = ["/docs", "/openapi.json", "/register", "/login"];

/// Rejects any non-public request that lacks a verifiable token. On
/// success the decoded claims are attached as a request extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if PUBLIC_PATHS.contains(&req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let token = bearer_token(&req)
        .or_else(|| cookie_token(&req))
        .ok_or(ApiError::NoToken)?;

    let claims = JwtKeys::from_ref(&state).verify(&token).map_err(|e| {
        warn!(path = %req.uri().path(), error = %e, "token rejected");
        match e {
            TokenError::Expired => ApiError::TokenExpired,
            TokenError::Invalid => ApiError::TokenInvalid,
        }
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Second whitespace-separated chunk of the Authorization header. The
/// scheme word itself is not checked.
fn bearer_token(req: &Request) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value.split_whitespace().nth(1).map(str::to_string)
}

fn cookie_token(req: &Request) -> Option<String> {
    let value = req.headers().get(header::COOKIE)?.to_str().ok()?;
    value.split(';').find_map(|pair| {
        let (name, token) = pair.trim().split_once('=')?;
        (name == TOKEN_COOKIE).then(|| token.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::{get, post};
    use axum::{middleware, Extension, Router};
    use http_body_util::BodyExt;
    use time::Duration;
    use tower::ServiceExt;

    use crate::auth::claims::Claims;

    fn test_app(state: AppState) -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|Extension(claims): Extension<Claims>| async move {
                    claims.user_id.to_string()
                }),
            )
            .route("/login", post(|| async { "public" }))
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state)
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let body = res.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, body)
    }

    fn message(body: &[u8]) -> String {
        let v: serde_json::Value = serde_json::from_slice(body).unwrap();
        v["message"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn public_path_passes_without_token() {
        let app = test_app(AppState::fake());
        let req = Request::builder()
            .method("POST")
            .uri("/login")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"public");
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let app = test_app(AppState::fake());
        let req = Request::builder()
            .uri("/whoami")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), "Unauthorized: No token provided");
    }

    #[tokio::test]
    async fn expired_token_is_rejected_with_expired_message() {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state)
            .sign_with_ttl(1, "old@example.com", Duration::seconds(-10))
            .unwrap();
        let req = Request::builder()
            .uri("/whoami")
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_app(state), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), "Unauthorized: Token expired");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected_with_invalid_message() {
        let app = test_app(AppState::fake());
        let req = Request::builder()
            .uri("/whoami")
            .header("Authorization", "Bearer invalid.token.parts")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), "Unauthorized: Invalid token");
    }

    #[tokio::test]
    async fn bearer_token_attaches_claims() {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state).sign(42, "her@example.com").unwrap();
        let req = Request::builder()
            .uri("/whoami")
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_app(state), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"42");
    }

    #[tokio::test]
    async fn scheme_word_is_not_checked() {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state).sign(5, "odd@example.com").unwrap();
        let req = Request::builder()
            .uri("/whoami")
            .header("Authorization", format!("Token {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_app(state), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"5");
    }

    #[tokio::test]
    async fn cookie_token_is_accepted() {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state).sign(7, "jar@example.com").unwrap();
        let req = Request::builder()
            .uri("/whoami")
            .header("Cookie", format!("theme=dark; token={token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_app(state), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"7");
    }

    #[tokio::test]
    async fn single_chunk_authorization_counts_as_no_token() {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state).sign(3, "bare@example.com").unwrap();
        let req = Request::builder()
            .uri("/whoami")
            .header("Authorization", token)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_app(state), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), "Unauthorized: No token provided");
    }
}
