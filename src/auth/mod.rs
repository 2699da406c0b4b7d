use crate::state::AppState;
use axum::Router;

pub(crate) mod claims;
mod dto;
pub mod gate;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod store;

/// Cookie holding the auth token for clients that do not send a
/// bearer header.
pub const TOKEN_COOKIE: &str = "token";

pub fn router() -> Router<AppState> {
    handlers::routes()
}
