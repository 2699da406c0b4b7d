use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
mod service;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
