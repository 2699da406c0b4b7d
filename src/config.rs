use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

/// Fallback signing secret used when `JWT_SECRET` is unset. Public
/// knowledge, good for local development only.
pub const DEFAULT_JWT_SECRET: &str = "SECRET_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub production: bool,
    pub users_file: PathBuf,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let production = std::env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);
        let users_file = std::env::var("USERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/users.json"));
        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                warn!("JWT_SECRET not set; using the insecure development fallback");
                DEFAULT_JWT_SECRET.to_string()
            }
        };
        let ttl_days = std::env::var("JWT_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(7);

        Self {
            host,
            port,
            production,
            users_file,
            jwt: JwtConfig { secret, ttl_days },
        }
    }
}
