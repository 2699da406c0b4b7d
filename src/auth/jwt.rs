use axum::extract::FromRef;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::auth::claims::Claims;
use crate::config::JwtConfig;
use crate::state::AppState;

/// Why a presented token was refused. Expiry is split out because the
/// client-facing message differs from every other failure.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig { secret, ttl_days } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::days(ttl_days),
        }
    }
}

impl JwtKeys {
    pub fn sign(&self, user_id: u64, email: &str) -> anyhow::Result<String> {
        self.sign_with_ttl(user_id, email, self.ttl)
    }

    /// Signs with an explicit lifetime. A zero or negative `ttl` yields
    /// an already-expired token.
    pub fn sign_with_ttl(
        &self,
        user_id: u64,
        email: &str,
        ttl: Duration,
    ) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: (now + ttl).unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        // Zero leeway: a token one second past exp is already expired.
        validation.leeway = 0;
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(user_id = data.claims.user_id, "jwt verified");
                Ok(data.claims)
            }
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => Err(TokenError::Expired),
            Err(_) => Err(TokenError::Invalid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        JwtKeys::from_ref(&AppState::fake())
    }

    #[test]
    fn sign_and_verify_round_trips_claims() {
        let keys = make_keys();
        let token = keys.sign(42, "him@example.com").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "him@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_classified_as_expired() {
        let keys = make_keys();
        let token = keys
            .sign_with_ttl(7, "late@example.com", Duration::seconds(-10))
            .expect("sign");
        assert_eq!(keys.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn garbage_is_classified_as_invalid() {
        let keys = make_keys();
        assert_eq!(
            keys.verify("invalid.token.parts").unwrap_err(),
            TokenError::Invalid
        );
        assert_eq!(keys.verify("").unwrap_err(), TokenError::Invalid);
    }

    #[test]
    fn wrong_secret_is_classified_as_invalid_even_when_expired() {
        let keys = make_keys();
        let other = JwtKeys {
            encoding: EncodingKey::from_secret(b"a-different-secret"),
            decoding: DecodingKey::from_secret(b"a-different-secret"),
            ttl: Duration::days(7),
        };
        let token = other
            .sign_with_ttl(9, "forged@example.com", Duration::seconds(-10))
            .expect("sign");
        assert_eq!(keys.verify(&token).unwrap_err(), TokenError::Invalid);
    }
}
