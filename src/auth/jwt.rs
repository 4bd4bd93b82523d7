use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, error, warn};

use crate::{auth::dto::Claims, error::AppError, state::AppState, users::User};

/// Fixed lifetime of an application session token.
pub const SESSION_TTL: TimeDuration = TimeDuration::hours(72);

/// Holds session-token signing and verification keys.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt.secret)
    }
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a session token for an account, expiring in [`SESSION_TTL`].
    pub fn sign_session(&self, email: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + SESSION_TTL;
        let claims = Claims {
            sub: email.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(email = %email, "session token signed");
        Ok(token)
    }

    /// Verify signature and expiry. No leeway: a token is rejected the
    /// moment its `exp` has passed.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

/// Extracts the account owning the bearer session token.
///
/// Handlers taking this parameter never run for unauthenticated requests;
/// the rejection is produced before any upstream call.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing authorization header".into()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("invalid authorization header format".into()))?;

        let keys = JwtKeys::from_ref(state);
        keys.verify(token).map_err(|e| {
            warn!(error = %e, "session token rejected");
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::Unauthorized("token expired".into()),
                _ => AppError::Unauthorized("invalid token".into()),
            }
        })?;

        let user = state
            .users
            .find_by_session_token(token)
            .await
            .map_err(|e| {
                error!(error = %e, "session token lookup failed");
                AppError::Unauthorized("unauthorized".into())
            })?
            .ok_or_else(|| AppError::Unauthorized("unauthorized".into()))?;

        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        JwtKeys::new("dev-secret")
    }

    #[test]
    fn sign_and_verify_session_token() {
        let keys = make_keys();
        let token = keys.sign_session("a@b.com").expect("sign session");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, "a@b.com");
        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, SESSION_TTL.whole_seconds() as usize);
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        let claims = Claims {
            sub: "a@b.com".into(),
            iat: now - 73 * 3600,
            exp: now - 3600,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();
        let err = keys.verify(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn verify_accepts_token_just_inside_ttl() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        let claims = Claims {
            sub: "a@b.com".into(),
            iat: now - (SESSION_TTL.whole_seconds() as usize - 60),
            exp: now + 60,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();
        assert!(keys.verify(&token).is_ok());
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let keys = make_keys();
        let other = JwtKeys::new("other-secret");
        let token = keys.sign_session("a@b.com").expect("sign session");
        assert!(other.verify(&token).is_err());
    }
}
