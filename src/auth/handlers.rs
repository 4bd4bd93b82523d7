use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthCodeRequest, AuthResponse, AuthedUser},
        jwt::JwtKeys,
    },
    error::AppError,
    state::AppState,
    users::UpsertUser,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/code", post(exchange_code))
}

/// POST /auth/code — trade the authorization code for a Spotify token,
/// fetch the profile, and create or update the account.
#[instrument(skip(state, payload))]
pub async fn exchange_code(
    State(state): State<AppState>,
    payload: Result<Json<AuthCodeRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(req) = payload.map_err(|e| {
        warn!(error = %e, "failed to decode request");
        AppError::BadRequest("failed to decode request".into())
    })?;

    let code = req.code.trim();
    if code.is_empty() {
        warn!("code field is missing or empty");
        return Err(AppError::BadRequest("code is required".into()));
    }
    if let Some(client_state) = req.state.as_deref() {
        debug!(state = %client_state, "client supplied state");
    }

    let grant = state.spotify.exchange_code(code).await?;
    let profile = state.spotify.current_profile(&grant.access_token).await?;

    let email = profile.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        warn!(email = %email, "profile carried an invalid email");
        return Err(AppError::Upstream("failed to get user data".into()));
    }

    // Session token is minted up front; the upsert only applies it when the
    // row is new, so a repeat exchange keeps the original token.
    let keys = JwtKeys::from_ref(&state);
    let session_token = keys.sign_session(&email).map_err(|e| {
        error!(error = %e, "failed to sign session token");
        AppError::Internal(e)
    })?;

    let user = state
        .users
        .upsert(UpsertUser {
            email,
            name: profile.display_name,
            session_token,
            access_token: grant.access_token,
            country: profile.country,
            product: profile.product,
            spotify_id: profile.id,
            href: profile.href,
            uri: profile.uri,
        })
        .await
        .map_err(|e| {
            error!(error = %e, "failed to save user");
            AppError::Storage("failed to save user".into())
        })?;

    info!(user_id = user.id, email = %user.email, "user authenticated");
    Ok(Json(AuthResponse {
        user: AuthedUser {
            name: user.name,
            access_token: user.session_token,
            email: user.email,
            id: user.spotify_id,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn email_regex_rejects_garbage() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b"));
    }

    #[test]
    fn auth_response_shape() {
        let resp = AuthResponse {
            user: AuthedUser {
                name: "Alice".into(),
                access_token: "jwt".into(),
                email: "a@b.com".into(),
                id: "sp123".into(),
            },
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["user"]["email"], "a@b.com");
        assert_eq!(json["user"]["id"], "sp123");
        assert_eq!(json["user"]["access_token"], "jwt");
    }
}
