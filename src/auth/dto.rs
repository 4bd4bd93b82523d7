use serde::{Deserialize, Serialize};

/// Request body for the authorization-code exchange.
#[derive(Debug, Deserialize)]
pub struct AuthCodeRequest {
    pub code: String,
    /// Opaque state echoed by the client; not interpreted here.
    #[serde(default)]
    pub state: Option<String>,
}

/// Public slice of the account returned after a successful exchange.
///
/// `access_token` is the application session token, `id` the Spotify
/// account id.
#[derive(Debug, Serialize)]
pub struct AuthedUser {
    pub name: String,
    pub access_token: String,
    pub email: String,
    pub id: String,
}

/// Response body for `POST /auth/code`.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: AuthedUser,
}

/// Session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // account email
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
}
