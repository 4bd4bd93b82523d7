use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                    // auto-incrementing row id
    pub name: String,               // Spotify display name
    pub email: String,              // unique per account
    #[serde(skip_serializing)]
    pub session_token: String,      // application-issued JWT, not exposed in JSON
    #[serde(skip_serializing)]
    pub access_token: String,       // Spotify access token, not exposed in JSON
    pub country: String,            // two-letter country code
    pub product: String,            // Spotify subscription tier
    pub spotify_id: String,         // unique Spotify account id
    pub href: String,               // Spotify profile API link
    pub uri: String,                // Spotify profile URI
    pub created_at: OffsetDateTime, // creation timestamp
}

/// Field set written by the upsert; everything a fresh row needs.
///
/// `session_token` only lands on insert — updates keep the stored one.
#[derive(Debug, Clone)]
pub struct UpsertUser {
    pub email: String,
    pub name: String,
    pub session_token: String,
    pub access_token: String,
    pub country: String,
    pub product: String,
    pub spotify_id: String,
    pub href: String,
    pub uri: String,
}
