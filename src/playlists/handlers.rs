use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, instrument, warn};

use crate::{
    auth::{handlers::is_valid_email, CurrentUser},
    error::AppError,
    spotify::dto::{PlaylistPage, PlaylistTracksPage},
    state::AppState,
};

pub fn playlist_routes() -> Router<AppState> {
    Router::new()
        .route("/user/playlist", get(list_playlists))
        .route("/user/playlist/:id", get(get_playlist_tracks))
}

#[derive(Debug, Deserialize)]
pub struct PlaylistQuery {
    email: Option<String>,
}

/// GET /user/playlist?email=… — proxy the account's playlist collection.
#[instrument(skip(state))]
pub async fn list_playlists(
    State(state): State<AppState>,
    Query(q): Query<PlaylistQuery>,
) -> Result<Json<PlaylistPage>, AppError> {
    let email = q
        .email
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_lowercase();
    if email.is_empty() {
        warn!("email parameter is missing");
        return Err(AppError::BadRequest("email parameter is required".into()));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "email parameter is invalid");
        return Err(AppError::BadRequest("email parameter is invalid".into()));
    }

    let user = state
        .users
        .find_by_email(&email)
        .await
        .map_err(|e| {
            error!(error = %e, "user lookup failed");
            AppError::UserNotFound
        })?
        .ok_or(AppError::UserNotFound)?;

    let playlists = state
        .spotify
        .playlists(&user.access_token, &user.spotify_id)
        .await?;
    Ok(Json(playlists))
}

/// GET /user/playlist/:id — proxy one playlist's tracks for the
/// bearer-authenticated account.
#[instrument(skip(state, user))]
pub async fn get_playlist_tracks(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<PlaylistTracksPage>, AppError> {
    let tracks = state.spotify.playlist_tracks(&user.access_token, &id).await?;
    Ok(Json(tracks))
}
