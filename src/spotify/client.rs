use axum::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::config::SpotifyConfig;
use crate::error::AppError;
use crate::spotify::dto::{PlaylistPage, PlaylistTracksPage, Profile, TokenGrant};

/// Outbound Spotify operations the handlers depend on.
///
/// Behind a trait object so tests can substitute a recording double.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Trade an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, AppError>;
    /// Fetch the profile of the user owning `access_token`.
    async fn current_profile(&self, access_token: &str) -> Result<Profile, AppError>;
    /// List the playlists of a Spotify user.
    async fn playlists(
        &self,
        access_token: &str,
        spotify_user_id: &str,
    ) -> Result<PlaylistPage, AppError>;
    /// Fetch the tracks of a single playlist.
    async fn playlist_tracks(
        &self,
        access_token: &str,
        playlist_id: &str,
    ) -> Result<PlaylistTracksPage, AppError>;
}

/// Spotify Web API client.
#[derive(Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
    accounts_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl SpotifyClient {
    pub fn new(cfg: &SpotifyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            accounts_url: cfg.accounts_url.clone(),
            api_url: cfg.api_url.clone(),
            client_id: cfg.client_id.clone(),
            client_secret: cfg.client_secret.clone(),
            redirect_uri: cfg.redirect_uri.clone(),
        }
    }

    /// Bearer-authenticated GET against the Web API.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        let url = format!("{}/{}", self.api_url, path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, "failed to send request to Spotify");
                AppError::Upstream("failed to send request to Spotify".into())
            })?;
        self.check_response_json(response).await
    }

    /// Check status and decode the JSON body, logging the forbidden case
    /// separately from other upstream failures.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::FORBIDDEN {
                warn!(%status, "Spotify denied the request");
            } else {
                error!(%status, body = %body, "unexpected response status from Spotify");
            }
            return Err(AppError::Upstream(format!(
                "unexpected response status: {}",
                status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            error!(error = %e, "failed to decode response from Spotify");
            AppError::Upstream("failed to decode response from Spotify".into())
        })
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, AppError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            error!("spotify client id or secret is not configured");
            return Err(AppError::Internal(anyhow::anyhow!(
                "spotify client credentials are not set"
            )));
        }

        let url = format!("{}/api/token", self.accounts_url);
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "failed to send code exchange to Spotify");
                AppError::Upstream("failed to send request to Spotify".into())
            })?;

        self.check_response_json(response).await
    }

    async fn current_profile(&self, access_token: &str) -> Result<Profile, AppError> {
        self.get_json("me", access_token).await
    }

    async fn playlists(
        &self,
        access_token: &str,
        spotify_user_id: &str,
    ) -> Result<PlaylistPage, AppError> {
        self.get_json(&format!("users/{}/playlists", spotify_user_id), access_token)
            .await
    }

    async fn playlist_tracks(
        &self,
        access_token: &str,
        playlist_id: &str,
    ) -> Result<PlaylistTracksPage, AppError> {
        self.get_json(&format!("playlists/{}/tracks", playlist_id), access_token)
            .await
    }
}
