use serde::{Deserialize, Serialize};

/// Token metadata returned by the authorization-code exchange.
///
/// Only the access token outlives this value; everything else is dropped
/// once the profile fetch has run.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: String,
}

/// Current-user profile as returned by `GET /me`.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    pub id: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub uri: String,
}

// The shapes below mirror Spotify's playlist responses one-to-one; handlers
// decode and return them without reshaping.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<i64>,
    pub width: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Followers {
    pub href: Option<String>,
    #[serde(default)]
    pub total: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistOwner {
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub followers: Followers,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub display_name: String,
}

/// Link to a playlist's tracks collection (href + count only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TracksLink {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub total: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistSummary {
    #[serde(default)]
    pub collaborative: bool,
    pub description: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub images: Vec<Image>,
    pub name: String,
    #[serde(default)]
    pub owner: PlaylistOwner,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub snapshot_id: String,
    #[serde(default)]
    pub tracks: TracksLink,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub uri: String,
}

/// One page of a user's playlists (`GET /users/{id}/playlists`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistPage {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub limit: i64,
    pub next: Option<String>,
    #[serde(default)]
    pub offset: i64,
    pub previous: Option<String>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub items: Vec<PlaylistSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Restrictions {
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub album_type: String,
    #[serde(default)]
    pub total_tracks: i64,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub images: Vec<Image>,
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub release_date_precision: String,
    pub restrictions: Option<Restrictions>,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalIds {
    #[serde(default)]
    pub isrc: String,
    #[serde(default)]
    pub ean: String,
    #[serde(default)]
    pub upc: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub album: Album,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub disc_number: i64,
    #[serde(default)]
    pub duration_ms: i64,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub external_ids: ExternalIds,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub is_playable: bool,
    pub restrictions: Option<Restrictions>,
    pub name: String,
    #[serde(default)]
    pub popularity: i64,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub track_number: i64,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub is_local: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddedBy {
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub followers: Followers,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    #[serde(default)]
    pub added_at: String,
    #[serde(default)]
    pub added_by: AddedBy,
    #[serde(default)]
    pub is_local: bool,
    #[serde(default)]
    pub track: Track,
}

/// One page of a playlist's tracks (`GET /playlists/{id}/tracks`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub limit: i64,
    pub next: Option<String>,
    #[serde(default)]
    pub offset: i64,
    pub previous: Option<String>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub items: Vec<PlaylistTrackItem>,
}
