//! Backend that signs users in via Spotify's authorization-code flow and
//! proxies read-only playlist queries on their behalf.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod playlists;
pub mod spotify;
pub mod state;
pub mod users;
