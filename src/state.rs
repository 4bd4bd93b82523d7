use crate::config::AppConfig;
use crate::spotify::{SpotifyApi, SpotifyClient};
use crate::users::{PgUserStore, UserStore};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub spotify: Arc<dyn SpotifyApi>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database.url())
            .await
            .context("connect to database")?;

        let users = Arc::new(PgUserStore::new(db.clone())) as Arc<dyn UserStore>;
        let spotify = Arc::new(SpotifyClient::new(&config.spotify)) as Arc<dyn SpotifyApi>;

        Ok(Self {
            db,
            config,
            users,
            spotify,
        })
    }

    /// Assemble state from pre-built parts; tests use this to wire in
    /// store/client doubles.
    pub fn from_parts(
        db: PgPool,
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        spotify: Arc<dyn SpotifyApi>,
    ) -> Self {
        Self {
            db,
            config,
            users,
            spotify,
        }
    }
}
