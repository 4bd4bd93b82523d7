use axum::async_trait;
use sqlx::PgPool;

use crate::users::repo_types::{UpsertUser, User};

/// Exactly the lookup/upsert operations the handlers need, behind a trait
/// object so tests can swap in an in-memory store.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_session_token(&self, token: &str) -> anyhow::Result<Option<User>>;
    async fn upsert(&self, rec: UpsertUser) -> anyhow::Result<User>;
}

/// PostgreSQL-backed store.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, session_token, access_token,
                   country, product, spotify_id, href, uri, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_session_token(&self, token: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, session_token, access_token,
                   country, product, spotify_id, href, uri, created_at
            FROM users
            WHERE session_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Atomic insert-or-update keyed by email.
    ///
    /// The update arm omits `session_token` and `created_at`, so the first
    /// exchange seeds a session token and later exchanges leave it (and the
    /// row id) untouched.
    async fn upsert(&self, rec: UpsertUser) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, session_token, access_token,
                               country, product, spotify_id, href, uri)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (email) DO UPDATE SET
                name = EXCLUDED.name,
                access_token = EXCLUDED.access_token,
                country = EXCLUDED.country,
                product = EXCLUDED.product,
                spotify_id = EXCLUDED.spotify_id,
                href = EXCLUDED.href,
                uri = EXCLUDED.uri
            RETURNING id, name, email, session_token, access_token,
                      country, product, spotify_id, href, uri, created_at
            "#,
        )
        .bind(&rec.email)
        .bind(&rec.name)
        .bind(&rec.session_token)
        .bind(&rec.access_token)
        .bind(&rec.country)
        .bind(&rec.product)
        .bind(&rec.spotify_id)
        .bind(&rec.href)
        .bind(&rec.uri)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}
