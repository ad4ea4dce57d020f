//! Postgres pool for the per-user document store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only schema is `user_data (user_id, path, data JSONB)`, keyed by
//! `(user_id, path)` and written by `services::user_data` with upserts.
//! `init_pool` applies `src/db/migrations` before the router is built, so
//! handlers can assume the table exists.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Pool size when `DB_MAX_CONNECTIONS` is unset or unparseable. Document
/// reads and writes are single statements, so a small pool suffices.
const DEFAULT_POOL_SIZE: u32 = 5;

fn pool_size() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_POOL_SIZE)
}

/// Connect to `database_url` and bring the `user_data` schema up to date.
///
/// # Errors
///
/// Returns an error if Postgres is unreachable or a migration fails.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(pool_size())
        .connect(database_url)
        .await?;
    sqlx::migrate!("src/db/migrations").run(&pool).await?;
    Ok(pool)
}
