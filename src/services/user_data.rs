//! User data service — per-user JSON documents keyed by path.
//!
//! DESIGN
//! ======
//! Each signed-in user owns a namespace of documents addressed as
//! `users/{user_id}/{path}`. A save replaces the whole document at that path
//! (upsert); a read of an unknown path yields `None`.
//!
//! Paths are validated before any query runs. A segment is one or more of
//! `[A-Za-z0-9_-]`; `.` and `..` never pass, so a path cannot escape the
//! user's namespace.

use serde_json::Value;
use sqlx::PgPool;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum UserDataError {
    #[error("invalid user id")]
    InvalidUser,
    #[error("invalid data path: {0}")]
    InvalidPath(String),
    #[error("could not save data")]
    Save(#[source] sqlx::Error),
    #[error("could not retrieve data")]
    Retrieve(#[source] sqlx::Error),
}

const MAX_PATH_LEN: usize = 512;

fn valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Check a user id for use as a namespace key.
///
/// # Errors
///
/// Returns [`UserDataError::InvalidUser`] for empty ids or ids containing
/// characters outside `[A-Za-z0-9_-]`.
pub fn validate_user_id(user_id: &str) -> Result<(), UserDataError> {
    if user_id.len() > 128 || !valid_segment(user_id) {
        return Err(UserDataError::InvalidUser);
    }
    Ok(())
}

/// Normalize and check a document path. Leading and trailing slashes are
/// dropped; the returned string is what gets stored.
///
/// # Errors
///
/// Returns [`UserDataError::InvalidPath`] for empty paths, empty segments
/// (`a//b`), or segments with characters outside `[A-Za-z0-9_-]`.
pub fn validate_path(path: &str) -> Result<String, UserDataError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() || trimmed.len() > MAX_PATH_LEN {
        return Err(UserDataError::InvalidPath(path.to_string()));
    }
    if !trimmed.split('/').all(valid_segment) {
        return Err(UserDataError::InvalidPath(path.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Store `value` at `path`, replacing any previous document.
///
/// # Errors
///
/// Returns a validation error before touching the database, or
/// [`UserDataError::Save`] if the upsert fails.
pub async fn save_user_data(pool: &PgPool, user_id: &str, path: &str, value: &Value) -> Result<(), UserDataError> {
    validate_user_id(user_id)?;
    let path = validate_path(path)?;

    sqlx::query(
        "INSERT INTO user_data (user_id, path, data, updated_at) \
         VALUES ($1, $2, $3, now()) \
         ON CONFLICT (user_id, path) DO UPDATE SET data = EXCLUDED.data, updated_at = now()",
    )
    .bind(user_id)
    .bind(&path)
    .bind(value)
    .execute(pool)
    .await
    .map_err(|e| {
        error!(error = %e, %user_id, %path, "user data save failed");
        UserDataError::Save(e)
    })?;

    info!(%user_id, %path, "user data saved");
    Ok(())
}

/// Load the document at `path`, or `None` if nothing was saved there.
///
/// # Errors
///
/// Returns a validation error before touching the database, or
/// [`UserDataError::Retrieve`] if the query fails.
pub async fn get_user_data(pool: &PgPool, user_id: &str, path: &str) -> Result<Option<Value>, UserDataError> {
    validate_user_id(user_id)?;
    let path = validate_path(path)?;

    sqlx::query_scalar::<_, Value>("SELECT data FROM user_data WHERE user_id = $1 AND path = $2")
        .bind(user_id)
        .bind(&path)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, %path, "user data read failed");
            UserDataError::Retrieve(e)
        })
}

#[cfg(test)]
#[path = "user_data_test.rs"]
mod tests;
