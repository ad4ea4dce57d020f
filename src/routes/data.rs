//! Per-user document routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::Value;

use crate::services::user_data::{self, UserDataError};
use crate::state::AppState;

pub(crate) fn user_data_error_to_status(err: &UserDataError) -> StatusCode {
    match err {
        UserDataError::InvalidUser | UserDataError::InvalidPath(_) => StatusCode::BAD_REQUEST,
        UserDataError::Save(_) | UserDataError::Retrieve(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn to_response(err: UserDataError) -> (StatusCode, String) {
    (user_data_error_to_status(&err), err.to_string())
}

/// `GET /api/users/:user_id/data/*path` — stored document, or `null`.
pub async fn get_data(
    State(state): State<AppState>,
    Path((user_id, path)): Path<(String, String)>,
) -> Result<Json<Option<Value>>, (StatusCode, String)> {
    let value = user_data::get_user_data(&state.pool, &user_id, &path)
        .await
        .map_err(to_response)?;
    Ok(Json(value))
}

/// `PUT /api/users/:user_id/data/*path` — replace the document at `path`.
pub async fn put_data(
    State(state): State<AppState>,
    Path((user_id, path)): Path<(String, String)>,
    Json(value): Json<Value>,
) -> Result<StatusCode, (StatusCode, String)> {
    user_data::save_user_data(&state.pool, &user_id, &path, &value)
        .await
        .map_err(to_response)?;
    Ok(StatusCode::NO_CONTENT)
}
