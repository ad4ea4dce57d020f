//! AI flow routes.
//!
//! A request body is the flow's JSON input. An optional `apiKey` member
//! carries the caller's own Gemini key; it is removed before the input is
//! parsed and the flow runs against a client built for that key. Without
//! one, the server-wide client is used.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::Value;
use tracing::warn;

use crate::flows::{FlowError, FlowKind};
use crate::llm::{LlmChat, LlmClient};
use crate::state::AppState;

const API_KEY_FIELD: &str = "apiKey";

pub(crate) fn flow_error_to_status(err: &FlowError) -> StatusCode {
    match err {
        FlowError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        FlowError::UnknownFlow(_) => StatusCode::NOT_FOUND,
        FlowError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        FlowError::Llm(_) | FlowError::MalformedOutput(_) => StatusCode::BAD_GATEWAY,
    }
}

fn flow_error_response(err: FlowError) -> (StatusCode, String) {
    let status = flow_error_to_status(&err);
    let message = match &err {
        // Provider errors can echo request details; keep them in the log.
        FlowError::Llm(_) => "AI request failed".to_string(),
        _ => err.to_string(),
    };
    if status.is_server_error() {
        warn!(error = %err, %status, "flow request failed");
    }
    (status, message)
}

/// Remove and return a non-blank `apiKey` from an object body.
pub(crate) fn take_api_key(body: &mut Value) -> Option<String> {
    let key = body.as_object_mut()?.remove(API_KEY_FIELD)?;
    key.as_str().map(str::trim).filter(|k| !k.is_empty()).map(str::to_string)
}

/// `POST /api/flows/:flow` — run one AI flow on the JSON body.
pub async fn run_flow(
    State(state): State<AppState>,
    Path(flow): Path<String>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let kind = FlowKind::from_name(&flow).map_err(flow_error_response)?;

    let user_client;
    let llm: &dyn LlmChat = match take_api_key(&mut body) {
        Some(key) => {
            user_client = LlmClient::for_user_key(&key).map_err(|e| flow_error_response(FlowError::Llm(e)))?;
            &user_client
        }
        None => state
            .llm
            .as_deref()
            .ok_or_else(|| flow_error_response(FlowError::NotConfigured))?,
    };

    let output = kind.run_value(llm, body).await.map_err(flow_error_response)?;
    Ok(Json(output))
}

#[cfg(test)]
#[path = "flows_test.rs"]
mod tests;
