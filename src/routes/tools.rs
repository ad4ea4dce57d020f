//! Tool catalog and offline tool routes.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::tools::{self, ConvertError, ToolCategory, ToolInfo, Unit, UnitCategory};

#[derive(Debug, Default, Deserialize)]
pub struct ToolsQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConvertBody {
    /// When present, both units must belong to this category.
    pub category: Option<UnitCategory>,
    pub from: String,
    pub to: String,
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct RandomBody {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ValueResponse<T> {
    pub value: T,
}

/// `GET /api/tools` — list the catalog, optionally filtered by `?category=`.
pub async fn list_tools(Query(query): Query<ToolsQuery>) -> Result<Json<Vec<ToolInfo>>, StatusCode> {
    let tools = match query.category.as_deref() {
        None => tools::all_tools().to_vec(),
        Some(name) => {
            let category = ToolCategory::from_name(name).ok_or(StatusCode::BAD_REQUEST)?;
            tools::tools_in(category).into_iter().cloned().collect()
        }
    };
    Ok(Json(tools))
}

/// `GET /api/tools/:id` — one catalog entry.
pub async fn get_tool(Path(id): Path<String>) -> Result<Json<ToolInfo>, StatusCode> {
    tools::find_tool(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// `POST /api/tools/convert` — convert a value between units.
pub async fn convert_units(Json(body): Json<ConvertBody>) -> Result<Json<ValueResponse<f64>>, (StatusCode, String)> {
    match convert_body(&body) {
        Ok(value) => Ok(Json(ValueResponse { value })),
        Err(e) => {
            warn!(error = %e, from = %body.from, to = %body.to, "unit conversion rejected");
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
    }
}

fn convert_body(body: &ConvertBody) -> Result<f64, ConvertError> {
    let from = Unit::from_name(&body.from)?;
    let to = Unit::from_name(&body.to)?;
    match body.category {
        Some(category) => tools::convert_in(category, body.value, from, to),
        None => tools::convert(body.value, from, to),
    }
}

/// `POST /api/tools/random` — uniform integer in `[min, max]`.
pub async fn random_number(Json(body): Json<RandomBody>) -> Result<Json<ValueResponse<i64>>, (StatusCode, String)> {
    tools::random_in_range(body.min, body.max)
        .map(|value| Json(ValueResponse { value }))
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tests;
