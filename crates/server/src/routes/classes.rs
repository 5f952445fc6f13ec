use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use service::registry::{ClassInput, ClassRecord, ClassRegistry};

use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub teacher: Option<String>,
    pub room: Option<String>,
}

/// List all class records
pub async fn list_classes(State(registry): State<Arc<ClassRegistry>>) -> Json<Vec<ClassRecord>> {
    Json(registry.list().await)
}

/// Get one class record by id
pub async fn get_class(
    State(registry): State<Arc<ClassRegistry>>,
    Path(id): Path<i64>,
) -> Result<Json<ClassRecord>, ApiError> {
    let rec = registry.get(id).await?;
    Ok(Json(rec))
}

/// Create a class record
pub async fn create_class(
    State(registry): State<Arc<ClassRegistry>>,
    payload: Result<Json<ClassInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ClassRecord>), ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::malformed_body())?;
    let rec = registry.create(input).await?;
    Ok((StatusCode::CREATED, Json(rec)))
}

/// Update a class record: supplied fields replace, absent fields remain
pub async fn update_class(
    State(registry): State<Arc<ClassRegistry>>,
    Path(id): Path<i64>,
    payload: Result<Json<ClassInput>, JsonRejection>,
) -> Result<Json<ClassRecord>, ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::malformed_body())?;
    let rec = registry.update(id, input).await?;
    Ok(Json(rec))
}

/// Delete a class record
pub async fn delete_class(
    State(registry): State<Arc<ClassRegistry>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    registry.delete(id).await?;
    Ok(Json(serde_json::json!({ "message": "Class deleted successfully" })))
}

/// Search by teacher and/or room, case-insensitive substring filters
pub async fn search_classes(
    State(registry): State<Arc<ClassRegistry>>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<ClassRecord>> {
    let hits = registry
        .search(query.teacher.as_deref(), query.room.as_deref())
        .await;
    Json(hits)
}
