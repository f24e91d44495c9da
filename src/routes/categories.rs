use crate::error::ApiError;
use crate::model::{Category, CategoryPatch, EntityId, NewCategory};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Category>> {
    Json(state.store().all_categories())
}

pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> Result<Json<Category>, ApiError> {
    state
        .store()
        .get_category(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("category", id))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCategory>,
) -> (StatusCode, Json<Category>) {
    let category = state.store().create_category(payload);
    info!(category_id = category.id, name = %category.name, "category created");
    (StatusCode::CREATED, Json(category))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
    Json(patch): Json<CategoryPatch>,
) -> Result<Json<Category>, ApiError> {
    state
        .store()
        .update_category(id, patch)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("category", id))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> Result<Json<Value>, ApiError> {
    if state.store().delete_category(id) {
        info!(category_id = id, "category deleted");
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::not_found("category", id))
    }
}
