use crate::error::ApiError;
use crate::model::{EntityId, NewProduct, Product, ProductPatch};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Restrict the listing to one category.
    pub category: Option<EntityId>,
    /// Case-insensitive substring search over name and description.
    pub search: Option<String>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<Product>> {
    let store = state.store();
    let products = match (query.category, query.search) {
        (Some(category_id), Some(needle)) => store
            .search_products(&needle)
            .into_iter()
            .filter(|product| product.category_id == Some(category_id))
            .collect(),
        (Some(category_id), None) => store.products_by_category(category_id),
        (None, Some(needle)) => store.search_products(&needle),
        (None, None) => store.all_products(),
    };
    Json(products)
}

pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> Result<Json<Product>, ApiError> {
    state
        .store()
        .get_product(id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("product", id))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewProduct>,
) -> (StatusCode, Json<Product>) {
    let product = state.store().create_product(payload);
    info!(product_id = product.id, name = %product.name, "product created");
    (StatusCode::CREATED, Json(product))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    state
        .store()
        .update_product(id, patch)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("product", id))
}

/// Soft delete. The product drops out of listings but stays addressable by
/// id so carts and order history keep rendering.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> Result<Json<Value>, ApiError> {
    if state.store().delete_product(id) {
        info!(product_id = id, "product soft-deleted");
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::not_found("product", id))
    }
}
