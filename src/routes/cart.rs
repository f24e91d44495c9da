use crate::error::ApiError;
use crate::model::{CartFilter, CartItem, CartItemWithProduct, CartOwner, EntityId, NewCartItem};
use crate::state::AppState;
use crate::store::Store;
use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: u32,
}

fn with_product(store: &Store, item: CartItem) -> CartItemWithProduct {
    let product = store.get_product(item.product_id);
    CartItemWithProduct { item, product }
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<CartFilter>,
) -> Json<Vec<CartItemWithProduct>> {
    let store = state.store();
    let items = store
        .cart_items(&filter)
        .into_iter()
        .map(|item| with_product(store, item))
        .collect();
    Json(items)
}

/// Adds a product to a cart, merging into an existing line for the same
/// product and owner. Requires an owner identity and a positive quantity.
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCartItem>,
) -> Result<Json<CartItemWithProduct>, ApiError> {
    if payload.quantity < 1 {
        return Err(ApiError::validation("quantity must be at least 1"));
    }
    let owner = CartOwner::from_parts(payload.user_id, payload.session_id)
        .ok_or_else(|| ApiError::validation("cart item requires a userId or sessionId"))?;

    let store = state.store();
    let item = store.add_to_cart(owner, payload.product_id, payload.quantity);
    Ok(Json(with_product(store, item)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> Result<Json<CartItemWithProduct>, ApiError> {
    if payload.quantity < 1 {
        return Err(ApiError::validation("quantity must be at least 1"));
    }
    let store = state.store();
    store
        .update_cart_item(id, payload.quantity)
        .map(|item| Json(with_product(store, item)))
        .ok_or_else(|| ApiError::not_found("cart item", id))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> Result<Json<Value>, ApiError> {
    if state.store().remove_from_cart(id) {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::not_found("cart item", id))
    }
}

/// Clears every line matching the owner criterion. Reports success even
/// when nothing matched.
pub async fn clear(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<CartFilter>,
) -> Json<Value> {
    state.store().clear_cart(&filter);
    Json(json!({ "success": true }))
}
