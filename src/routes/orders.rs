use crate::error::ApiError;
use crate::model::{
    CartFilter, EntityId, NewOrder, NewOrderItem, Order, OrderItemWithProduct, OrderWithDetails,
};
use crate::state::AppState;
use crate::store::Store;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Checkout payload: the order header, its lines (price snapshots taken by
/// the client at checkout time), and the cart identity to clear afterwards.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub user_id: Option<EntityId>,
    #[serde(default)]
    pub status: Option<String>,
    pub total: String,
    pub shipping_address: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: EntityId,
    pub quantity: u32,
    pub price: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub user_id: Option<EntityId>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

fn order_details(store: &Store, order: Order) -> OrderWithDetails {
    let items = store
        .order_items(order.id)
        .into_iter()
        .map(|item| OrderItemWithProduct {
            product: store.get_product(item.product_id),
            item,
        })
        .collect();
    let user = order.user_id.and_then(|id| store.get_user(id));
    OrderWithDetails { order, items, user }
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OrderQuery>,
) -> Json<Vec<OrderWithDetails>> {
    let store = state.store();
    let orders = match query.user_id {
        Some(user_id) => store.orders_by_user(user_id),
        None => store.all_orders(),
    };
    Json(
        orders
            .into_iter()
            .map(|order| order_details(store, order))
            .collect(),
    )
}

pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> Result<Json<OrderWithDetails>, ApiError> {
    let store = state.store();
    store
        .get_order(id)
        .map(|order| Json(order_details(store, order)))
        .ok_or_else(|| ApiError::not_found("order", id))
}

/// Places an order: creates the order header, then its line items, then
/// clears the originating cart. Each step is an independent store call;
/// there is no cross-call transaction.
pub async fn place(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PlaceOrderRequest>,
) -> (StatusCode, Json<OrderWithDetails>) {
    let store = state.store();
    let order = store.create_order(NewOrder {
        user_id: payload.user_id,
        status: payload.status,
        total: payload.total,
        shipping_address: payload.shipping_address,
    });

    for line in payload.items {
        store.create_order_item(NewOrderItem {
            order_id: order.id,
            product_id: line.product_id,
            quantity: line.quantity,
            price: line.price,
        });
    }

    store.clear_cart(&CartFilter {
        user_id: payload.user_id,
        session_id: payload.session_id,
    });

    info!(order_id = order.id, total = %order.total, "order placed");
    (
        StatusCode::CREATED,
        Json(order_details(store, order)),
    )
}

/// Replaces the status label. Any string is accepted; status transitions
/// are not guarded.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<OrderWithDetails>, ApiError> {
    let store = state.store();
    store
        .update_order_status(id, payload.status)
        .map(|order| {
            info!(order_id = id, status = %order.status, "order status updated");
            Json(order_details(store, order))
        })
        .ok_or_else(|| ApiError::not_found("order", id))
}
