//! The REST surface consumed by the storefront and admin clients. Handlers
//! translate HTTP into store calls, validate at the boundary, and enrich
//! read models; all state invariants live in the store itself.

mod cart;
mod categories;
mod orders;
mod products;
mod users;

use crate::state::AppState;
use axum::Router;
use axum::routing::{get, put};
use std::sync::Arc;

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/categories/{id}",
            get(categories::fetch)
                .put(categories::update)
                .delete(categories::remove),
        )
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/{id}",
            get(products::fetch)
                .put(products::update)
                .delete(products::remove),
        )
        .route(
            "/api/cart",
            get(cart::list).post(cart::add).delete(cart::clear),
        )
        .route("/api/cart/{id}", put(cart::update).delete(cart::remove))
        .route("/api/orders", get(orders::list).post(orders::place))
        .route("/api/orders/{id}", get(orders::fetch))
        .route("/api/orders/{id}/status", put(orders::update_status))
        .route("/api/users", get(users::list).post(users::register))
}
