//! The in-memory storage engine backing the storefront.
//!
//! One insertion-ordered table per entity type, each behind its own
//! `RwLock`. Operations are atomic per call, not across calls; absence is
//! signaled by `Option`/`bool` returns, never by errors. State is volatile
//! and owned exclusively by this component.

mod seed;
mod table;

pub use table::Table;

use crate::model::{
    CartFilter, CartItem, CartOwner, Category, CategoryPatch, EntityId, NewCategory, NewOrder,
    NewOrderItem, NewProduct, NewUser, Order, OrderItem, Product, ProductPatch, User, order_status,
};
use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Single source of truth for all entity state.
///
/// Constructed once at process start and injected into the request layer;
/// tests build fresh isolated instances with [`Store::new`].
pub struct Store {
    users: RwLock<Table<User>>,
    categories: RwLock<Table<Category>>,
    products: RwLock<Table<Product>>,
    orders: RwLock<Table<Order>>,
    order_items: RwLock<Table<OrderItem>>,
    cart_items: RwLock<Table<CartItem>>,
    /// Operation counter for the statistics endpoint.
    ops: AtomicU64,
}

impl Store {
    /// An empty store. Nothing is seeded.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Table::new()),
            categories: RwLock::new(Table::new()),
            products: RwLock::new(Table::new()),
            orders: RwLock::new(Table::new()),
            order_items: RwLock::new(Table::new()),
            cart_items: RwLock::new(Table::new()),
            ops: AtomicU64::new(0),
        }
    }

    /// A store populated with the fixed demo dataset (4 categories,
    /// 4 products, an admin and a regular user).
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        seed::populate(&store);
        store
    }

    fn track(&self) {
        self.ops.fetch_add(1, Ordering::Relaxed);
    }

    // ---- Users ----

    pub fn get_user(&self, id: EntityId) -> Option<User> {
        self.track();
        self.users.read().get(id).cloned()
    }

    /// First user with an exactly matching username. Case-sensitive scan.
    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.track();
        self.users
            .read()
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    /// First user with an exactly matching email. Case-sensitive scan.
    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.track();
        self.users
            .read()
            .values()
            .find(|user| user.email == email)
            .cloned()
    }

    /// Creates a user. `isAdmin` is forced to false no matter what the
    /// caller sent; admin accounts exist only via seeding.
    pub fn create_user(&self, new: NewUser) -> User {
        self.track();
        let mut users = self.users.write();
        let user = users.insert_with(|id| User {
            id,
            username: new.username,
            password: new.password,
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            is_admin: false,
        });
        debug!(user_id = user.id, username = %user.username, "user created");
        user.clone()
    }

    pub fn all_users(&self) -> Vec<User> {
        self.track();
        self.users.read().values().cloned().collect()
    }

    // ---- Categories ----

    pub fn all_categories(&self) -> Vec<Category> {
        self.track();
        self.categories.read().values().cloned().collect()
    }

    pub fn get_category(&self, id: EntityId) -> Option<Category> {
        self.track();
        self.categories.read().get(id).cloned()
    }

    pub fn create_category(&self, new: NewCategory) -> Category {
        self.track();
        let mut categories = self.categories.write();
        let category = categories.insert_with(|id| Category {
            id,
            name: new.name,
            description: new.description,
        });
        debug!(category_id = category.id, name = %category.name, "category created");
        category.clone()
    }

    /// Merges the provided fields over the existing record. Unspecified
    /// fields retain their prior values; `None` if the id is unknown.
    pub fn update_category(&self, id: EntityId, patch: CategoryPatch) -> Option<Category> {
        self.track();
        let mut categories = self.categories.write();
        let category = categories.get_mut(id)?;
        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(description) = patch.description {
            category.description = description;
        }
        Some(category.clone())
    }

    /// Hard removal. Products referencing the category keep their now
    /// dangling `categoryId`; there is no cascade.
    pub fn delete_category(&self, id: EntityId) -> bool {
        self.track();
        let removed = self.categories.write().remove(id).is_some();
        if removed {
            debug!(category_id = id, "category deleted");
        }
        removed
    }

    // ---- Products ----

    /// Active products only. Soft-deleted records never appear in listings.
    pub fn all_products(&self) -> Vec<Product> {
        self.track();
        self.products
            .read()
            .values()
            .filter(|product| product.is_active)
            .cloned()
            .collect()
    }

    /// Any product regardless of `isActive`, so existing orders and cart
    /// lines referencing a soft-deleted product still resolve.
    pub fn get_product(&self, id: EntityId) -> Option<Product> {
        self.track();
        self.products.read().get(id).cloned()
    }

    pub fn products_by_category(&self, category_id: EntityId) -> Vec<Product> {
        self.track();
        self.products
            .read()
            .values()
            .filter(|product| product.is_active && product.category_id == Some(category_id))
            .cloned()
            .collect()
    }

    /// Active products whose name or description contains the query as a
    /// case-insensitive substring. The empty query matches everything active.
    pub fn search_products(&self, query: &str) -> Vec<Product> {
        self.track();
        let needle = query.to_lowercase();
        self.products
            .read()
            .values()
            .filter(|product| {
                product.is_active
                    && (product.name.to_lowercase().contains(&needle)
                        || product.description.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    pub fn create_product(&self, new: NewProduct) -> Product {
        self.track();
        let mut products = self.products.write();
        let product = products.insert_with(|id| Product {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            category_id: new.category_id,
            image_url: new.image_url,
            stock: new.stock.unwrap_or(0),
            is_active: new.is_active.unwrap_or(true),
        });
        debug!(product_id = product.id, name = %product.name, "product created");
        product.clone()
    }

    pub fn update_product(&self, id: EntityId, patch: ProductPatch) -> Option<Product> {
        self.track();
        let mut products = self.products.write();
        let product = products.get_mut(id)?;
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(category_id) = patch.category_id {
            product.category_id = category_id;
        }
        if let Some(image_url) = patch.image_url {
            product.image_url = image_url;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(is_active) = patch.is_active {
            product.is_active = is_active;
        }
        Some(product.clone())
    }

    /// Soft delete: flips `isActive` off and keeps the record addressable.
    /// `false` if the id is unknown.
    pub fn delete_product(&self, id: EntityId) -> bool {
        self.track();
        let mut products = self.products.write();
        match products.get_mut(id) {
            Some(product) => {
                product.is_active = false;
                debug!(product_id = id, "product soft-deleted");
                true
            }
            None => false,
        }
    }

    // ---- Orders ----

    pub fn all_orders(&self) -> Vec<Order> {
        self.track();
        self.orders.read().values().cloned().collect()
    }

    pub fn get_order(&self, id: EntityId) -> Option<Order> {
        self.track();
        self.orders.read().get(id).cloned()
    }

    pub fn orders_by_user(&self, user_id: EntityId) -> Vec<Order> {
        self.track();
        self.orders
            .read()
            .values()
            .filter(|order| order.user_id == Some(user_id))
            .cloned()
            .collect()
    }

    /// Creates an order. Status defaults to "pending", `createdAt` is
    /// stamped here; total and shipping address are taken verbatim.
    pub fn create_order(&self, new: NewOrder) -> Order {
        self.track();
        let mut orders = self.orders.write();
        let order = orders.insert_with(|id| Order {
            id,
            user_id: new.user_id,
            status: new
                .status
                .unwrap_or_else(|| order_status::PENDING.to_string()),
            total: new.total,
            shipping_address: new.shipping_address,
            created_at: Utc::now(),
        });
        debug!(order_id = order.id, total = %order.total, "order created");
        order.clone()
    }

    /// Replaces the status label only. Any string is accepted; the caller
    /// is responsible for membership in the recognized set. Total and
    /// creation time are immutable.
    pub fn update_order_status(&self, id: EntityId, status: impl Into<String>) -> Option<Order> {
        self.track();
        let mut orders = self.orders.write();
        let order = orders.get_mut(id)?;
        order.status = status.into();
        debug!(order_id = id, status = %order.status, "order status updated");
        Some(order.clone())
    }

    // ---- Order items ----

    pub fn order_items(&self, order_id: EntityId) -> Vec<OrderItem> {
        self.track();
        self.order_items
            .read()
            .values()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }

    /// Stores an order line verbatim. The price is the caller-supplied
    /// snapshot, never recomputed from the current product price.
    pub fn create_order_item(&self, new: NewOrderItem) -> OrderItem {
        self.track();
        let mut order_items = self.order_items.write();
        order_items
            .insert_with(|id| OrderItem {
                id,
                order_id: new.order_id,
                product_id: new.product_id,
                quantity: new.quantity,
                price: new.price,
            })
            .clone()
    }

    // ---- Cart ----

    pub fn cart_items(&self, filter: &CartFilter) -> Vec<CartItem> {
        self.track();
        self.cart_items
            .read()
            .values()
            .filter(|item| filter.matches(&item.owner))
            .cloned()
            .collect()
    }

    /// Upserts a cart line. A line with the same product and owner has its
    /// quantity incremented in place (id unchanged); otherwise a new line
    /// is created.
    pub fn add_to_cart(&self, owner: CartOwner, product_id: EntityId, quantity: u32) -> CartItem {
        self.track();
        let mut cart_items = self.cart_items.write();
        if let Some(item) = cart_items
            .values_mut()
            .find(|item| item.product_id == product_id && item.owner == owner)
        {
            item.quantity += quantity;
            debug!(
                cart_item_id = item.id,
                quantity = item.quantity,
                "cart line merged"
            );
            return item.clone();
        }
        cart_items
            .insert_with(|id| CartItem {
                id,
                owner,
                product_id,
                quantity,
            })
            .clone()
    }

    /// Replaces the quantity unconditionally; no minimum is enforced at
    /// this layer. `None` if the id is unknown.
    pub fn update_cart_item(&self, id: EntityId, quantity: u32) -> Option<CartItem> {
        self.track();
        let mut cart_items = self.cart_items.write();
        let item = cart_items.get_mut(id)?;
        item.quantity = quantity;
        Some(item.clone())
    }

    pub fn remove_from_cart(&self, id: EntityId) -> bool {
        self.track();
        self.cart_items.write().remove(id).is_some()
    }

    /// Deletes every line matching the owner criterion. Always reports
    /// success, even when nothing matched.
    pub fn clear_cart(&self, filter: &CartFilter) -> bool {
        self.track();
        let mut cart_items = self.cart_items.write();
        let matching: Vec<EntityId> = cart_items
            .iter()
            .filter(|(_, item)| filter.matches(&item.owner))
            .map(|(id, _)| id)
            .collect();
        let cleared = matching.len();
        for id in matching {
            cart_items.remove(id);
        }
        if cleared > 0 {
            debug!(cleared, "cart cleared");
        }
        true
    }

    /// Row counts and the operation counter, surfaced by the health
    /// endpoints.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            operations: self.ops.load(Ordering::Relaxed),
            users: self.users.read().len(),
            categories: self.categories.read().len(),
            products: self.products.read().len(),
            orders: self.orders.read().len(),
            order_items: self.order_items.read().len(),
            cart_items: self.cart_items.read().len(),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of store size for monitoring.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub operations: u64,
    pub users: usize,
    pub categories: usize,
    pub products: usize,
    pub orders: usize,
    pub order_items: usize,
    pub cart_items: usize,
}
