use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Row identifier. Assigned by a per-entity counter starting at 1; never
/// reused within a process lifetime.
pub type EntityId = u32;

/// Recognized order statuses. The store itself accepts any string (the
/// status field is a flat label, not a guarded state machine); these exist
/// for defaults and display.
pub mod order_status {
    pub const PENDING: &str = "pending";
    pub const PROCESSING: &str = "processing";
    pub const SHIPPED: &str = "shipped";
    pub const COMPLETED: &str = "completed";
    pub const CANCELLED: &str = "cancelled";

    pub const ALL: [&str; 5] = [PENDING, PROCESSING, SHIPPED, COMPLETED, CANCELLED];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

/// Registration payload. Carries no `isAdmin` field: new accounts are always
/// created non-admin regardless of what the caller sends.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for a category. Omitted fields keep their prior values;
/// `description` distinguishes "omitted" from "set to null" via the outer
/// option.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Decimal price carried as an exact-precision string, never floating
    /// point, to avoid rounding drift across the boundary.
    pub price: String,
    pub category_id: Option<EntityId>,
    pub image_url: String,
    pub stock: u32,
    /// Soft-delete marker. Inactive products are excluded from catalog
    /// listings but stay addressable by id so historical references resolve.
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    pub image_url: String,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub category_id: Option<Option<EntityId>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,
    pub user_id: Option<EntityId>,
    pub status: String,
    pub total: String,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[serde(default)]
    pub user_id: Option<EntityId>,
    #[serde(default)]
    pub status: Option<String>,
    pub total: String,
    pub shipping_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: EntityId,
    pub order_id: EntityId,
    pub product_id: EntityId,
    pub quantity: u32,
    /// Price snapshot copied at purchase time; later product price changes
    /// never affect historical orders.
    pub price: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub order_id: EntityId,
    pub product_id: EntityId,
    pub quantity: u32,
    pub price: String,
}

/// The identity a cart line is scoped to: an authenticated user or a guest
/// session token. Exactly one, by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOwner {
    User(EntityId),
    Session(String),
}

impl CartOwner {
    /// Builds an owner from the two nullable wire fields. A user identity
    /// wins when both are present; `None` when neither is.
    pub fn from_parts(user_id: Option<EntityId>, session_id: Option<String>) -> Option<Self> {
        match (user_id, session_id) {
            (Some(id), _) => Some(Self::User(id)),
            (None, Some(token)) => Some(Self::Session(token)),
            (None, None) => None,
        }
    }

    pub fn user_id(&self) -> Option<EntityId> {
        match self {
            Self::User(id) => Some(*id),
            Self::Session(_) => None,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::User(_) => None,
            Self::Session(token) => Some(token),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: EntityId,
    pub owner: CartOwner,
    pub product_id: EntityId,
    pub quantity: u32,
}

// The wire contract still exchanges userId/sessionId as nullable fields.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartItemWire<'a> {
    id: EntityId,
    user_id: Option<EntityId>,
    session_id: Option<&'a str>,
    product_id: EntityId,
    quantity: u32,
}

impl Serialize for CartItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CartItemWire {
            id: self.id,
            user_id: self.owner.user_id(),
            session_id: self.owner.session_id(),
            product_id: self.product_id,
            quantity: self.quantity,
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    #[serde(default)]
    pub user_id: Option<EntityId>,
    #[serde(default)]
    pub session_id: Option<String>,
    pub product_id: EntityId,
    pub quantity: u32,
}

/// Owner criterion for cart reads and clears. With both identities supplied
/// the filter matches items owned by either; with neither it matches nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartFilter {
    #[serde(default)]
    pub user_id: Option<EntityId>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl CartFilter {
    pub fn matches(&self, owner: &CartOwner) -> bool {
        match owner {
            CartOwner::User(id) => self.user_id == Some(*id),
            CartOwner::Session(token) => self.session_id.as_deref() == Some(token.as_str()),
        }
    }
}

/// Cart line enriched with its product for storefront rendering. Dangling
/// product references serialize as `product: null`.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemWithProduct {
    #[serde(flatten)]
    pub item: CartItem,
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemWithProduct {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product: Option<Product>,
}

/// Order enriched with its line items and the placing user, as consumed by
/// the order history and admin views.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithDetails {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemWithProduct>,
    pub user: Option<User>,
}
