//! The fixed demo dataset the storefront is reseeded with on every
//! construction. Ids are deterministic: categories and products take 1-4,
//! the admin user takes 1.

use super::Store;
use crate::model::{Category, Product, User};

pub(super) fn populate(store: &Store) {
    let mut categories = store.categories.write();
    let electronics = categories
        .insert_with(|id| Category {
            id,
            name: "Electronics".to_string(),
            description: Some("Latest tech & gadgets".to_string()),
        })
        .id;
    let fashion = categories
        .insert_with(|id| Category {
            id,
            name: "Fashion".to_string(),
            description: Some("Trendy apparel".to_string()),
        })
        .id;
    categories.insert_with(|id| Category {
        id,
        name: "Home".to_string(),
        description: Some("Decor & furniture".to_string()),
    });
    categories.insert_with(|id| Category {
        id,
        name: "Sports".to_string(),
        description: Some("Fitness & outdoor".to_string()),
    });
    drop(categories);

    let mut products = store.products.write();
    products.insert_with(|id| Product {
        id,
        name: "Wireless Headphones".to_string(),
        description: "Premium noise-canceling wireless headphones with superior sound quality"
            .to_string(),
        price: "129.99".to_string(),
        category_id: Some(electronics),
        image_url: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300".to_string(),
        stock: 24,
        is_active: true,
    });
    products.insert_with(|id| Product {
        id,
        name: "Smart Phone Pro".to_string(),
        description: "Latest generation smartphone with advanced features and 5G connectivity"
            .to_string(),
        price: "699.99".to_string(),
        category_id: Some(electronics),
        image_url: "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300".to_string(),
        stock: 12,
        is_active: true,
    });
    products.insert_with(|id| Product {
        id,
        name: "Designer Watch".to_string(),
        description: "Luxury timepiece with premium leather strap and Swiss movement".to_string(),
        price: "299.99".to_string(),
        category_id: Some(fashion),
        image_url: "https://images.unsplash.com/photo-1524592094714-0f0654e20314?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300".to_string(),
        stock: 8,
        is_active: true,
    });
    products.insert_with(|id| Product {
        id,
        name: "Professional Laptop".to_string(),
        description: "High-performance laptop for professionals with 16GB RAM and 512GB SSD"
            .to_string(),
        price: "1299.99".to_string(),
        category_id: Some(electronics),
        image_url: "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=300".to_string(),
        stock: 6,
        is_active: true,
    });
    drop(products);

    let mut users = store.users.write();
    users.insert_with(|id| User {
        id,
        username: "admin".to_string(),
        password: "admin123".to_string(),
        email: "admin@shopflow.com".to_string(),
        first_name: "Admin".to_string(),
        last_name: "User".to_string(),
        is_admin: true,
    });
    users.insert_with(|id| User {
        id,
        username: "john_doe".to_string(),
        password: "password123".to_string(),
        email: "john@example.com".to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        is_admin: false,
    });
}
