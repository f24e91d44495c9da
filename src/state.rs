use crate::config::ServerConfig;
use crate::store::Store;
use std::sync::Arc;
use tracing::info;

/// Shared application state: the configuration and the storage engine it
/// constructed. Built once at startup and handed to the router as an `Arc`.
pub struct AppState {
    config: Arc<ServerConfig>,
    store: Store,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let store = if config.seed_demo_data {
            let store = Store::with_demo_data();
            let stats = store.stats();
            info!(
                categories = stats.categories,
                products = stats.products,
                users = stats.users,
                "demo dataset seeded"
            );
            store
        } else {
            Store::new()
        };
        Self { config, store }
    }

    pub fn config(&self) -> Arc<ServerConfig> {
        self.config.clone()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}
