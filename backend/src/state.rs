use std::sync::Arc;

use tracing::info;

use crate::{
    config::{Config, StoreKind},
    store::{MemoryStore, RedisStore, StoreError, TodoStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: impl TodoStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        match config.store {
            StoreKind::Redis => {
                info!("Connecting to Redis at {}", config.redis_url);
                Ok(Self::new(RedisStore::connect(&config.redis_url).await?))
            }
            StoreKind::Memory => {
                info!("Using in-memory store, todos will not survive a restart");
                Ok(Self::new(MemoryStore::new()))
            }
        }
    }
}
