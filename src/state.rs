use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::database::{MemoryStore, PgStore, RecipeStore, StoreError, UserStore};

/// Dependencies shared by every handler, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub recipes: Arc<dyn RecipeStore>,
    pub users: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(recipes: Arc<dyn RecipeStore>, users: Arc<dyn UserStore>, config: AppConfig) -> Self {
        Self {
            recipes,
            users,
            config: Arc::new(config),
        }
    }

    /// Both stores backed by a single [`MemoryStore`]
    pub fn in_memory(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, config)
    }

    /// PostgreSQL when `database.url` is set, process memory otherwise
    pub async fn from_config(config: AppConfig) -> Result<Self, StoreError> {
        match config.database.url.clone() {
            Some(url) => {
                let store = Arc::new(PgStore::connect(&url, &config.database).await?);
                info!("Using PostgreSQL recipe store");
                Ok(Self::new(store.clone(), store, config))
            }
            None => {
                info!("DATABASE_URL not set, using in-memory recipe store");
                Ok(Self::in_memory(config))
            }
        }
    }
}
