use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use activity_store::ActivityStore;
use memory_store::MemoryActivityStore;
use mongo_store::MongoActivityStore;
use recommendation_service::RecommendationService;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ActivityStore>,
    pub recommendations: RecommendationService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn ActivityStore> = match config.store_backend {
            StoreBackend::Mongo => {
                tracing::info!("Attempting to connect to MongoDB...");

                let client = mongodb::Client::with_uri_str(&config.mongo_uri).await?;
                let store = MongoActivityStore::new(client.database(&config.mongo_database));

                // Fail fast on an unreachable server
                store.ping().await?;

                tracing::info!(
                    database = %config.mongo_database,
                    "MongoDB connection established successfully"
                );
                Arc::new(store)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory activity store; data is not persisted");
                Arc::new(MemoryActivityStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: Arc<dyn ActivityStore>) -> Self {
        Self {
            config,
            recommendations: RecommendationService::new(store.clone()),
            store,
        }
    }
}

pub mod activity_store;
pub mod catalog;
pub mod collaborative_filter;
pub mod content_scorer;
pub mod difficulty_adjuster;
pub mod errors;
pub mod learning_path;
pub mod memory_store;
pub mod mongo_store;
pub mod profile_builder;
pub mod recommendation_service;
