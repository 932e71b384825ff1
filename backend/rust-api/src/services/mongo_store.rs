use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Database,
};
use serde::de::DeserializeOwned;

use super::activity_store::ActivityStore;
use super::errors::StoreError;
use crate::metrics::track_store_operation;
use crate::models::progress::{LearningStats, ProblemSolvingRecord, ProgressRecord};
use crate::utils::retry::{retry_async_with_config, RetryConfig};

pub const PROGRESS_COLLECTION: &str = "user_progress";
pub const PROBLEM_RECORDS_COLLECTION: &str = "problem_solving_records";
pub const LEARNING_STATS_COLLECTION: &str = "learning_stats";

/// MongoDB-backed Activity Store. Read-only from the engine's side; every read
/// is retried with bounded backoff before being reported as unavailable.
pub struct MongoActivityStore {
    mongo: Database,
    retry: RetryConfig,
}

impl MongoActivityStore {
    pub fn new(mongo: Database) -> Self {
        Self {
            mongo,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn find_all<T>(
        &self,
        operation: &'static str,
        collection: &str,
        filter: Document,
    ) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        let collection = self.mongo.collection::<T>(collection);

        track_store_operation(
            operation,
            retry_async_with_config(operation, self.retry.clone(), || async {
                // ObjectIds grow monotonically, so _id order is insertion order
                let cursor = collection
                    .find(filter.clone())
                    .sort(doc! { "_id": 1 })
                    .await?;
                cursor.try_collect::<Vec<T>>().await
            }),
        )
        .await
        .map_err(|err| unavailable(operation, err))
    }
}

fn unavailable(operation: &str, err: mongodb::error::Error) -> StoreError {
    tracing::error!(operation, error = %err, "Activity store read failed");
    StoreError::Unavailable(format!("{} failed: {}", operation, err))
}

#[async_trait]
impl ActivityStore for MongoActivityStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn get_progress(&self, user_id: &str) -> Result<Vec<ProgressRecord>, StoreError> {
        self.find_all(
            "get_progress",
            PROGRESS_COLLECTION,
            doc! { "user_id": user_id },
        )
        .await
    }

    async fn get_problem_records(
        &self,
        user_id: &str,
    ) -> Result<Vec<ProblemSolvingRecord>, StoreError> {
        self.find_all(
            "get_problem_records",
            PROBLEM_RECORDS_COLLECTION,
            doc! { "user_id": user_id },
        )
        .await
    }

    async fn get_learning_stats(&self, user_id: &str) -> Result<Option<LearningStats>, StoreError> {
        let collection = self
            .mongo
            .collection::<LearningStats>(LEARNING_STATS_COLLECTION);

        track_store_operation(
            "get_learning_stats",
            retry_async_with_config("get_learning_stats", self.retry.clone(), || async {
                collection.find_one(doc! { "user_id": user_id }).await
            }),
        )
        .await
        .map_err(|err| unavailable("get_learning_stats", err))
    }

    async fn get_all_progress(&self) -> Result<Vec<ProgressRecord>, StoreError> {
        self.find_all("get_all_progress", PROGRESS_COLLECTION, Document::new())
            .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        tokio::time::timeout(
            std::time::Duration::from_secs(1),
            self.mongo.run_command(doc! { "ping": 1 }),
        )
        .await
        .map_err(|_| StoreError::Unavailable("MongoDB ping timeout after 1s".to_string()))?
        .map(|_| ())
        .map_err(|err| StoreError::Unavailable(format!("MongoDB ping failed: {}", err)))
    }
}
