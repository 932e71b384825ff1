use async_trait::async_trait;

use super::errors::StoreError;
use crate::models::progress::{LearningStats, ProblemSolvingRecord, ProgressRecord};

/// Read side of the progress/record/stats storage the engine depends on.
///
/// Missing rows are never an error: implementations return empty collections
/// or `None`. Only an unreachable backend yields [`StoreError::Unavailable`].
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Short identifier used in logs and health output.
    fn backend_name(&self) -> &'static str;

    async fn get_progress(&self, user_id: &str) -> Result<Vec<ProgressRecord>, StoreError>;

    async fn get_problem_records(
        &self,
        user_id: &str,
    ) -> Result<Vec<ProblemSolvingRecord>, StoreError>;

    async fn get_learning_stats(&self, user_id: &str) -> Result<Option<LearningStats>, StoreError>;

    /// Global scan over every user's progress rows, in insertion order.
    async fn get_all_progress(&self) -> Result<Vec<ProgressRecord>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
