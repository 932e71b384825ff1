use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::activity_store::ActivityStore;
use super::errors::StoreError;
use crate::models::progress::{LearningStats, ProblemSolvingRecord, ProgressRecord};

#[derive(Default)]
struct Tables {
    progress: Vec<ProgressRecord>,
    problem_records: Vec<ProblemSolvingRecord>,
    stats: Vec<LearningStats>,
}

/// Process-local Activity Store. Backs tests and `store.backend = "memory"` runs.
#[derive(Default)]
pub struct MemoryActivityStore {
    tables: RwLock<Tables>,
}

impl MemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the (user, module, lesson) row on first write, mutates it afterwards.
    pub async fn upsert_progress(&self, record: ProgressRecord) {
        let mut tables = self.tables.write().await;
        let existing = tables.progress.iter_mut().find(|row| {
            row.user_id == record.user_id
                && row.module == record.module
                && row.lesson_id == record.lesson_id
        });

        match existing {
            Some(row) => {
                row.completed = record.completed;
                row.score = record.score;
                row.time_spent = record.time_spent;
                row.updated_at = Utc::now();
            }
            None => tables.progress.push(record),
        }
    }

    pub async fn append_problem_record(&self, record: ProblemSolvingRecord) {
        self.tables.write().await.problem_records.push(record);
    }

    pub async fn put_learning_stats(&self, stats: LearningStats) {
        let mut tables = self.tables.write().await;
        tables.stats.retain(|row| row.user_id != stats.user_id);
        tables.stats.push(stats);
    }
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get_progress(&self, user_id: &str) -> Result<Vec<ProgressRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .progress
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_problem_records(
        &self,
        user_id: &str,
    ) -> Result<Vec<ProblemSolvingRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .problem_records
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_learning_stats(&self, user_id: &str) -> Result<Option<LearningStats>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stats
            .iter()
            .find(|row| row.user_id == user_id)
            .cloned())
    }

    async fn get_all_progress(&self) -> Result<Vec<ProgressRecord>, StoreError> {
        Ok(self.tables.read().await.progress.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::LearningModule;

    #[tokio::test]
    async fn upsert_mutates_existing_row() {
        let store = MemoryActivityStore::new();
        store
            .upsert_progress(ProgressRecord::new(
                "u-1",
                LearningModule::Theory,
                "theory_1",
                false,
                40,
            ))
            .await;
        store
            .upsert_progress(ProgressRecord::new(
                "u-1",
                LearningModule::Theory,
                "theory_1",
                true,
                90,
            ))
            .await;

        let rows = store.get_progress("u-1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].completed);
        assert_eq!(rows[0].score, 90);
    }

    #[tokio::test]
    async fn reads_are_scoped_to_user() {
        let store = MemoryActivityStore::new();
        store
            .append_problem_record(ProblemSolvingRecord::new("u-1", "math", "p-1", 300, 0.9))
            .await;
        store
            .append_problem_record(ProblemSolvingRecord::new("u-2", "logic", "p-2", 900, 0.4))
            .await;
        store.put_learning_stats(LearningStats::new("u-2")).await;

        assert_eq!(store.get_problem_records("u-1").await.unwrap().len(), 1);
        assert!(store.get_learning_stats("u-1").await.unwrap().is_none());
        assert!(store.get_learning_stats("u-2").await.unwrap().is_some());
        assert!(store.get_progress("nobody").await.unwrap().is_empty());
    }
}
