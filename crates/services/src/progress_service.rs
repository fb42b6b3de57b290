use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use storage::repository::KeyValueStore;
use tokio::sync::Mutex;
use tutor_core::model::{Progress, ProgressRecord};

use crate::error::ProgressServiceError;

/// Storage key of the serialized progress record.
pub const PROGRESS_KEY: &str = "gitTutorialProgress";

/// Sequence numbers for queued saves and the last one written.
#[derive(Default)]
struct WriteOrder {
    issued: AtomicU64,
    committed: Mutex<u64>,
}

/// Loads and persists learner progress as one JSON document.
///
/// Saves are ordered: a snapshot queued later always wins over one queued
/// earlier, whichever write task happens to run first.
#[derive(Clone)]
pub struct ProgressService {
    kv: Arc<dyn KeyValueStore>,
    lesson_count: usize,
    order: Arc<WriteOrder>,
}

/// A progress snapshot waiting to be written.
#[must_use = "a queued save does nothing until committed"]
pub struct QueuedSave {
    kv: Arc<dyn KeyValueStore>,
    order: Arc<WriteOrder>,
    seq: u64,
    json: String,
}

impl QueuedSave {
    /// Write the snapshot unless a later one has already been written.
    /// Returns `false` when it was superseded.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the write fails.
    pub async fn commit(self) -> Result<bool, ProgressServiceError> {
        let mut committed = self.order.committed.lock().await;
        if *committed >= self.seq {
            tracing::debug!(seq = self.seq, "progress save superseded");
            return Ok(false);
        }
        let written = self.kv.put(PROGRESS_KEY, &self.json).await;
        *committed = self.seq;
        written?;
        Ok(true)
    }
}

impl ProgressService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>, lesson_count: usize) -> Self {
        Self {
            kv,
            lesson_count,
            order: Arc::new(WriteOrder::default()),
        }
    }

    /// Load persisted progress.
    ///
    /// Missing, unreadable or newer-schema records fall back to the empty
    /// initial progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the store cannot be read.
    pub async fn load(&self) -> Result<Progress, ProgressServiceError> {
        let Some(raw) = self.kv.get(PROGRESS_KEY).await? else {
            return Ok(Progress::new());
        };

        let record = match serde_json::from_str::<ProgressRecord>(&raw) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(error = %err, "stored progress is corrupt; starting fresh");
                return Ok(Progress::new());
            }
        };

        match Progress::from_record(record, self.lesson_count) {
            Ok(progress) => Ok(progress),
            Err(err) => {
                tracing::warn!(error = %err, "stored progress rejected; starting fresh");
                Ok(Progress::new())
            }
        }
    }

    /// Snapshot `progress` and reserve its place in the write order.
    ///
    /// Call this synchronously where progress changes; the returned save can
    /// then be committed from any task.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Encode` if the record cannot be encoded.
    pub fn queue_save(&self, progress: &Progress) -> Result<QueuedSave, ProgressServiceError> {
        let json = serde_json::to_string(&progress.to_record())?;
        let seq = self.order.issued.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(QueuedSave {
            kv: Arc::clone(&self.kv),
            order: Arc::clone(&self.order),
            seq,
            json,
        })
    }

    /// Persist the whole record, replacing the previous one.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if encoding or the write fails.
    pub async fn save(&self, progress: &Progress) -> Result<(), ProgressServiceError> {
        self.queue_save(progress)?.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryStore;
    use tutor_core::model::{LessonId, QuizScore};
    use tutor_core::time::fixed_now;

    fn service(store: &InMemoryStore) -> ProgressService {
        ProgressService::new(Arc::new(store.clone()), 6)
    }

    #[tokio::test]
    async fn missing_record_loads_empty_progress() {
        let store = InMemoryStore::new();
        assert_eq!(service(&store).load().await.unwrap(), Progress::new());
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let store = InMemoryStore::new();
        let svc = service(&store);

        let mut progress = Progress::new();
        progress.set_current_lesson(LessonId::new(3));
        progress.record_quiz_score(LessonId::new(0), QuizScore::new(75).unwrap());
        progress.record_quiz_score(LessonId::new(2), QuizScore::new(100).unwrap());
        progress.complete_exercise(LessonId::new(1));
        progress.mark_completed(fixed_now());

        svc.save(&progress).await.unwrap();
        assert_eq!(svc.load().await.unwrap(), progress);
    }

    #[tokio::test]
    async fn corrupt_json_falls_back_to_default() {
        let store = InMemoryStore::new();
        store.put(PROGRESS_KEY, "{not json").await.unwrap();
        assert_eq!(service(&store).load().await.unwrap(), Progress::new());
    }

    #[tokio::test]
    async fn newer_schema_falls_back_to_default() {
        let store = InMemoryStore::new();
        store
            .put(PROGRESS_KEY, r#"{"version":99,"currentLesson":2}"#)
            .await
            .unwrap();
        assert_eq!(service(&store).load().await.unwrap(), Progress::new());
    }

    #[tokio::test]
    async fn legacy_record_without_version_is_accepted() {
        let store = InMemoryStore::new();
        store
            .put(
                PROGRESS_KEY,
                r#"{"currentLesson":4,"quizScores":{"1":50},"completedExercises":{},"completedAt":null}"#,
            )
            .await
            .unwrap();

        let progress = service(&store).load().await.unwrap();
        assert_eq!(progress.current_lesson(), LessonId::new(4));
        assert_eq!(progress.quiz_score(LessonId::new(1)).map(|s| s.value()), Some(50));
    }
}
