use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tutor_core::model::Lesson;

use crate::repository::StorageError;

/// Fetches the raw markdown of a lesson by its source reference.
#[async_trait]
pub trait LessonStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the lesson file does not exist, or
    /// `StorageError::Fetch` for I/O and transport failures.
    async fn fetch(&self, lesson: &Lesson) -> Result<String, StorageError>;
}

/// Reads lessons from a directory of markdown files.
#[derive(Clone, Debug)]
pub struct FsLessonStore {
    root: PathBuf,
}

impl FsLessonStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl LessonStore for FsLessonStore {
    async fn fetch(&self, lesson: &Lesson) -> Result<String, StorageError> {
        let path = self.root.join(lesson.source().as_str());
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "lesson file missing");
                Err(StorageError::NotFound)
            }
            Err(err) => Err(StorageError::Fetch(format!("{}: {err}", path.display()))),
        }
    }
}

/// Lessons held in memory, keyed by source reference.
#[derive(Clone, Default)]
pub struct InMemoryLessonStore {
    lessons: Arc<HashMap<String, String>>,
}

impl InMemoryLessonStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lesson(self, source: impl Into<String>, markdown: impl Into<String>) -> Self {
        let mut lessons = Arc::unwrap_or_clone(self.lessons);
        lessons.insert(source.into(), markdown.into());
        Self {
            lessons: Arc::new(lessons),
        }
    }
}

#[async_trait]
impl LessonStore for InMemoryLessonStore {
    async fn fetch(&self, lesson: &Lesson) -> Result<String, StorageError> {
        self.lessons
            .get(lesson.source().as_str())
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}
