//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use tutor_core::model::{CoursewareError, QuizError};

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `PreferencesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesError {
    #[error("failed to encode preference: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `TutorialMachine`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TutorialError {
    #[error("lesson {index} does not exist (catalog has {len} lessons)")]
    LessonOutOfRange { index: usize, len: usize },
    #[error("no lesson is open")]
    NotInLesson,
    #[error("the current lesson has no quiz")]
    NoQuiz,
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors raised while loading the bundled courseware.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoursewareLoadError {
    #[error("courseware is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] CoursewareError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Courseware(#[from] CoursewareLoadError),
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
}
