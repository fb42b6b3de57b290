use thiserror::Error;

use crate::model::{CoursewareError, LessonError, PreferenceError, ProgressError, QuizError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Courseware(#[from] CoursewareError),
    #[error(transparent)]
    Preference(#[from] PreferenceError),
}
