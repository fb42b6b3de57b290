mod courseware;
mod ids;
mod lesson;
mod preferences;
mod progress;
mod quiz;

pub use ids::{LessonId, ParseIdError};

pub use courseware::{Courseware, CoursewareDraft, CoursewareError, Exercise, LessonDraft};
pub use lesson::{Lesson, LessonCatalog, LessonError, LessonSource};
pub use preferences::{ButtonPosition, PreferenceError, Theme};
pub use progress::{PROGRESS_SCHEMA_VERSION, Progress, ProgressError, ProgressRecord, QuizScore};
pub use quiz::{
    AnswerFeedback, OptionMark, Question, QuestionDraft, Quiz, QuizError, QuizPhase, QuizSession,
    QuizStep,
};
