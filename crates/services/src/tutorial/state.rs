use std::time::Duration;

use tutor_core::model::{Exercise, LessonId, QuizStep};

/// Delay before the explanation of a submitted answer is shown.
pub const QUIZ_REVEAL_DELAY: Duration = Duration::from_secs(1);
/// Delay between showing the explanation and moving on.
pub const QUIZ_ADVANCE_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TutorialState {
    #[default]
    Welcome,
    Lesson(LessonId),
    Completion(CompletionStats),
}

impl TutorialState {
    #[must_use]
    pub fn lesson(&self) -> Option<LessonId> {
        match self {
            TutorialState::Lesson(id) => Some(*id),
            _ => None,
        }
    }
}

/// Figures shown on the completion screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionStats {
    pub mean_quiz_score: u8,
    pub elapsed_minutes: u64,
    pub completed_exercises: usize,
    pub lesson_count: usize,
}

/// Ticket for the markdown fetch that entering a lesson requires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonRequest {
    pub lesson: LessonId,
    pub anchor: Option<String>,
    pub(crate) generation: u64,
}

/// The lesson currently on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedLesson {
    pub lesson: LessonId,
    pub title: String,
    pub markdown: String,
    pub anchor: Option<String>,
    pub exercise: Option<Exercise>,
    pub(crate) generation: u64,
}

impl LoadedLesson {
    /// Navigation generation that produced this load; changes on every
    /// (re)load, even of the same lesson.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of a state transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Transition {
    /// Fetch to start, when a lesson was entered.
    pub request: Option<LessonRequest>,
    /// Whether progress must be persisted.
    pub progress_changed: bool,
}

impl Transition {
    pub(crate) fn none() -> Self {
        Self::default()
    }
}

/// Identifies a submitted answer so a late advance can be ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizTicket {
    pub(crate) generation: u64,
    pub(crate) question: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizAdvance {
    pub step: QuizStep,
    pub progress_changed: bool,
}
