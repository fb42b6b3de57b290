//! Welcome, lesson and completion flow with the quiz and exercise sub-flows.

mod machine;
mod state;

pub use machine::TutorialMachine;
pub use state::{
    CompletionStats, LessonRequest, LoadedLesson, QUIZ_ADVANCE_DELAY, QUIZ_REVEAL_DELAY,
    QuizAdvance, QuizTicket, Transition, TutorialState,
};
