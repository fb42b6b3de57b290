mod completion;
mod exercise;
mod lesson;
mod nav;
mod notice;
mod quiz;
mod search;
mod shell;
mod state;
mod welcome;

pub use completion::CompletionView;
pub use exercise::ExercisePanel;
pub use lesson::LessonView;
pub use nav::NavBar;
pub use notice::NoticeBanner;
pub use quiz::QuizPanel;
pub use search::{SearchButton, SearchPanel};
pub use shell::{
    NOTICE_DURATION, RevealedQuiz, ScrollRequest, ShellHandle, ShellState, TutorialAction,
    TutorialShell,
};
pub use state::ViewError;
pub use welcome::WelcomeView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
