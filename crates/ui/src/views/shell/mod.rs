mod actions;
mod scripts;
mod state;
mod view;

pub use actions::NOTICE_DURATION;
pub use state::{RevealedQuiz, ScrollRequest, ShellHandle, ShellState, TutorialAction};
pub use view::TutorialShell;
