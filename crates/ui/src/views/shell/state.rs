use dioxus::prelude::*;
use services::tutorial::{QuizTicket, TutorialMachine};
use tutor_core::model::{LessonId, Theme};

use crate::vm::{RevealedAnswer, ScrollProgressVm};

/// Everything a shell child can ask the tutorial to do.
#[derive(Clone, Debug, PartialEq)]
pub enum TutorialAction {
    Start,
    Resume,
    Previous,
    Next,
    Navigate {
        lesson: LessonId,
        anchor: Option<String>,
    },
    ShowWelcome,
    Restart,
    SelectOption(usize),
    SubmitAnswer,
    CompleteExercise,
    SetTheme(Theme),
    OpenSearch,
    CloseSearch,
}

/// The answer currently being revealed, tied to the ticket that advances it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealedQuiz {
    pub ticket: QuizTicket,
    pub answer: RevealedAnswer,
}

/// Scroll to run once the next render has landed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollRequest {
    pub anchor: Option<String>,
}

/// Signals shared by the shell and its children.
#[derive(Clone, Copy)]
pub struct ShellState {
    pub machine: Signal<TutorialMachine>,
    pub revealed: Signal<Option<RevealedQuiz>>,
    pub notice: Signal<Option<String>>,
    pub search_open: Signal<bool>,
    pub theme: Signal<Theme>,
    pub scroll: Signal<ScrollProgressVm>,
    pub pending_scroll: Signal<Option<ScrollRequest>>,
}

/// Provided as context so children can read state and dispatch actions.
#[derive(Clone, Copy)]
pub struct ShellHandle {
    pub state: ShellState,
    pub dispatch: Callback<TutorialAction>,
}

impl ShellHandle {
    pub fn send(&self, action: TutorialAction) {
        self.dispatch.call(action);
    }
}
