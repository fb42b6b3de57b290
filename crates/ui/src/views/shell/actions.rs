use std::time::Duration;

use dioxus::prelude::*;
use services::tutorial::{LessonRequest, QUIZ_ADVANCE_DELAY, QUIZ_REVEAL_DELAY, Transition};
use tutor_core::model::Theme;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{RevealedAnswer, ScrollProgressVm};

use super::state::{RevealedQuiz, ScrollRequest, ShellState, TutorialAction};

/// How long an error notification stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

pub(super) fn handle_action(ctx: &AppContext, state: ShellState, action: TutorialAction) {
    let mut machine = state.machine;
    let mut search_open = state.search_open;

    match action {
        TutorialAction::Start => {
            let transition = machine.write().start();
            apply_transition(ctx, state, transition);
        }
        TutorialAction::Resume => {
            let transition = machine.write().resume();
            apply_transition(ctx, state, transition);
        }
        TutorialAction::Previous => {
            let transition = machine.write().previous();
            apply_transition(ctx, state, transition);
        }
        TutorialAction::Next => {
            let transition = machine.write().next();
            apply_transition(ctx, state, transition);
        }
        TutorialAction::Navigate { lesson, anchor } => {
            let result = machine.write().navigate(lesson, anchor);
            match result {
                Ok(transition) => apply_transition(ctx, state, transition),
                Err(err) => tracing::warn!(error = %err, "navigation rejected"),
            }
        }
        TutorialAction::ShowWelcome => {
            let transition = machine.write().show_welcome();
            apply_transition(ctx, state, transition);
        }
        TutorialAction::Restart => {
            let transition = machine.write().restart();
            apply_transition(ctx, state, transition);
        }
        TutorialAction::SelectOption(option) => {
            if let Err(err) = machine.write().select_option(option) {
                tracing::debug!(error = %err, "option not selected");
            }
        }
        TutorialAction::SubmitAnswer => submit_answer(ctx, state),
        TutorialAction::CompleteExercise => {
            let result = machine.write().complete_exercise();
            match result {
                Ok(true) => save_progress(ctx, state),
                Ok(false) => {}
                Err(err) => tracing::debug!(error = %err, "exercise not completed"),
            }
        }
        TutorialAction::SetTheme(theme) => set_theme(ctx, state, theme),
        TutorialAction::OpenSearch => search_open.set(true),
        TutorialAction::CloseSearch => {
            search_open.set(false);
            ctx.search().input("");
        }
    }
}

fn apply_transition(ctx: &AppContext, state: ShellState, transition: Transition) {
    let mut revealed = state.revealed;
    let mut scroll = state.scroll;
    revealed.set(None);
    scroll.set(ScrollProgressVm::default());

    if transition.progress_changed {
        save_progress(ctx, state);
    }
    if let Some(request) = transition.request {
        fetch_lesson(ctx, state, request);
    }
}

fn fetch_lesson(ctx: &AppContext, state: ShellState, request: LessonRequest) {
    let Some(lesson) = ctx.catalog().get(request.lesson).cloned() else {
        return;
    };
    let lessons = ctx.lessons();
    let mut machine = state.machine;
    let mut pending_scroll = state.pending_scroll;

    spawn(async move {
        match lessons.fetch(&lesson).await {
            Ok(markdown) => {
                let loaded = machine.write().complete_load(&request, markdown).is_some();
                if loaded {
                    pending_scroll.set(Some(ScrollRequest {
                        anchor: request.anchor.clone(),
                    }));
                }
            }
            Err(err) => {
                tracing::warn!(lesson = %request.lesson, error = %err, "failed to load lesson");
                if machine.read().fail_load(&request) {
                    notify(state.notice, ViewError::LessonUnavailable.message());
                }
            }
        }
    });
}

fn submit_answer(ctx: &AppContext, state: ShellState) {
    let mut machine = state.machine;
    let mut revealed = state.revealed;

    let submitted = machine.write().submit_answer();
    let (feedback, ticket) = match submitted {
        Ok(submitted) => submitted,
        Err(err) => {
            tracing::debug!(error = %err, "answer not submitted");
            return;
        }
    };
    revealed.set(Some(RevealedQuiz {
        ticket,
        answer: RevealedAnswer {
            feedback,
            show_explanation: false,
        },
    }));

    let ctx = ctx.clone();
    spawn(async move {
        tokio::time::sleep(QUIZ_REVEAL_DELAY).await;
        if let Some(current) = revealed.write().as_mut()
            && current.ticket == ticket
        {
            current.answer.show_explanation = true;
        }

        tokio::time::sleep(QUIZ_ADVANCE_DELAY).await;
        let advanced = machine.write().advance_quiz(ticket);
        if revealed.read().as_ref().is_some_and(|r| r.ticket == ticket) {
            revealed.set(None);
        }
        match advanced {
            Ok(Some(advance)) if advance.progress_changed => save_progress(&ctx, state),
            Ok(_) => {}
            Err(err) => tracing::warn!(error = %err, "quiz did not advance"),
        }
    });
}

/// Queue the current progress now so saves land in mutation order, then
/// write it in the background.
pub(super) fn save_progress(ctx: &AppContext, state: ShellState) {
    let queued = ctx.progress().queue_save(state.machine.read().progress());
    let queued = match queued {
        Ok(queued) => queued,
        Err(err) => {
            tracing::warn!(error = %err, "failed to encode progress");
            notify(state.notice, ViewError::SaveFailed.message());
            return;
        }
    };
    spawn(async move {
        if let Err(err) = queued.commit().await {
            tracing::warn!(error = %err, "failed to save progress");
            notify(state.notice, ViewError::SaveFailed.message());
        }
    });
}

fn set_theme(ctx: &AppContext, state: ShellState, theme: Theme) {
    let mut current = state.theme;
    current.set(theme);
    let preferences = ctx.preferences();
    spawn(async move {
        if let Err(err) = preferences.set_theme(theme).await {
            tracing::warn!(error = %err, "failed to save theme");
        }
    });
}

/// Show `message` and clear it after `NOTICE_DURATION` unless replaced.
pub(crate) fn notify(mut notice: Signal<Option<String>>, message: &str) {
    let message = message.to_string();
    notice.set(Some(message.clone()));
    spawn(async move {
        tokio::time::sleep(NOTICE_DURATION).await;
        if notice.read().as_ref() == Some(&message) {
            notice.set(None);
        }
    });
}
