use std::sync::Arc;

use dioxus::prelude::*;
use services::ProgressService;
use tutor_core::model::{LessonId, Progress};

use super::test_harness::setup_shell_harness;
use crate::views::TutorialAction;

#[tokio::test(flavor = "current_thread")]
async fn welcome_screen_offers_start_only_for_fresh_progress() {
    let harness = setup_shell_harness(Progress::new(), true);
    let html = harness.render();
    assert!(html.contains("Welcome to the Git Tiny Tutorial"), "{html}");
    assert!(html.contains("Start Tutorial"), "{html}");
    assert!(!html.contains("Resume Lesson"), "{html}");
    assert!(html.contains(r#"data-theme="dark""#), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn welcome_screen_offers_resume_for_saved_progress() {
    let mut progress = Progress::new();
    progress.set_current_lesson(LessonId::new(1));
    let harness = setup_shell_harness(progress, true);
    let html = harness.render();
    assert!(html.contains("Resume Lesson 2"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn start_renders_first_lesson_with_quiz_and_exercise() {
    let mut harness = setup_shell_harness(Progress::new(), true);
    harness.send(TutorialAction::Start);
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Lesson 1 of 2"), "{html}");
    assert!(html.contains(r#"id="installing-git""#), "{html}");
    assert!(html.contains("Which command shows the installed version?"), "{html}");
    assert!(html.contains("Mark as Complete"), "{html}");
    assert!(html.contains("Next →"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn submitted_answer_marks_options() {
    let mut harness = setup_shell_harness(Progress::new(), true);
    harness.send(TutorialAction::Start);
    harness.drive_async().await;

    harness.send(TutorialAction::SelectOption(1));
    harness.send(TutorialAction::SubmitAnswer);

    let html = harness.render();
    assert!(html.contains("quiz-option correct"), "{html}");
    assert!(html.contains("quiz-option incorrect"), "{html}");
    let revealed = harness.with_shell(|shell| shell.state.revealed.read().is_some());
    assert!(revealed);
}

#[tokio::test(flavor = "current_thread")]
async fn completing_exercise_persists_progress() {
    let mut harness = setup_shell_harness(Progress::new(), true);
    harness.send(TutorialAction::Start);
    harness.drive_async().await;

    harness.send(TutorialAction::CompleteExercise);
    harness.drive_async().await;

    assert!(harness.render().contains("Exercise completed"));
    let saved = ProgressService::new(Arc::clone(&harness.storage.kv), 2)
        .load()
        .await
        .expect("load progress");
    assert!(saved.is_exercise_complete(LessonId::new(0)));
}

#[tokio::test(flavor = "current_thread")]
async fn failed_lesson_fetch_shows_notice() {
    let mut harness = setup_shell_harness(Progress::new(), false);
    harness.send(TutorialAction::Navigate {
        lesson: LessonId::new(1),
        anchor: None,
    });
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Could not load this lesson"), "{html}");
    assert!(html.contains("Loading lesson..."), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn next_on_last_lesson_completes_and_restart_returns_home() {
    let mut harness = setup_shell_harness(Progress::new(), true);
    harness.send(TutorialAction::Navigate {
        lesson: LessonId::new(1),
        anchor: Some("creating-a-branch".into()),
    });
    harness.drive_async().await;
    assert!(harness.render().contains("Complete"));

    harness.send(TutorialAction::Next);
    let html = harness.render();
    assert!(html.contains("Tutorial Complete!"), "{html}");
    assert!(html.contains("0 / 2"), "{html}");

    harness.send(TutorialAction::Restart);
    harness.drive_async().await;
    assert!(harness.render().contains("Start Tutorial"));
}

#[tokio::test(flavor = "current_thread")]
async fn search_shortcut_opens_panel() {
    let mut harness = setup_shell_harness(Progress::new(), true);
    harness.send(TutorialAction::OpenSearch);

    let html = harness.render();
    assert!(html.contains("search-panel"), "{html}");
    assert!(html.contains("Type to search all lessons."), "{html}");

    harness.send(TutorialAction::CloseSearch);
    assert!(!harness.render().contains("search-panel"));
}
