use dioxus::prelude::*;

use crate::views::shell::{ShellHandle, TutorialAction};

#[component]
pub fn WelcomeView() -> Element {
    let handle = use_context::<ShellHandle>();
    let machine = handle.state.machine.read();
    let lesson_count = machine.catalog().len();
    let progress = machine.progress();
    let has_progress = progress.current_lesson().value() > 0
        || progress.quiz_scores().next().is_some()
        || progress.completed_exercise_count() > 0;
    let resume_label = format!("Resume Lesson {}", progress.current_lesson().number());

    rsx! {
        section { class: "welcome",
            h1 { "Welcome to the Git Tiny Tutorial" }
            p {
                "{lesson_count} short lessons take you from your first commit to working with remotes. "
                "Each lesson ends with a quiz and a hands-on exercise."
            }
            div { class: "welcome-actions",
                button {
                    id: "welcome-start",
                    class: "primary",
                    onclick: move |_| handle.send(TutorialAction::Start),
                    "Start Tutorial"
                }
                if has_progress {
                    button {
                        id: "welcome-resume",
                        onclick: move |_| handle.send(TutorialAction::Resume),
                        "{resume_label}"
                    }
                }
            }
        }
    }
}
