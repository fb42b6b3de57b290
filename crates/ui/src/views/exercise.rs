use dioxus::prelude::*;

use crate::views::shell::{ShellHandle, TutorialAction};

#[component]
pub fn ExercisePanel(html: String, done: bool) -> Element {
    let handle = use_context::<ShellHandle>();

    rsx! {
        section { class: "exercise",
            h2 { "Exercise" }
            div { class: "exercise-body", dangerous_inner_html: "{html}" }
            if done {
                p { class: "exercise-done", "✓ Exercise completed" }
            } else {
                button {
                    id: "exercise-complete",
                    onclick: move |_| handle.send(TutorialAction::CompleteExercise),
                    "Mark as Complete"
                }
            }
        }
    }
}
