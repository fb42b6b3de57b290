use dioxus::prelude::*;
use services::tutorial::CompletionStats;
use tutor_core::model::LessonId;

use crate::views::shell::{ShellHandle, TutorialAction};
use crate::vm::completion_vm;

#[component]
pub fn CompletionView(stats: CompletionStats) -> Element {
    let handle = use_context::<ShellHandle>();
    let completed_at = handle.state.machine.read().progress().completed_at();
    let vm = completion_vm(&stats, completed_at);

    rsx! {
        section { class: "completion",
            h1 { "🎉 Tutorial Complete!" }
            p { "You have finished every lesson of the Git Tiny Tutorial." }
            dl { class: "completion-stats",
                dt { "Average quiz score" }
                dd { "{vm.quiz_score}" }
                dt { "Time spent" }
                dd { "{vm.time_spent}" }
                dt { "Exercises completed" }
                dd { "{vm.exercises}" }
            }
            if let Some(completed_on) = vm.completed_on {
                p { class: "completion-date", "Completed on {completed_on}" }
            }
            div { class: "completion-actions",
                button {
                    id: "completion-restart",
                    class: "primary",
                    onclick: move |_| handle.send(TutorialAction::Restart),
                    "Restart Tutorial"
                }
                button {
                    id: "completion-review",
                    onclick: move |_| {
                        handle.send(TutorialAction::Navigate {
                            lesson: LessonId::new(0),
                            anchor: None,
                        });
                    },
                    "Review Lessons"
                }
            }
        }
    }
}
