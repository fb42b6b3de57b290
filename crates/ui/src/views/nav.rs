use dioxus::prelude::*;
use tutor_core::model::Theme;

use crate::views::shell::{ShellHandle, TutorialAction};
use crate::vm::nav_items;

#[component]
pub fn NavBar() -> Element {
    let handle = use_context::<ShellHandle>();
    let machine = handle.state.machine;
    let theme = handle.state.theme;
    let scroll = handle.state.scroll.read().clone();
    let items = nav_items(&machine.read());

    rsx! {
        header { class: "nav",
            button {
                class: "nav-title",
                onclick: move |_| handle.send(TutorialAction::ShowWelcome),
                "Git Tiny Tutorial"
            }
            select {
                class: "theme-select",
                aria_label: "Theme",
                value: theme().as_str(),
                onchange: move |evt| {
                    match evt.value().parse::<Theme>() {
                        Ok(theme) => handle.send(TutorialAction::SetTheme(theme)),
                        Err(err) => tracing::debug!(error = %err, "ignoring theme"),
                    }
                },
                for choice in Theme::ALL {
                    option {
                        key: "{choice.as_str()}",
                        value: choice.as_str(),
                        selected: choice == theme(),
                        "{choice.label()}"
                    }
                }
            }
            nav { class: "lesson-list",
                for item in items {
                    button {
                        key: "{item.lesson}",
                        class: if item.active { "lesson-link active" } else { "lesson-link" },
                        onclick: move |_| {
                            handle.send(TutorialAction::Navigate {
                                lesson: item.lesson,
                                anchor: None,
                            });
                        },
                        span { "{item.label}" }
                        if let Some(score) = item.quiz_score {
                            span { class: "badge quiz-badge", "{score}%" }
                        }
                        if item.exercise_done {
                            span { class: "badge exercise-badge", "✓" }
                        }
                    }
                }
            }
            if scroll.visible {
                div {
                    class: "scroll-progress",
                    title: "{scroll.label}",
                    div {
                        class: "scroll-progress-bar",
                        style: "width: {scroll.percent}%",
                    }
                }
            }
        }
    }
}
