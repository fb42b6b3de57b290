use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::views::shell::{ShellHandle, TutorialAction};
use crate::views::{ExercisePanel, QuizPanel};
use crate::vm::{LessonHtmlCache, lesson_vm};

#[component]
pub fn LessonView() -> Element {
    let handle = use_context::<ShellHandle>();
    let html_cache = use_hook(|| Rc::new(RefCell::new(LessonHtmlCache::default())));
    let vm = lesson_vm(&handle.state.machine.read(), &mut html_cache.borrow_mut());
    let Some(vm) = vm else {
        return rsx! {};
    };
    let has_quiz = handle.state.machine.read().quiz().is_some();

    rsx! {
        article { class: "lesson",
            header { class: "lesson-header",
                span { class: "lesson-position", "{vm.position_label}" }
                h1 { "{vm.title}" }
            }
            match vm.content_html {
                Some(html) => rsx! {
                    div { class: "lesson-content", dangerous_inner_html: "{html}" }
                },
                None => rsx! {
                    p { class: "loading", "Loading lesson..." }
                },
            }
            if has_quiz {
                QuizPanel {}
            }
            if let Some(html) = vm.exercise_html {
                ExercisePanel { html, done: vm.exercise_done }
            }
            footer { class: "lesson-nav",
                button {
                    id: "lesson-previous",
                    disabled: !vm.has_previous,
                    onclick: move |_| handle.send(TutorialAction::Previous),
                    "← Previous"
                }
                button {
                    id: "lesson-next",
                    class: "primary",
                    onclick: move |_| handle.send(TutorialAction::Next),
                    "{vm.next_label}"
                }
            }
        }
    }
}
