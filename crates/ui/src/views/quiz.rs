use dioxus::prelude::*;

use crate::views::shell::{ShellHandle, TutorialAction};
use crate::vm::{QuizVm, quiz_vm};

#[component]
pub fn QuizPanel() -> Element {
    let handle = use_context::<ShellHandle>();
    let revealed = handle.state.revealed.read().clone();
    let vm = {
        let machine = handle.state.machine.read();
        machine
            .quiz()
            .and_then(|session| quiz_vm(session, revealed.as_ref().map(|r| &r.answer)))
    };
    let Some(vm) = vm else {
        return rsx! {};
    };

    rsx! {
        section { class: "quiz",
            h2 { "Quiz" }
            match vm {
                QuizVm::Question { label, prompt, options, can_submit, locked, verdict, explanation } => rsx! {
                    p { class: "quiz-progress", "{label}" }
                    p { class: "quiz-prompt", "{prompt}" }
                    ul { class: "quiz-options",
                        for option in options {
                            li { key: "{option.index}",
                                button {
                                    class: option.class,
                                    disabled: locked,
                                    onclick: move |_| handle.send(TutorialAction::SelectOption(option.index)),
                                    "{option.text}"
                                }
                            }
                        }
                    }
                    if let Some(verdict) = verdict {
                        p { class: "quiz-verdict", "{verdict}" }
                    }
                    if let Some(explanation) = explanation {
                        p { class: "quiz-explanation", "{explanation}" }
                    }
                    button {
                        id: "quiz-submit",
                        class: "primary",
                        disabled: !can_submit,
                        onclick: move |_| handle.send(TutorialAction::SubmitAnswer),
                        "Submit Answer"
                    }
                },
                QuizVm::Finished { score, summary } => rsx! {
                    div { class: "quiz-result",
                        p { class: "quiz-score", "{score}%" }
                        p { "{summary}" }
                    }
                },
            }
        }
    }
}
