use dioxus::prelude::*;

use crate::views::shell::ShellHandle;

#[component]
pub fn NoticeBanner() -> Element {
    let handle = use_context::<ShellHandle>();
    let mut notice = handle.state.notice;
    let Some(message) = notice() else {
        return rsx! {};
    };

    rsx! {
        div { class: "notice error", role: "alert",
            span { "{message}" }
            button {
                class: "notice-close",
                aria_label: "Dismiss",
                onclick: move |_| notice.set(None),
                "×"
            }
        }
    }
}
