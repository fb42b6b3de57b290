use dioxus::prelude::*;
use tutor_core::model::ButtonPosition;

use crate::context::AppContext;
use crate::views::shell::{ShellHandle, TutorialAction};
use crate::vm::{PanelCommand, SearchKey, SearchPanelVm};

/// Pointer travel below which a press on the search button counts as a click.
const DRAG_THRESHOLD_PX: f64 = 5.0;

fn search_key(key: &Key) -> Option<SearchKey> {
    match key {
        Key::ArrowUp => Some(SearchKey::Up),
        Key::ArrowDown => Some(SearchKey::Down),
        Key::Enter => Some(SearchKey::Enter),
        Key::Escape => Some(SearchKey::Escape),
        _ => None,
    }
}

fn run_command(handle: ShellHandle, command: PanelCommand) {
    match command {
        PanelCommand::None => {}
        PanelCommand::Activate(result) => {
            tracing::debug!(lesson = %result.lesson, anchor = %result.anchor, "search result opened");
            handle.send(TutorialAction::Navigate {
                lesson: result.lesson,
                anchor: Some(result.anchor),
            });
            handle.send(TutorialAction::CloseSearch);
        }
        PanelCommand::Close => handle.send(TutorialAction::CloseSearch),
    }
}

#[component]
pub fn SearchPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let handle = use_context::<ShellHandle>();
    let mut panel = use_signal(SearchPanelVm::default);
    let mut query = use_signal(String::new);

    let search_for_updates = ctx.search();
    use_future(move || {
        let search = search_for_updates.clone();
        async move {
            let mut panel = panel;
            let mut updates = search.subscribe();
            loop {
                let state = updates.borrow_and_update().clone();
                panel.write().set_results(&state.query, state.results);
                if updates.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    let search_for_input = ctx.search();
    let on_input = move |evt: FormEvent| {
        let value = evt.value();
        search_for_input.input(&value);
        query.set(value);
    };

    let on_key = move |evt: KeyboardEvent| {
        let Some(key) = search_key(&evt.data.key()) else {
            return;
        };
        evt.prevent_default();
        evt.stop_propagation();
        let command = panel.write().handle_key(key);
        run_command(handle, command);
    };

    let vm = panel.read();
    let rows = vm.rows();
    let empty_message = vm.empty_message();

    rsx! {
        div {
            class: "search-overlay",
            onclick: move |_| handle.send(TutorialAction::CloseSearch),
            div {
                class: "search-panel",
                role: "dialog",
                onclick: move |evt| evt.stop_propagation(),
                input {
                    id: "search-input",
                    r#type: "search",
                    placeholder: "Search lessons…",
                    autocomplete: "off",
                    value: "{query}",
                    oninput: on_input,
                    onkeydown: on_key,
                }
                if let Some(message) = empty_message {
                    p { class: "search-empty", "{message}" }
                }
                ul { class: "search-results",
                    for (index, row) in rows.into_iter().enumerate() {
                        li {
                            key: "{index}",
                            class: if row.selected { "search-result selected" } else { "search-result" },
                            onmouseenter: move |_| panel.write().select(index),
                            onclick: move |_| {
                                panel.write().select(index);
                                let command = panel.write().handle_key(SearchKey::Enter);
                                run_command(handle, command);
                            },
                            div { class: "search-result-meta",
                                span { class: "search-result-lesson", "{row.lesson_title}" }
                                span { class: "search-result-kind", "{row.kind_label}" }
                            }
                            if !row.heading.is_empty() {
                                div { class: "search-result-heading",
                                    for span_vm in row.heading {
                                        if span_vm.emphasized {
                                            mark { "{span_vm.text}" }
                                        } else {
                                            span { "{span_vm.text}" }
                                        }
                                    }
                                }
                            }
                            div { class: "search-result-snippet",
                                for span_vm in row.snippet {
                                    if span_vm.emphasized {
                                        mark { "{span_vm.text}" }
                                    } else {
                                        span { "{span_vm.text}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Floating button that opens search; dragging it moves it and the new
/// position is remembered.
#[component]
pub fn SearchButton() -> Element {
    let ctx = use_context::<AppContext>();
    let handle = use_context::<ShellHandle>();
    let mut position = use_signal(|| ctx.initial_button_position());
    let mut press = use_signal(|| None::<(f64, f64)>);

    let preferences = ctx.preferences();
    let on_release = move |evt: MouseEvent| {
        let Some((start_x, start_y)) = press() else {
            return;
        };
        press.set(None);
        let point = evt.client_coordinates();
        let moved = (point.x - start_x).hypot(point.y - start_y);
        if moved < DRAG_THRESHOLD_PX {
            handle.send(TutorialAction::OpenSearch);
            return;
        }

        let Ok(next) = ButtonPosition::new(point.x, point.y) else {
            return;
        };
        position.set(Some(next));
        let preferences = preferences.clone();
        spawn(async move {
            if let Err(err) = preferences.set_button_position(next).await {
                tracing::warn!(error = %err, "failed to save search button position");
            }
        });
    };

    let style = position().map_or_else(String::new, |p| {
        format!("left: {}px; top: {}px; right: auto; bottom: auto;", p.x, p.y)
    });

    rsx! {
        button {
            class: "search-fab",
            style: "{style}",
            title: "Search (Ctrl+K)",
            aria_label: "Search lessons",
            onmousedown: move |evt| {
                let point = evt.client_coordinates();
                press.set(Some((point.x, point.y)));
            },
            onmouseup: on_release,
            "🔍"
        }
    }
}
