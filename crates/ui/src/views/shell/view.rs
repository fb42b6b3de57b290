use std::cell::RefCell;
use std::rc::Rc;

use dioxus::document::eval;
use dioxus::prelude::*;
use services::Throttle;
use services::tutorial::{TutorialMachine, TutorialState};

use crate::context::AppContext;
use crate::views::{
    CompletionView, LessonView, NavBar, NoticeBanner, SearchButton, SearchPanel, WelcomeView,
};
use crate::vm::{SCROLL_THROTTLE, ScrollProgressVm, is_open_shortcut, scroll_progress_vm};

use super::actions::handle_action;
use super::scripts::{
    LESSON_PANE_ID, SEARCH_INPUT_ID, SHELL_ROOT_ID, focus_script, read_scroll_metrics,
    scroll_to_anchor_script,
};
use super::state::{ShellHandle, ShellState, TutorialAction};

#[component]
pub fn TutorialShell() -> Element {
    let ctx = use_context::<AppContext>();

    let machine = {
        let ctx = ctx.clone();
        use_signal(move || {
            TutorialMachine::new(
                ctx.catalog(),
                ctx.courseware(),
                ctx.initial_progress(),
                ctx.clock(),
            )
        })
    };
    let initial_theme = ctx.initial_theme();
    let state = ShellState {
        machine,
        revealed: use_signal(|| None),
        notice: use_signal(|| None),
        search_open: use_signal(|| false),
        theme: use_signal(move || initial_theme),
        scroll: use_signal(ScrollProgressVm::default),
        pending_scroll: use_signal(|| None),
    };

    let dispatch = {
        let ctx = ctx.clone();
        use_callback(move |action: TutorialAction| handle_action(&ctx, state, action))
    };
    let handle = use_context_provider(|| ShellHandle { state, dispatch });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<crate::views::test_harness::HarnessHandles>()
            {
                handles.register(handle);
            }
        }
    }

    use_effect(move || {
        let _ = eval(&focus_script(SHELL_ROOT_ID));
    });

    let mut pending_scroll = state.pending_scroll;
    use_effect(move || {
        let request = pending_scroll.read().clone();
        if let Some(request) = request {
            pending_scroll.set(None);
            let _ = eval(&scroll_to_anchor_script(request.anchor.as_deref()));
        }
    });

    let search_open = state.search_open;
    use_effect(move || {
        if search_open() {
            let _ = eval(&focus_script(SEARCH_INPUT_ID));
        }
    });

    let throttle = use_hook(|| Rc::new(RefCell::new(Throttle::new(SCROLL_THROTTLE))));
    let on_scroll = move |_evt: ScrollEvent| {
        if !throttle.borrow_mut().ready() {
            return;
        }
        let mut scroll = state.scroll;
        spawn(async move {
            if let Some(metrics) = read_scroll_metrics().await {
                scroll.set(scroll_progress_vm(metrics));
            }
        });
    };

    let on_key = move |evt: KeyboardEvent| {
        let modifiers = evt.data.modifiers();
        if let Key::Character(value) = evt.data.key()
            && is_open_shortcut(
                &value,
                modifiers.contains(Modifiers::CONTROL),
                modifiers.contains(Modifiers::META),
            )
        {
            evt.prevent_default();
            handle.send(TutorialAction::OpenSearch);
        }
    };

    let theme = (state.theme)();
    let machine_read = machine.read();
    let screen = match machine_read.state() {
        TutorialState::Welcome => rsx! { WelcomeView {} },
        TutorialState::Lesson(_) => rsx! { LessonView {} },
        TutorialState::Completion(stats) => rsx! { CompletionView { stats: *stats } },
    };

    rsx! {
        div {
            id: SHELL_ROOT_ID,
            class: "tutorial-shell",
            "data-theme": theme.as_str(),
            tabindex: "0",
            onkeydown: on_key,
            NavBar {}
            main {
                id: LESSON_PANE_ID,
                class: "lesson-pane",
                onscroll: on_scroll,
                {screen}
            }
            if search_open() {
                SearchPanel {}
            }
            SearchButton {}
            NoticeBanner {}
        }
    }
}
