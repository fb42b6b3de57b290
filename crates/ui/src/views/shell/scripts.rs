use dioxus::document::eval;

use crate::vm::ScrollMetrics;

pub(crate) const LESSON_PANE_ID: &str = "lesson-pane";
pub(crate) const SEARCH_INPUT_ID: &str = "search-input";
pub(crate) const SHELL_ROOT_ID: &str = "tutorial-shell";

const SCROLL_METRICS_SCRIPT: &str = r#"
    const pane = document.getElementById("lesson-pane");
    if (!pane) { return { top: 0, height: 0, viewport: 0 }; }
    return { top: pane.scrollTop, height: pane.scrollHeight, viewport: pane.clientHeight };
"#;

pub(super) fn scroll_to_anchor_script(anchor: Option<&str>) -> String {
    let anchor = anchor.unwrap_or_default();
    format!(
        r#"requestAnimationFrame(function() {{
            const pane = document.getElementById({LESSON_PANE_ID:?});
            const target = {anchor:?} ? document.getElementById({anchor:?}) : null;
            if (target) {{
                target.scrollIntoView({{ behavior: "smooth", block: "start" }});
            }} else if (pane) {{
                pane.scrollTo({{ top: 0 }});
            }}
        }});"#
    )
}

pub(super) fn focus_script(element_id: &str) -> String {
    format!("document.getElementById({element_id:?})?.focus();")
}

pub(crate) async fn read_scroll_metrics() -> Option<ScrollMetrics> {
    eval(SCROLL_METRICS_SCRIPT)
        .join::<ScrollMetrics>()
        .await
        .ok()
}
