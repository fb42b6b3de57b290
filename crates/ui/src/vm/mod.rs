mod completion_vm;
mod lesson_vm;
mod markdown_vm;
mod quiz_vm;
mod scroll_vm;
mod search_vm;
mod time_fmt;

pub use completion_vm::{CompletionVm, completion_vm};
pub use lesson_vm::{LessonHtmlCache, LessonVm, NavItemVm, lesson_vm, nav_items};
pub use markdown_vm::{render_lesson_html, sanitize_html};
pub use quiz_vm::{QuizOptionVm, QuizVm, RevealedAnswer, quiz_vm};
pub use scroll_vm::{
    SCROLL_THROTTLE, ScrollMetrics, ScrollProgressVm, scroll_percent, scroll_progress_vm,
};
pub use search_vm::{PanelCommand, SearchKey, SearchPanelVm, SearchRowVm, is_open_shortcut};
pub use time_fmt::{format_datetime, format_minutes};
