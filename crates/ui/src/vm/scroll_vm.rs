use std::time::Duration;

use serde::Deserialize;

/// Minimum spacing between two scroll-progress recomputations.
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(100);

/// Scroll position of the lesson pane as reported by the webview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct ScrollMetrics {
    pub top: f64,
    pub height: f64,
    pub viewport: f64,
}

/// Progress bar shown while reading.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollProgressVm {
    pub percent: f64,
    pub label: String,
    pub visible: bool,
}

const SHOW_AFTER_PX: f64 = 100.0;

/// Percentage of the scrollable height already passed, within 0..=100.
#[must_use]
pub fn scroll_percent(metrics: ScrollMetrics) -> f64 {
    let scrollable = metrics.height - metrics.viewport;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (metrics.top / scrollable * 100.0).clamp(0.0, 100.0)
}

#[must_use]
pub fn scroll_progress_vm(metrics: ScrollMetrics) -> ScrollProgressVm {
    let percent = scroll_percent(metrics);
    ScrollProgressVm {
        percent,
        label: format!("{}% Scrolled", percent.round()),
        visible: metrics.top > SHOW_AFTER_PX,
    }
}
