use chrono::{DateTime, Utc};
use services::tutorial::CompletionStats;

use super::time_fmt::{format_datetime, format_minutes};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    pub quiz_score: String,
    pub time_spent: String,
    pub exercises: String,
    pub completed_on: Option<String>,
}

#[must_use]
pub fn completion_vm(
    stats: &CompletionStats,
    completed_at: Option<DateTime<Utc>>,
) -> CompletionVm {
    CompletionVm {
        quiz_score: format!("{}%", stats.mean_quiz_score),
        time_spent: format_minutes(stats.elapsed_minutes),
        exercises: format!("{} / {}", stats.completed_exercises, stats.lesson_count),
        completed_on: completed_at.map(format_datetime),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::time::fixed_now;

    #[test]
    fn formats_stats() {
        let stats = CompletionStats {
            mean_quiz_score: 83,
            elapsed_minutes: 1,
            completed_exercises: 4,
            lesson_count: 6,
        };
        let vm = completion_vm(&stats, Some(fixed_now()));
        assert_eq!(vm.quiz_score, "83%");
        assert_eq!(vm.time_spent, "1 minute");
        assert_eq!(vm.exercises, "4 / 6");
        assert_eq!(vm.completed_on.as_deref(), Some("2023-11-14 22:13 UTC"));
    }
}
