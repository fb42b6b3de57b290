/// Failures the UI reports to the learner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    LessonUnavailable,
    SaveFailed,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::LessonUnavailable => {
                "Could not load this lesson. Check your connection and try again."
            }
            ViewError::SaveFailed => "Your progress could not be saved.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}
