use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal identifier of a lesson within the catalog (zero-based).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(usize);

impl LessonId {
    /// Creates a new `LessonId`
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying zero-based index
    #[must_use]
    pub const fn value(&self) -> usize {
        self.0
    }

    /// One-based lesson number used in headings ("Lesson 3").
    #[must_use]
    pub const fn number(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Debug for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonId({})", self.0)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for LessonId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map(LessonId::new)
            .map_err(|_| ParseIdError {
                kind: "LessonId".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_id_display() {
        let id = LessonId::new(4);
        assert_eq!(id.to_string(), "4");
        assert_eq!(id.number(), 5);
    }

    #[test]
    fn test_lesson_id_from_str() {
        let id: LessonId = " 2 ".parse().unwrap();
        assert_eq!(id, LessonId::new(2));
    }

    #[test]
    fn test_lesson_id_from_str_invalid() {
        let result = "second".parse::<LessonId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_lesson_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&LessonId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
