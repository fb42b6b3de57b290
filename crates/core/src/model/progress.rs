use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::LessonId;

/// Schema version written by this build.
pub const PROGRESS_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("quiz score {0} is outside 0..=100")]
    ScoreOutOfRange(u32),

    #[error("unsupported progress schema version {found}")]
    UnsupportedVersion { found: u32 },
}

/// Percentage of correct answers for one quiz run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizScore(u8);

impl QuizScore {
    /// # Errors
    ///
    /// Returns `ProgressError::ScoreOutOfRange` above 100.
    pub fn new(value: u8) -> Result<Self, ProgressError> {
        if value > 100 {
            return Err(ProgressError::ScoreOutOfRange(u32::from(value)));
        }
        Ok(Self(value))
    }

    /// `round(correct / total * 100)`, rounding halves up. Zero when `total` is zero.
    #[must_use]
    pub fn from_ratio(correct: usize, total: usize) -> Self {
        if total == 0 {
            return Self(0);
        }
        let correct = correct.min(total);
        let percent = rounded_div(correct * 100, total);
        Self(u8::try_from(percent).unwrap_or(100))
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }
}

fn rounded_div(numerator: usize, denominator: usize) -> usize {
    (numerator * 2 + denominator) / (denominator * 2)
}

/// Persisted shape of the progress record.
///
/// Every field is optional so older or hand-edited payloads still load;
/// `Progress::from_record` fills the gaps with defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub current_lesson: Option<usize>,
    #[serde(default)]
    pub quiz_scores: BTreeMap<usize, u32>,
    #[serde(default)]
    pub completed_exercises: BTreeMap<usize, bool>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Learner progress across sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    current_lesson: LessonId,
    quiz_scores: BTreeMap<LessonId, QuizScore>,
    completed_exercises: BTreeMap<LessonId, bool>,
    completed_at: Option<DateTime<Utc>>,
}

impl Progress {
    /// The empty initial record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from the persisted shape, dropping entries that do not fit
    /// a catalog of `lesson_count` lessons.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnsupportedVersion` for records written by a
    /// newer schema.
    pub fn from_record(record: ProgressRecord, lesson_count: usize) -> Result<Self, ProgressError> {
        let version = record.version.unwrap_or(PROGRESS_SCHEMA_VERSION);
        if version > PROGRESS_SCHEMA_VERSION {
            return Err(ProgressError::UnsupportedVersion { found: version });
        }

        let in_range = |index: &usize| *index < lesson_count;

        let current_lesson = record
            .current_lesson
            .filter(in_range)
            .map_or_else(LessonId::default, LessonId::new);

        let quiz_scores = record
            .quiz_scores
            .into_iter()
            .filter(|(index, _)| in_range(index))
            .filter_map(|(index, score)| {
                let score = u8::try_from(score).ok()?;
                QuizScore::new(score).ok().map(|s| (LessonId::new(index), s))
            })
            .collect();

        let completed_exercises = record
            .completed_exercises
            .into_iter()
            .filter(|(index, _)| in_range(index))
            .map(|(index, done)| (LessonId::new(index), done))
            .collect();

        Ok(Self {
            current_lesson,
            quiz_scores,
            completed_exercises,
            completed_at: record.completed_at,
        })
    }

    #[must_use]
    pub fn to_record(&self) -> ProgressRecord {
        ProgressRecord {
            version: Some(PROGRESS_SCHEMA_VERSION),
            current_lesson: Some(self.current_lesson.value()),
            quiz_scores: self
                .quiz_scores
                .iter()
                .map(|(id, score)| (id.value(), u32::from(score.value())))
                .collect(),
            completed_exercises: self
                .completed_exercises
                .iter()
                .map(|(id, done)| (id.value(), *done))
                .collect(),
            completed_at: self.completed_at,
        }
    }

    #[must_use]
    pub fn current_lesson(&self) -> LessonId {
        self.current_lesson
    }

    /// Returns `true` when the value changed.
    pub fn set_current_lesson(&mut self, id: LessonId) -> bool {
        let changed = self.current_lesson != id;
        self.current_lesson = id;
        changed
    }

    #[must_use]
    pub fn quiz_score(&self, id: LessonId) -> Option<QuizScore> {
        self.quiz_scores.get(&id).copied()
    }

    pub fn quiz_scores(&self) -> impl Iterator<Item = (LessonId, QuizScore)> + '_ {
        self.quiz_scores.iter().map(|(id, score)| (*id, *score))
    }

    /// Store the score for a finished quiz, replacing any earlier attempt.
    pub fn record_quiz_score(&mut self, id: LessonId, score: QuizScore) {
        self.quiz_scores.insert(id, score);
    }

    #[must_use]
    pub fn is_exercise_complete(&self, id: LessonId) -> bool {
        self.completed_exercises.get(&id).copied().unwrap_or(false)
    }

    /// Returns `true` the first time an exercise is completed.
    pub fn complete_exercise(&mut self, id: LessonId) -> bool {
        if self.is_exercise_complete(id) {
            return false;
        }
        self.completed_exercises.insert(id, true);
        true
    }

    #[must_use]
    pub fn completed_exercise_count(&self) -> usize {
        self.completed_exercises.values().filter(|done| **done).count()
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.completed_at = Some(at);
    }

    /// Rounded mean of all recorded quiz scores; zero when none are recorded.
    #[must_use]
    pub fn mean_quiz_score(&self) -> u8 {
        let count = self.quiz_scores.len();
        if count == 0 {
            return 0;
        }
        let sum: usize = self
            .quiz_scores
            .values()
            .map(|score| usize::from(score.value()))
            .sum();
        u8::try_from(rounded_div(sum, count)).unwrap_or(100)
    }
}
