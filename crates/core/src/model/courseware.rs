use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{LessonCatalog, LessonError, LessonId, QuestionDraft, Quiz, QuizError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoursewareError {
    #[error(transparent)]
    Lesson(#[from] LessonError),

    #[error("lesson {lesson}, question {question}: {source}")]
    Question {
        lesson: usize,
        question: usize,
        #[source]
        source: QuizError,
    },
}

/// Practice instructions shown under a lesson, as markdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exercise {
    markdown: String,
}

impl Exercise {
    #[must_use]
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
        }
    }

    #[must_use]
    pub fn markdown(&self) -> &str {
        &self.markdown
    }
}

/// Quizzes and exercises keyed by lesson.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Courseware {
    quizzes: BTreeMap<LessonId, Quiz>,
    exercises: BTreeMap<LessonId, Exercise>,
}

impl Courseware {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quiz(mut self, lesson: LessonId, quiz: Quiz) -> Self {
        self.quizzes.insert(lesson, quiz);
        self
    }

    #[must_use]
    pub fn with_exercise(mut self, lesson: LessonId, exercise: Exercise) -> Self {
        self.exercises.insert(lesson, exercise);
        self
    }

    #[must_use]
    pub fn quiz_for(&self, lesson: LessonId) -> Option<&Quiz> {
        self.quizzes.get(&lesson)
    }

    #[must_use]
    pub fn exercise_for(&self, lesson: LessonId) -> Option<&Exercise> {
        self.exercises.get(&lesson)
    }
}

/// One lesson entry in a courseware file.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LessonDraft {
    pub title: String,
    pub source: String,
    #[serde(default)]
    pub quiz: Vec<QuestionDraft>,
    #[serde(default)]
    pub exercise: Option<String>,
}

/// Unvalidated courseware file: the catalog plus per-lesson extras.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CoursewareDraft {
    pub lessons: Vec<LessonDraft>,
}

impl CoursewareDraft {
    /// Validate into a lesson catalog and its courseware.
    ///
    /// # Errors
    ///
    /// Returns `CoursewareError` if the catalog is empty or a question is invalid.
    pub fn validate(self) -> Result<(LessonCatalog, Courseware), CoursewareError> {
        let catalog = LessonCatalog::new(
            self.lessons
                .iter()
                .map(|lesson| (lesson.title.clone(), lesson.source.clone())),
        )?;

        let mut courseware = Courseware::new();
        for (index, lesson) in self.lessons.into_iter().enumerate() {
            let id = LessonId::new(index);

            if !lesson.quiz.is_empty() {
                let questions = lesson
                    .quiz
                    .into_iter()
                    .enumerate()
                    .map(|(question, draft)| {
                        draft.validate().map_err(|source| CoursewareError::Question {
                            lesson: index,
                            question,
                            source,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let quiz = Quiz::new(questions).map_err(|source| CoursewareError::Question {
                    lesson: index,
                    question: 0,
                    source,
                })?;
                courseware = courseware.with_quiz(id, quiz);
            }

            if let Some(markdown) = lesson.exercise.filter(|text| !text.trim().is_empty()) {
                courseware = courseware.with_exercise(id, Exercise::new(markdown));
            }
        }

        Ok((catalog, courseware))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_catalog_quizzes_and_exercises() {
        let draft: CoursewareDraft = serde_json::from_str(
            r#"{
                "lessons": [
                    {
                        "title": "Basics",
                        "source": "01.md",
                        "quiz": [
                            {"prompt": "Q?", "options": ["a", "b"], "correct": 1, "explanation": "b"}
                        ],
                        "exercise": "Run `git init`."
                    },
                    {"title": "Next", "source": "02.md"}
                ]
            }"#,
        )
        .unwrap();

        let (catalog, courseware) = draft.validate().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(courseware.quiz_for(LessonId::new(0)).unwrap().len(), 1);
        assert!(courseware.quiz_for(LessonId::new(1)).is_none());
        assert_eq!(
            courseware.exercise_for(LessonId::new(0)).unwrap().markdown(),
            "Run `git init`."
        );
        assert!(courseware.exercise_for(LessonId::new(1)).is_none());
    }

    #[test]
    fn reports_the_offending_question() {
        let draft = CoursewareDraft {
            lessons: vec![LessonDraft {
                title: "Basics".into(),
                source: "01.md".into(),
                quiz: vec![QuestionDraft {
                    prompt: "Q?".into(),
                    options: vec!["a".into(), "b".into()],
                    correct: 5,
                    explanation: String::new(),
                }],
                exercise: None,
            }],
        };

        let err = draft.validate().unwrap_err();
        assert!(matches!(
            err,
            CoursewareError::Question {
                lesson: 0,
                question: 0,
                ..
            }
        ));
    }
}
