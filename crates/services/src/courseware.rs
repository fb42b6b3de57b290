use tutor_core::model::{Courseware, CoursewareDraft, LessonCatalog};

use crate::error::CoursewareLoadError;

const GIT_TUTORIAL: &str = include_str!("../assets/git_tutorial.json");

/// The bundled six-lesson Git tutorial: catalog, quizzes and exercises.
///
/// # Errors
///
/// Returns `CoursewareLoadError` if the bundled asset is malformed.
pub fn builtin_courseware() -> Result<(LessonCatalog, Courseware), CoursewareLoadError> {
    parse_courseware(GIT_TUTORIAL)
}

/// Parse a courseware JSON document (`{"lessons": [...]}`).
///
/// # Errors
///
/// Returns `CoursewareLoadError` for invalid JSON or invalid lesson data.
pub fn parse_courseware(json: &str) -> Result<(LessonCatalog, Courseware), CoursewareLoadError> {
    let draft: CoursewareDraft = serde_json::from_str(json)?;
    Ok(draft.validate()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::model::LessonId;

    #[test]
    fn builtin_tutorial_has_six_lessons_with_quizzes() {
        let (catalog, courseware) = builtin_courseware().unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(
            catalog.get(LessonId::new(0)).unwrap().source().as_str(),
            "01-git-basics.md"
        );
        for lesson in &catalog {
            let quiz = courseware.quiz_for(lesson.id()).unwrap();
            assert_eq!(quiz.len(), 4);
            assert!(courseware.exercise_for(lesson.id()).is_some());
        }
    }

    #[test]
    fn invalid_courseware_is_rejected() {
        assert!(matches!(
            parse_courseware(r#"{"lessons":[]}"#),
            Err(CoursewareLoadError::Invalid(_))
        ));
        assert!(matches!(
            parse_courseware("nope"),
            Err(CoursewareLoadError::Json(_))
        ));
    }
}
