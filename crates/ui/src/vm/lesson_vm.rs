use services::tutorial::{LoadedLesson, TutorialMachine, TutorialState};
use tutor_core::model::LessonId;

use super::markdown_vm::render_lesson_html;

/// Sidebar entry for one lesson.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItemVm {
    pub lesson: LessonId,
    pub label: String,
    pub active: bool,
    pub quiz_score: Option<u8>,
    pub exercise_done: bool,
}

#[must_use]
pub fn nav_items(machine: &TutorialMachine) -> Vec<NavItemVm> {
    let active = machine.state().lesson();
    let progress = machine.progress();
    machine
        .catalog()
        .iter()
        .map(|lesson| NavItemVm {
            lesson: lesson.id(),
            label: format!("{}. {}", lesson.id().number(), lesson.title()),
            active: active == Some(lesson.id()),
            quiz_score: progress.quiz_score(lesson.id()).map(|s| s.value()),
            exercise_done: progress.is_exercise_complete(lesson.id()),
        })
        .collect()
}

/// What the lesson screen shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub lesson: LessonId,
    pub title: String,
    pub position_label: String,
    pub has_previous: bool,
    pub next_label: &'static str,
    pub content_html: Option<String>,
    pub anchor: Option<String>,
    pub exercise_html: Option<String>,
    pub exercise_done: bool,
}

/// Rendered HTML of the loaded lesson, reused until a new load arrives.
#[derive(Debug, Default)]
pub struct LessonHtmlCache {
    key: Option<(LessonId, u64)>,
    content: String,
    exercise: Option<String>,
    renders: usize,
}

impl LessonHtmlCache {
    fn html_for(&mut self, loaded: &LoadedLesson) -> (String, Option<String>) {
        let key = (loaded.lesson, loaded.generation());
        if self.key != Some(key) {
            self.content = render_lesson_html(&loaded.markdown);
            self.exercise = loaded
                .exercise
                .as_ref()
                .map(|exercise| render_lesson_html(exercise.markdown()));
            self.key = Some(key);
            self.renders += 1;
        }
        (self.content.clone(), self.exercise.clone())
    }

    /// How many loads have been rendered.
    #[must_use]
    pub fn renders(&self) -> usize {
        self.renders
    }
}

/// `None` outside the lesson screen.
#[must_use]
pub fn lesson_vm(machine: &TutorialMachine, cache: &mut LessonHtmlCache) -> Option<LessonVm> {
    let TutorialState::Lesson(lesson) = machine.state() else {
        return None;
    };
    let lesson = *lesson;
    let catalog = machine.catalog();
    let title = catalog
        .get(lesson)
        .map(|l| l.title().to_string())
        .unwrap_or_default();
    let loaded = machine.loaded().filter(|loaded| loaded.lesson == lesson);
    let (content_html, exercise_html) = match loaded {
        Some(loaded) => {
            let (content, exercise) = cache.html_for(loaded);
            (Some(content), exercise)
        }
        None => (None, None),
    };

    Some(LessonVm {
        lesson,
        title,
        position_label: format!("Lesson {} of {}", lesson.number(), catalog.len()),
        has_previous: catalog.previous_before(lesson).is_some(),
        next_label: if catalog.is_last(lesson) {
            "Complete"
        } else {
            "Next →"
        },
        content_html,
        anchor: loaded.and_then(|l| l.anchor.clone()),
        exercise_html,
        exercise_done: machine.progress().is_exercise_complete(lesson),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tutor_core::model::{Courseware, Exercise, LessonCatalog, Progress};
    use tutor_core::time::fixed_clock;

    fn machine() -> TutorialMachine {
        let catalog = LessonCatalog::new([("Basics", "01.md"), ("Branches", "02.md")]).unwrap();
        let courseware =
            Courseware::new().with_exercise(LessonId::new(1), Exercise::new("Run `git branch`"));
        TutorialMachine::new(
            Arc::new(catalog),
            Arc::new(courseware),
            Progress::new(),
            fixed_clock(),
        )
    }

    #[test]
    fn welcome_has_no_lesson_vm() {
        assert!(lesson_vm(&machine(), &mut LessonHtmlCache::default()).is_none());
    }

    #[test]
    fn last_lesson_offers_completion() {
        let mut m = machine();
        let mut cache = LessonHtmlCache::default();
        let request = m.navigate(LessonId::new(1), Some("setup".into())).unwrap().request.unwrap();
        assert!(lesson_vm(&m, &mut cache).unwrap().content_html.is_none());

        m.complete_load(&request, "# Branches\n\n## Setup\ntext".into());
        let vm = lesson_vm(&m, &mut cache).unwrap();
        assert_eq!(vm.position_label, "Lesson 2 of 2");
        assert_eq!(vm.next_label, "Complete");
        assert!(vm.has_previous);
        assert_eq!(vm.anchor.as_deref(), Some("setup"));
        assert!(vm.content_html.unwrap().contains(r#"id="setup""#));
        assert!(vm.exercise_html.unwrap().contains("<code>git branch</code>"));
    }

    #[test]
    fn nav_marks_active_lesson() {
        let mut m = machine();
        let _ = m.start();
        let items = nav_items(&m);
        assert_eq!(items[0].label, "1. Basics");
        assert!(items[0].active);
        assert!(!items[1].active);
    }

    #[test]
    fn html_is_rendered_once_per_load() {
        let mut m = machine();
        let mut cache = LessonHtmlCache::default();
        let request = m.navigate(LessonId::new(1), None).unwrap().request.unwrap();
        m.complete_load(&request, "# Branches\ntext".into());

        let first = lesson_vm(&m, &mut cache).unwrap();
        m.complete_exercise().unwrap();
        let second = lesson_vm(&m, &mut cache).unwrap();
        assert_eq!(cache.renders(), 1);
        assert_eq!(first.content_html, second.content_html);
        assert!(second.exercise_done);

        let request = m.navigate(LessonId::new(1), None).unwrap().request.unwrap();
        m.complete_load(&request, "# Branches again\ntext".into());
        let reloaded = lesson_vm(&m, &mut cache).unwrap();
        assert_eq!(cache.renders(), 2);
        assert!(reloaded.content_html.unwrap().contains("branches-again"));
    }
}
