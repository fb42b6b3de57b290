use std::sync::Arc;

use services::{Clock, PreferencesService, ProgressService, SearchController};
use storage::lessons::LessonStore;
use tutor_core::model::{ButtonPosition, Courseware, LessonCatalog, Progress, Theme};

/// Everything the UI needs from the composition root (`crates/app`).
pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn catalog(&self) -> Arc<LessonCatalog>;
    fn courseware(&self) -> Arc<Courseware>;
    fn lessons(&self) -> Arc<dyn LessonStore>;
    fn progress(&self) -> Arc<ProgressService>;
    fn preferences(&self) -> Arc<PreferencesService>;
    fn search(&self) -> Arc<SearchController>;

    /// Progress loaded before launch.
    fn initial_progress(&self) -> Progress;
    fn initial_theme(&self) -> Theme;
    fn initial_button_position(&self) -> Option<ButtonPosition>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    catalog: Arc<LessonCatalog>,
    courseware: Arc<Courseware>,
    lessons: Arc<dyn LessonStore>,
    progress: Arc<ProgressService>,
    preferences: Arc<PreferencesService>,
    search: Arc<SearchController>,
    initial_progress: Progress,
    initial_theme: Theme,
    initial_button_position: Option<ButtonPosition>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            catalog: app.catalog(),
            courseware: app.courseware(),
            lessons: app.lessons(),
            progress: app.progress(),
            preferences: app.preferences(),
            search: app.search(),
            initial_progress: app.initial_progress(),
            initial_theme: app.initial_theme(),
            initial_button_position: app.initial_button_position(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<LessonCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn courseware(&self) -> Arc<Courseware> {
        Arc::clone(&self.courseware)
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<dyn LessonStore> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences)
    }

    #[must_use]
    pub fn search(&self) -> Arc<SearchController> {
        Arc::clone(&self.search)
    }

    #[must_use]
    pub fn initial_progress(&self) -> Progress {
        self.initial_progress.clone()
    }

    #[must_use]
    pub fn initial_theme(&self) -> Theme {
        self.initial_theme
    }

    #[must_use]
    pub fn initial_button_position(&self) -> Option<ButtonPosition> {
        self.initial_button_position
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
