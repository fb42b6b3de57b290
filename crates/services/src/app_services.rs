use std::sync::Arc;

use storage::lessons::LessonStore;
use storage::repository::Storage;
use tutor_core::model::{Courseware, LessonCatalog};

use crate::Clock;
use crate::courseware::builtin_courseware;
use crate::error::AppServicesError;
use crate::preferences_service::PreferencesService;
use crate::progress_service::ProgressService;
use crate::schedule::Scheduler;
use crate::search::{SearchController, SharedIndex, build_index};
use crate::tutorial::TutorialMachine;

/// Assembles the app-facing services around one catalog and lesson store.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    catalog: Arc<LessonCatalog>,
    courseware: Arc<Courseware>,
    lessons: Arc<dyn LessonStore>,
    progress: Arc<ProgressService>,
    preferences: Arc<PreferencesService>,
    index: SharedIndex,
    search: Arc<SearchController>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage. Search scheduling binds to
    /// the calling tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// bundled courseware is invalid.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub async fn new_sqlite(
        db_url: &str,
        lessons: Arc<dyn LessonStore>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, lessons, clock)
    }

    /// Build services over in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the bundled courseware is invalid.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn in_memory(lessons: Arc<dyn LessonStore>, clock: Clock) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), lessons, clock)
    }

    /// # Errors
    ///
    /// Returns `AppServicesError` if the bundled courseware is invalid.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn from_storage(
        storage: Storage,
        lessons: Arc<dyn LessonStore>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let (catalog, courseware) = builtin_courseware()?;
        Ok(Self::with_courseware(storage, lessons, clock, catalog, courseware))
    }

    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn with_courseware(
        storage: Storage,
        lessons: Arc<dyn LessonStore>,
        clock: Clock,
        catalog: LessonCatalog,
        courseware: Courseware,
    ) -> Self {
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&storage.kv),
            catalog.len(),
        ));
        let preferences = Arc::new(PreferencesService::new(Arc::clone(&storage.kv)));
        let index = SharedIndex::new();
        let search = Arc::new(SearchController::new(index.clone(), Scheduler::current()));

        Self {
            clock,
            catalog: Arc::new(catalog),
            courseware: Arc::new(courseware),
            lessons,
            progress,
            preferences,
            index,
            search,
        }
    }

    /// Build the search index and publish it. Returns the number of lessons
    /// indexed.
    pub async fn index_lessons(&self) -> usize {
        let index = build_index(&self.catalog, self.lessons.as_ref()).await;
        let count = index.len();
        if !self.index.publish(index) {
            tracing::debug!("search index already published");
        }
        count
    }

    /// A tutorial machine seeded with persisted progress.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Progress` if stored progress cannot be read.
    pub async fn tutorial(&self) -> Result<TutorialMachine, AppServicesError> {
        let progress = self.progress.load().await?;
        Ok(TutorialMachine::new(
            Arc::clone(&self.catalog),
            Arc::clone(&self.courseware),
            progress,
            self.clock,
        ))
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
    pub fn index(&self) -> SharedIndex {
        self.index.clone()
    }

    #[must_use]
    pub fn search(&self) -> Arc<SearchController> {
        Arc::clone(&self.search)
    }
}
