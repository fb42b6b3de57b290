#![forbid(unsafe_code)]

pub mod app_services;
pub mod courseware;
pub mod error;
pub mod http_lessons;
pub mod preferences_service;
pub mod progress_service;
pub mod schedule;
pub mod search;
pub mod tutorial;

pub use tutor_core::Clock;

pub use app_services::AppServices;
pub use courseware::builtin_courseware;
pub use error::{
    AppServicesError, CoursewareLoadError, PreferencesError, ProgressServiceError, TutorialError,
};
pub use http_lessons::HttpLessonStore;
pub use preferences_service::PreferencesService;
pub use progress_service::{ProgressService, QueuedSave};
pub use schedule::{Debouncer, Scheduler, TaskToken, Throttle};
pub use search::{
    MatchKind, SearchController, SearchIndex, SearchIndexEntry, SearchResult, SearchState,
    SharedIndex,
};
pub use tutorial::{CompletionStats, LessonRequest, TutorialMachine, TutorialState};
