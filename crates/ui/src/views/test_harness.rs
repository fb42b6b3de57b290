use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{AppServices, Clock, PreferencesService, ProgressService, SearchController};
use storage::lessons::{InMemoryLessonStore, LessonStore};
use storage::repository::Storage;
use tutor_core::model::{
    ButtonPosition, Courseware, Exercise, LessonCatalog, LessonId, Progress, QuestionDraft, Quiz,
    Theme,
};
use tutor_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::{ShellHandle, TutorialAction, TutorialShell};

pub const FIRST_LESSON: &str = "# Getting Started\n\n## Installing Git\nRun `git --version`.\n";
pub const SECOND_LESSON: &str = "# Branching\n\n## Creating a Branch\nUse `git branch`.\n";

#[derive(Clone)]
pub struct TestApp {
    services: AppServices,
    progress: Progress,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn catalog(&self) -> Arc<LessonCatalog> {
        self.services.catalog()
    }

    fn courseware(&self) -> Arc<Courseware> {
        self.services.courseware()
    }

    fn lessons(&self) -> Arc<dyn LessonStore> {
        self.services.lessons()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn preferences(&self) -> Arc<PreferencesService> {
        self.services.preferences()
    }

    fn search(&self) -> Arc<SearchController> {
        self.services.search()
    }

    fn initial_progress(&self) -> Progress {
        self.progress.clone()
    }

    fn initial_theme(&self) -> Theme {
        Theme::Dark
    }

    fn initial_button_position(&self) -> Option<ButtonPosition> {
        None
    }
}

#[derive(Clone, Default)]
pub struct HarnessHandles {
    shell: Rc<RefCell<Option<ShellHandle>>>,
}

impl HarnessHandles {
    pub fn register(&self, shell: ShellHandle) {
        *self.shell.borrow_mut() = Some(shell);
    }

    pub fn shell(&self) -> ShellHandle {
        (*self.shell.borrow()).expect("shell registered")
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: HarnessHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HarnessProps {}

#[component]
fn ShellHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { TutorialShell {} }
}

pub struct ShellTestHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    handles: HarnessHandles,
}

impl ShellTestHarness {
    pub fn send(&mut self, action: TutorialAction) {
        let shell = self.handles.shell();
        self.dom.in_runtime(|| shell.send(action));
        drive_dom(&mut self.dom);
    }

    pub fn with_shell<T>(&self, f: impl FnOnce(ShellHandle) -> T) -> T {
        let shell = self.handles.shell();
        self.dom.in_runtime(|| f(shell))
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn test_courseware() -> (LessonCatalog, Courseware) {
    let catalog = LessonCatalog::new([
        ("Getting Started", "01-getting-started.md"),
        ("Branching", "02-branching.md"),
    ])
    .expect("catalog");
    let question = QuestionDraft {
        prompt: "Which command shows the installed version?".into(),
        options: vec!["git --version".into(), "git init".into()],
        correct: 0,
        explanation: "`--version` prints the version.".into(),
    }
    .validate()
    .expect("question");
    let courseware = Courseware::new()
        .with_quiz(LessonId::new(0), Quiz::new(vec![question]).expect("quiz"))
        .with_exercise(LessonId::new(0), Exercise::new("Run `git --version`."));
    (catalog, courseware)
}

/// A mounted shell over two lessons. `with_second_lesson` controls whether the
/// second lesson's markdown can be fetched.
pub fn setup_shell_harness(progress: Progress, with_second_lesson: bool) -> ShellTestHarness {
    let mut lessons = InMemoryLessonStore::new().with_lesson("01-getting-started.md", FIRST_LESSON);
    if with_second_lesson {
        lessons = lessons.with_lesson("02-branching.md", SECOND_LESSON);
    }
    let storage = Storage::in_memory();
    let (catalog, courseware) = test_courseware();
    let services = AppServices::with_courseware(
        storage.clone(),
        Arc::new(lessons),
        Clock::fixed(fixed_now()),
        catalog,
        courseware,
    );
    let app = Arc::new(TestApp { services, progress });
    let handles = HarnessHandles::default();

    let mut dom = VirtualDom::new_with_props(
        ShellHarness,
        HarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    dom.rebuild_in_place();
    drive_dom(&mut dom);

    ShellTestHarness {
        dom,
        storage,
        handles,
    }
}
