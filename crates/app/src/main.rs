use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, Clock, HttpLessonStore, PreferencesService, ProgressService, SearchController,
};
use storage::lessons::{FsLessonStore, LessonStore};
use tutor_core::model::{ButtonPosition, Courseware, LessonCatalog, Progress, Theme};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingQuery,
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidLessonsUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingQuery => write!(f, "search requires a query"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidLessonsUrl { raw } => {
                write!(f, "invalid --lessons-url value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

/// Where lesson markdown comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LessonSourceArg {
    Dir(PathBuf),
    Url(String),
}

impl LessonSourceArg {
    fn into_store(self) -> Arc<dyn LessonStore> {
        match self {
            LessonSourceArg::Dir(dir) => Arc::new(FsLessonStore::new(dir)),
            LessonSourceArg::Url(url) => Arc::new(HttpLessonStore::new(url)),
        }
    }
}

impl fmt::Display for LessonSourceArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LessonSourceArg::Dir(dir) => write!(f, "{}", dir.display()),
            LessonSourceArg::Url(url) => f.write_str(url),
        }
    }
}

struct DesktopApp {
    services: AppServices,
    progress: Progress,
    theme: Theme,
    button_position: Option<ButtonPosition>,
}

impl UiApp for DesktopApp {
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
        self.theme
    }

    fn initial_button_position(&self) -> Option<ButtonPosition> {
        self.button_position
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    lessons: LessonSourceArg,
    query: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui     [--db <sqlite_url>] [--lessons <dir>] [--lessons-url <base>]");
    eprintln!("  cargo run -p app -- index  [--lessons <dir>] [--lessons-url <base>]");
    eprintln!("  cargo run -p app -- search <query> [--lessons <dir>] [--lessons-url <base>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://tutor.sqlite3");
    eprintln!("  --lessons tutorial");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTOR_DB_URL, TUTOR_LESSONS_DIR, TUTOR_LESSONS_URL, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Index,
    Search,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "index" => Some(Self::Index),
            "search" => Some(Self::Search),
            _ => None,
        }
    }
}

impl Args {
    fn parse(
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env("TUTOR_DB_URL")
            .map_or_else(|| "sqlite://tutor.sqlite3".into(), normalize_sqlite_url);
        let mut lessons = match env("TUTOR_LESSONS_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => LessonSourceArg::Url(url),
            None => LessonSourceArg::Dir(
                env("TUTOR_LESSONS_DIR").map_or_else(|| PathBuf::from("tutorial"), PathBuf::from),
            ),
        };
        let mut query = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" if cmd == Command::Ui => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--lessons" => {
                    lessons = LessonSourceArg::Dir(PathBuf::from(require_value(args, "--lessons")?));
                }
                "--lessons-url" => {
                    let value = require_value(args, "--lessons-url")?;
                    if !(value.starts_with("http://") || value.starts_with("https://")) {
                        return Err(ArgsError::InvalidLessonsUrl { raw: value });
                    }
                    lessons = LessonSourceArg::Url(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if cmd == Command::Search && query.is_none() && !arg.starts_with("--") => {
                    query = Some(arg);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if cmd == Command::Search && query.is_none() {
            return Err(ArgsError::MissingQuery);
        }

        Ok(Self {
            db_url,
            lessons,
            query,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Launch the UI when no subcommand is given.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    tracing::info!(command = ?cmd, lessons = %parsed.lessons, "starting");
    let clock = Clock::default_clock();
    let lessons = parsed.lessons.into_store();

    match cmd {
        Command::Ui => {
            // SQLite setup stays in the binary glue so services never touch the filesystem.
            prepare_sqlite_file(&parsed.db_url)?;
            let services = AppServices::new_sqlite(&parsed.db_url, lessons, clock).await?;

            let progress = services.progress().load().await?;
            let preferences = services.preferences();
            let theme = preferences.theme().await?;
            let button_position = preferences.button_position().await?;

            let indexer = services.clone();
            tokio::spawn(async move {
                indexer.index_lessons().await;
            });

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                services,
                progress,
                theme,
                button_position,
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Git Tiny Tutorial")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Index => {
            let services = AppServices::in_memory(lessons, clock)?;
            let indexed = services.index_lessons().await;
            let sections = services.index().get().map_or(0, |index| index.section_count());
            println!(
                "indexed {indexed} of {} lessons ({sections} sections)",
                services.catalog().len()
            );
            Ok(())
        }
        Command::Search => {
            let services = AppServices::in_memory(lessons, clock)?;
            services.index_lessons().await;
            let query = parsed.query.unwrap_or_default();
            let state = services.search().search_now(&query);
            println!("{}", serde_json::to_string_pretty(&state.results)?);
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
