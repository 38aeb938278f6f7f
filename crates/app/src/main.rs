use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::QuizSettings;
use services::{Clock, DirectoryImageProvider, QuizLoopService};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidQuestions { raw: String },
    InvalidShapes { raw: String },
    InvalidAssetsDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidQuestions { raw } => {
                write!(f, "invalid --questions value: {raw}")
            }
            ArgsError::InvalidShapes { raw } => write!(f, "invalid --shapes value: {raw}"),
            ArgsError::InvalidAssetsDir { raw } => write!(f, "invalid --assets value: {raw}"),
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

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

struct Args {
    assets_dir: PathBuf,
    settings: QuizSettings,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--assets <dir>] [--questions <n>] [--shapes <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --assets .            (expects shape1.jpg .. shape<n>.jpg)");
    eprintln!(
        "  --questions {}",
        QuizSettings::DEFAULT_TOTAL_QUESTIONS
    );
    eprintln!("  --shapes {}", QuizSettings::DEFAULT_SHAPE_COUNT);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_ASSETS_DIR, QUIZ_QUESTIONS, QUIZ_SHAPES");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut assets_dir = std::env::var("QUIZ_ASSETS_DIR")
            .ok()
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        let mut total_questions = std::env::var("QUIZ_QUESTIONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(QuizSettings::DEFAULT_TOTAL_QUESTIONS);
        let mut shape_count = std::env::var("QUIZ_SHAPES")
            .ok()
            .and_then(|value| value.parse::<u8>().ok())
            .unwrap_or(QuizSettings::DEFAULT_SHAPE_COUNT);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--assets" => {
                    let value = require_value(args, "--assets")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidAssetsDir { raw: value });
                    }
                    assets_dir = PathBuf::from(value);
                }
                "--questions" => {
                    let value = require_value(args, "--questions")?;
                    total_questions = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidQuestions { raw: value.clone() })?;
                }
                "--shapes" => {
                    let value = require_value(args, "--shapes")?;
                    shape_count = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidShapes { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let settings = QuizSettings::new(total_questions, shape_count).map_err(|_| {
            ArgsError::InvalidShapes {
                raw: shape_count.to_string(),
            }
        })?;

        Ok(Self {
            assets_dir,
            settings,
        })
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Verify every shape image up front so a missing asset fails the launch,
    // not the twentieth question.
    let provider = DirectoryImageProvider::new(parsed.assets_dir, parsed.settings.shape_count());
    provider.scan()?;

    let quiz_loop = Arc::new(QuizLoopService::new(
        Clock::default_clock(),
        parsed.settings,
        Arc::new(provider),
    ));
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_loop });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Pentatonic Shapes Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
