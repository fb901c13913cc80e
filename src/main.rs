// lessonkit - terminal viewer for tutorial lessons
//
// Loads one lesson, then either opens the interactive viewer (reveal panels,
// copy buttons) or prints the lesson as plain text in headless mode.

use anyhow::{Context, Result};
use clap::Parser;
use lessonkit::cli::{self, Cli};
use lessonkit::clipboard::SystemClipboard;
use lessonkit::config::{Config, LogRotation};
use lessonkit::lesson::Lesson;
use lessonkit::logging::{CaptureLayer, LogBuffer};
use lessonkit::tui::{self, app::LessonView};
use lessonkit::{plain, widgets::DisclosureController};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Line width for headless output
const PLAIN_WIDTH: usize = 80;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle subcommands first (config --show, --reset, --path)
    if cli::handle_command(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if cli.no_tui {
        config.enable_tui = false;
    }
    if cli.lesson.is_some() {
        config.lesson = cli.lesson.clone();
    }

    let log_buffer = LogBuffer::new();
    let _file_guard = init_logging(&config, &log_buffer);

    let lesson = match &config.lesson {
        Some(path) => Lesson::load(path)?,
        None => Lesson::bundled()?,
    };
    tracing::info!(
        blocks = lesson.blocks.len(),
        interactive = lesson.interactive_blocks().len(),
        "Loaded lesson '{}'",
        lesson.title
    );

    if !config.enable_tui {
        print!("{}", plain::render(&lesson, &DisclosureController::new(), PLAIN_WIDTH));
        return Ok(());
    }

    let view = LessonView::new(lesson, SystemClipboard::new(), config.confirmation_window());
    tui::run_tui(view, log_buffer, &config)
        .await
        .context("Lesson viewer failed")
}

/// Initialize tracing
///
/// In TUI mode logs are captured to the buffer (stderr would garble the
/// display); in headless mode they go to stderr. File logging is added on top
/// when enabled. The returned guard must live until exit so the file flushes.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_logging(config: &Config, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("lessonkit={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let dir = &config.logging.file_dir;
                let prefix = &config.logging.file_prefix;
                let appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
                    LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
                };
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if config.enable_tui {
        registry.with(CaptureLayer::new(log_buffer.clone())).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    guard
}
