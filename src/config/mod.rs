//! Configuration for the lesson viewer
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/lessonkit/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::widgets::DEFAULT_CONFIRMATION;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod serialization;


pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default "Copied!" confirmation window
pub const DEFAULT_CONFIRMATION_MS: u64 = DEFAULT_CONFIRMATION.as_millis() as u64;

/// Default redraw interval for the TUI
pub const DEFAULT_TICK_MS: u64 = 200;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Lesson file to open when none is given on the command line
    /// (None = bundled lesson)
    pub lesson: Option<PathBuf>,

    /// Whether to enable the TUI (can be disabled for plain-text output)
    pub enable_tui: bool,

    /// How long a snippet shows "Copied!" after a successful copy.
    /// Same for every snippet.
    pub confirmation_ms: u64,

    /// Redraw interval in milliseconds
    pub tick_ms: u64,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lesson: None,
            enable_tui: true,
            confirmation_ms: DEFAULT_CONFIRMATION_MS,
            tick_ms: DEFAULT_TICK_MS,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn confirmation_window(&self) -> Duration {
        Duration::from_millis(self.confirmation_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub lesson: Option<String>,
    pub confirmation_ms: Option<u64>,
    pub tick_ms: Option<u64>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/lessonkit/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("lessonkit").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Write config (ignore errors - config is optional)
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// Exits the process if the file exists but cannot be parsed: a broken
    /// config should fail fast, not silently fall back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, run `lessonkit config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with environment lookups
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Lesson path: env > file > bundled
        let lesson = env("LESSONKIT_LESSON")
            .or(file.lesson)
            .map(PathBuf::from);

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("LESSONKIT_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Confirmation window: env > file > default. Zero would make the
        // confirmation invisible, so it counts as unset at each level.
        let confirmation_ms = env("LESSONKIT_CONFIRM_MS")
            .and_then(|v| v.parse().ok())
            .filter(|ms: &u64| *ms > 0)
            .or(file.confirmation_ms.filter(|ms| *ms > 0))
            .unwrap_or(DEFAULT_CONFIRMATION_MS);

        let tick_ms = file
            .tick_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TICK_MS);

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            lesson,
            enable_tui,
            confirmation_ms,
            tick_ms,
            logging,
        }
    }
}
