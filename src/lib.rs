// lessonkit - reveal panels and copy buttons for tutorial lessons
//
// Architecture:
// - Widgets: per-view disclosure and clipboard controllers (the reusable core)
// - Lesson: TOML lesson content consumed by the widgets
// - Clipboard: the system clipboard behind the `ClipboardWriter` seam
// - TUI (ratatui): a lesson view that binds keys to widget commands
// - Logging: tracing layer that keeps diagnostics off the alternate screen

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod lesson;
pub mod logging;
pub mod plain;
pub mod tui;
pub mod widgets;
