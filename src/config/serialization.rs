//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        let lesson = match &self.lesson {
            Some(path) => format!("lesson = \"{}\"", path.display()),
            None => "# lesson = \"~/lessons/url_shortener_dto.toml\"  # default: bundled lesson"
                .to_string(),
        };

        format!(
            r#"# lessonkit configuration

# Lesson file to open when none is given on the command line
{lesson}

# How long a snippet shows "Copied!" after a successful copy (milliseconds)
confirmation_ms = {confirmation_ms}

# Redraw interval for the TUI (milliseconds)
tick_ms = {tick_ms}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            lesson = lesson,
            confirmation_ms = self.confirmation_ms,
            tick_ms = self.tick_ms,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
