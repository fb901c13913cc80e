// Lessons compiled into the binary
//
// Used when no lesson file is given on the command line or in the config,
// so the viewer always has something to show.

/// The DTO lesson of the URL shortener course
pub const URL_SHORTENER_DTO: &str = include_str!("../../lessons/url_shortener_dto.toml");
