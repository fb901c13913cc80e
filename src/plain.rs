//! Plain-text rendering for headless mode
//!
//! Prints the lesson the way a reader sees it when nothing has been clicked
//! yet: every reveal panel closed, no snippet confirmed.

use crate::lesson::{Block, Lesson};
use crate::tui::ui::wrap;
use crate::widgets::DisclosureController;
use std::fmt::Write as _;

/// Render `lesson` to text wrapped at `width` columns
///
/// Reveal panels open in `panels` have their answers printed.
pub fn render(lesson: &Lesson, panels: &DisclosureController, width: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", lesson.title);
    let _ = writeln!(out, "{}", "=".repeat(lesson.title.chars().count()));
    if let Some(summary) = &lesson.summary {
        for line in wrap(summary, width) {
            let _ = writeln!(out, "{}", line);
        }
    }
    out.push('\n');

    for (index, block) in lesson.blocks.iter().enumerate() {
        match block {
            Block::Prose { text } => {
                for line in wrap(text, width) {
                    let _ = writeln!(out, "{}", line);
                }
            }
            Block::Table { headers, rows } => {
                let _ = writeln!(out, "| {} |", headers.join(" | "));
                let _ = writeln!(out, "|{}", " --- |".repeat(headers.len()));
                for row in rows {
                    let _ = writeln!(out, "| {} |", row.join(" | "));
                }
            }
            Block::Reveal {
                question, answer, ..
            } => {
                let open = block.widget_id(index).is_some_and(|id| panels.is_open(id));
                let _ = writeln!(out, "Q: {}", question);
                if open {
                    for line in wrap(answer, width.saturating_sub(3)) {
                        let _ = writeln!(out, "   {}", line);
                    }
                } else {
                    let _ = writeln!(out, "   (answer hidden)");
                }
            }
            Block::Snippet {
                title,
                language,
                code,
                ..
            } => {
                if let Some(title) = title {
                    let _ = writeln!(out, "{}:", title);
                }
                let _ = writeln!(out, "```{}", language.as_deref().unwrap_or(""));
                let _ = writeln!(out, "{}", code);
                let _ = writeln!(out, "```");
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_hidden_by_default() {
        let lesson = Lesson::bundled().unwrap();
        let text = render(&lesson, &DisclosureController::new(), 80);

        assert!(text.starts_with("Request and Response DTOs\n"));
        assert!(text.contains("Q: Why are the DTOs Java records?"));
        assert!(text.contains("(answer hidden)"));
        assert!(!text.contains("Records are immutable"));
        assert!(text.contains("```java\npublic record ShortenUrlRequest("));
    }

    #[test]
    fn test_open_panels_show_answers() {
        let lesson = Lesson::bundled().unwrap();
        let mut panels = DisclosureController::new();
        panels.toggle("q2");

        let text = render(&lesson, &panels, 200);
        assert!(text.contains("Records are immutable"));
        // Other panels stay closed
        assert!(!text.contains("persistence concerns"));
    }

    #[test]
    fn test_table_rendering() {
        let lesson = Lesson::bundled().unwrap();
        let text = render(&lesson, &DisclosureController::new(), 80);
        assert!(text.contains("| DTO | Direction | Fields |"));
        assert!(text.contains("| --- | --- | --- |"));
    }
}
