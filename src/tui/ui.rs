//! Rendering of a lesson view
//!
//! The body is laid out as plain lines first so the selected block's line
//! range is known, then handed to the view's scroll state.

use super::app::LessonView;
use crate::lesson::Block;
use crate::logging::{LogBuffer, LogLevel};
use crate::widgets::ClipboardWriter;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block as Panel, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Log lines shown under the lesson
const LOG_LINES: usize = 3;

const ACCENT: Color = Color::Cyan;
const CONFIRM: Color = Color::Green;
const MUTED: Color = Color::DarkGray;

/// Draw the whole view
pub fn draw<W: ClipboardWriter>(f: &mut Frame, view: &mut LessonView<W>, logs: &LogBuffer) {
    let [title_area, body_area, log_area, help_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(LOG_LINES as u16 + 1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    draw_title(f, title_area, view);
    draw_body(f, body_area, view);
    draw_logs(f, log_area, logs);
    draw_help(f, help_area, view);
}

fn draw_title<W: ClipboardWriter>(f: &mut Frame, area: Rect, view: &LessonView<W>) {
    let mut spans = vec![Span::styled(
        format!(" {}", view.lesson.title),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    if let Some(summary) = &view.lesson.summary {
        spans.push(Span::styled(format!("  {}", summary), Style::default().fg(MUTED)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_body<W: ClipboardWriter>(f: &mut Frame, area: Rect, view: &mut LessonView<W>) {
    let (lines, selected) = lesson_lines(view, area.width as usize);
    let height = area.height as usize;

    view.scroll.update_dimensions(lines.len(), height);
    view.scroll.reveal(selected);

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(view.scroll.offset())
        .take(height)
        .collect();
    f.render_widget(Paragraph::new(visible), area);
}

fn draw_logs(f: &mut Frame, area: Rect, logs: &LogBuffer) {
    let width = area.width as usize;
    let lines: Vec<Line> = logs
        .latest(LOG_LINES)
        .into_iter()
        .map(|entry| {
            let color = match entry.level {
                LogLevel::Error => Color::Red,
                LogLevel::Warn => Color::Yellow,
                LogLevel::Info => Color::Blue,
                LogLevel::Debug | LogLevel::Trace => MUTED,
            };
            let prefix = format!(
                " {} {:<5} ",
                entry.timestamp.format("%H:%M:%S"),
                entry.level.as_str()
            );
            let message = truncate(&entry.message, width.saturating_sub(prefix.width()));
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(color)),
                Span::raw(message),
            ])
        })
        .collect();

    let block = Panel::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(MUTED))
        .title(" log ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help<W: ClipboardWriter>(f: &mut Frame, area: Rect, view: &LessonView<W>) {
    let keys = " ↑/↓ select  PgUp/PgDn scroll  enter reveal/copy  y copy  c collapse  q quit";
    let open = format!("{} open ", view.panels.open_count());
    let pad = (area.width as usize).saturating_sub(keys.width() + open.width());

    let line = Line::from(vec![
        Span::styled(keys, Style::default().fg(MUTED)),
        Span::raw(" ".repeat(pad)),
        Span::styled(open, Style::default().fg(ACCENT)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Lay out every block; returns the lines and the selected block's line range
pub fn lesson_lines<W: ClipboardWriter>(
    view: &LessonView<W>,
    width: usize,
) -> (Vec<Line<'static>>, Option<(usize, usize)>) {
    let mut lines = Vec::new();
    let mut selected_range = None;
    let selected = view.selected_block();
    let text_width = width.saturating_sub(4).max(10);

    for (index, block) in view.lesson.blocks.iter().enumerate() {
        let start = lines.len();
        let is_selected = selected == Some(index);
        let marker = if is_selected { " › " } else { "   " };
        let marker = Span::styled(
            marker,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        );

        match block {
            Block::Prose { text } => {
                for line in wrap(text, text_width) {
                    lines.push(Line::from(format!("   {}", line)));
                }
            }
            Block::Table { headers, rows } => table_lines(&mut lines, headers, rows),
            Block::Reveal {
                question, answer, ..
            } => {
                let open = view.is_open(index);
                let icon = if open { "▼ " } else { "▶ " };
                let question_style = if is_selected {
                    Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };

                for (i, line) in wrap(question, text_width).into_iter().enumerate() {
                    let lead = if i == 0 {
                        vec![marker.clone(), Span::raw(icon)]
                    } else {
                        vec![Span::raw("     ")]
                    };
                    let mut spans = lead;
                    spans.push(Span::styled(line, question_style));
                    lines.push(Line::from(spans));
                }

                if open {
                    for line in wrap(answer, text_width.saturating_sub(2).max(10)) {
                        lines.push(Line::from(Span::styled(
                            format!("     {}", line),
                            Style::default().fg(CONFIRM),
                        )));
                    }
                }
            }
            Block::Snippet {
                title,
                language,
                code,
                ..
            } => {
                let mut label = title.clone().unwrap_or_else(|| "snippet".to_string());
                if let Some(language) = language {
                    label.push_str(&format!(" · {}", language));
                }
                let status = if view.is_copied(index) {
                    Span::styled(
                        "  ✓ Copied!",
                        Style::default().fg(CONFIRM).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("  [y] copy", Style::default().fg(MUTED))
                };
                let label_style = if is_selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    marker,
                    Span::raw("┌ "),
                    Span::styled(label, label_style),
                    status,
                ]));

                // Long lines wrap under a dashed gutter; nothing is cut, so
                // the screen shows exactly what `y` copies
                let code_width = width.saturating_sub(5);
                for line in code.lines() {
                    for (i, piece) in split_width(line, code_width).into_iter().enumerate() {
                        let gutter = if i == 0 { "   │ " } else { "   ┆ " };
                        lines.push(Line::from(vec![
                            Span::styled(gutter, Style::default().fg(MUTED)),
                            Span::styled(piece, Style::default().fg(Color::Yellow)),
                        ]));
                    }
                }
                lines.push(Line::from(Span::styled("   └", Style::default().fg(MUTED))));
            }
        }

        if is_selected {
            selected_range = Some((start, lines.len()));
        }
        lines.push(Line::default());
    }

    (lines, selected_range)
}

fn table_lines(lines: &mut Vec<Line<'static>>, headers: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(col) {
                *w = (*w).max(cell.width());
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{}{}", cell, " ".repeat(w.saturating_sub(cell.width()))))
            .collect::<Vec<_>>()
            .join(" │ ")
    };

    lines.push(Line::from(Span::styled(
        format!("   {}", render_row(headers)),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    lines.push(Line::from(Span::styled(
        format!("   {}", rule.join("─┼─")),
        Style::default().fg(MUTED),
    )));
    for row in rows {
        lines.push(Line::from(format!("   {}", render_row(row))));
    }
}

/// Word-wrap to `width` display columns; newlines start new lines
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if line_width > 0 && line_width + 1 + word_width > width {
                out.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if line_width > 0 {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
        }
        out.push(line);
    }

    out
}

/// Split `text` into pieces of at most `width` display columns, keeping every
/// character (whitespace included)
pub fn split_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut piece = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width && !piece.is_empty() {
            out.push(std::mem::take(&mut piece));
            used = 0;
        }
        piece.push(c);
        used += w;
    }
    out.push(piece);
    out
}

/// Cut `text` to at most `width` display columns, marking the cut with '…'
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
    }
    out
}
