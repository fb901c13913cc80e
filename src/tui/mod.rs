// TUI module - terminal lesson viewer
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks)
// - Routing key presses to the lesson view's widget commands

pub mod app;
pub mod scroll;
pub mod ui;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::widgets::ClipboardWriter;
use anyhow::{Context, Result};
use app::LessonView;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Run the viewer until the reader quits
///
/// Sets up the terminal, runs the event loop and restores the terminal even
/// when the loop fails.
pub async fn run_tui<W: ClipboardWriter>(
    mut view: LessonView<W>,
    log_buffer: LogBuffer,
    config: &Config,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut view, &log_buffer, config.tick_interval()).await;

    // The view is gone after this point; nothing may reset its snippets
    view.close();

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input and a redraw tick. The tick is what makes an
/// expired "Copied!" confirmation disappear without a key press.
async fn run_event_loop<W: ClipboardWriter>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    view: &mut LessonView<W>,
    log_buffer: &LogBuffer,
    tick: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick);

    loop {
        terminal
            .draw(|f| ui::draw(f, view, log_buffer))
            .context("Failed to draw terminal")?;

        tokio::select! {
            input = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            } => {
                if let Some(Event::Key(key_event)) = input {
                    handle_key_event(view, key_event).await;
                }
            }

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {}
        }

        if view.should_quit {
            break;
        }
    }

    Ok(())
}

/// Map a key press to a view command
pub async fn handle_key_event<W: ClipboardWriter>(view: &mut LessonView<W>, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => view.close(),
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => view.close(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => view.select_next(),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => view.select_prev(),
        KeyCode::Char('d') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            view.scroll.page_down()
        }
        KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            view.scroll.page_up()
        }
        KeyCode::PageDown => view.scroll.page_down(),
        KeyCode::PageUp => view.scroll.page_up(),
        KeyCode::Char('J') => view.scroll.scroll_down(),
        KeyCode::Char('K') => view.scroll.scroll_up(),
        KeyCode::Home | KeyCode::Char('g') => view.select_first(),
        KeyCode::End | KeyCode::Char('G') => view.select_last(),
        KeyCode::Enter | KeyCode::Char(' ') => view.activate().await,
        KeyCode::Char('y') => {
            view.copy_selected().await;
        }
        KeyCode::Char('c') => view.collapse_all(),
        _ => {}
    }
}
