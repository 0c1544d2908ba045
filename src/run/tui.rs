use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::{commands, theme};

pub(crate) fn as_tui(config: Config) -> Result<()> {
    let mut app = App::new(config)?;
    theme::set_high_contrast(app.config.high_contrast);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| crate::ui::render::render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            handle_key(key, app);
        }
    }
    Ok(())
}

/// Route a key press. Errors from user actions land in the status bar
/// instead of ending the session.
pub(crate) fn handle_key(key: KeyEvent, app: &mut App) {
    let result = match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app),
        InputMode::Command => handle_command_input(key, app),
        InputMode::Confirm => handle_confirm_input(key, app),
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "action failed");
        app.set_status(format!("Error: {e}"));
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(true),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(false),
        KeyCode::Char('1') => app.switch_screen(Screen::Dashboard),
        KeyCode::Char('2') => app.switch_screen(Screen::Expenses),
        KeyCode::Char('3') => app.switch_screen(Screen::Investments),
        KeyCode::Char('4') => app.switch_screen(Screen::Analytics),
        KeyCode::Tab => app.cycle_screen(1),
        KeyCode::BackTab => app.cycle_screen(-1),
        KeyCode::Char('+') | KeyCode::Char('=') if app.screen == Screen::Expenses => {
            app.adjust_selected(1)?;
        }
        KeyCode::Char('-') if app.screen == Screen::Expenses => {
            app.adjust_selected(-1)?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: KeyEvent, app: &mut App) -> Result<()> {
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => commands::confirm_pending(app),
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.set_status("Cancelled");
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
