use crate::app::AppState;
use crate::domain::{Screen, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.screen {
        Screen::Pause => handle_pause_screen(app, key),
        Screen::Metrics => handle_metrics_screen(app, key),
        Screen::Today => match app.ui_mode {
            UiMode::Normal => handle_normal_mode(app, key),
            UiMode::Detail => handle_detail_mode(app, key),
            UiMode::AddingTask
            | UiMode::AddingSubtask
            | UiMode::EditingTitle
            | UiMode::EditingDescription => handle_input_form_mode(app, key),
        },
    }
}

/// Handle keys on the pause gate
fn handle_pause_screen(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.continue_from_gate();
            Ok(false)
        }
        KeyCode::Char('q') | KeyCode::Esc => Ok(true),
        _ => Ok(false),
    }
}

/// Handle keys on the metrics screen
fn handle_metrics_screen(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
            app.back_to_gate();
            Ok(false)
        }
        KeyCode::Char('q') => Ok(true),
        _ => Ok(false),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Complete task / check sub-task
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            app.toggle_selected();
            Ok(false)
        }
        KeyCode::Char('u') => {
            app.undo();
            Ok(false)
        }

        KeyCode::Enter => {
            app.open_detail();
            Ok(false)
        }
        KeyCode::Char('a') => {
            app.start_add_task();
            Ok(false)
        }
        KeyCode::Char('s') => {
            app.start_add_subtask();
            Ok(false)
        }

        KeyCode::Char('m') => {
            app.open_metrics();
            Ok(false)
        }

        KeyCode::Char('q') => Ok(true),
        _ => Ok(false),
    }
}

/// Handle keys in the task detail modal
fn handle_detail_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.close_detail();
            Ok(false)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.detail_move_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.detail_move_down();
            Ok(false)
        }
        KeyCode::Char(' ') => {
            app.detail_toggle_subtask();
            Ok(false)
        }
        KeyCode::Char('a') | KeyCode::Char('s') => {
            app.start_add_subtask();
            Ok(false)
        }
        KeyCode::Char('t') | KeyCode::Char('e') => {
            app.start_edit_title();
            Ok(false)
        }
        KeyCode::Char('d') => {
            app.start_edit_description();
            Ok(false)
        }
        KeyCode::Char('u') => {
            app.undo();
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys in input form mode (adding or editing)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Submit form
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }

        // Cancel form
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }

        KeyCode::Tab => {
            app.input_form_next_field();
            Ok(false)
        }

        // Category chips
        KeyCode::Left => {
            app.input_form_cycle_category(false);
            Ok(false)
        }
        KeyCode::Right => {
            app.input_form_cycle_category(true);
            Ok(false)
        }

        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }

        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}
