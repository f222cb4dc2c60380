use crate::app::AppState;
use crate::ui::styles::snackbar_style;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;

/// Whole seconds left, rounded up. Never below 1: the slot stays filled
/// until the next tick pops its expiry, and undo still works until then.
pub fn seconds_left(remaining: Duration) -> u64 {
    let millis = remaining.as_millis() as u64;
    ((millis + 999) / 1000).max(1)
}

pub fn snackbar_text(title: &str, remaining: Duration) -> String {
    format!(" \"{}\" completed · u to undo · {}s", title, seconds_left(remaining))
}

/// Render the undo bar for the task in the undo slot
pub fn render_snackbar(f: &mut Frame, app: &AppState, area: Rect) {
    let (Some(task), Some(remaining)) = (app.controller.pending_undo(), app.controller.undo_remaining()) else {
        return;
    };

    let paragraph = Paragraph::new(Line::raw(snackbar_text(&task.title, remaining)))
        .style(snackbar_style())
        .block(Block::default().borders(Borders::ALL).style(snackbar_style()));
    f.render_widget(paragraph, area);
}
