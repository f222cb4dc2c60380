use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hint text for the current mode
pub fn hints(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Normal => {
            " ↑/↓ select   Space complete   u undo   Enter details   a add   s sub-task   m metrics   q quit"
        }
        UiMode::Detail => {
            " ↑/↓ sub-task   Space check   s add sub-task   t title   d description   Esc close"
        }
        UiMode::AddingTask => " Tab next field   ←/→ category   Enter save   Esc cancel",
        UiMode::AddingSubtask | UiMode::EditingTitle | UiMode::EditingDescription => {
            " Enter save   Esc cancel"
        }
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let paragraph = Paragraph::new(Line::raw(hints(mode))).style(hint_style());
    f.render_widget(paragraph, area);
}
