use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Today screen layout
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub header_area: Rect,
    pub list_area: Rect,
    pub snackbar_area: Option<Rect>,
}

/// Create the Today screen layout
/// - Top bar: keybindings (1 row)
/// - Header: "Today" and the date (2 rows)
/// - List: everything left
/// - Snackbar: undo bar (3 rows, only while an undo is pending)
pub fn create_layout(area: Rect, show_snackbar: bool) -> MainLayout {
    let snackbar_height = if show_snackbar { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),               // Keybindings bar
            Constraint::Length(2),               // Header
            Constraint::Min(0),                  // Task list
            Constraint::Length(snackbar_height), // Undo snackbar
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        header_area: chunks[1],
        list_area: chunks[2],
        snackbar_area: show_snackbar.then_some(chunks[3]),
    }
}

/// Create centered modal area (forms and the detail view)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Length(18),
            Constraint::Percentage(20),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

/// Center a box of at most `width` x `height` inside `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
