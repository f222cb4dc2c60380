pub mod detail_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod metrics_pane;
pub mod pause_pane;
pub mod snackbar;
pub mod styles;

use crate::app::AppState;
use crate::domain::{Screen, UiMode};
use chrono::Local;
use detail_pane::render_detail_modal;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::{render_header, render_list_pane};
use metrics_pane::render_metrics_pane;
use pause_pane::render_pause_pane;
use ratatui::Frame;
use snackbar::render_snackbar;

/// Main render function - draws the current screen
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();

    match app.screen {
        Screen::Pause => render_pause_pane(f, &app.gate, size),
        Screen::Metrics => render_metrics_pane(f, size),
        Screen::Today => {
            let layout = create_layout(size, app.controller.pending_undo().is_some());

            render_keybindings(f, app.ui_mode, layout.keybindings_area);
            render_header(f, Local::now(), layout.header_area);
            render_list_pane(f, app, layout.list_area);

            if let Some(snackbar_area) = layout.snackbar_area {
                render_snackbar(f, app, snackbar_area);
            }

            if app.ui_mode == UiMode::Detail {
                render_detail_modal(f, app, size);
            }

            if app.ui_mode.is_form() {
                render_input_form(f, app, size);
            }
        }
    }
}
