//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Form => forms::draw_registration(frame, main_area, app),
        View::Success => forms::draw_success(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Modal error dialog on top of everything
    if let Some(message) = app.general_error() {
        render_error_dialog(frame, message);
    }
}
