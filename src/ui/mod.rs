//! UI module for rendering the TUI

mod field_renderer;
mod form_content;
mod form_list;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    // Draw main content based on current view
    match &app.state.current_view {
        View::FormList => form_list::draw(frame, main_area, app),
        View::FormContent => form_content::draw(frame, main_area, app),
    }

    // Draw status bar
    layout::draw_status_bar(frame, status_area, app);
}
