//! Screen layout and status bar

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Keyboard hints for the current view
fn view_hints(view: &View) -> String {
    match view {
        View::Form => format!(
            "Tab:next  ←/→:option  Space:select  {}:submit  Esc:quit",
            crate::platform::SUBMIT_SHORTCUT
        ),
        View::Success => "Enter:new registration  Esc:quit".to_string(),
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Endpoint indicator
    let (marker, color) = if app.uses_mock_server() {
        (" ◆ mock ", Color::Yellow)
    } else {
        (" ● live ", Color::Green)
    };
    spans.push(Span::styled(marker, Style::default().fg(color)));

    spans.push(Span::styled(
        view_hints(&app.state.current_view),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        let color = if app.controller.is_submitting() {
            Color::Yellow
        } else {
            Color::White
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(color)));
    }

    let quit_hint = " ^C:quit ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}
