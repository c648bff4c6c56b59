//! Confirmation screen shown after an accepted registration

use crate::app::App;
use crate::state::SubmissionPhase;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const BOX_WIDTH: u16 = 56;
const BOX_HEIGHT: u16 = 9;

/// Draw the success box centered in `area`
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let confirmation_id = match app.controller.phase() {
        SubmissionPhase::Succeeded { confirmation_id } => confirmation_id.as_str(),
        _ => "",
    };

    let width = BOX_WIDTH.min(area.width);
    let height = BOX_HEIGHT.min(area.height);
    let box_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let content = vec![
        Line::from(Span::styled(
            "Registration complete",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Thank you for registering."),
        Line::from(vec![
            Span::raw("Confirmation ID: "),
            Span::styled(confirmation_id, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", key_style),
            Span::raw(" new registration   "),
            Span::styled("Esc", key_style),
            Span::raw(" quit"),
        ]),
    ];

    frame.render_widget(Clear, box_area);
    let paragraph = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(paragraph, box_area);
}
