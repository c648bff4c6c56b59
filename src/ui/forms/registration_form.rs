//! Registration form screen: scrolled field list plus action panel

use super::field_renderer::{draw_field, field_height, FieldView};
use crate::app::App;
use crate::state::{FieldId, Section, ValidationErrorMap};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Vertical placement of one item in the unscrolled form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Header(Section),
    Field(FieldId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placed {
    slot: Slot,
    top: usize,
    height: usize,
}

/// Lay every section header and field out top to bottom.
///
/// Returns the placements and the total height in lines.
fn layout_rows(errors: &ValidationErrorMap) -> (Vec<Placed>, usize) {
    let mut placed = Vec::with_capacity(FieldId::ALL.len() + 4);
    let mut y = 0;
    let mut section = None;

    for id in FieldId::ALL {
        if section != Some(id.section()) {
            section = Some(id.section());
            placed.push(Placed {
                slot: Slot::Header(id.section()),
                top: y,
                height: 1,
            });
            y += 1;
        }
        let height = field_height(id, errors.field(id).is_some()) as usize;
        placed.push(Placed {
            slot: Slot::Field(id),
            top: y,
            height,
        });
        y += height;
    }

    (placed, y)
}

/// Draw the registration form with the action panel on the right
pub fn draw(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(26), // Action panel
        ])
        .split(area);

    draw_form(frame, chunks[0], app);
    draw_action_panel(frame, chunks[1], app);
}

fn draw_form(frame: &mut Frame, area: Rect, app: &mut App) {
    let form_focused = !app.state.on_submit_row();
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Member Registration ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (placed, total) = layout_rows(app.controller.errors());
    let viewport = inner.height as usize;

    match app.state.active_field() {
        Some(active) => {
            if let Some(p) = placed.iter().find(|p| p.slot == Slot::Field(active)) {
                // Keep a section header visible together with its first field
                let header_above = placed
                    .iter()
                    .any(|h| matches!(h.slot, Slot::Header(_)) && h.top + 1 == p.top);
                let (top, height) = if header_above {
                    (p.top - 1, p.height + 1)
                } else {
                    (p.top, p.height)
                };
                app.state.scroll_into_view(top, height, viewport);
            }
        }
        None => app
            .state
            .scroll_into_view(total.saturating_sub(1), 1, viewport),
    }
    let offset = app.state.scroll_offset;

    let record = app.controller.record();
    let errors = app.controller.errors();

    for p in placed
        .iter()
        .filter(|p| p.top >= offset && p.top + p.height <= offset + viewport)
    {
        let rect = Rect {
            x: inner.x + 1,
            y: inner.y + (p.top - offset) as u16,
            width: inner.width.saturating_sub(2),
            height: p.height as u16,
        };
        match p.slot {
            Slot::Header(section) => {
                let header = Paragraph::new(Line::from(Span::styled(
                    section.title(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
                frame.render_widget(header, rect);
            }
            Slot::Field(id) => {
                let view = FieldView {
                    id,
                    value: record.get(id),
                    error: errors.field(id),
                    is_active: app.state.active_field() == Some(id),
                    option_cursor: app.state.option_cursor(id),
                };
                draw_field(frame, rect, &view);
            }
        }
    }

    draw_scroll_hints(frame, inner, offset > 0, total > offset + viewport);
}

fn draw_scroll_hints(frame: &mut Frame, area: Rect, above: bool, below: bool) {
    let hint_style = Style::default().fg(Color::DarkGray);
    let width = 8u16.min(area.width);
    let x = area.x + area.width.saturating_sub(width);
    if above && area.height > 0 {
        let rect = Rect::new(x, area.y, width, 1);
        frame.render_widget(Paragraph::new("▲ more").style(hint_style), rect);
    }
    if below && area.height > 1 {
        let rect = Rect::new(x, area.y + area.height - 1, width, 1);
        frame.render_widget(Paragraph::new("▼ more").style(hint_style), rect);
    }
}

/// Draw the action panel with the submit button and key help
fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.state.on_submit_row();
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(2),             // Error summary
            Constraint::Min(0),                // Key help
        ])
        .split(inner_area);

    let label = if app.controller.is_submitting() {
        "Submitting..."
    } else {
        "Submit"
    };
    render_action_button(
        frame,
        chunks[0],
        label,
        is_focused,
        app.controller.can_submit(),
        Some(Color::Green),
    );

    let invalid = app
        .controller
        .errors()
        .keys()
        .filter(|k| !matches!(k, crate::state::ErrorKey::General))
        .count();
    if invalid > 0 {
        let summary = Paragraph::new(Line::from(Span::styled(
            format!(" {invalid} to fix"),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(summary, chunks[1]);
    }

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let help = Paragraph::new(vec![
        Line::from(vec![key(" Tab/↓"), Span::raw(" next")]),
        Line::from(vec![key(" S-Tab/↑"), Span::raw(" previous")]),
        Line::from(vec![key(" ←/→"), Span::raw(" browse options")]),
        Line::from(vec![key(" Space"), Span::raw(" select")]),
        Line::from(vec![key(" ^U/Del"), Span::raw(" clear field")]),
        Line::from(vec![
            key(" "),
            key(crate::platform::SUBMIT_SHORTCUT),
            Span::raw(" submit"),
        ]),
        Line::from(vec![key(" Esc"), Span::raw(" quit")]),
    ])
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ErrorKey;

    #[test]
    fn test_layout_starts_with_section_header() {
        let (placed, _) = layout_rows(&ValidationErrorMap::new());
        assert_eq!(placed[0].slot, Slot::Header(Section::Basic));
        assert_eq!(placed[1].slot, Slot::Field(FieldId::LastName));
        assert_eq!(placed[1].top, 1);
    }

    #[test]
    fn test_layout_places_every_field_once() {
        let (placed, total) = layout_rows(&ValidationErrorMap::new());
        let fields = placed
            .iter()
            .filter(|p| matches!(p.slot, Slot::Field(_)))
            .count();
        assert_eq!(fields, FieldId::ALL.len());
        let last = placed.last().unwrap();
        assert_eq!(last.top + last.height, total);
    }

    #[test]
    fn test_error_adds_a_line() {
        let (_, clean) = layout_rows(&ValidationErrorMap::new());
        let mut errors = ValidationErrorMap::new();
        errors.insert(ErrorKey::Field(FieldId::Email), "Email address is required");
        let (_, with_error) = layout_rows(&errors);
        assert_eq!(with_error, clean + 1);
    }
}
