//! Field rendering for the registration form

use crate::state::catalog::{self, label_for};
use crate::state::{is_required, FieldId, FieldKind, FieldRef};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Inner lines given to multi-line text fields
const MULTILINE_ROWS: u16 = 3;

/// Everything needed to draw one field
pub struct FieldView<'a> {
    pub id: FieldId,
    pub value: FieldRef<'a>,
    pub error: Option<&'a str>,
    pub is_active: bool,
    /// Highlighted option index for choice fields
    pub option_cursor: usize,
}

/// Rows taken by a field: bordered box plus one line for an error
pub fn field_height(id: FieldId, has_error: bool) -> u16 {
    let inner = match id.kind() {
        FieldKind::Text if id.is_multiline() => MULTILINE_ROWS,
        FieldKind::Text | FieldKind::Flag => 1,
        FieldKind::Choice | FieldKind::Multi => 2,
    };
    inner + 2 + u16::from(has_error)
}

fn title(id: FieldId) -> String {
    if is_required(id) {
        format!(" {} * ", id.label())
    } else {
        format!(" {} ", id.label())
    }
}

fn cursor_span() -> Span<'static> {
    Span::styled("▌", Style::default().fg(Color::Cyan))
}

fn text_lines<'a>(value: &'a str, is_active: bool, style: Style) -> Vec<Line<'a>> {
    if value.is_empty() && !is_active {
        return vec![Line::from(Span::styled("(empty)", style))];
    }
    let mut lines: Vec<Line> = value
        .split('\n')
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();
    if is_active {
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor_span());
        }
    }
    lines
}

/// Line under the selection showing the option the cursor is on
fn picker_line(id: FieldId, cursor: usize, checked: Option<bool>) -> Line<'static> {
    let options = catalog::options(id);
    let Some(option) = options.get(cursor) else {
        return Line::from("");
    };
    let mark = match checked {
        Some(true) => "[x] ",
        Some(false) => "[ ] ",
        None => "",
    };
    Line::from(vec![
        Span::styled("‹ ", Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{mark}{}", option.label),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ›", Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("  {}/{}", cursor + 1, options.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn content_lines<'a>(view: &FieldView<'a>, style: Style) -> Vec<Line<'a>> {
    let none = || Line::from(Span::styled("(none)", style));
    match view.value {
        FieldRef::Text(value) => text_lines(value, view.is_active, style),
        FieldRef::Choice(value) => {
            let selected = if value.is_empty() {
                none()
            } else {
                Line::from(Span::styled(label_for(view.id, value), style))
            };
            let mut lines = vec![selected];
            if view.is_active {
                lines.push(picker_line(view.id, view.option_cursor, None));
            }
            lines
        }
        FieldRef::Multi(values) => {
            let selected = if values.is_empty() {
                none()
            } else {
                let labels: Vec<&str> = values.iter().map(|v| label_for(view.id, v)).collect();
                Line::from(Span::styled(labels.join(", "), style))
            };
            let mut lines = vec![selected];
            if view.is_active {
                let checked = catalog::options(view.id)
                    .get(view.option_cursor)
                    .map(|o| values.iter().any(|v| v == o.value));
                lines.push(picker_line(view.id, view.option_cursor, checked));
            }
            lines
        }
        FieldRef::Flag(on) => {
            let mark = if on { "[x]" } else { "[ ]" };
            vec![Line::from(Span::styled(
                format!("{mark} {}", view.id.label()),
                style,
            ))]
        }
    }
}

/// Draw a field box, with its error (if any) on the line below
pub fn draw_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    let style = if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let border_style = match (view.is_active, view.error.is_some()) {
        (true, _) => Style::default().fg(Color::Cyan),
        (false, true) => Style::default().fg(Color::Red),
        (false, false) => Style::default().fg(Color::DarkGray),
    };

    let box_height = area.height.saturating_sub(u16::from(view.error.is_some()));
    let box_area = Rect {
        height: box_height,
        ..area
    };

    let block = Block::default()
        .title(title(view.id))
        .borders(Borders::ALL)
        .border_style(border_style);

    let content = Paragraph::new(content_lines(view, style)).wrap(Wrap { trim: false });
    frame.render_widget(content.block(block), box_area);

    if let Some(error) = view.error {
        let error_area = Rect {
            y: area.y + box_height,
            height: 1,
            ..area
        };
        let line = Line::from(vec![
            Span::styled(" ! ", Style::default().fg(Color::Red)),
            Span::styled(error, Style::default().fg(Color::Red)),
        ]);
        frame.render_widget(Paragraph::new(line), error_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heights_by_kind() {
        assert_eq!(field_height(FieldId::LastName, false), 3);
        assert_eq!(field_height(FieldId::Bio, false), 5);
        assert_eq!(field_height(FieldId::Gender, false), 4);
        assert_eq!(field_height(FieldId::PrivacyPolicyAgreed, true), 4);
    }

    #[test]
    fn test_required_fields_are_marked() {
        assert_eq!(title(FieldId::Email), " Email address * ");
        assert_eq!(title(FieldId::Bio), " About you ");
    }

    #[test]
    fn test_inactive_empty_text_shows_placeholder() {
        let lines = text_lines("", false, Style::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[0].content, "(empty)");
    }

    #[test]
    fn test_active_text_gets_cursor_on_last_line() {
        let lines = text_lines("a\nb", true, Style::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans.last().unwrap().content, "▌");
    }
}
