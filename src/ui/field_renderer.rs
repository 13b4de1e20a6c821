//! Field rendering for loaded forms

use crate::forms::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one rendered field
pub const FIELD_HEIGHT: u16 = 3;

/// Draw a form field with its current value
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, value: &str, is_active: bool) {
    let border_color = if !field.error.is_empty() {
        Color::Red
    } else if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let value_style = if field.disabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let display = display_text(field, value, is_active);
    let cursor = if is_active && !field.disabled && !field.is_toggle() {
        "▌"
    } else {
        ""
    };

    let mut title = vec![Span::raw(format!(" {}", field_label(field)))];
    if field.required {
        title.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    if field.disabled {
        title.push(Span::styled(" (disabled)", Style::default().fg(Color::DarkGray)));
    }
    title.push(Span::raw(" "));

    let mut block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if !field.error.is_empty() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", field.error),
            Style::default().fg(Color::Red),
        )));
    }

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display, value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(block);

    frame.render_widget(content, area);
}

fn field_label(field: &FormField) -> &str {
    if field.label.is_empty() {
        &field.name
    } else {
        &field.label
    }
}

/// Text shown inside a field box
fn display_text(field: &FormField, value: &str, is_active: bool) -> String {
    if field.is_toggle() {
        return if value == "true" { "[x]" } else { "[ ]" }.to_string();
    }
    if value.is_empty() {
        if is_active {
            return String::new();
        }
        return field
            .props
            .get("placeholder")
            .and_then(|p| p.as_str())
            .unwrap_or("(empty)")
            .to_string();
    }
    if field.field_type.eq_ignore_ascii_case("password") {
        return "•".repeat(value.chars().count());
    }
    value.to_string()
}
