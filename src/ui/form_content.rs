//! Loaded form view

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::forms::{Form, FormModel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the loaded form, or an empty state when nothing is loaded
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(model) = app.current_form() else {
        let content = Paragraph::new("No form loaded.\nPress Esc to pick one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(" Form ").borders(Borders::ALL));
        frame.render_widget(content, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Fields
        ])
        .split(area);

    draw_header(frame, chunks[0], model);
    draw_fields(frame, chunks[1], model);
}

fn draw_header(frame: &mut Frame, area: Rect, model: &FormModel) {
    let item = model.item();
    let mut lines = vec![Line::from(vec![
        Span::styled(
            item.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  #{}", item.id), Style::default().fg(Color::DarkGray)),
    ])];
    if let Some(description) = &item.description {
        lines.push(Line::from(Span::styled(
            description.as_str(),
            Style::default().fg(Color::Gray),
        )));
    }

    let (status, color) = if model.is_invalid() {
        (" invalid ", Color::Red)
    } else {
        (" valid ", Color::Green)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title_bottom(Line::from(Span::styled(status, Style::default().fg(color))));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn draw_fields(frame: &mut Frame, area: Rect, model: &FormModel) {
    let fields = model.fields();
    if fields.is_empty() {
        let content =
            Paragraph::new("This form has no fields.").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(content, area);
        return;
    }

    let visible = (area.height / FIELD_HEIGHT).max(1) as usize;
    let start = first_visible(model.active_field(), visible);

    for (row, (index, field)) in fields.iter().enumerate().skip(start).take(visible).enumerate() {
        let field_area = Rect {
            x: area.x,
            y: area.y + row as u16 * FIELD_HEIGHT,
            width: area.width,
            height: FIELD_HEIGHT.min(area.height.saturating_sub(row as u16 * FIELD_HEIGHT)),
        };
        let value = model.display_value(&field.name);
        draw_field(frame, field_area, field, &value, index == model.active_field());
    }
}

/// First field index to draw so the active field stays on screen
fn first_visible(active: usize, visible: usize) -> usize {
    (active + 1).saturating_sub(visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_when_active_fits() {
        assert_eq!(first_visible(0, 5), 0);
        assert_eq!(first_visible(4, 5), 0);
    }

    #[test]
    fn test_first_visible_scrolls_to_active() {
        assert_eq!(first_visible(5, 5), 1);
        assert_eq!(first_visible(9, 3), 7);
    }
}
