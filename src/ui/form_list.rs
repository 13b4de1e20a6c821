//! Form catalog view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Draw the list of available forms
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let forms = &app.state.forms;
    let block = Block::default()
        .title(format!(" Forms ({}) ", forms.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if forms.is_empty() {
        let content = Paragraph::new("No forms found.\nPress 'r' to reload.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = forms
        .iter()
        .enumerate()
        .map(|(idx, form)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };

            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            let mut spans = vec![
                Span::styled(prefix, style),
                Span::styled(form.id.as_str(), Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::styled(&form.name, style),
            ];
            if let Some(description) = form.description.as_deref().filter(|d| !d.is_empty()) {
                spans.push(Span::styled(
                    format!(" - {description}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block);

    // Keeps the selected row scrolled into view
    let mut list_state = ListState::default().with_selected(Some(app.state.selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}
