use flipfeed_core::Category;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Mode};

pub struct FilterPanelWidget;

impl FilterPanelWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let block = Block::default()
            .title(" Filters ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg0));

        let mut lines = Vec::new();
        for (i, category) in Category::ALL.iter().enumerate() {
            let enabled = app.filters.is_enabled(*category);
            let (mark, style) = if enabled {
                (
                    "[x]",
                    Style::default()
                        .fg(theme.category(*category))
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("[ ]", Style::default().fg(theme.grey2))
            };

            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(theme.grey0)),
                Span::styled(format!("{} {}", mark, category.label()), style),
            ]));
        }

        if app.filters.active().is_empty() {
            lines.push(Line::from(Span::styled(
                "   (all categories)",
                Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
            )));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            " Search",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )));

        let search_line = match &app.mode {
            Mode::Search(text) => Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme.yellow)),
                Span::styled(text.clone(), Style::default().fg(theme.fg0)),
                Span::styled("_", Style::default().fg(theme.yellow).add_modifier(Modifier::SLOW_BLINK)),
            ]),
            _ => match &app.search {
                Some(q) => Line::from(Span::styled(format!(" \"{}\"", q), Style::default().fg(theme.fg0))),
                None => Line::from(Span::styled(" press /", Style::default().fg(theme.grey1))),
            },
        };
        lines.push(search_line);

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
