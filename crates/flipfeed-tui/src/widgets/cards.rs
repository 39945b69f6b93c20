use flipfeed_core::{Article, FeedPage};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, LoadState, GRID_COLUMNS};

/// Rows of text a card gets, including its border
const CARD_HEIGHT: u16 = 8;

pub struct CardGridWidget;

impl CardGridWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let title = match &app.search {
            Some(q) => format!(" Latest News: \"{}\" ", q),
            None => " Latest News ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        match &app.state {
            LoadState::Loading => {
                let text = format!("{} Loading news...", app.spinner());
                Self::render_message(frame, chunks[0], &text, Style::default().fg(theme.info));
            }
            LoadState::Failed(message) => {
                let text = format!("{}\n\npress r to retry", message);
                Self::render_message(frame, chunks[0], &text, Style::default().fg(theme.error));
            }
            LoadState::Ready(page) if page.is_empty() => {
                Self::render_message(
                    frame,
                    chunks[0],
                    "No articles found for the selected filters.\n\npress r to retry",
                    Style::default().fg(theme.grey2),
                );
            }
            LoadState::Ready(page) => Self::render_grid(frame, chunks[0], app, page),
        }

        Self::render_pager(frame, chunks[1], app);
    }

    fn render_message(frame: &mut Frame, area: Rect, text: &str, style: Style) {
        let lines = text.lines().count() as u16;
        let top = area.height.saturating_sub(lines) / 2;
        let area = Rect::new(area.x, area.y + top, area.width, area.height - top);
        let paragraph = Paragraph::new(text.to_string())
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_grid(frame: &mut Frame, area: Rect, app: &App, page: &FeedPage) {
        let rows = page.articles.len().div_ceil(GRID_COLUMNS);
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        let selected_row = app.selected / GRID_COLUMNS;
        let first_row = selected_row.saturating_sub(visible_rows - 1);

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
            .split(area);

        for (slot, row) in (first_row..rows.min(first_row + visible_rows)).enumerate() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .split(row_areas[slot]);

            for col in 0..GRID_COLUMNS {
                let index = row * GRID_COLUMNS + col;
                if let Some(article) = page.articles.get(index) {
                    Self::render_card(frame, columns[col], app, article, index == app.selected);
                }
            }
        }
    }

    fn render_card(frame: &mut Frame, area: Rect, app: &App, article: &Article, selected: bool) {
        let theme = &app.theme;
        let flipped = app.is_flipped(article);

        let border_style = if selected {
            Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.grey0)
        };
        let side = if flipped { " Summary " } else { "" };
        let block = Block::default()
            .title(side)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(if selected { theme.bg1 } else { theme.bg0 }));

        let width = area.width.saturating_sub(2) as usize;
        let lines = if flipped {
            vec![
                Line::from(Span::styled(
                    article.summary_text().to_string(),
                    Style::default().fg(theme.fg0),
                )),
                Line::default(),
                Line::from(Span::styled(
                    truncate_to_width(&article.url, width),
                    Style::default().fg(theme.blue).add_modifier(Modifier::UNDERLINED),
                )),
            ]
        } else {
            Self::front_lines(app, article, width)
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn front_lines<'a>(app: &App, article: &'a Article, width: usize) -> Vec<Line<'a>> {
        let theme = &app.theme;

        let mut meta = article.source.clone();
        if app.config.ui.show_timestamps {
            if let Some(published) = article.published() {
                meta.push_str(&format!(" | {}", published.format("%Y-%m-%d %H:%M")));
            }
        }

        let mut lines = vec![
            Line::from(Span::styled(
                article.title.as_str(),
                Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate_to_width(&meta, width),
                Style::default().fg(theme.grey2),
            )),
        ];

        if let Some(category) = article.category() {
            lines.push(Line::from(Span::styled(
                format!("#{}", category.as_str()),
                Style::default().fg(theme.category(category)),
            )));
        }

        lines
    }

    fn render_pager(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let enabled = Style::default().fg(theme.fg0);
        let disabled = Style::default().fg(theme.grey0);

        let line = Line::from(vec![
            Span::styled(
                "< Previous (p)",
                if app.can_go_previous() { enabled } else { disabled },
            ),
            Span::styled(format!("   {}   ", app.page_label()), Style::default().fg(theme.aqua)),
            Span::styled(
                "(n) Next >",
                if app.can_go_next() { enabled } else { disabled },
            ),
        ]);

        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

/// Cut a string to a display width, adding an ellipsis when shortened
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w + 3 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("https://example.com/long", 10), "https:/...");
        assert_eq!(truncate_to_width("日本語ニュース", 9), "日本語...");
    }
}
