use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, LoadState, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match &app.mode {
            Mode::Normal => "NORMAL",
            Mode::Search(_) => "SEARCH",
            Mode::Help => "HELP",
        };

        let filters = match app.filters.categories_param() {
            Some(list) => list,
            None => "all".to_string(),
        };

        let state = match &app.state {
            LoadState::Loading => "loading".to_string(),
            LoadState::Failed(_) => "error".to_string(),
            LoadState::Ready(page) => format!("{} of {} articles", page.articles.len(), page.total),
        };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => format!(
                " {} | {} | {} | {}",
                mode_str,
                app.page_label(),
                filters,
                state
            ),
        };

        let help_hint = " q:quit space:flip 1-4:filter n/p:page /:search ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.len());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
