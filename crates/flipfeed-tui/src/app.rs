use std::collections::HashSet;
use std::sync::Arc;

use flipfeed_core::{AppConfig, Article, Category, FeedKey, FeedPage, FilterState, Result};

use crate::input::Action;
use crate::theme::Theme;

/// Cards per row in the grid
pub const GRID_COLUMNS: usize = 2;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// What the feed area currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(FeedPage),
    Failed(String),
}

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Editing the search text
    Search(String),
    /// Help overlay
    Help,
}

/// Work the event loop has to do after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Request the page for the current key
    Load,
    /// Drop the cached page for the current key, then request it
    Reload,
    /// Open a URL in the system browser
    Open(String),
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub filters: FilterState,
    pub page: u32,
    pub search: Option<String>,
    pub state: LoadState,
    /// Index of the selected card on the current page
    pub selected: usize,
    /// Ids of cards showing their summary side
    pub flipped: HashSet<String>,
    pub mode: Mode,
    pub should_quit: bool,
    pub status_message: Option<String>,
    spinner_frame: usize,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        let filters = FilterState::from_categories(config.feed.default_categories.iter().copied());
        Self {
            config,
            theme,
            filters,
            page: 1,
            search: None,
            state: LoadState::Loading,
            selected: 0,
            flipped: HashSet::new(),
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            spinner_frame: 0,
        }
    }

    pub fn feed_key(&self) -> FeedKey {
        FeedKey::new(self.filters, self.page, self.search.as_deref())
    }

    pub fn articles(&self) -> &[Article] {
        match &self.state {
            LoadState::Ready(page) => &page.articles,
            _ => &[],
        }
    }

    pub fn current_article(&self) -> Option<&Article> {
        self.articles().get(self.selected)
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Search(_))
    }

    /// A request for the current key went out
    pub fn start_loading(&mut self) {
        self.state = LoadState::Loading;
        self.selected = 0;
        self.flipped.clear();
    }

    /// Show the outcome of the latest request
    pub fn finish_loading(&mut self, outcome: Result<FeedPage>) {
        self.state = match outcome {
            Ok(page) => LoadState::Ready(page),
            Err(e) => LoadState::Failed(e.to_string()),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn total_pages(&self) -> u32 {
        match &self.state {
            LoadState::Ready(page) => page.total_pages.max(1),
            _ => 1,
        }
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self.state, LoadState::Ready(_)) && self.page < self.total_pages()
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages())
    }

    pub fn is_flipped(&self, article: &Article) -> bool {
        self.flipped.contains(&article.id)
    }

    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
    }

    pub fn spinner(&self) -> char {
        SPINNER[self.spinner_frame]
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Apply an input action; returns the follow-up work, if any
    pub fn update(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::MoveUp => self.move_selection(0, -1),
            Action::MoveDown => self.move_selection(0, 1),
            Action::MoveLeft => self.move_selection(-1, 0),
            Action::MoveRight => self.move_selection(1, 0),
            Action::Flip => {
                let id = self.current_article()?.id.clone();
                if !self.flipped.remove(&id) {
                    self.flipped.insert(id);
                }
                None
            }
            Action::ToggleCategory(category) => self.toggle_category(category),
            Action::NextPage => {
                if !self.can_go_next() {
                    return None;
                }
                self.page += 1;
                Some(Command::Load)
            }
            Action::PreviousPage => {
                if !self.can_go_previous() {
                    return None;
                }
                self.page -= 1;
                Some(Command::Load)
            }
            Action::Reload => {
                self.status_message = None;
                Some(Command::Reload)
            }
            Action::OpenInBrowser => self
                .current_article()
                .map(|a| Command::Open(a.url.clone())),
            Action::StartSearch => {
                self.mode = Mode::Search(self.search.clone().unwrap_or_default());
                None
            }
            Action::ClearSearch => self.apply_search(""),
            Action::ShowHelp => {
                self.mode = Mode::Help;
                None
            }
            Action::InputChar(c) => {
                if let Mode::Search(ref mut text) = self.mode {
                    text.push(c);
                }
                None
            }
            Action::Backspace => {
                if let Mode::Search(ref mut text) = self.mode {
                    text.pop();
                }
                None
            }
            Action::Confirm => match std::mem::replace(&mut self.mode, Mode::Normal) {
                Mode::Search(text) => self.apply_search(&text),
                _ => None,
            },
            Action::Cancel | Action::ExitMode => {
                self.mode = Mode::Normal;
                None
            }
            Action::None => None,
        }
    }

    fn toggle_category(&mut self, category: Category) -> Option<Command> {
        self.filters.toggle(category);
        self.page = 1;
        Some(Command::Load)
    }

    fn apply_search(&mut self, text: &str) -> Option<Command> {
        let trimmed = text.trim();
        let search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        if search == self.search {
            return None;
        }
        self.search = search;
        self.page = 1;
        Some(Command::Load)
    }

    fn move_selection(&mut self, dx: isize, dy: isize) -> Option<Command> {
        let count = self.articles().len();
        if count == 0 {
            return None;
        }

        let row = (self.selected / GRID_COLUMNS) as isize + dy;
        let col = (self.selected % GRID_COLUMNS) as isize + dx;
        if row < 0 || col < 0 || col >= GRID_COLUMNS as isize {
            return None;
        }

        let target = row as usize * GRID_COLUMNS + col as usize;
        if target < count {
            self.selected = target;
        } else if dy > 0 {
            // Short last row: land on its final card
            let last_row_start = (count - 1) / GRID_COLUMNS * GRID_COLUMNS;
            if last_row_start > self.selected {
                self.selected = count - 1;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipfeed_core::Error;

    fn article(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Title {}", id),
            description: "d".to_string(),
            url: format!("https://example.com/{}", id),
            source: "BBC".to_string(),
            published_at: String::new(),
            category: Some("sports".to_string()),
            summary: Some(format!("Summary {}", id)),
        }
    }

    fn ready_app(count: usize, page: u32, total_pages: u32) -> App {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        app.page = page;
        app.start_loading();
        app.finish_loading(Ok(FeedPage {
            articles: (0..count).map(|i| article(&i.to_string())).collect(),
            total: total_pages * 10,
            page,
            limit: 10,
            total_pages,
        }));
        app
    }

    #[test]
    fn test_default_categories_seed_filters() {
        let mut config = AppConfig::default();
        config.feed.default_categories = vec![Category::Politics];
        let app = App::new(Arc::new(config), Theme::default());

        assert!(app.filters.politics);
        assert!(!app.filters.sports);
        assert_eq!(app.feed_key().page, 1);
    }

    #[test]
    fn test_toggle_category_resets_page() {
        let mut app = ready_app(10, 3, 5);

        assert_eq!(app.update(Action::ToggleCategory(Category::Crime)), Some(Command::Load));
        assert!(app.filters.crime);
        assert_eq!(app.page, 1);

        app.update(Action::ToggleCategory(Category::Crime));
        assert!(!app.filters.crime);
    }

    #[test]
    fn test_pagination_bounds() {
        let mut app = ready_app(10, 1, 2);
        assert!(!app.can_go_previous());
        assert_eq!(app.update(Action::PreviousPage), None);

        assert_eq!(app.update(Action::NextPage), Some(Command::Load));
        assert_eq!(app.page, 2);

        let mut last = ready_app(3, 2, 2);
        assert_eq!(last.update(Action::NextPage), None);
        assert_eq!(last.page_label(), "Page 2 of 2");
    }

    #[test]
    fn test_empty_result_shows_one_page() {
        let app = ready_app(0, 1, 0);
        assert_eq!(app.page_label(), "Page 1 of 1");
        assert!(!app.can_go_next());
    }

    #[test]
    fn test_no_next_page_while_loading_or_failed() {
        let mut app = ready_app(10, 1, 4);
        app.start_loading();
        assert!(!app.can_go_next());

        app.finish_loading(Err(Error::LoadFailed));
        assert!(!app.can_go_next());
        assert_eq!(
            app.state,
            LoadState::Failed(flipfeed_core::LOAD_FAILED_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_flip_toggles_selected_card() {
        let mut app = ready_app(4, 1, 1);
        app.update(Action::MoveRight);
        app.update(Action::Flip);

        assert!(app.is_flipped(&app.articles()[1]));
        assert!(!app.is_flipped(&app.articles()[0]));

        app.update(Action::Flip);
        assert!(app.flipped.is_empty());
    }

    #[test]
    fn test_new_load_unflips_cards() {
        let mut app = ready_app(4, 1, 1);
        app.update(Action::Flip);
        app.start_loading();
        assert!(app.flipped.is_empty());
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_grid_navigation() {
        let mut app = ready_app(5, 1, 1);

        app.update(Action::MoveDown);
        assert_eq!(app.selected, 2);
        app.update(Action::MoveRight);
        assert_eq!(app.selected, 3);
        app.update(Action::MoveRight);
        assert_eq!(app.selected, 3);
        // Row 2 holds only card 4
        app.update(Action::MoveDown);
        assert_eq!(app.selected, 4);
        app.update(Action::MoveDown);
        assert_eq!(app.selected, 4);
        app.update(Action::MoveUp);
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn test_search_editing() {
        let mut app = ready_app(10, 4, 5);

        app.update(Action::StartSearch);
        for c in "election ".chars() {
            app.update(Action::InputChar(c));
        }
        app.update(Action::Backspace);
        assert_eq!(app.mode, Mode::Search("election".to_string()));

        assert_eq!(app.update(Action::Confirm), Some(Command::Load));
        assert_eq!(app.search.as_deref(), Some("election"));
        assert_eq!(app.page, 1);
        assert_eq!(app.mode, Mode::Normal);

        // Same text again does nothing
        app.update(Action::StartSearch);
        assert_eq!(app.update(Action::Confirm), None);

        assert_eq!(app.update(Action::ClearSearch), Some(Command::Load));
        assert_eq!(app.search, None);
    }

    #[test]
    fn test_cancel_keeps_previous_search() {
        let mut app = ready_app(10, 1, 1);
        app.update(Action::StartSearch);
        app.update(Action::InputChar('x'));
        assert_eq!(app.update(Action::Cancel), None);
        assert_eq!(app.search, None);
    }

    #[test]
    fn test_open_uses_selected_url() {
        let mut app = ready_app(2, 1, 1);
        app.update(Action::MoveRight);
        assert_eq!(
            app.update(Action::OpenInBrowser),
            Some(Command::Open("https://example.com/1".to_string()))
        );

        let mut empty = ready_app(0, 1, 0);
        assert_eq!(empty.update(Action::OpenInBrowser), None);
    }
}
