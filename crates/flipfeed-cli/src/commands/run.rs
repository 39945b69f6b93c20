use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use flipfeed_core::{AppConfig, FeedLoader, FeedSession};
use flipfeed_tui::{
    app::{App, Command, Mode},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{CardGridWidget, FilterPanelWidget, PopupWidget, StatusBarWidget},
    Theme,
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let loader = Arc::new(FeedLoader::new(&config)?);
    let (session, updates) = FeedSession::new(loader);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("flipfeed"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone(), Theme::default());
    let mut events = EventHandler::new(config.ui.tick_rate_ms, updates);

    let result = event_loop(&mut terminal, &mut app, &mut events, &session).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    session: &FeedSession,
) -> Result<()> {
    // Initial page
    session.request(app.feed_key());
    app.start_loading();

    loop {
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            // Filters on the left, cards on the right (1:4)
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 5), Constraint::Ratio(4, 5)])
                .split(main_layout[0]);

            FilterPanelWidget::render(frame, columns[0], app);
            CardGridWidget::render(frame, columns[1], app);
            StatusBarWidget::render(frame, main_layout[1], app);

            if app.mode == Mode::Help {
                PopupWidget::render_help(frame, &app.theme);
            }
        })?;

        if let Some(event) = events.next()? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    if let Some(command) = app.update(action) {
                        execute_command(app, session, command).await;
                    }
                }
                AppEvent::Feed(update) => {
                    if let Some(outcome) = session.accept(update) {
                        app.finish_loading(outcome);
                    }
                }
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {
                    if app.is_loading() {
                        app.tick_spinner();
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

async fn execute_command(app: &mut App, session: &FeedSession, command: Command) {
    match command {
        Command::Load => {
            app.status_message = None;
            session.request(app.feed_key());
            app.start_loading();
        }
        Command::Reload => {
            let key = app.feed_key();
            session.loader().invalidate(&key).await;
            session.request(key);
            app.start_loading();
        }
        Command::Open(url) => match open::that(&url) {
            Ok(()) => app.set_status(format!("Opened {}", url)),
            Err(e) => {
                tracing::warn!("Failed to open {}: {}", url, e);
                app.set_status(format!("Failed to open browser: {}", e));
            }
        },
    }
}
