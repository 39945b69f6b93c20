use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flipfeed_core::{AppConfig, Category, FilterState};

mod commands;

#[derive(Parser)]
#[command(name = "flipfeed")]
#[command(author, version, about = "Terminal news reader with flip-to-summary cards")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Print one page of the feed with summaries
    Feed {
        #[arg(long)]
        entertainment: bool,
        #[arg(long)]
        sports: bool,
        #[arg(long)]
        crime: bool,
        #[arg(long)]
        politics: bool,
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or edit the signed-in account
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Show the current user
    Show,
    /// Update profile fields
    Update {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

/// Install the tracing subscriber. While the TUI owns the terminal, logs go
/// to a file instead of stderr.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.general.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if to_file {
        let dir = config.data_dir();
        std::fs::create_dir_all(&dir)?;
        let appender = tracing_appender::rolling::never(&dir, "flipfeed.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .init();
        return Ok(Some(guard));
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
    Ok(None)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let tui = matches!(cli.command, None | Some(Commands::Run));
    let _log_guard = init_logging(&config, tui)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Feed {
            entertainment,
            sports,
            crime,
            politics,
            page,
            search,
            json,
        }) => {
            let mut filters = FilterState::default();
            filters.set(Category::Entertainment, entertainment);
            filters.set(Category::Sports, sports);
            filters.set(Category::Crime, crime);
            filters.set(Category::Politics, politics);
            commands::feed::run(&config, filters, page, search.as_deref(), json).await
        }
        Some(Commands::Account { action }) => match action {
            AccountAction::Show => commands::account::show(&config).await,
            AccountAction::Update { full_name, email } => {
                commands::account::update(&config, full_name, email).await
            }
        },
    }
}
