use clap::{Parser, Subcommand};
use env_logger::{Env, Target};
use log::{debug, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use mealdb_browser::app::App;
use mealdb_browser::render::{render_detail, render_results};
use mealdb_browser::tui::{self, EventHandler};
use mealdb_browser::{ui, BrowserConfig, BrowserError, MealDbClient, RecipeBrowser, RecipeSource};

#[derive(Parser)]
#[command(name = "mealdb-browser")]
#[command(version, about = "Look up recipes by ingredient from TheMealDB")]
struct Cli {
    /// Config file (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse recipes interactively (default)
    Browse,
    /// Search meals by ingredient and print them
    Search {
        /// Ingredient to search for
        #[arg(num_args = 0..)]
        ingredient: Vec<String>,
    },
    /// Print the full recipe for a meal id
    Show {
        /// Meal id from a search result
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = BrowserConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    let command = cli.command.unwrap_or(Commands::Browse);
    init_logging(&config, matches!(command, Commands::Browse))?;
    debug!("{:#?}", config);

    let client = Arc::new(MealDbClient::new(&config)?);

    match command {
        Commands::Browse => {
            run_tui(client, &config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Search { ingredient } => {
            let mut browser = RecipeBrowser::new(client);
            match browser.search(&ingredient.join(" ")).await {
                Ok(meals) => {
                    print!("{}", render_results(meals));
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) if e.is_validation() => {
                    eprintln!("{}", e);
                    Ok(ExitCode::FAILURE)
                }
                Err(e) => Err(e.into()),
            }
        }
        Commands::Show { id } => match client.lookup_by_id(id.trim()).await {
            Ok(meal) => {
                print!("{}", render_detail(&meal));
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{}", e);
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

/// The TUI owns the terminal, so its logs go to the configured file or
/// nowhere unless RUST_LOG asks for them.
fn init_logging(config: &BrowserConfig, interactive: bool) -> Result<(), BrowserError> {
    let default_filter = if interactive && config.log_file.is_none() {
        "off"
    } else {
        "warn"
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));
    if let Some(path) = &config.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

async fn run_tui(source: Arc<dyn RecipeSource>, config: &BrowserConfig) -> Result<(), BrowserError> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let mut events = EventHandler::new(Duration::from_millis(config.tick_rate_ms));
    let mut app = App::new(source, events.sender());
    info!("browsing {}", config.base_url);

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;
            match events.next().await {
                Some(event) => app.handle_event(event),
                None => break,
            }
        }
        Ok::<(), BrowserError>(())
    }
    .await;

    tui::restore()?;
    result
}
