mod api;
mod app;
mod cli;
mod config;
mod logging;
mod runtime;
mod session_store;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use session_store::{SessionStore, SystemClock};
use std::io;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    // Read before the runtime and log writer spawn their threads.
    let clock = SystemClock::detect();

    match cli.command {
        cli::Commands::ConfigPath => {
            let path = config::DaylogConfig::config_path()?;
            if !path.exists() {
                config::DaylogConfig::default().save()?;
            }
            println!("{}", path.display());
        }
        cli::Commands::Connect { api_key } => {
            let api_key = match api_key {
                Some(key) => key,
                None => rpassword::prompt_password("Linear API key: ")
                    .context("Failed to read API key")?,
            };
            let api_key = api_key.trim();
            if api_key.is_empty() {
                anyhow::bail!("No API key given");
            }

            let mut cfg = config::DaylogConfig::load()?;
            cfg.linear_api_key = Some(api_key.to_string());
            cfg.save()?;
            println!("Linear connected. Run `daylog-tui run` to plan your day.");
        }
        cli::Commands::Disconnect => {
            let mut cfg = config::DaylogConfig::load()?;
            cfg.linear_api_key = None;
            cfg.save()?;
            println!("Linear API key removed.");
        }
        cli::Commands::Run => {
            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            runtime.block_on(run(clock))?;
        }
    }

    Ok(())
}

async fn run(clock: SystemClock) -> Result<()> {
    let _log_guard = logging::init()?;

    let cfg = config::DaylogConfig::load()?;
    let client = api::ApiClient::new(&cfg.api_url, cfg.api_key())?;
    let store = SessionStore::on_disk(config::root_path()?, clock);
    tracing::info!("starting against {}", cfg.api_url);

    let mut app = App::new(store.today(), clock.offset());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, client, store).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("app exited with error: {:#}", err);
        eprintln!("Error: {:?}", err);
    }

    if let Some(share_text) = app.share_text_on_exit {
        println!("{}", share_text);
    }

    Ok(())
}
