//! GymGen terminal front-end
//!
//! Collects a training goal and experience level, asks the workout service for a
//! weekly plan and renders whatever state the workout session publishes.

use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use gymgen_core::{Config, HttpWorkoutClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod handler;
mod tui;
mod ui;

use app::App;
use tui::EventHandler;

/// Log to a file in the config dir; stderr belongs to the terminal UI
fn init_logging() -> Result<()> {
    let log_dir = Config::config_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create {:?}", log_dir))?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("gymgen.log"))
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    info!("Starting GymGen v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().context("Failed to load config")?;
    let client_config = config.client_config();
    let client = HttpWorkoutClient::new(&client_config)?;
    info!("Workout service endpoint: {}", client.endpoint());

    let mut app = App::new(Arc::new(client), &config.base_url);
    let mut events = EventHandler::new(app.session().subscribe());

    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;

            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event),
                None => break,
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    info!("GymGen exiting");
    result
}
