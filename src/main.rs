use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing::{error, info};

use quaver::app::cli::Args;
use quaver::app::config::{AppConfig, PersistentState, UserConfig};
use quaver::app::events::AppEvent;
use quaver::app::logging::init_logging;
use quaver::app::{App, EventBridge};
use quaver::library::subsonic::SubsonicLibrary;
use quaver::library::RemoteLibrary;
use quaver::player::{get_backend, Command, PlayerAdapter};
use quaver::ui::{self, theme::load_theme};

const TICK_RATE: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    if args.generate_config {
        print!("{}", toml::to_string_pretty(&UserConfig::default())?);
        return Ok(());
    }

    let config_dir = AppConfig::get_config_dir();
    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = match init_logging(&config_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("quaver: logging disabled: {}", e);
            None
        }
    };

    let (mut config, state) = AppConfig::load();
    args.apply(&mut config);
    info!(server = %config.server.url, backend = %config.player.backend, "starting quaver");

    let theme = load_theme(&config_dir.join("theme.toml"));
    let library: Arc<dyn RemoteLibrary> = Arc::new(
        SubsonicLibrary::new(
            &config.server.url,
            &config.server.username,
            &config.server.password,
        )
        .context("Failed to set up the Subsonic client")?,
    );

    let backend = get_backend(&config.player);
    let (player, player_events, _worker) = PlayerAdapter::spawn(backend);
    player.send(0, Command::SetVolume(state.volume));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let app = App::new(&config, &state, theme);
    let mut bridge = EventBridge::new(app, player, library, config.enqueue_policy);
    bridge.bootstrap();

    let (tx, rx) = mpsc::channel(100);

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = crossterm::event::EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Tick Task (toast expiry)
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_RATE);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    let result = bridge
        .run(player_events, rx, |app| {
            terminal.draw(|f| ui::ui(f, app))?;
            Ok(())
        })
        .await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let app = bridge.into_app();
    PersistentState { volume: app.volume }.save();

    if let Err(e) = &result {
        error!("quaver exited with an error: {:#}", e);
    }
    info!("quaver stopped");
    result
}
