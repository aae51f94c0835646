#[macro_use]
mod logging;

mod api;
mod app;
mod carousel;
mod store;
mod terminal;
mod toast;
mod ui;

use anyhow::Result;
use app::{App, InputMode, Route};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::Duration;

/// Murmur - a keyboard-driven client for the Murmur social network
#[derive(Parser)]
#[command(name = "murmur")]
#[command(about = "A terminal client for the Murmur social network")]
#[command(version)]
struct Cli {
    /// Server URL to connect to
    #[arg(long, short, env = "MURMUR_SERVER_URL")]
    server: Option<String>,

    /// Act as this user; enables deleting your own posts
    #[arg(long, env = "MURMUR_USER_ID")]
    user: Option<uuid::Uuid>,

    /// Use the light color scheme
    #[arg(long)]
    light: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

// Load environment variables from .env file
// This allows MURMUR_SERVER_URL and other config to be set without
// command-line args
fn load_env() {
    let _ = dotenv::dotenv();
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        logging::LogConfig::verbose()
    } else {
        logging::LogConfig::default()
    };
    logging::init_logging(&log_config)?;

    let base_url = cli
        .server
        .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());
    let api_client = api::ApiClient::new(base_url);

    let mut app = App::new(api_client);
    app.log_config = log_config;
    if cli.light {
        app.color_scheme = ui::theme::ColorScheme::Light;
    }

    // Resolve the acting user before entering the alternate screen so a
    // bad id surfaces in the log rather than as an empty screen
    if let Some(user_id) = cli.user {
        match app.api_client.get_user_profile(&user_id.to_string()).await {
            Ok(profile) => app.current_user = Some(profile),
            Err(e) => log::warn!("could not resolve --user {}: {}", user_id, e),
        }
    }

    let mut tui = terminal::init()?;
    let result = run(&mut tui, &mut app).await;
    terminal::restore()?;
    result
}

async fn run(tui: &mut terminal::Tui, app: &mut App) -> Result<()> {
    app.feed_state.pending_load = true;

    while app.running {
        // Resolve one pending author per loop turn; requests stay
        // sequential so input handling never starves
        if let Some(key) = app.unresolved_authors().into_iter().next() {
            app.resolve_profile(key).await?;
        }

        // The profile screen resolves through the same directory
        if let Route::Profile(username) = app.route.clone() {
            app.resolve_profile(username).await?;
        }

        // Expire old notifications
        app.toasts.sweep();

        tui.draw(|frame| ui::render(app, frame))?;

        // Perform a pending feed load after the loading state rendered once
        if app.feed_state.pending_load {
            app.feed_state.pending_load = false;
            app.load_feed().await?;
        }

        // Handle events with timeout
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;

            // Keyboard-only navigation
            if matches!(ev, Event::Mouse(_)) {
                continue;
            }

            if let Event::Key(key) = ev {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                log_key_event!(app.log_config, "key={:?}, route={:?}", key.code, app.route);

                // Keys that issue network requests are dispatched here;
                // everything else is synchronous state work
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') if app.delete_confirm.is_some() => {
                        app.confirm_delete().await?;
                    }
                    _ if app.delete_confirm.is_some() => {
                        app.handle_key_event(key)?;
                    }
                    KeyCode::Enter if app.input_mode == InputMode::Typing => {
                        app.submit_reply().await?;
                    }
                    KeyCode::Enter if matches!(app.route, Route::Feed) => {
                        if let Some(post_id) = app.selected_feed_post().map(|p| p.id) {
                            app.open_post_detail(post_id).await?;
                        }
                    }
                    _ => app.handle_key_event(key)?,
                }
            }
        }
    }

    Ok(())
}
