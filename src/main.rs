//! Photogrid - Browse Unsplash image search results in the terminal
//!
//! A terminal UI application that searches the Unsplash photo API, shows
//! results as a grid of cards and pages through them.

use std::io;
use std::panic;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use photogrid::app::App;
use photogrid::cache::ResultCache;
use photogrid::cli::{Cli, StartupConfig};
use photogrid::controller::SearchController;
use photogrid::data::{ImageSearch, UnsplashClient};
use photogrid::fetcher::FetchWorker;
use photogrid::{logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Opens the URL the user asked for, reporting failures in the footer
fn open_in_browser(app: &mut App, url: &str) {
    match open::that(url) {
        Ok(()) => {
            tracing::debug!(url = %url, "opened image in browser");
            app.status_message = Some("Opened in browser".to_string());
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "failed to open browser");
            app.status_message = Some("Could not open the browser".to_string());
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    if let Some(path) = logging::init_logging(&config.log_level) {
        tracing::info!(log_file = %path.display(), query = %config.query, "starting photogrid");
    }

    let client: Arc<dyn ImageSearch> =
        Arc::new(UnsplashClient::new(config.client_id.as_str()).with_base_url(config.api_url.as_str()));
    let controller = SearchController::with_query(ResultCache::new(), &config.query);
    let mut app = App::new(controller);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut worker = FetchWorker::spawn(client);

    // First page loads in the background; the grid shows the loading state
    app.controller.initialize();
    worker.submit_all(app.controller.take_requests());

    // Main event loop
    loop {
        while let Some(outcome) = worker.try_recv() {
            app.apply_outcome(outcome);
        }

        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        worker.submit_all(app.controller.take_requests());

        if let Some(url) = app.take_open_request() {
            open_in_browser(&mut app, &url);
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    tracing::info!("photogrid exiting");
    Ok(())
}
