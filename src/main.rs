use quick_links::app::App;
use quick_links::config::Config;
use quick_links::constants::{CHANNEL_CAPACITY, EVENT_POLL_TIMEOUT_MS};
use quick_links::event_handler::{handle_app_event, handle_key_event, handle_mouse_event};
use quick_links::logging::init_logging;
use quick_links::services::{BrowserLauncher, SystemClipboard};
use quick_links::storage::JsonFileStorage;
use quick_links::ui::ui;

use std::{error::Error, io, sync::Arc, time::Duration};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    config.ensure_data_dir()?;
    let _log_guard = init_logging(&config)?;
    info!(store = %config.store_path.display(), "starting quick links");

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let (tx, rx) = tokio::sync::mpsc::channel(CHANNEL_CAPACITY);
    let mut app = App::new(
        tx,
        rx,
        Arc::new(JsonFileStorage::new(config.store_path.clone())),
        Box::new(SystemClipboard::new()),
        Box::new(BrowserLauncher),
    );
    app.load().await;

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;
    app.settle().await;

    // Teardown
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("ui loop failed: {err}");
        println!("{:?}", err)
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);

        terminal.draw(|f| ui(f, app))?;

        // Timer events (notice expiry)
        while let Ok(event) = app.rx.try_recv() {
            handle_app_event(app, event);
        }

        // Input events
        if event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(app, key)? {
                        return Ok(()); // Quit signal received
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(app, mouse, area)?,
                _ => {}
            }
        } else {
            tokio::time::sleep(Duration::from_millis(EVENT_POLL_TIMEOUT_MS)).await;
        }
    }
}
