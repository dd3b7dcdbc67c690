//! cropcast terminal map
//!
//! ```sh
//! cropcast --base-url http://localhost:8000 --display both
//! ```

use std::cell::RefCell;
use std::io;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use cropcast::{
    logging, reducer, Action, AppState, Args, Config, ForecastClient, ForecastEffects, ForecastUi,
};
use cropcast_core::{EffectRuntime, EffectStoreWithMiddleware, TracingMiddleware};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = match Config::from_args(Args::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&config.log_file, &config.log_level) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    info!(base_url = %config.base_url, display = config.display.label(), "starting");

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: Config,
) -> io::Result<()> {
    let effects = ForecastEffects::new(ForecastClient::new(config.forecast_url), config.timeout);

    let store = EffectStoreWithMiddleware::new(
        AppState::new(config.view, config.basemap, config.display),
        reducer,
        TracingMiddleware::new(),
    );
    let mut runtime = EffectRuntime::from_store(store);

    let size = terminal.size()?;
    runtime.enqueue(Action::UiTerminalResize(size.width, size.height));

    let ui = RefCell::new(ForecastUi::new());

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| effects.handle(effect, ctx.tasks()),
        )
        .await?;

    // Release the map before the terminal is restored.
    ui.borrow_mut().unmount();
    Ok(())
}
