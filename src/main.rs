use anyhow::Result;
use crossterm::event;
use tokio::sync::mpsc;
use tracing::{error, info};

mod actions;
mod app;
mod input;
mod logging;
mod pomodoro;
mod settings;

use actions::Action;
use app::App;
use pomodoro::{IntervalPoller, SessionConfig, SystemClock, TimerStateMachine};
use settings::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize logging
    let log_path = logging::init(&config.log_dir)?;
    info!("Starting pomodoro-tui, log={}", log_path.display());

    // Create event channel
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

    // The poller feeds ticks into the same channel as key presses
    let poller = IntervalPoller::new(config.tick_interval, tx.clone(), Action::Tick);
    info!("Polling every {:?} while running", poller.period());
    let timer = TimerStateMachine::new(SessionConfig::default(), poller, SystemClock)
        .with_strategy(config.countdown);
    match serde_json::to_string(timer.config()) {
        Ok(json) => info!("Session config: {}, strategy: {:?}", json, timer.strategy()),
        Err(e) => error!("Failed to serialize session config: {}", e),
    }

    // Initialize terminal
    let mut terminal = ratatui::init();

    // Spawn input handler; it stops once the event loop drops the receiver
    let input_tx = tx.clone();
    tokio::task::spawn_blocking(move || {
        input::forward_input(event::poll, event::read, &input_tx);
    });
    drop(tx);

    // Create app state
    let mut app = App::new(timer);

    // Main event loop
    let result = loop {
        // Render
        if let Err(e) = terminal.draw(|f| app.render(f)) {
            break Err(e.into());
        }

        // Handle events from channel
        match rx.recv().await {
            Some(action) => match app.handle_action(action) {
                Ok(true) => break Ok(()),
                Ok(false) => {}
                Err(e) => break Err(e),
            },
            None => break Ok(()),
        }
    };

    app.shutdown();
    drop(rx);

    // Restore terminal
    ratatui::restore();

    if let Err(ref e) = result {
        error!("Exiting with error: {:#}", e);
    }
    info!("Shutdown complete");
    result
}
