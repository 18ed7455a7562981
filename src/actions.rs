use crossterm::event::KeyEvent;

/// Actions that can be dispatched through the application
#[derive(Debug, Clone)]
pub enum Action {
    /// A key was pressed
    KeyPress(KeyEvent),
    /// The clock poller fired
    Tick,
    /// An error occurred
    Error(String),
    /// Request to quit the application
    Quit,
}
