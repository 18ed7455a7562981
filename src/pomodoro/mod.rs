mod clock;
mod config;
mod machine;
mod poller;
mod state;

pub use clock::{Clock, SystemClock};
pub use config::SessionConfig;
pub use machine::{CountdownStrategy, TickOutcome, TimerStateMachine};
pub use poller::{IntervalPoller, Poller, DEFAULT_TICK_INTERVAL};
pub use state::{SessionDot, SessionType, TimerState, TimerStatus};

#[cfg(test)]
pub use clock::ManualClock;
#[cfg(test)]
pub use poller::RecordingPoller;
