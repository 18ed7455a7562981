use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use super::clock::{Clock, SystemClock};
use super::config::SessionConfig;
use super::poller::Poller;
use super::state::{SessionType, TimerState, TimerStatus};

/// How remaining time is tracked while running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownStrategy {
    /// Re-derive remaining time from an absolute deadline on every tick.
    /// Missed or late ticks do not cause drift.
    #[default]
    Deadline,
    /// Subtract a fixed step per tick. Drifts if ticks arrive late.
    Counter { step: Duration },
}

/// Result of feeding one poll tick into the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; ticks queued before a disarm land here
    Ignored,
    /// Still counting down
    Counting { remaining_ms: u64 },
    /// The session ran out and the machine moved on to the next one
    Completed {
        finished: SessionType,
        next: SessionType,
    },
}

/// Owns the timer state and the poller that drives it.
///
/// The poller is armed exactly while the status is `Running`.
pub struct TimerStateMachine<P: Poller, C: Clock = SystemClock> {
    config: SessionConfig,
    state: TimerState,
    strategy: CountdownStrategy,
    deadline: Option<Instant>,
    poller: P,
    clock: C,
}

impl<P: Poller, C: Clock> TimerStateMachine<P, C> {
    pub fn new(config: SessionConfig, poller: P, clock: C) -> Self {
        Self {
            state: initial_state(&config),
            config,
            strategy: CountdownStrategy::default(),
            deadline: None,
            poller,
            clock,
        }
    }

    pub fn with_strategy(mut self, strategy: CountdownStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> TimerState {
        self.state.clone()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn strategy(&self) -> CountdownStrategy {
        self.strategy
    }

    /// Begin or resume counting down from the current remaining time
    pub fn start(&mut self) {
        if self.state.status == TimerStatus::Running {
            debug!("start ignored, already running");
            return;
        }

        let remaining = Duration::from_millis(self.state.remaining_ms);
        self.deadline = Some(self.clock.now() + remaining);
        self.state.status = TimerStatus::Running;
        self.poller.arm();

        info!(
            "Started {} with {} left",
            self.state.session_label(),
            self.state.formatted_time()
        );
    }

    /// Freeze the countdown at its current value
    pub fn pause(&mut self) {
        if self.state.status != TimerStatus::Running {
            debug!("pause ignored, status is {:?}", self.state.status);
            return;
        }

        self.poller.disarm();
        if self.strategy == CountdownStrategy::Deadline {
            self.state.remaining_ms = self.remaining_from_deadline();
        }
        self.deadline = None;
        self.state.status = TimerStatus::Paused;

        info!(
            "Paused {} at {}",
            self.state.session_label(),
            self.state.formatted_time()
        );
    }

    /// Return to the first work session of the cycle
    pub fn reset(&mut self) {
        self.poller.disarm();
        self.deadline = None;
        self.state = initial_state(&self.config);
        info!("Timer reset");
    }

    /// Advance the countdown by one poll tick
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.status != TimerStatus::Running {
            trace!("tick ignored, status is {:?}", self.state.status);
            return TickOutcome::Ignored;
        }

        let remaining_ms = match self.strategy {
            CountdownStrategy::Deadline => self.remaining_from_deadline(),
            CountdownStrategy::Counter { step } => {
                let step_ms = u64::try_from(step.as_millis()).unwrap_or(u64::MAX);
                self.state.remaining_ms.saturating_sub(step_ms)
            }
        };

        if remaining_ms == 0 {
            self.poller.disarm();
            let finished = self.state.session_type;
            self.advance_session();
            return TickOutcome::Completed {
                finished,
                next: self.state.session_type,
            };
        }

        self.state.remaining_ms = remaining_ms;
        trace!("tick, {} ms left", remaining_ms);
        TickOutcome::Counting { remaining_ms }
    }

    /// Stop counting before the owner goes away.
    ///
    /// A running session is paused so the poller and status stay in step.
    pub fn shutdown(&mut self) {
        if self.state.status == TimerStatus::Running {
            debug!("Pausing running session on shutdown");
            self.pause();
        }
        self.poller.disarm();
    }

    #[cfg(test)]
    pub fn poller(&self) -> &P {
        &self.poller
    }

    fn remaining_from_deadline(&self) -> u64 {
        match self.deadline {
            Some(deadline) => {
                let left = deadline.saturating_duration_since(self.clock.now());
                u64::try_from(left.as_millis()).unwrap_or(u64::MAX)
            }
            None => {
                warn!("Running without a deadline, keeping last remaining time");
                self.state.remaining_ms
            }
        }
    }

    fn advance_session(&mut self) {
        let current = &self.state;
        let (next_type, next_session) = match current.session_type {
            SessionType::Work if current.current_session >= current.total_sessions => {
                (SessionType::LongBreak, current.current_session)
            }
            SessionType::Work => (SessionType::ShortBreak, current.current_session),
            SessionType::LongBreak => (SessionType::Work, 1),
            SessionType::ShortBreak => (SessionType::Work, current.current_session + 1),
        };

        let total_ms = duration_ms(self.config.duration_for(next_type));
        self.deadline = None;
        self.state = TimerState {
            session_type: next_type,
            current_session: next_session,
            total_sessions: self.state.total_sessions,
            remaining_ms: total_ms,
            total_ms,
            status: TimerStatus::Idle,
        };

        match serde_json::to_string(&self.state) {
            Ok(json) => info!("Session complete, next: {}", json),
            Err(e) => info!("Session complete, next: {} ({})", self.state.session_label(), e),
        }
    }
}

impl<P: Poller, C: Clock> Drop for TimerStateMachine<P, C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn initial_state(config: &SessionConfig) -> TimerState {
    let total_ms = duration_ms(config.duration_for(SessionType::Work));
    TimerState {
        session_type: SessionType::Work,
        current_session: 1,
        total_sessions: config.total_work_sessions,
        remaining_ms: total_ms,
        total_ms,
        status: TimerStatus::Idle,
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
