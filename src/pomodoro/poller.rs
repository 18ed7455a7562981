use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::trace;

/// Default poll cadence while a session is running
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// A recurring trigger that can be armed and disarmed
pub trait Poller {
    /// Start firing. Any previously armed trigger is cancelled first.
    fn arm(&mut self);
    /// Stop firing. Safe to call when nothing is armed.
    fn disarm(&mut self);
    fn is_armed(&self) -> bool;
}

/// Sends `message` down a channel every `period` from a spawned tokio task.
///
/// Must be armed from within a tokio runtime. Dropping the poller aborts the
/// task, so no trigger outlives its owner.
pub struct IntervalPoller<M> {
    period: Duration,
    tx: mpsc::UnboundedSender<M>,
    message: M,
    handle: Option<JoinHandle<()>>,
}

impl<M> IntervalPoller<M> {
    pub fn new(period: Duration, tx: mpsc::UnboundedSender<M>, message: M) -> Self {
        Self {
            period,
            tx,
            message,
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            trace!("Poll task aborted");
        }
    }
}

impl<M: Clone + Send + 'static> Poller for IntervalPoller<M> {
    fn arm(&mut self) {
        self.cancel();

        let tx = self.tx.clone();
        let message = self.message.clone();
        let period = self.period;

        self.handle = Some(tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick resolves immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(message.clone()).is_err() {
                    break;
                }
            }
        }));
        trace!("Poll task armed every {:?}", period);
    }

    fn disarm(&mut self) {
        self.cancel();
    }

    fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl<M> Drop for IntervalPoller<M> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
pub use recording::RecordingPoller;
