use serde::{Deserialize, Serialize};

/// Kind of interval the timer is counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SessionType {
    /// Focus interval, counted toward the break cycle
    #[default]
    Work,
    /// Rest between two work sessions
    ShortBreak,
    /// Rest after the last work session of a cycle
    LongBreak,
}

impl SessionType {
    pub fn is_break(self) -> bool {
        !matches!(self, SessionType::Work)
    }
}

/// Run status of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    /// Freshly reset or just transitioned, not counting down
    #[default]
    Idle,
    /// Actively counting down
    Running,
    /// Stopped mid-session with the remaining time frozen
    Paused,
}

/// Indicator state of one work session in the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionDot {
    Completed,
    Current,
    Future,
}

/// Snapshot of the timer, handed out read-only to the views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub session_type: SessionType,
    pub current_session: u32,
    pub total_sessions: u32,
    pub remaining_ms: u64,
    pub total_ms: u64,
    pub status: TimerStatus,
}

impl TimerState {
    /// Remaining time as `MM:SS`, rounding partial seconds up
    pub fn formatted_time(&self) -> String {
        let total_secs = self.remaining_ms.div_ceil(1000);
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }

    /// Elapsed share of the current session, 0 to 100
    pub fn progress_percent(&self) -> f64 {
        if self.total_ms == 0 {
            return 0.0;
        }
        let elapsed = self.total_ms.saturating_sub(self.remaining_ms);
        elapsed as f64 / self.total_ms as f64 * 100.0
    }

    pub fn session_label(&self) -> String {
        match self.session_type {
            SessionType::Work => {
                format!("Focus {}/{}", self.current_session, self.total_sessions)
            }
            SessionType::ShortBreak => "Short Break".to_string(),
            SessionType::LongBreak => "Long Break".to_string(),
        }
    }

    /// One dot per work session in the cycle.
    ///
    /// During a break the current session's dot already counts as completed.
    pub fn session_dots(&self) -> Vec<SessionDot> {
        let on_break = self.session_type.is_break();
        (1..=self.total_sessions)
            .map(|session| {
                if session < self.current_session || (session == self.current_session && on_break) {
                    SessionDot::Completed
                } else if session == self.current_session {
                    SessionDot::Current
                } else {
                    SessionDot::Future
                }
            })
            .collect()
    }

    /// Label of the start/pause control for the current status
    pub fn primary_control(&self) -> &'static str {
        match self.status {
            TimerStatus::Running => "Pause",
            TimerStatus::Paused => "Resume",
            TimerStatus::Idle => "Start",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(
        session_type: SessionType,
        current_session: u32,
        remaining_ms: u64,
        total_ms: u64,
    ) -> TimerState {
        TimerState {
            session_type,
            current_session,
            total_sessions: 4,
            remaining_ms,
            total_ms,
            status: TimerStatus::Idle,
        }
    }

    #[test]
    fn test_formatted_time() {
        assert_eq!(state(SessionType::Work, 1, 65_000, 1_500_000).formatted_time(), "01:05");
        assert_eq!(state(SessionType::Work, 1, 0, 1_500_000).formatted_time(), "00:00");
        assert_eq!(state(SessionType::Work, 1, 1_500_000, 1_500_000).formatted_time(), "25:00");
    }

    #[test]
    fn test_formatted_time_rounds_partial_seconds_up() {
        assert_eq!(state(SessionType::Work, 1, 1, 1_500_000).formatted_time(), "00:01");
        assert_eq!(state(SessionType::Work, 1, 59_001, 1_500_000).formatted_time(), "01:00");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(state(SessionType::Work, 1, 1000, 1000).progress_percent(), 0.0);
        assert_eq!(state(SessionType::Work, 1, 0, 1000).progress_percent(), 100.0);
        assert_eq!(state(SessionType::Work, 1, 250, 1000).progress_percent(), 75.0);
    }

    #[test]
    fn test_progress_percent_zero_total() {
        assert_eq!(state(SessionType::Work, 1, 0, 0).progress_percent(), 0.0);
    }

    #[test]
    fn test_session_label() {
        assert_eq!(state(SessionType::Work, 3, 0, 0).session_label(), "Focus 3/4");
        assert_eq!(state(SessionType::ShortBreak, 3, 0, 0).session_label(), "Short Break");
        assert_eq!(state(SessionType::LongBreak, 4, 0, 0).session_label(), "Long Break");
    }

    #[test]
    fn test_session_dots_during_work() {
        let dots = state(SessionType::Work, 2, 0, 0).session_dots();
        assert_eq!(
            dots,
            vec![SessionDot::Completed, SessionDot::Current, SessionDot::Future, SessionDot::Future]
        );
    }

    #[test]
    fn test_session_dots_during_break() {
        let dots = state(SessionType::ShortBreak, 2, 0, 0).session_dots();
        assert_eq!(
            dots,
            vec![
                SessionDot::Completed,
                SessionDot::Completed,
                SessionDot::Future,
                SessionDot::Future
            ]
        );

        let dots = state(SessionType::LongBreak, 4, 0, 0).session_dots();
        assert!(dots.iter().all(|d| *d == SessionDot::Completed));
    }

    #[test]
    fn test_primary_control() {
        let mut s = state(SessionType::Work, 1, 0, 0);
        assert_eq!(s.primary_control(), "Start");
        s.status = TimerStatus::Running;
        assert_eq!(s.primary_control(), "Pause");
        s.status = TimerStatus::Paused;
        assert_eq!(s.primary_control(), "Resume");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(state(SessionType::ShortBreak, 1, 10, 20)).unwrap();
        assert_eq!(json["sessionType"], "shortBreak");
        assert_eq!(json["remainingMs"], 10);
        assert_eq!(json["status"], "idle");
    }
}
