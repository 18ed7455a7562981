use std::time::Duration;

use serde::Serialize;

use super::state::SessionType;

/// Work session length in seconds (25 minutes)
pub const WORK_DURATION_SECS: u64 = 25 * 60;
/// Short break length in seconds (5 minutes)
pub const SHORT_BREAK_DURATION_SECS: u64 = 5 * 60;
/// Long break length in seconds (15 minutes)
pub const LONG_BREAK_DURATION_SECS: u64 = 15 * 60;
/// Work sessions per cycle before the long break
pub const TOTAL_WORK_SESSIONS: u32 = 4;

/// Fixed session durations for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub work_duration_secs: u64,
    pub short_break_duration_secs: u64,
    pub long_break_duration_secs: u64,
    pub total_work_sessions: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            work_duration_secs: WORK_DURATION_SECS,
            short_break_duration_secs: SHORT_BREAK_DURATION_SECS,
            long_break_duration_secs: LONG_BREAK_DURATION_SECS,
            total_work_sessions: TOTAL_WORK_SESSIONS,
        }
    }
}

impl SessionConfig {
    /// Duration budgeted for a session of the given type
    pub fn duration_for(&self, session_type: SessionType) -> Duration {
        let secs = match session_type {
            SessionType::Work => self.work_duration_secs,
            SessionType::ShortBreak => self.short_break_duration_secs,
            SessionType::LongBreak => self.long_break_duration_secs,
        };
        Duration::from_secs(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic_pomodoro() {
        let config = SessionConfig::default();
        assert_eq!(config.duration_for(SessionType::Work), Duration::from_secs(1500));
        assert_eq!(config.duration_for(SessionType::ShortBreak), Duration::from_secs(300));
        assert_eq!(config.duration_for(SessionType::LongBreak), Duration::from_secs(900));
        assert_eq!(config.total_work_sessions, 4);
    }
}
