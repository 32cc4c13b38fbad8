use std::time::{Duration, SystemTime};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerState {
    pub started_timestamp: SystemTime,
    pub ended_timestamp: Option<SystemTime>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::started_at(SystemTime::now())
    }
}

impl TimerState {
    pub fn started_at(now: SystemTime) -> Self {
        Self {
            started_timestamp: now,
            ended_timestamp: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.ended_timestamp.is_none()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(SystemTime::now())
    }

    /// Elapsed time as seen at `now`; frozen once the timer has ended.
    pub fn elapsed_at(&self, now: SystemTime) -> Duration {
        self.ended_timestamp
            .unwrap_or(now)
            .duration_since(self.started_timestamp)
            .unwrap_or_default()
    }

    pub fn ended(&self, now: SystemTime) -> TimerState {
        let mut new_state = self.clone();
        if new_state.ended_timestamp.is_none() {
            new_state.ended_timestamp = Some(now);
        }
        new_state
    }

    pub fn label(&self) -> String {
        format_mm_ss(self.elapsed().as_secs())
    }
}

/// Formats whole seconds as `mm:ss`. Minutes keep growing past 99.
pub fn format_mm_ss(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_with_end() {
        let now = SystemTime::now();
        let timer = TimerState {
            started_timestamp: now,
            ended_timestamp: Some(now + Duration::from_secs(10)),
        };

        assert_eq!(timer.elapsed(), Duration::from_secs(10));
        assert!(!timer.is_running());
    }

    #[test]
    fn test_elapsed_running() {
        let now = SystemTime::now();
        let timer = TimerState::started_at(now - Duration::from_secs(5));

        // real clock, so only a lower bound is stable
        assert!(timer.elapsed() >= Duration::from_secs(5));
        assert!(timer.is_running());
    }

    #[test]
    fn test_ended_only_once() {
        let now = SystemTime::now();
        let timer = TimerState::started_at(now)
            .ended(now + Duration::from_secs(3))
            .ended(now + Duration::from_secs(30));

        assert_eq!(timer.elapsed_at(now + Duration::from_secs(60)), Duration::from_secs(3));
    }

    #[test]
    fn test_clock_going_backwards_is_zero() {
        let now = SystemTime::now();
        let timer = TimerState::started_at(now);
        assert_eq!(timer.elapsed_at(now - Duration::from_secs(2)), Duration::ZERO);
    }

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(65), "01:05");
        assert_eq!(format_mm_ss(6000), "100:00");
    }
}
