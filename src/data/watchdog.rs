//! Refresh watchdog that decides when data is too old.

use std::time::Duration;

/// Fires once when no report has arrived for `timeout`.
///
/// All times are seconds since the epoch, supplied by the caller.
#[derive(Debug, Clone)]
pub struct RefreshWatchdog {
    timeout: Duration,
    armed_at: i64,
    fired: bool,
}

impl RefreshWatchdog {
    /// Create a watchdog armed at `now`.
    pub fn new(timeout: Duration, now: i64) -> Self {
        Self {
            timeout,
            armed_at: now,
            fired: false,
        }
    }

    /// Restart the window, typically on receipt of a report.
    pub fn arm(&mut self, now: i64) {
        self.armed_at = now;
        self.fired = false;
    }

    /// Returns `true` exactly once per window, on the first check at or
    /// after the deadline.
    pub fn check(&mut self, now: i64) -> bool {
        if self.fired {
            return false;
        }
        let timeout = i64::try_from(self.timeout.as_secs()).unwrap_or(i64::MAX);
        if now.saturating_sub(self.armed_at) >= timeout {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Seconds left before the watchdog fires, zero once it has.
    pub fn remaining(&self, now: i64) -> u64 {
        let elapsed = u64::try_from(now.saturating_sub(self.armed_at)).unwrap_or(0);
        self.timeout.as_secs().saturating_sub(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_timeout() {
        let mut watchdog = RefreshWatchdog::new(Duration::from_secs(60), 1000);

        assert!(!watchdog.check(1059));
        assert!(watchdog.check(1060));
        assert!(!watchdog.check(1061));
        assert!(!watchdog.check(5000));
    }

    #[test]
    fn test_arm_restarts_window() {
        let mut watchdog = RefreshWatchdog::new(Duration::from_secs(60), 1000);
        assert!(watchdog.check(1100));

        watchdog.arm(1100);
        assert!(!watchdog.check(1150));
        assert_eq!(watchdog.remaining(1150), 10);
        assert!(watchdog.check(1160));
    }

    #[test]
    fn test_remaining_before_start_is_full_window() {
        let watchdog = RefreshWatchdog::new(Duration::from_secs(30), 1000);
        assert_eq!(watchdog.remaining(990), 30);
        assert_eq!(watchdog.remaining(2000), 0);
    }
}
