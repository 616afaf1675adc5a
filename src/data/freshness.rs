//! Report freshness: age labels and the "too old" alarm.
//!
//! The age label and the alarm are independent. The label always describes
//! the age of the most recent report. The alarm is raised from outside (by
//! the refresh watchdog) when no report has arrived for a while, and is only
//! cleared when a new report is received.

use serde::Serialize;

/// Reports younger than this many seconds are shown as "just now".
pub const JUST_NOW_SECONDS: i64 = 10;

/// Build the age label for a report generated at `snapshot_ts`.
///
/// Both arguments are seconds since the epoch. A report from the future
/// (clock skew) has a negative age and is labelled "just now". Ages beyond
/// the `i64` range saturate.
pub fn age_label(snapshot_ts: i64, now: i64) -> String {
    let diff = now.saturating_sub(snapshot_ts);
    if diff < JUST_NOW_SECONDS {
        "just now".to_string()
    } else {
        format!("{} seconds ago", diff)
    }
}

/// State of the "too old" alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmState {
    #[default]
    Fresh,
    Stale,
}

/// Result of evaluating a report's age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Freshness {
    pub label: String,
    /// Raw age in seconds; negative under clock skew.
    pub age: i64,
    /// Whether the alarm is currently raised.
    pub stale: bool,
}

/// Computes age labels and owns the freshness alarm.
#[derive(Debug, Clone, Default)]
pub struct FreshnessEvaluator {
    alarm: AlarmState,
}

impl FreshnessEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a report timestamp against `now`. Never touches the alarm.
    pub fn evaluate(&self, snapshot_ts: i64, now: i64) -> Freshness {
        Freshness {
            label: age_label(snapshot_ts, now),
            age: now.saturating_sub(snapshot_ts),
            stale: self.is_stale(),
        }
    }

    /// Raise the alarm. Returns `true` if this call moved the state from
    /// fresh to stale.
    pub fn mark_stale(&mut self) -> bool {
        let transitioned = self.alarm == AlarmState::Fresh;
        self.alarm = AlarmState::Stale;
        transitioned
    }

    /// Drop the alarm after a new report arrived. Returns `true` if the
    /// alarm was raised.
    pub fn clear(&mut self) -> bool {
        let transitioned = self.alarm == AlarmState::Stale;
        self.alarm = AlarmState::Fresh;
        transitioned
    }

    pub fn state(&self) -> AlarmState {
        self.alarm
    }

    pub fn is_stale(&self) -> bool {
        self.alarm == AlarmState::Stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_report_is_just_now() {
        assert_eq!(age_label(1000, 1005), "just now");
        assert_eq!(age_label(1000, 1000), "just now");
        assert_eq!(age_label(1000, 1009), "just now");
    }

    #[test]
    fn test_older_report_counts_seconds() {
        assert_eq!(age_label(1000, 1010), "10 seconds ago");
        assert_eq!(age_label(1000, 1042), "42 seconds ago");
        assert_eq!(age_label(0, 86_400), "86400 seconds ago");
    }

    #[test]
    fn test_future_report_is_just_now() {
        assert_eq!(age_label(1000, 900), "just now");
        assert_eq!(age_label(i64::from(u32::MAX), 0), "just now");
    }

    #[test]
    fn test_extreme_timestamps_saturate() {
        let now = 1_700_000_000;
        assert_eq!(age_label(i64::MIN, now), format!("{} seconds ago", i64::MAX));
        assert_eq!(age_label(i64::MAX, now), "just now");
        assert_eq!(age_label(i64::MAX, i64::MIN), "just now");

        let evaluator = FreshnessEvaluator::new();
        assert_eq!(evaluator.evaluate(i64::MIN, now).age, i64::MAX);
        assert_eq!(evaluator.evaluate(i64::MAX, i64::MIN).age, i64::MIN);
    }

    #[test]
    fn test_evaluate_does_not_change_alarm() {
        let evaluator = FreshnessEvaluator::new();
        let first = evaluator.evaluate(1000, 1042);
        let second = evaluator.evaluate(1000, 1042);

        assert_eq!(first, second);
        assert_eq!(first.label, "42 seconds ago");
        assert_eq!(first.age, 42);
        assert!(!first.stale);
        assert_eq!(evaluator.state(), AlarmState::Fresh);
    }

    #[test]
    fn test_mark_stale_is_idempotent() {
        let mut evaluator = FreshnessEvaluator::new();

        assert!(evaluator.mark_stale());
        assert!(evaluator.is_stale());

        assert!(!evaluator.mark_stale());
        assert_eq!(evaluator.state(), AlarmState::Stale);
    }

    #[test]
    fn test_clear_returns_to_fresh() {
        let mut evaluator = FreshnessEvaluator::new();
        assert!(!evaluator.clear());

        evaluator.mark_stale();
        assert!(evaluator.evaluate(1000, 1005).stale);

        assert!(evaluator.clear());
        assert_eq!(evaluator.state(), AlarmState::Fresh);
        assert!(!evaluator.evaluate(1000, 1005).stale);
    }
}
