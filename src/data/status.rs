//! Overall dashboard status derived from a report's host list.

use serde::Serialize;

use super::marker::HostState;
use crate::source::HostReport;

/// Visual category of the status container's border.
///
/// `Success` and `Danger` come from the host list; `Warning` replaces
/// either of them while the data is too old.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoration {
    #[default]
    Success,
    Danger,
    Warning,
}

impl Decoration {
    /// Short status word shown next to the border.
    pub fn symbol(&self) -> &'static str {
        match self {
            Decoration::Success => "OK",
            Decoration::Danger => "FAIL",
            Decoration::Warning => "OLD",
        }
    }
}

/// Host counts for the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HostSummary {
    pub up: usize,
    pub down: usize,
    /// Hosts whose status is neither `up` nor `down`.
    pub invalid: usize,
}

impl HostSummary {
    pub fn from_hosts(hosts: &[HostReport]) -> Self {
        let mut summary = Self::default();
        for host in hosts {
            match host.status.parse::<HostState>() {
                Ok(HostState::Up) => summary.up += 1,
                Ok(HostState::Down) => summary.down += 1,
                Err(_) => summary.invalid += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.up + self.down + self.invalid
    }

    /// Border decoration for a fresh report: danger if anything is down.
    pub fn decoration(&self) -> Decoration {
        if self.down > 0 {
            Decoration::Danger
        } else {
            Decoration::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(name: &str, status: &str) -> HostReport {
        HostReport {
            name: name.to_string(),
            status: status.to_string(),
            position: None,
        }
    }

    #[test]
    fn test_all_up_is_success() {
        let summary = HostSummary::from_hosts(&[host("a", "up"), host("b", "up")]);
        assert_eq!(summary.up, 2);
        assert_eq!(summary.decoration(), Decoration::Success);
    }

    #[test]
    fn test_any_down_is_danger() {
        let summary = HostSummary::from_hosts(&[host("a", "up"), host("b", "down")]);
        assert_eq!(summary.down, 1);
        assert_eq!(summary.decoration(), Decoration::Danger);
    }

    #[test]
    fn test_invalid_statuses_are_counted_separately() {
        let summary = HostSummary::from_hosts(&[host("a", "up"), host("b", "maybe")]);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.decoration(), Decoration::Success);
    }

    #[test]
    fn test_empty_report_is_success() {
        assert_eq!(HostSummary::from_hosts(&[]).decoration(), Decoration::Success);
    }
}
