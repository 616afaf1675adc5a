//! The dashboard context: freshness alarm, marker assets and refresh timer.

use std::time::Duration;

use crate::data::{Freshness, FreshnessEvaluator, HostSummary, MarkerSet, RefreshWatchdog};
use crate::error::StatusError;
use crate::render::{FreshnessView, PlacedMarker, Presenter};
use crate::source::{HostReport, Snapshot, StatusReport};

/// Process-scoped dashboard state.
///
/// Created once with the two marker assets and the alarm in the fresh state.
/// Every event (a report arriving, a clock tick) goes through here, and the
/// resulting display changes are pushed to a [`Presenter`].
#[derive(Debug, Clone)]
pub struct Dashboard {
    evaluator: FreshnessEvaluator,
    markers: MarkerSet,
    watchdog: RefreshWatchdog,
    snapshot: Option<Snapshot>,
    hosts: Vec<HostReport>,
}

impl Dashboard {
    /// Create a dashboard whose staleness window starts at `now`.
    pub fn new(markers: MarkerSet, stale_after: Duration, now: i64) -> Self {
        Self {
            evaluator: FreshnessEvaluator::new(),
            markers,
            watchdog: RefreshWatchdog::new(stale_after, now),
            snapshot: None,
            hosts: Vec::new(),
        }
    }

    /// Take in a new report.
    ///
    /// Clears the stale alarm, re-decorates the status border, replaces all
    /// markers and renders the freshness line. Hosts with an invalid status
    /// get no marker; their errors are returned to the caller.
    pub fn receive<P: Presenter>(
        &mut self,
        report: StatusReport,
        now: i64,
        presenter: &mut P,
    ) -> Vec<StatusError> {
        let StatusReport { snapshot, hosts } = report;

        self.watchdog.arm(now);
        if self.evaluator.clear() {
            tracing::info!(host = %snapshot.host, "data refreshed, clearing stale warning");
            presenter.clear_stale_warning();
        }

        let summary = HostSummary::from_hosts(&hosts);
        presenter.render_status(summary.decoration());

        presenter.clear_markers();
        let mut errors = Vec::new();
        for host in &hosts {
            let asset = match self.markers.select_status(&host.name, &host.status) {
                Ok(asset) => asset,
                Err(e) => {
                    tracing::warn!(error = %e, "refusing to place marker");
                    errors.push(e);
                    continue;
                }
            };
            let Some(position) = host.position else {
                continue;
            };
            presenter.place_marker(&PlacedMarker {
                host: host.name.clone(),
                position,
                asset: asset.clone(),
            });
        }

        tracing::debug!(
            timestamp = snapshot.timestamp,
            up = summary.up,
            down = summary.down,
            invalid = summary.invalid,
            "report received"
        );

        self.snapshot = Some(snapshot);
        self.hosts = hosts;
        self.render_freshness(now, presenter);
        errors
    }

    /// Advance the clock.
    ///
    /// Refreshes the age label and raises the stale alarm once the refresh
    /// window has passed without a report.
    pub fn tick<P: Presenter>(&mut self, now: i64, presenter: &mut P) {
        self.render_freshness(now, presenter);

        if self.watchdog.check(now) && self.evaluator.mark_stale() {
            tracing::warn!(
                timeout_secs = self.watchdog.timeout().as_secs(),
                "no report received within the refresh window"
            );
            presenter.render_stale_warning();
        }
    }

    fn render_freshness<P: Presenter>(&self, now: i64, presenter: &mut P) {
        if let Some(view) = self.freshness_view(now) {
            presenter.render_freshness(&view);
        }
    }

    /// Freshness line for the current report, `None` before the first one.
    pub fn freshness_view(&self, now: i64) -> Option<FreshnessView> {
        let snapshot = self.snapshot.as_ref()?;
        let freshness = self.evaluator.evaluate(snapshot.timestamp, now);
        Some(FreshnessView {
            label: freshness.label,
            timestamp: snapshot.timestamp,
            host: snapshot.host.clone(),
            version: snapshot.version.clone(),
        })
    }

    pub fn freshness(&self, now: i64) -> Option<Freshness> {
        let snapshot = self.snapshot.as_ref()?;
        Some(self.evaluator.evaluate(snapshot.timestamp, now))
    }

    pub fn is_stale(&self) -> bool {
        self.evaluator.is_stale()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Hosts from the latest report, including ones without a marker.
    pub fn hosts(&self) -> &[HostReport] {
        &self.hosts
    }

    pub fn summary(&self) -> HostSummary {
        HostSummary::from_hosts(&self.hosts)
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Seconds until the stale alarm fires if nothing arrives.
    pub fn seconds_until_stale(&self, now: i64) -> u64 {
        self.watchdog.remaining(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Decoration, HostState};
    use crate::render::DisplayState;
    use crate::source::Position;

    fn report(timestamp: i64, hosts: Vec<HostReport>) -> StatusReport {
        StatusReport {
            snapshot: Snapshot {
                timestamp,
                host: "monitor1".to_string(),
                version: "1.13".to_string(),
            },
            hosts,
        }
    }

    fn host(name: &str, status: &str, position: Option<(f64, f64)>) -> HostReport {
        HostReport {
            name: name.to_string(),
            status: status.to_string(),
            position: position.map(|(lat, lon)| Position::new(lat, lon)),
        }
    }

    fn dashboard(now: i64) -> Dashboard {
        Dashboard::new(MarkerSet::default(), Duration::from_secs(60), now)
    }

    #[test]
    fn test_no_report_renders_nothing() {
        let mut dash = dashboard(1000);
        let mut display = DisplayState::new();

        dash.tick(1010, &mut display);
        assert!(display.header().is_none());
        assert!(dash.freshness(1010).is_none());
        assert!(!display.stale_badge);
    }

    #[test]
    fn test_receive_renders_label_and_markers() {
        let mut dash = dashboard(1000);
        let mut display = DisplayState::new();

        let errors = dash.receive(
            report(
                1000,
                vec![
                    host("web", "up", Some((47.61, -122.33))),
                    host("db", "down", Some((46.0, -120.0))),
                    host("printer", "up", None),
                ],
            ),
            1005,
            &mut display,
        );

        assert!(errors.is_empty());
        assert_eq!(display.header().unwrap().label, "just now");
        assert_eq!(display.header(), display.footer());
        assert_eq!(display.decoration, Decoration::Danger);
        assert_eq!(display.markers.len(), 2);
        assert_eq!(display.markers[0].asset.state, HostState::Up);
        assert_eq!(display.markers[1].asset.state, HostState::Down);
        assert_eq!(dash.hosts().len(), 3);
    }

    #[test]
    fn test_invalid_status_gets_no_marker() {
        let mut dash = dashboard(1000);
        let mut display = DisplayState::new();

        let errors = dash.receive(
            report(
                1000,
                vec![
                    host("web", "up", Some((47.61, -122.33))),
                    host("odd", "unknown", Some((40.0, -100.0))),
                ],
            ),
            1000,
            &mut display,
        );

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            StatusError::InvalidStatus {
                host: "odd".to_string(),
                status: "unknown".to_string(),
            }
        );
        assert_eq!(display.markers.len(), 1);
        assert_eq!(display.markers[0].host, "web");
    }

    #[test]
    fn test_tick_updates_age() {
        let mut dash = dashboard(1000);
        let mut display = DisplayState::new();
        dash.receive(report(1000, Vec::new()), 1000, &mut display);

        dash.tick(1042, &mut display);
        assert_eq!(display.header().unwrap().label, "42 seconds ago");
        assert_eq!(display.footer().unwrap().label, "42 seconds ago");
        assert_eq!(display.footer().unwrap().timestamp, 1000);
    }

    #[test]
    fn test_stale_fires_once_and_clears_on_receive() {
        let mut dash = dashboard(1000);
        let mut display = DisplayState::new();
        dash.receive(report(1000, vec![host("a", "up", None)]), 1000, &mut display);
        assert_eq!(display.decoration, Decoration::Success);

        dash.tick(1059, &mut display);
        assert!(!dash.is_stale());

        dash.tick(1060, &mut display);
        assert!(dash.is_stale());
        assert!(display.stale_badge);
        assert_eq!(display.decoration, Decoration::Warning);

        // The label keeps tracking the old report's age
        dash.tick(1100, &mut display);
        assert_eq!(display.header().unwrap().label, "100 seconds ago");
        assert!(dash.is_stale());

        dash.receive(report(1100, vec![host("a", "up", None)]), 1101, &mut display);
        assert!(!dash.is_stale());
        assert!(!display.stale_badge);
        assert_eq!(display.decoration, Decoration::Success);
    }

    #[test]
    fn test_stale_without_any_report() {
        let mut dash = dashboard(1000);
        let mut display = DisplayState::new();

        dash.tick(1060, &mut display);
        assert!(dash.is_stale());
        assert!(display.stale_badge);
        assert!(display.header().is_none());
    }
}
