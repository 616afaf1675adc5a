//! Application state and navigation logic.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use crate::dashboard::Dashboard;
use crate::error::StatusError;
use crate::render::DisplayState;
use crate::source::{DataSource, HostReport};
use crate::ui::hosts::SortColumn;
use crate::ui::map::MapViewport;
use crate::ui::Theme;

/// Current wall-clock time in seconds since the epoch.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// World map with one marker per positioned host.
    Map,
    /// Table of every host in the latest report.
    Hosts,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Map => View::Hosts,
            View::Hosts => View::Map,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Map => "Map",
            View::Hosts => "Hosts",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    source: Box<dyn DataSource>,
    pub dashboard: Dashboard,
    pub display: DisplayState,
    pub load_error: Option<String>,
    /// Hosts from the latest report that were refused a marker.
    pub rejected: Vec<StatusError>,

    pub selected_host_index: usize,
    pub sort_column: SortColumn,
    pub sort_ascending: bool,

    pub filter_text: String,
    pub filter_active: bool,

    pub map: MapViewport,
    /// Viewport from configuration, restored by `reset_map`.
    map_home: MapViewport,
    pub theme: Theme,

    pub status_message: Option<(String, std::time::Instant)>,
}

impl App {
    pub fn new(source: Box<dyn DataSource>, dashboard: Dashboard, map: MapViewport) -> Self {
        Self {
            running: true,
            current_view: View::Map,
            show_help: false,
            source,
            dashboard,
            display: DisplayState::new(),
            load_error: None,
            rejected: Vec::new(),
            selected_host_index: 0,
            sort_column: SortColumn::default(),
            sort_ascending: true,
            filter_text: String::new(),
            filter_active: false,
            map,
            map_home: map,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, std::time::Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source and hand any new report to the dashboard.
    ///
    /// Returns `true` if a new report was received.
    pub fn reload_data(&mut self, now: i64) -> bool {
        let report = self.source.poll();
        self.load_error = self.source.error().map(str::to_string);

        let Some(report) = report else {
            return false;
        };

        self.rejected = self.dashboard.receive(report, now, &mut self.display);
        let rejected_message = self
            .rejected
            .first()
            .map(|first| format!("{} host(s) without marker: {}", self.rejected.len(), first));
        if let Some(message) = rejected_message {
            self.set_status_message(message);
        }

        let count = self.filtered_host_count();
        if self.selected_host_index >= count {
            self.selected_host_index = count.saturating_sub(1);
        }
        true
    }

    /// Advance the dashboard clock.
    pub fn tick(&mut self, now: i64) {
        self.dashboard.tick(now, &mut self.display);
    }

    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    pub fn select_next_n(&mut self, n: usize) {
        let max = self.filtered_host_count().saturating_sub(1);
        self.selected_host_index = (self.selected_host_index + n).min(max);
    }

    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_host_index = self.selected_host_index.saturating_sub(n);
    }

    pub fn select_first(&mut self) {
        self.selected_host_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_host_index = self.filtered_host_count().saturating_sub(1);
    }

    /// Hosts after filtering and sorting, in display order.
    pub fn visible_hosts(&self) -> Vec<&HostReport> {
        let mut hosts: Vec<&HostReport> = self
            .dashboard
            .hosts()
            .iter()
            .filter(|h| self.matches_filter(&h.name))
            .collect();
        crate::ui::hosts::sort_hosts_by(&mut hosts, self.sort_column, self.sort_ascending);
        hosts
    }

    fn filtered_host_count(&self) -> usize {
        self.dashboard.hosts().iter().filter(|h| self.matches_filter(&h.name)).count()
    }

    /// The host under the cursor in the Hosts view.
    pub fn selected_host(&self) -> Option<&HostReport> {
        self.visible_hosts().get(self.selected_host_index).copied()
    }

    /// Centre the map on the selected host, if it has a position.
    pub fn focus_selected(&mut self) {
        let Some(position) = self.selected_host().and_then(|h| h.position) else {
            self.set_status_message("Selected host has no position".to_string());
            return;
        };
        self.map.center_on(position);
        self.current_view = View::Map;
    }

    pub fn reset_map(&mut self) {
        self.map = self.map_home;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn cycle_sort(&mut self) {
        self.sort_column = self.sort_column.next();
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
    }

    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.selected_host_index = 0;
    }

    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
    }

    /// Check if a host name matches the current filter.
    pub fn matches_filter(&self, name: &str) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        name.to_lowercase().contains(&self.filter_text.to_lowercase())
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the rendered state to a JSON file.
    pub fn export_state(&self, path: &std::path::Path, now: i64) -> Result<()> {
        if self.dashboard.snapshot().is_none() {
            anyhow::bail!("No data to export");
        }
        let export = export_json(&self.dashboard, &self.display, &self.rejected, now);
        std::fs::write(path, serde_json::to_string_pretty(&export)?)?;
        Ok(())
    }
}

/// JSON document describing what the dashboard currently shows.
pub fn export_json(
    dashboard: &Dashboard,
    display: &DisplayState,
    rejected: &[StatusError],
    now: i64,
) -> serde_json::Value {
    let freshness = match (dashboard.snapshot(), dashboard.freshness(now)) {
        (Some(snapshot), Some(freshness)) => serde_json::json!({
            "label": freshness.label,
            "age": freshness.age,
            "stale": freshness.stale,
            "timestamp": snapshot.timestamp,
            "host": snapshot.host,
            "version": snapshot.version,
        }),
        _ => serde_json::Value::Null,
    };

    serde_json::json!({
        "freshness": freshness,
        "status": display.decoration.symbol(),
        "decoration": display.decoration,
        "stale_badge": display.stale_badge,
        "summary": dashboard.summary(),
        "markers": display.markers,
        "rejected": rejected.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
    })
}
