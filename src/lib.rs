//! # hostwatch
//!
//! A terminal status dashboard for a host-monitoring tool. It shows how long
//! ago the monitoring data was refreshed, raises a warning when no fresh
//! report arrives in time, and draws every monitored host on a world map
//! with an up or down marker.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐  StatusReport  ┌───────────┐  Presenter calls  ┌──────────────┐
//! │  source  │───────────────▶│ Dashboard │──────────────────▶│ DisplayState │──▶ ui
//! └──────────┘                └─────┬─────┘                   └──────────────┘
//!                                   │ owns
//!                   ┌───────────────┼────────────────┐
//!                   ▼               ▼                ▼
//!           FreshnessEvaluator   MarkerSet     RefreshWatchdog
//! ```
//!
//! - **[`source`]**: the [`DataSource`] trait with file, stream and channel
//!   implementations
//! - **[`data`]**: the decision logic. Age labels, the fresh/stale alarm,
//!   marker selection and the refresh watchdog. No I/O, no clock reads.
//! - **[`dashboard`]**: the [`Dashboard`] context object that ties the core
//!   together and pushes updates to a [`Presenter`]
//! - **[`render`]**: the [`Presenter`] boundary and [`DisplayState`]
//! - **[`ui`]**, **[`app`]**, **[`events`]**: the ratatui front end
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use hostwatch::{Dashboard, DisplayState, HostReport, MarkerSet, Position, Snapshot, StatusReport};
//!
//! let mut dashboard = Dashboard::new(MarkerSet::default(), Duration::from_secs(60), 1000);
//! let mut display = DisplayState::new();
//!
//! let report = StatusReport {
//!     snapshot: Snapshot { timestamp: 1000, host: "monitor1".into(), version: "1.13".into() },
//!     hosts: vec![HostReport {
//!         name: "web".into(),
//!         status: "up".into(),
//!         position: Some(Position::new(47.61, -122.33)),
//!     }],
//! };
//! dashboard.receive(report, 1000, &mut display);
//! dashboard.tick(1042, &mut display);
//!
//! assert_eq!(display.header().unwrap().label, "42 seconds ago");
//! assert_eq!(display.markers[0].asset.popup_anchor, (11, 2));
//! ```

pub mod app;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod events;
pub mod render;
pub mod source;
pub mod ui;

pub use app::App;
pub use dashboard::Dashboard;
pub use data::{
    age_label, AlarmState, Decoration, Freshness, FreshnessEvaluator, HostState, HostSummary,
    MarkerAsset, MarkerSet, RefreshWatchdog,
};
pub use error::StatusError;
pub use render::{DisplayState, FreshnessView, PlacedMarker, Presenter};
pub use source::{
    ChannelSource, DataSource, FileSource, HostReport, Position, Snapshot, StatusReport,
    StreamSource,
};
