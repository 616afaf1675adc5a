//! Presentation boundary.
//!
//! The dashboard core never draws anything itself. It calls a [`Presenter`]
//! with what should be shown, and the presenter decides how. The TUI and the
//! JSON export both use [`DisplayState`], which simply records the latest
//! values for the renderer to pick up on the next frame.

use serde::Serialize;

use crate::data::{Decoration, MarkerAsset};
use crate::source::Position;

/// Everything shown in a freshness line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreshnessView {
    /// "just now" or "N seconds ago".
    pub label: String,
    /// Raw report timestamp, shown as a tooltip.
    pub timestamp: i64,
    pub host: String,
    pub version: String,
}

impl FreshnessView {
    /// The full line, e.g. "Updated 42 seconds ago by monitor1 (1.13)".
    pub fn line(&self) -> String {
        format!("Updated {} by {} ({})", self.label, self.host, self.version)
    }
}

/// A marker placed on the map for one host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker {
    pub host: String,
    pub position: Position,
    pub asset: MarkerAsset,
}

/// Receiver of display updates from the [`Dashboard`](crate::Dashboard).
pub trait Presenter {
    /// Write the freshness line. Implementations must update every place the
    /// line is shown in one go, so no frame shows two different versions.
    fn render_freshness(&mut self, view: &FreshnessView);

    /// Show the "too old" warning and switch the border to [`Decoration::Warning`].
    fn render_stale_warning(&mut self);

    /// Hide the "too old" warning.
    fn clear_stale_warning(&mut self);

    /// Set the border decoration for a freshly received report.
    fn render_status(&mut self, decoration: Decoration);

    /// Remove all markers before a new set is placed.
    fn clear_markers(&mut self);

    fn place_marker(&mut self, marker: &PlacedMarker);
}

/// Freshness line as mirrored into the header and the footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FreshnessSlots {
    pub header: Option<FreshnessView>,
    pub footer: Option<FreshnessView>,
}

/// In-memory display state, the presenter behind the TUI.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayState {
    pub freshness: FreshnessSlots,
    pub stale_badge: bool,
    pub decoration: Decoration,
    pub markers: Vec<PlacedMarker>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header freshness line, `None` until the first report.
    pub fn header(&self) -> Option<&FreshnessView> {
        self.freshness.header.as_ref()
    }

    /// Footer freshness line, always identical to the header.
    pub fn footer(&self) -> Option<&FreshnessView> {
        self.freshness.footer.as_ref()
    }
}

impl Presenter for DisplayState {
    fn render_freshness(&mut self, view: &FreshnessView) {
        self.freshness = FreshnessSlots {
            header: Some(view.clone()),
            footer: Some(view.clone()),
        };
    }

    fn render_stale_warning(&mut self) {
        self.stale_badge = true;
        self.decoration = Decoration::Warning;
    }

    fn clear_stale_warning(&mut self) {
        self.stale_badge = false;
    }

    fn render_status(&mut self, decoration: Decoration) {
        self.decoration = decoration;
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn place_marker(&mut self, marker: &PlacedMarker) {
        self.markers.push(marker.clone());
    }
}
