//! Map marker selection.
//!
//! Each host status maps onto one of two fixed marker assets. The assets are
//! built once when the [`MarkerSet`] is created and handed out by reference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StatusError;

/// Popup anchor offset shared by every marker, in pixels from the icon origin.
pub const POPUP_ANCHOR: (i32, i32) = (11, 2);

pub const DEFAULT_UP_ICON: &str = "marker-single-up.png";
pub const DEFAULT_DOWN_ICON: &str = "marker-single-down.png";
pub const DEFAULT_SHADOW: &str = "marker-shadow.png";

/// Up/down state of a monitored host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostState {
    Up,
    Down,
}

impl HostState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostState::Up => "up",
            HostState::Down => "down",
        }
    }
}

impl fmt::Display for HostState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostState {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(HostState::Up),
            "down" => Ok(HostState::Down),
            other => Err(StatusError::InvalidStatus {
                host: String::new(),
                status: other.to_string(),
            }),
        }
    }
}

/// Visual bundle used to draw a host on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerAsset {
    pub state: HostState,
    pub icon: String,
    pub shadow: String,
    pub popup_anchor: (i32, i32),
    /// Character drawn in place of the icon on a terminal map.
    pub glyph: char,
}

/// The two marker assets, one per [`HostState`].
#[derive(Debug, Clone)]
pub struct MarkerSet {
    up: MarkerAsset,
    down: MarkerAsset,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new(DEFAULT_UP_ICON, DEFAULT_DOWN_ICON, DEFAULT_SHADOW)
    }
}

impl MarkerSet {
    /// Build the marker set. Both assets share the shadow and the anchor.
    pub fn new(up_icon: &str, down_icon: &str, shadow: &str) -> Self {
        Self {
            up: MarkerAsset {
                state: HostState::Up,
                icon: up_icon.to_string(),
                shadow: shadow.to_string(),
                popup_anchor: POPUP_ANCHOR,
                glyph: '●',
            },
            down: MarkerAsset {
                state: HostState::Down,
                icon: down_icon.to_string(),
                shadow: shadow.to_string(),
                popup_anchor: POPUP_ANCHOR,
                glyph: '✖',
            },
        }
    }

    /// Marker for a known host state.
    pub fn select(&self, state: HostState) -> &MarkerAsset {
        match state {
            HostState::Up => &self.up,
            HostState::Down => &self.down,
        }
    }

    /// Marker for a raw status string from the feed.
    ///
    /// Fails with [`StatusError::InvalidStatus`] for anything but `up` or
    /// `down`; the caller must not draw a marker in that case.
    pub fn select_status(&self, host: &str, status: &str) -> Result<&MarkerAsset, StatusError> {
        match status.parse::<HostState>() {
            Ok(state) => Ok(self.select(state)),
            Err(_) => Err(StatusError::InvalidStatus {
                host: host.to_string(),
                status: status.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_returns_distinct_assets() {
        let markers = MarkerSet::default();
        let up = markers.select(HostState::Up);
        let down = markers.select(HostState::Down);

        assert!(!std::ptr::eq(up, down));
        assert_eq!(up.icon, DEFAULT_UP_ICON);
        assert_eq!(down.icon, DEFAULT_DOWN_ICON);
        assert_eq!(up.shadow, down.shadow);
        assert_eq!(up.popup_anchor, (11, 2));
        assert_eq!(down.popup_anchor, (11, 2));
    }

    #[test]
    fn test_select_returns_same_instance_each_time() {
        let markers = MarkerSet::default();
        assert!(std::ptr::eq(
            markers.select(HostState::Up),
            markers.select(HostState::Up)
        ));
        assert!(std::ptr::eq(
            markers.select_status("a", "down").unwrap(),
            markers.select(HostState::Down)
        ));
    }

    #[test]
    fn test_select_status_rejects_unknown_values() {
        let markers = MarkerSet::default();

        for bad in ["", "UP", "Down", "unknown", " up"] {
            let err = markers.select_status("web", bad).unwrap_err();
            assert_eq!(
                err,
                StatusError::InvalidStatus {
                    host: "web".to_string(),
                    status: bad.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_custom_icons_keep_anchor() {
        let markers = MarkerSet::new("green.png", "red.png", "shade.png");
        let down = markers.select(HostState::Down);
        assert_eq!(down.icon, "red.png");
        assert_eq!(down.shadow, "shade.png");
        assert_eq!(down.popup_anchor, POPUP_ANCHOR);
    }

    #[test]
    fn test_host_state_round_trips_through_str() {
        assert_eq!("up".parse::<HostState>().unwrap(), HostState::Up);
        assert_eq!(HostState::Down.to_string(), "down");
    }
}
