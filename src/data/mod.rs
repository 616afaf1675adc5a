//! Decision logic of the dashboard.
//!
//! ## Submodules
//!
//! - [`freshness`]: age labels and the fresh/stale alarm
//! - [`marker`]: host state to map marker selection
//! - [`status`]: border decoration and host counts for a report
//! - [`watchdog`]: the timer that decides when data is too old
//! - [`duration`]: parsing and formatting of duration strings (e.g. "90s", "2m")
//!
//! Nothing in here performs I/O or reads the clock; time is always passed in.

pub mod duration;
pub mod freshness;
pub mod marker;
pub mod status;
pub mod watchdog;

pub use freshness::{age_label, AlarmState, Freshness, FreshnessEvaluator};
pub use marker::{HostState, MarkerAsset, MarkerSet, POPUP_ANCHOR};
pub use status::{Decoration, HostSummary};
pub use watchdog::RefreshWatchdog;
