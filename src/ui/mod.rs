//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`map`]: world map with one marker per positioned host
//! - [`hosts`]: sortable table of every host in the latest report
//! - [`common`]: shared components (header, tabs, footer, help overlay)
//! - [`theme`]: light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header: status, counts, freshness    │
//! ├──────────────────────────────────────┤
//! │ Tabs                                 │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content (map::render or         │
//! │ hosts::render), border colored by    │
//! │ the current decoration               │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Footer: freshness (mirrored), keys   │
//! └──────────────────────────────────────┘
//! ```

pub mod common;
pub mod hosts;
pub mod map;
pub mod theme;

pub use map::MapViewport;
pub use theme::Theme;
