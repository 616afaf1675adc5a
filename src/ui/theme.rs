//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{Decoration, HostState};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for the "too old" warning and the warning border.
    pub warning: Color,
    /// Color for down hosts and the danger border.
    pub danger: Color,
    /// Color for up hosts and the success border.
    pub success: Color,
    /// Color of the coastlines on the map.
    pub land: Color,
    pub header: Style,
    pub selected: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            danger: Color::Red,
            success: Color::Green,
            land: Color::DarkGray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            danger: Color::Red,
            success: Color::Green,
            land: Color::Gray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Border and status-word style for a decoration.
    pub fn decoration_style(&self, decoration: Decoration) -> Style {
        match decoration {
            Decoration::Success => Style::default().fg(self.success),
            Decoration::Danger => Style::default().fg(self.danger).add_modifier(Modifier::BOLD),
            Decoration::Warning => Style::default().fg(self.warning).add_modifier(Modifier::BOLD),
        }
    }

    /// Style of a host's marker glyph.
    pub fn marker_style(&self, state: HostState) -> Style {
        match state {
            HostState::Up => Style::default().fg(self.success),
            HostState::Down => Style::default().fg(self.danger).add_modifier(Modifier::BOLD),
        }
    }

    /// Style for a status string that is neither up nor down.
    pub fn invalid_style(&self) -> Style {
        Style::default().fg(self.warning).add_modifier(Modifier::DIM)
    }
}
