use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{unix_now, App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Tab | KeyCode::BackTab => app.next_view(),
        KeyCode::Char('1') => app.set_view(View::Map),
        KeyCode::Char('2') => app.set_view(View::Hosts),

        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Enter if app.current_view == View::Hosts => app.focus_selected(),
        KeyCode::Esc if app.current_view == View::Hosts => app.set_view(View::Map),

        // Map zoom
        KeyCode::Char('+') | KeyCode::Char('=') => app.map.zoom_in(),
        KeyCode::Char('-') => app.map.zoom_out(),
        KeyCode::Char('0') => app.reset_map(),

        KeyCode::Char('r') => {
            app.reload_data(unix_now());
        }

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('s') if app.current_view == View::Hosts => app.cycle_sort(),
        KeyCode::Char('S') if app.current_view == View::Hosts => app.toggle_sort_direction(),

        KeyCode::Char('/') => {
            app.set_view(View::Hosts);
            app.start_filter();
        }
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("hostwatch_export.json");
            match app.export_state(&export_path, unix_now()) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.filter_active = false;
        }
        KeyCode::Esc => {
            app.cancel_filter();
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }
        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }
        KeyCode::Char(c) => {
            app.filter_push(c);
        }
        _ => {}
    }
}

/// Handle mouse events: the wheel scrolls the host list or zooms the map.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match (app.current_view, mouse.kind) {
        (View::Hosts, MouseEventKind::ScrollUp) => app.select_prev(),
        (View::Hosts, MouseEventKind::ScrollDown) => app.select_next(),
        (View::Map, MouseEventKind::ScrollUp) => app.map.zoom_in(),
        (View::Map, MouseEventKind::ScrollDown) => app.map.zoom_out(),
        _ => {}
    }
}
