//! Keyboard input dispatch: text input → overlays → global keys → panel keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel, Source};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl-C always quits, even mid-edit.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    // 1. An active text input swallows everything.
    if app.is_editing() {
        handle_text_input(app, key);
        return;
    }

    // 2. Overlays consume input next.
    if app.overlay == Overlay::ErrorHistory {
        handle_error_overlay(app, key);
        return;
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(panel) = c.to_digit(10).and_then(|d| Panel::from_index(d as usize - 1)) {
                app.active_panel = panel;
            }
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // 4. Panel-specific keys.
    match app.active_panel {
        Panel::Status => handle_status_key(app, key),
        Panel::StatCan => handle_explorer_key(app, Source::StatCan, key),
        Panel::Boc => handle_explorer_key(app, Source::Boc, key),
        Panel::Help => handle_help_key(app, key),
    }
}

fn handle_text_input(app: &mut AppState, key: KeyEvent) {
    let Some(explorer) = app.active_explorer_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => explorer.editing = false,
        KeyCode::Enter => {
            explorer.editing = false;
            let source = explorer.source;
            app.request_fetch(source);
        }
        KeyCode::Backspace => {
            explorer.input.pop();
        }
        KeyCode::Char(c) => explorer.input.push(c),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_status_key(app: &mut AppState, key: KeyEvent) {
    if let KeyCode::Char('r') = key.code {
        app.request_health();
    }
}

fn handle_explorer_key(app: &mut AppState, source: Source, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Char('/') => app.explorer_mut(source).editing = true,
        KeyCode::Enter | KeyCode::Char('f') => app.request_fetch(source),
        KeyCode::Char('c') => app.explorer_mut(source).input.clear(),
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('k') | KeyCode::Up => {
            app.explorer_mut(source).toggle_focus();
        }
        KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => {
            app.explorer_mut(source).focused_mut().next_page();
        }
        KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => {
            app.explorer_mut(source).focused_mut().prev_page();
        }
        _ => {}
    }
}

fn handle_help_key(app: &mut AppState, key: KeyEvent) {
    if let KeyCode::Char('e') = key.code {
        app.overlay = Overlay::ErrorHistory;
        app.error_scroll = 0;
    }
}
