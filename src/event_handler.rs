use crate::app::App;
use crate::layout::{Hit, popup_layout};
use crate::models::{AppEvent, InputMode, RowAction};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::io::Result;

/// Returns `Ok(true)` when the user asked to quit.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    let selected = app.selected;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),

        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),

        KeyCode::Char('a') => {
            app.add();
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('e') | KeyCode::Char('i') => {
            if app.selected_link().is_some() {
                app.input_mode = InputMode::Editing;
            }
        }

        // --- ROW ACTIONS ---
        KeyCode::Char('c') | KeyCode::Char('y') => app.dispatch(RowAction::Copy(selected)),
        KeyCode::Char('o') | KeyCode::Enter => app.dispatch(RowAction::Launch(selected)),
        KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => {
            app.dispatch(RowAction::Remove(selected))
        }

        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }
    Ok(false)
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    let selected = app.selected;
    let Some(current) = app.selected_link().map(str::to_string) else {
        app.input_mode = InputMode::Normal;
        return Ok(false);
    };

    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.input_mode = InputMode::Normal,

        // CLEAR LINE
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.dispatch(RowAction::Update(selected, String::new()));
        }

        // PASTE
        KeyCode::Char('v') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(text) = app.clipboard_text() {
                let sanitized = text.replace(['\n', '\r'], "");
                app.dispatch(RowAction::Update(selected, current + &sanitized));
            }
        }

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut text = current;
            text.push(c);
            app.dispatch(RowAction::Update(selected, text));
        }
        KeyCode::Backspace => {
            let mut text = current;
            if text.pop().is_some() {
                app.dispatch(RowAction::Update(selected, text));
            }
        }
        _ => {}
    }
    Ok(false)
}

/// Left clicks on the popup. `area` must be the area the last frame was drawn
/// into.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, area: Rect) -> Result<()> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = popup_layout(area, app.links.len(), app.selected);
            match layout.hit(mouse.column, mouse.row) {
                Some(Hit::Toggle) => app.toggle_theme(),
                Some(Hit::Add) => {
                    app.add();
                    app.input_mode = InputMode::Editing;
                }
                Some(Hit::Field(index)) => {
                    app.selected = index;
                    app.input_mode = InputMode::Editing;
                }
                Some(Hit::Copy(index)) => {
                    app.selected = index;
                    app.dispatch(RowAction::Copy(index));
                }
                Some(Hit::Launch(index)) => {
                    app.selected = index;
                    app.dispatch(RowAction::Launch(index));
                }
                Some(Hit::Remove(index)) => {
                    app.input_mode = InputMode::Normal;
                    app.dispatch(RowAction::Remove(index));
                }
                None => {}
            }
        }
        // Scrolling moves the selection, so any edit in progress ends first.
        MouseEventKind::ScrollDown => {
            app.input_mode = InputMode::Normal;
            app.select_next();
        }
        MouseEventKind::ScrollUp => {
            app.input_mode = InputMode::Normal;
            app.select_previous();
        }
        _ => {}
    }
    Ok(())
}

pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::NoticeExpired(generation) => app.expire_notice(generation),
    }
}
