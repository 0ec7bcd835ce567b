//! Keyboard input dispatch — overlay first, then global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, Overlay};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. The help overlay consumes input until closed.
    if app.overlay == Overlay::Help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => app.overlay = Overlay::None,
            KeyCode::Char('q') => app.running = false,
            _ => {}
        }
        return;
    }

    // 2. Dashboard keys.
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.next_slide(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.previous_slide(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as u8 - b'1') as usize;
            app.go_to_slide(index);
        }
        KeyCode::Char('j') | KeyCode::Down => app.focus_next(),
        KeyCode::Char('k') | KeyCode::Up => app.focus_previous(),
        KeyCode::Char('p') => app.cycle_period(),
        KeyCode::Char('r') => app.switch_role(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
}
