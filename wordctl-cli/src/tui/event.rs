//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, DictionaryState, Tab};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
    /// Open the selected word (may need a lookup)
    Open,
    /// Toggle the open word in favorites
    ToggleFavorite,
    /// Fetch the word list again after a failure
    ReloadDictionary,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return HandleResult::Quit,
            _ => {}
        }
    }

    // Any key dismisses a notice
    if app.notice.is_some() {
        app.dismiss_notice();
        return HandleResult::Continue;
    }

    if app.panel_open() {
        if let Some(result) = handle_detail_key(app, key) {
            return result;
        }
    }

    match key.code {
        KeyCode::Char('q') => HandleResult::Quit,

        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            HandleResult::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
            HandleResult::Continue
        }
        KeyCode::Enter | KeyCode::Char('l') => HandleResult::Open,

        KeyCode::Char('r') if app.dictionary_state == DictionaryState::Failed => {
            app.dictionary_state = DictionaryState::Loading;
            HandleResult::ReloadDictionary
        }

        KeyCode::Char('1') => {
            app.switch_tab(Tab::Words);
            HandleResult::Continue
        }
        KeyCode::Char('2') => {
            app.switch_tab(Tab::Favorites);
            HandleResult::Continue
        }
        KeyCode::Char('3') => {
            app.switch_tab(Tab::History);
            HandleResult::Continue
        }

        _ => HandleResult::Continue,
    }
}

/// Keys that act on the detail panel; `None` falls through to the list
fn handle_detail_key(app: &mut App, key: KeyEvent) -> Option<HandleResult> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
            app.close_panel();
            Some(HandleResult::Continue)
        }
        KeyCode::Char('n') | KeyCode::Right => {
            app.next_meaning();
            Some(HandleResult::Continue)
        }
        KeyCode::Char('p') | KeyCode::Left => {
            app.previous_meaning();
            Some(HandleResult::Continue)
        }
        KeyCode::Char('f') => Some(HandleResult::ToggleFavorite),
        KeyCode::Char('a') => {
            app.play_audio();
            Some(HandleResult::Continue)
        }
        _ => None,
    }
}
