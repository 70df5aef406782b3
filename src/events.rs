use crossterm::event::{Event, KeyEventKind, KeyCode, KeyModifiers};

use crate::actions::Action;
use crate::state::State;

/// Map a terminal event to an action. `None` means quit.
///
/// Quit always wins, streaming or not. Commit and regenerate pass through so
/// the transition layer can treat them as no-ops while streaming; everything
/// else is buffer editing and only applies while reviewing.
pub fn handle_event(event: &Event, state: &State) -> Option<Action> {
    let Event::Key(key) = event else {
        return Some(Action::None);
    };
    if key.kind == KeyEventKind::Release {
        return Some(Action::None);
    }

    if state.keymap.quit.matches(key) {
        return None;
    }
    if state.keymap.regen.matches(key) {
        return Some(Action::Regenerate);
    }
    if state.keymap.commit.matches(key) {
        return Some(Action::Commit);
    }

    // Input is locked while the model is writing into the buffer.
    if state.is_streaming {
        return Some(Action::None);
    }

    let action = match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Action::InputChar(c),
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Delete => Action::InputDelete,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        KeyCode::Tab => Action::AcceptSuggestion,
        _ => Action::None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use std::time::Duration;

    fn state(streaming: bool) -> State {
        let mut s = State::new(Duration::from_secs(15));
        s.is_streaming = streaming;
        s
    }

    fn key(code: KeyCode, mods: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, mods))
    }

    #[test]
    fn quit_keys_signal_quit_in_any_state() {
        for streaming in [true, false] {
            let s = state(streaming);
            assert!(handle_event(&key(KeyCode::Char('q'), KeyModifiers::NONE), &s).is_none());
            assert!(handle_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL), &s).is_none());
        }
    }

    #[test]
    fn bound_keys_pass_through_while_streaming() {
        let s = state(true);
        assert!(matches!(
            handle_event(&key(KeyCode::Char('r'), KeyModifiers::CONTROL), &s),
            Some(Action::Regenerate)
        ));
        assert!(matches!(handle_event(&key(KeyCode::Enter, KeyModifiers::NONE), &s), Some(Action::Commit)));
    }

    #[test]
    fn typing_is_locked_while_streaming() {
        let s = state(true);
        assert!(matches!(handle_event(&key(KeyCode::Char('x'), KeyModifiers::NONE), &s), Some(Action::None)));
        assert!(matches!(handle_event(&key(KeyCode::Backspace, KeyModifiers::NONE), &s), Some(Action::None)));
    }

    #[test]
    fn typing_edits_while_reviewing() {
        let s = state(false);
        assert!(matches!(
            handle_event(&key(KeyCode::Char('x'), KeyModifiers::NONE), &s),
            Some(Action::InputChar('x'))
        ));
        assert!(matches!(handle_event(&key(KeyCode::Tab, KeyModifiers::NONE), &s), Some(Action::AcceptSuggestion)));
    }

    #[test]
    fn non_key_events_do_nothing() {
        let s = state(false);
        assert!(matches!(handle_event(&Event::FocusGained, &s), Some(Action::None)));
    }
}
