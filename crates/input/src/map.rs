//! Raw key naming for terminal events.
//!
//! Every key press is reduced to a short raw name (`"w"`, `"up"`, `"space"`)
//! that the input manager then maps onto logical action names.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Name a terminal key event, or `None` for events that carry no key signal
/// (releases, modifiers alone, unsupported keys).
pub fn raw_key_name(key: KeyEvent) -> Option<String> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let name = match key.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        _ => return None,
    };
    Some(name)
}

/// Ctrl+C: the interrupt that bypasses all key mapping.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn test_named_keys() {
        assert_eq!(raw_key_name(KeyEvent::from(KeyCode::Up)).as_deref(), Some("up"));
        assert_eq!(
            raw_key_name(KeyEvent::from(KeyCode::Char(' '))).as_deref(),
            Some("space")
        );
        assert_eq!(
            raw_key_name(KeyEvent::from(KeyCode::Esc)).as_deref(),
            Some("escape")
        );
        assert_eq!(raw_key_name(KeyEvent::from(KeyCode::F(5))), None);
    }

    #[test]
    fn test_chars_keep_case() {
        assert_eq!(
            raw_key_name(KeyEvent::from(KeyCode::Char('w'))).as_deref(),
            Some("w")
        );
        assert_eq!(
            raw_key_name(KeyEvent::from(KeyCode::Char('W'))).as_deref(),
            Some("W")
        );
    }

    #[test]
    fn test_release_events_are_not_signals() {
        let release = KeyEvent {
            code: KeyCode::Char('w'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(raw_key_name(release), None);
    }

    #[test]
    fn test_interrupt_requires_control() {
        assert!(is_interrupt(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_interrupt(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!is_interrupt(KeyEvent::from(KeyCode::Char('q'))));
    }
}
