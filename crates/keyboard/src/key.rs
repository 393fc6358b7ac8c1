use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

/// Platform-independent key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    /// Any key the editor has no binding for
    Other,
}

/// A key press with the one modifier the editor cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    pub fn ctrl(key: Key) -> Self {
        Self { key, ctrl: true }
    }

    /// Plain character press.
    pub fn char(ch: char) -> Self {
        Self::new(Key::Char(ch))
    }

    /// The character of a press without Ctrl.
    pub fn printable(&self) -> Option<char> {
        match self.key {
            Key::Char(ch) if !self.ctrl => Some(ch),
            _ => None,
        }
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// Translate a terminal key event. Release events yield `None`.
///
/// Letters are cased from the modifier state alone: upper when exactly one
/// of Shift and Caps Lock is on, lower otherwise.
pub fn from_crossterm(event: KeyEvent) -> Option<KeyInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let key = match event.code {
        KeyCode::Char(ch) => Key::Char(resolve_case(
            ch,
            event.modifiers.contains(KeyModifiers::SHIFT),
            event.state.contains(KeyEventState::CAPS_LOCK),
        )),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => Key::Other,
    };
    Some(KeyInput { key, ctrl })
}

fn resolve_case(ch: char, shift: bool, caps_lock: bool) -> char {
    if !ch.is_ascii_alphabetic() {
        ch
    } else if shift ^ caps_lock {
        ch.to_ascii_uppercase()
    } else {
        ch.to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_char() {
        let input = from_crossterm(event(KeyCode::Char('j'), KeyModifiers::NONE)).unwrap();
        assert_eq!(input, KeyInput::char('j'));
        assert_eq!(input.printable(), Some('j'));
    }

    #[test]
    fn test_shift_uppercases_base_letter() {
        let input = from_crossterm(event(KeyCode::Char('a'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(input.key, Key::Char('A'));
        // Already cased by the terminal.
        let input = from_crossterm(event(KeyCode::Char('A'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(input.key, Key::Char('A'));
    }

    #[test]
    fn test_caps_lock_and_shift_cancel() {
        let mut e = event(KeyCode::Char('g'), KeyModifiers::NONE);
        e.state = KeyEventState::CAPS_LOCK;
        assert_eq!(from_crossterm(e).unwrap().key, Key::Char('G'));

        let mut e = event(KeyCode::Char('g'), KeyModifiers::SHIFT);
        e.state = KeyEventState::CAPS_LOCK;
        assert_eq!(from_crossterm(e).unwrap().key, Key::Char('g'));

        // Terminals that already applied the shift still cancel out.
        let mut e = event(KeyCode::Char('G'), KeyModifiers::SHIFT);
        e.state = KeyEventState::CAPS_LOCK;
        assert_eq!(from_crossterm(e).unwrap().key, Key::Char('g'));
    }

    #[test]
    fn test_non_letters_keep_their_case() {
        let input = from_crossterm(event(KeyCode::Char('$'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(input.key, Key::Char('$'));
        assert_eq!(resolve_case('G', false, false), 'g');
    }

    #[test]
    fn test_ctrl_is_not_printable() {
        let input = from_crossterm(event(KeyCode::Char('s'), KeyModifiers::CONTROL)).unwrap();
        assert_eq!(input, KeyInput::ctrl(Key::Char('s')));
        assert_eq!(input.printable(), None);
    }

    #[test]
    fn test_named_keys() {
        for (code, key) in [
            (KeyCode::Enter, Key::Enter),
            (KeyCode::Esc, Key::Escape),
            (KeyCode::Backspace, Key::Backspace),
            (KeyCode::Tab, Key::Tab),
            (KeyCode::Left, Key::Left),
            (KeyCode::F(5), Key::Other),
        ] {
            assert_eq!(from_crossterm(event(code, KeyModifiers::NONE)).unwrap().key, key);
        }
    }

    #[test]
    fn test_release_is_dropped() {
        let e = KeyEvent::new_with_kind(KeyCode::Char('x'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(from_crossterm(e), None);
    }
}
