//! Vim-style key notation for replaying input without a terminal.

use crate::key::{Key, KeyInput};

/// Parse a key script such as `ihello<Esc>:wq<CR>`.
///
/// Recognized names: `<Esc> <CR> <Enter> <BS> <Tab> <Up> <Down> <Left>
/// <Right> <lt>` and `<C-x>` for Ctrl plus a character. Names are matched
/// case-insensitively. Anything else in angle brackets is typed literally.
pub fn parse_key_script(script: &str) -> Vec<KeyInput> {
    let chars: Vec<char> = script.chars().collect();
    let mut keys = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '<' {
            if let Some(len) = chars[i + 1..].iter().position(|&c| c == '>') {
                let name: String = chars[i + 1..i + 1 + len].iter().collect();
                if let Some(input) = named_key(&name) {
                    keys.push(input);
                    i += len + 2;
                    continue;
                }
            }
        }
        keys.push(KeyInput::char(chars[i]));
        i += 1;
    }

    keys
}

fn named_key(name: &str) -> Option<KeyInput> {
    let lower = name.to_lowercase();
    let key = match lower.as_str() {
        "esc" => Key::Escape,
        "cr" | "enter" => Key::Enter,
        "bs" => Key::Backspace,
        "tab" => Key::Tab,
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "lt" => Key::Char('<'),
        _ => {
            let mut rest = lower.strip_prefix("c-")?.chars();
            let ch = rest.next()?;
            if rest.next().is_some() {
                return None;
            }
            return Some(KeyInput::ctrl(Key::Char(ch)));
        }
    };
    Some(KeyInput::new(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let keys = parse_key_script("dd");
        assert_eq!(keys, vec![KeyInput::char('d'), KeyInput::char('d')]);
    }

    #[test]
    fn test_named_keys() {
        let keys = parse_key_script("ia<Esc>:wq<CR><bs><Enter><Up><down><LEFT><Right><Tab>");
        assert_eq!(
            keys,
            vec![
                KeyInput::char('i'),
                KeyInput::char('a'),
                KeyInput::new(Key::Escape),
                KeyInput::char(':'),
                KeyInput::char('w'),
                KeyInput::char('q'),
                KeyInput::new(Key::Enter),
                KeyInput::new(Key::Backspace),
                KeyInput::new(Key::Enter),
                KeyInput::new(Key::Up),
                KeyInput::new(Key::Down),
                KeyInput::new(Key::Left),
                KeyInput::new(Key::Right),
                KeyInput::new(Key::Tab),
            ]
        );
    }

    #[test]
    fn test_ctrl_and_lt() {
        let keys = parse_key_script("<C-s><lt>");
        assert_eq!(
            keys,
            vec![KeyInput::ctrl(Key::Char('s')), KeyInput::char('<')]
        );
    }

    #[test]
    fn test_unknown_names_are_literal() {
        let keys = parse_key_script("<foo>a<");
        let chars: Vec<char> = keys.iter().filter_map(|k| k.printable()).collect();
        assert_eq!(chars, "<foo>a<".chars().collect::<Vec<_>>());
    }

    #[test]
    fn test_utf8_script() {
        let keys = parse_key_script("iü<Esc>");
        assert_eq!(keys[1], KeyInput::char('ü'));
        assert_eq!(keys.len(), 3);
    }
}
