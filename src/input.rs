use winit::keyboard::{Key, NamedKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Stop the demo and exit successfully.
    Exit,
    Ignore,
}

const ESCAPE_CHARACTER: &str = "\u{1b}";

/// Maps a pressed key to what the demo does about it. Only Escape does anything;
/// some platforms report it as the raw ESC character instead of a named key.
pub fn action_for_key(key: &Key) -> KeyAction {
    match key {
        Key::Named(NamedKey::Escape) => KeyAction::Exit,
        Key::Character(text) if text.as_str() == ESCAPE_CHARACTER => KeyAction::Exit,
        _ => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_exits() {
        assert_eq!(
            action_for_key(&Key::Named(NamedKey::Escape)),
            KeyAction::Exit
        );
        assert_eq!(
            action_for_key(&Key::Character("\u{1b}".into())),
            KeyAction::Exit
        );
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(
            action_for_key(&Key::Named(NamedKey::Enter)),
            KeyAction::Ignore
        );
        assert_eq!(action_for_key(&Key::Character("q".into())), KeyAction::Ignore);
        assert_eq!(action_for_key(&Key::Named(NamedKey::Space)), KeyAction::Ignore);
    }
}
