use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Level state of the keyboard for a single window.
///
/// Answers "is this key down right now", the same question a polling API
/// (`getKey(window, key) == PRESSED`) answers. Edge detection is left to the
/// consumer, which samples this once per frame.
#[derive(Debug, Default)]
pub struct KeyboardState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl KeyboardState {
    /// Folds one input event into the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered while unfocused; avoid stuck keys.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, repeat } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) && !*repeat {
                        log::trace!("key down: {key}");
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        log::trace!("key up: {key}");
                    }
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn press_then_release() {
        let mut kb = KeyboardState::default();
        kb.apply_event(&key(Key::ArrowUp, KeyState::Pressed));
        assert!(kb.key_down(Key::ArrowUp));
        assert!(!kb.key_down(Key::ArrowDown));

        kb.apply_event(&key(Key::ArrowUp, KeyState::Released));
        assert!(!kb.key_down(Key::ArrowUp));
    }

    #[test]
    fn repeat_keeps_key_down() {
        let mut kb = KeyboardState::default();
        kb.apply_event(&key(Key::ArrowDown, KeyState::Pressed));
        kb.apply_event(&InputEvent::Key { key: Key::ArrowDown, state: KeyState::Pressed, repeat: true });
        assert!(kb.key_down(Key::ArrowDown));
        assert_eq!(kb.keys_down.len(), 1);
    }

    #[test]
    fn release_of_unheld_key_is_ignored() {
        let mut kb = KeyboardState::default();
        kb.apply_event(&key(Key::Escape, KeyState::Released));
        assert!(kb.keys_down.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut kb = KeyboardState::default();
        kb.apply_event(&InputEvent::Focused(true));
        kb.apply_event(&key(Key::ArrowUp, KeyState::Pressed));
        kb.apply_event(&key(Key::Unknown(42), KeyState::Pressed));

        kb.apply_event(&InputEvent::Focused(false));
        assert!(!kb.focused);
        assert!(kb.keys_down.is_empty());
    }

    #[test]
    fn unknown_key_display_shows_code() {
        assert_eq!(Key::Unknown(0x1f).to_string(), "Unknown(0x1f)");
        assert_eq!(Key::Escape.to_string(), "Escape");
    }
}
