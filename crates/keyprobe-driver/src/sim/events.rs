//! Rendering of key events the way the key event demo logs them.

use keyprobe_core::{KeyCode, MetaState};

/// Key event action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key pressed
    Down,
    /// Key released
    Up,
}

impl KeyAction {
    fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Down => "ACTION_DOWN",
            KeyAction::Up => "ACTION_UP",
        }
    }
}

/// Render one log line for a key event.
pub fn render_key_event(code: KeyCode, meta: MetaState, action: KeyAction, event_time: u64) -> String {
    format!(
        "[keycode={}] KeyEvent {{ action={}, keyCode={}, scanCode=0, metaState={}, flags=0x8, repeatCount=0, eventTime={}, downTime={}, deviceId=-1, source=0x101 }}",
        code.code(),
        action.as_str(),
        code.name(),
        meta.symbolic(),
        event_time,
        event_time,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_menu_key() {
        let line = render_key_event(KeyCode::MENU, MetaState::NONE, KeyAction::Down, 10);
        assert!(line.starts_with("[keycode=82] KeyEvent {"));
        assert!(line.contains("keyCode=KEYCODE_MENU"));
        assert!(line.contains("metaState=0,"));
        assert!(line.contains("action=ACTION_DOWN"));
    }

    #[test]
    fn test_render_shifted_letter() {
        let line = render_key_event(KeyCode::A, MetaState(193), KeyAction::Up, 11);
        assert!(line.contains("keyCode=KEYCODE_A"));
        assert!(line.contains("metaState=META_SHIFT_ON|META_SHIFT_LEFT_ON|META_SHIFT_RIGHT_ON"));
        assert!(line.contains("action=ACTION_UP"));
    }
}
