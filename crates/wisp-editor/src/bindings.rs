//! Keyboard shortcuts.

use std::collections::HashMap;

use wisp_curves::{CurveKind, EditorCommand};
use wisp_engine::input::Key;

/// Key to command table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Key, EditorCommand>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let map = HashMap::from([
            (Key::Z, EditorCommand::CommitCapture),
            (Key::C, EditorCommand::ClearCurves),
            (Key::Equal, EditorCommand::IncrementSegments),
            (Key::NumpadAdd, EditorCommand::IncrementSegments),
            (Key::Minus, EditorCommand::DecrementSegments),
            (Key::NumpadSubtract, EditorCommand::DecrementSegments),
            (Key::Period, EditorCommand::IncreaseSpeed),
            (Key::Comma, EditorCommand::DecreaseSpeed),
            (Key::Space, EditorCommand::ToggleAnimation),
            (Key::P, EditorCommand::TogglePoints),
            (Key::L, EditorCommand::ToggleLines),
            (Key::K, EditorCommand::ToggleCollisions),
            (Key::Digit1, EditorCommand::SelectKind(CurveKind::BSpline)),
            (Key::Digit2, EditorCommand::SelectKind(CurveKind::Cardinal)),
            (Key::Digit3, EditorCommand::SelectKind(CurveKind::Bezier)),
        ]);
        Self { map }
    }
}

impl KeyBindings {
    /// Bindings with no keys assigned.
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    /// Assigns `key`, replacing any previous binding.
    pub fn bind(mut self, key: Key, cmd: EditorCommand) -> Self {
        self.map.insert(key, cmd);
        self
    }

    pub fn unbind(mut self, key: Key) -> Self {
        self.map.remove(&key);
        self
    }

    /// Command for a key press. Auto-repeat only drives the stepping
    /// commands; a held toggle key fires once.
    pub fn resolve(&self, key: Key, repeat: bool) -> Option<EditorCommand> {
        let Some(&cmd) = self.map.get(&key) else {
            log::debug!("no action associated with key {key}");
            return None;
        };

        if repeat && !repeats(cmd) {
            return None;
        }
        Some(cmd)
    }
}

fn repeats(cmd: EditorCommand) -> bool {
    matches!(
        cmd,
        EditorCommand::IncrementSegments
            | EditorCommand::DecrementSegments
            | EditorCommand::IncreaseSpeed
            | EditorCommand::DecreaseSpeed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_key_map() {
        let kb = KeyBindings::default();
        assert_eq!(kb.resolve(Key::Z, false), Some(EditorCommand::CommitCapture));
        assert_eq!(kb.resolve(Key::C, false), Some(EditorCommand::ClearCurves));
        assert_eq!(kb.resolve(Key::Equal, false), Some(EditorCommand::IncrementSegments));
        assert_eq!(kb.resolve(Key::Minus, false), Some(EditorCommand::DecrementSegments));
        assert_eq!(kb.resolve(Key::Period, false), Some(EditorCommand::IncreaseSpeed));
        assert_eq!(kb.resolve(Key::Comma, false), Some(EditorCommand::DecreaseSpeed));
        assert_eq!(kb.resolve(Key::Space, false), Some(EditorCommand::ToggleAnimation));
        assert_eq!(kb.resolve(Key::P, false), Some(EditorCommand::TogglePoints));
        assert_eq!(kb.resolve(Key::L, false), Some(EditorCommand::ToggleLines));
        assert_eq!(kb.resolve(Key::K, false), Some(EditorCommand::ToggleCollisions));
        assert_eq!(
            kb.resolve(Key::Digit3, false),
            Some(EditorCommand::SelectKind(CurveKind::Bezier))
        );
    }

    #[test]
    fn unbound_key_has_no_action() {
        assert_eq!(KeyBindings::default().resolve(Key::Q, false), None);
        assert_eq!(KeyBindings::empty().resolve(Key::Z, false), None);
    }

    #[test]
    fn repeat_drives_steps_but_not_toggles() {
        let kb = KeyBindings::default();
        assert_eq!(kb.resolve(Key::Equal, true), Some(EditorCommand::IncrementSegments));
        assert_eq!(kb.resolve(Key::Comma, true), Some(EditorCommand::DecreaseSpeed));
        assert_eq!(kb.resolve(Key::Space, true), None);
        assert_eq!(kb.resolve(Key::Z, true), None);
    }

    #[test]
    fn rebinding_replaces_and_unbinding_removes() {
        let kb = KeyBindings::default()
            .bind(Key::Enter, EditorCommand::CommitCapture)
            .unbind(Key::Z);
        assert_eq!(kb.resolve(Key::Enter, false), Some(EditorCommand::CommitCapture));
        assert_eq!(kb.resolve(Key::Z, false), None);
    }
}
