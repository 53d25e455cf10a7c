use std::collections::HashSet;

use glam::Vec2;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::camera::MoveDirection;

/// Identifier for a physical keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Named(NamedKey),
    Character(char),
}

impl KeyCode {
    /// Canonical character key; letters are stored uppercase so the
    /// windowing layer's case handling never leaks into lookups.
    pub fn character(ch: char) -> Self {
        Self::Character(ch.to_ascii_uppercase())
    }
}

/// The handful of non-character keys the viewer binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedKey {
    Escape,
    Left,
    Right,
    Up,
    Down,
}

/// A single event delivered by the windowing collaborator, already
/// stripped of its concrete callback types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    PointerMoved { x: f32, y: f32 },
}

/// Movement command bound to the key, if any (the classic W/A/S/D
/// layout).
pub fn movement_for_key(key: KeyCode) -> Option<MoveDirection> {
    match key {
        KeyCode::Character('W') => Some(MoveDirection::Forward),
        KeyCode::Character('S') => Some(MoveDirection::Back),
        KeyCode::Character('A') => Some(MoveDirection::Left),
        KeyCode::Character('D') => Some(MoveDirection::Right),
        _ => None,
    }
}

/// Input snapshot shared between the event-dispatch call site and the
/// per-frame update.
#[derive(Debug, Default)]
pub struct InputState {
    keys: RwLock<HashSet<KeyCode>>,
    pointer: RwLock<Option<Vec2>>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.keys.write().insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.keys.write().remove(&key);
            }
            InputEvent::PointerMoved { x, y } => {
                *self.pointer.write() = Some(Vec2::new(x, y));
            }
        }
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.read().contains(&key)
    }

    /// Last pointer position delivered, if any has arrived yet.
    pub fn pointer_position(&self) -> Option<Vec2> {
        *self.pointer.read()
    }

    /// Movement commands for the keys currently held, in a stable
    /// W, S, A, D order.
    pub fn active_movement(&self) -> Vec<MoveDirection> {
        let keys = self.keys.read();
        ['W', 'S', 'A', 'D']
            .into_iter()
            .map(KeyCode::Character)
            .filter(|key| keys.contains(key))
            .filter_map(movement_for_key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_keys_are_case_insensitive() {
        assert_eq!(KeyCode::character('w'), KeyCode::Character('W'));
        assert_eq!(KeyCode::character('W'), KeyCode::Character('W'));
    }

    #[test]
    fn wasd_maps_to_movement() {
        assert_eq!(
            movement_for_key(KeyCode::character('w')),
            Some(MoveDirection::Forward)
        );
        assert_eq!(
            movement_for_key(KeyCode::character('a')),
            Some(MoveDirection::Left)
        );
        assert_eq!(movement_for_key(KeyCode::character('x')), None);
        assert_eq!(movement_for_key(KeyCode::Named(NamedKey::Up)), None);
    }

    #[test]
    fn state_tracks_key_transitions() {
        let state = InputState::new();
        let key = KeyCode::character('w');
        state.apply(InputEvent::KeyDown(key));
        assert!(state.is_key_down(key));
        state.apply(InputEvent::KeyUp(key));
        assert!(!state.is_key_down(key));
    }

    #[test]
    fn active_movement_is_order_stable() {
        let state = InputState::new();
        state.apply(InputEvent::KeyDown(KeyCode::character('d')));
        state.apply(InputEvent::KeyDown(KeyCode::character('w')));
        assert_eq!(
            state.active_movement(),
            vec![MoveDirection::Forward, MoveDirection::Right]
        );
    }

    #[test]
    fn pointer_position_is_latest_sample() {
        let state = InputState::new();
        assert_eq!(state.pointer_position(), None);
        state.apply(InputEvent::PointerMoved { x: 10.0, y: 20.0 });
        state.apply(InputEvent::PointerMoved { x: 11.0, y: 19.0 });
        assert_eq!(state.pointer_position(), Some(Vec2::new(11.0, 19.0)));
    }
}
