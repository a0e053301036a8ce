//! Keyboard to command mapping
//!
//! Held keys steer and thrust; shooting and hyperspace trigger once per
//! key press, no matter how long the key stays down.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::PlayerCommand;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    A,
    D,
    W,
    Space,
    LeftShift,
    Escape,
    /// Anything else (still counts as "any key")
    Other,
}

/// A key transition delivered by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Down(key) => {
                self.held.insert(key);
            }
            KeyEvent::Up(key) => {
                self.held.remove(&key);
            }
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.is_down(*k))
    }
}

/// Turns key state and key presses into one command per frame
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    shoot_pressed: bool,
    hyperspace_pressed: bool,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch one-shot actions on key-down
    pub fn handle_event(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Down(Key::Space) => self.shoot_pressed = true,
            KeyEvent::Down(Key::LeftShift) => self.hyperspace_pressed = true,
            _ => {}
        }
    }

    /// Build this frame's command and clear the latches
    pub fn build_command(&mut self, keys: &KeyState) -> PlayerCommand {
        let cmd = PlayerCommand {
            rotate_left: keys.any_down(&[Key::Left, Key::A]),
            rotate_right: keys.any_down(&[Key::Right, Key::D]),
            thrust: keys.any_down(&[Key::Up, Key::W]),
            shoot: self.shoot_pressed,
            hyperspace: self.hyperspace_pressed,
        };

        self.shoot_pressed = false;
        self.hyperspace_pressed = false;
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_steer() {
        let mut keys = KeyState::new();
        let mut mapper = InputMapper::new();
        keys.apply(KeyEvent::Down(Key::A));
        keys.apply(KeyEvent::Down(Key::Up));

        let cmd = mapper.build_command(&keys);
        assert!(cmd.rotate_left);
        assert!(!cmd.rotate_right);
        assert!(cmd.thrust);

        keys.apply(KeyEvent::Up(Key::A));
        keys.apply(KeyEvent::Down(Key::Right));
        let cmd = mapper.build_command(&keys);
        assert!(!cmd.rotate_left);
        assert!(cmd.rotate_right);
    }

    #[test]
    fn test_shoot_fires_once_per_press() {
        let mut keys = KeyState::new();
        let mut mapper = InputMapper::new();
        let press = KeyEvent::Down(Key::Space);
        keys.apply(press);
        mapper.handle_event(press);

        assert!(mapper.build_command(&keys).shoot);
        // Still held, but no new press
        assert!(!mapper.build_command(&keys).shoot);
    }

    #[test]
    fn test_hyperspace_latch() {
        let keys = KeyState::new();
        let mut mapper = InputMapper::new();
        mapper.handle_event(KeyEvent::Down(Key::LeftShift));
        mapper.handle_event(KeyEvent::Up(Key::LeftShift));

        let cmd = mapper.build_command(&keys);
        assert!(cmd.hyperspace);
        assert!(!cmd.shoot);
        assert!(mapper.build_command(&keys).is_idle());
    }
}
