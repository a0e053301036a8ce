//! Per-frame player intent

use serde::{Deserialize, Serialize};

/// Input commands for one ship for a single frame
///
/// Produced by an input mapper; the simulation never reads devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerCommand {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub shoot: bool,
    pub hyperspace: bool,
}

impl PlayerCommand {
    /// Net rotation direction: -1 (left), 0, or +1 (right)
    pub fn turn(&self) -> f32 {
        match (self.rotate_left, self.rotate_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// True when nothing is requested
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}
