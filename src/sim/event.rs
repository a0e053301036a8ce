//! Semantic per-frame events for presentation and audio

use serde::{Deserialize, Serialize};

/// Something noteworthy that happened during a frame
///
/// Events never feed back into the simulation. The serialized form is the
/// snake_case tag (`"player_shoot"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    /// A ship fired
    PlayerShoot,
    /// A saucer fired
    UfoShoot,
    /// An asteroid was destroyed or split
    AsteroidExplosion,
    /// A ship or saucer was destroyed
    ShipExplosion,
}

impl GameEvent {
    pub const ALL: [GameEvent; 4] = [
        GameEvent::PlayerShoot,
        GameEvent::UfoShoot,
        GameEvent::AsteroidExplosion,
        GameEvent::ShipExplosion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::PlayerShoot => "player_shoot",
            GameEvent::UfoShoot => "ufo_shoot",
            GameEvent::AsteroidExplosion => "asteroid_explosion",
            GameEvent::ShipExplosion => "ship_explosion",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == tag)
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
