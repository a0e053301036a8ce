//! Asteroids - a wraparound arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, commands, collisions, waves)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `renderer`: Backend-neutral line geometry and HUD text
//! - `audio`: Event-to-sound cue direction
//! - `input`: Key state to command mapping
//! - `game`: Scene flow around the simulation

pub mod audio;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, SimError};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const WIDTH: f32 = 960.0;
    pub const HEIGHT: f32 = 720.0;

    /// Target frame rate of the presentation loop
    pub const FPS: u32 = 60;
    /// Longest frame the simulation accepts in one step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player slots
    pub const MAX_PLAYERS: usize = 8;
    pub const LOCAL_PLAYER_ID: u32 = 1;

    /// Facing of a freshly spawned ship (degrees, pointing up the screen)
    pub const SHIP_SPAWN_ANGLE: f32 = -90.0;
    /// Distance from the hull at which bullets appear
    pub const MUZZLE_OFFSET: f32 = 6.0;
}

/// Wrap a position onto the torus `[0, width) x [0, height)`
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, width), wrap_axis(pos.y, height))
}

#[inline]
fn wrap_axis(v: f32, extent: f32) -> f32 {
    let w = v.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if w >= extent { 0.0 } else { w }
}

/// Unit direction for an angle in degrees (0 = +x, 90 = +y / screen down)
#[inline]
pub fn angle_to_dir(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Rotate a vector by an angle in degrees
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    let (s, c) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_position_negative_and_overflow() {
        let p = wrap_position(Vec2::new(-10.0, 730.0), 960.0, 720.0);
        assert!((p.x - 950.0).abs() < 0.001);
        assert!((p.y - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_wrap_tiny_negative_stays_below_extent() {
        let p = wrap_position(Vec2::new(-1e-9, -1e-9), 960.0, 720.0);
        assert!(p.x < 960.0 && p.y < 720.0);
    }

    #[test]
    fn test_angle_to_dir() {
        let up = angle_to_dir(-90.0);
        assert!(up.x.abs() < 1e-5);
        assert!((up.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_deg_quarter_turn() {
        let v = rotate_deg(Vec2::X, 90.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 1.0).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn wrapped_positions_stay_in_bounds(x in -1.0e5f32..1.0e5, y in -1.0e5f32..1.0e5) {
            let p = wrap_position(Vec2::new(x, y), 960.0, 720.0);
            prop_assert!(p.x >= 0.0 && p.x < 960.0);
            prop_assert!(p.y >= 0.0 && p.y < 720.0);
        }
    }
}
