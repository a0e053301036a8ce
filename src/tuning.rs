//! Data-driven game balance
//!
//! Every gameplay number lives in [`Tuning`]. Defaults reproduce the classic
//! feel; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{HEIGHT, WIDTH};
use crate::error::ConfigError;
use crate::sim::AsteroidSize;

/// Per-size asteroid parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidClass {
    pub radius: f32,
    pub score: u64,
    /// Sizes spawned when this asteroid is split
    pub split: Vec<AsteroidSize>,
    /// Vertex count of the outline polygon
    pub vertices: usize,
}

/// Per-size saucer parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaucerClass {
    pub radius: f32,
    pub speed: f32,
    pub score: u64,
    /// Seconds between shots
    pub fire_interval: f32,
    /// Maximum aim error either side (degrees)
    pub aim_jitter_deg: f32,
}

/// Complete gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Session ===
    pub start_lives: u32,
    /// Invulnerability after spawn, respawn and hyperspace (seconds)
    pub safe_spawn_time: f32,
    /// Pause between a cleared field and the next wave (seconds)
    pub wave_delay: f32,
    /// Minimum distance between a new wave asteroid and the primary ship
    pub wave_clearance: f32,

    // === Ship ===
    pub ship_radius: f32,
    /// Degrees per second
    pub ship_turn_speed: f32,
    pub ship_thrust: f32,
    /// Velocity multiplier applied every frame
    pub ship_friction: f32,
    pub ship_fire_interval: f32,
    pub ship_bullet_speed: f32,
    pub hyperspace_cost: u64,

    // === Asteroids ===
    pub asteroid_speed_min: f32,
    pub asteroid_speed_max: f32,
    /// Speed multiplier for fragments
    pub split_speed_factor: f32,
    pub asteroid_jitter_min: f32,
    pub asteroid_jitter_max: f32,
    pub large: AsteroidClass,
    pub medium: AsteroidClass,
    pub small: AsteroidClass,

    // === Bullets ===
    pub bullet_radius: f32,
    pub bullet_ttl: f32,
    pub max_bullets_per_player: usize,

    // === Saucers ===
    pub saucer_spawn_interval: f32,
    pub big_saucer: SaucerClass,
    pub small_saucer: SaucerClass,
    pub saucer_bullet_speed: f32,
    pub saucer_bullet_ttl: f32,
    /// Chance a big saucer fires in a random direction
    pub big_saucer_miss_chance: f32,
    /// Per-frame velocity blend toward the pursuit velocity
    pub saucer_steering: f32,
    /// Distance past the edge at which a crossing saucer leaves
    pub saucer_exit_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,

            start_lives: 3,
            safe_spawn_time: 2.0,
            wave_delay: 2.0,
            wave_clearance: 150.0,

            ship_radius: 15.0,
            ship_turn_speed: 220.0,
            ship_thrust: 220.0,
            ship_friction: 0.995,
            ship_fire_interval: 0.2,
            ship_bullet_speed: 420.0,
            hyperspace_cost: 250,

            asteroid_speed_min: 30.0,
            asteroid_speed_max: 90.0,
            split_speed_factor: 1.2,
            asteroid_jitter_min: 0.75,
            asteroid_jitter_max: 1.2,
            large: AsteroidClass {
                radius: 46.0,
                score: 20,
                split: vec![AsteroidSize::Medium, AsteroidSize::Medium],
                vertices: 12,
            },
            medium: AsteroidClass {
                radius: 24.0,
                score: 50,
                split: vec![AsteroidSize::Small, AsteroidSize::Small],
                vertices: 10,
            },
            small: AsteroidClass {
                radius: 12.0,
                score: 100,
                split: Vec::new(),
                vertices: 8,
            },

            bullet_radius: 2.0,
            bullet_ttl: 1.0,
            max_bullets_per_player: 4,

            saucer_spawn_interval: 12.0,
            big_saucer: SaucerClass {
                radius: 18.0,
                speed: 95.0,
                score: 200,
                fire_interval: 0.8,
                aim_jitter_deg: 28.0,
            },
            small_saucer: SaucerClass {
                radius: 12.0,
                speed: 120.0,
                score: 1000,
                fire_interval: 0.55,
                aim_jitter_deg: 6.0,
            },
            saucer_bullet_speed: 360.0,
            saucer_bullet_ttl: 1.3,
            big_saucer_miss_chance: 0.35,
            saucer_steering: 0.08,
            saucer_exit_margin: 60.0,
        }
    }
}

impl Tuning {
    /// Parameters for an asteroid size class
    pub fn asteroid(&self, size: AsteroidSize) -> &AsteroidClass {
        match size {
            AsteroidSize::Large => &self.large,
            AsteroidSize::Medium => &self.medium,
            AsteroidSize::Small => &self.small,
        }
    }

    /// Parameters for a saucer
    pub fn saucer(&self, small: bool) -> &SaucerClass {
        if small {
            &self.small_saucer
        } else {
            &self.big_saucer
        }
    }

    /// Playfield centre
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Parse and validate tuning from JSON (missing fields keep defaults)
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning: Tuning = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, what: &str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid(what.to_string()))
            }
        }

        check(
            self.width > 0.0 && self.height > 0.0,
            "playfield must have positive size",
        )?;
        check(
            self.asteroid_speed_min >= 0.0 && self.asteroid_speed_min <= self.asteroid_speed_max,
            "asteroid speed range is inverted",
        )?;
        check(
            self.asteroid_jitter_min > 0.0 && self.asteroid_jitter_min <= self.asteroid_jitter_max,
            "asteroid jitter range is inverted",
        )?;
        check(
            (0.0..=1.0).contains(&self.big_saucer_miss_chance),
            "big saucer miss chance must be within [0, 1]",
        )?;
        check(
            (0.0..=1.0).contains(&self.saucer_steering),
            "saucer steering must be within [0, 1]",
        )?;
        check(
            self.ship_friction > 0.0 && self.ship_friction <= 1.0,
            "ship friction must be within (0, 1]",
        )?;
        check(
            self.big_saucer.aim_jitter_deg >= 0.0 && self.small_saucer.aim_jitter_deg >= 0.0,
            "aim jitter must be non-negative",
        )?;
        check(
            [&self.large, &self.medium, &self.small]
                .iter()
                .all(|class| class.vertices >= 3 && class.radius > 0.0),
            "asteroid outlines need at least 3 vertices and a positive radius",
        )?;
        check(
            self.bullet_ttl > 0.0 && self.saucer_bullet_ttl > 0.0,
            "bullet lifetimes must be positive",
        )?;
        check(
            self.saucer_spawn_interval > 0.0,
            "saucer spawn interval must be positive",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_split_lists() {
        let tuning = Tuning::default();
        assert_eq!(tuning.asteroid(AsteroidSize::Large).split.len(), 2);
        assert!(
            tuning
                .asteroid(AsteroidSize::Medium)
                .split
                .iter()
                .all(|s| *s == AsteroidSize::Small)
        );
        assert!(tuning.asteroid(AsteroidSize::Small).split.is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "start_lives": 5, "hyperspace_cost": 10 }"#)
            .expect("partial tuning should parse");
        assert_eq!(tuning.start_lives, 5);
        assert_eq!(tuning.hyperspace_cost, 10);
        assert_eq!(tuning.width, WIDTH);
        assert_eq!(tuning.large.score, 20);
    }

    #[test]
    fn test_invalid_playfield_rejected() {
        let err = Tuning::from_json_str(r#"{ "width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_inverted_speed_range_rejected() {
        let err = Tuning::from_json_str(r#"{ "asteroid_speed_min": 100.0, "asteroid_speed_max": 10.0 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load(Path::new("/nonexistent/asteroids-tuning.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
