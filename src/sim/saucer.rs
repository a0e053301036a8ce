//! Hostile saucers
//!
//! Two scripted behaviours keyed by size:
//! - Small saucers home toward a target and wrap around the playfield
//! - Big saucers cross the playfield on a straight line and leave it

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::{Body, Bullet, BulletOwner};
use super::spawn::random_unit_vector;
use crate::tuning::Tuning;
use crate::{rotate_deg, wrap_position};

/// Aim vectors shorter than this (squared) are treated as "on top of target"
const MIN_AIM_LENGTH_SQ: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaucerSize {
    Big,
    Small,
}

/// Scripted path of a big saucer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crossing {
    /// Left edge to right edge or back
    Horizontal,
    /// Top edge to bottom edge or back
    Vertical,
    /// Corner to opposite corner
    Diagonal,
}

/// A saucer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saucer {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: SaucerSize,
    pub radius: f32,
    pub speed: f32,
    /// Seconds until the next shot
    pub cooldown: f32,
    /// Set once a crossing saucer has left the playfield
    removed: bool,
}

impl Saucer {
    /// Spawn a saucer of the given size
    ///
    /// Small saucers start at `pos` at rest; big saucers ignore `pos` and
    /// pick one of the scripted crossings.
    pub fn new<R: Rng + ?Sized>(pos: Vec2, size: SaucerSize, tuning: &Tuning, rng: &mut R) -> Self {
        let mut saucer = Self::at(pos, Vec2::ZERO, size, tuning);
        if size == SaucerSize::Big {
            let crossing = match rng.random_range(0..3) {
                0 => Crossing::Horizontal,
                1 => Crossing::Vertical,
                _ => Crossing::Diagonal,
            };
            saucer.setup_crossing(crossing, tuning, rng);
        }
        saucer
    }

    /// Place a saucer with an explicit position and velocity
    pub fn at(pos: Vec2, vel: Vec2, size: SaucerSize, tuning: &Tuning) -> Self {
        let class = tuning.saucer(size == SaucerSize::Small);
        Self {
            pos,
            vel,
            size,
            radius: class.radius,
            speed: class.speed,
            cooldown: 0.0,
            removed: false,
        }
    }

    fn setup_crossing<R: Rng + ?Sized>(&mut self, crossing: Crossing, tuning: &Tuning, rng: &mut R) {
        let (w, h) = (tuning.width, tuning.height);
        match crossing {
            Crossing::Horizontal => {
                let y = rng.random_range(0.0..=h);
                let left_to_right = rng.random_bool(0.5);
                self.pos = Vec2::new(if left_to_right { 0.0 } else { w }, y);
                self.vel = Vec2::new(if left_to_right { 1.0 } else { -1.0 }, 0.0) * self.speed;
            }
            Crossing::Vertical => {
                let x = rng.random_range(0.0..=w);
                let top_to_bottom = rng.random_bool(0.5);
                self.pos = Vec2::new(x, if top_to_bottom { 0.0 } else { h });
                self.vel = Vec2::new(0.0, if top_to_bottom { 1.0 } else { -1.0 }) * self.speed;
            }
            Crossing::Diagonal => {
                let corners = [
                    Vec2::new(0.0, 0.0),
                    Vec2::new(w, 0.0),
                    Vec2::new(0.0, h),
                    Vec2::new(w, h),
                ];
                let start = corners[rng.random_range(0..corners.len())];
                let end = Vec2::new(w - start.x, h - start.y);
                self.pos = start;
                self.vel = (end - start).normalize_or_zero() * self.speed;
            }
        }
    }

    pub fn is_small(&self) -> bool {
        self.size == SaucerSize::Small
    }

    /// True once the saucer should be dropped from the world
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Advance one frame toward (small) or regardless of (big) the target
    pub fn update(&mut self, dt: f32, target: Option<Vec2>, tuning: &Tuning) {
        self.cooldown = (self.cooldown - dt).max(0.0);

        match self.size {
            SaucerSize::Small => self.pursue(dt, target, tuning),
            SaucerSize::Big => self.cross(dt, tuning),
        }
    }

    fn pursue(&mut self, dt: f32, target: Option<Vec2>, tuning: &Tuning) {
        if let Some(target) = target {
            let to_target = target - self.pos;
            if to_target.length_squared() > MIN_AIM_LENGTH_SQ {
                let desired = to_target.normalize() * self.speed;
                self.vel = self.vel.lerp(desired, tuning.saucer_steering);
            }
        }

        self.pos = wrap_position(self.pos + self.vel * dt, tuning.width, tuning.height);
    }

    fn cross(&mut self, dt: f32, tuning: &Tuning) {
        self.pos += self.vel * dt;

        let margin = tuning.saucer_exit_margin;
        let out_x = self.pos.x < -margin || self.pos.x > tuning.width + margin;
        let out_y = self.pos.y < -margin || self.pos.y > tuning.height + margin;
        if out_x || out_y {
            self.removed = true;
        }
    }

    /// Fire at the target if the gun is ready
    pub fn try_fire<R: Rng + ?Sized>(
        &mut self,
        target: Option<Vec2>,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<Bullet> {
        if self.cooldown > 0.0 {
            return None;
        }
        let target = target?;

        let class = tuning.saucer(self.is_small());

        let dir = if !self.is_small() && rng.random::<f32>() < tuning.big_saucer_miss_chance {
            random_unit_vector(rng)
        } else {
            let to_target = target - self.pos;
            if to_target.length_squared() < MIN_AIM_LENGTH_SQ {
                return None;
            }
            to_target.normalize()
        };

        let jitter = class.aim_jitter_deg;
        let dir = rotate_deg(dir, rng.random_range(-jitter..=jitter));

        self.cooldown = class.fire_interval;

        Some(Bullet::new(
            BulletOwner::Saucer,
            self.pos,
            dir * tuning.saucer_bullet_speed,
            tuning.saucer_bullet_ttl,
            tuning.bullet_radius,
        ))
    }
}

impl Body for Saucer {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}
