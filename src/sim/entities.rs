//! Bullets, asteroids and ships
//!
//! Each entity owns its state and a local `update`; anything that touches
//! more than one entity (collisions, scoring, spawning) belongs to the world.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::command::PlayerCommand;
use super::saucer::Saucer;
use super::spawn::random_position;
use crate::consts::{MUZZLE_OFFSET, SHIP_SPAWN_ANGLE};
use crate::tuning::Tuning;
use crate::{angle_to_dir, wrap_position};

/// Player identifier (the local player is `consts::LOCAL_PLAYER_ID`)
pub type PlayerId = u32;

/// Shared capability of every simulated entity: a circle on the playfield
pub trait Body {
    fn position(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player(PlayerId),
    /// Reserved owner for saucer fire: never harms saucers, never counts
    /// toward a player's bullet cap
    Saucer,
}

impl BulletOwner {
    pub fn is_player(&self) -> bool {
        matches!(self, BulletOwner::Player(_))
    }

    pub fn is_saucer(&self) -> bool {
        matches!(self, BulletOwner::Saucer)
    }
}

/// A bullet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub owner: BulletOwner,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in seconds
    pub ttl: f32,
    pub radius: f32,
}

impl Bullet {
    pub fn new(owner: BulletOwner, pos: Vec2, vel: Vec2, ttl: f32, radius: f32) -> Self {
        Self {
            owner,
            pos,
            vel,
            ttl,
            radius,
        }
    }

    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.pos = wrap_position(self.pos + self.vel * dt, tuning.width, tuning.height);
        self.ttl -= dt;
    }

    pub fn expired(&self) -> bool {
        self.ttl <= 0.0
    }
}

impl Body for Bullet {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Asteroid size classes, largest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

/// An asteroid with an irregular outline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
    pub radius: f32,
    /// Outline relative to the centre, fixed at creation
    outline: Vec<Vec2>,
}

impl Asteroid {
    pub fn new<R: Rng + ?Sized>(
        pos: Vec2,
        vel: Vec2,
        size: AsteroidSize,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let class = tuning.asteroid(size);
        let radius = class.radius;
        let steps = class.vertices;

        let outline = (0..steps)
            .map(|i| {
                let angle = i as f32 * (360.0 / steps as f32);
                let jitter = rng.random_range(tuning.asteroid_jitter_min..=tuning.asteroid_jitter_max);
                angle_to_dir(angle) * radius * jitter
            })
            .collect();

        Self {
            pos,
            vel,
            size,
            radius,
            outline,
        }
    }

    /// Outline vertices relative to the asteroid centre
    pub fn outline(&self) -> &[Vec2] {
        &self.outline
    }

    /// Outline vertices in playfield coordinates
    pub fn world_outline(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.outline.iter().map(move |p| self.pos + *p)
    }

    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.pos = wrap_position(self.pos + self.vel * dt, tuning.width, tuning.height);
    }
}

impl Body for Asteroid {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A player ship, driven only by commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub player_id: PlayerId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing in degrees (0 = +x, -90 = up)
    pub angle: f32,
    /// Seconds until the next shot is allowed
    pub cooldown: f32,
    /// Seconds of remaining invulnerability
    pub invuln: f32,
    pub radius: f32,
}

impl Ship {
    pub fn new(player_id: PlayerId, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            player_id,
            pos,
            vel: Vec2::ZERO,
            angle: SHIP_SPAWN_ANGLE,
            cooldown: 0.0,
            invuln: 0.0,
            radius: tuning.ship_radius,
        }
    }

    /// Unit vector along the facing angle
    pub fn direction(&self) -> Vec2 {
        angle_to_dir(self.angle)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln > 0.0
    }

    /// Apply one frame of player intent
    ///
    /// Returns the bullet fired this frame, if any. `live_bullets` is the
    /// world's bullet collection, used to enforce the per-player cap.
    pub fn apply_command(
        &mut self,
        cmd: &PlayerCommand,
        dt: f32,
        live_bullets: &[Bullet],
        tuning: &Tuning,
    ) -> Option<Bullet> {
        self.angle += cmd.turn() * tuning.ship_turn_speed * dt;

        if cmd.thrust {
            self.vel += self.direction() * tuning.ship_thrust * dt;
        }

        self.vel *= tuning.ship_friction;

        if cmd.shoot {
            return self.try_fire(live_bullets, tuning);
        }

        None
    }

    fn try_fire(&mut self, live_bullets: &[Bullet], tuning: &Tuning) -> Option<Bullet> {
        if self.cooldown > 0.0 {
            return None;
        }

        let owner = BulletOwner::Player(self.player_id);
        let live = live_bullets.iter().filter(|b| b.owner == owner).count();
        if live >= tuning.max_bullets_per_player {
            return None;
        }

        let dir = self.direction();
        let pos = self.pos + dir * (self.radius + MUZZLE_OFFSET);
        let vel = self.vel + dir * tuning.ship_bullet_speed;

        self.cooldown = tuning.ship_fire_interval;
        Some(Bullet::new(owner, pos, vel, tuning.bullet_ttl, tuning.bullet_radius))
    }

    /// Jump to a random spot with a fresh invulnerability window
    ///
    /// The score penalty is the world's business.
    pub fn hyperspace<R: Rng + ?Sized>(&mut self, rng: &mut R, tuning: &Tuning) {
        self.pos = random_position(rng, tuning.width, tuning.height);
        self.vel = Vec2::ZERO;
        self.invuln = tuning.safe_spawn_time;
    }

    /// Reset after a death: centre, still, facing up, invulnerable
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = tuning.center();
        self.vel = Vec2::ZERO;
        self.angle = SHIP_SPAWN_ANGLE;
        self.invuln = tuning.safe_spawn_time;
    }

    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.cooldown = (self.cooldown - dt).max(0.0);
        self.invuln = (self.invuln - dt).max(0.0);
        self.pos = wrap_position(self.pos + self.vel * dt, tuning.width, tuning.height);
    }
}

impl Body for Ship {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Borrowed view over any entity, for code that handles all kinds at once
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Bullet(&'a Bullet),
    Asteroid(&'a Asteroid),
    Ship(&'a Ship),
    Saucer(&'a Saucer),
}

impl Body for EntityRef<'_> {
    fn position(&self) -> Vec2 {
        match self {
            EntityRef::Bullet(b) => b.position(),
            EntityRef::Asteroid(a) => a.position(),
            EntityRef::Ship(s) => s.position(),
            EntityRef::Saucer(s) => s.position(),
        }
    }

    fn radius(&self) -> f32 {
        match self {
            EntityRef::Bullet(b) => b.radius(),
            EntityRef::Asteroid(a) => a.radius(),
            EntityRef::Ship(s) => s.radius(),
            EntityRef::Saucer(s) => s.radius(),
        }
    }
}
