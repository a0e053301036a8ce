//! World state and spawn rules
//!
//! The world is the aggregate root of the simulation: it owns every entity,
//! the score, lives and wave counters, and its own random stream.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::entities::{Asteroid, AsteroidSize, Bullet, BulletOwner, EntityRef, PlayerId, Ship};
use super::event::GameEvent;
use super::saucer::{Saucer, SaucerSize};
use super::spawn::{random_edge_position, random_speed, random_unit_vector};
use super::tick::{Commands, tick};
use crate::consts::{LOCAL_PLAYER_ID, MAX_PLAYERS};
use crate::error::SimError;
use crate::tuning::Tuning;

/// Resampling budget when looking for a wave spawn point away from the ship
const MAX_CLEARANCE_ATTEMPTS: u32 = 64;

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct World {
    /// Balance numbers in force for this session
    pub tuning: Tuning,
    /// Seed the random stream was created from
    pub seed: u64,
    /// Ships by player id (iterated in id order)
    pub ships: BTreeMap<PlayerId, Ship>,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub saucers: Vec<Saucer>,
    pub score: u64,
    pub lives: u32,
    /// Current wave (0 until the first wave starts)
    pub wave: u32,
    /// Seconds left before the next wave once the field is clear
    pub wave_timer: f32,
    /// Seconds left before the next saucer
    pub saucer_timer: f32,
    /// Events produced by the most recent frame
    pub events: Vec<GameEvent>,
    /// Set when lives run out; only `reset` clears it
    pub game_over: bool,
    /// Player whose ship saucers hunt and waves avoid
    pub primary_player: PlayerId,
    #[serde(skip)]
    pub(super) rng: Pcg32,
}

impl World {
    /// Create a world with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    /// Create a world with the local player's ship already spawned
    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        let mut world = Self {
            lives: tuning.start_lives,
            wave_timer: tuning.wave_delay,
            saucer_timer: tuning.saucer_spawn_interval,
            tuning,
            seed,
            ships: BTreeMap::new(),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            saucers: Vec::new(),
            score: 0,
            wave: 0,
            events: Vec::new(),
            game_over: false,
            primary_player: LOCAL_PLAYER_ID,
            rng: Pcg32::seed_from_u64(seed),
        };

        world.spawn_player(LOCAL_PLAYER_ID);

        world
    }

    /// Replace this world with a freshly constructed one
    ///
    /// Tuning carries over; the new random stream is seeded from the old one.
    pub fn reset(&mut self) {
        let seed = self.rng.random();
        *self = World::with_tuning(self.tuning.clone(), seed);
        log::info!("World reset (seed {seed})");
    }

    /// Advance the simulation by one frame
    pub fn update(&mut self, dt: f32, commands: &Commands) {
        tick(self, commands, dt);
    }

    /// Place a fresh ship for `player_id` at the centre, invulnerable
    ///
    /// Replaces any existing ship for that player.
    pub fn spawn_player(&mut self, player_id: PlayerId) {
        let mut ship = Ship::new(player_id, self.tuning.center(), &self.tuning);
        ship.invuln = self.tuning.safe_spawn_time;
        self.ships.insert(player_id, ship);
    }

    /// Add another player's ship
    pub fn add_player(&mut self, player_id: PlayerId) -> Result<&Ship, SimError> {
        if self.ships.contains_key(&player_id) {
            return Err(SimError::PlayerExists(player_id));
        }
        if self.ships.len() >= MAX_PLAYERS {
            return Err(SimError::TooManyPlayers { max: MAX_PLAYERS });
        }

        self.spawn_player(player_id);
        log::debug!("Player {player_id} joined");

        self.ships
            .get(&player_id)
            .ok_or(SimError::PlayerExists(player_id))
    }

    /// Remove a player's ship, returning it if there was one
    pub fn remove_player(&mut self, player_id: PlayerId) -> Option<Ship> {
        self.ships.remove(&player_id)
    }

    pub fn ship(&self, player_id: PlayerId) -> Option<&Ship> {
        self.ships.get(&player_id)
    }

    pub fn ship_mut(&mut self, player_id: PlayerId) -> Option<&mut Ship> {
        self.ships.get_mut(&player_id)
    }

    /// Ship of the primary player, if present
    pub fn primary_ship(&self) -> Option<&Ship> {
        self.ship(self.primary_player)
    }

    /// Where saucers aim this frame
    pub fn saucer_target(&self) -> Option<Vec2> {
        self.primary_ship().map(|ship| ship.pos)
    }

    /// Every entity, ships first, then asteroids, saucers and bullets
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.ships
            .values()
            .map(EntityRef::Ship)
            .chain(self.asteroids.iter().map(EntityRef::Asteroid))
            .chain(self.saucers.iter().map(EntityRef::Saucer))
            .chain(self.bullets.iter().map(EntityRef::Bullet))
    }

    /// Live bullets fired by `player_id`
    pub fn bullets_of(&self, player_id: PlayerId) -> usize {
        self.bullets
            .iter()
            .filter(|b| b.owner == BulletOwner::Player(player_id))
            .count()
    }

    pub fn spawn_asteroid(&mut self, pos: Vec2, vel: Vec2, size: AsteroidSize) {
        let asteroid = Asteroid::new(pos, vel, size, &self.tuning, &mut self.rng);
        self.asteroids.push(asteroid);
    }

    /// Spawn a saucer of random size at a random edge position
    pub fn spawn_saucer(&mut self) {
        let size = if self.rng.random_bool(0.5) {
            SaucerSize::Small
        } else {
            SaucerSize::Big
        };
        let pos = random_edge_position(&mut self.rng, self.tuning.width, self.tuning.height);
        let saucer = Saucer::new(pos, size, &self.tuning, &mut self.rng);
        log::debug!("{size:?} saucer spawned at ({:.0}, {:.0})", saucer.pos.x, saucer.pos.y);
        self.saucers.push(saucer);
    }

    /// Begin the next wave of large asteroids
    pub fn start_wave(&mut self) {
        self.wave += 1;
        let count = 3 + self.wave;

        let anchor = self.saucer_target().unwrap_or_else(|| self.tuning.center());

        for _ in 0..count {
            let pos = self.clear_edge_position(anchor);
            let dir = random_unit_vector(&mut self.rng);
            let speed = random_speed(
                &mut self.rng,
                self.tuning.asteroid_speed_min,
                self.tuning.asteroid_speed_max,
            );
            self.spawn_asteroid(pos, dir * speed, AsteroidSize::Large);
        }

        log::info!("Wave {} started with {} asteroids", self.wave, count);
    }

    /// Edge position at least the wave clearance away from `anchor`
    fn clear_edge_position(&mut self, anchor: Vec2) -> Vec2 {
        let (w, h) = (self.tuning.width, self.tuning.height);
        let mut pos = random_edge_position(&mut self.rng, w, h);
        let mut attempts = 1;
        while pos.distance(anchor) < self.tuning.wave_clearance {
            if attempts >= MAX_CLEARANCE_ATTEMPTS {
                log::warn!("No edge position clear of the ship after {attempts} attempts");
                break;
            }
            pos = random_edge_position(&mut self.rng, w, h);
            attempts += 1;
        }
        pos
    }

    /// Break up an asteroid that has already been removed from the world
    pub fn split_asteroid(&mut self, parent: Asteroid, add_score: bool) {
        let class = self.tuning.asteroid(parent.size).clone();
        if add_score {
            self.score += class.score;
        }

        self.events.push(GameEvent::AsteroidExplosion);

        for size in class.split {
            let dir = random_unit_vector(&mut self.rng);
            let speed = random_speed(
                &mut self.rng,
                self.tuning.asteroid_speed_min,
                self.tuning.asteroid_speed_max,
            ) * self.tuning.split_speed_factor;
            self.spawn_asteroid(parent.pos, dir * speed, size);
        }
    }

    /// Lose a life and put the ship back at the centre
    pub fn kill_ship(&mut self, player_id: PlayerId) {
        let Some(ship) = self.ships.get_mut(&player_id) else {
            return;
        };

        ship.respawn(&self.tuning);
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::ShipExplosion);
        log::debug!("Player {player_id} ship destroyed, {} lives left", self.lives);

        if self.lives == 0 {
            self.game_over = true;
            log::info!("Game over: score {} on wave {}", self.score, self.wave);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Body;

    fn asteroid(world: &World, pos: Vec2, size: AsteroidSize) -> Asteroid {
        let mut rng = Pcg32::seed_from_u64(0);
        Asteroid::new(pos, Vec2::ZERO, size, &world.tuning, &mut rng)
    }

    #[test]
    fn test_initial_state() {
        let world = World::new(1);
        assert_eq!(world.score, 0);
        assert_eq!(world.lives, 3);
        assert_eq!(world.wave, 0);
        assert!(!world.game_over);
        assert!(world.events.is_empty());
        assert!(world.asteroids.is_empty());

        let ship = world.ship(LOCAL_PLAYER_ID).expect("local ship spawned");
        assert_eq!(ship.pos, world.tuning.center());
        assert_eq!(ship.invuln, world.tuning.safe_spawn_time);
    }

    #[test]
    fn test_missing_player_is_none() {
        let world = World::new(1);
        assert!(world.ship(7).is_none());
    }

    #[test]
    fn test_add_player() {
        let mut world = World::new(1);
        assert!(world.add_player(2).is_ok());
        assert_eq!(world.add_player(2).unwrap_err(), SimError::PlayerExists(2));
        for id in 3..=MAX_PLAYERS as PlayerId {
            world.add_player(id).unwrap();
        }
        assert_eq!(
            world.add_player(99).unwrap_err(),
            SimError::TooManyPlayers { max: MAX_PLAYERS }
        );
        assert!(world.remove_player(2).is_some());
        assert!(world.ship(2).is_none());
    }

    #[test]
    fn test_start_wave_spawns_clear_large_asteroids() {
        let mut world = World::new(5);
        world.start_wave();
        assert_eq!(world.wave, 1);
        assert_eq!(world.asteroids.len(), 4);
        let ship_pos = world.primary_ship().unwrap().pos;
        for a in &world.asteroids {
            assert_eq!(a.size, AsteroidSize::Large);
            assert!(a.pos.distance(ship_pos) >= world.tuning.wave_clearance);
            let speed = a.vel.length();
            assert!(speed >= world.tuning.asteroid_speed_min - 1e-3);
            assert!(speed <= world.tuning.asteroid_speed_max + 1e-3);
        }
        world.start_wave();
        assert_eq!(world.asteroids.len(), 4 + 5);
    }

    #[test]
    fn test_split_conservation() {
        let mut world = World::new(9);
        for (size, children, child_size) in [
            (AsteroidSize::Large, 2, Some(AsteroidSize::Medium)),
            (AsteroidSize::Medium, 2, Some(AsteroidSize::Small)),
            (AsteroidSize::Small, 0, None),
        ] {
            world.asteroids.clear();
            world.events.clear();
            let parent = asteroid(&world, Vec2::new(300.0, 300.0), size);
            world.split_asteroid(parent, false);
            assert_eq!(world.asteroids.len(), children);
            assert_eq!(world.events, vec![GameEvent::AsteroidExplosion]);
            for child in &world.asteroids {
                assert_eq!(Some(child.size), child_size);
                assert_eq!(child.position(), Vec2::new(300.0, 300.0));
                let speed = child.vel.length();
                assert!(speed >= world.tuning.asteroid_speed_min * 1.2 - 1e-3);
                assert!(speed <= world.tuning.asteroid_speed_max * 1.2 + 1e-3);
            }
        }
    }

    #[test]
    fn test_split_scoring_flag() {
        let mut world = World::new(9);
        let parent = asteroid(&world, Vec2::ZERO, AsteroidSize::Medium);
        world.split_asteroid(parent.clone(), false);
        assert_eq!(world.score, 0);
        world.split_asteroid(parent, true);
        assert_eq!(world.score, world.tuning.medium.score);
    }

    #[test]
    fn test_kill_ship_resets_and_ends_game() {
        let mut world = World::new(3);
        {
            let ship = world.ship_mut(LOCAL_PLAYER_ID).unwrap();
            ship.pos = Vec2::new(10.0, 10.0);
            ship.vel = Vec2::new(5.0, 5.0);
            ship.angle = 45.0;
            ship.invuln = 0.0;
        }
        world.kill_ship(LOCAL_PLAYER_ID);
        let ship = world.ship(LOCAL_PLAYER_ID).unwrap();
        assert_eq!(ship.pos, world.tuning.center());
        assert_eq!(ship.vel, Vec2::ZERO);
        assert_eq!(ship.angle, crate::consts::SHIP_SPAWN_ANGLE);
        assert_eq!(world.lives, 2);
        assert!(!world.game_over);

        world.kill_ship(LOCAL_PLAYER_ID);
        world.kill_ship(LOCAL_PLAYER_ID);
        assert_eq!(world.lives, 0);
        assert!(world.game_over);
    }

    #[test]
    fn test_reset_rebuilds_initial_state() {
        let mut world = World::new(11);
        world.score = 500;
        world.lives = 0;
        world.game_over = true;
        world.start_wave();
        world.reset();
        assert_eq!(world.score, 0);
        assert_eq!(world.lives, world.tuning.start_lives);
        assert_eq!(world.wave, 0);
        assert!(!world.game_over);
        assert!(world.asteroids.is_empty());
        assert!(world.ship(LOCAL_PLAYER_ID).is_some());
    }

    #[test]
    fn test_entities_cover_every_collection() {
        let mut world = World::new(4);
        world.start_wave();
        world.spawn_saucer();
        let expected = world.ships.len() + world.asteroids.len() + world.saucers.len() + world.bullets.len();
        assert_eq!(world.entities().count(), expected);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut world = World::new(4);
        world.start_wave();
        let json = serde_json::to_string(&world).expect("world serializes");
        assert!(json.contains("\"asteroids\""));
        assert!(!json.contains("\"rng\""));
    }
}
