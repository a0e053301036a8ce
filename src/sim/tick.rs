//! Per-frame simulation step
//!
//! Runs one whole frame against a world: commands, movement, saucer
//! behaviour, spawn timers, the collision passes and wave progression.
//! Later collision passes see the state left behind by earlier ones.

use std::collections::BTreeMap;

use glam::Vec2;

use super::collision::{contains_point, overlaps};
use super::command::PlayerCommand;
use super::entities::PlayerId;
use super::event::GameEvent;
use super::world::World;

/// Commands for one frame, keyed by player
pub type Commands = BTreeMap<PlayerId, PlayerCommand>;

/// Advance the world by one frame
pub fn tick(world: &mut World, commands: &Commands, dt: f32) {
    world.events.clear();

    // Frozen until reset
    if world.game_over {
        return;
    }

    let prev_target = world.saucer_target();
    apply_commands(world, commands, dt);
    advance_entities(world, prev_target, dt);
    update_saucers(world, dt);
    update_timers(world, dt);

    bullets_vs_asteroids(world);
    saucers_vs_player_bullets(world);
    saucers_vs_asteroids(world);
    ships_vs_asteroids(world);
    ships_vs_saucer_bullets(world);

    maybe_start_next_wave(world, dt);
}

fn apply_commands(world: &mut World, commands: &Commands, dt: f32) {
    for (player_id, cmd) in commands {
        let Some(ship) = world.ships.get_mut(player_id) else {
            continue;
        };

        if cmd.hyperspace {
            ship.hyperspace(&mut world.rng, &world.tuning);
            world.score = world.score.saturating_sub(world.tuning.hyperspace_cost);
        }

        if let Some(bullet) = ship.apply_command(cmd, dt, &world.bullets, &world.tuning) {
            world.bullets.push(bullet);
            world.events.push(GameEvent::PlayerShoot);
        }
    }
}

/// Move every entity once
///
/// Saucers steer toward where the primary ship was before this frame's
/// commands, and take a second step in the saucer pass.
fn advance_entities(world: &mut World, prev_target: Option<Vec2>, dt: f32) {
    for ship in world.ships.values_mut() {
        ship.update(dt, &world.tuning);
    }
    for asteroid in &mut world.asteroids {
        asteroid.update(dt, &world.tuning);
    }
    for bullet in &mut world.bullets {
        bullet.update(dt, &world.tuning);
    }
    world.bullets.retain(|b| !b.expired());

    for saucer in &mut world.saucers {
        saucer.update(dt, prev_target, &world.tuning);
    }
    world.saucers.retain(|s| !s.is_removed());
}

fn update_saucers(world: &mut World, dt: f32) {
    let target = world.saucer_target();

    for saucer in &mut world.saucers {
        saucer.update(dt, target, &world.tuning);
        if saucer.is_removed() {
            continue;
        }

        if let Some(bullet) = saucer.try_fire(target, &world.tuning, &mut world.rng) {
            world.bullets.push(bullet);
            world.events.push(GameEvent::UfoShoot);
        }
    }

    world.saucers.retain(|s| !s.is_removed());
}

fn update_timers(world: &mut World, dt: f32) {
    world.saucer_timer -= dt;
    if world.saucer_timer <= 0.0 {
        world.spawn_saucer();
        world.saucer_timer = world.tuning.saucer_spawn_interval;
    }
}

/// Bullets consume themselves on the first asteroid that contains them
///
/// An asteroid hit by any saucer bullet is destroyed without splitting or
/// scoring. Fragments spawned here are not tested until the next frame.
fn bullets_vs_asteroids(world: &mut World) {
    let asteroids = std::mem::take(&mut world.asteroids);
    let mut survivors = Vec::with_capacity(asteroids.len());
    let mut destroyed = Vec::new();

    for asteroid in asteroids {
        let mut hit = false;
        let mut by_saucer = false;
        world.bullets.retain(|bullet| {
            if contains_point(&asteroid, bullet.pos) {
                hit = true;
                by_saucer |= bullet.owner.is_saucer();
                false
            } else {
                true
            }
        });

        if hit {
            destroyed.push((asteroid, by_saucer));
        } else {
            survivors.push(asteroid);
        }
    }

    world.asteroids = survivors;

    for (asteroid, by_saucer) in destroyed {
        if by_saucer {
            world.events.push(GameEvent::AsteroidExplosion);
        } else {
            world.split_asteroid(asteroid, true);
        }
    }
}

/// Each saucer dies at most once and takes exactly one player bullet with it
fn saucers_vs_player_bullets(world: &mut World) {
    let mut i = 0;
    while i < world.saucers.len() {
        let saucer = &world.saucers[i];
        let hit = world
            .bullets
            .iter()
            .position(|b| b.owner.is_player() && overlaps(saucer, b));

        let Some(j) = hit else {
            i += 1;
            continue;
        };

        world.bullets.remove(j);
        let saucer = world.saucers.remove(i);
        world.score += world.tuning.saucer(saucer.is_small()).score;
        world.events.push(GameEvent::ShipExplosion);
        log::debug!("{:?} saucer shot down, score {}", saucer.size, world.score);
    }
}

fn saucers_vs_asteroids(world: &mut World) {
    let mut i = 0;
    while i < world.saucers.len() {
        let saucer = &world.saucers[i];
        let hit = world.asteroids.iter().position(|a| overlaps(saucer, a));

        let Some(j) = hit else {
            i += 1;
            continue;
        };

        world.saucers.remove(i);
        let asteroid = world.asteroids.remove(j);
        world.events.push(GameEvent::ShipExplosion);
        world.split_asteroid(asteroid, false);
    }
}

/// At most one ship dies per frame from asteroids
fn ships_vs_asteroids(world: &mut World) {
    let victim = world
        .ships
        .iter()
        .filter(|(_, ship)| !ship.is_invulnerable())
        .find(|(_, ship)| world.asteroids.iter().any(|a| overlaps(*ship, a)))
        .map(|(&id, _)| id);

    if let Some(player_id) = victim {
        world.kill_ship(player_id);
    }
}

/// At most one ship dies per frame from saucer fire; the bullet is spent
fn ships_vs_saucer_bullets(world: &mut World) {
    let mut hit = None;
    for (&player_id, ship) in &world.ships {
        if ship.is_invulnerable() {
            continue;
        }
        let found = world
            .bullets
            .iter()
            .position(|b| b.owner.is_saucer() && overlaps(ship, b));
        if let Some(j) = found {
            hit = Some((player_id, j));
            break;
        }
    }

    if let Some((player_id, j)) = hit {
        world.bullets.remove(j);
        world.kill_ship(player_id);
    }
}

fn maybe_start_next_wave(world: &mut World, dt: f32) {
    if !world.asteroids.is_empty() {
        return;
    }

    world.wave_timer -= dt;
    if world.wave_timer <= 0.0 {
        world.start_wave();
        world.wave_timer = world.tuning.wave_delay;
    }
}
