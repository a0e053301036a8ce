//! Backend-neutral presentation
//!
//! Turns a world snapshot into line-list vertices and HUD strings. A GPU or
//! software backend uploads `Vertex::as_bytes` and draws lines; nothing here
//! touches a device.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use crate::sim::{BulletOwner, Ship, World};

/// Title caption on the menu screen
pub const MENU_TITLE: &str = "ASTEROIDS";
/// Caption on the game-over screen
pub const GAME_OVER_TITLE: &str = "GAME OVER";
/// Prompt shown under either caption
pub const PRESS_ANY_KEY: &str = "Press any key";

/// Gap between the hull and the invulnerability ring
const SHIELD_GAP: f32 = 6.0;
const BULLET_SEGMENTS: u32 = 8;

/// HUD line shown during play
pub fn hud_text(score: u64, lives: u32, wave: u32) -> String {
    format!("SCORE {score:06}   LIVES {lives}   WAVE {wave}")
}

/// The shield ring blinks at 5 Hz while invulnerable
pub fn shield_visible(ship: &Ship) -> bool {
    ship.is_invulnerable() && ((ship.invuln * 10.0) as i64) % 2 == 0
}

/// Line-list vertices for every entity in the world
pub fn draw_world(world: &World) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for asteroid in &world.asteroids {
        let outline: Vec<_> = asteroid.world_outline().collect();
        vertices.extend(shapes::closed_polyline(&outline, colors::ASTEROID));
    }

    for ship in world.ships.values() {
        vertices.extend(shapes::ship(ship.pos, ship.angle, ship.radius, colors::SHIP));
        if shield_visible(ship) {
            vertices.extend(shapes::circle(
                ship.pos,
                ship.radius + SHIELD_GAP,
                colors::SHIELD,
                shapes::CIRCLE_SEGMENTS,
            ));
        }
    }

    for saucer in &world.saucers {
        vertices.extend(shapes::saucer(saucer.pos, saucer.radius, colors::SAUCER));
    }

    for bullet in &world.bullets {
        let color = match bullet.owner {
            BulletOwner::Player(_) => colors::PLAYER_BULLET,
            BulletOwner::Saucer => colors::SAUCER_BULLET,
        };
        vertices.extend(shapes::circle(bullet.pos, bullet.radius, color, BULLET_SEGMENTS));
    }

    vertices
}
