//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and input concerns:
//! - One mutator: `World::update` runs a whole frame to completion
//! - Randomness comes only from the world's own seeded stream
//! - Stable iteration order (players by id, entities by insertion)

pub mod collision;
pub mod command;
pub mod entities;
pub mod event;
pub mod saucer;
pub mod spawn;
pub mod tick;
pub mod world;

pub use collision::{contains_point, overlaps};
pub use command::PlayerCommand;
pub use entities::{Asteroid, AsteroidSize, Body, Bullet, BulletOwner, EntityRef, PlayerId, Ship};
pub use event::GameEvent;
pub use saucer::{Crossing, Saucer, SaucerSize};
pub use spawn::{random_edge_position, random_position, random_speed, random_unit_vector};
pub use tick::{Commands, tick};
pub use world::World;
