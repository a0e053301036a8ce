//! Circle collision tests
//!
//! Every entity is a circle. Distances are plain Euclidean (no wraparound),
//! and there is no broad phase: the entity counts are small.

use glam::Vec2;

use super::entities::Body;

/// Two bodies overlap when their centres are closer than the summed radii
#[inline]
pub fn overlaps(a: &impl Body, b: &impl Body) -> bool {
    circles_overlap(a.position(), a.radius(), b.position(), b.radius())
}

/// A point lies strictly inside a body's circle
///
/// Used for bullet hits on asteroids, where only the asteroid's radius
/// counts toward the threshold.
#[inline]
pub fn contains_point(body: &impl Body, point: Vec2) -> bool {
    within(body.position(), point, body.radius())
}

#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    within(a, b, ra + rb)
}

#[inline]
fn within(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance_squared(b) < threshold * threshold
}
