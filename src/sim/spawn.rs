//! Random sampling helpers for spawn placement
//!
//! All take the caller's RNG so a seeded world stays reproducible.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Uniformly distributed unit vector
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let angle = rng.random_range(0.0..TAU);
    Vec2::new(angle.cos(), angle.sin())
}

/// Random point on the playfield border
///
/// Half the time on a horizontal edge (top or bottom), otherwise on a
/// vertical edge (left or right).
pub fn random_edge_position<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    if rng.random_bool(0.5) {
        let x = rng.random_range(0.0..=width);
        let y = if rng.random_bool(0.5) { 0.0 } else { height };
        Vec2::new(x, y)
    } else {
        let x = if rng.random_bool(0.5) { 0.0 } else { width };
        let y = rng.random_range(0.0..=height);
        Vec2::new(x, y)
    }
}

/// Uniform point inside the playfield
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height))
}

/// Uniform speed in `[min, max]`
pub fn random_speed<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_unit_vectors_are_normalized() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_edge_positions_lie_on_border() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let p = random_edge_position(&mut rng, 960.0, 720.0);
            let on_x_edge = p.x == 0.0 || p.x == 960.0;
            let on_y_edge = p.y == 0.0 || p.y == 720.0;
            assert!(on_x_edge || on_y_edge, "{p:?} is not on the border");
            assert!((0.0..=960.0).contains(&p.x) && (0.0..=720.0).contains(&p.y));
        }
    }

    #[test]
    fn test_positions_inside_playfield() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let p = random_position(&mut rng, 960.0, 720.0);
            assert!(p.x >= 0.0 && p.x < 960.0);
            assert!(p.y >= 0.0 && p.y < 720.0);
        }
    }

    #[test]
    fn test_degenerate_speed_range() {
        let mut rng = Pcg32::seed_from_u64(5);
        assert_eq!(random_speed(&mut rng, 40.0, 40.0), 40.0);
    }
}
