//! Sun and planet gravity
//!
//! Every source sits `sqrt(depth_squared)` below the table plane, so the force
//! `strength / (depth² + d²)` stays finite even with the ball directly on top.
//! The sun's range cutoff gates the whole sum: outside it, planets pull nothing
//! either, however close the ball is to one of them.

use glam::Vec2;

/// The fixed central source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sun {
    pub pos: Vec2,
    pub strength: f32,
    /// Squared distance beyond which no gravity applies at all
    pub range_squared: f32,
}

impl Sun {
    /// Is the ball close enough to the sun for gravity to apply?
    #[inline]
    pub fn in_range(&self, ball_pos: Vec2) -> bool {
        (self.pos - ball_pos).length_squared() <= self.range_squared
    }
}

/// A point source (planets)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitySource {
    pub pos: Vec2,
    pub strength: f32,
}

/// Planet strength scales with its volume
#[inline]
pub fn planet_strength(base: f32, radius: f32) -> f32 {
    base * radius.powi(3)
}

/// Force a single source exerts on the ball
pub fn attraction(ball_pos: Vec2, source_pos: Vec2, strength: f32, depth_squared: f32) -> Vec2 {
    let d = source_pos - ball_pos;
    let dist_sq = d.length_squared();
    let magnitude = strength / (depth_squared + dist_sq);
    let angle = d.y.atan2(d.x);
    Vec2::new(magnitude * angle.cos(), magnitude * angle.sin())
}

/// Net force on a ball from the sun and all planets
///
/// Returns zero when the ball is outside the sun's range.
pub fn net_force(ball_pos: Vec2, sun: &Sun, planets: &[GravitySource], depth_squared: f32) -> Vec2 {
    if !sun.in_range(ball_pos) {
        return Vec2::ZERO;
    }
    let mut force = attraction(ball_pos, sun.pos, sun.strength, depth_squared);
    for planet in planets {
        force += attraction(ball_pos, planet.pos, planet.strength, depth_squared);
    }
    force
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sun() -> Sun {
        Sun {
            pos: Vec2::ZERO,
            strength: 8.0,
            range_squared: 64.0,
        }
    }

    #[test]
    fn test_sun_force_magnitude() {
        // Squared distance 12 from the sun: 8 / (4 + 12) = 0.5
        let ball = Vec2::new(12f32.sqrt(), 0.0);
        let f = net_force(ball, &sun(), &[], 4.0);
        assert!((f.length() - 0.5).abs() < 1e-5);
        // Points at the sun
        assert!(f.x < 0.0);
        assert!(f.y.abs() < 1e-5);
    }

    #[test]
    fn test_planets_add_their_own_pull() {
        let ball = Vec2::new(12f32.sqrt(), 0.0);
        let planet = GravitySource {
            pos: ball + Vec2::new(0.0, 2.0),
            strength: planet_strength(15.0, 0.5),
        };
        let f = net_force(ball, &sun(), &[planet], 4.0);
        // Planet: 1.875 / (4 + 4) straight up
        let expected_y = 1.875 / 8.0;
        assert!((f.y - expected_y).abs() < 1e-5);
        assert!((f.x + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_out_of_sun_range_ignores_planets() {
        let ball = Vec2::new(20.0, 0.0);
        let planet = GravitySource {
            pos: Vec2::new(20.5, 0.0),
            strength: 1000.0,
        };
        assert_eq!(net_force(ball, &sun(), &[planet], 4.0), Vec2::ZERO);
    }

    #[test]
    fn test_ball_on_source_is_finite() {
        let f = attraction(Vec2::ONE, Vec2::ONE, 8.0, 4.0);
        assert!(f.is_finite());
    }

    #[test]
    fn test_planet_strength_cubes_radius() {
        assert_eq!(planet_strength(15.0, 2.0), 120.0);
    }

    proptest! {
        #[test]
        fn force_decreases_with_distance(d1 in 0.0f32..7.0, extra in 0.01f32..1.0) {
            let near = attraction(Vec2::new(d1, 0.0), Vec2::ZERO, 8.0, 4.0).length();
            let far = attraction(Vec2::new(d1 + extra, 0.0), Vec2::ZERO, 8.0, 4.0).length();
            prop_assert!(far < near);
        }

        #[test]
        fn zero_outside_range(r in 8.01f32..100.0, theta in 0.0f32..6.28) {
            let ball = crate::polar_to_cartesian(r, theta);
            let planet = GravitySource { pos: ball, strength: 500.0 };
            prop_assert_eq!(net_force(ball, &sun(), &[planet], 4.0), Vec2::ZERO);
        }
    }
}
