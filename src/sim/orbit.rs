//! Planet orbit kinematics

use glam::Vec2;

use crate::{polar_to_cartesian, wrap_angle};

/// A circular orbit track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub center: Vec2,
    pub radius: f32,
}

impl Orbit {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Point on the orbit at `angle`
    #[inline]
    pub fn position_at(&self, angle: f32) -> Vec2 {
        self.center + polar_to_cartesian(self.radius, angle)
    }
}

/// Advance an angle by `angular_velocity * dt`, wrapped into [0, 2π)
#[inline]
pub fn advance_angle(angle: f32, angular_velocity: f32, dt: f32) -> f32 {
    wrap_angle(angle + angular_velocity * dt)
}
