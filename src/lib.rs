//! Orbit Table - gravity and scoring core for a planetary pinball table
//!
//! Core modules:
//! - `sim`: Table simulation (orbits, gravity, planet/combo/multiball state machines)
//! - `field`: Interface to the host physics engine and table elements
//! - `headless`: In-memory field for demos and tests
//! - `tuning`: Data-driven table balance and element ids
//! - `color`: Planet and ball palettes

pub mod color;
pub mod field;
pub mod headless;
pub mod sim;
pub mod tuning;

pub use color::Color;
pub use field::{BallId, BallView, ElementHandle, Field, ScheduledAction};
pub use sim::{TableEvent, TableSession, tick};
pub use tuning::TableTuning;

use glam::Vec2;

/// Table configuration constants
pub mod consts {
    /// Full turn in radians
    pub const TAU: f32 = std::f32::consts::TAU;
    /// Nanoseconds per second
    pub const NANOS_PER_SEC: f32 = 1e9;
    /// Host frame step used by the headless runner (120 Hz)
    pub const FRAME_NANOS: u64 = 1_000_000_000 / 120;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    use consts::TAU;
    while angle >= TAU {
        angle -= TAU;
    }
    while angle < 0.0 {
        angle += TAU;
    }
    // Adding TAU to a tiny negative value can round up to TAU itself
    if angle >= TAU { 0.0 } else { angle }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert a nanosecond delta to seconds
#[inline]
pub fn nanos_to_secs(nanos: u64) -> f32 {
    nanos as f32 / consts::NANOS_PER_SEC
}
