//! Planets and their activation status

use serde::{Deserialize, Serialize};

use crate::color::{BALL_COLORS, Color};
use crate::consts::TAU;
use crate::field::{BallView, RolloverGroupHandle};
use crate::wrap_angle;

/// Planet activation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlanetStatus {
    #[default]
    Off,
    /// A ball carrying this planet's color is in play
    InProgress,
    /// Activated; only cleared by a table-wide reset
    On,
}

/// An orbiting planet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub index: usize,
    /// Rollover group drawing the planet body
    pub element: RolloverGroupHandle,
    pub color: Color,
    pub radius: f32,
    /// Orbit angle in [0, 2π)
    pub angle: f32,
    /// Radians per second
    pub angular_velocity: f32,
    pub status: PlanetStatus,
}

impl Planet {
    /// Ball primary color that carries this planet
    pub fn ball_color(&self) -> Color {
        BALL_COLORS[self.index]
    }

    /// Recompute OFF / IN_PROGRESS from the balls in play. ON is left alone.
    pub fn refresh_status(&mut self, balls: &[BallView]) {
        if self.status == PlanetStatus::On {
            return;
        }
        let carried = balls.iter().any(|b| b.primary_color == self.ball_color());
        self.status = if carried {
            PlanetStatus::InProgress
        } else {
            PlanetStatus::Off
        };
    }

    /// Color to draw this planet with, given the shared pulse
    pub fn display_color(&self, pulse: &PulsePhase, amplitude: f32) -> Color {
        // In-progress planets cycle between 30% and 100% of their full color
        let fade = match self.status {
            PlanetStatus::InProgress => pulse.intensity(amplitude),
            _ => 0.0,
        };
        self.color.blended_with(Color::BLACK, fade)
    }
}

/// True when every planet is ON
pub fn all_on(planets: &[Planet]) -> bool {
    planets.iter().all(|p| p.status == PlanetStatus::On)
}

/// Set every planet back to OFF
pub fn reset_all(planets: &mut [Planet]) {
    for p in planets {
        p.status = PlanetStatus::Off;
    }
}

/// Shared oscillator driving the in-progress pulse
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PulsePhase {
    pub phase: f32,
}

impl PulsePhase {
    /// Advance by one `period_secs` cycle per period
    pub fn advance(&mut self, dt_secs: f32, period_secs: f32) {
        self.phase = wrap_angle(self.phase + TAU * dt_secs / period_secs);
    }

    /// Fade toward black: `(1 + sin(phase)) * amplitude`
    pub fn intensity(&self, amplitude: f32) -> f32 {
        (1.0 + self.phase.sin()) * amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PLANET_COLORS;
    use glam::Vec2;

    fn planet(index: usize) -> Planet {
        Planet {
            index,
            element: RolloverGroupHandle(index as u32),
            color: PLANET_COLORS[index],
            radius: 0.5,
            angle: 0.0,
            angular_velocity: 1.0,
            status: PlanetStatus::Off,
        }
    }

    fn ball_with(color: Color) -> BallView {
        let mut b = BallView::new(1, Vec2::ZERO);
        b.primary_color = color;
        b
    }

    #[test]
    fn test_refresh_tracks_ball_colors() {
        let mut p0 = planet(0);
        let mut p1 = planet(1);
        let balls = vec![ball_with(BALL_COLORS[0])];
        p0.refresh_status(&balls);
        p1.refresh_status(&balls);
        assert_eq!(p0.status, PlanetStatus::InProgress);
        assert_eq!(p1.status, PlanetStatus::Off);

        p0.refresh_status(&[]);
        assert_eq!(p0.status, PlanetStatus::Off);
    }

    #[test]
    fn test_refresh_never_clears_on() {
        let mut p = planet(2);
        p.status = PlanetStatus::On;
        p.refresh_status(&[]);
        assert_eq!(p.status, PlanetStatus::On);
    }

    #[test]
    fn test_all_on_and_reset() {
        let mut planets = vec![planet(0), planet(1)];
        assert!(!all_on(&planets));
        planets[0].status = PlanetStatus::On;
        assert!(!all_on(&planets));
        planets[1].status = PlanetStatus::On;
        assert!(all_on(&planets));
        reset_all(&mut planets);
        assert!(planets.iter().all(|p| p.status == PlanetStatus::Off));
    }

    #[test]
    fn test_pulse_wraps_and_bounds_intensity() {
        let mut pulse = PulsePhase::default();
        pulse.advance(1.0, 4.0);
        assert!((pulse.phase - TAU / 4.0).abs() < 1e-5);
        assert!((pulse.intensity(0.35) - 0.7).abs() < 1e-5);
        pulse.advance(5.0, 4.0);
        assert!((0.0..TAU).contains(&pulse.phase));
        assert!((0.0..=0.7 + 1e-5).contains(&pulse.intensity(0.35)));
    }

    #[test]
    fn test_display_color() {
        let mut p = planet(0);
        let pulse = PulsePhase { phase: 0.0 };
        assert_eq!(p.display_color(&pulse, 0.35), PLANET_COLORS[0]);
        p.status = PlanetStatus::InProgress;
        assert_eq!(
            p.display_color(&pulse, 0.35),
            PLANET_COLORS[0].blended_with(Color::BLACK, 0.35)
        );
        p.status = PlanetStatus::On;
        assert_eq!(p.display_color(&pulse, 0.35), PLANET_COLORS[0]);
    }
}
