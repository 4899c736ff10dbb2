//! Per-frame table update
//!
//! Order matters: multiball exit, planet status, combo decay, orbits, then gravity.
//! Planets move before gravity so the pull reflects where they are this frame.

use glam::Vec2;

use super::gravity::{self, GravitySource, Sun};
use super::orbit::{Orbit, advance_angle};
use super::planet;
use super::state::{TableEvent, TableSession};
use crate::field::Field;
use crate::nanos_to_secs;

/// Advance the table by `nanos` of host time
pub fn tick(session: &mut TableSession, field: &mut impl Field, nanos: u64) {
    session.time_nanos = session.time_nanos.saturating_add(nanos);
    let dt = nanos_to_secs(nanos);

    // Multiball exit
    if session.multiball.should_end(field.ball_count()) && session.multiball.end() {
        planet::reset_all(&mut session.planets);
        log::info!("Multiball over");
        session.emit(TableEvent::MultiballEnded);
    }

    refresh_planets(session, field, dt);

    session.combo.decay(nanos);

    move_planets(session, field, dt);

    apply_gravity(session, field, dt);
}

/// Sync planet statuses with the balls in play and redraw them
fn refresh_planets(session: &mut TableSession, field: &mut impl Field, dt: f32) {
    session.pulse.advance(dt, session.tuning.pulse_period_secs);
    let balls = field.balls();
    let amplitude = session.tuning.pulse_amplitude;
    for p in &mut session.planets {
        p.refresh_status(&balls);
        field.set_all_rollovers_activated(p.element, p.status != planet::PlanetStatus::Off);
        field.set_rollover_color(p.element, 0, p.display_color(&session.pulse, amplitude));
    }
}

fn move_planets(session: &mut TableSession, field: &mut impl Field, dt: f32) {
    let orbits = session.elements.orbits;
    for (i, p) in session.planets.iter_mut().enumerate() {
        p.angle = advance_angle(p.angle, p.angular_velocity, dt);
        let orbit = Orbit::new(field.rollover_center(orbits, i), field.rollover_radius(orbits, i));
        field.set_rollover_center(p.element, 0, orbit.position_at(p.angle));
    }
}

fn apply_gravity(session: &TableSession, field: &mut impl Field, dt: f32) {
    let tuning = &session.tuning.gravity;
    let sun = Sun {
        pos: field.rollover_center(session.elements.sun, 0),
        strength: tuning.sun_strength,
        range_squared: tuning.range_squared,
    };
    let sources: Vec<GravitySource> = session
        .planets
        .iter()
        .map(|p| GravitySource {
            pos: field.rollover_center(p.element, 0),
            strength: gravity::planet_strength(tuning.planet_strength, p.radius),
        })
        .collect();

    for ball in field.balls() {
        let force = gravity::net_force(ball.pos, &sun, &sources, tuning.depth_squared);
        // Zero outside the sun's range
        if force != Vec2::ZERO {
            field.apply_impulse(ball.id, force * dt);
        }
    }
}
