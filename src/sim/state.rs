//! Table session state
//!
//! Everything the simulation owns for one game lives in [`TableSession`]:
//! planets, the pulse oscillator, combo and multiball state, and the element
//! handles resolved at table start. Balls and elements stay with the host.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::combo::ComboBonus;
use super::multiball::{MultiballController, MultiballStatus};
use super::planet::{Planet, PlanetStatus, PulsePhase};
use crate::color::{PALETTE_SIZE, PLANET_COLORS};
use crate::consts::TAU;
use crate::field::{BallId, ElementHandle, Field, RolloverGroupHandle, WallHandle};
use crate::tuning::{TableTuning, TuningError};
use crate::wrap_angle;

/// Failures while binding a session to a table
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid tuning: {0}")]
    Tuning(#[from] TuningError),
    #[error("table element `{0}` not found")]
    MissingElement(String),
    #[error("table element `{id}` is a {found}, expected a {expected}")]
    WrongElementKind {
        id: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("orbit group has no rollovers, so the table has no planets")]
    NoPlanets,
    #[error("table has {count} planets but only {max} palette colors")]
    TooManyPlanets { count: usize, max: usize },
}

/// Notable things that happened, for hosts that want sound or UI cues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableEvent {
    /// A ball picked up a planet's color
    PlanetCollected { ball: BallId, planet: usize },
    PlanetActivated { planet: usize },
    ComboShot { points: i64, multiplier: u32 },
    MultiballStarting,
    MultiballActive,
    MultiballEnded,
    Jackpot { points: i64, multiplier: u32 },
    BallSaverEnabled { element: String },
    ScoreMultiplierIncreased { multiplier: f64 },
}

/// Handles resolved once at table start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableElements {
    pub launch_barrier: WallHandle,
    pub sun: RolloverGroupHandle,
    pub orbits: RolloverGroupHandle,
    pub ball_saver_left: WallHandle,
    pub ball_saver_right: WallHandle,
    pub flipper_rollovers: Option<RolloverGroupHandle>,
    pub planet2_rollovers: Option<RolloverGroupHandle>,
}

/// One game on the orbit table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSession {
    /// Seed used for initial planet placement
    pub seed: u64,
    pub tuning: TableTuning,
    pub elements: TableElements,
    /// Fixed count after start, ordered by index
    pub planets: Vec<Planet>,
    pub pulse: PulsePhase,
    pub combo: ComboBonus,
    pub multiball: MultiballController,
    /// Simulated time since start
    pub time_nanos: u64,
    events: Vec<TableEvent>,
}

impl TableSession {
    /// Bind to the table: resolve elements, set up planets and reset scoring state
    pub fn start(field: &mut impl Field, tuning: TableTuning, seed: u64) -> Result<Self, SessionError> {
        tuning.validate()?;
        let ids = &tuning.elements;

        let launch_barrier = resolve_wall(field, &ids.launch_barrier)?;
        field.set_wall_retracted(launch_barrier, true);

        let sun = resolve_rollover_group(field, &ids.sun)?;
        field.set_all_rollovers_activated(sun, true);

        let orbits = resolve_rollover_group(field, &ids.orbits)?;
        let ball_saver_left = resolve_wall(field, &ids.ball_saver_left)?;
        let ball_saver_right = resolve_wall(field, &ids.ball_saver_right)?;
        let flipper_rollovers = resolve_optional_rollover_group(field, &ids.flipper_rollovers);
        let planet2_rollovers = resolve_optional_rollover_group(field, &ids.planet2_rollovers);

        let count = field.rollover_count(orbits);
        if count == 0 {
            return Err(SessionError::NoPlanets);
        }
        if count > PALETTE_SIZE {
            return Err(SessionError::TooManyPlanets {
                count,
                max: PALETTE_SIZE,
            });
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut planets = Vec::with_capacity(count);
        for index in 0..count {
            let element = resolve_rollover_group(field, &ids.planet(index))?;
            // Inner planets orbit faster
            let speed = tuning.planet_base_speed + tuning.planet_speed_jitter * rng.random::<f32>();
            planets.push(Planet {
                index,
                element,
                color: PLANET_COLORS[index],
                radius: field.rollover_radius(element, 0),
                angle: wrap_angle(rng.random::<f32>() * TAU),
                angular_velocity: speed / (index + 1) as f32,
                status: PlanetStatus::Off,
            });
        }

        log::info!("Orbit table started with {} planets (seed {})", count, seed);

        Ok(Self {
            seed,
            tuning,
            elements: TableElements {
                launch_barrier,
                sun,
                orbits,
                ball_saver_left,
                ball_saver_right,
                flipper_rollovers,
                planet2_rollovers,
            },
            planets,
            pulse: PulsePhase::default(),
            combo: ComboBonus::default(),
            multiball: MultiballController::default(),
            time_nanos: 0,
            events: Vec::new(),
        })
    }

    pub fn planet_status(&self, index: usize) -> Option<PlanetStatus> {
        self.planets.get(index).map(|p| p.status)
    }

    pub fn multiball_status(&self) -> MultiballStatus {
        self.multiball.status()
    }

    /// Orbits keep animating with no ball in play
    pub fn is_field_active(&self) -> bool {
        true
    }

    /// Drain events recorded since the last call
    pub fn take_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: TableEvent) {
        self.events.push(event);
    }
}

fn resolve(field: &impl Field, id: &str) -> Result<ElementHandle, SessionError> {
    field
        .element(id)
        .ok_or_else(|| SessionError::MissingElement(id.to_string()))
}

fn resolve_wall(field: &impl Field, id: &str) -> Result<WallHandle, SessionError> {
    let handle = resolve(field, id)?;
    handle.as_wall().ok_or_else(|| SessionError::WrongElementKind {
        id: id.to_string(),
        expected: "wall",
        found: handle.kind_name(),
    })
}

fn resolve_rollover_group(field: &impl Field, id: &str) -> Result<RolloverGroupHandle, SessionError> {
    let handle = resolve(field, id)?;
    handle
        .as_rollover_group()
        .ok_or_else(|| SessionError::WrongElementKind {
            id: id.to_string(),
            expected: "rollover group",
            found: handle.kind_name(),
        })
}

fn resolve_optional_rollover_group(field: &impl Field, id: &str) -> Option<RolloverGroupHandle> {
    match resolve_rollover_group(field, id) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("Optional element unavailable: {}", e);
            None
        }
    }
}
