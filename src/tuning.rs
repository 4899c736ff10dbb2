//! Table tuning
//!
//! Data-driven balance for the orbit table: gravity constants, scores, timers,
//! message durations and the ids of every table element the simulation touches.
//! Defaults reproduce the stock table. Load overrides from JSON with [`TableTuning::from_json`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::PALETTE_SIZE;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{0}` must be positive")]
    NonPositive(&'static str),
    #[error("shot route `{sensor}` targets planet {planet}, but at most {max} planets exist")]
    PlanetOutOfRange {
        sensor: String,
        planet: usize,
        max: usize,
    },
}

/// Gravity model constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityTuning {
    /// Strength of the sun
    pub sun_strength: f32,
    /// Planet strength per unit of radius³
    pub planet_strength: f32,
    /// Squared depth of all sources "below" the ball; keeps forces finite
    pub depth_squared: f32,
    /// Squared distance from the sun beyond which no gravity applies
    pub range_squared: f32,
}

impl Default for GravityTuning {
    fn default() -> Self {
        Self {
            sun_strength: 8.0,
            planet_strength: 15.0,
            depth_squared: 2.0 * 2.0,
            range_squared: 8.0 * 8.0,
        }
    }
}

/// Score awards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    pub ramp: i64,
    pub planet1_targets: i64,
    pub planet2_rollovers: i64,
    pub planet_activated: i64,
    pub multiball_jackpot: i64,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            ramp: 2500,
            planet1_targets: 5000,
            planet2_rollovers: 5000,
            planet_activated: 5000,
            multiball_jackpot: 100_000,
        }
    }
}

/// Message display durations (milliseconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTuning {
    pub multiball_ms: u32,
    pub jackpot_ms: u32,
    pub planet_activated_ms: u32,
    pub ramp_ms: u32,
    pub save_enabled_ms: u32,
    pub multiplier_ms: u32,
}

impl Default for MessageTuning {
    fn default() -> Self {
        Self {
            multiball_ms: 4000,
            jackpot_ms: 2000,
            planet_activated_ms: 1500,
            ramp_ms: 1000,
            save_enabled_ms: 1500,
            multiplier_ms: 1500,
        }
    }
}

/// Ids of the table elements the simulation reads and drives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub launch_barrier: String,
    pub launch_barrier_extend_sensor: String,
    pub launch_barrier_retract_sensor: String,
    pub sun: String,
    pub orbits: String,
    /// Planet `i` is the rollover group `{planet_prefix}{i + 1}`
    pub planet_prefix: String,
    pub ball_saver_left: String,
    pub ball_saver_right: String,
    pub left_save_targets: String,
    pub right_save_targets: String,
    pub planet1_targets: String,
    pub planet2_rollovers: String,
    pub flipper_rollovers: String,
}

impl ElementIds {
    /// Element id of planet `index`
    pub fn planet(&self, index: usize) -> String {
        format!("{}{}", self.planet_prefix, index + 1)
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            launch_barrier: "LaunchBarrier".into(),
            launch_barrier_extend_sensor: "LaunchBarrierSensor".into(),
            launch_barrier_retract_sensor: "LaunchBarrierRetract".into(),
            sun: "Sun".into(),
            orbits: "Orbits".into(),
            planet_prefix: "Planet".into(),
            ball_saver_left: "BallSaver-left".into(),
            ball_saver_right: "BallSaver-right".into(),
            left_save_targets: "DropTargetLeftSave".into(),
            right_save_targets: "DropTargetRightSave".into(),
            planet1_targets: "Planet1Targets".into(),
            planet2_rollovers: "Planet2Rollovers".into(),
            flipper_rollovers: "FlipperRollovers".into(),
        }
    }
}

/// A ramp or loop shot: `exit_sensor` firing while the ball's previous sensor is `entry_sensor`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRoute {
    pub entry_sensor: String,
    pub exit_sensor: String,
    pub points: i64,
    /// Planet this shot can activate, if any
    #[serde(default)]
    pub planet: Option<usize>,
}

impl ShotRoute {
    pub fn new(entry: &str, exit: &str, points: i64, planet: Option<usize>) -> Self {
        Self {
            entry_sensor: entry.into(),
            exit_sensor: exit.into(),
            points,
            planet,
        }
    }
}

/// Complete table tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableTuning {
    pub gravity: GravityTuning,
    pub scoring: ScoringTuning,
    pub messages: MessageTuning,
    pub elements: ElementIds,
    pub shots: Vec<ShotRoute>,

    // === Timers ===
    /// Window after a ramp shot during which the next one is multiplied
    pub ramp_bonus_duration_nanos: i64,
    /// Delay before each multiball ball launch
    pub multiball_launch_delay_ms: u32,

    // === Planet visuals ===
    /// Seconds for one full in-progress pulse cycle
    pub pulse_period_secs: f32,
    /// Pulse intensity is `(1 + sin(phase)) * pulse_amplitude`
    pub pulse_amplitude: f32,

    // === Planet motion ===
    /// Base angular velocity (rad/s) before the per-planet `1 / (i + 1)` falloff
    pub planet_base_speed: f32,
    /// Random spread added to the base angular velocity
    pub planet_speed_jitter: f32,
}

impl Default for TableTuning {
    fn default() -> Self {
        let ramp = ScoringTuning::default().ramp;
        Self {
            gravity: GravityTuning::default(),
            scoring: ScoringTuning::default(),
            messages: MessageTuning::default(),
            elements: ElementIds::default(),
            shots: vec![
                ShotRoute::new("LeftLoopDetector_Enter", "LeftLoopDetector_Trigger", ramp, Some(3)),
                ShotRoute::new("RightLoopDetector_Enter", "RightLoopDetector_Trigger", ramp, Some(2)),
                ShotRoute::new("OrbitDetector_Right", "OrbitDetector_Left", ramp, Some(4)),
                ShotRoute::new("OrbitDetector_Left", "OrbitDetector_Right", ramp, Some(4)),
            ],

            ramp_bonus_duration_nanos: 10_000_000_000,
            multiball_launch_delay_ms: 1000,

            pulse_period_secs: 4.0,
            pulse_amplitude: 0.35,

            planet_base_speed: 0.9,
            planet_speed_jitter: 0.2,
        }
    }
}

impl TableTuning {
    /// Parse tuning from JSON (missing fields take defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: TableTuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.gravity.depth_squared <= 0.0 {
            return Err(TuningError::NonPositive("gravity.depth_squared"));
        }
        if self.gravity.range_squared <= 0.0 {
            return Err(TuningError::NonPositive("gravity.range_squared"));
        }
        if self.ramp_bonus_duration_nanos <= 0 {
            return Err(TuningError::NonPositive("ramp_bonus_duration_nanos"));
        }
        if self.pulse_period_secs <= 0.0 {
            return Err(TuningError::NonPositive("pulse_period_secs"));
        }
        for shot in &self.shots {
            if let Some(planet) = shot.planet.filter(|p| *p >= PALETTE_SIZE) {
                return Err(TuningError::PlanetOutOfRange {
                    sensor: shot.exit_sensor.clone(),
                    planet,
                    max: PALETTE_SIZE,
                });
            }
        }
        Ok(())
    }

    /// Shot route completed by `exit_sensor` after `previous_sensor`, if any
    ///
    /// Several routes may share an exit sensor; the entry sensor picks between them.
    pub fn shot_for(&self, exit_sensor: &str, previous_sensor: Option<&str>) -> Option<&ShotRoute> {
        let previous = previous_sensor?;
        self.shots
            .iter()
            .find(|s| s.exit_sensor == exit_sensor && s.entry_sensor == previous)
    }
}
