//! Host field interface
//!
//! The physics engine owns balls and table geometry. The simulation only reads
//! the properties below and issues commands back through [`Field`]. Element lookups
//! happen once at table start and yield typed handles; every later access goes
//! through the handle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Engine-assigned ball identity
pub type BallId = u32;

/// Handle to a wall/barrier element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallHandle(pub u32);

/// Handle to a rollover group element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RolloverGroupHandle(pub u32);

/// Handle to a sensor element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorHandle(pub u32);

/// Handle to a drop-target group element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropTargetGroupHandle(pub u32);

/// A resolved table element, tagged by capability set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementHandle {
    Wall(WallHandle),
    RolloverGroup(RolloverGroupHandle),
    Sensor(SensorHandle),
    DropTargetGroup(DropTargetGroupHandle),
}

impl ElementHandle {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ElementHandle::Wall(_) => "wall",
            ElementHandle::RolloverGroup(_) => "rollover group",
            ElementHandle::Sensor(_) => "sensor",
            ElementHandle::DropTargetGroup(_) => "drop target group",
        }
    }

    pub fn as_wall(&self) -> Option<WallHandle> {
        match self {
            ElementHandle::Wall(h) => Some(*h),
            _ => None,
        }
    }

    pub fn as_rollover_group(&self) -> Option<RolloverGroupHandle> {
        match self {
            ElementHandle::RolloverGroup(h) => Some(*h),
            _ => None,
        }
    }
}

/// Snapshot of a ball in play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub id: BallId,
    pub pos: Vec2,
    pub primary_color: Color,
    pub secondary_color: Color,
    /// Last sensor this ball triggered
    pub previous_sensor_id: Option<String>,
}

impl BallView {
    pub fn new(id: BallId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            primary_color: Color::WHITE,
            secondary_color: Color::WHITE,
            previous_sensor_id: None,
        }
    }
}

/// One-shot action handed to the host scheduler and delivered back via
/// `TableSession::run_scheduled` once its delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledAction {
    /// Launch one multiball ball
    LaunchBall,
    /// Launch the last multiball ball; multiball goes live when this fires
    LaunchFinalMultiballBall,
}

/// Everything the simulation needs from the host engine
pub trait Field {
    /// Look up a table element by id
    fn element(&self, id: &str) -> Option<ElementHandle>;

    // === Walls ===
    fn wall_retracted(&self, wall: WallHandle) -> bool;
    fn set_wall_retracted(&mut self, wall: WallHandle, retracted: bool);

    // === Rollover groups ===
    fn rollover_count(&self, group: RolloverGroupHandle) -> usize;
    fn rollover_center(&self, group: RolloverGroupHandle, index: usize) -> Vec2;
    fn set_rollover_center(&mut self, group: RolloverGroupHandle, index: usize, center: Vec2);
    fn rollover_radius(&self, group: RolloverGroupHandle, index: usize) -> f32;
    fn set_rollover_radius(&mut self, group: RolloverGroupHandle, index: usize, radius: f32);
    fn set_all_rollovers_activated(&mut self, group: RolloverGroupHandle, activated: bool);
    fn set_rollover_activated(&mut self, group: RolloverGroupHandle, index: usize, activated: bool);
    fn set_rollover_color(&mut self, group: RolloverGroupHandle, index: usize, color: Color);

    // === Balls ===
    /// Balls currently in play
    fn balls(&self) -> Vec<BallView>;
    fn ball_count(&self) -> usize {
        self.balls().len()
    }
    fn set_ball_colors(&mut self, ball: BallId, primary: Color, secondary: Color);
    fn apply_impulse(&mut self, ball: BallId, impulse: Vec2);
    fn launch_ball(&mut self);

    // === Scoring and display ===
    fn add_score(&mut self, points: i64);
    fn show_message(&mut self, text: &str, duration_ms: u32);
    fn score_multiplier(&self) -> f64;
    fn increment_score_multiplier(&mut self);

    // === Scheduling ===
    fn schedule_action(&mut self, delay_ms: u32, action: ScheduledAction);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_accessors() {
        let wall = ElementHandle::Wall(WallHandle(3));
        assert_eq!(wall.as_wall(), Some(WallHandle(3)));
        assert_eq!(wall.as_rollover_group(), None);
        assert_eq!(wall.kind_name(), "wall");

        let group = ElementHandle::RolloverGroup(RolloverGroupHandle(1));
        assert_eq!(group.as_rollover_group(), Some(RolloverGroupHandle(1)));
        assert_eq!(group.as_wall(), None);
    }
}
