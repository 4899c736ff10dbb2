//! Headless field
//!
//! A minimal in-memory [`Field`]: named elements, point-mass balls moved with
//! Euler steps, a score counter and a timer queue. Enough to run a session
//! without a physics engine, for the demo runner and for tests.

use std::collections::HashMap;

use glam::Vec2;

use crate::color::Color;
use crate::field::{
    BallId, BallView, DropTargetGroupHandle, ElementHandle, Field, RolloverGroupHandle,
    ScheduledAction, SensorHandle, WallHandle,
};
use crate::nanos_to_secs;

#[derive(Debug, Clone)]
struct Rollover {
    center: Vec2,
    radius: f32,
    activated: bool,
    color: Color,
}

#[derive(Debug, Clone)]
struct HeadlessBall {
    view: BallView,
    vel: Vec2,
}

#[derive(Debug, Clone)]
struct PendingAction {
    due_nanos: u64,
    action: ScheduledAction,
}

/// In-memory table and ball set
#[derive(Debug, Clone)]
pub struct HeadlessField {
    elements: HashMap<String, ElementHandle>,
    walls: Vec<bool>,
    rollover_groups: Vec<Vec<Rollover>>,
    next_sensor: u32,
    next_drop_target_group: u32,
    balls: Vec<HeadlessBall>,
    next_ball_id: BallId,
    score: i64,
    score_multiplier: f64,
    messages: Vec<(String, u32)>,
    pending: Vec<PendingAction>,
    now_nanos: u64,
    /// Where launched balls appear and how fast they leave
    pub launch_pos: Vec2,
    pub launch_vel: Vec2,
}

impl Default for HeadlessField {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessField {
    /// Empty table
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            walls: Vec::new(),
            rollover_groups: Vec::new(),
            next_sensor: 0,
            next_drop_target_group: 0,
            balls: Vec::new(),
            next_ball_id: 1,
            score: 0,
            score_multiplier: 1.0,
            messages: Vec::new(),
            pending: Vec::new(),
            now_nanos: 0,
            launch_pos: Vec2::new(19.5, 2.0),
            launch_vel: Vec2::new(0.0, 15.0),
        }
    }

    /// The stock orbit table with five planets
    pub fn standard_table() -> Self {
        Self::table_with_planets(5)
    }

    /// The stock layout with `planets` orbits around the sun
    pub fn table_with_planets(planets: usize) -> Self {
        let sun = Vec2::new(10.0, 15.0);
        let mut field = Self::new();

        field.add_wall("LaunchBarrier");
        field.add_wall("BallSaver-left");
        field.add_wall("BallSaver-right");

        field.add_rollover_group("Sun", &[(sun, 1.0)]);
        let orbits: Vec<(Vec2, f32)> = (0..planets)
            .map(|i| (sun, 2.0 + 1.2 * i as f32))
            .collect();
        field.add_rollover_group("Orbits", &orbits);
        for i in 0..planets {
            let start = sun + Vec2::new(2.0 + 1.2 * i as f32, 0.0);
            field.add_rollover_group(&format!("Planet{}", i + 1), &[(start, 0.4 + 0.1 * i as f32)]);
        }

        let lane = |x: f32| (Vec2::new(x, 1.0), 0.3_f32);
        field.add_rollover_group("FlipperRollovers", &[lane(4.0), lane(6.0), lane(14.0), lane(16.0)]);
        field.add_rollover_group("Planet2Rollovers", &[lane(8.0), lane(10.0), lane(12.0)]);

        for sensor in [
            "LaunchBarrierSensor",
            "LaunchBarrierRetract",
            "LeftLoopDetector_Enter",
            "LeftLoopDetector_Trigger",
            "RightLoopDetector_Enter",
            "RightLoopDetector_Trigger",
            "OrbitDetector_Left",
            "OrbitDetector_Right",
        ] {
            field.add_sensor(sensor);
        }
        for group in ["DropTargetLeftSave", "DropTargetRightSave", "Planet1Targets"] {
            field.add_drop_target_group(group);
        }
        field
    }

    // === Table building ===

    pub fn add_wall(&mut self, id: &str) -> WallHandle {
        let handle = WallHandle(self.walls.len() as u32);
        self.walls.push(false);
        self.elements.insert(id.to_string(), ElementHandle::Wall(handle));
        handle
    }

    pub fn add_rollover_group(&mut self, id: &str, rollovers: &[(Vec2, f32)]) -> RolloverGroupHandle {
        let handle = RolloverGroupHandle(self.rollover_groups.len() as u32);
        self.rollover_groups.push(
            rollovers
                .iter()
                .map(|&(center, radius)| Rollover {
                    center,
                    radius,
                    activated: false,
                    color: Color::WHITE,
                })
                .collect(),
        );
        self.elements
            .insert(id.to_string(), ElementHandle::RolloverGroup(handle));
        handle
    }

    pub fn add_sensor(&mut self, id: &str) -> SensorHandle {
        let handle = SensorHandle(self.next_sensor);
        self.next_sensor += 1;
        self.elements.insert(id.to_string(), ElementHandle::Sensor(handle));
        handle
    }

    pub fn add_drop_target_group(&mut self, id: &str) -> DropTargetGroupHandle {
        let handle = DropTargetGroupHandle(self.next_drop_target_group);
        self.next_drop_target_group += 1;
        self.elements
            .insert(id.to_string(), ElementHandle::DropTargetGroup(handle));
        handle
    }

    // === Balls ===

    pub fn add_ball(&mut self, pos: Vec2, vel: Vec2) -> BallId {
        let id = self.next_ball_id;
        self.next_ball_id += 1;
        self.balls.push(HeadlessBall {
            view: BallView::new(id, pos),
            vel,
        });
        id
    }

    pub fn remove_ball(&mut self, id: BallId) -> bool {
        let before = self.balls.len();
        self.balls.retain(|b| b.view.id != id);
        self.balls.len() != before
    }

    pub fn ball(&self, id: BallId) -> Option<BallView> {
        self.find_ball(id).map(|b| b.view.clone())
    }

    pub fn ball_velocity(&self, id: BallId) -> Option<Vec2> {
        self.find_ball(id).map(|b| b.vel)
    }

    /// Record that `id` just passed `sensor_id`
    pub fn set_previous_sensor(&mut self, id: BallId, sensor_id: &str) {
        if let Some(ball) = self.find_ball_mut(id) {
            ball.view.previous_sensor_id = Some(sensor_id.to_string());
        }
    }

    fn find_ball(&self, id: BallId) -> Option<&HeadlessBall> {
        self.balls.iter().find(|b| b.view.id == id)
    }

    fn find_ball_mut(&mut self, id: BallId) -> Option<&mut HeadlessBall> {
        self.balls.iter_mut().find(|b| b.view.id == id)
    }

    // === Inspection ===

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn messages(&self) -> &[(String, u32)] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(|(m, _)| m.as_str())
    }

    /// Actions still waiting on their delay, in submission order
    pub fn pending_actions(&self) -> Vec<ScheduledAction> {
        self.pending.iter().map(|p| p.action).collect()
    }

    pub fn rollover_activated(&self, group: RolloverGroupHandle, index: usize) -> bool {
        self.rollover(group, index).is_some_and(|r| r.activated)
    }

    pub fn rollover_color(&self, group: RolloverGroupHandle, index: usize) -> Color {
        self.rollover(group, index)
            .map(|r| r.color)
            .unwrap_or(Color::WHITE)
    }

    pub fn now_nanos(&self) -> u64 {
        self.now_nanos
    }

    /// Move balls and the clock forward; returns actions that came due
    pub fn advance(&mut self, nanos: u64) -> Vec<ScheduledAction> {
        self.now_nanos = self.now_nanos.saturating_add(nanos);
        let dt = nanos_to_secs(nanos);
        for ball in &mut self.balls {
            ball.view.pos += ball.vel * dt;
        }

        let now = self.now_nanos;
        let (due, waiting): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|p| p.due_nanos <= now);
        self.pending = waiting;
        due.into_iter().map(|p| p.action).collect()
    }

    fn rollover(&self, group: RolloverGroupHandle, index: usize) -> Option<&Rollover> {
        self.rollover_groups.get(group.0 as usize)?.get(index)
    }

    fn rollover_mut(&mut self, group: RolloverGroupHandle, index: usize) -> Option<&mut Rollover> {
        self.rollover_groups.get_mut(group.0 as usize)?.get_mut(index)
    }
}

impl Field for HeadlessField {
    fn element(&self, id: &str) -> Option<ElementHandle> {
        self.elements.get(id).copied()
    }

    fn wall_retracted(&self, wall: WallHandle) -> bool {
        self.walls.get(wall.0 as usize).copied().unwrap_or(false)
    }

    fn set_wall_retracted(&mut self, wall: WallHandle, retracted: bool) {
        if let Some(w) = self.walls.get_mut(wall.0 as usize) {
            *w = retracted;
        }
    }

    fn rollover_count(&self, group: RolloverGroupHandle) -> usize {
        self.rollover_groups
            .get(group.0 as usize)
            .map_or(0, |g| g.len())
    }

    fn rollover_center(&self, group: RolloverGroupHandle, index: usize) -> Vec2 {
        self.rollover(group, index).map_or(Vec2::ZERO, |r| r.center)
    }

    fn set_rollover_center(&mut self, group: RolloverGroupHandle, index: usize, center: Vec2) {
        if let Some(r) = self.rollover_mut(group, index) {
            r.center = center;
        }
    }

    fn rollover_radius(&self, group: RolloverGroupHandle, index: usize) -> f32 {
        self.rollover(group, index).map_or(0.0, |r| r.radius)
    }

    fn set_rollover_radius(&mut self, group: RolloverGroupHandle, index: usize, radius: f32) {
        if let Some(r) = self.rollover_mut(group, index) {
            r.radius = radius;
        }
    }

    fn set_all_rollovers_activated(&mut self, group: RolloverGroupHandle, activated: bool) {
        if let Some(g) = self.rollover_groups.get_mut(group.0 as usize) {
            for r in g {
                r.activated = activated;
            }
        }
    }

    fn set_rollover_activated(&mut self, group: RolloverGroupHandle, index: usize, activated: bool) {
        if let Some(r) = self.rollover_mut(group, index) {
            r.activated = activated;
        }
    }

    fn set_rollover_color(&mut self, group: RolloverGroupHandle, index: usize, color: Color) {
        if let Some(r) = self.rollover_mut(group, index) {
            r.color = color;
        }
    }

    fn balls(&self) -> Vec<BallView> {
        self.balls.iter().map(|b| b.view.clone()).collect()
    }

    fn ball_count(&self) -> usize {
        self.balls.len()
    }

    fn set_ball_colors(&mut self, ball: BallId, primary: Color, secondary: Color) {
        if let Some(b) = self.find_ball_mut(ball) {
            b.view.primary_color = primary;
            b.view.secondary_color = secondary;
        }
    }

    fn apply_impulse(&mut self, ball: BallId, impulse: Vec2) {
        // Unit mass
        if let Some(b) = self.find_ball_mut(ball) {
            b.vel += impulse;
        }
    }

    fn launch_ball(&mut self) {
        let (pos, vel) = (self.launch_pos, self.launch_vel);
        self.add_ball(pos, vel);
    }

    fn add_score(&mut self, points: i64) {
        self.score += (points as f64 * self.score_multiplier) as i64;
    }

    fn show_message(&mut self, text: &str, duration_ms: u32) {
        log::debug!("Message: {} ({} ms)", text, duration_ms);
        self.messages.push((text.to_string(), duration_ms));
    }

    fn score_multiplier(&self) -> f64 {
        self.score_multiplier
    }

    fn increment_score_multiplier(&mut self) {
        self.score_multiplier += 1.0;
    }

    fn schedule_action(&mut self, delay_ms: u32, action: ScheduledAction) {
        self.pending.push(PendingAction {
            due_nanos: self.now_nanos + delay_ms as u64 * 1_000_000,
            action,
        });
    }
}
