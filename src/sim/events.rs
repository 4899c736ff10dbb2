//! Host event handlers
//!
//! Unknown sensors, groups and colors are ignored: the host forwards every table
//! event and only the ones this table cares about do anything.

use super::planet::{self, PlanetStatus};
use super::state::{TableEvent, TableSession};
use crate::color::{BALL_COLORS, BALL_SECONDARY_COLORS, ball_palette_index};
use crate::field::{BallView, Field, ScheduledAction};

impl TableSession {
    /// A ball drained
    pub fn ball_lost(&mut self, field: &mut impl Field) {
        field.set_wall_retracted(self.elements.launch_barrier, false);
    }

    /// A ball entered a sensor's range
    pub fn ball_in_sensor_range(&mut self, field: &mut impl Field, sensor_id: &str, ball: &BallView) {
        let ids = &self.tuning.elements;
        if sensor_id == ids.launch_barrier_extend_sensor {
            field.set_wall_retracted(self.elements.launch_barrier, false);
        } else if sensor_id == ids.launch_barrier_retract_sensor {
            field.set_wall_retracted(self.elements.launch_barrier, true);
        } else if let Some(shot) = self
            .tuning
            .shot_for(sensor_id, ball.previous_sensor_id.as_deref())
            .cloned()
        {
            self.register_shot(field, ball, shot.points, shot.planet);
        }
    }

    /// Every drop target in a group is down
    pub fn all_drop_targets_hit(&mut self, field: &mut impl Field, group_id: &str, ball: &BallView) {
        let ids = &self.tuning.elements;
        if group_id == ids.left_save_targets {
            self.enable_ball_saver(field, true);
        } else if group_id == ids.right_save_targets {
            self.enable_ball_saver(field, false);
        } else if group_id == ids.planet1_targets {
            field.add_score(self.tuning.scoring.planet1_targets);
            self.activate_planet_if_match(field, ball, 0);
        } else {
            log::debug!("Ignoring drop target group {}", group_id);
        }
    }

    /// Every rollover in a group is lit
    pub fn all_rollovers_activated(&mut self, field: &mut impl Field, group_id: &str, ball: &BallView) {
        let ids = &self.tuning.elements;
        if group_id == ids.flipper_rollovers {
            if let Some(group) = self.elements.flipper_rollovers {
                field.set_all_rollovers_activated(group, false);
            }
            field.increment_score_multiplier();
            let multiplier = field.score_multiplier();
            field.show_message(
                &format!("{}x Multiplier", multiplier as i64),
                self.tuning.messages.multiplier_ms,
            );
            self.emit(TableEvent::ScoreMultiplierIncreased { multiplier });
        } else if group_id == ids.planet2_rollovers {
            if let Some(group) = self.elements.planet2_rollovers {
                field.set_all_rollovers_activated(group, false);
            }
            field.add_score(self.tuning.scoring.planet2_rollovers);
            self.activate_planet_if_match(field, ball, 1);
        } else if let Some(index) = (0..self.planets.len()).find(|i| ids.planet(*i) == group_id) {
            // Rolling over a planet hands its color to the ball; status follows next tick
            field.set_ball_colors(ball.id, BALL_COLORS[index], BALL_SECONDARY_COLORS[index]);
            self.emit(TableEvent::PlanetCollected { ball: ball.id, planet: index });
        } else {
            log::debug!("Ignoring rollover group {}", group_id);
        }
    }

    /// A delayed action submitted through `Field::schedule_action` came due
    pub fn run_scheduled(&mut self, field: &mut impl Field, action: ScheduledAction) {
        match action {
            ScheduledAction::LaunchBall => field.launch_ball(),
            ScheduledAction::LaunchFinalMultiballBall => {
                field.launch_ball();
                if self.multiball.go_live() {
                    log::info!("Multiball live");
                    self.emit(TableEvent::MultiballActive);
                }
            }
        }
    }

    /// Score a ramp/loop shot and try its planet
    pub(crate) fn register_shot(
        &mut self,
        field: &mut impl Field,
        ball: &BallView,
        points: i64,
        planet: Option<usize>,
    ) {
        if self.combo.multiplier() > 1 {
            field.show_message(
                &format!("{}x Ramp", self.combo.multiplier()),
                self.tuning.messages.ramp_ms,
            );
        }
        let award = self
            .combo
            .register_shot(points, self.tuning.ramp_bonus_duration_nanos);
        field.add_score(award.points);
        log::debug!("Ramp shot for {} ({}x)", award.points, award.multiplier);
        self.emit(TableEvent::ComboShot {
            points: award.points,
            multiplier: award.multiplier,
        });
        if let Some(index) = planet {
            self.activate_planet_if_match(field, ball, index);
        }
    }

    /// Turn planet `index` ON if `ball` carries its color
    pub fn activate_planet_if_match(&mut self, field: &mut impl Field, ball: &BallView, index: usize) {
        let Some(planet) = self.planets.get(index) else {
            return;
        };
        if planet.status == PlanetStatus::On {
            return;
        }
        if ball_palette_index(ball.primary_color) != Some(index) {
            return;
        }
        self.activate_planet(field, index);
    }

    fn activate_planet(&mut self, field: &mut impl Field, index: usize) {
        self.planets[index].status = PlanetStatus::On;
        field.add_score(self.tuning.scoring.planet_activated);
        self.emit(TableEvent::PlanetActivated { planet: index });
        log::debug!("Planet {} activated", index + 1);

        if !planet::all_on(&self.planets) {
            field.show_message(
                &format!("Planet {} Activated!", index + 1),
                self.tuning.messages.planet_activated_ms,
            );
            return;
        }

        if self.multiball.begin() {
            self.start_multiball(field);
        } else {
            let award = self.multiball.award_jackpot(self.tuning.scoring.multiball_jackpot);
            let message = if award.multiplier > 1 {
                format!("{}x Jackpot!", award.multiplier)
            } else {
                "Jackpot!".to_string()
            };
            field.show_message(&message, self.tuning.messages.jackpot_ms);
            field.add_score(award.points);
            planet::reset_all(&mut self.planets);
            log::info!("Jackpot {} ({}x)", award.points, award.multiplier);
            self.emit(TableEvent::Jackpot {
                points: award.points,
                multiplier: award.multiplier,
            });
        }
    }

    /// Side effects of entering multiball; status is already Starting
    fn start_multiball(&mut self, field: &mut impl Field) {
        field.set_wall_retracted(self.elements.ball_saver_left, false);
        field.set_wall_retracted(self.elements.ball_saver_right, false);
        planet::reset_all(&mut self.planets);
        field.show_message("Multiball!", self.tuning.messages.multiball_ms);
        let delay = self.tuning.multiball_launch_delay_ms;
        field.schedule_action(delay, ScheduledAction::LaunchBall);
        field.schedule_action(delay, ScheduledAction::LaunchFinalMultiballBall);
        log::info!("Multiball starting");
        self.emit(TableEvent::MultiballStarting);
    }

    fn enable_ball_saver(&mut self, field: &mut impl Field, left: bool) {
        let (wall, element, message) = if left {
            (
                self.elements.ball_saver_left,
                self.tuning.elements.ball_saver_left.clone(),
                "Left Save Enabled",
            )
        } else {
            (
                self.elements.ball_saver_right,
                self.tuning.elements.ball_saver_right.clone(),
                "Right Save Enabled",
            )
        };
        field.set_wall_retracted(wall, false);
        field.show_message(message, self.tuning.messages.save_enabled_ms);
        self.emit(TableEvent::BallSaverEnabled { element });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::headless::HeadlessField;
    use crate::sim::multiball::MultiballStatus;
    use crate::tuning::{ShotRoute, TableTuning};
    use glam::Vec2;

    fn setup() -> (HeadlessField, TableSession) {
        let mut field = HeadlessField::standard_table();
        let session = TableSession::start(&mut field, TableTuning::default(), 3).unwrap();
        (field, session)
    }

    fn ball_for(planet: usize) -> BallView {
        let mut b = BallView::new(99, Vec2::ZERO);
        b.primary_color = BALL_COLORS[planet];
        b
    }

    fn activate_all(session: &mut TableSession, field: &mut HeadlessField) {
        for i in 0..session.planets.len() {
            session.activate_planet_if_match(field, &ball_for(i), i);
        }
    }

    #[test]
    fn test_activation_requires_matching_color() {
        let (mut field, mut session) = setup();
        session.activate_planet_if_match(&mut field, &ball_for(1), 0);
        assert_eq!(session.planet_status(0), Some(PlanetStatus::Off));
        assert_eq!(field.score(), 0);

        session.activate_planet_if_match(&mut field, &ball_for(0), 0);
        assert_eq!(session.planet_status(0), Some(PlanetStatus::On));
        assert_eq!(field.score(), 5000);
        assert_eq!(field.last_message(), Some("Planet 1 Activated!"));

        // Already on: no second award
        session.activate_planet_if_match(&mut field, &ball_for(0), 0);
        assert_eq!(field.score(), 5000);
    }

    #[test]
    fn test_out_of_range_planet_ignored() {
        let (mut field, mut session) = setup();
        session.activate_planet_if_match(&mut field, &ball_for(0), 17);
        assert_eq!(field.score(), 0);
    }

    #[test]
    fn test_all_on_starts_multiball() {
        let (mut field, mut session) = setup();
        activate_all(&mut session, &mut field);

        assert_eq!(session.multiball_status(), MultiballStatus::Starting);
        assert_eq!(session.multiball.jackpot_multiplier(), 1);
        assert!(session.planets.iter().all(|p| p.status == PlanetStatus::Off));
        assert_eq!(
            field.pending_actions(),
            vec![ScheduledAction::LaunchBall, ScheduledAction::LaunchFinalMultiballBall]
        );
        assert_eq!(field.last_message(), Some("Multiball!"));
        assert!(!field.wall_retracted(session.elements.ball_saver_left));
        assert!(!field.wall_retracted(session.elements.ball_saver_right));
        assert!(session.take_events().contains(&TableEvent::MultiballStarting));
    }

    #[test]
    fn test_final_launch_goes_live() {
        let (mut field, mut session) = setup();
        activate_all(&mut session, &mut field);

        session.run_scheduled(&mut field, ScheduledAction::LaunchBall);
        assert_eq!(session.multiball_status(), MultiballStatus::Starting);
        session.run_scheduled(&mut field, ScheduledAction::LaunchFinalMultiballBall);
        assert_eq!(session.multiball_status(), MultiballStatus::Active);
        assert_eq!(field.ball_count(), 2);
    }

    #[test]
    fn test_final_launch_first_still_goes_live() {
        let (mut field, mut session) = setup();
        activate_all(&mut session, &mut field);
        session.run_scheduled(&mut field, ScheduledAction::LaunchFinalMultiballBall);
        session.run_scheduled(&mut field, ScheduledAction::LaunchBall);
        assert_eq!(session.multiball_status(), MultiballStatus::Active);
    }

    #[test]
    fn test_jackpot_escalates_while_active() {
        let (mut field, mut session) = setup();
        activate_all(&mut session, &mut field);
        session.run_scheduled(&mut field, ScheduledAction::LaunchBall);
        session.run_scheduled(&mut field, ScheduledAction::LaunchFinalMultiballBall);

        let before = field.score();
        activate_all(&mut session, &mut field);
        assert_eq!(field.score() - before, 5 * 5000 + 100_000);
        assert_eq!(field.last_message(), Some("Jackpot!"));
        assert_eq!(session.multiball.jackpot_multiplier(), 2);
        assert_eq!(session.multiball_status(), MultiballStatus::Active);
        assert!(session.planets.iter().all(|p| p.status == PlanetStatus::Off));

        let before = field.score();
        activate_all(&mut session, &mut field);
        assert_eq!(field.score() - before, 5 * 5000 + 200_000);
        assert_eq!(field.last_message(), Some("2x Jackpot!"));
    }

    #[test]
    fn test_ramp_shot_requires_entry_sensor() {
        let (mut field, mut session) = setup();
        let mut ball = ball_for(3);
        ball.previous_sensor_id = Some("RightLoopDetector_Enter".into());
        session.ball_in_sensor_range(&mut field, "LeftLoopDetector_Trigger", &ball);
        assert_eq!(field.score(), 0);

        ball.previous_sensor_id = Some("LeftLoopDetector_Enter".into());
        session.ball_in_sensor_range(&mut field, "LeftLoopDetector_Trigger", &ball);
        // Ramp plus planet 4 activation
        assert_eq!(field.score(), 2500 + 5000);
        assert_eq!(session.planet_status(3), Some(PlanetStatus::On));
        assert_eq!(session.combo.multiplier(), 2);

        session.ball_in_sensor_range(&mut field, "LeftLoopDetector_Trigger", &ball);
        assert_eq!(field.score(), 2500 + 5000 + 5000);
        assert!(field.messages().iter().any(|(m, _)| m == "2x Ramp"));
    }

    #[test]
    fn test_orbit_shots_share_planet() {
        let (mut field, mut session) = setup();
        let mut ball = ball_for(4);
        ball.previous_sensor_id = Some("OrbitDetector_Left".into());
        session.ball_in_sensor_range(&mut field, "OrbitDetector_Right", &ball);
        assert_eq!(session.planet_status(4), Some(PlanetStatus::On));
    }

    #[test]
    fn test_shared_exit_sensor_picks_route_by_entry() {
        let mut tuning = TableTuning::default();
        tuning.shots = vec![
            ShotRoute::new("EntryA", "Exit", 1000, None),
            ShotRoute::new("EntryB", "Exit", 1000, Some(0)),
        ];
        let mut field = HeadlessField::standard_table();
        let mut session = TableSession::start(&mut field, tuning, 3).unwrap();

        let mut ball = ball_for(0);
        ball.previous_sensor_id = Some("EntryB".into());
        session.ball_in_sensor_range(&mut field, "Exit", &ball);
        assert_eq!(field.score(), 1000 + 5000);
        assert_eq!(session.planet_status(0), Some(PlanetStatus::On));

        ball.previous_sensor_id = Some("EntryA".into());
        session.ball_in_sensor_range(&mut field, "Exit", &ball);
        // Second shot in the window is doubled
        assert_eq!(field.score(), 1000 + 5000 + 2000);

        ball.previous_sensor_id = Some("Elsewhere".into());
        session.ball_in_sensor_range(&mut field, "Exit", &ball);
        assert_eq!(field.score(), 8000);
    }

    #[test]
    fn test_launch_barrier_sensors() {
        let (mut field, mut session) = setup();
        let barrier = session.elements.launch_barrier;
        let ball = BallView::new(1, Vec2::ZERO);
        session.ball_in_sensor_range(&mut field, "LaunchBarrierSensor", &ball);
        assert!(!field.wall_retracted(barrier));
        session.ball_in_sensor_range(&mut field, "LaunchBarrierRetract", &ball);
        assert!(field.wall_retracted(barrier));
        session.ball_lost(&mut field);
        assert!(!field.wall_retracted(barrier));
    }

    #[test]
    fn test_drop_targets() {
        let (mut field, mut session) = setup();
        let saver = session.elements.ball_saver_left;
        field.set_wall_retracted(saver, true);
        let ball = ball_for(0);
        session.all_drop_targets_hit(&mut field, "DropTargetLeftSave", &ball);
        assert!(!field.wall_retracted(saver));
        assert_eq!(field.last_message(), Some("Left Save Enabled"));

        session.all_drop_targets_hit(&mut field, "Planet1Targets", &ball);
        assert_eq!(field.score(), 5000 + 5000);
        assert_eq!(session.planet_status(0), Some(PlanetStatus::On));

        session.all_drop_targets_hit(&mut field, "Nope", &ball);
        assert_eq!(field.score(), 10_000);
    }

    #[test]
    fn test_rollover_groups() {
        let (mut field, mut session) = setup();
        let ball_id = field.add_ball(Vec2::ZERO, Vec2::ZERO);
        let ball = field.ball(ball_id).unwrap();

        session.all_rollovers_activated(&mut field, "FlipperRollovers", &ball);
        assert_eq!(field.score_multiplier(), 2.0);
        assert_eq!(field.last_message(), Some("2x Multiplier"));

        session.all_rollovers_activated(&mut field, "Planet3", &ball);
        let recolored = field.ball(ball_id).unwrap();
        assert_eq!(recolored.primary_color, BALL_COLORS[2]);
        assert_eq!(recolored.secondary_color, BALL_SECONDARY_COLORS[2]);

        // Wrong color for planet 2: group score only
        session.all_rollovers_activated(&mut field, "Planet2Rollovers", &recolored);
        assert_eq!(session.planet_status(1), Some(PlanetStatus::Off));

        session.all_rollovers_activated(&mut field, "Unknown", &recolored);
        assert_eq!(field.ball(ball_id).unwrap().primary_color, BALL_COLORS[2]);
    }

    #[test]
    fn test_white_ball_matches_nothing() {
        let (mut field, mut session) = setup();
        let ball = BallView::new(1, Vec2::ZERO);
        assert_eq!(ball.primary_color, Color::WHITE);
        for i in 0..5 {
            session.activate_planet_if_match(&mut field, &ball, i);
        }
        assert_eq!(field.score(), 0);
    }
}
