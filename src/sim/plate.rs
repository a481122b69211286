//! The catching plate and its motion controller

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::predictor::{Prediction, TrajectoryPredictor};

/// A vertical plate sliding along a fixed x, trying to block the ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plate {
    /// Height of the plate's center
    pub center_height: f64,
    /// Fixed x of the track
    pub plate_x: f64,
    /// Full width; the plate spans `width / 2` above and below its center
    pub width: f64,
    /// Maximum speed along the track
    pub plate_velocity: f64,
    /// Track limits the plate edges must stay inside
    pub min_height: f64,
    pub max_height: f64,
    /// Height the controller is currently heading for
    pub required_position: f64,
    pub dt: f64,
    /// Ball observations for the current episode
    pub tracker: TrajectoryPredictor,
}

impl Plate {
    pub fn new(
        center_height: f64,
        plate_x: f64,
        width: f64,
        plate_velocity: f64,
        min_height: f64,
        max_height: f64,
        dt: f64,
    ) -> Self {
        Self {
            center_height,
            plate_x,
            width,
            plate_velocity,
            min_height,
            max_height,
            required_position: center_height,
            dt,
            tracker: TrajectoryPredictor::new(),
        }
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Bottom edge, center and top edge (collision probes)
    pub fn contact_points(&self) -> [DVec2; 3] {
        let half = self.half_width();
        [
            DVec2::new(self.plate_x, self.center_height - half),
            DVec2::new(self.plate_x, self.center_height),
            DVec2::new(self.plate_x, self.center_height + half),
        ]
    }

    /// Drop the previous episode's observations. Height and target persist.
    pub fn reset_tracking(&mut self) {
        self.tracker.clear();
    }

    /// Feed a ball position to the predictor
    pub fn observe(&mut self, pos: DVec2) -> bool {
        self.tracker.observe(pos)
    }

    /// Re-run the prediction and make it the new target
    pub fn update_target(&mut self) -> Prediction {
        let prediction = self.tracker.predict(self.plate_x, self.center_height);
        self.required_position = prediction.height;
        prediction
    }

    /// Move one tick toward `required_position`.
    ///
    /// The step is `min(plate_velocity * dt, distance to target)`, so the
    /// plate never overshoots. A step that would push an edge past the track
    /// limits is skipped entirely. Returns the signed displacement applied.
    pub fn move_to_target(&mut self) -> f64 {
        let distance = self.required_position - self.center_height;
        let change = (self.plate_velocity * self.dt).min(distance.abs());
        let half = self.half_width();

        if distance > 0.0 && self.center_height + change + half <= self.max_height {
            self.center_height += change;
            change
        } else if distance < 0.0 && self.center_height - change - half >= self.min_height {
            self.center_height -= change;
            -change
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plate_at(height: f64) -> Plate {
        Plate::new(height, 1490.0, 40.0, 125.0, 0.0, 800.0, 0.3)
    }

    #[test]
    fn test_contact_points() {
        let plate = plate_at(400.0);
        assert_eq!(
            plate.contact_points(),
            [
                DVec2::new(1490.0, 380.0),
                DVec2::new(1490.0, 400.0),
                DVec2::new(1490.0, 420.0)
            ]
        );
    }

    #[test]
    fn test_moves_at_max_speed() {
        let mut plate = plate_at(400.0);
        plate.required_position = 600.0;
        assert!((plate.move_to_target() - 37.5).abs() < 1e-9);
        assert!((plate.center_height - 437.5).abs() < 1e-9);

        plate.required_position = 300.0;
        assert!((plate.move_to_target() + 37.5).abs() < 1e-9);
        assert!((plate.center_height - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_overshoot() {
        let mut plate = plate_at(400.0);
        plate.required_position = 410.0;
        plate.move_to_target();
        assert_eq!(plate.center_height, 410.0);
        assert_eq!(plate.move_to_target(), 0.0);
    }

    #[test]
    fn test_stalls_at_top_bound() {
        let mut plate = plate_at(700.0);
        plate.required_position = 2000.0;
        for _ in 0..50 {
            plate.move_to_target();
            assert!(plate.center_height + plate.half_width() <= plate.max_height);
        }
        // 700 + 37.5 * 2 = 775; one more full step would reach 812.5 + 20
        assert!((plate.center_height - 775.0).abs() < 1e-9);
    }

    #[test]
    fn test_stalls_at_bottom_bound() {
        let mut plate = plate_at(100.0);
        plate.required_position = -500.0;
        for _ in 0..50 {
            plate.move_to_target();
        }
        assert!(plate.center_height - plate.half_width() >= plate.min_height);
        assert!((plate.center_height - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_drift_without_observations() {
        let mut plate = plate_at(333.0);
        for _ in 0..10 {
            plate.update_target();
            plate.move_to_target();
        }
        assert_eq!(plate.center_height, 333.0);
        assert_eq!(plate.required_position, 333.0);
    }

    #[test]
    fn test_reset_keeps_position() {
        let mut plate = plate_at(400.0);
        plate.observe(DVec2::new(600.0, 500.0));
        plate.update_target();
        plate.move_to_target();
        let height = plate.center_height;

        plate.reset_tracking();
        assert!(plate.tracker.is_empty());
        assert_eq!(plate.center_height, height);
        // Without observations the target snaps to where the plate is
        plate.update_target();
        assert_eq!(plate.required_position, height);
    }

    proptest! {
        #[test]
        fn prop_edges_stay_in_track(
            start in 20.0f64..780.0,
            targets in prop::collection::vec(-1000.0f64..2000.0, 1..60),
            speed in 0.0f64..500.0,
        ) {
            let mut plate = Plate::new(start, 1490.0, 40.0, speed, 0.0, 800.0, 0.3);
            for target in targets {
                plate.required_position = target;
                let before = plate.center_height;
                plate.move_to_target();
                prop_assert!(plate.center_height - 20.0 >= 0.0);
                prop_assert!(plate.center_height + 20.0 <= 800.0);
                // Never past the target
                prop_assert!((plate.center_height - before).abs() <= (target - before).abs() + 1e-9);
            }
        }
    }
}
