//! Ball-vs-plate collision detection
//!
//! Discrete stepping lets a fast ball jump clean over a thin plate between
//! ticks. The test inflates the ball radius by half the distance it covers
//! in one tick so those frames still register a hit.

use glam::DVec2;

use super::ball::Ball;
use super::plate::Plate;

/// Swept-sphere proximity test against a single point
///
/// Hit when `|pos - point| <= radius + |vel| * dt / 2`.
#[inline]
pub fn swept_hit(pos: DVec2, vel: DVec2, radius: f64, point: DVec2, dt: f64) -> bool {
    pos.distance(point) <= radius + vel.length() * dt / 2.0
}

/// Check the ball against the plate's bottom edge, center and top edge
pub fn ball_plate_collision(ball: &Ball, plate: &Plate) -> bool {
    plate
        .contact_points()
        .iter()
        .any(|&point| swept_hit(ball.pos, ball.vel, ball.radius, point, ball.dt))
}

/// Bounce the ball off the plate if they touch.
///
/// Returns whether a deflection happened. The horizontal velocity is flipped
/// at most once per call, however many contact points are hit.
pub fn deflect_off_plate(ball: &mut Ball, plate: &Plate) -> bool {
    if ball_plate_collision(ball, plate) {
        ball.deflect_horizontal();
        log::debug!(
            "Ball deflected at ({:.1}, {:.1}) by plate at height {:.1}",
            ball.pos.x,
            ball.pos.y,
            plate.center_height
        );
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plate() -> Plate {
        Plate::new(400.0, 1490.0, 40.0, 125.0, 0.0, 800.0, 0.3)
    }

    #[test]
    fn test_static_contact() {
        // Touching exactly at radius
        assert!(swept_hit(DVec2::ZERO, DVec2::ZERO, 5.0, DVec2::new(5.0, 0.0), 0.3));
        assert!(!swept_hit(DVec2::ZERO, DVec2::ZERO, 5.0, DVec2::new(5.01, 0.0), 0.3));
    }

    #[test]
    fn test_speed_inflates_radius() {
        let point = DVec2::new(30.0, 0.0);
        // Too far for a resting ball
        assert!(!swept_hit(DVec2::ZERO, DVec2::ZERO, 20.0, point, 0.3));
        // 100 * 0.3 / 2 = 15 extra reach
        assert!(swept_hit(DVec2::ZERO, DVec2::new(0.0, 100.0), 20.0, point, 0.3));
    }

    #[test]
    fn test_ball_hits_plate_edge() {
        let plate = plate();
        // Just below the bottom edge at (1490, 380)
        let ball = Ball::new(DVec2::new(1490.0, 350.0), DVec2::ZERO, 20.0, 0.3);
        assert!(!ball_plate_collision(&ball, &plate));

        let ball = Ball::new(DVec2::new(1490.0, 361.0), DVec2::ZERO, 20.0, 0.3);
        assert!(ball_plate_collision(&ball, &plate));
    }

    #[test]
    fn test_deflect_flips_once() {
        let plate = plate();
        // Overlaps all three contact points
        let mut ball = Ball::new(DVec2::new(1480.0, 400.0), DVec2::new(150.0, -10.0), 20.0, 0.3);
        assert!(deflect_off_plate(&mut ball, &plate));
        assert_eq!(ball.vel, DVec2::new(-150.0, -10.0));
    }

    #[test]
    fn test_miss_leaves_velocity() {
        let plate = plate();
        let mut ball = Ball::new(DVec2::new(700.0, 400.0), DVec2::new(150.0, -10.0), 20.0, 0.3);
        assert!(!deflect_off_plate(&mut ball, &plate));
        assert_eq!(ball.vel, DVec2::new(150.0, -10.0));
    }

    proptest! {
        #[test]
        fn prop_symmetric_in_points(
            ax in -500.0f64..500.0, ay in -500.0f64..500.0,
            bx in -500.0f64..500.0, by in -500.0f64..500.0,
            speed in 0.0f64..300.0,
            radius in 0.1f64..50.0,
        ) {
            let a = DVec2::new(ax, ay);
            let b = DVec2::new(bx, by);
            let vel = DVec2::new(speed, 0.0);
            prop_assert_eq!(swept_hit(a, vel, radius, b, 0.3), swept_hit(b, vel, radius, a, 0.3));
        }

        #[test]
        fn prop_monotonic_in_radius(
            px in -200.0f64..200.0, py in -200.0f64..200.0,
            vx in -300.0f64..300.0, vy in -300.0f64..300.0,
            radius in 0.1f64..50.0,
            grow in 0.0f64..50.0,
            dt in 0.0f64..1.0,
        ) {
            let vel = DVec2::new(vx, vy);
            let point = DVec2::new(px, py);
            if swept_hit(DVec2::ZERO, vel, radius, point, dt) {
                prop_assert!(swept_hit(DVec2::ZERO, vel, radius + grow, point, dt));
            }
        }
    }
}
