//! Randomized cannon launch
//!
//! Launch speed is normally distributed, the barrel angle gets a uniform
//! jitter around its mean. The RNG is always passed in so runs can be
//! replayed from a seed.

use glam::DVec2;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Distribution parameters for a launch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchParams {
    /// Mean launch speed
    pub mean_speed: f64,
    /// Standard deviation of the launch speed
    pub speed_std: f64,
    /// Mean barrel angle (degrees above the horizon)
    pub mean_angle_deg: f64,
    /// Half-range of the uniform angle jitter (degrees)
    pub angle_jitter_deg: f64,
}

/// A sampled launch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    /// Initial ball velocity
    pub velocity: DVec2,
    /// Barrel angle in radians (also used to draw the cannon)
    pub angle: f64,
}

impl Launch {
    /// Launch speed (negative if the normal draw came out negative)
    pub fn speed(&self) -> f64 {
        let dir = DVec2::from_angle(self.angle);
        self.velocity.dot(dir)
    }
}

/// Draw a launch velocity and barrel angle.
///
/// The speed is not clamped: a large spread can produce a negative speed,
/// which simply fires the ball backwards. An unusable spread (negative or
/// not finite) launches at exactly the mean speed.
pub fn sample_launch<R: Rng + ?Sized>(params: &LaunchParams, rng: &mut R) -> Launch {
    let speed = match Normal::new(params.mean_speed, params.speed_std) {
        Ok(normal) => normal.sample(rng),
        Err(e) => {
            log::warn!("Bad launch speed spread {}: {e}", params.speed_std);
            params.mean_speed
        }
    };

    let jitter = if params.angle_jitter_deg > 0.0 {
        rng.random_range(-params.angle_jitter_deg..=params.angle_jitter_deg)
    } else {
        0.0
    };
    let angle = (params.mean_angle_deg + jitter).to_radians();

    Launch {
        velocity: DVec2::new(speed * angle.cos(), speed * angle.sin()),
        angle,
    }
}
