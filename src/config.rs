//! Startup configuration
//!
//! Scene constants are fixed at process start. Loaded from an optional JSON
//! file; missing fields fall back to the original experiment values.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::LaunchParams;

/// Where the trajectory predictor gets its observations from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObservationSource {
    /// True ball position, whenever the ball is inside the trackable zone
    #[default]
    Direct,
    /// Blob detection over a rendered view of the trackable zone
    Vision,
}

impl ObservationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationSource::Direct => "direct",
            ObservationSource::Vision => "vision",
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Scene ===
    /// Plane size (width, height)
    pub plane_size: DVec2,
    /// Ball radius (plate width is twice this)
    pub radius: f64,
    /// Maximum plate speed
    pub plate_velocity: f64,
    /// Fixed tick duration
    pub dt: f64,
    /// Constant acceleration applied to the ball
    pub gravity_vector: DVec2,

    // === Cannon ===
    pub cannon_coord: DVec2,
    pub cannon_length: f64,
    pub cannon_width: f64,

    // === Launch sampler ===
    /// Mean of the launch speed distribution
    pub mean_ball_velocity: f64,
    /// Standard deviation of the launch speed
    pub velocity_spread: f64,
    /// Mean launch angle (degrees)
    pub launch_angle: f64,
    /// Half-range of the uniform angle jitter (degrees)
    pub angle_spread: f64,

    // === Runner ===
    /// RNG seed for reproducible runs
    pub seed: u64,
    /// Wait between ticks
    pub tick_wait_ms: u64,
    /// Wait between episodes
    pub episode_pause_ms: u64,
    /// Stop after this many episodes (None = run until stopped)
    pub max_episodes: Option<u32>,
    pub observation_source: ObservationSource,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            plane_size: DVec2::new(PLANE_WIDTH, PLANE_HEIGHT),
            radius: BALL_RADIUS,
            plate_velocity: PLATE_VELOCITY,
            dt: DT,
            gravity_vector: DVec2::from_array(GRAVITY),

            cannon_coord: DVec2::from_array(CANNON_COORD),
            cannon_length: BALL_RADIUS * 2.0,
            cannon_width: BALL_RADIUS,

            mean_ball_velocity: MEAN_BALL_VELOCITY,
            velocity_spread: VELOCITY_SPREAD,
            launch_angle: LAUNCH_ANGLE_DEG,
            angle_spread: ANGLE_SPREAD_DEG,

            seed: 0,
            tick_wait_ms: TICK_WAIT_MS,
            episode_pause_ms: EPISODE_PAUSE_MS,
            max_episodes: None,
            observation_source: ObservationSource::Direct,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.plane_size.is_finite() || self.plane_size.min_element() <= 0.0 {
            return Err(ConfigError::invalid(
                "plane_size",
                format!("both sides must be positive, got {}", self.plane_size),
            ));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::invalid(
                "radius",
                format!("must be positive, got {}", self.radius),
            ));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::invalid(
                "dt",
                format!("must be positive, got {}", self.dt),
            ));
        }
        if !(self.plate_velocity.is_finite() && self.plate_velocity >= 0.0) {
            return Err(ConfigError::invalid(
                "plate_velocity",
                format!("must be non-negative, got {}", self.plate_velocity),
            ));
        }
        if !self.gravity_vector.is_finite() {
            return Err(ConfigError::invalid("gravity_vector", "must be finite"));
        }
        if !(self.velocity_spread.is_finite() && self.velocity_spread >= 0.0) {
            return Err(ConfigError::invalid(
                "velocity_spread",
                format!("must be non-negative, got {}", self.velocity_spread),
            ));
        }
        if !(self.angle_spread.is_finite() && self.angle_spread >= 0.0) {
            return Err(ConfigError::invalid(
                "angle_spread",
                format!("must be non-negative, got {}", self.angle_spread),
            ));
        }
        if self.plate_width() > self.plane_size.y {
            return Err(ConfigError::invalid(
                "radius",
                format!(
                    "plate width {} does not fit a plane of height {}",
                    self.plate_width(),
                    self.plane_size.y
                ),
            ));
        }
        Ok(())
    }

    /// Fixed x of the plate's track
    pub fn plate_x(&self) -> f64 {
        self.plane_size.x - PLATE_WALL_OFFSET
    }

    /// Full plate width (twice the ball radius)
    pub fn plate_width(&self) -> f64 {
        2.0 * self.radius
    }

    /// Plate starts centered vertically
    pub fn plate_start_height(&self) -> f64 {
        self.plane_size.y / 2.0
    }

    /// Horizontal band where the plate can see the ball (middle third)
    pub fn tracking_zone(&self) -> (f64, f64) {
        (self.plane_size.x / 3.0, 2.0 * self.plane_size.x / 3.0)
    }

    pub fn launch_params(&self) -> LaunchParams {
        LaunchParams {
            mean_speed: self.mean_ball_velocity,
            speed_std: self.velocity_spread,
            mean_angle_deg: self.launch_angle,
            angle_jitter_deg: self.angle_spread,
        }
    }
}
