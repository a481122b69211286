//! Cannon Catch - a cannon-vs-plate interception toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, launch sampling, collisions,
//!   trajectory prediction, plate control, episode state machine)
//! - `renderer`: Scene geometry sink and a software raster frame
//! - `sensor`: Vision-style ball detection over rendered frames
//! - `platform`: Frame pacing and stop signal
//! - `config`: Startup configuration

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod sensor;
pub mod sim;

pub use config::{ObservationSource, SimConfig};
pub use error::ConfigError;
pub use runner::{RunSummary, Runner};

/// Scene configuration defaults (the original experiment setup)
pub mod consts {
    /// Plane size in scene units (width, height)
    pub const PLANE_WIDTH: f64 = 1500.0;
    pub const PLANE_HEIGHT: f64 = 800.0;

    /// Ball radius
    pub const BALL_RADIUS: f64 = 20.0;
    /// Plate speed (units per time unit)
    pub const PLATE_VELOCITY: f64 = 125.0;
    /// Plate sits this far in from the right wall
    pub const PLATE_WALL_OFFSET: f64 = 10.0;

    /// Simulation time step
    pub const DT: f64 = 0.3;
    /// Gravity near the Earth's surface
    pub const GRAVITY: [f64; 2] = [0.0, -9.81];

    /// Cannon pivot
    pub const CANNON_COORD: [f64; 2] = [50.0, 128.0];

    /// Launch sampler defaults
    pub const MEAN_BALL_VELOCITY: f64 = 150.0;
    pub const VELOCITY_SPREAD: f64 = 15.0;
    pub const LAUNCH_ANGLE_DEG: f64 = 35.0;
    pub const ANGLE_SPREAD_DEG: f64 = 15.0;

    /// Side tolerance before a ball counts as out of the scene
    pub const SIDE_EXIT_MARGIN: f64 = 100.0;
    /// Ball y below this counts as hitting the floor
    pub const FLOOR_Y: f64 = 1.0;

    /// Pacing defaults (milliseconds)
    pub const TICK_WAIT_MS: u64 = 10;
    pub const EPISODE_PAUSE_MS: u64 = 1000;

    /// On-screen hint
    pub const HINT: &str = "Ctrl+C to exit";
}
