//! Deterministic simulation module
//!
//! All physics and control logic lives here. This module must be pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod launch;
pub mod plate;
pub mod predictor;
pub mod state;
pub mod tick;

pub use ball::{Ball, integrate};
pub use collision::{ball_plate_collision, deflect_off_plate, swept_hit};
pub use launch::{Launch, LaunchParams, sample_launch};
pub use plate::Plate;
pub use predictor::{FitKind, Prediction, TrajectoryPredictor};
pub use state::{EpisodePhase, ExitReason, RunState, SimState, exit_reason};
pub use tick::{BallObserver, TickEvent, TickReport, ZoneObserver, tick};
