//! Simulation state and episode state machine
//!
//! Two nested state machines replace the original "new ball / tick" loops:
//! - episode phase: `AwaitingLaunch` -> `InFlight` -> `AwaitingLaunch`
//! - process: `Running` -> `Stopped` (terminal)

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::launch::{Launch, sample_launch};
use super::plate::Plate;
use crate::config::SimConfig;
use crate::consts::{FLOOR_Y, SIDE_EXIT_MARGIN};

/// Where the current episode is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodePhase {
    /// No ball in the scene; the next tick fires the cannon
    AwaitingLaunch,
    /// Ball is flying
    InFlight,
}

/// Process-level run flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    /// Stop was requested; ticks are ignored from here on
    Stopped,
}

/// Why a ball left the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    Floor,
    Ceiling,
    Left,
    Right,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::Floor => "floor",
            ExitReason::Ceiling => "ceiling",
            ExitReason::Left => "left side",
            ExitReason::Right => "right side",
        }
    }
}

/// Check whether a ball at `pos` has left a plane of `plane_size`.
///
/// Floor is `y < 1`, ceiling is `y >= height`, sides allow a 100 unit
/// margin beyond the walls.
pub fn exit_reason(pos: DVec2, plane_size: DVec2) -> Option<ExitReason> {
    if pos.x > plane_size.x + SIDE_EXIT_MARGIN {
        Some(ExitReason::Right)
    } else if pos.x < -SIDE_EXIT_MARGIN {
        Some(ExitReason::Left)
    } else if pos.y < FLOOR_Y {
        Some(ExitReason::Floor)
    } else if pos.y >= plane_size.y {
        Some(ExitReason::Ceiling)
    } else {
        None
    }
}

/// Complete simulation state (single owner, single thread)
#[derive(Debug, Clone)]
pub struct SimState {
    pub config: SimConfig,
    /// Launch RNG, seeded from `config.seed`
    pub rng: Pcg32,
    pub phase: EpisodePhase,
    pub run_state: RunState,
    pub plate: Plate,
    /// Present only while `InFlight`
    pub ball: Option<Ball>,
    /// Barrel angle of the last launch (radians)
    pub cannon_angle: f64,
    /// Episodes launched so far
    pub episode: u32,
    /// Ticks within the current episode
    pub episode_ticks: u64,
    /// Ticks since start
    pub time_ticks: u64,
    /// Plate deflections in the current episode
    pub episode_deflections: u32,
    /// Plate deflections since start
    pub total_deflections: u32,
}

impl SimState {
    /// Fresh state with the plate centered and no ball
    pub fn new(config: SimConfig) -> Self {
        let rng = Pcg32::seed_from_u64(config.seed);
        let plate = Plate::new(
            config.plate_start_height(),
            config.plate_x(),
            config.plate_width(),
            config.plate_velocity,
            0.0,
            config.plane_size.y,
            config.dt,
        );
        let cannon_angle = config.launch_angle.to_radians();
        Self {
            config,
            rng,
            phase: EpisodePhase::AwaitingLaunch,
            run_state: RunState::Running,
            plate,
            ball: None,
            cannon_angle,
            episode: 0,
            episode_ticks: 0,
            time_ticks: 0,
            episode_deflections: 0,
            total_deflections: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Request a stop. Takes effect at the next tick boundary.
    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            log::info!("Stop requested after {} episode(s)", self.episode);
            self.run_state = RunState::Stopped;
        }
    }

    /// Fire the cannon with a freshly sampled launch.
    ///
    /// Clears the plate's observation history; the plate keeps its height.
    pub fn launch(&mut self) -> Launch {
        let launch = sample_launch(&self.config.launch_params(), &mut self.rng);
        self.launch_with(launch);
        launch
    }

    /// Fire the cannon with a given launch (replays, tests)
    pub fn launch_with(&mut self, launch: Launch) {
        self.plate.reset_tracking();
        self.ball = Some(Ball::new(
            self.config.cannon_coord,
            launch.velocity,
            self.config.radius,
            self.config.dt,
        ));
        self.cannon_angle = launch.angle;
        self.episode += 1;
        self.episode_ticks = 0;
        self.episode_deflections = 0;
        self.phase = EpisodePhase::InFlight;

        log::info!(
            "Episode {}: launch speed {:.1} at {:.1} deg",
            self.episode,
            launch.speed(),
            launch.angle.to_degrees()
        );
    }

    /// Discard the ball and wait for the next launch
    pub(crate) fn end_episode(&mut self, reason: ExitReason) {
        self.ball = None;
        self.phase = EpisodePhase::AwaitingLaunch;
        log::info!(
            "Episode {} over after {} ticks: ball left through the {} ({} deflection(s))",
            self.episode,
            self.episode_ticks,
            reason.as_str(),
            self.episode_deflections
        );
    }
}
