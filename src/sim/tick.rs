//! Fixed timestep simulation tick
//!
//! One tick, in order: integrate the ball, deflect it off the plate, let the
//! plate observe it, re-run the prediction, move the plate, then check
//! whether the ball left the scene.

use glam::DVec2;

use super::collision::deflect_off_plate;
use super::launch::Launch;
use super::predictor::Prediction;
use super::state::{EpisodePhase, ExitReason, RunState, SimState, exit_reason};

/// Source of ball observations for the predictor.
///
/// Called once per in-flight tick, after the ball has moved and before the
/// plate does.
pub trait BallObserver {
    /// Position estimate for the ball, or `None` if it cannot be seen
    fn observe(&mut self, state: &SimState) -> Option<DVec2>;
}

/// Sees the true ball position while it is inside a horizontal band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneObserver {
    pub x_min: f64,
    pub x_max: f64,
}

impl ZoneObserver {
    pub fn new(x_min: f64, x_max: f64) -> Self {
        Self { x_min, x_max }
    }

    /// Open interval test
    pub fn contains(&self, x: f64) -> bool {
        x > self.x_min && x < self.x_max
    }
}

impl BallObserver for ZoneObserver {
    fn observe(&mut self, state: &SimState) -> Option<DVec2> {
        let pos = state.ball.as_ref()?.pos;
        self.contains(pos.x).then_some(pos)
    }
}

/// What happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// The cannon fired; no physics ran this tick
    Launched(Launch),
    /// The ball moved and is still in the scene
    Flying(TickReport),
    /// The ball moved and left the scene; the episode is over
    Exited {
        reason: ExitReason,
        report: TickReport,
    },
    /// The run was stopped; nothing happened
    Stopped,
}

/// Details of an in-flight tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Ball position after integration
    pub ball_pos: DVec2,
    pub deflected: bool,
    /// Observation handed to the predictor (kept or rejected as duplicate)
    pub observation: Option<DVec2>,
    pub prediction: Prediction,
    /// Signed plate displacement
    pub plate_moved: f64,
}

/// Advance the simulation by one tick
pub fn tick<O: BallObserver + ?Sized>(state: &mut SimState, observer: &mut O) -> TickEvent {
    if state.run_state == RunState::Stopped {
        return TickEvent::Stopped;
    }

    state.time_ticks += 1;

    let ball = match state.ball.as_mut() {
        Some(ball) if state.phase == EpisodePhase::InFlight => ball,
        _ => return TickEvent::Launched(state.launch()),
    };

    ball.step(state.config.gravity_vector);
    let deflected = deflect_off_plate(ball, &state.plate);
    let ball_pos = ball.pos;

    let observation = observer.observe(state);
    if let Some(pos) = observation {
        state.plate.observe(pos);
    }

    // Prediction runs every tick, with or without a new observation
    let prediction = state.plate.update_target();
    let plate_moved = state.plate.move_to_target();

    state.episode_ticks += 1;
    if deflected {
        state.episode_deflections += 1;
        state.total_deflections += 1;
    }

    log::trace!(
        "Tick {}: ball ({:.2}, {:.2}) plate {:.2} -> {:.2} ({:?})",
        state.time_ticks,
        ball_pos.x,
        ball_pos.y,
        state.plate.center_height,
        prediction.height,
        prediction.fit
    );

    let report = TickReport {
        ball_pos,
        deflected,
        observation,
        prediction,
        plate_moved,
    };

    match exit_reason(ball_pos, state.config.plane_size) {
        Some(reason) => {
            state.end_episode(reason);
            TickEvent::Exited { reason, report }
        }
        None => TickEvent::Flying(report),
    }
}
