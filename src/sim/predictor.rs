//! Trajectory prediction from observed ball positions
//!
//! The plate only sees the ball in the middle of the plane. Each observation
//! goes into an append-only history; the predicted crossing height at the
//! plate's x comes from a polynomial through up to three anchors:
//!
//! - 0 observations: stay put
//! - 1 observation: constant (its y)
//! - 2 observations: line through the earliest and latest
//! - 3+: parabola through the first, the latest, and the one `n/2` before
//!   the latest
//!
//! The first observation of an episode anchors every later parabola, so a
//! noisy first sample biases the whole fit.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Which polynomial produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitKind {
    /// No observations, hold current height
    Hold,
    /// Single observation, constant extrapolation
    Constant,
    Linear,
    Quadratic,
}

/// A predicted crossing height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub height: f64,
    pub fit: FitKind,
}

/// Observation history for one episode
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrajectoryPredictor {
    observations: Vec<DVec2>,
}

impl TrajectoryPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a ball position.
    ///
    /// Positions sharing an x with an earlier observation are rejected so the
    /// fits never see two anchors stacked vertically. Returns whether the
    /// observation was kept.
    pub fn observe(&mut self, pos: DVec2) -> bool {
        if self.observations.iter().any(|o| o.x == pos.x) {
            log::trace!("Rejected observation with repeated x = {}", pos.x);
            return false;
        }
        self.observations.push(pos);
        log::debug!(
            "Observation #{} at ({:.1}, {:.1})",
            self.observations.len(),
            pos.x,
            pos.y
        );
        true
    }

    /// Forget the current episode's observations
    pub fn clear(&mut self) {
        self.observations.clear();
    }

    /// Number of observations this episode
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations in arrival order
    pub fn observations(&self) -> &[DVec2] {
        &self.observations
    }

    /// Indices of the fit anchors for `n >= 3` observations: first, middle, last
    pub fn quadratic_anchors(n: usize) -> (usize, usize, usize) {
        debug_assert!(n >= 3);
        (0, n - (n / 2 + 1), n - 1)
    }

    /// Predict the ball height at `plate_x`, falling back to `current_height`
    /// when nothing has been observed.
    pub fn predict(&self, plate_x: f64, current_height: f64) -> Prediction {
        let obs = &self.observations;
        match obs.len() {
            0 => Prediction {
                height: current_height,
                fit: FitKind::Hold,
            },
            1 => Prediction {
                height: obs[0].y,
                fit: FitKind::Constant,
            },
            2 => linear_through(obs[0], obs[1], plate_x),
            n => {
                let (first, mid, last) = Self::quadratic_anchors(n);
                quadratic_through(obs[first], obs[mid], obs[last], plate_x)
                    .unwrap_or_else(|| linear_through(obs[first], obs[last], plate_x))
            }
        }
    }
}

/// Line through `p0` and `p1` evaluated at `x`.
///
/// Coincident x values fall back to `p1.y`.
pub fn linear_through(p0: DVec2, p1: DVec2, x: f64) -> Prediction {
    if p0.x == p1.x {
        return Prediction {
            height: p1.y,
            fit: FitKind::Constant,
        };
    }
    let a = (p1.y - p0.y) / (p1.x - p0.x);
    let b = (p0.y * p1.x - p1.y * p0.x) / (p1.x - p0.x);
    Prediction {
        height: a * x + b,
        fit: FitKind::Linear,
    }
}

/// Parabola `y = a*x^2 + b*x + c` through three points, evaluated at `x`.
///
/// Returns `None` when two anchors share an x or the result is not finite.
pub fn quadratic_through(p0: DVec2, p1: DVec2, p2: DVec2, x: f64) -> Option<Prediction> {
    if p0.x == p1.x || p0.x == p2.x || p1.x == p2.x {
        return None;
    }
    let slope01 = (p1.y - p0.y) / (p1.x - p0.x);
    let slope02 = (p2.y - p0.y) / (p2.x - p0.x);

    let a = (slope02 - slope01) / (p2.x - p1.x);
    let b = slope01 - a * (p1.x + p0.x);
    let c = p0.y - a * p0.x * p0.x - b * p0.x;

    let height = a * x * x + b * x + c;
    height.is_finite().then_some(Prediction {
        height,
        fit: FitKind::Quadratic,
    })
}
