//! Cannonball kinematics
//!
//! Semi-implicit Euler under constant acceleration: velocity is updated
//! first, then position moves with the new velocity.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Advance a (position, velocity) pair by one step of constant acceleration
#[inline]
pub fn integrate(pos: DVec2, vel: DVec2, accel: DVec2, dt: f64) -> (DVec2, DVec2) {
    let vel = vel + accel * dt;
    (pos + vel * dt, vel)
}

/// The cannonball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Always positive
    pub radius: f64,
    /// Shared simulation time step
    pub dt: f64,
}

impl Ball {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, dt: f64) -> Self {
        debug_assert!(radius > 0.0, "ball radius must be positive");
        Self {
            pos,
            vel,
            radius,
            dt,
        }
    }

    /// One simulation step: accelerate, then move
    pub fn step(&mut self, accel: DVec2) {
        (self.pos, self.vel) = integrate(self.pos, self.vel, accel, self.dt);
    }

    /// Distance covered during one tick at the current speed
    pub fn sweep(&self) -> f64 {
        self.vel.length() * self.dt
    }

    /// Reflect off a vertical surface
    pub fn deflect_horizontal(&mut self) {
        self.vel.x = -self.vel.x;
    }
}
