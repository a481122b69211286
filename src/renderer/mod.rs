//! Scene output
//!
//! The simulation hands a [`Scene`] to a [`SceneSink`] once per tick. The
//! crate ships a software raster sink and a log-only sink for headless runs.

pub mod frame;
pub mod shapes;

pub use frame::{Frame, Rgb, colors};

use glam::DVec2;

use crate::consts::HINT;
use crate::sim::SimState;

/// A thick line segment in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: DVec2,
    pub b: DVec2,
    pub thickness: f64,
}

/// Everything a sink needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub plane_size: DVec2,
    /// Ball center and radius, if a ball is in flight
    pub ball: Option<(DVec2, f64)>,
    /// The plate itself
    pub plate: Segment,
    /// Arm holding the plate from the right wall
    pub plate_arm: Segment,
    pub cannon_barrel: Segment,
    /// Cannon pivot and hub radius
    pub cannon_hub: (DVec2, f64),
    /// x positions bounding the trackable zone
    pub zone_dividers: [f64; 2],
    pub hint: &'static str,
}

impl Scene {
    /// Snapshot the drawable geometry of a simulation state
    pub fn from_state(state: &SimState) -> Self {
        let config = &state.config;
        let plate = &state.plate;
        let (zone_lo, zone_hi) = config.tracking_zone();

        let pivot = config.cannon_coord;
        let muzzle = pivot + DVec2::from_angle(state.cannon_angle) * config.cannon_length;

        Self {
            plane_size: config.plane_size,
            ball: state.ball.as_ref().map(|b| (b.pos, b.radius)),
            plate: Segment {
                a: DVec2::new(plate.plate_x, plate.center_height - plate.half_width()),
                b: DVec2::new(plate.plate_x, plate.center_height + plate.half_width()),
                thickness: 3.0,
            },
            plate_arm: Segment {
                a: DVec2::new(plate.plate_x, plate.center_height),
                b: DVec2::new(config.plane_size.x, plate.center_height),
                thickness: 6.0,
            },
            cannon_barrel: Segment {
                a: pivot,
                b: muzzle,
                thickness: config.cannon_width,
            },
            cannon_hub: (pivot, config.cannon_width),
            zone_dividers: [zone_lo, zone_hi],
            hint: HINT,
        }
    }
}

/// Consumer of per-tick scene geometry
pub trait SceneSink {
    fn present(&mut self, scene: &Scene);
}

/// Sink that only logs the geometry (trace level)
#[derive(Debug, Default)]
pub struct LogSink {
    frames: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl SceneSink for LogSink {
    fn present(&mut self, scene: &Scene) {
        self.frames += 1;
        match scene.ball {
            Some((pos, _)) => log::trace!(
                "Frame {}: ball ({:.1}, {:.1}), plate at {:.1}",
                self.frames,
                pos.x,
                pos.y,
                scene.plate_arm.a.y
            ),
            None => log::trace!("Frame {}: no ball, plate at {:.1}", self.frames, scene.plate_arm.a.y),
        }
    }
}

/// Sink that rasterizes every scene into an RGB frame
#[derive(Debug, Clone)]
pub struct RasterSink {
    frame: Frame,
    hint: &'static str,
}

impl RasterSink {
    pub fn new(plane_size: DVec2) -> Self {
        Self {
            frame: Frame::new(plane_size.x.round() as usize, plane_size.y.round() as usize),
            hint: "",
        }
    }

    /// Most recently rendered frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Hint text attached to the last frame (text itself is not rasterized)
    pub fn hint(&self) -> &'static str {
        self.hint
    }
}

impl SceneSink for RasterSink {
    fn present(&mut self, scene: &Scene) {
        render_scene(&mut self.frame, scene);
        self.hint = scene.hint;
    }
}

/// Draw a full scene: borders, zone dividers, cannon, ball, plate
pub fn render_scene(frame: &mut Frame, scene: &Scene) {
    use shapes::{fill_circle, thick_line};

    frame.clear(colors::BACKGROUND);
    let (w, h) = (scene.plane_size.x, scene.plane_size.y);

    for x in scene.zone_dividers {
        thick_line(frame, DVec2::new(x, 0.0), DVec2::new(x, h), 3.0, colors::ZONE_DIVIDER);
    }

    let corners = [
        DVec2::new(0.0, 0.0),
        DVec2::new(w, 0.0),
        DVec2::new(w, h),
        DVec2::new(0.0, h),
    ];
    for i in 0..corners.len() {
        let next = corners[(i + 1) % corners.len()];
        thick_line(frame, corners[i], next, 5.0, colors::BORDER);
    }

    let barrel = scene.cannon_barrel;
    thick_line(frame, barrel.a, barrel.b, barrel.thickness, colors::CANNON);
    fill_circle(frame, scene.cannon_hub.0, scene.cannon_hub.1, colors::CANNON_HUB);

    if let Some((pos, radius)) = scene.ball {
        fill_circle(frame, pos, radius, colors::BALL);
    }

    let plate = scene.plate;
    thick_line(frame, plate.a, plate.b, plate.thickness, colors::PLATE);
    let arm = scene.plate_arm;
    thick_line(frame, arm.a, arm.b, arm.thickness, colors::PLATE_ARM);
}
