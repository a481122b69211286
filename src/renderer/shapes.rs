//! Rasterization of 2D primitives into a [`Frame`]
//!
//! All inputs are scene coordinates (y up).

use glam::DVec2;

use super::frame::{Frame, Rgb};

/// Filled circle
pub fn fill_circle(frame: &mut Frame, center: DVec2, radius: f64, color: Rgb) {
    if radius <= 0.0 {
        return;
    }
    let c = frame.to_pixel(center);
    let r2 = radius * radius;

    let (x0, x1) = ((c.x - radius).floor() as i64, (c.x + radius).ceil() as i64);
    let (y0, y1) = ((c.y - radius).floor() as i64, (c.y + radius).ceil() as i64);
    for row in y0..=y1 {
        for col in x0..=x1 {
            let d = DVec2::new(col as f64, row as f64) - c;
            if d.length_squared() <= r2 {
                frame.set(col, row, color);
            }
        }
    }
}

/// Line segment of the given thickness (pixels within `thickness / 2` of it)
pub fn thick_line(frame: &mut Frame, a: DVec2, b: DVec2, thickness: f64, color: Rgb) {
    let pa = frame.to_pixel(a);
    let pb = frame.to_pixel(b);
    let half = (thickness / 2.0).max(0.5);

    let line = pb - pa;
    let len_sq = line.length_squared();

    let min = pa.min(pb) - DVec2::splat(half);
    let max = pa.max(pb) + DVec2::splat(half);
    for row in min.y.floor() as i64..=max.y.ceil() as i64 {
        for col in min.x.floor() as i64..=max.x.ceil() as i64 {
            let p = DVec2::new(col as f64, row as f64);
            // Closest point on the segment
            let t = if len_sq < 1e-12 {
                0.0
            } else {
                ((p - pa).dot(line) / len_sq).clamp(0.0, 1.0)
            };
            if p.distance_squared(pa + line * t) <= half * half {
                frame.set(col, row, color);
            }
        }
    }
}
